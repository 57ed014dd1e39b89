//! **Software bills of materials for NuGet projects.**
//!
//! `nuget-bom` reads the lock manifest NuGet writes for a restored project
//! (`obj/project.assets.json`), fetches the package descriptor (`.nuspec`) of
//! every locked library from a flat-container registry, and assembles a
//! deduplicated set of components that can be rendered as a CycloneDX
//! document.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The lock manifest, package metadata and the resulting
//!   [`Component`] / [`ComponentSet`] types.
//! - **[`nuspec`]**: Namespace-aware parsing of package descriptors, including
//!   the legacy schema namespaces older packages still ship with.
//! - **[`client`]**: The [`MetadataSource`] trait and the HTTP [`NugetClient`]
//!   backed by the nuget.org flat container.
//! - **[`parser`]**: The [`ManifestParser`], which drives resolution for every
//!   library in a manifest and builds components.
//! - **[`bom`]**: CycloneDX 1.5 JSON rendering.
//! - **[`generator`]**: [`BomGenerator`], the file-in, file-out entry point
//!   used by the command-line tool.
//! - **[`config`]**: YAML configuration with discovery and validation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use nuget_bom::{ManifestParser, NugetClient, NugetClientConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NugetClient::new(NugetClientConfig::default())?;
//!     let output = ManifestParser::new(client)
//!         .parse_file(Path::new("obj/project.assets.json"))?;
//!
//!     for component in output.components.sorted() {
//!         println!("{} {}", component.name, component.version);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Resolution is all-or-nothing: a malformed manifest entry, a package the
//! registry does not serve, or an unreadable descriptor aborts the run with a
//! [`NugetBomError`] naming the offending package.
//!
//! ## Writing a Document
//!
//! ```no_run
//! use nuget_bom::{AppConfig, BomGenerator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = BomGenerator::new("obj/project.assets.json", "target/bom")
//!         .with_config(AppConfig::builder().jobs(4).build())
//!         .run()?;
//!     println!("{} components", report.document.component_count);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod bom;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod nuspec;
pub mod parser;

pub use bom::{BomDocument, CycloneDxRenderer, OutputFormat};
pub use client::{FetchOutcome, MetadataSource, NugetClient, NugetClientConfig};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{ErrorContext, NugetBomError, OptionContext, Result};
pub use generator::{BomGenerator, GenerationReport, SourceType};
pub use model::{
    Component, ComponentKey, ComponentSet, ComponentType, Diagnostic, DiagnosticKind, Hash,
    HashAlgorithm, LockManifest, PackageCoordinate, PackageMetadata,
};
pub use nuspec::{parse_descriptor, NamespaceMap};
pub use parser::{ManifestParser, ParseOutput, ResolutionOptions};
