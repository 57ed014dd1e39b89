//! Configuration module for nuget-bom.
//!
//! This module provides:
//! - Typed configuration structures with defaults
//! - Validation of configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use nuget_bom::config::{AppConfig, Validatable};
//!
//! let config = AppConfig::builder().jobs(4).build();
//! assert!(config.is_valid());
//!
//! // Load from file, falling back to defaults
//! use nuget_bom::config::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.nuget-bom.yaml` file in your project root or `~/.config/nuget-bom/`:
//!
//! ```yaml
//! registry:
//!   base_url: https://api.nuget.org/v3-flatcontainer/
//!   timeout_secs: 30
//! resolution:
//!   jobs: 4
//! output:
//!   format: xml
//!   file_name: bom.xml
//!   pretty: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_BASE_URL, DEFAULT_JOBS, DEFAULT_PRETTY};
pub use types::{AppConfig, AppConfigBuilder, OutputConfig, RegistryConfig, ResolutionConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    CliOverrides, ConfigFileError,
};
