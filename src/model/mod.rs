//! Data model for lock manifests, package metadata and the resolved
//! inventory.
//!
//! [`LockManifest`] and [`PackageMetadata`] are transient inputs of one run.
//! [`Component`] and [`ComponentSet`] are its output and are owned by the
//! caller once parsing returns.

mod component;
mod component_set;
mod diagnostic;
mod manifest;
mod package;

pub use component::*;
pub use component_set::*;
pub use diagnostic::*;
pub use manifest::*;
pub use package::*;
