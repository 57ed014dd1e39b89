//! Package metadata retrieval.
//!
//! [`MetadataSource`] is the seam between manifest parsing and the registry.
//! [`NugetClient`] implements it against the NuGet flat-container endpoint;
//! tests and tools can plug in their own sources.
//!
//! # Example
//!
//! ```no_run
//! use nuget_bom::client::{FetchOutcome, MetadataSource, NugetClient, NugetClientConfig};
//!
//! let client = NugetClient::new(NugetClientConfig::default())?;
//! match client.fetch("newtonsoft.json", "13.0.1")? {
//!     FetchOutcome::Resolved(metadata) => println!("{} by {}", metadata.id, metadata.authors),
//!     FetchOutcome::NotFound { status } => println!("not found (HTTP {status})"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod http;

pub use http::{NugetClient, NugetClientConfig, NUGET_FLAT_CONTAINER_URL};

use crate::error::ResolutionErrorKind;
use crate::model::PackageMetadata;

/// Result of looking up one package version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The descriptor was retrieved and parsed
    Resolved(PackageMetadata),
    /// The registry has no descriptor for this coordinate
    NotFound { status: u16 },
}

/// Source of package metadata.
///
/// Transport and descriptor failures are returned as errors; a missing
/// package is a regular [`FetchOutcome::NotFound`].
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for one package version.
    fn fetch(&self, id: &str, version: &str) -> Result<FetchOutcome, ResolutionErrorKind>;

    /// Name of this source, for logging.
    fn name(&self) -> &'static str;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn fetch(&self, id: &str, version: &str) -> Result<FetchOutcome, ResolutionErrorKind> {
        (**self).fetch(id, version)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    fn fetch(&self, id: &str, version: &str) -> Result<FetchOutcome, ResolutionErrorKind> {
        (**self).fetch(id, version)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<PackageMetadata>);

    impl MetadataSource for Fixed {
        fn fetch(&self, _id: &str, _version: &str) -> Result<FetchOutcome, ResolutionErrorKind> {
            Ok(match &self.0 {
                Some(m) => FetchOutcome::Resolved(m.clone()),
                None => FetchOutcome::NotFound { status: 404 },
            })
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_boxed_and_borrowed_sources_delegate() {
        let source = Fixed(None);
        let borrowed: &dyn MetadataSource = &source;
        assert_eq!(borrowed.name(), "fixed");

        let boxed: Box<dyn MetadataSource> = Box::new(Fixed(Some(PackageMetadata::new("a", "1", "x"))));
        assert!(matches!(boxed.fetch("a", "1"), Ok(FetchOutcome::Resolved(_))));
    }
}
