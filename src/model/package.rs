//! Upstream package metadata, as read from a nuspec descriptor.

use serde::{Deserialize, Serialize};

/// Metadata of one package version.
///
/// Produced by a [`crate::client::MetadataSource`] and consumed once by the
/// component builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub id: String,
    pub version: String,
    pub authors: String,
    pub copyright: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
}

impl PackageMetadata {
    /// Create metadata with the required fields only
    #[must_use]
    pub fn new(id: impl Into<String>, version: impl Into<String>, authors: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            authors: authors.into(),
            copyright: None,
            summary: None,
            description: None,
            title: None,
        }
    }
}
