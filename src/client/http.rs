//! NuGet flat-container HTTP client.

use super::{FetchOutcome, MetadataSource};
use crate::error::{NugetBomError, ResolutionErrorKind, Result};
use crate::nuspec::{parse_descriptor, NamespaceMap};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

/// Default flat-container base location on nuget.org.
pub const NUGET_FLAT_CONTAINER_URL: &str = "https://api.nuget.org/v3-flatcontainer/";

/// NuGet client configuration.
#[derive(Debug, Clone)]
pub struct NugetClientConfig {
    /// Flat-container base URL, with a trailing slash
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    /// Namespaces accepted for package descriptors
    pub namespaces: NamespaceMap,
}

impl Default for NugetClientConfig {
    fn default() -> Self {
        Self {
            base_url: NUGET_FLAT_CONTAINER_URL.to_string(),
            timeout: None,
            namespaces: NamespaceMap::default(),
        }
    }
}

/// Blocking HTTP client for nuspec descriptors.
///
/// Issues exactly one GET per [`MetadataSource::fetch`] call. Only HTTP 200
/// counts as found.
pub struct NugetClient {
    client: Client,
    config: NugetClientConfig,
}

impl NugetClient {
    /// Create a new client with its own HTTP transport.
    pub fn new(config: NugetClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NugetBomError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client on top of an existing HTTP transport.
    #[must_use]
    pub fn with_client(client: Client, mut config: NugetClientConfig) -> Self {
        if !config.base_url.ends_with('/') {
            config.base_url.push('/');
        }
        tracing::debug!("Using flat container at {}", config.base_url);
        Self { client, config }
    }

    #[must_use]
    pub const fn config(&self) -> &NugetClientConfig {
        &self.config
    }

    /// Descriptor location for a package version.
    ///
    /// The flat container only serves lowercase ids and versions.
    #[must_use]
    pub fn descriptor_url(&self, id: &str, version: &str) -> String {
        let id = id.to_lowercase();
        let version = version.to_lowercase();
        format!("{}{id}/{version}/{id}.nuspec", self.config.base_url)
    }
}

impl MetadataSource for NugetClient {
    fn fetch(&self, id: &str, version: &str) -> std::result::Result<FetchOutcome, ResolutionErrorKind> {
        let url = self.descriptor_url(id, version);
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ResolutionErrorKind::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("{}@{} not found: HTTP {}", id, version, status.as_u16());
            return Ok(FetchOutcome::NotFound {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| ResolutionErrorKind::Network(e.to_string()))?;
        let metadata = parse_descriptor(&body, &self.config.namespaces)?;

        Ok(FetchOutcome::Resolved(metadata))
    }

    fn name(&self) -> &'static str {
        "flat-container"
    }
}
