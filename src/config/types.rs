//! Configuration types for nuget-bom runs.

use super::defaults::{DEFAULT_BASE_URL, DEFAULT_JOBS, DEFAULT_PRETTY};
use crate::bom::OutputFormat;
use crate::client::NugetClientConfig;
use crate::parser::ResolutionOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration loaded from a config file and CLI arguments.
///
/// CLI arguments take precedence over file settings, see [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Package registry settings
    pub registry: RegistryConfig,
    /// Metadata resolution settings
    pub resolution: ResolutionConfig,
    /// Output document settings
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Client settings for the configured registry.
    #[must_use]
    pub fn client_config(&self) -> NugetClientConfig {
        NugetClientConfig {
            base_url: self.registry.base_url.clone(),
            timeout: self.registry.timeout_secs.map(Duration::from_secs),
            ..NugetClientConfig::default()
        }
    }

    /// Resolution options for the manifest parser.
    #[must_use]
    pub const fn resolution_options(&self) -> ResolutionOptions {
        ResolutionOptions {
            jobs: self.resolution.jobs,
        }
    }
}

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the flat-container base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.registry.base_url = url.into();
        self
    }

    /// Set the request timeout in seconds.
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.registry.timeout_secs = Some(secs);
        self
    }

    /// Set the number of resolution workers.
    pub const fn jobs(mut self, jobs: usize) -> Self {
        self.config.resolution.jobs = jobs;
        self
    }

    /// Set the output document encoding.
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file name.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output.file_name = Some(name.into());
        self
    }

    /// Enable or disable pretty-printed output.
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.config.output.pretty = pretty;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

/// Package registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Flat-container base URL
    pub base_url: String,
    /// Request timeout in seconds; unset keeps the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Metadata resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Worker count; 1 resolves sequentially
    pub jobs: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self { jobs: DEFAULT_JOBS }
    }
}

/// Output document settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Document encoding
    pub format: OutputFormat,
    /// File name written inside the output directory; unset uses the
    /// format's default name
    pub file_name: Option<String>,
    /// Pretty-print the document
    pub pretty: bool,
}

impl OutputConfig {
    /// Configured file name, or `bom.json` / `bom.xml` by format
    #[must_use]
    pub fn resolved_file_name(&self) -> &str {
        self.file_name
            .as_deref()
            .unwrap_or_else(|| self.format.default_file_name())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            file_name: None,
            pretty: DEFAULT_PRETTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.registry.base_url, "https://api.nuget.org/v3-flatcontainer/");
        assert_eq!(config.registry.timeout_secs, None);
        assert_eq!(config.resolution.jobs, 1);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.resolved_file_name(), "bom.json");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_file_name_follows_format() {
        let config = AppConfig::builder().format(OutputFormat::Xml).build();
        assert_eq!(config.output.resolved_file_name(), "bom.xml");

        let config = AppConfig::builder()
            .format(OutputFormat::Xml)
            .file_name("inventory.cdx.xml")
            .build();
        assert_eq!(config.output.resolved_file_name(), "inventory.cdx.xml");
    }

    #[test]
    fn test_format_from_yaml() {
        let config: AppConfig = serde_yaml::from_str("output:\n  format: xml\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Xml);
        assert_eq!(config.output.file_name, None);
        assert!(serde_yaml::from_str::<AppConfig>("output:\n  format: spdx\n").is_err());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .base_url("https://mirror.example.com/flat/")
            .timeout_secs(30)
            .jobs(8)
            .pretty(false)
            .build();

        assert_eq!(config.resolution.jobs, 8);
        assert!(!config.output.pretty);

        let client = config.client_config();
        assert_eq!(client.base_url, "https://mirror.example.com/flat/");
        assert_eq!(client.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.resolution_options().jobs, 8);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("resolution:\n  jobs: 4\n").unwrap();
        assert_eq!(config.resolution.jobs, 4);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.registry, RegistryConfig::default());
    }
}
