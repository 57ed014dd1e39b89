//! Configuration validation for nuget-bom.

use super::types::{AppConfig, OutputConfig, RegistryConfig, ResolutionConfig};
use crate::parser::MAX_JOBS;

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.registry.validate());
        errors.extend(self.resolution.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for RegistryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let url = self.base_url.trim();
        if url.is_empty() {
            errors.push(ConfigError::new("registry.base_url", "must not be empty"));
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "registry.base_url",
                format!("'{url}' must be an http:// or https:// URL"),
            ));
        }

        if self.timeout_secs == Some(0) {
            errors.push(ConfigError::new(
                "registry.timeout_secs",
                "must be greater than 0 when set",
            ));
        }

        errors
    }
}

impl Validatable for ResolutionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if (1..=MAX_JOBS).contains(&self.jobs) {
            Vec::new()
        } else {
            vec![ConfigError::new(
                "resolution.jobs",
                format!("must be between 1 and {MAX_JOBS}, got {}", self.jobs),
            )]
        }
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let Some(name) = self.file_name.as_deref().map(str::trim) else {
            return Vec::new();
        };
        if name.is_empty() {
            vec![ConfigError::new("output.file_name", "must not be empty")]
        } else if name.contains(['/', '\\']) || name == "." || name == ".." {
            vec![ConfigError::new(
                "output.file_name",
                format!("'{name}' must be a plain file name"),
            )]
        } else {
            Vec::new()
        }
    }
}
