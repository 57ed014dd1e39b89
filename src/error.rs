//! Unified error types for nuget-bom.
//!
//! Fatal failures surface as [`NugetBomError`]. Each variant carries enough
//! context (the manifest key and path, or the failing `id@version`) to
//! diagnose a failed run without re-running it with extra logging.
//!
//! Package URL construction failures are deliberately absent here: they are
//! reported as [`crate::model::Diagnostic`] values and never abort a run.

use crate::model::PackageCoordinate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nuget-bom operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NugetBomError {
    /// The lock manifest is unreadable or a library entry is malformed
    #[error("Invalid lock manifest: {context}")]
    Manifest {
        context: String,
        #[source]
        source: ManifestErrorKind,
    },

    /// Metadata for a single package could not be obtained
    #[error("Failed to resolve {id}@{version}: {source}")]
    Resolution {
        id: String,
        version: String,
        #[source]
        source: ResolutionErrorKind,
    },

    /// The inventory document could not be rendered
    #[error("BOM rendering failed: {0}")]
    Render(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific lock manifest error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ManifestErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unsupported assets file version: {version} (supported: 3)")]
    UnsupportedVersion { version: u64 },

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Malformed library path '{path}' for entry '{key}': {reason}")]
    MalformedPath {
        key: String,
        path: String,
        reason: &'static str,
    },
}

/// Why a single package could not be resolved
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolutionErrorKind {
    #[error("package descriptor not found (HTTP {status})")]
    NotFound { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed package descriptor: {0}")]
    MetadataParse(#[from] MetadataParseError),
}

/// A nuspec body that does not parse under the package descriptor schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MetadataParseError {
    #[error("empty document")]
    Empty,

    #[error("unexpected root element '{0}', expected 'package'")]
    UnexpectedRoot(String),

    #[error("unsupported nuspec namespace '{0}'")]
    UnsupportedNamespace(String),

    #[error("root element 'package' has no namespace")]
    MissingNamespace,

    #[error("invalid XML: {0}")]
    Xml(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for nuget-bom operations
pub type Result<T> = std::result::Result<T, NugetBomError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl NugetBomError {
    /// Create a manifest error with context
    pub fn manifest(context: impl Into<String>, source: ManifestErrorKind) -> Self {
        Self::Manifest {
            context: context.into(),
            source,
        }
    }

    /// Create a manifest error for a malformed library path
    pub fn malformed_path(
        key: impl Into<String>,
        path: impl Into<String>,
        reason: &'static str,
    ) -> Self {
        Self::manifest(
            "library entry",
            ManifestErrorKind::MalformedPath {
                key: key.into(),
                path: path.into(),
                reason,
            },
        )
    }

    /// Create a manifest error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::manifest(
            "missing required field",
            ManifestErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a resolution error for the given coordinate
    pub fn resolution(coordinate: &PackageCoordinate, source: ResolutionErrorKind) -> Self {
        Self::Resolution {
            id: coordinate.id.clone(),
            version: coordinate.version.clone(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The `id@version` this error is about, for resolution failures
    #[must_use]
    pub fn failing_coordinate(&self) -> Option<String> {
        match self {
            Self::Resolution { id, version, .. } => Some(format!("{id}@{version}")),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for NugetBomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for NugetBomError {
    fn from(err: serde_json::Error) -> Self {
        Self::manifest(
            "JSON deserialization",
            ManifestErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// chain such as `"reading assets file: JSON deserialization"` shows the
/// path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<NugetBomError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Resolution errors are left untouched: their identity is the coordinate.
fn add_context_to_error(err: NugetBomError, new_ctx: &str) -> NugetBomError {
    match err {
        NugetBomError::Manifest {
            context: existing,
            source,
        } => NugetBomError::Manifest {
            context: chain_context(new_ctx, &existing),
            source,
        },
        NugetBomError::Io {
            path,
            message,
            source,
        } => NugetBomError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        NugetBomError::Render(msg) => NugetBomError::Render(chain_context(new_ctx, &msg)),
        NugetBomError::Config(msg) => NugetBomError::Config(chain_context(new_ctx, &msg)),
        other @ NugetBomError::Resolution { .. } => other,
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a missing-field error for `field` in `context`.
    fn required(self, field: &str, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn required(self, field: &str, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| NugetBomError::missing_field(field, context))
    }
}
