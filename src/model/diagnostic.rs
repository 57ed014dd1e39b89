//! Non-fatal outcomes recorded while building the inventory.

use super::PackageCoordinate;

/// Something that went wrong for one component without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Manifest coordinate the diagnostic is about
    pub coordinate: PackageCoordinate,
    pub kind: DiagnosticKind,
}

/// Kinds of non-fatal diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// The package URL could not be built; the component has no `purl`
    PurlConstruction { reason: String },
}

impl Diagnostic {
    #[must_use]
    pub fn purl_construction(coordinate: PackageCoordinate, reason: impl Into<String>) -> Self {
        Self {
            coordinate,
            kind: DiagnosticKind::PurlConstruction {
                reason: reason.into(),
            },
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::PurlConstruction { reason } => {
                write!(f, "{}: package URL not set ({reason})", self.coordinate)
            }
        }
    }
}
