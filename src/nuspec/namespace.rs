//! Nuspec schema namespaces.

/// Current nuspec schema namespace.
pub const NUSPEC_NAMESPACE: &str = "http://schemas.microsoft.com/packaging/2013/05/nuspec.xsd";

/// Older nuspec namespaces that share the current schema's structure.
pub const LEGACY_NUSPEC_NAMESPACES: [&str; 4] = [
    "http://schemas.microsoft.com/packaging/2012/06/nuspec.xsd",
    "http://schemas.microsoft.com/packaging/2013/01/nuspec.xsd",
    "http://schemas.microsoft.com/packaging/2011/08/nuspec.xsd",
    "http://schemas.microsoft.com/packaging/2010/07/nuspec.xsd",
];

/// Immutable table of namespaces accepted for package descriptors.
///
/// Every accepted namespace maps to a single target namespace. Descriptors
/// declared under a legacy namespace are read as if they were declared under
/// the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceMap {
    target: String,
    substitutes: Vec<String>,
}

impl Default for NamespaceMap {
    fn default() -> Self {
        Self::new(
            NUSPEC_NAMESPACE,
            LEGACY_NUSPEC_NAMESPACES.iter().map(|ns| (*ns).to_string()),
        )
    }
}

impl NamespaceMap {
    /// Create a map whose `substitutes` all resolve to `target`
    pub fn new(target: impl Into<String>, substitutes: impl IntoIterator<Item = String>) -> Self {
        Self {
            target: target.into(),
            substitutes: substitutes.into_iter().collect(),
        }
    }

    /// The namespace every accepted namespace resolves to
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Resolve a declared namespace to the target, if it is accepted
    #[must_use]
    pub fn resolve(&self, namespace: &str) -> Option<&str> {
        if namespace == self.target || self.is_substitute(namespace) {
            Some(&self.target)
        } else {
            None
        }
    }

    /// Whether `namespace` is one of the remapped legacy namespaces
    #[must_use]
    pub fn is_substitute(&self, namespace: &str) -> bool {
        self.substitutes.iter().any(|ns| ns == namespace)
    }
}
