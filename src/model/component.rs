//! Canonical component record and its identity.

use serde::{Deserialize, Serialize};

/// Component type classification.
///
/// The assets file gives no finer classification signal than "package", so
/// every resolved component is a [`ComponentType::Library`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ComponentType {
    #[default]
    Library,
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Library => write!(f, "library"),
        }
    }
}

/// Hash algorithm types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Sha512,
    Other(String),
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha512 => write!(f, "SHA-512"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Integrity hash of a component
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash {
    /// Hash algorithm
    pub algorithm: HashAlgorithm,
    /// Hash value, as declared by the manifest
    pub value: String,
}

impl Hash {
    /// Create a new hash
    #[must_use]
    pub const fn new(algorithm: HashAlgorithm, value: String) -> Self {
        Self { algorithm, value }
    }
}

/// A resolved package in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Component type
    pub component_type: ComponentType,
    /// Package id as declared by the descriptor
    pub name: String,
    /// Package version as declared by the descriptor
    pub version: String,
    /// Package authors
    pub publisher: String,
    /// Copyright text
    pub copyright: Option<String>,
    /// Description (empty when the descriptor carries none)
    pub description: String,
    /// Integrity hashes, at most one per algorithm
    pub hashes: Vec<Hash>,
    /// Package URL, unset when it could not be constructed
    pub purl: Option<String>,
}

impl Component {
    /// Create a library component with the given name and version
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            component_type: ComponentType::Library,
            name: name.into(),
            version: version.into(),
            publisher: String::new(),
            copyright: None,
            description: String::new(),
            hashes: Vec::new(),
            purl: None,
        }
    }

    /// Add a hash, replacing any existing hash of the same algorithm
    pub fn add_hash(&mut self, hash: Hash) {
        self.hashes.retain(|h| h.algorithm != hash.algorithm);
        self.hashes.push(hash);
    }

    /// Identity of this component for deduplication
    #[must_use]
    pub fn key(&self) -> ComponentKey {
        ComponentKey {
            name: self.name.clone(),
            version: self.version.clone(),
            purl: self.purl.clone(),
        }
    }
}

/// Identity triple of a [`Component`].
///
/// Two components with equal keys are the same inventory entry, whatever
/// their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentKey {
    pub name: String,
    pub version: String,
    pub purl: Option<String>,
}

impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.purl {
            Some(purl) => write!(f, "{purl}"),
            None => write!(f, "{}@{}", self.name, self.version),
        }
    }
}
