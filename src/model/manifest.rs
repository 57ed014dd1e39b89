//! NuGet v3 `project.assets.json` lock manifest.
//!
//! Only the parts of the assets file the inventory needs are modelled: the
//! schema version and the `libraries` table. Everything else (`targets`,
//! `project`, `packageFolders`, ...) is ignored.

use crate::error::{ManifestErrorKind, NugetBomError, OptionContext, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

/// The only assets file schema version this crate understands.
pub const SUPPORTED_ASSETS_VERSION: u64 = 3;

/// Library `type` value of project-to-project references.
const PROJECT_LIBRARY_TYPE: &str = "project";

/// Root of the assets file.
#[derive(Debug, Clone, Deserialize)]
pub struct LockManifest {
    /// Assets file schema version
    #[serde(default)]
    pub version: Option<u64>,
    /// Library entries keyed by `"Id/Version"`, in document order
    #[serde(default)]
    pub libraries: Option<IndexMap<String, LibraryEntry>>,
}

/// One value of the `libraries` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryEntry {
    /// `"package"` or `"project"`
    #[serde(rename = "type", default)]
    pub library_type: Option<String>,
    /// `"<identifier>/<version>"`
    #[serde(default)]
    pub path: Option<String>,
    /// Base64 SHA-512 digest of the package archive
    #[serde(default)]
    pub sha512: Option<String>,
}

impl LibraryEntry {
    /// Whether this entry is a project reference rather than a registry package
    #[must_use]
    pub fn is_project(&self) -> bool {
        self.library_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(PROJECT_LIBRARY_TYPE))
    }
}

/// Identifier and version of a package
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageCoordinate {
    pub id: String,
    pub version: String,
}

impl PackageCoordinate {
    #[must_use]
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// A validated package entry, ready for resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRef {
    /// Key of the entry in the `libraries` table
    pub key: String,
    pub coordinate: PackageCoordinate,
    /// Integrity digest, if the manifest declares a non-empty one
    pub sha512: Option<String>,
}

/// Package entries extracted from a manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestEntries {
    /// Distinct package entries in document order
    pub packages: Vec<LibraryRef>,
    /// Project references that were left out
    pub skipped_projects: usize,
}

impl LockManifest {
    /// Decode an assets file.
    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        manifest.check_version()?;
        Ok(manifest)
    }

    /// Decode an assets file from a reader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let manifest: Self = serde_json::from_reader(reader)?;
        manifest.check_version()?;
        Ok(manifest)
    }

    fn check_version(&self) -> Result<()> {
        match self.version {
            Some(version) if version != SUPPORTED_ASSETS_VERSION => Err(NugetBomError::manifest(
                "assets file header",
                ManifestErrorKind::UnsupportedVersion { version },
            )),
            _ => Ok(()),
        }
    }

    /// Validate every package entry and return the distinct ones.
    ///
    /// Fails on the first malformed path. Project references are skipped
    /// before validation since their paths point at project files.
    pub fn package_entries(&self) -> Result<ManifestEntries> {
        let libraries = self
            .libraries
            .as_ref()
            .required("libraries", "assets file")?;

        let mut packages = Vec::with_capacity(libraries.len());
        let mut seen = IndexSet::with_capacity(libraries.len());
        let mut skipped_projects = 0;

        for (key, entry) in libraries {
            if entry.is_project() {
                tracing::debug!("Skipping project reference {}", key);
                skipped_projects += 1;
                continue;
            }

            let path = entry
                .path
                .as_deref()
                .ok_or_else(|| NugetBomError::malformed_path(key, "", "missing 'path' field"))?;
            let coordinate = split_library_path(path)
                .map_err(|reason| NugetBomError::malformed_path(key, path, reason))?;

            let sha512 = entry
                .sha512
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            // Entries that differ only by manifest key resolve to the same package
            if !seen.insert((coordinate.clone(), sha512.clone())) {
                continue;
            }

            packages.push(LibraryRef {
                key: key.clone(),
                coordinate,
                sha512,
            });
        }

        Ok(ManifestEntries {
            packages,
            skipped_projects,
        })
    }
}

/// Split `"<identifier>/<version>"` into a coordinate.
///
/// Exactly one `/` is allowed and both halves must be non-empty.
pub fn split_library_path(path: &str) -> std::result::Result<PackageCoordinate, &'static str> {
    let (id, version) = path.split_once('/').ok_or("missing '/' separator")?;
    if id.is_empty() {
        return Err("empty package identifier");
    }
    if version.is_empty() {
        return Err("empty package version");
    }
    if version.contains('/') {
        return Err("more than one '/' separator");
    }
    Ok(PackageCoordinate::new(id, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_library_path() {
        let coord = split_library_path("Newtonsoft.Json/13.0.1").unwrap();
        assert_eq!(coord.id, "Newtonsoft.Json");
        assert_eq!(coord.version, "13.0.1");
        assert_eq!(coord.to_string(), "Newtonsoft.Json@13.0.1");
    }

    #[test]
    fn test_split_library_path_rejects_malformed() {
        assert!(split_library_path("BadEntry").is_err());
        assert!(split_library_path("/1.0.0").is_err());
        assert!(split_library_path("Pkg/").is_err());
        assert!(split_library_path("Pkg/1.0/extra").is_err());
        assert!(split_library_path("").is_err());
    }

    #[test]
    fn test_package_entries_keeps_document_order() {
        let manifest = LockManifest::from_json(
            r#"{
                "version": 3,
                "libraries": {
                    "zeta/1.0.0": { "type": "package", "path": "zeta/1.0.0", "sha512": "zz==" },
                    "alpha/2.0.0": { "type": "package", "path": "alpha/2.0.0" }
                }
            }"#,
        )
        .unwrap();

        let entries = manifest.package_entries().unwrap();
        let ids: Vec<_> = entries
            .packages
            .iter()
            .map(|r| r.coordinate.id.as_str())
            .collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(entries.packages[0].sha512.as_deref(), Some("zz=="));
        assert_eq!(entries.packages[1].sha512, None);
    }

    #[test]
    fn test_package_entries_skips_projects() {
        let manifest = LockManifest::from_json(
            r#"{
                "libraries": {
                    "Core/1.0.0": { "type": "project", "path": "../Core/Core.csproj" },
                    "serilog/2.12.0": { "type": "package", "path": "serilog/2.12.0" }
                }
            }"#,
        )
        .unwrap();

        let entries = manifest.package_entries().unwrap();
        assert_eq!(entries.packages.len(), 1);
        assert_eq!(entries.skipped_projects, 1);
    }

    #[test]
    fn test_package_entries_dedups_same_coordinate() {
        let manifest = LockManifest::from_json(
            r#"{
                "libraries": {
                    "Pkg/1.0.0": { "path": "pkg/1.0.0", "sha512": "aa==" },
                    "pkg/1.0.0": { "path": "pkg/1.0.0", "sha512": "aa==" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.package_entries().unwrap().packages.len(), 1);
    }

    #[test]
    fn test_empty_sha512_is_absent() {
        let manifest = LockManifest::from_json(
            r#"{ "libraries": { "a/1.0": { "path": "a/1.0", "sha512": "  " } } }"#,
        )
        .unwrap();

        assert_eq!(manifest.package_entries().unwrap().packages[0].sha512, None);
    }

    #[test]
    fn test_missing_path_is_malformed() {
        let manifest =
            LockManifest::from_json(r#"{ "libraries": { "a/1.0": { "type": "package" } } }"#)
                .unwrap();

        let err = manifest.package_entries().unwrap_err();
        assert!(matches!(
            err,
            NugetBomError::Manifest {
                source: ManifestErrorKind::MalformedPath { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_missing_libraries_is_error() {
        let manifest = LockManifest::from_json(r#"{ "version": 3 }"#).unwrap();
        assert!(manifest.package_entries().is_err());
    }

    #[test]
    fn test_unsupported_version() {
        let err = LockManifest::from_json(r#"{ "version": 2, "libraries": {} }"#).unwrap_err();
        assert!(matches!(
            err,
            NugetBomError::Manifest {
                source: ManifestErrorKind::UnsupportedVersion { version: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(LockManifest::from_json("not json").is_err());
        assert!(LockManifest::from_json(r#"{ "libraries": [] }"#).is_err());
    }
}
