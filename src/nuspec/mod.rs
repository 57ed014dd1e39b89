//! Nuspec package descriptor parsing.
//!
//! A descriptor is accepted when its root element is `package` bound to the
//! current nuspec namespace or to one of the legacy namespaces listed in a
//! [`NamespaceMap`]. Legacy namespaces are resolved to the current one first,
//! so every accepted descriptor is then read with the same structural types.
//!
//! ```
//! use nuget_bom::nuspec::{parse_descriptor, NamespaceMap};
//!
//! let xml = r#"<?xml version="1.0" encoding="utf-8"?>
//! <package xmlns="http://schemas.microsoft.com/packaging/2010/07/nuspec.xsd">
//!   <metadata>
//!     <id>Pkg</id>
//!     <version>1.2.3</version>
//!     <authors>A Co</authors>
//!   </metadata>
//! </package>"#;
//!
//! let metadata = parse_descriptor(xml, &NamespaceMap::default()).unwrap();
//! assert_eq!(metadata.id, "Pkg");
//! ```

mod namespace;

pub use namespace::{NamespaceMap, LEGACY_NUSPEC_NAMESPACES, NUSPEC_NAMESPACE};

use crate::error::MetadataParseError;
use crate::model::PackageMetadata;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use serde::Deserialize;

const ROOT_ELEMENT: &str = "package";

/// `<package>` root element
#[derive(Debug, Deserialize)]
struct NuspecPackage {
    metadata: NuspecMetadata,
}

/// `<metadata>` element; fields not listed here are ignored
#[derive(Debug, Deserialize)]
struct NuspecMetadata {
    id: String,
    version: String,
    authors: String,
    #[serde(default)]
    copyright: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Parse a nuspec document into package metadata.
pub fn parse_descriptor(
    xml: &str,
    namespaces: &NamespaceMap,
) -> Result<PackageMetadata, MetadataParseError> {
    let xml = xml.trim_start_matches('\u{feff}');

    let declared = root_namespace(xml)?;
    let resolved = namespaces
        .resolve(&declared)
        .ok_or_else(|| MetadataParseError::UnsupportedNamespace(declared.clone()))?;
    if resolved != declared {
        tracing::debug!("Reading legacy nuspec namespace {} as {}", declared, resolved);
    }

    let package: NuspecPackage =
        quick_xml::de::from_str(xml).map_err(|e| MetadataParseError::Xml(e.to_string()))?;

    Ok(package.metadata.into())
}

/// Namespace URI of the root element, which must be `package`.
fn root_namespace(xml: &str) -> Result<String, MetadataParseError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| MetadataParseError::Xml(e.to_string()))?;

        let start = match event {
            Event::Start(start) | Event::Empty(start) => start,
            Event::Eof => return Err(MetadataParseError::Empty),
            // Declaration, comments, processing instructions, doctype
            _ => continue,
        };

        let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        if local != ROOT_ELEMENT {
            return Err(MetadataParseError::UnexpectedRoot(local));
        }

        return match resolved {
            ResolveResult::Bound(ns) => Ok(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            ResolveResult::Unbound => Err(MetadataParseError::MissingNamespace),
            ResolveResult::Unknown(prefix) => Err(MetadataParseError::Xml(format!(
                "undeclared namespace prefix '{}'",
                String::from_utf8_lossy(&prefix)
            ))),
        };
    }
}

impl From<NuspecMetadata> for PackageMetadata {
    fn from(m: NuspecMetadata) -> Self {
        Self {
            id: m.id.trim().to_string(),
            version: m.version.trim().to_string(),
            authors: m.authors.trim().to_string(),
            copyright: non_empty(m.copyright),
            summary: non_empty(m.summary),
            description: non_empty(m.description),
            title: non_empty(m.title),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
