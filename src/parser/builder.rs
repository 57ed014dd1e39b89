//! Mapping from package metadata and manifest fields to components.

use crate::model::{
    Component, ComponentType, Diagnostic, Hash, HashAlgorithm, LibraryRef, PackageMetadata,
};
use packageurl::PackageUrl;

/// Package URL type registered for NuGet.
pub const PURL_TYPE_NUGET: &str = "nuget";

/// Builds the canonical [`Component`] for one resolved library.
pub struct ComponentBuilder<'a> {
    metadata: &'a PackageMetadata,
    library: &'a LibraryRef,
}

impl<'a> ComponentBuilder<'a> {
    #[must_use]
    pub const fn new(metadata: &'a PackageMetadata, library: &'a LibraryRef) -> Self {
        Self { metadata, library }
    }

    /// Build the component.
    ///
    /// A package URL that cannot be constructed leaves `purl` unset and is
    /// reported as a [`Diagnostic`]; the component is returned either way.
    #[must_use]
    pub fn build(&self) -> (Component, Option<Diagnostic>) {
        let meta = self.metadata;

        let mut component = Component::new(meta.id.clone(), meta.version.clone());
        component.component_type = ComponentType::Library;
        component.publisher.clone_from(&meta.authors);
        component.copyright.clone_from(&meta.copyright);
        component.description = select_description(meta).to_string();

        if let Some(sha512) = &self.library.sha512 {
            component.add_hash(Hash::new(HashAlgorithm::Sha512, sha512.clone()));
        }

        let diagnostic = match package_url(&component.name, &component.version) {
            Ok(purl) => {
                component.purl = Some(purl);
                None
            }
            Err(reason) => {
                tracing::warn!(
                    "Could not build package URL for {}: {}",
                    self.library.coordinate,
                    reason
                );
                Some(Diagnostic::purl_construction(
                    self.library.coordinate.clone(),
                    reason,
                ))
            }
        };

        (component, diagnostic)
    }
}

/// First non-empty of summary, description and title.
#[must_use]
pub fn select_description(metadata: &PackageMetadata) -> &str {
    [&metadata.summary, &metadata.description, &metadata.title]
        .into_iter()
        .filter_map(|field| field.as_deref())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// `pkg:nuget/<name>@<version>`, without namespace, qualifiers or subpath.
pub fn package_url(name: &str, version: &str) -> Result<String, String> {
    if name.trim().is_empty() {
        return Err("empty package name".to_string());
    }
    if version.trim().is_empty() {
        return Err("empty package version".to_string());
    }

    let mut purl = PackageUrl::new(PURL_TYPE_NUGET, name).map_err(|e| e.to_string())?;
    purl.with_version(version);
    Ok(purl.to_string())
}
