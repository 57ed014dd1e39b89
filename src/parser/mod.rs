//! Lock manifest parsing and component resolution.
//!
//! [`ManifestParser`] turns a `project.assets.json` into a [`ComponentSet`]:
//!
//! 1. decode the manifest and validate every package path (any malformed
//!    entry fails the run before the first network call);
//! 2. resolve each distinct entry through a [`MetadataSource`];
//! 3. build a component per entry and insert it into the set.
//!
//! Resolution is all-or-nothing. Any package that is not found, fails to
//! download or has a malformed descriptor aborts the parse with an error
//! naming its `id@version`; no partial inventory is returned.
//!
//! ```no_run
//! use nuget_bom::client::{NugetClient, NugetClientConfig};
//! use nuget_bom::parser::ManifestParser;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NugetClient::new(NugetClientConfig::default())?;
//!     let output = ManifestParser::new(client).parse_file(Path::new("obj/project.assets.json"))?;
//!
//!     for component in output.components.iter() {
//!         println!("{} {}", component.name, component.version);
//!     }
//!     Ok(())
//! }
//! ```

mod builder;

pub use builder::{package_url, select_description, ComponentBuilder, PURL_TYPE_NUGET};

use crate::client::{FetchOutcome, MetadataSource};
use crate::error::{ErrorContext, NugetBomError, ResolutionErrorKind, Result};
use crate::model::{Component, ComponentSet, Diagnostic, LibraryRef, LockManifest, PackageMetadata};
use rayon::prelude::*;
use std::path::Path;

/// Upper bound for the resolution worker pool.
pub const MAX_JOBS: usize = 64;

/// How package entries are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Number of entries resolved concurrently; 1 means strictly sequential
    pub jobs: usize,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Resolved, deduplicated components
    pub components: ComponentSet,
    /// Non-fatal problems, one per affected component
    pub diagnostics: Vec<Diagnostic>,
    /// Project references left out of the inventory
    pub skipped_projects: usize,
}

/// Parser for NuGet v3 assets files.
pub struct ManifestParser<S> {
    source: S,
    options: ResolutionOptions,
}

impl<S: MetadataSource> ManifestParser<S> {
    /// Create a sequential parser resolving through `source`
    pub fn new(source: S) -> Self {
        Self::with_options(source, ResolutionOptions::default())
    }

    /// Create a parser with explicit resolution options
    pub fn with_options(source: S, options: ResolutionOptions) -> Self {
        Self { source, options }
    }

    #[must_use]
    pub const fn options(&self) -> ResolutionOptions {
        self.options
    }

    /// Parse an assets file on disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutput> {
        tracing::info!("Parsing lock manifest: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| NugetBomError::io(path, e))?;
        self.parse_str(&content)
            .with_context(|| format!("in {}", path.display()))
    }

    /// Parse an assets file from a reader.
    pub fn parse_reader<R: std::io::Read>(&self, reader: R) -> Result<ParseOutput> {
        self.parse_manifest(&LockManifest::from_reader(reader)?)
    }

    /// Parse assets file content.
    pub fn parse_str(&self, content: &str) -> Result<ParseOutput> {
        self.parse_manifest(&LockManifest::from_json(content)?)
    }

    /// Resolve every package entry of a decoded manifest.
    pub fn parse_manifest(&self, manifest: &LockManifest) -> Result<ParseOutput> {
        let entries = manifest.package_entries()?;
        tracing::info!(
            "Resolving {} packages via {} ({} skipped project references)",
            entries.packages.len(),
            self.source.name(),
            entries.skipped_projects
        );

        let built = self.resolve_all(&entries.packages)?;

        let mut output = ParseOutput {
            skipped_projects: entries.skipped_projects,
            ..ParseOutput::default()
        };
        for (component, diagnostic) in built {
            output.components.insert(component);
            output.diagnostics.extend(diagnostic);
        }

        tracing::info!(
            "Resolved {} components ({} duplicates collapsed)",
            output.components.len(),
            output.components.duplicate_count()
        );
        if !output.diagnostics.is_empty() {
            tracing::warn!(
                "{} components have no package URL",
                output.diagnostics.len()
            );
        }

        Ok(output)
    }

    /// Resolve and build every entry, in manifest order.
    ///
    /// Collection short-circuits on the first error, both sequentially and
    /// on the worker pool.
    fn resolve_all(&self, packages: &[LibraryRef]) -> Result<Vec<(Component, Option<Diagnostic>)>> {
        let jobs = self.options.jobs.clamp(1, MAX_JOBS);
        if jobs == 1 || packages.len() <= 1 {
            return packages.iter().map(|library| self.resolve(library)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .thread_name(|i| format!("nuget-resolve-{i}"))
            .build()
            .map_err(|e| NugetBomError::config(format!("Failed to start resolver pool: {e}")))?;

        pool.install(|| {
            packages
                .par_iter()
                .map(|library| self.resolve(library))
                .collect()
        })
    }

    fn resolve(&self, library: &LibraryRef) -> Result<(Component, Option<Diagnostic>)> {
        let metadata = self.fetch_metadata(library)?;
        Ok(ComponentBuilder::new(&metadata, library).build())
    }

    fn fetch_metadata(&self, library: &LibraryRef) -> Result<PackageMetadata> {
        let coordinate = &library.coordinate;
        tracing::debug!("Resolving {}", coordinate);

        match self.source.fetch(&coordinate.id, &coordinate.version) {
            Ok(FetchOutcome::Resolved(metadata)) => Ok(metadata),
            Ok(FetchOutcome::NotFound { status }) => Err(NugetBomError::resolution(
                coordinate,
                ResolutionErrorKind::NotFound { status },
            )),
            Err(kind) => Err(NugetBomError::resolution(coordinate, kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ManifestErrorKind, MetadataParseError};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source keyed by lowercase `id/version`.
    #[derive(Default)]
    struct StubSource {
        packages: HashMap<String, PackageMetadata>,
        broken: Vec<String>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn with(mut self, meta: PackageMetadata) -> Self {
            let key = format!("{}/{}", meta.id.to_lowercase(), meta.version.to_lowercase());
            self.packages.insert(key, meta);
            self
        }

        fn broken(mut self, key: &str) -> Self {
            self.broken.push(key.to_string());
            self
        }
    }

    impl MetadataSource for StubSource {
        fn fetch(
            &self,
            id: &str,
            version: &str,
        ) -> std::result::Result<FetchOutcome, ResolutionErrorKind> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let key = format!("{}/{}", id.to_lowercase(), version.to_lowercase());
            if self.broken.contains(&key) {
                return Err(MetadataParseError::Empty.into());
            }
            Ok(self
                .packages
                .get(&key)
                .cloned()
                .map_or(FetchOutcome::NotFound { status: 404 }, FetchOutcome::Resolved))
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn manifest(paths: &[&str]) -> String {
        let libraries: Vec<String> = paths
            .iter()
            .map(|p| format!(r#""{p}": {{ "type": "package", "path": "{p}" }}"#))
            .collect();
        format!(r#"{{ "version": 3, "libraries": {{ {} }} }}"#, libraries.join(", "))
    }

    #[test]
    fn test_parse_single_entry() {
        let source = StubSource::default().with(PackageMetadata::new("Pkg", "1.2.3", "A Co"));
        let output = ManifestParser::new(source)
            .parse_str(&manifest(&["pkg/1.2.3"]))
            .unwrap();

        assert_eq!(output.components.len(), 1);
        assert!(output.diagnostics.is_empty());
        let comp = output.components.iter().next().unwrap();
        assert_eq!(comp.name, "Pkg");
        assert_eq!(comp.publisher, "A Co");
    }

    #[test]
    fn test_empty_libraries_yields_empty_set() {
        let source = StubSource::default();
        let output = ManifestParser::new(&source).parse_str(&manifest(&[])).unwrap();

        assert!(output.components.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_not_found_names_coordinate() {
        let source = StubSource::default();
        let err = ManifestParser::new(source)
            .parse_str(&manifest(&["Foo/9.9.9"]))
            .unwrap_err();

        assert_eq!(err.failing_coordinate().as_deref(), Some("Foo@9.9.9"));
        assert!(matches!(
            err,
            NugetBomError::Resolution {
                source: ResolutionErrorKind::NotFound { status: 404 },
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_entry_fails_before_any_fetch() {
        let source = StubSource::default().with(PackageMetadata::new("Pkg", "1.2.3", "A Co"));
        let err = ManifestParser::new(&source)
            .parse_str(&manifest(&["pkg/1.2.3", "BadEntry"]))
            .unwrap_err();

        assert!(matches!(
            err,
            NugetBomError::Manifest {
                source: ManifestErrorKind::MalformedPath { .. },
                ..
            }
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_failure_aborts_run() {
        let source = StubSource::default()
            .with(PackageMetadata::new("Good", "1.0.0", "A"))
            .broken("bad/1.0.0");
        let err = ManifestParser::new(source)
            .parse_str(&manifest(&["good/1.0.0", "bad/1.0.0"]))
            .unwrap_err();

        assert_eq!(err.failing_coordinate().as_deref(), Some("bad@1.0.0"));
    }

    #[test]
    fn test_sequential_stops_at_first_failure() {
        let source = StubSource::default().with(PackageMetadata::new("Late", "1.0.0", "A"));
        let result = ManifestParser::new(&source).parse_str(&manifest(&["missing/1.0.0", "late/1.0.0"]));

        assert!(result.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = (0..20).fold(StubSource::default(), |s, i| {
            s.with(PackageMetadata::new(format!("Pkg{i}"), "1.0.0", "A"))
        });
        let paths: Vec<String> = (0..20).map(|i| format!("pkg{i}/1.0.0")).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let content = manifest(&refs);

        let sequential = ManifestParser::new(&source).parse_str(&content).unwrap();
        let parallel = ManifestParser::with_options(&source, ResolutionOptions { jobs: 4 })
            .parse_str(&content)
            .unwrap();

        assert_eq!(sequential.components, parallel.components);
        let order: Vec<_> = parallel.components.iter().map(|c| c.name.clone()).collect();
        let expected: Vec<_> = (0..20).map(|i| format!("Pkg{i}")).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_parallel_failure_is_fatal() {
        let source = (0..10).fold(StubSource::default(), |s, i| {
            s.with(PackageMetadata::new(format!("Pkg{i}"), "1.0.0", "A"))
        });
        let mut paths: Vec<String> = (0..10).map(|i| format!("pkg{i}/1.0.0")).collect();
        paths.push("absent/2.0.0".to_string());
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();

        let err = ManifestParser::with_options(&source, ResolutionOptions { jobs: 4 })
            .parse_str(&manifest(&refs))
            .unwrap_err();

        assert_eq!(err.failing_coordinate().as_deref(), Some("absent@2.0.0"));
    }

    #[test]
    fn test_duplicate_identities_collapse() {
        // Two manifest entries whose descriptors report the same id and version
        let source = StubSource::default()
            .with(PackageMetadata::new("Pkg", "1.0.0", "A"))
            .with(PackageMetadata::new("Pkg", "1.0.0", "A"));
        let json = r#"{ "libraries": {
            "Pkg/1.0.0": { "path": "pkg/1.0.0", "sha512": "aa==" },
            "pkg/1.0.0": { "path": "pkg/1.0.0", "sha512": "bb==" }
        } }"#;

        let output = ManifestParser::new(source).parse_str(json).unwrap();

        assert_eq!(output.components.len(), 1);
        assert_eq!(output.components.duplicate_count(), 1);
        let kept = output.components.iter().next().unwrap();
        assert_eq!(kept.hashes[0].value, "aa==");
    }

    #[test]
    fn test_parse_reader() {
        let source = StubSource::default().with(PackageMetadata::new("Pkg", "1.2.3", "A Co"));
        let content = manifest(&["pkg/1.2.3"]);
        let output = ManifestParser::new(source)
            .parse_reader(content.as_bytes())
            .unwrap();
        assert_eq!(output.components.len(), 1);
    }

    #[test]
    fn test_parse_file_missing_is_io_error() {
        let err = ManifestParser::new(StubSource::default())
            .parse_file(Path::new("/definitely/not/here/project.assets.json"))
            .unwrap_err();
        assert!(matches!(err, NugetBomError::Io { .. }));
    }
}
