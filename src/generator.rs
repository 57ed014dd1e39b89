//! End-to-end inventory generation for one lock manifest.
//!
//! [`BomGenerator`] checks its input and output locations, resolves every
//! package through a [`MetadataSource`], renders the resulting set and writes
//! it into the output directory.

use crate::bom::{BomDocument, CycloneDxRenderer};
use crate::client::{MetadataSource, NugetClient};
use crate::config::{AppConfig, Validatable};
use crate::error::{NugetBomError, Result};
use crate::parser::{ManifestParser, ParseOutput};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of lock manifest read from the input file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    /// NuGet `project.assets.json`, format version 3
    #[default]
    #[value(name = "v3-assets", alias = "nuget3-assets")]
    V3AssetsJson,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V3AssetsJson => write!(f, "v3-assets"),
        }
    }
}

/// Result of a completed generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Rendered document
    pub document: BomDocument,
    /// Diagnostics and counters from resolution
    pub output: ParseOutput,
    /// Where the document was written, if it was
    pub written_to: Option<PathBuf>,
}

/// Inventory generator for one input manifest and output directory.
pub struct BomGenerator {
    source_type: SourceType,
    in_file: PathBuf,
    out_dir: PathBuf,
    config: AppConfig,
}

impl BomGenerator {
    pub fn new(in_file: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_type: SourceType::default(),
            in_file: in_file.into(),
            out_dir: out_dir.into(),
            config: AppConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Path the document is written to.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(self.config.output.resolved_file_name())
    }

    /// Check configuration, input file and output directory.
    pub fn validate(&self) -> Result<()> {
        let errors = self.config.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(NugetBomError::config(joined));
        }

        if !self.in_file.is_file() {
            return Err(NugetBomError::config(format!(
                "Input file does not exist: {}",
                self.in_file.display()
            )));
        }
        if !self.out_dir.is_dir() {
            return Err(NugetBomError::config(format!(
                "Output directory does not exist or is not a directory: {}",
                self.out_dir.display()
            )));
        }
        Ok(())
    }

    /// Resolve against nuget.org (or the configured mirror) and write the document.
    pub fn run(&self) -> Result<GenerationReport> {
        self.validate()?;
        let client = NugetClient::new(self.config.client_config())?;
        tracing::info!("Registry: {}", client.config().base_url);
        self.run_with(&client)
    }

    /// Resolve against `source` and write the document.
    pub fn run_with<S: MetadataSource>(&self, source: S) -> Result<GenerationReport> {
        let mut report = self.generate_with(source)?;
        let path = self.write(&report.document)?;
        report.written_to = Some(path);
        Ok(report)
    }

    /// Resolve against `source` and render without writing.
    pub fn generate_with<S: MetadataSource>(&self, source: S) -> Result<GenerationReport> {
        self.validate()?;
        tracing::info!(
            "Generating inventory from {} ({}) via {}",
            self.in_file.display(),
            self.source_type,
            source.name()
        );

        let parser = ManifestParser::with_options(source, self.config.resolution_options());
        let output = match self.source_type {
            SourceType::V3AssetsJson => parser.parse_file(&self.in_file)?,
        };

        let document = CycloneDxRenderer::new()
            .format(self.config.output.format)
            .pretty(self.config.output.pretty)
            .render(&output.components)?;

        Ok(GenerationReport {
            document,
            output,
            written_to: None,
        })
    }

    /// Write a rendered document to [`Self::output_path`].
    pub fn write(&self, document: &BomDocument) -> Result<PathBuf> {
        let path = self.output_path();
        write_document(&path, document)?;
        tracing::info!(
            "Wrote {} components to {}",
            document.component_count,
            path.display()
        );
        Ok(path)
    }
}

fn write_document(path: &Path, document: &BomDocument) -> Result<()> {
    std::fs::write(path, &document.content).map_err(|e| NugetBomError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::OutputFormat;
    use crate::client::FetchOutcome;
    use crate::error::ResolutionErrorKind;
    use crate::model::PackageMetadata;
    use tempfile::TempDir;

    struct OneNuspec;

    impl MetadataSource for OneNuspec {
        fn fetch(
            &self,
            id: &str,
            version: &str,
        ) -> std::result::Result<FetchOutcome, ResolutionErrorKind> {
            Ok(FetchOutcome::Resolved(PackageMetadata::new(id, version, "A Co")))
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    const MANIFEST: &str = r#"{
        "version": 3,
        "libraries": {
            "Pkg/1.2.3": { "type": "package", "path": "pkg/1.2.3", "sha512": "abc==" }
        }
    }"#;

    fn workspace() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("project.assets.json");
        std::fs::write(&input, MANIFEST).unwrap();
        (tmp, input)
    }

    #[test]
    fn test_run_writes_document() {
        let (tmp, input) = workspace();
        let generator = BomGenerator::new(&input, tmp.path());

        let report = generator.run_with(OneNuspec).unwrap();

        let written = report.written_to.unwrap();
        assert_eq!(written, tmp.path().join("bom.json"));
        let content = std::fs::read_to_string(written).unwrap();
        assert!(content.contains("pkg:nuget/pkg@1.2.3"));
        assert_eq!(report.document.component_count, 1);
    }

    #[test]
    fn test_missing_input_rejected() {
        let tmp = TempDir::new().unwrap();
        let generator = BomGenerator::new(tmp.path().join("missing.json"), tmp.path());
        let err = generator.generate_with(OneNuspec).unwrap_err();
        assert!(matches!(err, NugetBomError::Config(_)));
    }

    #[test]
    fn test_output_must_be_directory() {
        let (_tmp, input) = workspace();
        let generator = BomGenerator::new(&input, &input);
        let err = generator.generate_with(OneNuspec).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (tmp, input) = workspace();
        let generator = BomGenerator::new(&input, tmp.path())
            .with_config(AppConfig::builder().jobs(0).build());
        let err = generator.generate_with(OneNuspec).unwrap_err();
        assert!(err.to_string().contains("resolution.jobs"));
    }

    #[test]
    fn test_custom_file_name() {
        let (tmp, input) = workspace();
        let generator = BomGenerator::new(&input, tmp.path())
            .with_config(AppConfig::builder().file_name("inventory.json").build());
        assert_eq!(generator.output_path(), tmp.path().join("inventory.json"));
    }

    #[test]
    fn test_xml_format_writes_bom_xml() {
        let (tmp, input) = workspace();
        let generator = BomGenerator::new(&input, tmp.path())
            .with_config(AppConfig::builder().format(OutputFormat::Xml).build());

        let report = generator.run_with(OneNuspec).unwrap();

        let written = report.written_to.unwrap();
        assert_eq!(written, tmp.path().join("bom.xml"));
        let content = std::fs::read_to_string(written).unwrap();
        assert!(content.starts_with("<?xml"));
        assert!(content.contains("<purl>pkg:nuget/pkg@1.2.3</purl>"));
    }

    #[test]
    fn test_source_type_display() {
        assert_eq!(SourceType::V3AssetsJson.to_string(), "v3-assets");
    }
}
