//! CycloneDX rendering of a resolved inventory.
//!
//! [`CycloneDxRenderer`] accepts a finished [`ComponentSet`] and returns a
//! [`BomDocument`] holding CycloneDX 1.5 JSON or XML. Components are emitted
//! sorted by name and version so that equal sets render identically.

mod xml;

use crate::error::{NugetBomError, Result};
use crate::model::{Component, ComponentSet};
use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// CycloneDX specification version emitted
pub const CYCLONEDX_SPEC_VERSION: &str = "1.5";

/// CycloneDX XML namespace for [`CYCLONEDX_SPEC_VERSION`]
pub const CYCLONEDX_XML_NAMESPACE: &str = "http://cyclonedx.org/schema/bom/1.5";

/// Document encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
}

impl OutputFormat {
    /// File name used when none is configured
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "bom.json",
            Self::Xml => "bom.xml",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

/// A rendered inventory document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomDocument {
    /// Serialized document
    pub content: String,
    /// Number of components in the document
    pub component_count: usize,
}

/// CycloneDX 1.5 renderer
#[derive(Debug, Clone)]
pub struct CycloneDxRenderer {
    format: OutputFormat,
    pretty: bool,
    timestamp: Option<String>,
}

impl CycloneDxRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            timestamp: None,
        }
    }

    /// Set the document encoding
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Use a fixed `metadata.timestamp` instead of the current time
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Render the component set.
    pub fn render(&self, components: &ComponentSet) -> Result<BomDocument> {
        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        let sorted = components.sorted();

        let content = match self.format {
            OutputFormat::Json => self.render_json(timestamp, &sorted)?,
            OutputFormat::Xml => xml::render(&timestamp, &sorted, self.pretty)?,
        };

        Ok(BomDocument {
            content,
            component_count: sorted.len(),
        })
    }

    fn render_json(&self, timestamp: String, components: &[&Component]) -> Result<String> {
        let bom = CdxBom {
            bom_format: "CycloneDX",
            spec_version: CYCLONEDX_SPEC_VERSION,
            version: 1,
            metadata: CdxMetadata {
                timestamp,
                tools: vec![CdxTool::current()],
            },
            components: components.iter().copied().map(CdxComponent::from).collect(),
        };

        if self.pretty {
            serde_json::to_string_pretty(&bom)
        } else {
            serde_json::to_string(&bom)
        }
        .map_err(|e| NugetBomError::Render(format!("CycloneDX JSON serialization failed: {e}")))
    }
}

impl Default for CycloneDxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CdxBom<'a> {
    bom_format: &'static str,
    spec_version: &'static str,
    version: u32,
    metadata: CdxMetadata,
    components: Vec<CdxComponent<'a>>,
}

#[derive(Serialize)]
struct CdxMetadata {
    timestamp: String,
    tools: Vec<CdxTool>,
}

#[derive(Serialize)]
struct CdxTool {
    name: &'static str,
    version: &'static str,
}

impl CdxTool {
    const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Serialize)]
struct CdxComponent<'a> {
    #[serde(rename = "type")]
    component_type: String,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    publisher: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hashes: Vec<CdxHash<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<&'a str>,
}

#[derive(Serialize)]
struct CdxHash<'a> {
    alg: String,
    content: &'a str,
}

impl<'a> From<&'a Component> for CdxComponent<'a> {
    fn from(c: &'a Component) -> Self {
        Self {
            component_type: c.component_type.to_string(),
            name: &c.name,
            version: &c.version,
            publisher: &c.publisher,
            copyright: c.copyright.as_deref(),
            description: &c.description,
            hashes: c
                .hashes
                .iter()
                .map(|h| CdxHash {
                    alg: h.algorithm.to_string(),
                    content: &h.value,
                })
                .collect(),
            purl: c.purl.as_deref(),
        }
    }
}
