//! CycloneDX 1.5 XML encoding.
//!
//! Child elements follow the order of the `component` sequence in the
//! CycloneDX XML schema.

use super::{CdxTool, CYCLONEDX_XML_NAMESPACE};
use crate::error::{NugetBomError, Result};
use crate::model::Component;
use serde::Serialize;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Serialize)]
#[serde(rename = "bom")]
struct XmlBom<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@version")]
    version: u32,
    metadata: XmlMetadata<'a>,
    components: XmlComponents<'a>,
}

#[derive(Serialize)]
struct XmlMetadata<'a> {
    timestamp: &'a str,
    tools: XmlTools,
}

#[derive(Serialize)]
struct XmlTools {
    tool: Vec<CdxTool>,
}

#[derive(Serialize)]
struct XmlComponents<'a> {
    component: Vec<XmlComponent<'a>>,
}

#[derive(Serialize)]
struct XmlComponent<'a> {
    #[serde(rename = "@type")]
    component_type: String,
    #[serde(skip_serializing_if = "str::is_empty")]
    publisher: &'a str,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<XmlHashes<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copyright: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<&'a str>,
}

#[derive(Serialize)]
struct XmlHashes<'a> {
    hash: Vec<XmlHash<'a>>,
}

#[derive(Serialize)]
struct XmlHash<'a> {
    #[serde(rename = "@alg")]
    alg: String,
    #[serde(rename = "$text")]
    content: &'a str,
}

impl<'a> From<&'a Component> for XmlComponent<'a> {
    fn from(c: &'a Component) -> Self {
        let hashes = (!c.hashes.is_empty()).then(|| XmlHashes {
            hash: c
                .hashes
                .iter()
                .map(|h| XmlHash {
                    alg: h.algorithm.to_string(),
                    content: &h.value,
                })
                .collect(),
        });

        Self {
            component_type: c.component_type.to_string(),
            publisher: &c.publisher,
            name: &c.name,
            version: &c.version,
            description: &c.description,
            hashes,
            copyright: c.copyright.as_deref(),
            purl: c.purl.as_deref(),
        }
    }
}

/// Encode sorted components as a CycloneDX XML document.
pub(super) fn render(timestamp: &str, components: &[&Component], pretty: bool) -> Result<String> {
    let bom = XmlBom {
        xmlns: CYCLONEDX_XML_NAMESPACE,
        version: 1,
        metadata: XmlMetadata {
            timestamp,
            tools: XmlTools {
                tool: vec![CdxTool::current()],
            },
        },
        components: XmlComponents {
            component: components.iter().copied().map(XmlComponent::from).collect(),
        },
    };

    let mut content = String::from(XML_DECLARATION);
    let mut serializer = quick_xml::se::Serializer::new(&mut content);
    if pretty {
        serializer.indent(' ', 2);
    }
    bom.serialize(serializer)
        .map_err(|e| NugetBomError::Render(format!("CycloneDX XML serialization failed: {e}")))?;

    Ok(content)
}
