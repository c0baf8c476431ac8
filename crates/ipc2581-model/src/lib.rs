//! Typed document model for IPC-2581 assembly data.
//!
//! [`Document`] is built once from a parsed element tree and is read-only
//! afterwards. Dictionary references stay as raw ids and are resolved on
//! demand through [`Dictionaries`].

pub mod attr;
mod checksum;
pub mod diagnostics;
pub mod options;
mod parse;
pub mod tree;
pub mod types;
pub mod units;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use options::{DuplicateIdPolicy, ParseOptions};
pub use tree::IPC2581_NAMESPACE;
pub use types::*;

use checksum::{split_trailer, validate_checksum};
use indexmap::IndexMap;
use parse::Parser;
use std::path::Path;
use thiserror::Error;
use tree::Element;

#[derive(Debug, Error)]
pub enum Ipc2581Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid checksum: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Expected <{expected}>, found <{actual}>")]
    TagMismatch {
        expected: &'static str,
        actual: String,
    },

    #[error("Unknown geometry type <{0}>")]
    UnknownShape(String),

    #[error("Layer '{0}' is referenced but has no Layer record")]
    MissingLayerRecord(String),

    #[error("Duplicate id '{id}' in {dictionary} dictionary")]
    DuplicateId {
        dictionary: DictionaryKind,
        id: String,
    },

    #[error("Invalid IPC-2581 structure: {0}")]
    InvalidStructure(String),
}

pub type Result<T> = std::result::Result<T, Ipc2581Error>;

/// Main IPC-2581 document structure
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) revision: Option<String>,
    pub(crate) function_mode: Option<String>,
    pub(crate) step_ref: Option<String>,
    pub(crate) bom_ref: Option<String>,
    pub(crate) layer_refs: Vec<String>,
    pub(crate) dictionaries: Dictionaries,
    pub(crate) logistic_header: Option<LogisticHeader>,
    pub(crate) bom: Option<Bom>,
    pub(crate) layers: IndexMap<String, Layer>,
    pub(crate) packages: IndexMap<String, Package>,
    pub(crate) profile: Option<GeometryPrimitive>,
    pub(crate) datum: Point,
    pub(crate) units: Option<Units>,
    pub(crate) diagnostics: Diagnostics,
}

impl Document {
    /// Build the model from an already-parsed tree
    pub fn from_tree(doc: &roxmltree::Document<'_>, options: &ParseOptions) -> Result<Self> {
        let root = Element::root(doc, &options.namespace);
        Parser::new(options).parse_document(root)
    }

    /// Parse IPC-2581 from XML string with default options
    pub fn parse(xml: &str) -> Result<Self> {
        Self::parse_with(xml, &ParseOptions::default())
    }

    /// Parse with explicit options. Any trailing checksum is split off
    /// before the markup is parsed, and verified only when
    /// `verify_checksum` is set.
    pub fn parse_with(xml: &str, options: &ParseOptions) -> Result<Self> {
        let (markup, trailer) = split_trailer(xml);
        let doc = roxmltree::Document::parse(markup)?;
        if let Some(trailer) = trailer {
            if options.verify_checksum {
                validate_checksum(markup, doc.root_element().range(), trailer)?;
            } else {
                log::debug!("checksum verification disabled, trailer ignored");
            }
        }
        Self::from_tree(&doc, options)
    }

    /// Parse IPC-2581 from file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }

    /// Get the revision string (e.g., "C")
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    pub fn function_mode(&self) -> Option<&str> {
        self.function_mode.as_deref()
    }

    pub fn step_ref(&self) -> Option<&str> {
        self.step_ref.as_deref()
    }

    pub fn bom_ref(&self) -> Option<&str> {
        self.bom_ref.as_deref()
    }

    /// Layer names in `Content/LayerRef` order
    pub fn layer_refs(&self) -> &[String] {
        &self.layer_refs
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    pub fn logistic_header(&self) -> Option<&LogisticHeader> {
        self.logistic_header.as_ref()
    }

    pub fn bom(&self) -> Option<&Bom> {
        self.bom.as_ref()
    }

    /// Layers in declaration order
    pub fn layers(&self) -> &IndexMap<String, Layer> {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn packages(&self) -> &IndexMap<String, Package> {
        &self.packages
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Board outline from `Step/Profile`
    pub fn profile(&self) -> Option<&GeometryPrimitive> {
        self.profile.as_ref()
    }

    pub fn datum(&self) -> Point {
        self.datum
    }

    /// CAD units from `Ecad/CadHeader`
    pub fn units(&self) -> Option<Units> {
        self.units
    }

    /// Non-fatal problems found while building
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Distinct net names on a layer, `None` if the layer is unknown
    pub fn net_names(&self, layer: &str) -> Option<Vec<&str>> {
        self.layer(layer).map(Layer::net_names)
    }

    /// Convert a value in CAD units to millimeters. Without declared units the
    /// value is returned unchanged.
    pub fn to_mm(&self, value: f64) -> f64 {
        match self.units {
            Some(declared) => units::to_mm(value, declared),
            None => value,
        }
    }

    /// Layers in declared order with their height above the board bottom.
    ///
    /// Each layer's `z` is the summed thickness of the layers declared after
    /// it, so the last layer sits at zero.
    pub fn layer_stack(&self) -> Vec<StackPosition<'_>> {
        let total: f64 = self.layers.values().map(|l| l.thickness).sum();
        let mut consumed = 0.0;
        self.layers
            .values()
            .map(|layer| {
                consumed += layer.thickness;
                StackPosition {
                    name: &layer.name,
                    function: layer.function,
                    side: layer.side,
                    polarity: layer.polarity,
                    thickness: layer.thickness,
                    sequence: layer.sequence,
                    z: units::round6(total - consumed),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn document_is_send_and_sync() {
        assert_send_sync::<Document>();
    }

    #[test]
    fn parse_minimal_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<IPC-2581 revision="C" xmlns="http://webstds.ipc.org/2581">
  <Content roleRef="Owner">
    <FunctionMode mode="ASSEMBLY"/>
    <DictionaryColor/>
    <DictionaryLineDesc units="MILLIMETER"/>
    <DictionaryFillDesc units="MILLIMETER"/>
    <DictionaryStandard units="MILLIMETER"/>
    <DictionaryUser units="MILLIMETER"/>
  </Content>
</IPC-2581>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.revision(), Some("C"));
        assert_eq!(doc.function_mode(), Some("ASSEMBLY"));
        assert!(doc.layers().is_empty());
        assert_eq!(doc.datum(), Point::ORIGIN);
        assert_eq!(
            doc.dictionaries().units(DictionaryKind::Standard),
            Some(Units::Millimeter)
        );
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn foreign_root_namespace_is_rejected() {
        let xml = r#"<IPC-2581 xmlns="urn:not-ipc"><Content/></IPC-2581>"#;
        let err = Document::parse(xml).unwrap_err();
        assert!(matches!(
            err,
            Ipc2581Error::TagMismatch {
                expected: "IPC-2581",
                ..
            }
        ));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let options = ParseOptions::default().with_checksum_verification(false);
        let err = Document::parse_with("<IPC-2581><Content>", &options).unwrap_err();
        assert!(matches!(err, Ipc2581Error::XmlParse(_)));
    }
}
