use crate::types::DictionaryKind;
use thiserror::Error;

/// A non-fatal problem found while building the document.
///
/// The affected field falls back to its documented default and the build
/// continues. Structural violations are [`crate::Ipc2581Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("invalid {expected} value {value:?} for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },

    #[error("missing attribute '{attribute}' on <{element}>, using default")]
    MissingAttribute { element: String, attribute: String },

    #[error("missing <{element}> in <{parent}>")]
    MissingElement {
        parent: String,
        element: &'static str,
    },

    #[error("duplicate id '{id}' in {dictionary} dictionary, later entry replaces earlier")]
    DuplicateId { dictionary: DictionaryKind, id: String },

    #[error("layer '{layer}' has no stackup record, thickness defaults to zero")]
    MissingStackup { layer: String },

    #[error("skipping {geometry} set for net '{net}' on layer '{layer}'")]
    UnmodeledSet {
        layer: String,
        net: String,
        geometry: String,
    },

    #[error("<{element}> appears before PolyBegin in <{parent}>, treating it as the start point")]
    UnexpectedPolyStep { parent: String, element: String },
}

/// Collected diagnostics, in the order they were reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it through the `log` facade
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
