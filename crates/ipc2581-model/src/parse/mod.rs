//! Builds a [`Document`] from an element tree, one phase at a time.

mod bom;
mod dictionary;
mod layer;
mod metadata;
mod package;
mod primitives;
mod values;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::options::ParseOptions;
use crate::tree::Element;
use crate::types::*;
use crate::{Document, Ipc2581Error, Result};
use indexmap::IndexMap;

/// Parser context: options plus the diagnostics collected so far
pub(crate) struct Parser<'o> {
    options: &'o ParseOptions,
    diagnostics: Diagnostics,
}

impl<'o> Parser<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Phases run in a fixed order: dictionaries, logistic header, BOM,
    /// layers, profile and datum, packages. Everything after the
    /// dictionaries only stores ids into them.
    pub fn parse_document(mut self, root: Element<'_, '_>) -> Result<Document> {
        self.expect_tag(root, "IPC-2581")?;
        let revision = root.attr("revision").map(str::to_string);

        let content = root.child("Content").ok_or_else(|| {
            Ipc2581Error::InvalidStructure("IPC-2581 document has no Content".to_string())
        })?;

        let function_mode = content
            .child("FunctionMode")
            .and_then(|fm| fm.attr("mode"))
            .map(str::to_string);
        let step_ref = content
            .child("StepRef")
            .and_then(|r| r.attr("name"))
            .map(str::to_string);
        let bom_ref = content
            .child("BomRef")
            .and_then(|r| r.attr("name"))
            .map(str::to_string);
        let layer_refs: Vec<String> = content
            .children_named("LayerRef")
            .filter_map(|r| {
                let name = r.attr("name");
                if name.is_none() {
                    self.missing_attribute(r, "name");
                }
                name.map(str::to_string)
            })
            .collect();

        let dictionaries = self.parse_dictionaries(content)?;

        let logistic_header = root
            .child("LogisticHeader")
            .map(|lh| self.parse_logistic_header(lh));

        let bom = select_named(root, "Bom", bom_ref.as_deref()).map(|b| self.parse_bom(b));

        let ecad = root.child("Ecad");
        let units = ecad
            .and_then(|e| e.child("CadHeader"))
            .and_then(|h| self.enumerated(h, "units", "units"));
        let cad_data = ecad.and_then(|e| e.child("CadData"));
        let step = cad_data
            .and_then(|cd| select_named(cd, "Step", step_ref.as_deref()));
        if step.is_none() {
            log::debug!("document has no Step, layers carry declarations only");
        }

        let mut layers = IndexMap::new();
        for name in &layer_refs {
            let layer = self.parse_layer(cad_data, step, name)?;
            if layers.insert(name.clone(), layer).is_some() {
                log::debug!("layer '{}' referenced more than once", name);
            }
        }

        let profile = step
            .and_then(|s| s.child("Profile"))
            .map(|p| GeometryPrimitive::Contour(self.contour_body(p)));
        let datum = step
            .and_then(|s| s.child("Datum"))
            .map(|d| self.point(d, "x", "y"))
            .unwrap_or(Point::ORIGIN);

        let mut packages = IndexMap::new();
        if let Some(step) = step {
            for el in step.children_named("Package") {
                let package = self.parse_package(el)?;
                packages.insert(package.name.clone(), package);
            }
        }

        Ok(Document {
            revision,
            function_mode,
            step_ref,
            bom_ref,
            layer_refs,
            dictionaries,
            logistic_header,
            bom,
            layers,
            packages,
            profile,
            datum,
            units,
            diagnostics: self.diagnostics,
        })
    }

    /// Fails unless `el` is `expected` in the configured namespace
    pub(crate) fn expect_tag(&self, el: Element<'_, '_>, expected: &'static str) -> Result<()> {
        if el.is(expected) {
            Ok(())
        } else {
            Err(Ipc2581Error::TagMismatch {
                expected,
                actual: el.display_tag(),
            })
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }
}

/// The `tag` child whose `name` matches `wanted`, otherwise the first one
fn select_named<'a, 'input>(
    parent: Element<'a, 'input>,
    tag: &str,
    wanted: Option<&str>,
) -> Option<Element<'a, 'input>> {
    wanted
        .and_then(|w| parent.children_named(tag).find(|c| c.attr("name") == Some(w)))
        .or_else(|| parent.child(tag))
}
