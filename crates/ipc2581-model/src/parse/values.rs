//! Attribute and small-element readers shared by every phase.

use super::Parser;
use crate::attr;
use crate::diagnostics::Diagnostic;
use crate::tree::Element;
use crate::types::Point;
use std::collections::HashMap;
use std::str::FromStr;

impl Parser<'_> {
    pub(super) fn float(&mut self, el: Element<'_, '_>, name: &str) -> Option<f64> {
        attr::float(&el, name, &mut self.diagnostics)
    }

    pub(super) fn boolean(&mut self, el: Element<'_, '_>, name: &str) -> Option<bool> {
        attr::boolean(&el, name, &mut self.diagnostics)
    }

    pub(super) fn enumerated<T: FromStr>(
        &mut self,
        el: Element<'_, '_>,
        name: &str,
        expected: &'static str,
    ) -> Option<T> {
        attr::enumerated(&el, name, expected, &mut self.diagnostics)
    }

    /// Float the format treats as required: missing is reported and read as 0
    pub(super) fn float_or_zero(&mut self, el: Element<'_, '_>, name: &str) -> f64 {
        if !el.has_attr(name) {
            self.missing_attribute(el, name);
            return 0.0;
        }
        self.float(el, name).unwrap_or(0.0)
    }

    /// String attribute the format treats as required
    pub(super) fn text_or_empty(&mut self, el: Element<'_, '_>, name: &str) -> String {
        match el.attr(name) {
            Some(value) => value.to_string(),
            None => {
                self.missing_attribute(el, name);
                String::new()
            }
        }
    }

    pub(super) fn text(&self, el: Element<'_, '_>, name: &str) -> Option<String> {
        el.attr(name).map(str::to_string)
    }

    pub(super) fn point(&mut self, el: Element<'_, '_>, x: &str, y: &str) -> Point {
        Point::new(self.float_or_zero(el, x), self.float_or_zero(el, y))
    }

    /// `Location` child of `el`, the origin when there is none
    pub(super) fn location(&mut self, el: Element<'_, '_>) -> Point {
        match el.child("Location") {
            Some(loc) => self.point(loc, "x", "y"),
            None => Point::ORIGIN,
        }
    }

    /// `id` of the first `tag` child, e.g. `FillDescRef/@id`
    pub(super) fn child_ref(&mut self, el: Element<'_, '_>, tag: &str) -> Option<String> {
        let child = el.child(tag)?;
        let id = child.attr("id");
        if id.is_none() {
            self.missing_attribute(child, "id");
        }
        id.map(str::to_string)
    }

    /// `NonstandardAttribute` children as a name to value map
    pub(super) fn nonstandard_attributes(&mut self, el: Element<'_, '_>) -> HashMap<String, String> {
        let mut attrs = HashMap::new();
        for na in el.children_named("NonstandardAttribute") {
            let Some(name) = na.attr("name") else {
                self.missing_attribute(na, "name");
                continue;
            };
            attrs.insert(name.to_string(), na.attr("value").unwrap_or_default().to_string());
        }
        attrs
    }

    pub(super) fn missing_attribute(&mut self, el: Element<'_, '_>, name: &str) {
        self.report(Diagnostic::MissingAttribute {
            element: el.display_tag(),
            attribute: name.to_string(),
        });
    }

    pub(super) fn missing_element(&mut self, parent: Element<'_, '_>, element: &'static str) {
        self.report(Diagnostic::MissingElement {
            parent: parent.display_tag(),
            element,
        });
    }
}
