//! Lenient typed attribute reads.
//!
//! A missing attribute is `None` and is not reported. A present value that
//! does not parse is also `None`, but it is reported as
//! [`Diagnostic::InvalidAttribute`]. These readers never fail the load.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::tree::Element;
use std::collections::HashMap;
use std::str::FromStr;

/// Anything that maps attribute names to raw string values
pub trait Attributes {
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Name used in diagnostics
    fn element_name(&self) -> String;
}

impl Attributes for Element<'_, '_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attr(name)
    }

    fn element_name(&self) -> String {
        self.display_tag()
    }
}

impl Attributes for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }

    fn element_name(&self) -> String {
        "attributes".to_string()
    }
}

fn invalid(
    source: &impl Attributes,
    name: &str,
    value: &str,
    expected: &'static str,
    diagnostics: &mut Diagnostics,
) {
    diagnostics.report(Diagnostic::InvalidAttribute {
        element: source.element_name(),
        attribute: name.to_string(),
        value: value.to_string(),
        expected,
    });
}

pub fn integer(source: &impl Attributes, name: &str, diagnostics: &mut Diagnostics) -> Option<i64> {
    let raw = source.attribute(name)?;
    match raw.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            invalid(source, name, raw, "integer", diagnostics);
            None
        }
    }
}

pub fn float(source: &impl Attributes, name: &str, diagnostics: &mut Diagnostics) -> Option<f64> {
    let raw = source.attribute(name)?;
    match raw.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            invalid(source, name, raw, "float", diagnostics);
            None
        }
    }
}

/// `true`/`false`, plus the `1`/`0` spellings xsd:boolean allows
pub fn boolean(source: &impl Attributes, name: &str, diagnostics: &mut Diagnostics) -> Option<bool> {
    let raw = source.attribute(name)?;
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            invalid(source, name, raw, "boolean", diagnostics);
            None
        }
    }
}

/// Enumerated attribute parsed through the type's `FromStr`
pub fn enumerated<T: FromStr>(
    source: &impl Attributes,
    name: &str,
    expected: &'static str,
    diagnostics: &mut Diagnostics,
) -> Option<T> {
    let raw = source.attribute(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            invalid(source, name, raw, expected, diagnostics);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_attribute_is_silent() {
        let mut diags = Diagnostics::new();
        let source = attrs(&[]);
        assert_eq!(integer(&source, "sequence", &mut diags), None);
        assert_eq!(float(&source, "thickness", &mut diags), None);
        assert_eq!(boolean(&source, "mirror", &mut diags), None);
        assert!(diags.is_empty());
    }

    #[test]
    fn unparsable_value_is_reported_not_fatal() {
        let mut diags = Diagnostics::new();
        let source = attrs(&[("thickness", "thick"), ("sequence", "2.5"), ("mirror", "yes")]);

        assert_eq!(float(&source, "thickness", &mut diags), None);
        assert_eq!(integer(&source, "sequence", &mut diags), None);
        assert_eq!(boolean(&source, "mirror", &mut diags), None);
        assert_eq!(diags.len(), 3);
        assert_eq!(
            diags.iter().next(),
            Some(&Diagnostic::InvalidAttribute {
                element: "attributes".to_string(),
                attribute: "thickness".to_string(),
                value: "thick".to_string(),
                expected: "float",
            })
        );
    }

    #[test]
    fn parses_valid_values() {
        let mut diags = Diagnostics::new();
        let source = attrs(&[
            ("thickness", "0.035"),
            ("sequence", " 3 "),
            ("plate", "true"),
            ("testPoint", "0"),
        ]);
        assert_eq!(float(&source, "thickness", &mut diags), Some(0.035));
        assert_eq!(integer(&source, "sequence", &mut diags), Some(3));
        assert_eq!(boolean(&source, "plate", &mut diags), Some(true));
        assert_eq!(boolean(&source, "testPoint", &mut diags), Some(false));
        assert!(diags.is_empty());
    }

    #[test]
    fn enumerated_uses_from_str() {
        use crate::types::Side;

        let mut diags = Diagnostics::new();
        let source = attrs(&[("side", "TOP"), ("bad", "SIDEWAYS")]);
        assert_eq!(
            enumerated::<Side>(&source, "side", "side", &mut diags),
            Some(Side::Top)
        );
        assert_eq!(enumerated::<Side>(&source, "bad", "side", &mut diags), None);
        assert_eq!(diags.len(), 1);
    }
}
