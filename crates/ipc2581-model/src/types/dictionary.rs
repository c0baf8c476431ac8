use super::layer::Feature;
use super::primitives::{GeometryPrimitive, LineDesc, LineStyle, Rgb};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::options::DuplicateIdPolicy;
use crate::{Ipc2581Error, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

/// Units of measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Millimeter,
    Inch,
    Micron,
    Mils,
}

/// The five dictionary scopes. Ids are unique per scope, not globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictionaryKind {
    Color,
    LineDesc,
    FillDesc,
    Standard,
    User,
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DictionaryKind::Color => "color",
            DictionaryKind::LineDesc => "line description",
            DictionaryKind::FillDesc => "fill description",
            DictionaryKind::Standard => "standard primitive",
            DictionaryKind::User => "user primitive",
        })
    }
}

/// Id-indexed shared definitions from the Content section.
///
/// References elsewhere in the document stay plain id strings and are resolved
/// here on demand. A dangling id resolves to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionaries {
    pub(crate) colors: HashMap<String, Rgb>,
    pub(crate) line_descs: HashMap<String, LineDesc>,
    pub(crate) fill_descs: HashMap<String, String>,
    pub(crate) standard: HashMap<String, GeometryPrimitive>,
    pub(crate) user: HashMap<String, Vec<GeometryPrimitive>>,
    pub(crate) units: HashMap<DictionaryKind, Units>,
}

/// What a feature reference points at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Single(&'a GeometryPrimitive),
    Composite(&'a [GeometryPrimitive]),
}

impl Dictionaries {
    pub fn color(&self, id: &str) -> Option<&Rgb> {
        self.colors.get(id)
    }

    pub fn line_desc(&self, id: &str) -> Option<&LineDesc> {
        self.line_descs.get(id)
    }

    /// Fill property (e.g. `FILL`, `HOLLOW`) of a fill description
    pub fn fill_desc(&self, id: &str) -> Option<&str> {
        self.fill_descs.get(id).map(String::as_str)
    }

    pub fn standard(&self, id: &str) -> Option<&GeometryPrimitive> {
        self.standard.get(id)
    }

    pub fn user(&self, id: &str) -> Option<&[GeometryPrimitive]> {
        self.user.get(id).map(Vec::as_slice)
    }

    /// Units declared on a dictionary section, if any
    pub fn units(&self, kind: DictionaryKind) -> Option<Units> {
        self.units.get(&kind).copied()
    }

    pub fn len(&self, kind: DictionaryKind) -> usize {
        match kind {
            DictionaryKind::Color => self.colors.len(),
            DictionaryKind::LineDesc => self.line_descs.len(),
            DictionaryKind::FillDesc => self.fill_descs.len(),
            DictionaryKind::Standard => self.standard.len(),
            DictionaryKind::User => self.user.len(),
        }
    }

    pub fn colors(&self) -> impl Iterator<Item = (&str, &Rgb)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn line_descs(&self) -> impl Iterator<Item = (&str, &LineDesc)> {
        self.line_descs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn standard_entries(&self) -> impl Iterator<Item = (&str, &GeometryPrimitive)> {
        self.standard.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn user_entries(&self) -> impl Iterator<Item = (&str, &[GeometryPrimitive])> {
        self.user.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Inline styles resolve to themselves, references through the table
    pub fn resolve_line_style<'a>(&'a self, style: &'a LineStyle) -> Option<&'a LineDesc> {
        match style {
            LineStyle::Inline(desc) => Some(desc),
            LineStyle::Reference(id) => self.line_desc(id),
        }
    }

    /// Geometry behind a layer feature.
    ///
    /// Pads resolve through their inline standard/user primitive reference.
    /// Bare locations have no geometry.
    pub fn resolve<'a>(&'a self, feature: &'a Feature) -> Option<Resolved<'a>> {
        match feature {
            Feature::Primitive(p) => Some(Resolved::Single(p)),
            Feature::Special(shapes) => Some(Resolved::Composite(shapes)),
            Feature::StandardRef(id) => self.standard(id).map(Resolved::Single),
            Feature::UserRef(id) => self.user(id).map(Resolved::Composite),
            Feature::Pad(pad) => match (&pad.standard_primitive_ref, &pad.user_primitive_ref) {
                (Some(id), _) => self.standard(id).map(Resolved::Single),
                (None, Some(id)) => self.user(id).map(Resolved::Composite),
                (None, None) => None,
            },
            Feature::Location(_) => None,
        }
    }
}

/// Get-or-insert on a dictionary table.
///
/// Dictionaries overwrite on a duplicate id (or reject it, per policy). Layer
/// nets append instead; see `Layer::net_entry`.
pub(crate) fn insert_entry<V>(
    table: &mut HashMap<String, V>,
    kind: DictionaryKind,
    id: String,
    value: V,
    policy: DuplicateIdPolicy,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    match table.entry(id) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match policy {
            DuplicateIdPolicy::Overwrite => {
                diagnostics.report(Diagnostic::DuplicateId {
                    dictionary: kind,
                    id: slot.key().clone(),
                });
                slot.insert(value);
            }
            DuplicateIdPolicy::Reject => {
                return Err(Ipc2581Error::DuplicateId {
                    dictionary: kind,
                    id: slot.key().clone(),
                });
            }
        },
    }
    Ok(())
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "MILLIMETER" => Ok(Units::Millimeter),
            "INCH" => Ok(Units::Inch),
            "MICRON" => Ok(Units::Micron),
            "MILS" => Ok(Units::Mils),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Circle, LineEnd};

    fn circle(d: f64) -> GeometryPrimitive {
        GeometryPrimitive::Circle(Circle {
            diameter: d,
            fill_desc_ref: None,
            transform: None,
        })
    }

    #[test]
    fn duplicate_overwrites_and_reports() {
        let mut table = HashMap::new();
        let mut diags = Diagnostics::new();
        for d in [1.0, 2.0] {
            insert_entry(
                &mut table,
                DictionaryKind::Standard,
                "C1".into(),
                circle(d),
                DuplicateIdPolicy::Overwrite,
                &mut diags,
            )
            .unwrap();
        }

        assert_eq!(table.len(), 1);
        assert_eq!(table["C1"], circle(2.0));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn duplicate_rejected_under_strict_policy() {
        let mut table = HashMap::new();
        let mut diags = Diagnostics::new();
        let red = Rgb { r: 255, g: 0, b: 0 };
        let mut insert = |table: &mut HashMap<String, Rgb>, value| {
            insert_entry(
                table,
                DictionaryKind::Color,
                "RED".into(),
                value,
                DuplicateIdPolicy::Reject,
                &mut diags,
            )
        };
        insert(&mut table, red).unwrap();
        let err = insert(&mut table, Rgb::default()).unwrap_err();

        assert!(matches!(
            err,
            Ipc2581Error::DuplicateId {
                dictionary: DictionaryKind::Color,
                ..
            }
        ));
        assert_eq!(table["RED"], Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn table_iterators_cover_every_entry() {
        let mut dicts = Dictionaries::default();
        dicts.colors.insert("RED".into(), Rgb { r: 255, g: 0, b: 0 });
        dicts.colors.insert("BLUE".into(), Rgb { r: 0, g: 0, b: 255 });
        dicts.line_descs.insert(
            "THIN".into(),
            LineDesc {
                line_end: LineEnd::Round,
                line_width: 0.1,
                line_property: None,
            },
        );

        let mut colors: Vec<&str> = dicts.colors().map(|(id, _)| id).collect();
        colors.sort_unstable();
        assert_eq!(colors, vec!["BLUE", "RED"]);
        assert_eq!(
            dicts.line_descs().map(|(id, d)| (id, d.line_width)).collect::<Vec<_>>(),
            vec![("THIN", 0.1)]
        );
        assert_eq!(dicts.len(DictionaryKind::Color), 2);
    }

    #[test]
    fn dangling_references_resolve_to_none() {
        let mut dicts = Dictionaries::default();
        dicts.standard.insert("PAD".into(), circle(0.5));

        assert_eq!(
            dicts.resolve(&Feature::StandardRef("PAD".into())),
            Some(Resolved::Single(&circle(0.5)))
        );
        assert_eq!(dicts.resolve(&Feature::StandardRef("MISSING".into())), None);
        assert_eq!(dicts.resolve(&Feature::UserRef("PAD".into())), None);
        assert_eq!(
            dicts.resolve_line_style(&LineStyle::Reference("NOPE".into())),
            None
        );
    }
}
