use super::Parser;
use crate::Result;
use crate::tree::Element;
use crate::types::dictionary::insert_entry;
use crate::types::*;

impl Parser<'_> {
    /// Fill the five dictionary tables. No table reads another while it is
    /// being built.
    pub(super) fn parse_dictionaries(&mut self, content: Element<'_, '_>) -> Result<Dictionaries> {
        let mut dicts = Dictionaries::default();
        let policy = self.options.duplicate_ids;

        if let Some(section) =
            self.dictionary_section(content, "DictionaryColor", DictionaryKind::Color, &mut dicts)
        {
            for entry in section.children_named("EntryColor") {
                let Some(id) = self.entry_id(entry) else {
                    continue;
                };
                let Some(color) = entry.child("Color") else {
                    self.missing_element(entry, "Color");
                    continue;
                };
                let rgb = Rgb {
                    r: self.channel(color, "r"),
                    g: self.channel(color, "g"),
                    b: self.channel(color, "b"),
                };
                insert_entry(
                    &mut dicts.colors,
                    DictionaryKind::Color,
                    id,
                    rgb,
                    policy,
                    &mut self.diagnostics,
                )?;
            }
        }

        if let Some(section) =
            self.dictionary_section(content, "DictionaryLineDesc", DictionaryKind::LineDesc, &mut dicts)
        {
            for entry in section.children_named("EntryLineDesc") {
                let Some(id) = self.entry_id(entry) else {
                    continue;
                };
                let Some(desc) = entry.child("LineDesc") else {
                    self.missing_element(entry, "LineDesc");
                    continue;
                };
                let line_desc = self.line_desc(desc);
                insert_entry(
                    &mut dicts.line_descs,
                    DictionaryKind::LineDesc,
                    id,
                    line_desc,
                    policy,
                    &mut self.diagnostics,
                )?;
            }
        }

        if let Some(section) =
            self.dictionary_section(content, "DictionaryFillDesc", DictionaryKind::FillDesc, &mut dicts)
        {
            for entry in section.children_named("EntryFillDesc") {
                let Some(id) = self.entry_id(entry) else {
                    continue;
                };
                let Some(desc) = entry.child("FillDesc") else {
                    self.missing_element(entry, "FillDesc");
                    continue;
                };
                let Some(property) = desc.attr("fillProperty") else {
                    self.missing_attribute(desc, "fillProperty");
                    continue;
                };
                insert_entry(
                    &mut dicts.fill_descs,
                    DictionaryKind::FillDesc,
                    id,
                    property.to_string(),
                    policy,
                    &mut self.diagnostics,
                )?;
            }
        }

        if let Some(section) =
            self.dictionary_section(content, "DictionaryStandard", DictionaryKind::Standard, &mut dicts)
        {
            for entry in section.children_named("EntryStandard") {
                let Some(id) = self.entry_id(entry) else {
                    continue;
                };
                // One shape per entry; with several, the last one is kept
                let mut shape = None;
                for child in entry.children() {
                    shape = Some(self.parse_primitive(child)?);
                }
                let Some(shape) = shape else {
                    self.missing_element(entry, "shape");
                    continue;
                };
                insert_entry(
                    &mut dicts.standard,
                    DictionaryKind::Standard,
                    id,
                    shape,
                    policy,
                    &mut self.diagnostics,
                )?;
            }
        }

        if let Some(section) =
            self.dictionary_section(content, "DictionaryUser", DictionaryKind::User, &mut dicts)
        {
            for entry in section.children_named("EntryUser") {
                let Some(id) = self.entry_id(entry) else {
                    continue;
                };
                let Some(special) = entry.child("UserSpecial") else {
                    self.missing_element(entry, "UserSpecial");
                    continue;
                };
                let shapes = self.load_user_special(special)?;
                insert_entry(
                    &mut dicts.user,
                    DictionaryKind::User,
                    id,
                    shapes,
                    policy,
                    &mut self.diagnostics,
                )?;
            }
        }

        Ok(dicts)
    }

    /// Finds a dictionary section and records its declared units
    fn dictionary_section<'a, 'input>(
        &mut self,
        content: Element<'a, 'input>,
        tag: &str,
        kind: DictionaryKind,
        dicts: &mut Dictionaries,
    ) -> Option<Element<'a, 'input>> {
        let section = content.child(tag)?;
        if let Some(units) = self.enumerated(section, "units", "units") {
            dicts.units.insert(kind, units);
        }
        Some(section)
    }

    fn entry_id(&mut self, entry: Element<'_, '_>) -> Option<String> {
        let id = self.text(entry, "id");
        if id.is_none() {
            self.missing_attribute(entry, "id");
        }
        id
    }

    fn channel(&mut self, color: Element<'_, '_>, name: &str) -> u8 {
        if !color.has_attr(name) {
            self.missing_attribute(color, name);
            return 0;
        }
        self.enumerated(color, name, "color channel (0-255)")
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::Parser;
    use crate::parse::test_support::with_parser;
    use crate::tree::Element;
    use crate::types::*;
    use crate::{Diagnostic, DuplicateIdPolicy, Ipc2581Error, ParseOptions};

    const CONTENT: &str = r#"<Content>
        <DictionaryColor>
            <EntryColor id="RED"><Color r="255" g="0" b="0"/></EntryColor>
        </DictionaryColor>
        <DictionaryLineDesc units="MILLIMETER">
            <EntryLineDesc id="THIN"><LineDesc lineEnd="ROUND" lineWidth="0.1"/></EntryLineDesc>
        </DictionaryLineDesc>
        <DictionaryFillDesc units="MILLIMETER">
            <EntryFillDesc id="SOLID"><FillDesc fillProperty="FILL"/></EntryFillDesc>
        </DictionaryFillDesc>
        <DictionaryStandard units="MILLIMETER">
            <EntryStandard id="ROUND1"><Circle diameter="1.0"/></EntryStandard>
            <EntryStandard id="RECT1"><RectCenter width="1.0" height="0.5"/></EntryStandard>
        </DictionaryStandard>
        <DictionaryUser units="MILLIMETER">
            <EntryUser id="COMBO">
                <UserSpecial>
                    <Circle diameter="0.2"/>
                    <Line startX="0" startY="0" endX="1" endY="0"><LineDescRef id="THIN"/></Line>
                </UserSpecial>
            </EntryUser>
        </DictionaryUser>
    </Content>"#;

    #[test]
    fn fills_all_five_tables() {
        with_parser(CONTENT, |parser, el| {
            let dicts = parser.parse_dictionaries(el).unwrap();
            assert_eq!(dicts.color("RED"), Some(&Rgb { r: 255, g: 0, b: 0 }));
            assert_eq!(dicts.line_desc("THIN").map(|d| d.line_width), Some(0.1));
            assert_eq!(dicts.fill_desc("SOLID"), Some("FILL"));
            assert_eq!(dicts.len(DictionaryKind::Standard), 2);
            assert_eq!(
                dicts.standard("RECT1").map(|p| p.kind()),
                Some(ShapeKind::RectCenter)
            );
            assert_eq!(dicts.user("COMBO").map(|s| s.len()), Some(2));
            assert_eq!(
                dicts.units(DictionaryKind::LineDesc),
                Some(Units::Millimeter)
            );
            assert_eq!(dicts.units(DictionaryKind::Color), None);
            assert!(parser.diagnostics().is_empty());
        });
    }

    #[test]
    fn duplicate_standard_id_overwrites() {
        let xml = r#"<Content><DictionaryStandard>
            <EntryStandard id="P"><Circle diameter="1.0"/></EntryStandard>
            <EntryStandard id="P"><Oval width="2.0" height="1.0"/></EntryStandard>
        </DictionaryStandard></Content>"#;
        with_parser(xml, |parser, el| {
            let dicts = parser.parse_dictionaries(el).unwrap();
            assert_eq!(dicts.standard("P").map(|p| p.kind()), Some(ShapeKind::Oval));
            assert_eq!(
                parser.diagnostics().iter().collect::<Vec<_>>(),
                vec![&Diagnostic::DuplicateId {
                    dictionary: DictionaryKind::Standard,
                    id: "P".into()
                }]
            );
        });
    }

    #[test]
    fn duplicate_id_rejected_when_configured() {
        let xml = r#"<Content><DictionaryFillDesc>
            <EntryFillDesc id="F"><FillDesc fillProperty="FILL"/></EntryFillDesc>
            <EntryFillDesc id="F"><FillDesc fillProperty="HOLLOW"/></EntryFillDesc>
        </DictionaryFillDesc></Content>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let options = ParseOptions::default()
            .with_namespace("")
            .with_duplicate_ids(DuplicateIdPolicy::Reject);
        let mut parser = Parser::new(&options);
        let err = parser
            .parse_dictionaries(Element::root(&doc, ""))
            .unwrap_err();
        assert!(matches!(
            err,
            Ipc2581Error::DuplicateId {
                dictionary: DictionaryKind::FillDesc,
                ..
            }
        ));
    }

    #[test]
    fn fill_entries_are_read_inside_their_section() {
        let xml = r#"<Content>
            <EntryFillDesc id="STRAY"><FillDesc fillProperty="FILL"/></EntryFillDesc>
            <DictionaryFillDesc>
                <EntryFillDesc id="REAL"><FillDesc fillProperty="HATCH"/></EntryFillDesc>
            </DictionaryFillDesc>
        </Content>"#;
        with_parser(xml, |parser, el| {
            let dicts = parser.parse_dictionaries(el).unwrap();
            assert_eq!(dicts.fill_desc("REAL"), Some("HATCH"));
            assert_eq!(dicts.fill_desc("STRAY"), None);
        });
    }

    #[test]
    fn entry_without_id_is_skipped() {
        let xml = r#"<Content><DictionaryColor>
            <EntryColor><Color r="1" g="2" b="3"/></EntryColor>
            <EntryColor id="BAD"><Color r="300" g="0" b="0"/></EntryColor>
        </DictionaryColor></Content>"#;
        with_parser(xml, |parser, el| {
            let dicts = parser.parse_dictionaries(el).unwrap();
            assert_eq!(dicts.len(DictionaryKind::Color), 1);
            assert_eq!(dicts.color("BAD"), Some(&Rgb { r: 0, g: 0, b: 0 }));
            assert_eq!(parser.diagnostics().len(), 2);
        });
    }
}
