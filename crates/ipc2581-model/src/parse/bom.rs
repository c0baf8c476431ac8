use super::Parser;
use crate::tree::Element;
use crate::types::*;

impl Parser<'_> {
    /// BOM fields are plain attribute copies; nothing here is fatal
    pub(super) fn parse_bom(&mut self, el: Element<'_, '_>) -> Bom {
        let header = match el.child("BomHeader") {
            Some(h) => BomHeader {
                assembly: self.text(h, "assembly"),
                revision: self.text(h, "revision"),
                affecting: self.boolean(h, "affecting"),
                step_refs: h
                    .children_named("StepRef")
                    .filter_map(|r| r.attr("name").map(str::to_string))
                    .collect(),
            },
            None => BomHeader::default(),
        };

        let items = el
            .children_named("BomItem")
            .map(|item| self.parse_bom_item(item))
            .collect();

        Bom {
            name: self.text_or_empty(el, "name"),
            header,
            items,
        }
    }

    fn parse_bom_item(&mut self, el: Element<'_, '_>) -> BomItem {
        let ref_des = el
            .children_named("RefDes")
            .map(|rd| BomRefDes {
                name: self.text_or_empty(rd, "name"),
                package_ref: self.text(rd, "packageRef"),
                populate: self.boolean(rd, "populate").unwrap_or(true),
                layer_ref: self.text(rd, "layerRef"),
            })
            .collect();

        let characteristics = el
            .children_named("Characteristics")
            .map(|c| self.parse_characteristics(c))
            .collect();

        BomItem {
            oem_design_number_ref: self.text(el, "OEMDesignNumberRef"),
            quantity: self.enumerated(el, "quantity", "unsigned integer"),
            pin_count: self.enumerated(el, "pinCount", "unsigned integer"),
            category: self.enumerated(el, "category", "BOM category"),
            description: self.text(el, "description"),
            characteristics,
            ref_des,
        }
    }

    fn parse_characteristics(&mut self, el: Element<'_, '_>) -> Characteristics {
        let textuals = el
            .children_named("Textual")
            .map(|t| TextualCharacteristic {
                definition_source: self.text(t, "definitionSource"),
                name: self.text(t, "textualCharacteristicName"),
                value: self.text(t, "textualCharacteristicValue"),
            })
            .collect();

        let measured = el
            .children_named("Measured")
            .map(|m| MeasuredCharacteristic {
                definition_source: self.text(m, "definitionSource"),
                name: self.text(m, "measuredCharacteristicName"),
                value: self.float(m, "measuredCharacteristicValue"),
                unit: self.text(m, "engineeringUnitOfMeasure"),
            })
            .collect();

        Characteristics {
            category: self.enumerated(el, "category", "BOM category"),
            textuals,
            measured,
        }
    }
}
