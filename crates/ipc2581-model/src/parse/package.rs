use super::Parser;
use crate::Result;
use crate::tree::Element;
use crate::types::*;

impl Parser<'_> {
    pub(super) fn parse_package(&mut self, el: Element<'_, '_>) -> Result<Package> {
        self.expect_tag(el, "Package")?;

        let (outline, outline_line_style) = match el.child("Outline") {
            Some(outline) => self.load_outline(outline)?,
            None => {
                self.missing_element(el, "Outline");
                (None, None)
            }
        };

        let silkscreen = match el.child("SilkScreen") {
            Some(silk) => self.load_markings(silk)?,
            None => {
                self.missing_element(el, "SilkScreen");
                Vec::new()
            }
        };

        let assembly_drawing = match el.child("AssemblyDrawing") {
            Some(drawing) => {
                let (outline, line_style) = match drawing.child("Outline") {
                    Some(outline) => self.load_outline(outline)?,
                    None => (None, None),
                };
                AssemblyDrawing {
                    outline,
                    line_style,
                    markings: self.load_markings(drawing)?,
                }
            }
            None => {
                self.missing_element(el, "AssemblyDrawing");
                AssemblyDrawing::default()
            }
        };

        let pins = el
            .children_named("Pin")
            .map(|pin| Pin {
                number: self.text_or_empty(pin, "number"),
                pin_type: self.text(pin, "type"),
                electrical_type: self.text(pin, "electricalType"),
                location: self.location(pin),
                standard_primitive_ref: self.child_ref(pin, "StandardPrimitiveRef"),
            })
            .collect();

        let mut land_pads = Vec::new();
        if let Some(pattern) = el.child("LandPattern") {
            for pad in pattern.children_named("Pad") {
                land_pads.push(self.load_pad(pad)?);
            }
        }

        Ok(Package {
            name: self.text_or_empty(el, "name"),
            package_type: self.text(el, "type"),
            pin_one: self.text(el, "pinOne"),
            height: self.float(el, "height"),
            outline,
            outline_line_style,
            pickup_point: el.child("PickupPoint").map(|p| self.point(p, "x", "y")),
            silkscreen,
            assembly_drawing,
            pins,
            land_pads,
        })
    }

    /// First shape in an `Outline`, plus its line style
    fn load_outline(
        &mut self,
        el: Element<'_, '_>,
    ) -> Result<(Option<GeometryPrimitive>, Option<LineStyle>)> {
        let shape = el
            .children()
            .find(|c| !c.is("LineDesc") && !c.is("LineDescRef"))
            .map(|c| self.parse_primitive(c))
            .transpose()?;
        if shape.is_none() {
            self.missing_element(el, "Polygon");
        }
        Ok((shape, self.line_style(el)))
    }

    fn load_markings(&mut self, parent: Element<'_, '_>) -> Result<Vec<Marking>> {
        parent
            .children_named("Marking")
            .map(|m| self.load_marking(m))
            .collect()
    }

    /// Keeps the first Polyline or Contour, whichever comes first
    fn load_marking(&mut self, el: Element<'_, '_>) -> Result<Marking> {
        let mut marking = Marking {
            usage: self.text(el, "markingUsage"),
            location: self.location(el),
            polyline: None,
            contour: None,
        };

        for child in el.children() {
            let drawn = marking.polyline.is_some() || marking.contour.is_some();
            if child.is("Polyline") || child.is("Contour") {
                if drawn {
                    log::debug!("extra <{}> in Marking ignored", child.tag());
                } else if child.is("Polyline") {
                    marking.polyline = Some(self.load_polyline(child)?);
                } else {
                    marking.contour = Some(self.load_contour(child)?);
                }
            }
        }

        Ok(marking)
    }
}
