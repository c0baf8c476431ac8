use super::Parser;
use crate::diagnostics::Diagnostic;
use crate::tree::Element;
use crate::types::*;
use crate::{Ipc2581Error, Result};

impl Parser<'_> {
    /// Dispatch on the shape tag. Anything outside [`ShapeKind`] is fatal.
    pub(crate) fn parse_primitive(&mut self, el: Element<'_, '_>) -> Result<GeometryPrimitive> {
        let kind = ShapeKind::from_tag(el.tag())
            .filter(|k| el.is(k.tag()))
            .ok_or_else(|| Ipc2581Error::UnknownShape(el.display_tag()))?;

        Ok(match kind {
            ShapeKind::Circle => GeometryPrimitive::Circle(self.load_circle(el)?),
            ShapeKind::Line => GeometryPrimitive::Line(self.load_line(el)?),
            ShapeKind::RectCenter => GeometryPrimitive::RectCenter(self.load_rect_center(el)?),
            ShapeKind::Oval => GeometryPrimitive::Oval(self.load_oval(el)?),
            ShapeKind::Arc => GeometryPrimitive::Arc(self.load_arc(el)?),
            ShapeKind::Polygon => GeometryPrimitive::Polygon(self.load_polygon(el)?),
            ShapeKind::Polyline => GeometryPrimitive::Polyline(self.load_polyline(el)?),
            ShapeKind::Contour => GeometryPrimitive::Contour(self.load_contour(el)?),
        })
    }

    /// Reads an `Xform`. Each attribute that is absent (or unreadable) keeps
    /// the value from `defaults`.
    pub(crate) fn load_transform(
        &mut self,
        el: Element<'_, '_>,
        defaults: Transform,
    ) -> Result<Transform> {
        self.expect_tag(el, "Xform")?;
        Ok(Transform {
            rotation: self.float(el, "rotation").unwrap_or(defaults.rotation),
            mirror: self.boolean(el, "mirror").unwrap_or(defaults.mirror),
            x_offset: self.float(el, "xOffset").unwrap_or(defaults.x_offset),
            y_offset: self.float(el, "yOffset").unwrap_or(defaults.y_offset),
            scale: self.float(el, "scale").unwrap_or(defaults.scale),
        })
    }

    /// `Xform` child, if any
    pub(super) fn child_transform(&mut self, el: Element<'_, '_>) -> Result<Option<Transform>> {
        el.child("Xform")
            .map(|x| self.load_transform(x, Transform::default()))
            .transpose()
    }

    pub(crate) fn load_circle(&mut self, el: Element<'_, '_>) -> Result<Circle> {
        self.expect_tag(el, "Circle")?;
        Ok(Circle {
            diameter: self.float_or_zero(el, "diameter"),
            fill_desc_ref: self.child_ref(el, "FillDescRef"),
            transform: self.child_transform(el)?,
        })
    }

    pub(crate) fn load_line(&mut self, el: Element<'_, '_>) -> Result<Line> {
        self.expect_tag(el, "Line")?;
        Ok(Line {
            start: self.point(el, "startX", "startY"),
            end: self.point(el, "endX", "endY"),
            line_style: self.line_style(el),
        })
    }

    pub(crate) fn load_rect_center(&mut self, el: Element<'_, '_>) -> Result<RectCenter> {
        self.expect_tag(el, "RectCenter")?;
        Ok(RectCenter {
            width: self.float_or_zero(el, "width"),
            height: self.float_or_zero(el, "height"),
            fill_desc_ref: self.child_ref(el, "FillDescRef"),
            transform: self.child_transform(el)?,
        })
    }

    pub(crate) fn load_oval(&mut self, el: Element<'_, '_>) -> Result<Oval> {
        self.expect_tag(el, "Oval")?;
        Ok(Oval {
            width: self.float_or_zero(el, "width"),
            height: self.float_or_zero(el, "height"),
            fill_desc_ref: self.child_ref(el, "FillDescRef"),
            transform: self.child_transform(el)?,
        })
    }

    /// Arc endpoints are taken as given, never checked against the center
    pub(crate) fn load_arc(&mut self, el: Element<'_, '_>) -> Result<Arc> {
        self.expect_tag(el, "Arc")?;
        Ok(Arc {
            start: self.point(el, "startX", "startY"),
            end: self.point(el, "endX", "endY"),
            center: self.point(el, "centerX", "centerY"),
            clockwise: self.boolean(el, "clockwise").unwrap_or(true),
            line_style: self.line_style(el),
        })
    }

    pub(crate) fn load_polygon(&mut self, el: Element<'_, '_>) -> Result<Polygon> {
        self.expect_tag(el, "Polygon")?;
        Ok(Polygon {
            chain: self.point_chain(el),
            fill_desc_ref: self.child_ref(el, "FillDescRef"),
        })
    }

    pub(crate) fn load_polyline(&mut self, el: Element<'_, '_>) -> Result<Polyline> {
        self.expect_tag(el, "Polyline")?;
        Ok(Polyline {
            chain: self.point_chain(el),
            line_style: self.line_style(el),
        })
    }

    pub(crate) fn load_contour(&mut self, el: Element<'_, '_>) -> Result<Contour> {
        self.expect_tag(el, "Contour")?;
        Ok(self.contour_body(el))
    }

    /// Polygon plus cutouts. Shared by `Contour` and the board `Profile`,
    /// which have the same children.
    pub(super) fn contour_body(&mut self, el: Element<'_, '_>) -> Contour {
        let (outline, polygon_fill) = match el.child("Polygon") {
            Some(polygon) => (
                self.point_chain(polygon),
                self.child_ref(polygon, "FillDescRef"),
            ),
            None => {
                self.missing_element(el, "Polygon");
                (PointChain::default(), None)
            }
        };

        let cutouts = el
            .children_named("Cutout")
            .map(|cutout| match cutout.child("Polygon") {
                Some(polygon) => self.point_chain(polygon),
                None => self.point_chain(cutout),
            })
            .collect();

        Contour {
            outline,
            cutouts,
            fill_desc_ref: self.child_ref(el, "FillDescRef").or(polygon_fill),
        }
    }

    /// `PolyBegin` followed by `PolyStepSegment` / `PolyStepCurve` children
    pub(super) fn point_chain(&mut self, el: Element<'_, '_>) -> PointChain {
        let mut chain = PointChain::default();
        for step in el.children() {
            if step.is("PolyBegin") {
                if chain.is_empty() {
                    chain.push_segment(self.point(step, "x", "y"));
                } else {
                    log::debug!("ignoring repeated PolyBegin in <{}>", el.tag());
                }
                continue;
            }

            let is_segment = step.is("PolyStepSegment");
            if !is_segment && !step.is("PolyStepCurve") {
                continue;
            }
            if chain.is_empty() {
                self.report(Diagnostic::UnexpectedPolyStep {
                    parent: el.display_tag(),
                    element: step.display_tag(),
                });
            }

            let to = self.point(step, "x", "y");
            if is_segment {
                chain.push_segment(to);
            } else {
                let center = self.point(step, "centerX", "centerY");
                let clockwise = self.boolean(step, "clockwise").unwrap_or(true);
                chain.push_curve(to, center, clockwise);
            }
        }
        chain
    }

    /// Inline `LineDesc` wins over a `LineDescRef`
    pub(super) fn line_style(&mut self, el: Element<'_, '_>) -> Option<LineStyle> {
        if let Some(desc) = el.child("LineDesc") {
            return Some(LineStyle::Inline(self.line_desc(desc)));
        }
        self.child_ref(el, "LineDescRef").map(LineStyle::Reference)
    }

    pub(super) fn line_desc(&mut self, el: Element<'_, '_>) -> LineDesc {
        LineDesc {
            line_end: self
                .enumerated(el, "lineEnd", "line end")
                .unwrap_or(LineEnd::Round),
            line_width: self.float_or_zero(el, "lineWidth"),
            line_property: self.enumerated(el, "lineProperty", "line property"),
        }
    }

    /// Composite shape: every child is a primitive
    pub(crate) fn load_user_special(
        &mut self,
        el: Element<'_, '_>,
    ) -> Result<Vec<GeometryPrimitive>> {
        self.expect_tag(el, "UserSpecial")?;
        el.children().map(|shape| self.parse_primitive(shape)).collect()
    }
}
