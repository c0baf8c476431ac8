use super::primitives::{Contour, GeometryPrimitive, LineStyle, Point, Polyline};
use super::transform::Transform;

/// Package (footprint) definition from `Step/Package`
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub package_type: Option<String>,
    pub pin_one: Option<String>,
    pub height: Option<f64>,
    /// Body outline, `None` when the package has no Outline
    pub outline: Option<GeometryPrimitive>,
    pub outline_line_style: Option<LineStyle>,
    pub pickup_point: Option<Point>,
    pub silkscreen: Vec<Marking>,
    pub assembly_drawing: AssemblyDrawing,
    pub pins: Vec<Pin>,
    pub land_pads: Vec<Pad>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssemblyDrawing {
    pub outline: Option<GeometryPrimitive>,
    pub line_style: Option<LineStyle>,
    pub markings: Vec<Marking>,
}

/// Silkscreen or assembly-drawing marking. At most one of `polyline` and
/// `contour` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Marking {
    pub usage: Option<String>,
    pub location: Point,
    pub polyline: Option<Polyline>,
    pub contour: Option<Contour>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub number: String,
    pub pin_type: Option<String>,
    pub electrical_type: Option<String>,
    pub location: Point,
    pub standard_primitive_ref: Option<String>,
}

/// Pad placement, used both in package land patterns and in layer Sets
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    pub padstack_def_ref: Option<String>,
    pub location: Point,
    pub transform: Option<Transform>,
    pub standard_primitive_ref: Option<String>,
    pub user_primitive_ref: Option<String>,
    pub pin_ref: Option<PinRef>,
}

/// Reference from a pad to a component pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRef {
    pub component_ref: Option<String>,
    pub pin: String,
}

impl Package {
    pub fn pin(&self, number: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.number == number)
    }
}
