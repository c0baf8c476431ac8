/// Placement modifier (rotation, mirror, offset, scale).
///
/// When loading, each field falls back to the value it had before, never to a
/// universal default. See `Parser::load_transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation in degrees, counter-clockwise
    pub rotation: f64,
    /// Mirror across the y-axis
    pub mirror: bool,
    pub x_offset: f64,
    pub y_offset: f64,
    pub scale: f64,
}

impl Transform {
    pub fn new(rotation: f64, mirror: bool, x_offset: f64, y_offset: f64) -> Self {
        Self {
            rotation,
            mirror,
            x_offset,
            y_offset,
            scale: 1.0,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, false, 0.0, 0.0)
    }
}
