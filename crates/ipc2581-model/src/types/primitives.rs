use super::transform::Transform;
use std::fmt;
use std::str::FromStr;

/// Point in 2D Cartesian coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// How one chain point connects to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Connection {
    /// Straight segment
    Segment,
    /// Circular arc around `center`
    Curve { center: Point, clockwise: bool },
}

/// Ordered points joined by connections.
///
/// `connections().len()` is always `points().len() - 1` (zero for an empty
/// chain). Points are only added through the `begin`/`push_*` methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointChain {
    points: Vec<Point>,
    connections: Vec<Connection>,
}

impl PointChain {
    /// Chain starting at `start`
    pub fn begin(start: Point) -> Self {
        Self {
            points: vec![start],
            connections: Vec::new(),
        }
    }

    /// Straight segment to `to`. On an empty chain `to` becomes the start.
    pub fn push_segment(&mut self, to: Point) {
        self.push(to, Connection::Segment);
    }

    /// Arc to `to`. On an empty chain `to` becomes the start.
    pub fn push_curve(&mut self, to: Point, center: Point, clockwise: bool) {
        self.push(to, Connection::Curve { center, clockwise });
    }

    fn push(&mut self, to: Point, connection: Connection) {
        if !self.points.is_empty() {
            self.connections.push(connection);
        }
        self.points.push(to);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last point repeats the first
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }
}

/// Line end (cap) style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    Round,
    Square,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineProperty {
    Solid,
    Dashed,
    Dotted,
}

/// Line description: cap style and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDesc {
    pub line_end: LineEnd,
    pub line_width: f64,
    pub line_property: Option<LineProperty>,
}

/// Line style on a stroked primitive, inline or by dictionary id
#[derive(Debug, Clone, PartialEq)]
pub enum LineStyle {
    Inline(LineDesc),
    Reference(String),
}

/// Circle defined by diameter
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub diameter: f64,
    pub fill_desc_ref: Option<String>,
    pub transform: Option<Transform>,
}

/// Straight stroked line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub line_style: Option<LineStyle>,
}

/// Rectangle centered at origin
#[derive(Debug, Clone, PartialEq)]
pub struct RectCenter {
    pub width: f64,
    pub height: f64,
    pub fill_desc_ref: Option<String>,
    pub transform: Option<Transform>,
}

/// Oval (rectangle with rounded ends)
#[derive(Debug, Clone, PartialEq)]
pub struct Oval {
    pub width: f64,
    pub height: f64,
    pub fill_desc_ref: Option<String>,
    pub transform: Option<Transform>,
}

/// Arc segment. Start and end are not checked against the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub start: Point,
    pub end: Point,
    pub center: Point,
    pub clockwise: bool,
    pub line_style: Option<LineStyle>,
}

/// Polygon (closed shape)
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub chain: PointChain,
    pub fill_desc_ref: Option<String>,
}

/// Polyline (open shape)
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub chain: PointChain,
    pub line_style: Option<LineStyle>,
}

/// Contour (outer boundary with optional cutouts)
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub outline: PointChain,
    pub cutouts: Vec<PointChain>,
    pub fill_desc_ref: Option<String>,
}

/// Geometric primitive, one per shape element tag
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryPrimitive {
    Circle(Circle),
    Line(Line),
    RectCenter(RectCenter),
    Oval(Oval),
    Arc(Arc),
    Polygon(Polygon),
    Polyline(Polyline),
    Contour(Contour),
}

impl GeometryPrimitive {
    pub fn kind(&self) -> ShapeKind {
        match self {
            GeometryPrimitive::Circle(_) => ShapeKind::Circle,
            GeometryPrimitive::Line(_) => ShapeKind::Line,
            GeometryPrimitive::RectCenter(_) => ShapeKind::RectCenter,
            GeometryPrimitive::Oval(_) => ShapeKind::Oval,
            GeometryPrimitive::Arc(_) => ShapeKind::Arc,
            GeometryPrimitive::Polygon(_) => ShapeKind::Polygon,
            GeometryPrimitive::Polyline(_) => ShapeKind::Polyline,
            GeometryPrimitive::Contour(_) => ShapeKind::Contour,
        }
    }

    pub fn transform(&self) -> Option<&Transform> {
        match self {
            GeometryPrimitive::Circle(c) => c.transform.as_ref(),
            GeometryPrimitive::RectCenter(r) => r.transform.as_ref(),
            GeometryPrimitive::Oval(o) => o.transform.as_ref(),
            _ => None,
        }
    }

    pub fn fill_desc_ref(&self) -> Option<&str> {
        match self {
            GeometryPrimitive::Circle(c) => c.fill_desc_ref.as_deref(),
            GeometryPrimitive::RectCenter(r) => r.fill_desc_ref.as_deref(),
            GeometryPrimitive::Oval(o) => o.fill_desc_ref.as_deref(),
            GeometryPrimitive::Polygon(p) => p.fill_desc_ref.as_deref(),
            GeometryPrimitive::Contour(c) => c.fill_desc_ref.as_deref(),
            _ => None,
        }
    }

    pub fn line_style(&self) -> Option<&LineStyle> {
        match self {
            GeometryPrimitive::Line(l) => l.line_style.as_ref(),
            GeometryPrimitive::Arc(a) => a.line_style.as_ref(),
            GeometryPrimitive::Polyline(p) => p.line_style.as_ref(),
            _ => None,
        }
    }

    /// All point chains, outer boundary first
    pub fn chains(&self) -> Vec<&PointChain> {
        match self {
            GeometryPrimitive::Polygon(p) => vec![&p.chain],
            GeometryPrimitive::Polyline(p) => vec![&p.chain],
            GeometryPrimitive::Contour(c) => {
                std::iter::once(&c.outline).chain(c.cutouts.iter()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// The closed set of shape element tags this model understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Line,
    RectCenter,
    Oval,
    Arc,
    Polygon,
    Polyline,
    Contour,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Circle,
        ShapeKind::Line,
        ShapeKind::RectCenter,
        ShapeKind::Oval,
        ShapeKind::Arc,
        ShapeKind::Polygon,
        ShapeKind::Polyline,
        ShapeKind::Contour,
    ];

    /// Canonical element tag
    pub fn tag(self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
            ShapeKind::RectCenter => "RectCenter",
            ShapeKind::Oval => "Oval",
            ShapeKind::Arc => "Arc",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Polyline => "Polyline",
            ShapeKind::Contour => "Contour",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for LineEnd {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROUND" => Ok(LineEnd::Round),
            "SQUARE" => Ok(LineEnd::Square),
            "FLAT" | "NONE" => Ok(LineEnd::Flat),
            _ => Err(format!("Unknown lineEnd: {}", s)),
        }
    }
}

impl FromStr for LineProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOLID" => Ok(LineProperty::Solid),
            "DASHED" => Ok(LineProperty::Dashed),
            "DOTTED" => Ok(LineProperty::Dotted),
            _ => Err(format!("Unknown lineProperty: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_keeps_one_fewer_connection_than_points() {
        let mut chain = PointChain::default();
        assert_eq!(chain.connections().len(), 0);

        chain.push_segment(Point::new(0.0, 0.0));
        assert_eq!(chain.points().len(), 1);
        assert!(chain.connections().is_empty());

        chain.push_segment(Point::new(1.0, 0.0));
        chain.push_curve(Point::new(2.0, 0.0), Point::new(1.5, 0.0), true);
        assert_eq!(chain.points().len(), 3);
        assert_eq!(chain.connections().len(), 2);
        assert_eq!(
            chain.connections()[1],
            Connection::Curve {
                center: Point::new(1.5, 0.0),
                clockwise: true
            }
        );
    }

    #[test]
    fn closed_chain_detection() {
        let mut chain = PointChain::begin(Point::new(0.0, 0.0));
        chain.push_segment(Point::new(1.0, 0.0));
        assert!(!chain.is_closed());
        chain.push_segment(Point::new(0.0, 0.0));
        assert!(chain.is_closed());
    }

    #[test]
    fn shape_tags_are_a_closed_set() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ShapeKind::from_tag("RectRound"), None);
        assert_eq!(ShapeKind::from_tag("circle"), None);
    }
}
