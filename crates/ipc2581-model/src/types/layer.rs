use super::package::Pad;
use super::primitives::{GeometryPrimitive, Point};
use super::transform::Transform;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::collections::HashMap;
use std::str::FromStr;

/// A physical or documentation layer with everything placed on it
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub function: LayerFunction,
    pub side: Option<Side>,
    pub polarity: Option<Polarity>,
    /// Stackup thickness, zero when the layer has no stackup record
    pub thickness: f64,
    pub tol_plus: f64,
    pub tol_minus: f64,
    pub sequence: u32,
    /// Whether a StackupLayer record exists for this layer
    pub in_stackup: bool,
    pub phy_net_points: Vec<PhysicalNetPoint>,
    pub nets: IndexMap<String, LayerNet>,
    pub vias: Vec<Via>,
    pub pads_not_used: Vec<PadNotUsed>,
    pub no_net: Vec<NoNetGeometry>,
    /// Nets of skipped `geometry` Sets (holes, slots), in order of appearance
    pub unmodeled_nets: Vec<String>,
    pub components: Vec<ComponentPlacement>,
}

impl Layer {
    pub fn new(name: impl Into<String>, function: LayerFunction) -> Self {
        Self {
            name: name.into(),
            function,
            side: None,
            polarity: None,
            thickness: 0.0,
            tol_plus: 0.0,
            tol_minus: 0.0,
            sequence: 0,
            in_stackup: false,
            phy_net_points: Vec::new(),
            nets: IndexMap::new(),
            vias: Vec::new(),
            pads_not_used: Vec::new(),
            no_net: Vec::new(),
            unmodeled_nets: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Get-or-create the named net.
    ///
    /// Sets sharing a net name append into the same LayerNet; nothing is ever
    /// replaced. Dictionary tables behave the other way round.
    pub fn net_entry(&mut self, name: &str) -> &mut LayerNet {
        match self.nets.entry(name.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let net = LayerNet::new(e.key().clone());
                e.insert(net)
            }
        }
    }

    pub fn net(&self, name: &str) -> Option<&LayerNet> {
        self.nets.get(name)
    }

    /// Distinct net names on this layer (nets, vias, unused pads, skipped
    /// geometry Sets), in order of first appearance
    pub fn net_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let candidates = self
            .nets
            .keys()
            .map(String::as_str)
            .chain(self.vias.iter().map(|v| v.net.as_str()))
            .chain(self.pads_not_used.iter().map(|p| p.net.as_str()))
            .chain(self.unmodeled_nets.iter().map(String::as_str));
        for name in candidates {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn is_conductive(&self) -> bool {
        matches!(
            self.function,
            LayerFunction::Conductor
                | LayerFunction::CondFilm
                | LayerFunction::CondFoil
                | LayerFunction::Plane
                | LayerFunction::Signal
                | LayerFunction::Mixed
        )
    }
}

/// All geometry belonging to one net on one layer.
///
/// `feature_locations[i]` is where `features[i]` is placed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerNet {
    pub name: String,
    pub feature_locations: Vec<Point>,
    pub features: Vec<Feature>,
    /// Xform of the most recent Set that carried one. It applies to every
    /// feature in the net, including features from earlier Sets that had
    /// their own placement; per-feature transforms are not kept.
    pub transform: Option<Transform>,
}

impl LayerNet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feature_locations: Vec::new(),
            features: Vec::new(),
            transform: None,
        }
    }

    pub fn push(&mut self, location: Point, feature: Feature) {
        self.feature_locations.push(location);
        self.features.push(feature);
    }

    /// Iterate `(location, feature)` pairs
    pub fn placed(&self) -> impl Iterator<Item = (&Point, &Feature)> {
        self.feature_locations.iter().zip(self.features.iter())
    }
}

/// One placed feature inside a Set
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    Primitive(GeometryPrimitive),
    /// Inline UserSpecial (composite shape)
    Special(Vec<GeometryPrimitive>),
    /// Unresolved StandardPrimitiveRef id
    StandardRef(String),
    /// Unresolved UserPrimitiveRef id
    UserRef(String),
    Pad(Pad),
    /// Location with no attached geometry
    Location(Point),
}

/// A Set with no net: kept as its own record, never merged
#[derive(Debug, Clone, PartialEq)]
pub struct NoNetGeometry {
    pub feature_locations: Vec<Point>,
    pub features: Vec<Feature>,
    pub transform: Option<Transform>,
    pub polarity: Option<Polarity>,
}

/// A Set classified by its pad usage (VIA or NONE)
#[derive(Debug, Clone, PartialEq)]
pub struct PadSet {
    pub net: String,
    pub pad: Option<Pad>,
    pub nonstandard_attributes: HashMap<String, String>,
    pub plate: bool,
    pub test_point: bool,
}

pub type Via = PadSet;
pub type PadNotUsed = PadSet;

/// A PhyNetPoint on this layer
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalNetPoint {
    pub net: String,
    pub layer_ref: String,
    pub position: Point,
    pub net_node: Option<NetNode>,
    pub exposure: Option<Exposure>,
    pub via: bool,
    pub standard_primitive_ref: Option<String>,
}

/// A component placed on this layer
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentPlacement {
    pub ref_des: String,
    pub package_ref: Option<String>,
    pub layer_ref: String,
    pub part: Option<String>,
    pub mount_type: Option<MountType>,
    pub standoff: Option<f64>,
    pub height: Option<f64>,
    pub location: Point,
    pub transform: Option<Transform>,
    pub nonstandard_attributes: HashMap<String, String>,
}

/// A layer's place in the board stack, bottom of the board at z = 0
#[derive(Debug, Clone, PartialEq)]
pub struct StackPosition<'a> {
    pub name: &'a str,
    pub function: LayerFunction,
    pub side: Option<Side>,
    pub polarity: Option<Polarity>,
    pub thickness: f64,
    pub sequence: u32,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFunction {
    // Conductive layers
    Conductor,
    CondFilm,
    CondFoil,
    Plane,
    Signal,
    Mixed,

    CoatingCond,
    CoatingNonCond,

    Soldermask,
    Solderpaste,
    Pastemask,

    Silkscreen,
    Legend,

    Drill,
    Rout,
    VCut,
    Score,
    EdgeChamfer,
    EdgePlating,

    // Dielectric layers
    DielBase,
    DielCore,
    DielPreg,
    DielAdhv,
    DielBondPly,
    DielCoverlay,

    ComponentTop,
    ComponentBottom,
    ComponentEmbedded,
    ComponentFormed,
    Assembly,

    ConductiveAdhesive,
    Glue,
    HoleFill,
    SolderBump,
    Stiffener,
    Capacitive,
    Resistive,

    // Documentation and tooling
    Document,
    Graphic,
    BoardOutline,
    BoardFab,
    Rework,
    Fixture,
    Probe,
    Courtyard,
    LandPattern,
    ThievingKeepInout,

    StackupComposite,

    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Both,
    Internal,
    All,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Role of a physical net point in its net
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetNode {
    End,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    Exposed,
    CoveredPrimary,
    CoveredSecondary,
    Covered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountType {
    Smt,
    Tht,
    Other,
}

impl FromStr for LayerFunction {
    type Err = String;

    /// Unknown functions map to `Other`; the vocabulary grows between revisions
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CONDUCTOR" => LayerFunction::Conductor,
            "CONDFILM" => LayerFunction::CondFilm,
            "CONDFOIL" => LayerFunction::CondFoil,
            "PLANE" => LayerFunction::Plane,
            "SIGNAL" => LayerFunction::Signal,
            "MIXED" => LayerFunction::Mixed,
            "COATINGCOND" => LayerFunction::CoatingCond,
            "COATINGNONCOND" => LayerFunction::CoatingNonCond,
            "SOLDERMASK" => LayerFunction::Soldermask,
            "SOLDERPASTE" => LayerFunction::Solderpaste,
            "PASTEMASK" => LayerFunction::Pastemask,
            "SILKSCREEN" => LayerFunction::Silkscreen,
            "LEGEND" => LayerFunction::Legend,
            "DRILL" => LayerFunction::Drill,
            "ROUT" | "ROUTE" => LayerFunction::Rout,
            "V_CUT" => LayerFunction::VCut,
            "SCORE" => LayerFunction::Score,
            "EDGE_CHAMFER" => LayerFunction::EdgeChamfer,
            "EDGE_PLATING" => LayerFunction::EdgePlating,
            "DIELBASE" => LayerFunction::DielBase,
            "DIELCORE" => LayerFunction::DielCore,
            "DIELPREG" => LayerFunction::DielPreg,
            "DIELADHV" => LayerFunction::DielAdhv,
            "DIELBONDPLY" => LayerFunction::DielBondPly,
            "DIELCOVERLAY" => LayerFunction::DielCoverlay,
            "COMPONENT_TOP" => LayerFunction::ComponentTop,
            "COMPONENT_BOTTOM" => LayerFunction::ComponentBottom,
            "COMPONENT_EMBEDDED" => LayerFunction::ComponentEmbedded,
            "COMPONENT_FORMED" => LayerFunction::ComponentFormed,
            "ASSEMBLY" => LayerFunction::Assembly,
            "CONDUCTIVE_ADHESIVE" => LayerFunction::ConductiveAdhesive,
            "GLUE" => LayerFunction::Glue,
            "HOLEFILL" => LayerFunction::HoleFill,
            "SOLDERBUMP" => LayerFunction::SolderBump,
            "STIFFENER" => LayerFunction::Stiffener,
            "CAPACITIVE" => LayerFunction::Capacitive,
            "RESISTIVE" => LayerFunction::Resistive,
            "DOCUMENT" => LayerFunction::Document,
            "GRAPHIC" => LayerFunction::Graphic,
            "BOARD_OUTLINE" => LayerFunction::BoardOutline,
            "BOARD_FAB" => LayerFunction::BoardFab,
            "REWORK" => LayerFunction::Rework,
            "FIXTURE" => LayerFunction::Fixture,
            "PROBE" => LayerFunction::Probe,
            "COURTYARD" => LayerFunction::Courtyard,
            "LANDPATTERN" => LayerFunction::LandPattern,
            "THIEVING_KEEP_INOUT" => LayerFunction::ThievingKeepInout,
            "STACKUP_COMPOSITE" => LayerFunction::StackupComposite,
            _ => LayerFunction::Other,
        })
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TOP" => Ok(Side::Top),
            "BOTTOM" => Ok(Side::Bottom),
            "BOTH" => Ok(Side::Both),
            "INTERNAL" => Ok(Side::Internal),
            "ALL" => Ok(Side::All),
            "NONE" => Ok(Side::None),
            _ => Err(format!("Invalid side: {}", s)),
        }
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(Polarity::Positive),
            "NEGATIVE" => Ok(Polarity::Negative),
            _ => Err(format!("Invalid polarity: {}", s)),
        }
    }
}

impl FromStr for NetNode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "END" => Ok(NetNode::End),
            "MIDDLE" => Ok(NetNode::Middle),
            _ => Err(format!("Invalid netNode: {}", s)),
        }
    }
}

impl FromStr for Exposure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXPOSED" => Ok(Exposure::Exposed),
            "COVERED_PRIMARY" => Ok(Exposure::CoveredPrimary),
            "COVERED_SECONDARY" => Ok(Exposure::CoveredSecondary),
            "COVERED" => Ok(Exposure::Covered),
            _ => Err(format!("Invalid exposure: {}", s)),
        }
    }
}

impl FromStr for MountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SMT" => MountType::Smt,
            "THMT" | "THT" => MountType::Tht,
            _ => MountType::Other,
        })
    }
}
