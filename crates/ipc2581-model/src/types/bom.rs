use std::str::FromStr;

/// BOM (Bill of Materials) section
#[derive(Debug, Clone, PartialEq)]
pub struct Bom {
    pub name: String,
    pub header: BomHeader,
    pub items: Vec<BomItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BomHeader {
    pub assembly: Option<String>,
    pub revision: Option<String>,
    pub affecting: Option<bool>,
    pub step_refs: Vec<String>,
}

/// BomItem represents a part in the bill of materials
#[derive(Debug, Clone, PartialEq)]
pub struct BomItem {
    pub oem_design_number_ref: Option<String>,
    pub quantity: Option<u32>,
    pub pin_count: Option<u32>,
    pub category: Option<BomCategory>,
    pub description: Option<String>,
    pub characteristics: Vec<Characteristics>,
    pub ref_des: Vec<BomRefDes>,
}

/// RefDes placement in BOM
#[derive(Debug, Clone, PartialEq)]
pub struct BomRefDes {
    pub name: String,
    pub package_ref: Option<String>,
    pub populate: bool,
    pub layer_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomCategory {
    Electrical,
    Programmable,
    Mechanical,
    Material,
    Document,
}

/// One characteristics group of a BOM item
#[derive(Debug, Clone, PartialEq)]
pub struct Characteristics {
    pub category: Option<BomCategory>,
    pub textuals: Vec<TextualCharacteristic>,
    pub measured: Vec<MeasuredCharacteristic>,
}

/// Textual characteristic with name/value pairs
#[derive(Debug, Clone, PartialEq)]
pub struct TextualCharacteristic {
    pub definition_source: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredCharacteristic {
    pub definition_source: Option<String>,
    pub name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
}

impl BomItem {
    /// Value of the first textual characteristic named `name`
    pub fn textual(&self, name: &str) -> Option<&str> {
        self.characteristics
            .iter()
            .flat_map(|c| c.textuals.iter())
            .find(|t| t.name.as_deref() == Some(name))
            .and_then(|t| t.value.as_deref())
    }
}

impl FromStr for BomCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ELECTRICAL" => Ok(BomCategory::Electrical),
            "PROGRAMMABLE" => Ok(BomCategory::Programmable),
            "MECHANICAL" => Ok(BomCategory::Mechanical),
            "MATERIAL" => Ok(BomCategory::Material),
            "DOCUMENT" => Ok(BomCategory::Document),
            _ => Err(format!("Unknown BOM category: {}", s)),
        }
    }
}
