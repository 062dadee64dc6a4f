// Wine entity
// Geographic scope, classification, physical attributes, varietal makeup

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BottleSize {
    Piccolo,
    #[serde(rename = "small")]
    Half,
    Standard,
    Magnum,
    Jeroboam,
    Rehoboam,
    Methuselah,
    Salmanazar,
    Balthazar,
    Nebuchadnezzar,
    Melchior,
    Other,
}

impl BottleSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            BottleSize::Piccolo => "piccolo",
            BottleSize::Half => "small",
            BottleSize::Standard => "standard",
            BottleSize::Magnum => "magnum",
            BottleSize::Jeroboam => "jeroboam",
            BottleSize::Rehoboam => "rehoboam",
            BottleSize::Methuselah => "methuselah",
            BottleSize::Salmanazar => "salmanazar",
            BottleSize::Balthazar => "balthazar",
            BottleSize::Nebuchadnezzar => "nebuchadnezzar",
            BottleSize::Melchior => "melchior",
            BottleSize::Other => "other",
        }
    }
}

impl From<&str> for BottleSize {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "piccolo" => BottleSize::Piccolo,
            "small" => BottleSize::Half,
            "standard" => BottleSize::Standard,
            "magnum" => BottleSize::Magnum,
            "jeroboam" => BottleSize::Jeroboam,
            "rehoboam" => BottleSize::Rehoboam,
            "methuselah" => BottleSize::Methuselah,
            "salmanazar" => BottleSize::Salmanazar,
            "balthazar" => BottleSize::Balthazar,
            "nebuchadnezzar" => BottleSize::Nebuchadnezzar,
            "melchior" => BottleSize::Melchior,
            _ => BottleSize::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosureType {
    Cork,
    Synthetic,
    #[serde(rename = "screw cap")]
    ScrewCap,
    #[serde(rename = "crown cap")]
    CrownCap,
    Other,
}

impl ClosureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosureType::Cork => "cork",
            ClosureType::Synthetic => "synthetic",
            ClosureType::ScrewCap => "screw cap",
            ClosureType::CrownCap => "crown cap",
            ClosureType::Other => "other",
        }
    }
}

impl From<&str> for ClosureType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cork" => ClosureType::Cork,
            "synthetic" => ClosureType::Synthetic,
            "screw cap" => ClosureType::ScrewCap,
            "crown cap" => ClosureType::CrownCap,
            _ => ClosureType::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wine {
    pub id: Uuid,
    pub producer: String,
    pub label: String,
    pub vintage: i32,
    pub country_id: Uuid,
    pub region_id: Uuid,
    pub subregion_id: Uuid,
    pub classification_id: Option<Uuid>,
    pub bottle_size: BottleSize,
    pub closure_type: ClosureType,
    pub abv: Option<f64>,
}

/// One row of the wine/varietal association, with the blend percentage
/// this varietal contributes to the wine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarietalShare {
    pub varietal_id: Uuid,
    pub blend_pct: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WinePayload {
    pub producer: String,
    pub label: String,
    pub vintage: i32,
    pub country_id: Uuid,
    pub region_id: Uuid,
    pub subregion_id: Uuid,
    pub classification_id: Option<Uuid>,
    pub bottle_size: BottleSize,
    pub closure_type: ClosureType,
    pub abv: Option<f64>,
    #[serde(default)]
    pub varietals: Vec<VarietalShare>,
}

/// Wine record plus its varietal makeup, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct WineRead {
    #[serde(flatten)]
    pub wine: Wine,
    pub varietals: Vec<VarietalShare>,
}

/// Conjunctive taxonomy filter used by the cellar lookup map.
/// Absent fields do not constrain the match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WineFilter {
    pub country_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub subregion_id: Option<Uuid>,
    pub varietal_id: Option<Uuid>,
}

impl WineFilter {
    pub fn is_empty(&self) -> bool {
        self.country_id.is_none()
            && self.region_id.is_none()
            && self.subregion_id.is_none()
            && self.varietal_id.is_none()
    }
}
