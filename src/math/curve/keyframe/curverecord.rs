use serde::{
    Deserialize,
    Serialize
};

/// Control point as written to a preset file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(alias = "x")]
    pub time: f64,
    #[serde(alias = "y")]
    pub value: f64
}

/// Tangent offset as written to a preset file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentRecord {
    #[serde(alias = "x")]
    pub time_offset: f64,
    #[serde(alias = "y")]
    pub value_offset: f64
}

/// Flat persistence shape of an animation curve.
///
/// `tangents[i]` belongs to `points[i]`; the pairing is positional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveRecord {
    pub points: Vec<PointRecord>,
    pub tangents: Vec<TangentRecord>
}

impl CurveRecord {
    pub fn is_aligned(&self) -> bool {
        self.points.len() == self.tangents.len()
    }
}
