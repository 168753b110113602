use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum GearPosition {
    Park,
    Reverse,
    #[default]
    Neutral,
    Drive
}

impl GearPosition {
    /// Derives the selector position from the current motion and pedals.
    ///
    /// Reverse is only reachable through a negative throttle, a convention
    /// nothing else in the vehicle model produces.
    pub fn derive(speed: f64, throttle: f64, brake: f64) -> GearPosition {
        if speed != 0.0 {
            GearPosition::Drive
        } else if throttle == 0.0 && brake > 0.0 {
            GearPosition::Park
        } else if throttle < 0.0 {
            GearPosition::Reverse
        } else {
            GearPosition::Neutral
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            GearPosition::Park => 'P',
            GearPosition::Reverse => 'R',
            GearPosition::Neutral => 'N',
            GearPosition::Drive => 'D'
        }
    }
}

impl fmt::Display for GearPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
