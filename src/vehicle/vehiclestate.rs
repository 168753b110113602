use serde::{
    Deserialize,
    Serialize
};

use crate::vehicle::gearposition::GearPosition;

/// Mutable drivetrain state, advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub rpm: f64,
    /// km/h
    pub speed: f64,
    pub throttle: f64,
    pub brake: f64,
    /// 1-based
    pub gear: u8,
    pub gear_position: GearPosition,
    /// °C
    pub engine_temp: f64,
    pub fuel_level: f64,
    pub fuel_consumption_rate: f64
}

/// Flat read surface for displays and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    pub rpm: f64,
    pub speed: f64,
    pub gear: u8,
    pub gear_position: GearPosition,
    pub engine_temp: f64,
    pub fuel_level: f64,
    pub fuel_consumption_rate: f64
}

impl From<&VehicleState> for VehicleSnapshot {
    fn from(state: &VehicleState) -> VehicleSnapshot {
        VehicleSnapshot {
            rpm: state.rpm,
            speed: state.speed,
            gear: state.gear,
            gear_position: state.gear_position,
            engine_temp: state.engine_temp,
            fuel_level: state.fuel_level,
            fuel_consumption_rate: state.fuel_consumption_rate
        }
    }
}
