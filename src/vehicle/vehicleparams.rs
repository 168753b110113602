use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::axisrange::AxisRange;

/// Fixed configuration of the simulated car.
///
/// `Default` reproduces the stock car; a configuration file may override any
/// subset of the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    /// rev/min
    pub rpm_range: AxisRange,
    /// km/h
    pub speed_range: AxisRange,
    /// °C
    pub engine_temp_range: AxisRange,
    pub initial_engine_temp: f64,
    /// Nm
    pub max_torque: f64,
    /// kW
    pub max_power: f64,
    /// N
    pub brake_force: f64,
    pub drag_coefficient: f64,
    /// m²
    pub frontal_area: f64,
    /// kg/m³
    pub air_density: f64,
    /// kg
    pub mass: f64,
    /// Ratio of gear `i + 1`.
    pub gear_ratios: Vec<f64>,
    pub final_drive_ratio: f64,
    /// m
    pub wheel_radius: f64,
    /// l
    pub tank_capacity: f64,
    pub base_consumption_rate: f64,
    /// Shift up above this speed (km/h).
    pub shift_up_speed: f64,
    /// Shift down below this speed (km/h).
    pub shift_down_speed: f64
}

impl VehicleParams {
    pub fn max_gear(&self) -> u8 {
        u8::try_from(self.gear_ratios.len())
            .unwrap_or(u8::MAX)
            .max(1)
    }

    /// Ratio of `gear` (1-based); an unknown gear falls back to direct drive.
    pub fn gear_ratio(&self, gear: u8) -> f64 {
        usize::from(gear)
            .checked_sub(1)
            .and_then(|i| self.gear_ratios.get(i))
            .copied()
            .unwrap_or(1.0)
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        VehicleParams {
            rpm_range: AxisRange::new(800.0, 6000.0),
            speed_range: AxisRange::new(0.0, 250.0),
            engine_temp_range: AxisRange::new(40.0, 120.0),
            initial_engine_temp: 70.0,
            max_torque: 400.0,
            max_power: 200.0,
            brake_force: 5000.0,
            drag_coefficient: 0.32,
            frontal_area: 2.2,
            air_density: 1.225,
            mass: 1500.0,
            gear_ratios: vec![3.5, 2.8, 2.0, 1.5, 1.0, 0.8],
            final_drive_ratio: 3.42,
            wheel_radius: 0.3,
            tank_capacity: 50.0,
            base_consumption_rate: 0.5,
            shift_up_speed: 20.0,
            shift_down_speed: 10.0
        }
    }
}
