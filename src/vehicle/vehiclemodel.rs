use std::f64::consts::PI;

use tracing::debug;

use crate::vehicle::gearposition::GearPosition;
use crate::vehicle::vehicleparams::VehicleParams;
use crate::vehicle::vehiclestate::{
    VehicleSnapshot,
    VehicleState
};

/// Point-mass car with a half-sine torque curve and automatic gearbox.
///
/// Every quantity is saturated into its band on each update; nothing here
/// ever fails.
#[derive(Debug, Clone)]
pub struct VehicleModel {
    params: VehicleParams,
    state: VehicleState
}

impl VehicleModel {
    /// Engine idling at standstill in first gear with a full tank.
    pub fn new(params: VehicleParams) -> VehicleModel {
        let speed = params.speed_range.min();
        let state = VehicleState {
            rpm: params.rpm_range.min(),
            speed,
            throttle: 0.0,
            brake: 0.0,
            gear: 1,
            gear_position: GearPosition::derive(speed, 0.0, 0.0),
            engine_temp: params.engine_temp_range.clamp(params.initial_engine_temp),
            fuel_level: params.tank_capacity,
            fuel_consumption_rate: 0.0
        };
        VehicleModel { params, state }
    }

    /// Seeds the model with `state`, saturated into the configured bands.
    pub fn from_state(params: VehicleParams, state: VehicleState) -> VehicleModel {
        let state = VehicleState {
            rpm: params.rpm_range.clamp(state.rpm),
            speed: params.speed_range.clamp(state.speed),
            throttle: state.throttle.clamp(-1.0, 1.0),
            brake: state.brake.clamp(0.0, 1.0),
            gear: state.gear.clamp(1, params.max_gear()),
            gear_position: state.gear_position,
            engine_temp: params.engine_temp_range.clamp(state.engine_temp),
            fuel_level: state.fuel_level.clamp(0.0, params.tank_capacity),
            fuel_consumption_rate: state.fuel_consumption_rate.max(0.0)
        };
        VehicleModel { params, state }
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Write access for the playback override.
    pub(crate) fn state_mut(&mut self) -> &mut VehicleState {
        &mut self.state
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot::from(&self.state)
    }

    /// Advances one tick. The stages read each other's output, so their
    /// order is fixed: rpm, speed, gear, temperature, fuel, selector.
    ///
    /// `brake` is saturated to `[0, 1]`, `throttle` to `[-1, 1]`; negative
    /// throttle only exists to reach [`GearPosition::Reverse`].
    pub fn update(&mut self, throttle: f64, brake: f64) {
        self.state.throttle = throttle.clamp(-1.0, 1.0);
        self.state.brake = brake.clamp(0.0, 1.0);
        self.update_rpm();
        self.update_speed();
        self.update_gear();
        self.update_engine_temp();
        self.update_fuel();
        self.update_gear_position();
    }

    pub fn refuel(&mut self) {
        self.state.fuel_level = self.params.tank_capacity;
    }

    pub fn set_fuel_level(&mut self, fuel_level: f64) {
        self.state.fuel_level = fuel_level.clamp(0.0, self.params.tank_capacity);
        self.update_gear_position();
    }

    /// Half-sine over the rev band: zero at both limits, peak mid-band.
    fn torque(&self) -> f64 {
        let rpm_range = self.params.rpm_range;
        let phase = (self.state.rpm - rpm_range.min()) / rpm_range.span();
        self.params.max_torque * (PI * phase).sin()
    }

    fn update_rpm(&mut self) {
        let reduction = self.params.gear_ratio(self.state.gear)
            * self.params.final_drive_ratio
            * self.params.wheel_radius;
        let rpm = self.state.rpm + self.state.throttle * self.torque() / reduction;
        self.state.rpm = self.params.rpm_range.clamp(rpm);
    }

    fn update_speed(&mut self) {
        let p = &self.params;
        let velocity = self.state.speed / 3.6;
        let power = p.max_power * (self.state.rpm / p.rpm_range.max()) * self.state.throttle;
        // +0.1 m/s keeps the force finite at standstill
        let drive_force = power * 1000.0 / (velocity + 0.1);
        let drag_force = 0.5 * p.drag_coefficient * p.frontal_area * p.air_density * velocity * velocity;
        let brake_force = self.state.brake * p.brake_force;
        let acceleration = (drive_force - drag_force - brake_force) / p.mass;
        self.state.speed = p.speed_range.clamp(self.state.speed + acceleration * 3.6);
    }

    /// One step at most per tick.
    fn update_gear(&mut self) {
        let gear = self.state.gear;
        if self.state.speed > self.params.shift_up_speed && gear < self.params.max_gear() {
            self.state.gear = gear + 1;
            debug!(gear = self.state.gear, speed = self.state.speed, "shifted up");
        } else if self.state.speed < self.params.shift_down_speed && gear > 1 {
            self.state.gear = gear - 1;
            debug!(gear = self.state.gear, speed = self.state.speed, "shifted down");
        }
    }

    fn update_engine_temp(&mut self) {
        let mut temp = self.state.engine_temp;
        if self.state.throttle > 0.0 {
            temp += self.state.throttle * 0.1;
        }
        if self.state.brake > 0.0 {
            temp -= self.state.brake * 0.05;
        }
        self.state.engine_temp = self.params.engine_temp_range.clamp(temp);
    }

    fn update_fuel(&mut self) {
        let rate = self.params.base_consumption_rate
            * (self.state.rpm / 1000.0)
            * (self.state.throttle / 100.0)
            * (1.0 / (f64::from(self.state.gear) + 1.0));
        self.state.fuel_consumption_rate = rate.max(0.0);
        self.state.fuel_level = (self.state.fuel_level - self.state.fuel_consumption_rate).max(0.0);
    }

    fn update_gear_position(&mut self) {
        self.state.gear_position = GearPosition::derive(
            self.state.speed,
            self.state.throttle,
            self.state.brake
        );
    }
}
