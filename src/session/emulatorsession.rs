use chrono::{
    DateTime,
    Utc
};
use tracing::warn;

use crate::configuration::Configuration;
use crate::math::curve::keyframe::animationcurve::AnimationCurve;
use crate::playback::playbackcontroller::PlaybackController;
use crate::playback::playbackerror::PlaybackError;
use crate::vehicle::vehiclemodel::VehicleModel;
use crate::vehicle::vehiclestate::VehicleSnapshot;

/// One emulated car together with the curve that can drive it.
///
/// Per tick exactly one writer touches the vehicle: the playback override
/// while a run is active, the manual pedal update otherwise.
#[derive(Debug, Clone)]
pub struct EmulatorSession {
    curve: AnimationCurve,
    vehicle: VehicleModel,
    playback: PlaybackController,
    throttle: f64,
    brake: f64
}

impl EmulatorSession {
    pub fn new(curve: AnimationCurve, vehicle: VehicleModel) -> EmulatorSession {
        EmulatorSession {
            curve,
            vehicle,
            playback: PlaybackController::new(),
            throttle: 0.0,
            brake: 0.0
        }
    }

    pub fn from_configuration(config: &Configuration) -> EmulatorSession {
        let curve = AnimationCurve::new(config.curve().time_range, config.curve().value_range);
        let vehicle = VehicleModel::new(config.vehicle().clone());
        EmulatorSession::new(curve, vehicle)
    }

    pub fn curve(&self) -> &AnimationCurve {
        &self.curve
    }

    pub fn curve_mut(&mut self) -> &mut AnimationCurve {
        &mut self.curve
    }

    pub fn replace_curve(&mut self, curve: AnimationCurve) {
        self.curve = curve;
    }

    pub fn vehicle(&self) -> &VehicleModel {
        &self.vehicle
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn is_input_locked(&self) -> bool {
        self.playback.is_running()
    }

    /// Latest accepted `(throttle, brake)`.
    pub fn inputs(&self) -> (f64, f64) {
        (self.throttle, self.brake)
    }

    /// Stores the pedal positions for the next manual tick. Ignored, and
    /// `false` returned, while a playback run holds the lock.
    pub fn set_inputs(&mut self, throttle: f64, brake: f64) -> bool {
        if self.is_input_locked() {
            warn!(throttle, brake, "manual input ignored during playback");
            return false;
        }
        self.throttle = throttle;
        self.brake = brake;
        true
    }

    pub fn start_playback(&mut self, speed_multiplier: f64, now: DateTime<Utc>) -> Result<(), PlaybackError> {
        self.playback.start(&self.curve, speed_multiplier, now)
    }

    pub fn stop_playback(&mut self) -> bool {
        self.playback.stop()
    }

    pub fn refuel(&mut self) {
        self.vehicle.refuel();
    }

    pub fn set_fuel_level(&mut self, fuel_level: f64) {
        self.vehicle.set_fuel_level(fuel_level);
    }

    /// Advances the session by one scheduling cycle.
    pub fn tick(&mut self, now: DateTime<Utc>) -> VehicleSnapshot {
        if self.playback.is_running() {
            self.playback.tick(&self.curve, &mut self.vehicle, now);
        } else {
            self.vehicle.update(self.throttle, self.brake);
        }
        self.vehicle.snapshot()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn session() -> EmulatorSession {
        let mut session = EmulatorSession::from_configuration(&Configuration::default());
        session.curve_mut().add_point(0.0, 0.0);
        session.curve_mut().add_point(1000.0, 100.0);
        session
    }

    #[test]
    fn manual_ticks_use_stored_inputs() {
        let mut session = session();
        assert!(session.set_inputs(0.0, 0.6));
        let snapshot = session.tick(t0());
        assert_abs_diff_eq!(snapshot.engine_temp, 69.97, epsilon = 1e-12);
        assert_eq!(session.vehicle().state().brake, 0.6);
    }

    #[test]
    fn playback_locks_manual_input() {
        let mut session = session();
        session.set_inputs(0.3, 0.0);
        session.start_playback(1.0, t0()).unwrap();
        assert!(session.is_input_locked());
        assert!(!session.set_inputs(1.0, 1.0));
        assert_eq!(session.inputs(), (0.3, 0.0));

        let snapshot = session.tick(t0() + TimeDelta::milliseconds(500));
        assert_abs_diff_eq!(snapshot.speed, 50.0, epsilon = 1e-9);
        // the manual path would have left the car at standstill
        assert_eq!(session.vehicle().state().throttle, 0.0);
    }

    #[test]
    fn manual_control_resumes_after_run() {
        let mut session = session();
        session.start_playback(1.0, t0()).unwrap();
        let snapshot = session.tick(t0() + TimeDelta::milliseconds(1200));
        assert_eq!(snapshot.speed, 100.0);
        assert!(!session.is_input_locked());
        assert!(session.set_inputs(0.0, 1.0));

        let snapshot = session.tick(t0() + TimeDelta::milliseconds(1210));
        assert!(snapshot.speed < 100.0);
    }

    #[test]
    fn stop_releases_lock_before_next_tick() {
        let mut session = session();
        session.start_playback(1.0, t0()).unwrap();
        session.tick(t0() + TimeDelta::milliseconds(100));
        assert!(session.stop_playback());
        assert!(session.set_inputs(0.0, 0.5));
        session.tick(t0() + TimeDelta::milliseconds(110));
        assert_eq!(session.vehicle().state().brake, 0.5);
    }

    #[test]
    fn start_needs_two_points() {
        let mut session = EmulatorSession::from_configuration(&Configuration::default());
        let result = session.start_playback(1.0, t0());
        assert_eq!(result, Err(PlaybackError::InsufficientPoints { found: 0 }));
        assert!(!session.is_input_locked());
    }
}
