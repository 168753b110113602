use chrono::{
    DateTime,
    Utc
};
use tracing::{
    debug,
    info,
    warn
};

use crate::math::curve::curve::Curve;
use crate::playback::playbackerror::PlaybackError;
use crate::playback::playbackstate::{
    PlaybackRun,
    PlaybackState
};
use crate::vehicle::vehiclemodel::VehicleModel;

/// Engine temperature reported while a curve drives the car (°C at standstill).
const PLAYBACK_BASE_TEMP: f64 = 70.0;

/// Temperature rise per km/h while a curve drives the car.
const PLAYBACK_TEMP_PER_KMH: f64 = 0.1;

/// Drives a vehicle's speed from an animation curve over wall-clock time.
///
/// The controller owns neither the curve nor the vehicle: both are borrowed
/// per call, and the run is released either when the curve end is reached or
/// on [`PlaybackController::stop`].
#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    state: PlaybackState,
    progress: f64
}

impl PlaybackController {
    pub fn new() -> PlaybackController {
        PlaybackController::default()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Curve fraction reached by the last tick.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Begins a run at `now` lasting `curve duration / speed_multiplier`.
    /// A run already in progress is replaced.
    ///
    /// No vehicle is taken here: the run only writes the vehicle from
    /// [`PlaybackController::tick`], which borrows it for that one call, so
    /// the session keeps ownership of the car between ticks.
    pub fn start<C: Curve>(&mut self,
                           curve: &C,
                           speed_multiplier: f64,
                           now: DateTime<Utc>) -> Result<(), PlaybackError> {
        let curve_duration = match curve.max_x() {
            Some(duration) if curve.knot_count() >= 2 => duration,
            _ => {
                warn!(points = curve.knot_count(), "refusing to animate curve");
                return Err(PlaybackError::InsufficientPoints { found: curve.knot_count() });
            }
        };
        if !speed_multiplier.is_finite() || speed_multiplier <= 0.0 {
            warn!(speed_multiplier, "refusing speed multiplier");
            return Err(PlaybackError::InvalidSpeedMultiplier { value: speed_multiplier });
        }
        let run = PlaybackRun::new(now, curve_duration / speed_multiplier);
        self.state = PlaybackState::Running(run);
        self.progress = 0.0;
        info!(start = %run.start_time(), duration_ms = run.duration_ms(), speed_multiplier, "playback started");
        Ok(())
    }

    /// Samples the curve at `now` and writes speed, temperature and fuel into
    /// `vehicle`. Returns whether the run is still active afterwards.
    pub fn tick<C: Curve>(&mut self,
                          curve: &C,
                          vehicle: &mut VehicleModel,
                          now: DateTime<Utc>) -> bool {
        let PlaybackState::Running(run) = self.state else {
            return false;
        };
        let curve_duration = match curve.max_x() {
            Some(duration) if curve.knot_count() >= 2 => duration,
            _ => {
                warn!(points = curve.knot_count(), "curve lost its points during playback");
                self.stop();
                return false;
            }
        };

        let t = run.progress(now);
        let speed = curve.value(t * curve_duration);
        let state = vehicle.state_mut();
        state.speed = speed;
        state.engine_temp = PLAYBACK_BASE_TEMP + PLAYBACK_TEMP_PER_KMH * speed;
        state.fuel_level = (state.fuel_level - state.throttle * state.fuel_consumption_rate).max(0.0);
        self.progress = t;
        debug!(t, speed, "playback sample");

        if t < 1.0 {
            true
        } else {
            self.state = PlaybackState::Idle;
            info!("playback finished");
            false
        }
    }

    /// Ends the run early. Returns whether a run was active.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = PlaybackState::Idle;
        info!(progress = self.progress, "playback stopped");
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeDelta;

    use crate::math::curve::axisrange::AxisRange;
    use crate::math::curve::keyframe::animationcurve::AnimationCurve;
    use crate::vehicle::vehicleparams::VehicleParams;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn ms(value: i64) -> TimeDelta {
        TimeDelta::milliseconds(value)
    }

    fn ramp() -> AnimationCurve {
        let mut curve = AnimationCurve::new(AxisRange::new(0.0, 10000.0), AxisRange::new(0.0, 120.0));
        curve.add_point(0.0, 0.0);
        curve.add_point(1000.0, 100.0);
        curve
    }

    fn car() -> VehicleModel {
        VehicleModel::new(VehicleParams::default())
    }

    #[test]
    fn refuses_curve_with_one_point() {
        let mut curve = AnimationCurve::new(AxisRange::new(0.0, 10000.0), AxisRange::new(0.0, 120.0));
        curve.add_point(500.0, 30.0);
        let mut controller = PlaybackController::new();
        let result = controller.start(&curve, 1.0, t0());
        assert_eq!(result, Err(PlaybackError::InsufficientPoints { found: 1 }));
        assert_eq!(controller.state(), &PlaybackState::Idle);
        assert!(!controller.is_running());
    }

    #[test]
    fn runs_to_completion_and_unlocks() {
        let curve = ramp();
        let mut vehicle = car();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 1.0, t0()).unwrap();
        assert!(controller.is_running());

        assert!(controller.tick(&curve, &mut vehicle, t0() + ms(500)));
        assert_abs_diff_eq!(vehicle.state().speed, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vehicle.state().engine_temp, 75.0, epsilon = 1e-9);
        assert_eq!(controller.progress(), 0.5);

        assert!(!controller.tick(&curve, &mut vehicle, t0() + ms(1000)));
        assert_eq!(vehicle.state().speed, 100.0);
        assert_abs_diff_eq!(vehicle.state().engine_temp, 80.0, epsilon = 1e-9);
        assert!(!controller.is_running());
    }

    #[test]
    fn late_tick_clamps_to_curve_end() {
        let curve = ramp();
        let mut vehicle = car();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 1.0, t0()).unwrap();
        assert!(!controller.tick(&curve, &mut vehicle, t0() + ms(5000)));
        assert_eq!(vehicle.state().speed, 100.0);
        assert_eq!(controller.progress(), 1.0);
    }

    #[test]
    fn speed_multiplier_shortens_the_run() {
        let curve = ramp();
        let mut vehicle = car();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 2.0, t0()).unwrap();
        assert_eq!(controller.state(), &PlaybackState::Running(PlaybackRun::new(t0(), 500.0)));
        controller.tick(&curve, &mut vehicle, t0() + ms(250));
        assert_abs_diff_eq!(vehicle.state().speed, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn fast_multiplier_finishes_early() {
        let curve = ramp();
        let mut vehicle = car();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 4.0, t0()).unwrap();
        assert_eq!(controller.state(), &PlaybackState::Running(PlaybackRun::new(t0(), 250.0)));
        assert!(!controller.tick(&curve, &mut vehicle, t0() + ms(250)));
        assert_eq!(controller.progress(), 1.0);
        assert_eq!(vehicle.state().speed, 100.0);
    }

    #[test]
    fn slow_multiplier_stretches_the_run() {
        let curve = ramp();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 0.5, t0()).unwrap();
        assert_eq!(controller.state(), &PlaybackState::Running(PlaybackRun::new(t0(), 2000.0)));
    }

    #[test]
    fn refuses_non_positive_or_non_finite_multiplier() {
        let curve = ramp();
        let mut controller = PlaybackController::new();
        assert_eq!(
            controller.start(&curve, 0.0, t0()),
            Err(PlaybackError::InvalidSpeedMultiplier { value: 0.0 })
        );
        assert_eq!(
            controller.start(&curve, -1.0, t0()),
            Err(PlaybackError::InvalidSpeedMultiplier { value: -1.0 })
        );
        assert!(controller.start(&curve, f64::NAN, t0()).is_err());
        assert!(controller.start(&curve, f64::INFINITY, t0()).is_err());
        assert!(!controller.is_running());
    }

    #[test]
    fn fuel_drains_with_locked_throttle() {
        let curve = ramp();
        let mut state = *car().state();
        state.throttle = 0.5;
        state.fuel_consumption_rate = 0.01;
        state.fuel_level = 10.0;
        let mut vehicle = VehicleModel::from_state(VehicleParams::default(), state);
        let mut controller = PlaybackController::new();
        controller.start(&curve, 1.0, t0()).unwrap();
        controller.tick(&curve, &mut vehicle, t0() + ms(10));
        assert_abs_diff_eq!(vehicle.state().fuel_level, 9.995, epsilon = 1e-12);
    }

    #[test]
    fn stop_unlocks_and_freezes_writes() {
        let curve = ramp();
        let mut vehicle = car();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 1.0, t0()).unwrap();
        controller.tick(&curve, &mut vehicle, t0() + ms(200));
        assert!(controller.stop());
        assert!(!controller.is_running());
        assert!(!controller.stop());

        let before = *vehicle.state();
        assert!(!controller.tick(&curve, &mut vehicle, t0() + ms(600)));
        assert_eq!(vehicle.state(), &before);
    }

    #[test]
    fn losing_points_mid_run_stops_playback() {
        let mut curve = ramp();
        let mut vehicle = car();
        let mut controller = PlaybackController::new();
        controller.start(&curve, 1.0, t0()).unwrap();
        curve.remove_point(1);
        let before = *vehicle.state();
        assert!(!controller.tick(&curve, &mut vehicle, t0() + ms(100)));
        assert!(!controller.is_running());
        assert_eq!(vehicle.state(), &before);
    }
}
