use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::info;

use crate::session::emulatorsession::EmulatorSession;
use crate::vehicle::vehiclestate::VehicleSnapshot;

/// Fixed-cadence driver for an [`EmulatorSession`].
///
/// Sleeps between ticks, so it belongs to the outer application loop and
/// is never called from inside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickScheduler {
    interval: Duration
}

impl TickScheduler {
    pub fn new(interval: Duration) -> TickScheduler {
        TickScheduler { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs `ticks` cycles, handing every snapshot to `on_tick`.
    pub fn run<F>(&self, session: &mut EmulatorSession, ticks: usize, mut on_tick: F)
    where
        F: FnMut(&VehicleSnapshot)
    {
        for i in 0..ticks {
            let snapshot = session.tick(Utc::now());
            on_tick(&snapshot);
            if i + 1 < ticks {
                thread::sleep(self.interval);
            }
        }
    }

    /// Ticks until the active playback run finishes or `max_ticks` is hit.
    /// Returns the number of ticks performed.
    pub fn run_playback<F>(&self, session: &mut EmulatorSession, max_ticks: usize, mut on_tick: F) -> usize
    where
        F: FnMut(&VehicleSnapshot)
    {
        let mut ticks = 0;
        while session.playback().is_running() && ticks < max_ticks {
            let snapshot = session.tick(Utc::now());
            on_tick(&snapshot);
            ticks += 1;
            if session.playback().is_running() {
                thread::sleep(self.interval);
            }
        }
        info!(ticks, finished = !session.playback().is_running(), "playback loop ended");
        ticks
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::configuration::Configuration;

    #[test]
    fn runs_requested_number_of_ticks() {
        let mut session = EmulatorSession::from_configuration(&Configuration::default());
        session.set_inputs(0.0, 0.2);
        let scheduler = TickScheduler::new(Duration::ZERO);
        let mut count = 0;
        scheduler.run(&mut session, 3, |_| count += 1);
        assert_eq!(count, 3);
    }

    #[test]
    fn playback_loop_stops_at_curve_end() {
        let mut session = EmulatorSession::from_configuration(&Configuration::default());
        session.curve_mut().add_point(0.0, 0.0);
        session.curve_mut().add_point(10.0, 5.0);
        session.start_playback(2.0, Utc::now()).unwrap();
        let scheduler = TickScheduler::new(Duration::from_millis(1));
        let mut last_speed = f64::NAN;
        let ticks = scheduler.run_playback(&mut session, 10_000, |s| last_speed = s.speed);
        assert!(ticks >= 1);
        assert!(!session.playback().is_running());
        assert_eq!(last_speed, 5.0);
    }

    #[test]
    fn playback_loop_is_a_no_op_when_idle() {
        let mut session = EmulatorSession::from_configuration(&Configuration::default());
        let scheduler = TickScheduler::new(Duration::from_millis(1));
        assert_eq!(scheduler.run_playback(&mut session, 100, |_| {}), 0);
    }
}
