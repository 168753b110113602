use chrono::{
    DateTime,
    Utc
};

/// Timing of one playback run, fixed when the run starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRun {
    start_time: DateTime<Utc>,
    duration_ms: f64
}

impl PlaybackRun {
    pub fn new(start_time: DateTime<Utc>, duration_ms: f64) -> PlaybackRun {
        PlaybackRun { start_time, duration_ms }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Wall-clock length of the run: curve duration over the speed multiplier.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Fraction of the run covered at `now`, within `[0, 1]`.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = (now - self.start_time)
            .num_microseconds()
            .map_or(f64::INFINITY, |us| us as f64 / 1_000_000.0);
        // NaN (zero-length run at its start) counts as finished
        (elapsed / (self.duration_ms / 1000.0)).min(1.0).max(0.0)
    }
}

/// While `Running`, manual throttle/brake input is locked out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running(PlaybackRun)
}

impl PlaybackState {
    pub fn is_running(&self) -> bool {
        matches!(self, PlaybackState::Running(_))
    }
}
