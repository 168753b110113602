use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlaybackError {
    #[error("not enough points to animate the curve: {found} found, at least 2 needed")]
    InsufficientPoints {
        found: usize
    },

    #[error("speed multiplier must be finite and positive, got {value}")]
    InvalidSpeedMultiplier {
        value: f64
    }
}
