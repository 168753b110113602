use thiserror::Error;

use crate::configuration::ConfigurationError;
use crate::playback::playbackerror::PlaybackError;
use crate::preset::preseterror::PresetError;

/// Top-level error of the emulator. Every variant is recoverable.
#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Preset(#[from] PresetError)
}

pub type Result<T> = std::result::Result<T, EmulatorError>;
