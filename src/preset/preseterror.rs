use thiserror::Error;

use crate::math::curve::keyframe::curveerror::CurveError;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset i/o failed: {0}")]
    IOError(#[from] std::io::Error),

    #[error("invalid preset json: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("preset '{0}' not found")]
    NameNotFoundError(String),

    #[error(transparent)]
    Curve(#[from] CurveError)
}
