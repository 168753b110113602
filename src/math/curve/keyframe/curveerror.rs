use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("curve record has {points} points but {tangents} tangents")]
    TangentCountMismatch {
        points: usize,
        tangents: usize
    }
}
