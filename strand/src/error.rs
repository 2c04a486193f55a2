use thiserror::Error;

/// Errors surfaced at operation boundaries. All are synchronous logic
/// errors; a failed operation leaves the path untouched.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StrandError {
    #[error("invalid point format at index {index}: expected [x, y] or a vertex object")]
    InvalidPointFormat { index: usize },

    #[error("path has {got} points, fewer than the configured minimum {min}")]
    TooFewPoints { got: u32, min: u32 },

    #[error("path already has the configured maximum of {max} points")]
    TooManyPoints { max: u32 },

    #[error("cannot close a path with {got} points, at least 3 required")]
    InsufficientPoints { got: u32 },

    #[error("cannot add points to a closed path")]
    PathClosed,

    #[error("malformed result: {reason}")]
    MalformedResult { reason: String },
}

impl StrandError {
    /// Stable machine-readable code, used by the wasm error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            StrandError::InvalidPointFormat { .. } => "invalid_point_format",
            StrandError::TooFewPoints { .. } => "too_few_points",
            StrandError::TooManyPoints { .. } => "too_many_points",
            StrandError::InsufficientPoints { .. } => "insufficient_points",
            StrandError::PathClosed => "path_closed",
            StrandError::MalformedResult { .. } => "malformed_result",
        }
    }
}
