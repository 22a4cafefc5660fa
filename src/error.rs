use thiserror::Error;

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A detection that can't be placed on a line. `index` is its position in the caller's input.
    #[error("malformed detection at index {index}: {reason}")]
    MalformedDetection {
        index: usize,
        reason: MalformedReason,
    },

    #[error("line threshold must be a finite, non-negative distance, got {0}")]
    InvalidThreshold(f32),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("box has {0} points, expected at least 4")]
    TooFewPoints(usize),
    #[error("recognized text is empty")]
    EmptyText,
    #[error("box contains a non-finite coordinate")]
    NonFiniteCoordinate,
}
