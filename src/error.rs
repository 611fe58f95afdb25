use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeIndexError {
    /// An index or bounding region was requested over zero points.
    #[error("Cannot build from an empty set of points.")]
    EmptyInput,

    /// Points (or a query region) with differing numbers of coordinates were mixed.
    #[error("Expected {expected} dimensions, got {found}.")]
    DimensionMismatch { expected: usize, found: usize },

    /// A coordinate that cannot be ordered (NaN).
    #[error("Point {index} has an unordered coordinate on axis {axis}.")]
    InvalidCoordinate { index: usize, axis: usize },

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, RangeIndexError>;
