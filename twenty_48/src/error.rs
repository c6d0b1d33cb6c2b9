use thiserror::Error;

/// A grid that breaks the rectangular invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid rows have unequal length: row {row} has {found} cells, expected {expected}")]
    Malformed {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("{0} is not a tile value (must be a power of two, at least 2)")]
    NotPowerOfTwo(u64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotationError {
    #[error("rotation must be 0, 90, 180 or 270 degrees, got {0}")]
    InvalidAngle(u16),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one row and one column")]
    EmptyBoard,

    #[error("winning value {0} must be a power of two, at least 4")]
    InvalidWinningValue(u64),
}
