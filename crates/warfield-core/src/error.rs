use thiserror::Error;

/// Upper bound on cells per grid. Larger requests are rejected before any
/// allocation is attempted.
pub const MAX_CELLS: usize = 1 << 26;

/// Errors raised before generation starts. Generation itself never fails
/// once a grid has been allocated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("grid of {width}x{height} cells exceeds the limit of {MAX_CELLS} cells")]
    GridTooLarge { width: usize, height: usize },

    #[error("could not allocate storage for {cells} cells")]
    Allocation { cells: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
