use thiserror::Error;

/// Errors produced while parsing foreign representations into skywatch types.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid bounding box: expected 4 coordinates, got {0}")]
    BoundingBoxArity(usize),

    #[error("invalid coordinate {value:?}: {reason}")]
    InvalidCoordinate { value: String, reason: String },
}

/// Result alias for type-level parsing.
pub type TypeResult<T> = Result<T, TypeError>;
