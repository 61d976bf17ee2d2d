use shamir_math::{error::MathError, FieldElement};
use thiserror::Error;

/// Result type specialized for share handling and reconstruction.
pub type Result<T> = std::result::Result<T, ShamirError>;

/// Errors raised while reading a share file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("share file is empty: expected a modulus on line 1")]
    Empty,
    #[error("line 1: expected a decimal modulus, found {line:?}")]
    Modulus { line: String },
    #[error("line {line_number}: expected a share of the form (x,y), found {line:?}")]
    Share { line_number: usize, line: String },
}

/// Errors that can arise while splitting or reconstructing a secret.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ShamirError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Math(#[from] MathError),
    #[error("failed to read share file")]
    Io(#[from] std::io::Error),
    #[error("at least one share is required")]
    NoShares,
    #[error("two shares have the same x coordinate {x}")]
    DuplicateShare { x: FieldElement },
    #[error("shares do not determine a unique polynomial: rank {rank}, expected {expected}")]
    SingularSystem { rank: usize, expected: usize },
    #[error(
        "Invalid threshold configuration: threshold {threshold} with {participants} participants"
    )]
    InvalidThreshold {
        threshold: usize,
        participants: usize,
    },
}

impl From<shamir_math::error::FieldError> for ShamirError {
    fn from(err: shamir_math::error::FieldError) -> Self {
        Self::Math(err.into())
    }
}

impl From<shamir_math::error::MatrixError> for ShamirError {
    fn from(err: shamir_math::error::MatrixError) -> Self {
        Self::Math(err.into())
    }
}
