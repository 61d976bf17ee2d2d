use std::num::ParseIntError;

use thiserror::Error;

pub mod field {
    use thiserror::Error;

    use super::ParseFieldElementError;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[non_exhaustive]
    pub enum Error {
        #[error("{value} is not an element of the field of order {modulus}")]
        OutOfRange { value: u64, modulus: u64 },
        #[error("division by zero")]
        DivisionByZero,
        #[error(
            "{value} has no inverse modulo {modulus}: the modulus is not prime"
        )]
        NonInvertible { value: u64, modulus: u64 },
        #[error("modulus must be at least 2, got {0}")]
        InvalidModulus(u64),
        #[error(transparent)]
        Parse(#[from] ParseFieldElementError),
    }
}

pub mod matrix {
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[non_exhaustive]
    pub enum Error {
        #[error("matrix dimensions must be positive, got {rows}x{cols}")]
        InvalidDimensions { rows: usize, cols: usize },
        #[error("matrix is ragged: row {row} has {found} columns but expected {expected}")]
        Ragged {
            row: usize,
            expected: usize,
            found: usize,
        },
        #[error("index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
        IndexOutOfBounds {
            row: usize,
            col: usize,
            rows: usize,
            cols: usize,
        },
        #[error("element ({row}, {col}) has not been set")]
        MissingElement { row: usize, col: usize },
        #[error(
            "cannot multiply: left operand has {left_cols} columns but right operand has {right_rows} rows"
        )]
        DimensionMismatch { left_cols: usize, right_rows: usize },
    }
}

pub use field::Error as FieldError;
pub use matrix::Error as MatrixError;

/// Common result type used across this crate.
pub type Result<T, E = MathError> = core::result::Result<T, E>;

/// Top-level error type to keep error management simple for users.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum MathError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type Error = MathError;

impl MathError {
    /// `true` when the error means a caller-supplied precondition was wrong
    /// (a composite modulus surfaced by a failed inversion) rather than a
    /// usage mistake such as a bad index or a malformed value.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::Field(FieldError::NonInvertible { .. }))
    }
}

impl From<ParseFieldElementError> for MathError {
    fn from(err: ParseFieldElementError) -> Self {
        Self::Field(FieldError::Parse(err))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseFieldElementError {
    #[error("invalid integer {input:?}")]
    ParseInt {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_invertible_is_a_precondition_violation() {
        let composite: MathError = FieldError::NonInvertible {
            value: 2,
            modulus: 4,
        }
        .into();
        assert!(composite.is_precondition_violation());

        let zero: MathError = FieldError::DivisionByZero.into();
        assert!(!zero.is_precondition_violation());

        let index: MathError = MatrixError::IndexOutOfBounds {
            row: 3,
            col: 0,
            rows: 2,
            cols: 2,
        }
        .into();
        assert!(!index.is_precondition_violation());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = FieldError::OutOfRange {
            value: 13,
            modulus: 11,
        };
        assert_eq!(
            err.to_string(),
            "13 is not an element of the field of order 11"
        );

        let err = MatrixError::MissingElement { row: 1, col: 2 };
        assert_eq!(err.to_string(), "element (1, 2) has not been set");
    }
}
