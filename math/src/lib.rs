//! Exact arithmetic over a prime field and Gauss-Jordan elimination on
//! matrices of its elements.

pub mod error;
pub mod field_element;
pub mod matrix;
pub mod prelude;
pub mod prime_field;

pub use error::{Error, Result};
pub use field_element::FieldElement;
pub use matrix::Matrix;
pub use prime_field::PrimeField;
