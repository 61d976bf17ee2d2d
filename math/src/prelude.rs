pub use crate::{fe, fe_vec};
pub use crate::{
    error::{FieldError, MathError, MatrixError},
    field_element::FieldElement,
    matrix::Matrix,
    prime_field::PrimeField,
};
