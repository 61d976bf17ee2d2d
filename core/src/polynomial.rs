use std::fmt;

use serde::Serialize;
use shamir_math::{error::FieldError, FieldElement, PrimeField};

/// A polynomial over a prime field, coefficients stored highest degree
/// first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Polynomial {
    #[serde(rename = "modulus")]
    field: PrimeField,
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// `coefficients[0]` multiplies `x^(len - 1)`, the last entry is the
    /// constant term. An empty coefficient list is the zero polynomial.
    pub fn new(field: PrimeField, coefficients: Vec<FieldElement>) -> Self {
        Self {
            field,
            coefficients,
        }
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn coefficients(&self) -> &[FieldElement] {
        &self.coefficients
    }

    /// Number of coefficients minus one. Leading zeros are not stripped, so
    /// this is the degree bound the polynomial was built with.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The constant term, which is the shared secret.
    pub fn secret(&self) -> FieldElement {
        self.coefficients
            .last()
            .copied()
            .unwrap_or(FieldElement::ZERO)
    }

    /// Evaluate at `x` using Horner's method.
    pub fn evaluate(&self, x: FieldElement) -> Result<FieldElement, FieldError> {
        self.coefficients
            .iter()
            .try_fold(self.field.zero(), |acc, &coeff| {
                self.field.add(self.field.multiply(acc, x)?, coeff)
            })
    }
}

/// `P(x) = c_kx^k + ... + c_1x^1 + c_0`
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "P(x) = ")?;
        let Some((constant, terms)) = self.coefficients.split_last() else {
            return write!(f, "0");
        };
        let degree = terms.len();
        for (i, coeff) in terms.iter().enumerate() {
            write!(f, "{coeff}x^{} + ", degree - i)?;
        }
        write!(f, "{constant}")
    }
}
