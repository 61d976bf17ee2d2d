use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// An integer in `[0, p)` for the [`PrimeField`](crate::prime_field::PrimeField)
/// that produced it.
///
/// The element does not carry its modulus. Values are range checked when a
/// field mints them and again whenever a field consumes them, so an element
/// taken from a field with a larger modulus is rejected rather than silently
/// reduced.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct FieldElement(u64);

/// Simplifies constructing [`FieldElement`]s inside a field.
///
/// Evaluates to `Result<FieldElement, FieldError>`, checking the value
/// against the field's modulus.
///
/// ```
/// use shamir_math::prelude::*;
///
/// let field = PrimeField::new(11).unwrap();
/// let a = fe!(field, 4).unwrap();
/// assert_eq!(a.value(), 4);
/// assert!(fe!(field, 11).is_err());
/// ```
#[macro_export]
macro_rules! fe {
    ($field:expr, $value:expr) => {
        $field.element($value)
    };
}

/// Builds a `Vec<FieldElement>` inside a field, failing on the first value
/// that is out of range.
///
/// ```
/// use shamir_math::prelude::*;
///
/// let field = PrimeField::new(7).unwrap();
/// let v = fe_vec![field; 1, 2, 3].unwrap();
/// assert_eq!(v.len(), 3);
/// ```
#[macro_export]
macro_rules! fe_vec {
    ($field:expr; $($value:expr),* $(,)?) => {
        ::std::vec![$($field.element($value)),*]
            .into_iter()
            .collect::<::core::result::Result<::std::vec::Vec<_>, _>>()
    };
}

impl FieldElement {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Wraps `value` without a range check. Callers inside the crate must
    /// already have reduced it.
    #[inline]
    pub(crate) const fn new_unchecked(value: u64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FieldElement> for u64 {
    fn from(elem: FieldElement) -> Self {
        elem.0
    }
}

impl From<&FieldElement> for u64 {
    fn from(elem: &FieldElement) -> Self {
        elem.0
    }
}

impl From<FieldElement> for u128 {
    fn from(elem: FieldElement) -> Self {
        u128::from(elem.0)
    }
}
