//! Arithmetic over the integers modulo a prime.

use serde::Deserialize;
use serde::Serialize;

use crate::error::{FieldError, ParseFieldElementError, Result};
use crate::field_element::FieldElement;

/// The field ℤ_p for a runtime modulus `p`.
///
/// `p` is assumed to be prime and is never tested for primality. A
/// composite modulus is only noticed when an inversion meets an element
/// that shares a factor with it, which fails with
/// [`FieldError::NonInvertible`].
///
/// All products are formed in `u128` before reduction, so any modulus that
/// fits in a `u64` is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PrimeField {
    modulus: u64,
}

impl PrimeField {
    pub fn new(modulus: u64) -> Result<Self, FieldError> {
        if modulus < 2 {
            return Err(FieldError::InvalidModulus(modulus));
        }
        Ok(Self { modulus })
    }

    #[inline]
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Construct an element iff `value` is canonical for this field.
    pub fn element(&self, value: u64) -> Result<FieldElement, FieldError> {
        self.check_value(value)?;
        Ok(FieldElement::new_unchecked(value))
    }

    /// Parse a decimal string into an element. Text that is not a `u64`
    /// fails with [`FieldError::Parse`], a value outside the field with
    /// [`FieldError::OutOfRange`].
    pub fn parse_element(&self, s: &str) -> Result<FieldElement, FieldError> {
        let value: u64 =
            s.parse()
                .map_err(|source| ParseFieldElementError::ParseInt {
                    input: s.to_owned(),
                    source,
                })?;
        self.element(value)
    }

    #[inline]
    pub const fn zero(&self) -> FieldElement {
        FieldElement::ZERO
    }

    #[inline]
    pub const fn one(&self) -> FieldElement {
        FieldElement::ONE
    }

    pub fn equals(
        &self,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<bool, FieldError> {
        Ok(self.check(x)? == self.check(y)?)
    }

    pub fn is_zero(&self, x: FieldElement) -> Result<bool, FieldError> {
        self.equals(x, self.zero())
    }

    pub fn negate(&self, x: FieldElement) -> Result<FieldElement, FieldError> {
        let x = self.check(x)?;
        Ok(FieldElement::new_unchecked((self.modulus - x) % self.modulus))
    }

    pub fn add(
        &self,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<FieldElement, FieldError> {
        let sum = u128::from(self.check(x)?) + u128::from(self.check(y)?);
        Ok(self.reduce_wide(sum))
    }

    pub fn subtract(
        &self,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<FieldElement, FieldError> {
        let x = u128::from(self.check(x)?);
        let y = u128::from(self.check(y)?);
        Ok(self.reduce_wide(x + u128::from(self.modulus) - y))
    }

    pub fn multiply(
        &self,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<FieldElement, FieldError> {
        let product = u128::from(self.check(x)?) * u128::from(self.check(y)?);
        Ok(self.reduce_wide(product))
    }

    /// Inverse of `w` by the extended Euclidean algorithm.
    ///
    /// Fails with [`FieldError::DivisionByZero`] for zero and with
    /// [`FieldError::NonInvertible`] when `gcd(p, w) != 1`, which can only
    /// happen if the modulus is not prime.
    pub fn multiplicative_inverse(
        &self,
        w: FieldElement,
    ) -> Result<FieldElement, FieldError> {
        let w = self.check(w)?;
        if w == 0 {
            return Err(FieldError::DivisionByZero);
        }

        let modulus = i128::from(self.modulus);
        let (mut x, mut y) = (modulus, i128::from(w));
        let (mut a, mut b) = (0i128, 1i128);
        while y != 0 {
            let z = x % y;
            let c = a - x / y * b;
            (x, y, a, b) = (y, z, b, c);
        }

        if x != 1 {
            return Err(FieldError::NonInvertible {
                value: w,
                modulus: self.modulus,
            });
        }
        // |a| <= p here, so the cast back is lossless
        Ok(FieldElement::new_unchecked(a.rem_euclid(modulus) as u64))
    }

    pub fn divide(
        &self,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<FieldElement, FieldError> {
        self.multiply(x, self.multiplicative_inverse(y)?)
    }

    /// `base^exp` by square-and-multiply. `0^0` is `1`.
    pub fn pow(
        &self,
        base: FieldElement,
        mut exp: u64,
    ) -> Result<FieldElement, FieldError> {
        let mut base = self.check(base).map(FieldElement::new_unchecked)?;
        let mut acc = self.reduce_wide(1);
        while exp > 0 {
            if exp & 1 == 1 {
                acc = self.multiply(acc, base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = self.multiply(base, base)?;
            }
        }
        Ok(acc)
    }

    #[inline]
    fn reduce_wide(&self, value: u128) -> FieldElement {
        FieldElement::new_unchecked((value % u128::from(self.modulus)) as u64)
    }

    #[inline]
    fn check(&self, x: FieldElement) -> Result<u64, FieldError> {
        self.check_value(x.value())
    }

    #[inline]
    fn check_value(&self, value: u64) -> Result<u64, FieldError> {
        if value >= self.modulus {
            return Err(FieldError::OutOfRange {
                value,
                modulus: self.modulus,
            });
        }
        Ok(value)
    }
}

impl TryFrom<u64> for PrimeField {
    type Error = FieldError;

    fn try_from(modulus: u64) -> Result<Self, Self::Error> {
        Self::new(modulus)
    }
}

impl From<PrimeField> for u64 {
    fn from(field: PrimeField) -> Self {
        field.modulus
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;

    /// 2^61 - 1, large enough that products overflow a `u64`.
    const P: u64 = 2_305_843_009_213_693_951;
    /// Largest prime below 2^64.
    const BIG_P: u64 = 18_446_744_073_709_551_557;

    fn field() -> PrimeField {
        PrimeField::new(P).unwrap()
    }

    fn fe(value: u64) -> FieldElement {
        field().element(value).unwrap()
    }

    #[proptest]
    fn results_stay_in_range(
        #[strategy(0..P)] x: u64,
        #[strategy(0..P)] y: u64,
    ) {
        let f = field();
        let (x, y) = (fe(x), fe(y));
        prop_assert!(f.add(x, y).unwrap().value() < P);
        prop_assert!(f.subtract(x, y).unwrap().value() < P);
        prop_assert!(f.multiply(x, y).unwrap().value() < P);
        prop_assert!(f.negate(x).unwrap().value() < P);
    }

    #[proptest]
    fn zero_is_neutral_element_for_addition(#[strategy(0..P)] x: u64) {
        let f = field();
        prop_assert_eq!(fe(x), f.add(fe(x), f.zero()).unwrap());
    }

    #[proptest]
    fn one_is_neutral_element_for_multiplication(#[strategy(0..P)] x: u64) {
        let f = field();
        prop_assert_eq!(fe(x), f.multiply(fe(x), f.one()).unwrap());
    }

    #[proptest]
    fn negation_is_additive_inverse(#[strategy(0..P)] x: u64) {
        let f = field();
        let neg = f.negate(fe(x)).unwrap();
        prop_assert!(f.equals(f.add(fe(x), neg).unwrap(), f.zero()).unwrap());
    }

    #[proptest]
    fn subtraction_undoes_addition(
        #[strategy(0..P)] x: u64,
        #[strategy(0..P)] y: u64,
    ) {
        let f = field();
        let sum = f.add(fe(x), fe(y)).unwrap();
        prop_assert_eq!(fe(x), f.subtract(sum, fe(y)).unwrap());
    }

    #[proptest]
    fn multiplication_distributes_over_addition(
        #[strategy(0..P)] a: u64,
        #[strategy(0..P)] b: u64,
        #[strategy(0..P)] c: u64,
    ) {
        let f = field();
        let (a, b, c) = (fe(a), fe(b), fe(c));
        let lhs = f.multiply(a, f.add(b, c).unwrap()).unwrap();
        let rhs = f
            .add(f.multiply(a, b).unwrap(), f.multiply(a, c).unwrap())
            .unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[proptest]
    fn multiplication_with_inverse_gives_identity(#[strategy(1..P)] x: u64) {
        let f = field();
        let inv = f.multiplicative_inverse(fe(x)).unwrap();
        prop_assert_eq!(f.one(), f.multiply(fe(x), inv).unwrap());
    }

    #[proptest]
    fn division_by_self_gives_identity(#[strategy(1..BIG_P)] x: u64) {
        let f = PrimeField::new(BIG_P).unwrap();
        let x = f.element(x).unwrap();
        prop_assert_eq!(f.one(), f.divide(x, x).unwrap());
    }

    #[proptest]
    fn pow_matches_repeated_multiplication(
        #[strategy(0..P)] x: u64,
        #[strategy(0u64..20)] exp: u64,
    ) {
        let f = field();
        let mut expected = f.one();
        for _ in 0..exp {
            expected = f.multiply(expected, fe(x)).unwrap();
        }
        prop_assert_eq!(expected, f.pow(fe(x), exp).unwrap());
    }

    #[proptest]
    fn parsing_canonical_value_round_trips(#[strategy(0..P)] v: u64) {
        prop_assert_eq!(fe(v), field().parse_element(&v.to_string()).unwrap());
    }

    #[proptest]
    fn values_outside_the_field_are_rejected(#[strategy(P..)] v: u64) {
        let f = field();
        prop_assert_eq!(
            f.element(v),
            Err(FieldError::OutOfRange { value: v, modulus: P })
        );
        prop_assert_eq!(
            f.parse_element(&v.to_string()),
            Err(FieldError::OutOfRange { value: v, modulus: P })
        );
    }

    #[test]
    fn wraps_around_the_small_field() {
        let f = PrimeField::new(7).unwrap();
        let e = |v| f.element(v).unwrap();
        assert_eq!(f.add(e(5), e(4)).unwrap(), e(2));
        assert_eq!(f.subtract(e(2), e(5)).unwrap(), e(4));
        assert_eq!(f.multiply(e(3), e(5)).unwrap(), e(1));
        assert_eq!(f.negate(e(0)).unwrap(), e(0));
        assert_eq!(f.negate(e(3)).unwrap(), e(4));
        assert_eq!(f.multiplicative_inverse(e(3)).unwrap(), e(5));
        assert_eq!(f.multiplicative_inverse(e(6)).unwrap(), e(6));
        assert_eq!(f.pow(e(3), 6).unwrap(), e(1));
        assert_eq!(f.pow(e(0), 0).unwrap(), e(1));
    }

    #[test]
    fn largest_u64_prime_does_not_overflow() {
        let f = PrimeField::new(BIG_P).unwrap();
        let max = f.element(BIG_P - 1).unwrap();
        // (-1)^2 = 1, (-1) + (-1) = -2
        assert_eq!(f.multiply(max, max).unwrap(), f.one());
        assert_eq!(f.add(max, max).unwrap().value(), BIG_P - 2);
        assert_eq!(f.multiplicative_inverse(max).unwrap(), max);
    }

    #[test]
    fn inverse_of_zero_is_division_by_zero() {
        let f = field();
        assert_eq!(
            f.multiplicative_inverse(f.zero()),
            Err(FieldError::DivisionByZero)
        );
        assert_eq!(f.divide(f.one(), f.zero()), Err(FieldError::DivisionByZero));
    }

    #[test]
    fn composite_modulus_is_detected_on_inversion() {
        let f = PrimeField::new(15).unwrap();
        let six = f.element(6).unwrap();
        assert_eq!(
            f.multiplicative_inverse(six),
            Err(FieldError::NonInvertible {
                value: 6,
                modulus: 15
            })
        );
        // units of a composite modulus still invert
        let two = f.element(2).unwrap();
        assert_eq!(f.multiplicative_inverse(two).unwrap().value(), 8);
    }

    #[test]
    fn foreign_elements_are_out_of_range() {
        let big = PrimeField::new(11).unwrap();
        let small = PrimeField::new(7).unwrap();
        let nine = big.element(9).unwrap();
        let err = FieldError::OutOfRange {
            value: 9,
            modulus: 7,
        };
        assert_eq!(small.add(nine, small.one()), Err(err.clone()));
        assert_eq!(small.negate(nine), Err(err.clone()));
        assert_eq!(small.multiplicative_inverse(nine), Err(err.clone()));
        assert_eq!(small.equals(small.zero(), nine), Err(err));
    }

    #[test]
    fn modulus_below_two_is_rejected() {
        assert_eq!(PrimeField::new(0), Err(FieldError::InvalidModulus(0)));
        assert_eq!(PrimeField::new(1), Err(FieldError::InvalidModulus(1)));
        assert!(PrimeField::new(2).is_ok());
    }

    #[test]
    fn parse_rejects_garbage() {
        let f = field();
        for input in ["", "-3", "1.5", "0x10", " 4", "18446744073709551616"] {
            assert!(
                matches!(
                    f.parse_element(input),
                    Err(FieldError::Parse(
                        ParseFieldElementError::ParseInt { .. }
                    ))
                ),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn serde_round_trip_validates_modulus() {
        let f = PrimeField::new(11).unwrap();
        assert_eq!(serde_json::to_string(&f).unwrap(), "11");
        assert_eq!(serde_json::from_str::<PrimeField>("11").unwrap(), f);
        assert!(serde_json::from_str::<PrimeField>("1").is_err());
    }
}
