use rand::Rng;
use shamir_math::{FieldElement, PrimeField};
use tracing::debug;

use crate::{
    error::{Result, ShamirError},
    params::validate_threshold_config,
    polynomial::Polynomial,
    share::Share,
};

/// Splits a secret into shares, any `threshold` of which recover it.
#[derive(Clone, Copy, Debug)]
pub struct Dealer<'f> {
    field: &'f PrimeField,
    threshold: usize,
    participants: usize,
}

impl<'f> Dealer<'f> {
    pub fn new(
        field: &'f PrimeField,
        threshold: usize,
        participants: usize,
    ) -> Result<Self> {
        if !validate_threshold_config(threshold, participants, field.modulus()) {
            return Err(ShamirError::InvalidThreshold {
                threshold,
                participants,
            });
        }

        Ok(Self {
            field,
            threshold,
            participants,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    /// Split `secret` into one share per participant, at `x = 1..=n`.
    pub fn split<R: Rng>(
        &self,
        secret: FieldElement,
        rng: &mut R,
    ) -> Result<Vec<Share>> {
        let polynomial = self.sample_polynomial(secret, rng)?;
        self.shares_of(&polynomial)
    }

    /// A random polynomial of degree `threshold - 1` whose constant term is
    /// `secret`.
    pub fn sample_polynomial<R: Rng>(
        &self,
        secret: FieldElement,
        rng: &mut R,
    ) -> Result<Polynomial> {
        let field = self.field;
        let secret = field.element(secret.value())?;
        let coefficients = (1..self.threshold)
            .map(|_| field.element(rng.random_range(0..field.modulus())))
            .chain(std::iter::once(Ok(secret)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Polynomial::new(*field, coefficients))
    }

    /// Evaluate `polynomial` at every participant's `x`.
    pub fn shares_of(&self, polynomial: &Polynomial) -> Result<Vec<Share>> {
        let shares = (1..=self.participants)
            .map(|pid| {
                let x = self.field.element(pid as u64)?;
                Ok(Share::new(x, polynomial.evaluate(x)?))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            threshold = self.threshold,
            participants = self.participants,
            "dealt shares"
        );
        Ok(shares)
    }
}
