use std::collections::HashSet;

use shamir_math::{FieldElement, Matrix, PrimeField};
use tracing::{debug, info};

use crate::{
    error::{Result, ShamirError},
    polynomial::Polynomial,
    share::{Share, ShareFile},
};

/// Recovers the polynomial through a set of shares by Gauss-Jordan
/// elimination on the augmented Vandermonde system.
#[derive(Clone, Copy, Debug)]
pub struct Reconstructor<'f> {
    field: &'f PrimeField,
}

impl<'f> Reconstructor<'f> {
    pub fn new(field: &'f PrimeField) -> Self {
        Self { field }
    }

    /// The unique polynomial of degree `< n` through `n` shares.
    pub fn reconstruct(&self, shares: &[Share]) -> Result<Polynomial> {
        info!(
            shares = shares.len(),
            modulus = self.field.modulus(),
            "reconstructing polynomial"
        );
        Self::ensure_distinct(shares)?;

        let mut system = self.vandermonde_system(shares)?;
        let rank = system.gauss_jordan_reduce()?;
        debug!(rank, "reduced share system");

        let coefficients = Self::solution(&system, shares.len())?;
        Ok(Polynomial::new(*self.field, coefficients))
    }

    /// The `n x (n + 1)` system `[V | y]` where row `i` of `V` is
    /// `x_i^(n-1), ..., x_i, 1`.
    pub fn vandermonde_system(&self, shares: &[Share]) -> Result<Matrix<'f>> {
        let n = shares.len();
        if n == 0 {
            return Err(ShamirError::NoShares);
        }

        let field = self.field;
        let mut system = Matrix::new(n, n + 1, field)?;
        for (row, share) in shares.iter().enumerate() {
            for col in 0..n - 1 {
                let exponent = (n - 1 - col) as u64;
                system.set(row, col, field.pow(share.x, exponent)?)?;
            }
            system.set(row, n - 1, field.one())?;
            system.set(row, n, share.y)?;
        }
        Ok(system)
    }

    fn ensure_distinct(shares: &[Share]) -> Result<()> {
        if shares.is_empty() {
            return Err(ShamirError::NoShares);
        }
        let mut seen = HashSet::with_capacity(shares.len());
        for share in shares {
            if !seen.insert(share.x) {
                return Err(ShamirError::DuplicateShare { x: share.x });
            }
        }
        Ok(())
    }

    /// Read the last column of a reduced `n x (n + 1)` system.
    ///
    /// Fails unless the left block reduced to the identity: a column that
    /// received no pivot means the shares do not pin down one polynomial.
    fn solution(system: &Matrix<'_>, n: usize) -> Result<Vec<FieldElement>> {
        let field = system.field();
        let mut rank = 0;
        for row in 0..n {
            let mut leading = None;
            for col in 0..n {
                if !field.is_zero(system.get(row, col)?)? {
                    leading = Some(col);
                    break;
                }
            }
            if leading.is_some() {
                rank += 1;
            }
        }
        if rank < n {
            return Err(ShamirError::SingularSystem { rank, expected: n });
        }
        Ok(system.column(n)?)
    }
}

/// Reconstruct the polynomial described by a parsed share file.
pub fn reconstruct(file: &ShareFile) -> Result<Polynomial> {
    Reconstructor::new(&file.field).reconstruct(&file.shares)
}
