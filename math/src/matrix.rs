use crate::{
    error::{MatrixError, Result},
    field_element::FieldElement,
    prime_field::PrimeField,
};

/// A dense, rectangular matrix of elements of one [`PrimeField`].
///
/// Cells start out unset and are filled with [`Matrix::set`]. Arithmetic
/// that reaches an unset cell fails with [`MatrixError::MissingElement`];
/// arithmetic that reaches a value outside the field fails with
/// [`FieldError::OutOfRange`](crate::error::FieldError::OutOfRange).
///
/// The matrix borrows its field, so every matrix built for one reduction
/// shares the same modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<'f> {
    field: &'f PrimeField,
    rows: Vec<Vec<Option<FieldElement>>>,
}

impl<'f> Matrix<'f> {
    /// A `rows` x `cols` matrix with every cell unset.
    pub fn new(
        rows: usize,
        cols: usize,
        field: &'f PrimeField,
    ) -> Result<Self, MatrixError> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            field,
            rows: vec![vec![None; cols]; rows],
        })
    }

    /// A fully populated matrix from rows of elements.
    pub fn from_rows(
        rows: Vec<Vec<FieldElement>>,
        field: &'f PrimeField,
    ) -> Result<Self, MatrixError> {
        let cols = Self::ensure_rectangular_rows(&rows)?;
        if cols == 0 {
            return Err(MatrixError::InvalidDimensions {
                rows: rows.len(),
                cols,
            });
        }
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Ok(Self { field, rows })
    }

    #[inline]
    pub fn field(&self) -> &'f PrimeField {
        self.field
    }

    /// Number of rows, always positive.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, always positive.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    /// (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<FieldElement, MatrixError> {
        self.check_index(row, col)?;
        self.rows[row][col].ok_or(MatrixError::MissingElement { row, col })
    }

    /// Store `value` at `(row, col)`. The value is not checked against the
    /// field here; that happens when arithmetic consumes it.
    pub fn set(
        &mut self,
        row: usize,
        col: usize,
        value: FieldElement,
    ) -> Result<(), MatrixError> {
        self.check_index(row, col)?;
        self.rows[row][col] = Some(value);
        Ok(())
    }

    /// Entries of column `col`, top to bottom.
    pub fn column(&self, col: usize) -> Result<Vec<FieldElement>, MatrixError> {
        (0..self.row_count()).map(|row| self.get(row, col)).collect()
    }

    /// Exchange two rows. Unset cells travel with their row.
    pub fn swap_rows(&mut self, row0: usize, row1: usize) -> Result<(), MatrixError> {
        self.check_row(row0)?;
        self.check_row(row1)?;
        self.rows.swap(row0, row1);
        Ok(())
    }

    /// `row *= factor`
    pub fn multiply_row(&mut self, row: usize, factor: FieldElement) -> Result<()> {
        self.ensure_row_populated(row)?;
        let field = self.field;
        for col in 0..self.column_count() {
            let product = field.multiply(self.get(row, col)?, factor)?;
            self.rows[row][col] = Some(product);
        }
        Ok(())
    }

    /// `dest += src * factor`
    pub fn add_rows(
        &mut self,
        src: usize,
        dest: usize,
        factor: FieldElement,
    ) -> Result<()> {
        self.ensure_row_populated(src)?;
        self.ensure_row_populated(dest)?;
        let field = self.field;
        for col in 0..self.column_count() {
            let scaled = field.multiply(self.get(src, col)?, factor)?;
            let sum = field.add(self.get(dest, col)?, scaled)?;
            self.rows[dest][col] = Some(sum);
        }
        Ok(())
    }

    /// `self * other` over this matrix's field.
    pub fn matrix_multiply(&self, other: &Matrix<'_>) -> Result<Matrix<'f>> {
        if self.column_count() != other.row_count() {
            return Err(MatrixError::DimensionMismatch {
                left_cols: self.column_count(),
                right_rows: other.row_count(),
            }
            .into());
        }

        let field = self.field;
        let mut product =
            Matrix::new(self.row_count(), other.column_count(), field)?;
        for i in 0..self.row_count() {
            for j in 0..other.column_count() {
                let mut sum = field.zero();
                for k in 0..self.column_count() {
                    let term = field.multiply(self.get(i, k)?, other.get(k, j)?)?;
                    sum = field.add(term, sum)?;
                }
                product.rows[i][j] = Some(sum);
            }
        }
        Ok(product)
    }

    /// Reduce the matrix in place to reduced row-echelon form and return its
    /// rank.
    ///
    /// Pivots are the first nonzero entry found scanning down from the
    /// current pivot row; there is no notion of a "larger" pivot in a prime
    /// field. A column with no nonzero entry at or below the current pivot
    /// row gets no pivot and the scan moves on to the next column, so a
    /// rank-deficient system yields a rank below `row_count` instead of a
    /// bogus identity block.
    ///
    /// Every cell must be set before the call; an unset cell is reported
    /// before anything is mutated. A failed inversion aborts the reduction
    /// and leaves the matrix partially reduced.
    pub fn gauss_jordan_reduce(&mut self) -> Result<usize> {
        self.ensure_populated()?;
        let field = self.field;
        let (rows, cols) = self.shape();
        let mut pivot_cols = Vec::with_capacity(rows.min(cols));

        for col in 0..cols {
            let pivot_row = pivot_cols.len();
            if pivot_row == rows {
                break;
            }
            let Some(found) = self.find_pivot(col, pivot_row)? else {
                continue;
            };
            self.swap_rows(pivot_row, found)?;

            let inverse = field.multiplicative_inverse(self.get(pivot_row, col)?)?;
            self.multiply_row(pivot_row, inverse)?;

            for row in pivot_row + 1..rows {
                self.eliminate(pivot_row, row, col)?;
            }
            pivot_cols.push(col);
        }

        for (pivot_row, &col) in pivot_cols.iter().enumerate().rev() {
            for row in (0..pivot_row).rev() {
                self.eliminate(pivot_row, row, col)?;
            }
        }

        Ok(pivot_cols.len())
    }

    /// Clear `(row, col)` using the normalized pivot row.
    fn eliminate(&mut self, pivot_row: usize, row: usize, col: usize) -> Result<()> {
        let field = self.field;
        let entry = self.get(row, col)?;
        if !field.is_zero(entry)? {
            self.add_rows(pivot_row, row, field.negate(entry)?)?;
        }
        Ok(())
    }

    fn find_pivot(&self, col: usize, start: usize) -> Result<Option<usize>> {
        for row in start..self.row_count() {
            if !self.field.is_zero(self.get(row, col)?)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn ensure_populated(&self) -> Result<(), MatrixError> {
        (0..self.row_count()).try_for_each(|row| self.ensure_row_populated(row))
    }

    fn ensure_row_populated(&self, row: usize) -> Result<(), MatrixError> {
        self.check_row(row)?;
        match self.rows[row].iter().position(Option::is_none) {
            Some(col) => Err(MatrixError::MissingElement { row, col }),
            None => Ok(()),
        }
    }

    fn check_row(&self, row: usize) -> Result<(), MatrixError> {
        self.check_index(row, 0)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(())
    }

    fn ensure_rectangular_rows(
        rows: &[Vec<FieldElement>],
    ) -> Result<usize, MatrixError> {
        if let Some((first, rest)) = rows.split_first() {
            let expected = first.len();
            for (offset, row) in rest.iter().enumerate() {
                if row.len() != expected {
                    return Err(MatrixError::Ragged {
                        row: offset + 1,
                        expected,
                        found: row.len(),
                    });
                }
            }
            Ok(expected)
        } else {
            Ok(0)
        }
    }
}
