use crate::error::{GF2MatrixError, Result};
use crate::word::{self, Word, WORD_BITS};
use log::{debug, trace};
use rand::Rng;
use std::{
    fmt,
    ops::{Add, AddAssign, Index, Mul, Sub, SubAssign},
};

/// A matrix over GF(2) with at most [`WORD_BITS`] rows and columns
///
/// Each row is packed into a single [`Word`], with entry `(i, j)` stored in bit `j` (counting from the least
/// significant bit) of `data[i]`. Bits at positions `>= columns` are padding and are always 0, so two matrices
/// are equal exactly when their shapes and row words are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GF2Matrix {
    /// the number of rows in the matrix, between 1 and [`WORD_BITS`]
    rows: usize,

    /// the number of columns in the matrix, between 1 and [`WORD_BITS`]
    columns: usize,

    /// one [`Word`] per row
    data: Vec<Word>,
}

/// Elementary row operations, used to replay the steps of gaussian elimination on a second object
pub trait RowOps {
    fn add_row(&mut self, from: usize, to: usize);
    fn swap_rows(&mut self, from: usize, to: usize);
}

fn check_dimensions(rows: usize, columns: usize) -> Result<()> {
    if (1..=WORD_BITS).contains(&rows) && (1..=WORD_BITS).contains(&columns) {
        Ok(())
    } else {
        debug!("rejecting matrix shape {}x{}", rows, columns);
        Err(GF2MatrixError::InvalidDimension { rows, columns })
    }
}

#[inline]
fn check_index(index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(GF2MatrixError::IndexOutOfBounds { index, bound })
    }
}

#[inline]
fn check_value(value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(GF2MatrixError::InvalidValue {
            value: u64::from(value),
        }),
    }
}

/// Checks that `values` has exactly `expected` entries, all of them 0 or 1
fn check_entries(values: &[u8], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(GF2MatrixError::LengthMismatch {
            expected,
            actual: values.len(),
        });
    }
    values.iter().try_for_each(|&v| check_value(v).map(|_| ()))
}

impl GF2Matrix {
    /// Creates a `rows` by `columns` matrix with every entry set to 0
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::InvalidDimension`] unless both dimensions are between 1 and [`WORD_BITS`].
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        check_dimensions(rows, columns)?;
        Ok(Self::zeros(rows, columns))
    }

    /// Zero matrix with dimensions that are already known to be valid
    fn zeros(rows: usize, columns: usize) -> Self {
        GF2Matrix {
            rows,
            columns,
            data: vec![0; rows],
        }
    }

    /// Builds a matrix from a function `f` that determines the value of each entry
    ///
    /// # Arguments
    /// * `rows` - the number of rows in the matrix
    /// * `columns` - the number of columns in the matrix
    /// * `f` - a function that takes the row and column indices and returns a boolean value for each entry
    pub fn build(
        rows: usize,
        columns: usize,
        mut f: impl FnMut(usize, usize) -> bool,
    ) -> Result<Self> {
        check_dimensions(rows, columns)?;
        let data = (0..rows)
            .map(|i| word::from_bits((0..columns).map(|j| f(i, j))))
            .collect();
        Ok(GF2Matrix {
            rows,
            columns,
            data,
        })
    }

    /// Creates the `size` by `size` identity matrix
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::InvalidDimension`] unless `size` is between 1 and [`WORD_BITS`].
    pub fn identity(size: usize) -> Result<Self> {
        check_dimensions(size, size)?;
        Ok(GF2Matrix {
            rows: size,
            columns: size,
            data: (0..size).map(|i| 1 << i).collect(),
        })
    }

    /// Creates a matrix from a list of rows of 0/1 entries
    ///
    /// # Errors
    ///
    /// Fails with [`GF2MatrixError::InvalidDimension`] if there are no rows, no columns or more than
    /// [`WORD_BITS`] of either, with [`GF2MatrixError::LengthMismatch`] if the rows have different lengths,
    /// and with [`GF2MatrixError::InvalidValue`] if some entry is not 0 or 1.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        let mut m = Self::new(rows.len(), columns)?;
        for (i, row) in rows.iter().enumerate() {
            m.set_row(i, row.as_ref())?;
        }
        Ok(m)
    }

    /// Creates a matrix with `columns` columns from packed row words
    ///
    /// # Errors
    ///
    /// Fails with [`GF2MatrixError::InvalidValue`] if a word has a bit set at a position `>= columns`.
    pub fn from_words(columns: usize, words: &[Word]) -> Result<Self> {
        check_dimensions(words.len(), columns)?;
        let padding = !word::low_mask(columns);
        if let Some(&w) = words.iter().find(|&&w| w & padding != 0) {
            return Err(GF2MatrixError::InvalidValue { value: w });
        }
        Ok(GF2Matrix {
            rows: words.len(),
            columns,
            data: words.to_vec(),
        })
    }

    /// Creates a `rows` by `columns` matrix with uniformly random entries
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::InvalidDimension`] unless both dimensions are between 1 and [`WORD_BITS`].
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, columns: usize) -> Result<Self> {
        check_dimensions(rows, columns)?;
        let mask = word::low_mask(columns);
        let data = (0..rows).map(|_| mask & rng.random::<Word>()).collect();
        Ok(GF2Matrix {
            rows,
            columns,
            data,
        })
    }

    /// Creates a random invertible matrix by applying random row additions to the identity
    pub fn random_invertible(rng: &mut impl Rng, size: usize) -> Result<Self> {
        let mut m = Self::identity(size)?;
        if size == 1 {
            return Ok(m);
        }

        for _ in 0..10 * size * size {
            let r1 = rng.random_range(0..size);
            let mut r2 = rng.random_range(0..size - 1);
            if r2 >= r1 {
                r2 += 1;
            }
            m.add_row(r1, r2);
        }

        Ok(m)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the shape of the matrix as `(rows, columns)`
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Returns the packed row words, one per row
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.data
    }

    /// Returns the entry at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. See [`GF2Matrix::get`] for a checked version.
    #[inline]
    pub fn bit(&self, row: usize, col: usize) -> bool {
        assert!(col < self.columns, "column {} out of bounds", col);
        word::bit(self.data[row], col)
    }

    /// Sets the entry at `(row, col)` to `b`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. See [`GF2Matrix::set`] for a checked version.
    #[inline]
    pub fn set_bit(&mut self, row: usize, col: usize, b: bool) {
        assert!(col < self.columns, "column {} out of bounds", col);
        word::set_bit(&mut self.data[row], col, b);
    }

    /// Returns the entry at `(row, col)` as 0 or 1
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::IndexOutOfBounds`] if `row >= rows` or `col >= columns`.
    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        check_index(row, self.rows)?;
        check_index(col, self.columns)?;
        Ok(word::bit(self.data[row], col) as u8)
    }

    /// Sets the entry at `(row, col)` to `value`, which must be 0 or 1
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::IndexOutOfBounds`] for an index outside the matrix and
    /// [`GF2MatrixError::InvalidValue`] if `value` is not 0 or 1. The matrix is unchanged on error.
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        check_index(row, self.rows)?;
        check_index(col, self.columns)?;
        let b = check_value(value)?;
        word::set_bit(&mut self.data[row], col, b);
        Ok(())
    }

    /// Returns the packed word of row `i`
    pub fn row_word(&self, i: usize) -> Result<Word> {
        check_index(i, self.rows)?;
        Ok(self.data[i])
    }

    /// Returns column `j` packed into a word, with the entry of row `i` in bit `i`
    pub fn column_word(&self, j: usize) -> Result<Word> {
        check_index(j, self.columns)?;
        Ok(self.gather_column(j))
    }

    #[inline]
    fn gather_column(&self, j: usize) -> Word {
        word::from_bits(self.data.iter().map(|&w| word::bit(w, j)))
    }

    /// Returns row `i` as a vector of `columns` entries
    pub fn get_row(&self, i: usize) -> Result<Vec<u8>> {
        check_index(i, self.rows)?;
        Ok(word::to_entries(self.data[i], self.columns))
    }

    /// Replaces row `i` with `values`
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::IndexOutOfBounds`] if `i >= rows`, [`GF2MatrixError::LengthMismatch`] if
    /// `values` does not have exactly `columns` entries and [`GF2MatrixError::InvalidValue`] if an entry is
    /// not 0 or 1. All checks happen before the row is written.
    pub fn set_row(&mut self, i: usize, values: &[u8]) -> Result<()> {
        check_index(i, self.rows)?;
        check_entries(values, self.columns)?;
        self.data[i] = word::from_bits(values.iter().map(|&v| v == 1));
        Ok(())
    }

    /// Returns column `j` as a vector of `rows` entries
    pub fn get_column(&self, j: usize) -> Result<Vec<u8>> {
        check_index(j, self.columns)?;
        Ok(word::to_entries(self.gather_column(j), self.rows))
    }

    /// Replaces column `j` with `values`, with the same error conditions as [`GF2Matrix::set_row`]
    /// where the expected length is `rows`
    pub fn set_column(&mut self, j: usize, values: &[u8]) -> Result<()> {
        check_index(j, self.columns)?;
        check_entries(values, self.rows)?;
        for (w, &v) in self.data.iter_mut().zip(values) {
            word::set_bit(w, j, v == 1);
        }
        Ok(())
    }

    /// Returns the number of 1s in row `i`
    #[inline]
    pub fn row_weight(&self, i: usize) -> Result<usize> {
        Ok(self.row_word(i)?.count_ones() as usize)
    }

    /// Checks if every entry of the matrix is 0
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&w| w == 0)
    }

    fn mismatch(&self, rhs: &GF2Matrix) -> GF2MatrixError {
        debug!(
            "rejecting operands of shape {:?} and {:?}",
            self.size(),
            rhs.size()
        );
        GF2MatrixError::DimensionMismatch {
            left: self.size(),
            right: rhs.size(),
        }
    }

    /// Returns the sum of two matrices of the same shape, i.e. the entrywise XOR
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::DimensionMismatch`] if the shapes differ.
    pub fn add(&self, rhs: &GF2Matrix) -> Result<GF2Matrix> {
        if self.size() != rhs.size() {
            return Err(self.mismatch(rhs));
        }
        Ok(GF2Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a ^ b).collect(),
        })
    }

    /// Returns the difference of two matrices of the same shape
    ///
    /// Every element of GF(2) is its own additive inverse, so this is the same as [`GF2Matrix::add`].
    #[inline]
    pub fn subtract(&self, rhs: &GF2Matrix) -> Result<GF2Matrix> {
        self.add(rhs)
    }

    /// Returns the matrix product `self * rhs`
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::DimensionMismatch`] unless `self.columns() == rhs.rows()`.
    pub fn multiply(&self, rhs: &GF2Matrix) -> Result<GF2Matrix> {
        if self.columns != rhs.rows {
            return Err(self.mismatch(rhs));
        }
        let rhs_columns: Vec<Word> = (0..rhs.columns).map(|j| rhs.gather_column(j)).collect();
        let data = self
            .data
            .iter()
            .map(|&row| word::from_bits(rhs_columns.iter().map(|&col| word::dot(row, col))))
            .collect();
        Ok(GF2Matrix {
            rows: self.rows,
            columns: rhs.columns,
            data,
        })
    }

    /// Returns a transposed copy of the matrix
    ///
    /// The rows are copied into a square [`WORD_BITS`] by [`WORD_BITS`] block, which is transposed in place
    /// by iteratively swapping the off-diagonal quarters of blocks of half the size until we get down to
    /// block size 1.
    pub fn transposed(&self) -> Self {
        let mut buffer: [Word; WORD_BITS] = [0; WORD_BITS];
        buffer[..self.rows].copy_from_slice(&self.data);

        let mut swap_width = WORD_BITS;
        let mut swap_mask = Word::MAX;
        while swap_width != 1 {
            swap_width >>= 1;

            // picks the low `swap_width` bits of every block of `2 * swap_width` bits
            swap_mask ^= swap_mask << swap_width;

            for block_row in (0..WORD_BITS).step_by(swap_width * 2) {
                for row in block_row..block_row + swap_width {
                    let b0 = buffer[row];
                    let b1 = buffer[row + swap_width];
                    buffer[row] = (b0 & swap_mask) | ((b1 & swap_mask) << swap_width);
                    buffer[row + swap_width] = ((b0 >> swap_width) & swap_mask) | (b1 & !swap_mask);
                }
            }
        }

        GF2Matrix {
            rows: self.columns,
            columns: self.rows,
            data: buffer[..self.columns].to_vec(),
        }
    }

    /// Perform gaussian elimination while also performing matching row operations on `proxy`
    /// and returning a vector of pivot columns
    ///
    /// If `full` is true, each pivot clears its column in the rows above it as well as below, which
    /// leaves the matrix in reduced echelon form. Stops once every row holds a pivot.
    fn gauss_helper(&mut self, full: bool, proxy: &mut impl RowOps) -> Vec<usize> {
        let max_pivots = usize::min(self.rows, self.columns);
        let mut pcols = Vec::with_capacity(max_pivots);

        for pcol in 0..self.columns {
            let row = pcols.len();
            if row == max_pivots {
                break;
            }

            let Some(row1) = (row..self.rows).find(|&i| word::bit(self.data[i], pcol)) else {
                continue;
            };
            trace!("column {}: pivot in row {}, moving to row {}", pcol, row1, row);

            if row != row1 {
                self.swap_rows(row, row1);
                proxy.swap_rows(row, row1);
            }

            let start = if full { 0 } else { row + 1 };
            for i in start..self.rows {
                if i != row && word::bit(self.data[i], pcol) {
                    self.add_row(row, i);
                    proxy.add_row(row, i);
                }
            }

            pcols.push(pcol);
        }

        pcols
    }

    /// Perform gaussian elimination in place, returning the pivot columns
    ///
    /// If `full` is true, then perform full Gauss-Jordan to produce reduced echelon form, otherwise
    /// just return echelon form
    #[inline]
    pub fn gauss(&mut self, full: bool) -> Vec<usize> {
        self.gauss_helper(full, &mut ())
    }

    /// Compute the rank of the matrix using gaussian elimination on a copy of the rows
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().gauss_helper(true, &mut ()).len()
    }

    /// Compute the inverse of an invertible matrix
    ///
    /// # Errors
    ///
    /// Returns [`GF2MatrixError::NotSquare`] for a non-square matrix and [`GF2MatrixError::Singular`] if
    /// the matrix does not have full rank.
    pub fn inverse(&self) -> Result<Self> {
        if self.rows != self.columns {
            return Err(GF2MatrixError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            });
        }
        let mut inv = GF2Matrix::zeros(self.rows, self.columns);
        inv.data = (0..self.rows).map(|i| 1 << i).collect();
        let pcols = self.clone().gauss_helper(true, &mut inv);

        if pcols.len() != self.columns {
            debug!(
                "matrix of size {} has rank {}, no inverse",
                self.columns,
                pcols.len()
            );
            return Err(GF2MatrixError::Singular);
        }

        Ok(inv)
    }
}

/// The 64 by 64 zero matrix, the largest shape a [`GF2Matrix`] can have
impl Default for GF2Matrix {
    fn default() -> Self {
        GF2Matrix::zeros(WORD_BITS, WORD_BITS)
    }
}

impl RowOps for () {
    #[inline]
    fn add_row(&mut self, _: usize, _: usize) {}

    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}
}

impl RowOps for GF2Matrix {
    #[inline]
    fn add_row(&mut self, from: usize, to: usize) {
        let w = self.data[from];
        self.data[to] ^= w;
    }

    #[inline]
    fn swap_rows(&mut self, from: usize, to: usize) {
        self.data.swap(from, to);
    }
}

/// `matrix[(i, j)]` is equivalent to `matrix.bit(i, j) as u8`
impl Index<(usize, usize)> for GF2Matrix {
    type Output = u8;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.bit(index.0, index.1) {
            &1
        } else {
            &0
        }
    }
}

impl fmt::Display for GF2Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.columns {
                write!(f, " {} ", self[(i, j)])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Add for &GF2Matrix {
    type Output = GF2Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        GF2Matrix::add(self, rhs).unwrap_or_else(|e| panic!("Cannot add matrices: {}", e))
    }
}

impl Sub for &GF2Matrix {
    type Output = GF2Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        GF2Matrix::subtract(self, rhs).unwrap_or_else(|e| panic!("Cannot subtract matrices: {}", e))
    }
}

impl Mul for &GF2Matrix {
    type Output = GF2Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        GF2Matrix::multiply(self, rhs).unwrap_or_else(|e| panic!("Cannot multiply matrices: {}", e))
    }
}

/// Adds `rhs` into this matrix in place
impl AddAssign<&GF2Matrix> for GF2Matrix {
    fn add_assign(&mut self, rhs: &GF2Matrix) {
        if self.size() != rhs.size() {
            panic!("Cannot add matrices: {}", self.mismatch(rhs));
        }
        for (a, b) in self.data.iter_mut().zip(&rhs.data) {
            *a ^= b;
        }
    }
}

impl SubAssign<&GF2Matrix> for GF2Matrix {
    fn sub_assign(&mut self, rhs: &GF2Matrix) {
        *self += rhs;
    }
}
