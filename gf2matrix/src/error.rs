//! Error type shared by every fallible [`crate::GF2Matrix`] operation

use thiserror::Error;

/// Result type for [`crate::GF2Matrix`] operations
pub type Result<T> = std::result::Result<T, GF2MatrixError>;

/// Reasons a matrix operation can be rejected
///
/// A failed operation never modifies the matrix it was called on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GF2MatrixError {
    /// Requested shape has a dimension outside `1..=64`
    #[error("invalid dimensions {rows}x{columns}: rows and columns must be between 1 and 64")]
    InvalidDimension { rows: usize, columns: usize },

    /// A row, column or element index is past the end of the matrix
    #[error("index {index} out of bounds for extent {bound}")]
    IndexOutOfBounds { index: usize, bound: usize },

    /// An entry other than 0 or 1 was supplied
    #[error("invalid entry {value}: entries must be 0 or 1")]
    InvalidValue { value: u64 },

    /// A row or column was supplied with the wrong number of entries
    #[error("invalid length (expected {expected}, got {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    /// Operand shapes are incompatible for the requested operation
    #[error("incompatible dimensions {left:?} and {right:?}")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Operation is only defined for square matrices
    #[error("matrix must be square, got {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },

    /// Matrix has no inverse
    #[error("matrix is not invertible")]
    Singular,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GF2MatrixError::InvalidDimension {
                rows: 65,
                columns: 1
            }
            .to_string(),
            "invalid dimensions 65x1: rows and columns must be between 1 and 64"
        );
        assert_eq!(
            GF2MatrixError::DimensionMismatch {
                left: (2, 3),
                right: (2, 2)
            }
            .to_string(),
            "incompatible dimensions (2, 3) and (2, 2)"
        );
        assert_eq!(
            GF2MatrixError::LengthMismatch {
                expected: 3,
                actual: 4
            }
            .to_string(),
            "invalid length (expected 3, got 4)"
        );
    }
}
