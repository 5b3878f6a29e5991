//! `gf2matrix` provides [`GF2Matrix`], a dense matrix over the 2-element finite field in which every
//! row is packed into a single 64-bit [`Word`]. Some features include:
//! - checked getting and setting of individual entries, whole rows and whole columns
//! - addition, subtraction and multiplication using bitwise XOR, AND and popcount
//! - transpose using a [recursive block method](https://github.com/dsnet/matrix-transpose)
//! - Gaussian elimination and related methods (e.g. rank and inverse)
//! - with the `parallel` feature, batch rank and multiplication over many matrices using rayon
//!
//! Both dimensions of a matrix are between 1 and [`WORD_BITS`]. Every fallible operation returns a
//! [`GF2MatrixError`] and leaves the matrix unchanged when it fails.
//!
//! ```
//! use gf2matrix::GF2Matrix;
//!
//! let m = GF2Matrix::from_rows(&[[1u8, 0, 1], [0, 1, 1], [1, 1, 0]]).unwrap();
//! assert_eq!(m.rank(), 2);
//! assert!((&m + &m).is_zero());
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::should_implement_trait,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod error;
pub mod matrix;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod word;

pub use error::{GF2MatrixError, Result};
pub use matrix::{GF2Matrix, RowOps};
#[cfg(feature = "parallel")]
pub use parallel::ParallelMatrixOps;
pub use word::{Word, WORD_BITS};
