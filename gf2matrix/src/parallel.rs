use crate::error::Result;
use crate::matrix::GF2Matrix;

use rayon::prelude::*;

/// Batch operations that run independent matrices on the rayon thread pool
///
/// Elimination on a single matrix is inherently sequential, since each pivot depends on the row
/// chosen for the previous one, so the work is split across matrices rather than within one.
pub trait ParallelMatrixOps {
    /// Ranks of every matrix, in order
    fn par_ranks(&self) -> Vec<usize>;

    /// Multiplies every matrix on the right by `rhs`, failing if any product is undefined
    fn par_multiply(&self, rhs: &GF2Matrix) -> Result<Vec<GF2Matrix>>;
}

impl ParallelMatrixOps for [GF2Matrix] {
    fn par_ranks(&self) -> Vec<usize> {
        self.par_iter().map(GF2Matrix::rank).collect()
    }

    fn par_multiply(&self, rhs: &GF2Matrix) -> Result<Vec<GF2Matrix>> {
        self.par_iter().map(|m| m.multiply(rhs)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::GF2MatrixError;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn par_ranks_match_sequential() {
        let mut rng = SmallRng::seed_from_u64(1);
        let ms: Vec<GF2Matrix> = (1..=64)
            .map(|n| GF2Matrix::random(&mut rng, n, 65 - n).unwrap())
            .collect();
        let ranks = ms.par_ranks();
        assert_eq!(ranks.len(), ms.len());
        for (m, r) in ms.iter().zip(ranks) {
            assert_eq!(m.rank(), r);
        }
    }

    #[test]
    fn par_multiply() {
        let mut rng = SmallRng::seed_from_u64(2);
        let rhs = GF2Matrix::random(&mut rng, 20, 30).unwrap();
        let ms: Vec<GF2Matrix> = (0..16)
            .map(|_| GF2Matrix::random(&mut rng, 10, 20).unwrap())
            .collect();
        let products = ms.par_multiply(&rhs).unwrap();
        for (m, p) in ms.iter().zip(&products) {
            assert_eq!(&(m * &rhs), p);
        }

        let bad = GF2Matrix::new(3, 3).unwrap();
        assert_eq!(
            ms.par_multiply(&bad),
            Err(GF2MatrixError::DimensionMismatch {
                left: (10, 20),
                right: (3, 3)
            })
        );
    }
}
