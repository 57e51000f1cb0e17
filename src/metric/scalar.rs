//! Scalar reference SAD kernel.

use crate::metric::SadKernel;

/// Portable scalar SAD kernel.
pub struct ScalarSad;

impl SadKernel for ScalarSad {
    #[inline]
    fn row_sad(a: &[u8], b: &[u8]) -> u64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| u64::from(x.abs_diff(y)))
            .sum()
    }
}
