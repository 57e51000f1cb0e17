//! Patch dissimilarity metric.
//!
//! The score is the un-normalized sum of absolute differences (SAD) over all
//! channels and positions of two equally shaped patches. It is never divided
//! by patch area, so scores from clipped edge tiles are not comparable to
//! full tiles; they are only ever compared against candidates of equal shape.

use crate::patch::PatchView;
use crate::util::{FrankenError, FrankenResult};

/// Row kernel for sum-of-absolute-differences accumulation.
pub trait SadKernel {
    /// Returns `sum(|a[i] - b[i]|)` over two equal-length rows.
    fn row_sad(a: &[u8], b: &[u8]) -> u64;
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(not(feature = "simd"))]
pub(crate) use scalar::ScalarSad as DefaultSad;
#[cfg(feature = "simd")]
pub(crate) use simd::SimdSad as DefaultSad;

/// Computes the SAD between two patches, validating shape and channels.
pub fn patch_sad(a: PatchView<'_>, b: PatchView<'_>) -> FrankenResult<u64> {
    if a.channels() != b.channels() {
        return Err(FrankenError::ChannelMismatch {
            expected: a.channels(),
            got: b.channels(),
        });
    }
    if a.shape() != b.shape() {
        return Err(FrankenError::ShapeMismatch {
            expected: a.shape(),
            got: b.shape(),
        });
    }
    Ok(sad_with::<DefaultSad>(a, b))
}

/// SAD over two patches whose shapes are equal by construction.
#[inline]
pub(crate) fn sad_with<K: SadKernel>(a: PatchView<'_>, b: PatchView<'_>) -> u64 {
    debug_assert_eq!(a.shape(), b.shape());
    debug_assert_eq!(a.channels(), b.channels());
    let mut sum = 0u64;
    for (pa, pb) in a.planes().zip(b.planes()) {
        for (ra, rb) in pa.rows().zip(pb.rows()) {
            sum += K::row_sad(ra, rb);
        }
    }
    sum
}
