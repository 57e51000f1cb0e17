//! SIMD SAD kernel using the `wide` crate.
//!
//! Rows are processed 16 samples at a time as `u8x16`; the absolute
//! difference is `max - min`, which cannot wrap. The tail is scalar.

use crate::metric::scalar::ScalarSad;
use crate::metric::SadKernel;
use wide::u8x16;

const LANES: usize = 16;

#[inline]
fn load_u8x16(slice: &[u8]) -> u8x16 {
    let mut lanes = [0u8; LANES];
    lanes.copy_from_slice(&slice[..LANES]);
    u8x16::from(lanes)
}

/// Horizontal sum of 16 absolute differences (at most 16 * 255).
#[inline]
fn hsum(v: u8x16) -> u64 {
    v.to_array().iter().map(|&d| u64::from(d)).sum()
}

/// SIMD-accelerated SAD kernel; bit-identical to [`ScalarSad`].
pub struct SimdSad;

impl SadKernel for SimdSad {
    #[inline]
    fn row_sad(a: &[u8], b: &[u8]) -> u64 {
        let len = a.len().min(b.len());
        let simd_end = len / LANES * LANES;

        let mut sum = 0u64;
        let mut i = 0;
        while i < simd_end {
            let va = load_u8x16(&a[i..]);
            let vb = load_u8x16(&b[i..]);
            sum += hsum(va.max(vb) - va.min(vb));
            i += LANES;
        }

        sum + ScalarSad::row_sad(&a[simd_end..len], &b[simd_end..len])
    }
}
