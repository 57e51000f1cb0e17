//! Candidate offsets inside the search window.

/// Offsets `anchor + k * stride` for `k` in `-roi..=roi`, ascending in `k`,
/// keeping only those where `[offset, offset + extent)` fits in `[0, limit)`.
///
/// Only in-bounds `k` are visited, so the cost is bounded by `limit / stride`
/// whatever `roi` is.
pub(crate) fn candidate_offsets(
    anchor: usize,
    stride: usize,
    roi: usize,
    extent: usize,
    limit: usize,
) -> impl Iterator<Item = usize> {
    let stride = stride.max(1) as i128;
    let (anchor, roi) = (anchor as i128, roi as i128);
    let (k_min, k_max) = match limit.checked_sub(extent) {
        Some(max_offset) => (
            (-roi).max(-(anchor / stride)),
            roi.min((max_offset as i128 - anchor).div_euclid(stride)),
        ),
        None => (0, -1),
    };
    (k_min..=k_max).filter_map(move |k| usize::try_from(anchor + k * stride).ok())
}

#[cfg(test)]
mod tests {
    use super::candidate_offsets;

    #[test]
    fn offsets_are_ascending_and_clipped() {
        let offsets: Vec<usize> = candidate_offsets(4, 2, 3, 4, 12).collect();
        // k = -3..=3 -> -2, 0, 2, 4, 6, 8, 10; 10 + 4 > 12 is dropped.
        assert_eq!(offsets, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn zero_roi_yields_anchor_only() {
        let offsets: Vec<usize> = candidate_offsets(3, 5, 0, 2, 8).collect();
        assert_eq!(offsets, vec![3]);
    }

    #[test]
    fn fully_clipped_window_is_empty() {
        assert_eq!(candidate_offsets(6, 1, 1, 4, 8).count(), 0);
        assert_eq!(candidate_offsets(0, 1, 2, 9, 8).count(), 0);
    }

    #[test]
    fn unbounded_roi_covers_the_axis_once() {
        let offsets: Vec<usize> = candidate_offsets(5, 3, usize::MAX, 4, 16).collect();
        assert_eq!(offsets, vec![2, 5, 8, 11]);

        let huge_stride: Vec<usize> = candidate_offsets(7, usize::MAX, usize::MAX, 1, 8).collect();
        assert_eq!(huge_stride, vec![7]);
    }

    #[test]
    fn anchor_past_the_limit_steps_back_inside() {
        let offsets: Vec<usize> = candidate_offsets(10, 2, 3, 4, 10).collect();
        // k = -3..=3 -> 4, 6, 8, ...; only offsets <= 6 fit.
        assert_eq!(offsets, vec![4, 6]);
    }
}
