use frankenpatch::{patch_sad, MatchSet, PatchView, View};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn is_non_decreasing(scores: &[u64]) -> bool {
    scores.windows(2).all(|pair| pair[0] <= pair[1])
}

#[test]
fn match_set_keeps_k_smallest_scores() {
    let mut rng = StdRng::seed_from_u64(7);
    for trial in 0..200 {
        let capacity = rng.random_range(0..8usize);
        let count = rng.random_range(0..40usize);
        let inputs: Vec<(u64, usize)> = (0..count)
            .map(|token| (rng.random_range(0..50u64), token))
            .collect();

        let mut set = MatchSet::new(capacity);
        for &(score, token) in &inputs {
            set.insert(score, token);
            assert!(set.len() <= capacity, "trial {trial}");
            if set.is_full() {
                let scores: Vec<u64> = set.as_slice().iter().map(|e| e.score).collect();
                assert!(is_non_decreasing(&scores), "trial {trial}");
            }
        }
        assert_eq!(set.len(), count.min(capacity), "trial {trial}");

        let kept = set.into_sorted();
        let kept_scores: Vec<u64> = kept.iter().map(|e| e.score).collect();
        let mut expected: Vec<u64> = inputs.iter().map(|&(score, _)| score).collect();
        expected.sort_unstable();
        expected.truncate(capacity);
        assert_eq!(kept_scores, expected, "trial {trial}");

        for entry in &kept {
            assert_eq!(inputs[entry.item].0, entry.score, "trial {trial}");
        }
    }
}

#[test]
fn metric_identity_and_symmetry() {
    let mut rng = StdRng::seed_from_u64(123);
    let width = 9;
    let height = 7;
    let mut random_view = || {
        let planes: Vec<Vec<u8>> = (0..3)
            .map(|_| (0..width * height).map(|_| rng.random_range(0..=255u8)).collect())
            .collect();
        View::from_planes(planes, width, height).unwrap()
    };
    let a = random_view();
    let b = random_view();

    for (row, col, h, w) in [(0, 0, 7, 9), (2, 3, 4, 5), (6, 8, 1, 1)] {
        let pa = PatchView::new(&a, row, col, h, w).unwrap();
        let pb = PatchView::new(&b, row, col, h, w).unwrap();
        assert_eq!(patch_sad(pa, pa).unwrap(), 0);
        assert_eq!(patch_sad(pa, pb).unwrap(), patch_sad(pb, pa).unwrap());
    }
}

#[test]
fn metric_matches_brute_force_sum() {
    let mut rng = StdRng::seed_from_u64(99);
    let width = 40;
    let height = 3;
    let da: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255u8)).collect();
    let db: Vec<u8> = (0..width * height).map(|_| rng.random_range(0..=255u8)).collect();
    let expected: u64 = da
        .iter()
        .zip(db.iter())
        .map(|(&x, &y)| (i64::from(x) - i64::from(y)).unsigned_abs())
        .sum();

    let a = View::from_planes(vec![da], width, height).unwrap();
    let b = View::from_planes(vec![db], width, height).unwrap();
    let pa = PatchView::new(&a, 0, 0, height, width).unwrap();
    let pb = PatchView::new(&b, 0, 0, height, width).unwrap();
    assert_eq!(patch_sad(pa, pb).unwrap(), expected);
}
