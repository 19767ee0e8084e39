//! Validates edge detection tiers and the escalation guarantees

use edgemaze::analysis::edges::{self, DetectionTier};
use edgemaze::analysis::sampler::BrightnessGrid;
use edgemaze::spatial::Coord;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn grid_from_fn(width: usize, height: usize, value: impl Fn(usize, usize) -> u8) -> BrightnessGrid {
    let mut values = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            values.push(value(x, y));
        }
    }
    match BrightnessGrid::from_vec(values, width, height) {
        Ok(grid) => grid,
        Err(e) => unreachable!("grid construction failed: {e}"),
    }
}

#[test]
fn test_high_contrast_split_stays_on_tier_one() {
    let grid = grid_from_fn(20, 20, |x, _| if x < 10 { 0 } else { 255 });
    let mut rng = StdRng::seed_from_u64(1);

    let Ok(detection) = edges::detect(grid, &mut rng) else {
        unreachable!("detection failed");
    };

    assert_eq!(detection.tier, DetectionTier::AdaptiveGradient);
    // The split line produces edges on both adjacent columns.
    assert!(detection.mask.is_edge(Coord::new(9, 10)));
    assert!(detection.mask.is_edge(Coord::new(10, 10)));
    assert!(!detection.mask.is_edge(Coord::new(3, 10)));
}

#[test]
fn test_sparse_weak_features_escalate_to_max_difference() {
    // Two isolated +20 bright pixels on a flat background: the gradient
    // pass marks too few cells to clear 2% density on a 30x30 grid, the
    // 8-neighbor pass marks the full 3x3 around each pixel.
    let grid = grid_from_fn(30, 30, |x, y| {
        if (x, y) == (8, 8) || (x, y) == (22, 22) {
            120
        } else {
            100
        }
    });
    let mut rng = StdRng::seed_from_u64(1);

    let Ok(detection) = edges::detect(grid, &mut rng) else {
        unreachable!("detection failed");
    };

    assert_eq!(detection.tier, DetectionTier::MaxDifference);
    assert!(detection.mask.count() >= 10);
    assert!(detection.mask.is_edge(Coord::new(8, 8)));
    assert!(detection.mask.is_edge(Coord::new(7, 7)));
}

#[test]
fn test_uniform_grid_escalates_to_synthetic_mask() {
    let grid = grid_from_fn(10, 10, |_, _| 128);
    let mut rng = StdRng::seed_from_u64(42);

    let Ok(detection) = edges::detect(grid, &mut rng) else {
        unreachable!("detection failed");
    };

    assert_eq!(detection.tier, DetectionTier::Synthetic);
    assert_eq!(detection.mask.width(), 10);
    assert_eq!(detection.mask.height(), 10);
    assert!(detection.mask.count() >= 10, "synthetic mask below the floor");
    // Cross lines sit at mid-axis spanning the inner half.
    assert!(detection.mask.is_edge(Coord::new(4, 5)));
    assert!(detection.mask.is_edge(Coord::new(5, 4)));
}

#[test]
fn test_low_density_never_returns_a_tier_one_mask() {
    // Densities below 2% must escalate even when tier 1 found something.
    let grid = grid_from_fn(30, 30, |x, y| {
        if (x, y) == (15, 15) { 200 } else { 100 }
    });
    let mut rng = StdRng::seed_from_u64(5);

    let Ok(detection) = edges::detect(grid, &mut rng) else {
        unreachable!("detection failed");
    };

    assert_ne!(detection.tier, DetectionTier::AdaptiveGradient);
}

#[test]
fn test_synthetic_mask_is_deterministic_per_seed() {
    let mut first_rng = StdRng::seed_from_u64(7);
    let mut second_rng = StdRng::seed_from_u64(7);

    let (Ok(first), Ok(second)) = (
        edges::synthetic_mask(40, 30, &mut first_rng),
        edges::synthetic_mask(40, 30, &mut second_rng),
    ) else {
        unreachable!("synthetic mask construction failed");
    };

    assert_eq!(first.count(), second.count());
    for y in 0..30 {
        for x in 0..40 {
            let cell = Coord::new(x, y);
            assert_eq!(first.is_edge(cell), second.is_edge(cell), "divergence at {cell}");
        }
    }
}

#[test]
fn test_adaptive_threshold_suppresses_texture_in_high_contrast_regions() {
    // A checkerboard has 5x5 local contrast of 255, so the gradient
    // threshold is 40; a mild 30-step gradient shouldn't mark edges there
    // while the same step in a flat region would.
    let grid = grid_from_fn(20, 20, |x, y| {
        if y < 10 {
            // Noisy half: alternate extremes so local contrast is maximal.
            if (x + y) % 2 == 0 { 0 } else { 255 }
        } else {
            128
        }
    });

    let Ok(mask) = edges::adaptive_gradient_mask(&grid) else {
        unreachable!("gradient mask failed");
    };

    // Flat half carries no gradient at all.
    assert!(!mask.is_edge(Coord::new(10, 15)));
}
