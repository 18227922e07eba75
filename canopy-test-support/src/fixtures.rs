//! Deterministic pseudo-random pixel buffers for builder and filter tests.
//!
//! Buffers are plain row-major vectors so the crates under test can wrap them
//! in their own image types.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Row-major buffer of `len` values drawn uniformly from `0..levels`.
///
/// Few levels produce large flat zones; many levels produce deep trees.
///
/// # Panics
/// Panics when `levels` is zero.
///
/// # Examples
/// ```
/// use canopy_test_support::fixtures::random_levels;
///
/// let pixels = random_levels(7, 12, 3);
/// assert_eq!(pixels.len(), 12);
/// assert!(pixels.iter().all(|&v| v < 3));
/// assert_eq!(pixels, random_levels(7, 12, 3));
/// ```
#[must_use]
pub fn random_levels(seed: u64, len: usize, levels: u8) -> Vec<u8> {
    assert!(levels > 0, "at least one level is required");
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..levels)).collect()
}
