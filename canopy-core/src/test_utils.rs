//! Shared test utilities for `canopy-core`.

use canopy_test_support::{ci::property_test_profile::ProptestRunProfile, fixtures};
use proptest::test_runner::Config as ProptestConfig;

use crate::image::Image2d;

/// Builds a proptest configuration from the shared CI profile.
///
/// Every property suite reads `CANOPY_PROPTEST_CASES` and `CANOPY_PBT_FORK`
/// the same way.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Seeded `width x height` image with values in `0..levels`.
pub(crate) fn random_image(seed: u64, width: usize, height: usize, levels: u8) -> Image2d<u8> {
    let pixels = fixtures::random_levels(seed, width * height, levels);
    Image2d::from_vec(width, height, pixels).expect("buffer covers the image")
}
