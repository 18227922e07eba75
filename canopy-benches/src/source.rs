//! Synthetic greyscale images for tree benchmarks.
//!
//! Noise produces deep max-trees with many small nodes; blobs produce few
//! large plateaus, which is where filters remove the most.

use std::fmt;

use canopy_core::Image2d;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Brightest value of the noisy floor under [`ImagePattern::Blobs`].
const FLOOR_LEVELS: u8 = 16;

/// Pixel layout of a synthetic image.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImagePattern {
    /// Independent values drawn uniformly from `0..levels`.
    Noise {
        /// Number of distinct grey levels.
        levels: u8,
    },
    /// Bright square plateaus of random size over a dark noisy floor.
    Blobs {
        /// Number of plateaus stamped onto the floor.
        count: usize,
    },
}

impl fmt::Display for ImagePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noise { levels } => write!(f, "noise-{levels}"),
            Self::Blobs { count } => write!(f, "blobs-{count}"),
        }
    }
}

/// Configuration for a synthetic image.
#[derive(Clone, Debug)]
pub struct SyntheticImageConfig {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Pixel layout.
    pub pattern: ImagePattern,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates the image described by `config`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for an empty image or a noise
/// pattern without levels, and [`BenchSetupError::Overflow`] when the pixel
/// count does not fit in `usize`.
///
/// # Examples
/// ```
/// use canopy_benches::source::{ImagePattern, SyntheticImageConfig, generate_image};
///
/// let image = generate_image(&SyntheticImageConfig {
///     width: 32,
///     height: 16,
///     pattern: ImagePattern::Noise { levels: 8 },
///     seed: 7,
/// })?;
/// assert_eq!(image.len(), 512);
/// # Ok::<(), canopy_benches::error::BenchSetupError>(())
/// ```
pub fn generate_image(config: &SyntheticImageConfig) -> Result<Image2d<u8>, BenchSetupError> {
    let (width, height) = (config.width, config.height);
    if width == 0 {
        return Err(BenchSetupError::ZeroValue { context: "image width" });
    }
    if height == 0 {
        return Err(BenchSetupError::ZeroValue { context: "image height" });
    }
    if width.checked_mul(height).is_none() {
        return Err(BenchSetupError::Overflow { width, height });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    match config.pattern {
        ImagePattern::Noise { levels: 0 } => Err(BenchSetupError::ZeroValue {
            context: "noise levels",
        }),
        ImagePattern::Noise { levels } => Ok(Image2d::from_fn(width, height, |_| {
            rng.gen_range(0..levels)
        })),
        ImagePattern::Blobs { count } => {
            let mut image = Image2d::from_fn(width, height, |_| rng.gen_range(0..FLOOR_LEVELS));
            stamp_blobs(&mut image, &mut rng, count);
            Ok(image)
        }
    }
}

fn stamp_blobs(image: &mut Image2d<u8>, rng: &mut SmallRng, count: usize) {
    let (width, height) = (image.width(), image.height());
    let max_side = width.min(height).div_ceil(4);
    for _ in 0..count {
        let side = rng.gen_range(1..=max_side);
        let x0 = rng.gen_range(0..=width - side);
        let y0 = rng.gen_range(0..=height - side);
        let level = rng.gen_range(FLOOR_LEVELS..=u8::MAX);
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                image.set(y * width + x, level);
            }
        }
    }
}
