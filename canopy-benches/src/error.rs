//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! that setup functions can propagate failures with `?` instead of using
//! `.expect()`.

use canopy_core::{ImageError, TreeError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// The requested `width * height` overflowed `usize`.
    #[error("a {width}x{height} image overflows usize")]
    Overflow {
        /// Requested image width.
        width: usize,
        /// Requested image height.
        height: usize,
    },
    /// Wrapping the generated pixels in an image failed.
    #[error("image construction failed: {0}")]
    Image(#[from] ImageError),
    /// Building a component tree failed.
    #[error("tree construction failed: {0}")]
    Tree(#[from] TreeError),
}
