//! Benchmark parameter types.

use std::fmt;

use crate::source::ImagePattern;

/// Parameters for a benchmark run over one synthetic image.
#[derive(Clone, Copy, Debug)]
pub struct ImageBenchParams {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Pixel layout of the image.
    pub pattern: ImagePattern,
}

impl fmt::Display for ImageBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{},{}", self.width, self.height, self.pattern)
    }
}

/// Parameters for an LCA benchmark run.
#[derive(Clone, Debug)]
pub struct LcaBenchParams {
    /// Node count of the queried tree.
    pub node_count: usize,
    /// Number of queries per iteration.
    pub query_count: usize,
}

impl fmt::Display for LcaBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nodes={},queries={}", self.node_count, self.query_count)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ImagePattern::Noise { levels: 4 }, "64x32,noise-4")]
    #[case(ImagePattern::Blobs { count: 12 }, "64x32,blobs-12")]
    fn image_params_label_benchmark_ids(#[case] pattern: ImagePattern, #[case] expected: &str) {
        let params = ImageBenchParams {
            width: 64,
            height: 32,
            pattern,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn lca_params_label_benchmark_ids() {
        let params = LcaBenchParams {
            node_count: 900,
            query_count: 1_000,
        };
        assert_eq!(params.to_string(), "nodes=900,queries=1000");
    }
}
