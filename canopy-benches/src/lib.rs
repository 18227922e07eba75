//! Benchmark support crate for canopy.
//!
//! Provides synthetic images and parameter types used by the Criterion
//! benchmarks for tree construction, filtering and LCA queries.

pub mod error;
pub mod params;
pub mod source;
