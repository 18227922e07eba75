//! Shared test utilities used across canopy crates.

pub mod ci;
pub mod fixtures;
pub mod tracing;
