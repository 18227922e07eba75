//! Helpers shared by the CI-driven test profiles.

pub mod property_test_profile;
