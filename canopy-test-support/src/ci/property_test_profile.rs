//! Property-test run profile read from the environment.
//!
//! CI runs the tree property suites with more cases than a local `cargo test`;
//! both read the same two variables so every suite scales together.

use std::{env, fmt};

/// Environment variable overriding the number of cases per property.
pub const CANOPY_PROPTEST_CASES_ENV_KEY: &str = "CANOPY_PROPTEST_CASES";
/// Environment variable enabling forked proptest execution.
pub const CANOPY_PBT_FORK_ENV_KEY: &str = "CANOPY_PBT_FORK";

/// Case count and fork flag for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the profile, falling back to the suite defaults for missing or
    /// malformed overrides.
    ///
    /// # Examples
    ///
    /// ```
    /// use canopy_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CANOPY_PROPTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(CANOPY_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

#[derive(Debug)]
enum OverrideError {
    NotANumber(std::num::ParseIntError),
    ZeroCases,
    NotAFlag,
}

impl fmt::Display for OverrideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(error) => write!(f, "parse error: {error}"),
            Self::ZeroCases => f.write_str("cases must be > 0"),
            Self::NotAFlag => f.write_str("expected one of: true/false/1/0/yes/no/on/off"),
        }
    }
}

fn override_or<T, F>(key: &'static str, default: T, parse: F) -> T
where
    F: Fn(&str) -> Result<T, OverrideError>,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(error) => Err(OverrideError::NotANumber(error)),
    }
}

fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotAFlag),
    }
}
