//! Explicit configuration passed into every builder and union-find call.
//!
//! Extension state for the padded auxiliary layout lives here rather than in
//! any process-wide setting, so two builds with different borders can run
//! side by side.

use crate::{Result, error::TreeError, tree::NodeId};

/// How the border of the padded union-find layout behaves.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ExtensionPolicy {
    /// Border cells are never processed, so out-of-domain neighbours are
    /// ignored.
    #[default]
    Fill,
    /// Neighbours wrap around opposite edges of the domain.
    Periodic,
}

/// Border of the padded auxiliary layout used by the union-find engine.
///
/// # Examples
/// ```
/// use canopy_core::{Extension, ExtensionPolicy};
///
/// let extension = Extension::periodic().with_width(2);
/// assert_eq!(extension.policy(), ExtensionPolicy::Periodic);
/// assert_eq!(extension.width(), Some(2));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Extension {
    width: Option<usize>,
    policy: ExtensionPolicy,
}

impl Extension {
    /// A filled border as wide as the neighbourhood radius.
    #[must_use]
    pub const fn fill() -> Self {
        Self {
            width: None,
            policy: ExtensionPolicy::Fill,
        }
    }

    /// A periodic border as wide as the neighbourhood radius.
    #[must_use]
    pub const fn periodic() -> Self {
        Self {
            width: None,
            policy: ExtensionPolicy::Periodic,
        }
    }

    /// Forces an explicit border width.
    ///
    /// The width must cover the radius of the neighbourhood used with it.
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns the explicit border width, if one was set.
    #[must_use]
    pub const fn width(&self) -> Option<usize> {
        self.width
    }

    /// Returns the border policy.
    #[must_use]
    pub const fn policy(&self) -> ExtensionPolicy {
        self.policy
    }

    /// Resolves the border width against a neighbourhood radius.
    pub(crate) fn resolve_width(&self, radius: usize) -> usize {
        let width = self.width.unwrap_or(radius);
        debug_assert!(
            width >= radius,
            "extension width {width} is narrower than the neighbourhood radius {radius}"
        );
        width
    }
}

/// Validated settings shared by the tree builders and connected filters.
///
/// # Examples
/// ```
/// use canopy_core::TreeConfig;
///
/// let config = TreeConfig::default();
/// assert_eq!(config.node_limit(), u32::MAX as usize);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TreeConfig {
    node_limit: usize,
    extension: Extension,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            node_limit: max_node_limit(),
            extension: Extension::default(),
        }
    }
}

impl TreeConfig {
    /// Starts a [`TreeConfigBuilder`].
    #[must_use]
    pub fn builder() -> TreeConfigBuilder {
        TreeConfigBuilder::default()
    }

    /// Maximum number of nodes a builder may allocate.
    #[must_use]
    pub const fn node_limit(&self) -> usize {
        self.node_limit
    }

    /// Border configuration of the padded union-find layout.
    #[must_use]
    pub const fn extension(&self) -> Extension {
        self.extension
    }

    /// Fails with [`TreeError::NodeCountOverflow`] when `required` nodes do not
    /// fit under the limit.
    pub(crate) fn check_node_count(&self, required: usize) -> Result<()> {
        if required > self.node_limit {
            return Err(TreeError::NodeCountOverflow {
                required,
                limit: self.node_limit,
            });
        }
        Ok(())
    }
}

/// Configures and validates [`TreeConfig`] values.
///
/// # Examples
/// ```
/// use canopy_core::{Extension, TreeConfig};
///
/// let config = TreeConfig::builder()
///     .with_node_limit(1024)
///     .with_extension(Extension::periodic())
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(config.node_limit(), 1024);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeConfigBuilder {
    node_limit: Option<usize>,
    extension: Extension,
}

impl TreeConfigBuilder {
    /// Caps the number of nodes a builder may allocate.
    ///
    /// Limits above the range of [`NodeId`] are clamped to it.
    #[must_use]
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Sets the border configuration.
    #[must_use]
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension = extension;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidNodeLimit`] when the node limit is zero.
    pub fn build(self) -> Result<TreeConfig> {
        let node_limit = match self.node_limit {
            Some(0) => return Err(TreeError::InvalidNodeLimit { got: 0 }),
            Some(limit) => limit.min(max_node_limit()),
            None => max_node_limit(),
        };
        Ok(TreeConfig {
            node_limit,
            extension: self.extension,
        })
    }
}

fn max_node_limit() -> usize {
    usize::try_from(NodeId::MAX).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn zero_node_limit_is_rejected() {
        let err = TreeConfig::builder()
            .with_node_limit(0)
            .build()
            .expect_err("zero limit must fail");
        assert_eq!(err, TreeError::InvalidNodeLimit { got: 0 });
        assert_eq!(err.code().as_str(), "TREE_INVALID_NODE_LIMIT");
    }

    #[rstest]
    #[case(1, 1)]
    #[case(64, 64)]
    #[case(usize::MAX, max_node_limit())]
    fn node_limit_is_clamped_to_node_id_range(#[case] requested: usize, #[case] expected: usize) {
        let config = TreeConfig::builder()
            .with_node_limit(requested)
            .build()
            .expect("limit is valid");
        assert_eq!(config.node_limit(), expected);
    }

    #[test]
    fn node_count_check_reports_limit() {
        let config = TreeConfig::builder()
            .with_node_limit(10)
            .build()
            .expect("limit is valid");
        assert!(config.check_node_count(10).is_ok());
        assert_eq!(
            config.check_node_count(11),
            Err(TreeError::NodeCountOverflow {
                required: 11,
                limit: 10
            })
        );
    }

    #[rstest]
    #[case(Extension::fill(), 1, 1)]
    #[case(Extension::fill().with_width(3), 1, 3)]
    #[case(Extension::periodic(), 2, 2)]
    fn extension_width_resolves_against_radius(
        #[case] extension: Extension,
        #[case] radius: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(extension.resolve_width(radius), expected);
    }
}
