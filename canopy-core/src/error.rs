//! Error types for the canopy core library.
//!
//! Only two families of failure are user-visible: malformed image buffers and
//! tree construction limits. Everything else (insufficient extension width,
//! stale node maps handed to a newer tree) is a caller contract and is checked
//! with debug assertions at most.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling an [`crate::Image2d`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ImageError {
    /// The buffer length does not match `width * height`.
    #[error("buffer of length {len} cannot back a {width}x{height} image")]
    DimensionMismatch {
        /// Requested image width.
        width: usize,
        /// Requested image height.
        height: usize,
        /// Length of the supplied buffer.
        len: usize,
    },
    /// A row passed to [`crate::Image2d::from_rows`] has the wrong length.
    #[error("row {row} has {actual} values but the first row has {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ImageError`] variants.
    enum ImageErrorCode for ImageError {
        /// The buffer length does not match `width * height`.
        DimensionMismatch => DimensionMismatch { .. } => "IMAGE_DIMENSION_MISMATCH",
        /// A row has the wrong length.
        RaggedRows => RaggedRows { .. } => "IMAGE_RAGGED_ROWS",
    }
}

/// Error type produced when building, configuring or assembling component trees.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TreeError {
    /// The input image has no points.
    #[error("cannot build a component tree over an empty domain")]
    EmptyDomain,
    /// The tree would need more nodes than the configured node limit allows.
    #[error("building the tree requires {required} nodes but the node limit is {limit}")]
    NodeCountOverflow {
        /// Number of nodes the builder would allocate.
        required: usize,
        /// Configured node limit.
        limit: usize,
    },
    /// Two dissimilarity values could not be ordered (e.g. NaN). The points
    /// are the endpoints of the offending edge.
    #[error("dissimilarity between points {left} and {right} is not totally ordered")]
    IncomparableWeight {
        /// Raster index of the first endpoint.
        left: usize,
        /// Raster index of the second endpoint.
        right: usize,
    },
    /// The node limit must be at least 1.
    #[error("node limit must be at least 1 (got {got})")]
    InvalidNodeLimit {
        /// The rejected limit.
        got: usize,
    },
    /// Parent and value arrays have different lengths.
    #[error("parent array has {parents} entries but value array has {values}")]
    LengthMismatch {
        /// Length of the parent array.
        parents: usize,
        /// Length of the value array.
        values: usize,
    },
    /// A parent link breaks the `parent[x] < x` ordering or the root self-loop.
    #[error("node {node} has parent {parent}, which does not precede it")]
    InvalidParent {
        /// The offending node.
        node: usize,
        /// Its recorded parent.
        parent: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`TreeError`] variants.
    enum TreeErrorCode for TreeError {
        /// The input image has no points.
        EmptyDomain => EmptyDomain => "TREE_EMPTY_DOMAIN",
        /// The tree would exceed the configured node limit.
        NodeCountOverflow => NodeCountOverflow { .. } => "TREE_NODE_COUNT_OVERFLOW",
        /// A dissimilarity value was not totally ordered.
        IncomparableWeight => IncomparableWeight { .. } => "TREE_INCOMPARABLE_WEIGHT",
        /// The node limit was zero.
        InvalidNodeLimit => InvalidNodeLimit { .. } => "TREE_INVALID_NODE_LIMIT",
        /// Parent and value arrays have different lengths.
        LengthMismatch => LengthMismatch { .. } => "TREE_LENGTH_MISMATCH",
        /// A parent link breaks the topological ordering.
        InvalidParent => InvalidParent { .. } => "TREE_INVALID_PARENT",
    }
}

/// Convenient alias for results returned by the tree API.
pub type Result<T> = core::result::Result<T, TreeError>;
