//! Canopy core library: component trees over 2-D images.
//!
//! Max-trees and alpha-trees are built on a shared union-find engine, stored
//! as parent arrays in topological order, filtered under three structural
//! pruning policies or subtractively, and queried for lowest common ancestors.
//!
//! ```
//! use canopy_core::{C4, FilterPolicy, Image2d, LcaKind, LcaQuery, TreeConfig, build_maxtree, make_lca};
//!
//! let image = Image2d::from_rows(vec![vec![0_u8, 4, 0, 9], vec![0, 4, 0, 2]])?;
//! let (tree, mut nodemap) = build_maxtree(&image, &C4, &TreeConfig::default())?;
//! assert_eq!(tree.reconstruct(&nodemap), image);
//!
//! let lca = make_lca(&tree, LcaKind::Linear);
//! assert_eq!(lca.lca(nodemap[1], nodemap[3]), 0);
//!
//! let area = tree.area(&nodemap);
//! let filtered = tree.filter(FilterPolicy::Direct, |x| area[x as usize] >= 2);
//! filtered.relabeling().apply(&mut nodemap);
//! let opened = filtered.tree().reconstruct(&nodemap);
//! assert_eq!(opened.values(), &[0, 4, 0, 2, 0, 4, 0, 2]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod build;
mod config;
mod error;
mod filter;
mod image;
mod lca;
#[cfg(test)]
mod test_utils;
mod tree;
mod union_find;

pub use crate::{
    build::{build_alphatree, build_alphatree_by, build_maxtree, build_maxtree_by, build_mintree},
    config::{Extension, ExtensionPolicy, TreeConfig, TreeConfigBuilder},
    error::{ImageError, ImageErrorCode, Result, TreeError, TreeErrorCode},
    filter::{
        Contrast, FilterPolicy, Filtered, Relabeling, area_closing, area_opening, dynamic_closing,
        dynamic_opening,
    },
    image::{C4, C8, Image2d, Neighborhood, Point},
    lca::{Lca, LcaKind, LcaQuery, LinearLca, NaiveLca, SparseTableLca, make_lca},
    tree::{
        Accumulator, BoundingBox, Bounds, ComponentTree, Count, Extrema, NodeId, NodeMap, Sum,
    },
    union_find::{DisjointSet, UnionFindVisitor, union_find},
};
