//! Tree builders: flooding max-tree and Kruskal alpha-tree.
//!
//! Both builders emit a [`ComponentTree`] in topological order together with
//! the [`NodeMap`] assigning every pixel to its leaf node.

mod alphatree;
mod maxtree;

pub use self::{
    alphatree::{build_alphatree, build_alphatree_by},
    maxtree::{build_maxtree, build_maxtree_by, build_mintree},
};
#[cfg(doc)]
use crate::tree::{ComponentTree, NodeMap};
