//! Lowest common ancestor queries over a built component tree.
//!
//! Three interchangeable backends trade preprocessing for query time:
//!
//! | Backend | Preprocessing | Query |
//! |---|---|---|
//! | [`LcaKind::Naive`] | depths, `O(n)` | `O(depth)` |
//! | [`LcaKind::SparseTable`] | Euler tour + sparse table, `O(n log n)` | `O(1)` |
//! | [`LcaKind::Linear`] | Euler tour + ±1 block RMQ, `O(n)` | `O(1)` |
//!
//! Every backend borrows the tree it was built from and answers identically.
//! A filtered tree is a different tree: build a new query object for it.

mod block_rmq;
mod euler;
mod sparse_table;
#[cfg(test)]
mod tests;

use std::fmt;

use tracing::{debug, instrument};

use self::{block_rmq::BlockRmq, euler::EulerTour, sparse_table::SparseTable};
use crate::tree::{ComponentTree, NodeId, node_id};

/// Answers lowest common ancestor queries.
pub trait LcaQuery {
    /// Deepest node that is an ancestor of both `x` and `y` (or one of them).
    ///
    /// # Panics
    /// Panics when either node does not belong to the tree.
    fn lca(&self, x: NodeId, y: NodeId) -> NodeId;
}

/// Backend selector for [`make_lca`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LcaKind {
    /// Climb parents from the deeper node.
    Naive,
    /// Euler tour with a sparse table.
    SparseTable,
    /// Euler tour with block-decomposed ±1 range minimum queries.
    #[default]
    Linear,
}

impl fmt::Display for LcaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Naive => "naive",
            Self::SparseTable => "sparse_table",
            Self::Linear => "linear",
        })
    }
}

/// Parent climbing guided by node depths.
#[derive(Clone, Debug)]
pub struct NaiveLca<'t> {
    parent: &'t [NodeId],
    depth: Vec<usize>,
}

impl<'t> NaiveLca<'t> {
    /// Prepares queries over `tree`.
    #[must_use]
    pub fn new<V>(tree: &'t ComponentTree<V>) -> Self {
        Self {
            parent: tree.parents(),
            depth: tree.depth(),
        }
    }
}

impl LcaQuery for NaiveLca<'_> {
    fn lca(&self, x: NodeId, y: NodeId) -> NodeId {
        let (mut x, mut y) = (x as usize, y as usize);
        while self.depth[x] > self.depth[y] {
            x = self.parent[x] as usize;
        }
        while self.depth[y] > self.depth[x] {
            y = self.parent[y] as usize;
        }
        while x != y {
            x = self.parent[x] as usize;
            y = self.parent[y] as usize;
        }
        node_id(x)
    }
}

/// Euler tour with a sparse table over tour depths.
#[derive(Clone, Debug)]
pub struct SparseTableLca<'t> {
    tour: EulerTour<'t>,
    table: SparseTable,
}

impl<'t> SparseTableLca<'t> {
    /// Prepares queries over `tree`.
    #[must_use]
    pub fn new<V>(tree: &'t ComponentTree<V>) -> Self {
        let tour = EulerTour::new(tree.parents());
        let table = SparseTable::new(&tour.depth);
        Self { tour, table }
    }
}

impl LcaQuery for SparseTableLca<'_> {
    fn lca(&self, x: NodeId, y: NodeId) -> NodeId {
        if let Some(ancestor) = self.tour.enclosing(x, y) {
            return ancestor;
        }
        let (start, end) = self.tour.span(x, y);
        self.tour.nodes[self.table.argmin(&self.tour.depth, start, end)]
    }
}

/// Euler tour with linear-preprocessing block RMQ over tour depths.
#[derive(Clone, Debug)]
pub struct LinearLca<'t> {
    tour: EulerTour<'t>,
    rmq: BlockRmq,
}

impl<'t> LinearLca<'t> {
    /// Prepares queries over `tree`.
    #[must_use]
    pub fn new<V>(tree: &'t ComponentTree<V>) -> Self {
        let tour = EulerTour::new(tree.parents());
        let rmq = BlockRmq::new(&tour.depth);
        Self { tour, rmq }
    }
}

impl LcaQuery for LinearLca<'_> {
    fn lca(&self, x: NodeId, y: NodeId) -> NodeId {
        if let Some(ancestor) = self.tour.enclosing(x, y) {
            return ancestor;
        }
        let (start, end) = self.tour.span(x, y);
        self.tour.nodes[self.rmq.argmin(&self.tour.depth, start, end)]
    }
}

/// Any of the LCA backends, chosen at construction.
#[derive(Clone, Debug)]
pub enum Lca<'t> {
    /// See [`NaiveLca`].
    Naive(NaiveLca<'t>),
    /// See [`SparseTableLca`].
    SparseTable(SparseTableLca<'t>),
    /// See [`LinearLca`].
    Linear(LinearLca<'t>),
}

impl Lca<'_> {
    /// The backend in use.
    #[must_use]
    pub fn kind(&self) -> LcaKind {
        match self {
            Self::Naive(_) => LcaKind::Naive,
            Self::SparseTable(_) => LcaKind::SparseTable,
            Self::Linear(_) => LcaKind::Linear,
        }
    }
}

impl LcaQuery for Lca<'_> {
    fn lca(&self, x: NodeId, y: NodeId) -> NodeId {
        match self {
            Self::Naive(inner) => inner.lca(x, y),
            Self::SparseTable(inner) => inner.lca(x, y),
            Self::Linear(inner) => inner.lca(x, y),
        }
    }
}

/// Preprocesses `tree` for LCA queries with the selected backend.
///
/// # Examples
/// ```
/// use canopy_core::{ComponentTree, LcaKind, LcaQuery, make_lca};
///
/// //      0
/// //     / \
/// //    1   2
/// //   / \
/// //  3   4
/// let tree = ComponentTree::from_parts(vec![0, 0, 0, 1, 1], vec![0_u8; 5])?;
/// for kind in [LcaKind::Naive, LcaKind::SparseTable, LcaKind::Linear] {
///     let lca = make_lca(&tree, kind);
///     assert_eq!(lca.lca(3, 4), 1);
///     assert_eq!(lca.lca(4, 2), 0);
///     assert_eq!(lca.lca(1, 3), 1);
/// }
/// # Ok::<(), canopy_core::TreeError>(())
/// ```
#[instrument(name = "canopy.lca", skip_all, fields(kind = %kind, nodes = tree.len()))]
#[must_use]
pub fn make_lca<V>(tree: &ComponentTree<V>, kind: LcaKind) -> Lca<'_> {
    let lca = match kind {
        LcaKind::Naive => Lca::Naive(NaiveLca::new(tree)),
        LcaKind::SparseTable => Lca::SparseTable(SparseTableLca::new(tree)),
        LcaKind::Linear => Lca::Linear(LinearLca::new(tree)),
    };
    debug!(%kind, "lca preprocessing complete");
    lca
}
