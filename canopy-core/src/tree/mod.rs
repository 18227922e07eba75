//! Component tree storage shared by the max-tree and alpha-tree builders.
//!
//! Nodes are stored in topological order: every non-root node `x` satisfies
//! `parent[x] < x` and the root is node 0, its own parent. Every algorithm over
//! the tree is therefore a single forward (root to leaves) or backward (leaves
//! to root) scan over the index range.

mod attributes;
pub(crate) mod linked;
mod saliency;

use std::ops::Range;

pub use self::attributes::{Accumulator, Bounds, BoundingBox, Count, Extrema, Sum};
use crate::{
    Result,
    error::TreeError,
    image::{Image2d, Point},
};

/// Dense index of a tree node.
pub type NodeId = u32;

/// Point-indexed image of the node each pixel belongs to.
pub type NodeMap = Image2d<NodeId>;

#[expect(
    clippy::cast_possible_truncation,
    reason = "node counts are checked against NodeId::MAX before any id is issued"
)]
pub(crate) const fn node_id(index: usize) -> NodeId {
    index as NodeId
}

/// Parent array plus per-node values, in ancestor-before-descendant order.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentTree<V> {
    parent: Vec<NodeId>,
    values: Vec<V>,
}

impl<V> ComponentTree<V> {
    pub(crate) fn from_raw(parent: Vec<NodeId>, values: Vec<V>) -> Self {
        debug_assert_eq!(parent.len(), values.len());
        debug_assert!(parent.first().is_some_and(|&root| root == 0));
        Self { parent, values }
    }

    /// Assembles a tree from externally computed arrays.
    ///
    /// # Errors
    /// Returns [`TreeError::EmptyDomain`] for empty arrays,
    /// [`TreeError::LengthMismatch`] when the arrays differ in length and
    /// [`TreeError::InvalidParent`] when node 0 is not its own parent or a
    /// node does not come after its parent.
    ///
    /// # Examples
    /// ```
    /// use canopy_core::ComponentTree;
    ///
    /// let tree = ComponentTree::from_parts(vec![0, 0, 1], vec![0_u8, 4, 9])?;
    /// assert_eq!(tree.depth(), vec![0, 1, 2]);
    /// assert!(ComponentTree::from_parts(vec![0, 2, 0], vec![0_u8; 3]).is_err());
    /// # Ok::<(), canopy_core::TreeError>(())
    /// ```
    pub fn from_parts(parent: Vec<NodeId>, values: Vec<V>) -> Result<Self> {
        if parent.len() != values.len() {
            return Err(TreeError::LengthMismatch {
                parents: parent.len(),
                values: values.len(),
            });
        }
        if parent.is_empty() {
            return Err(TreeError::EmptyDomain);
        }
        if NodeId::try_from(parent.len() - 1).is_err() {
            return Err(TreeError::NodeCountOverflow {
                required: parent.len(),
                limit: usize::try_from(NodeId::MAX).unwrap_or(usize::MAX),
            });
        }
        for (node, &p) in parent.iter().enumerate() {
            let p = p as usize;
            let valid = if node == 0 { p == 0 } else { p < node };
            if !valid {
                return Err(TreeError::InvalidParent { node, parent: p });
            }
        }
        Ok(Self { parent, values })
    }

    /// Number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.parent.len() }

    /// Always `false`: a tree holds at least its root.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.parent.is_empty() }

    /// Parent of every node; the root points at itself.
    #[must_use]
    #[rustfmt::skip]
    pub fn parents(&self) -> &[NodeId] { &self.parent }

    /// Value of every node.
    #[must_use]
    #[rustfmt::skip]
    pub fn values(&self) -> &[V] { &self.values }

    /// Parent of `node`.
    ///
    /// # Panics
    /// Panics when `node` is not a node of this tree.
    #[must_use]
    pub fn parent_of(&self, node: NodeId) -> NodeId {
        self.parent[node as usize]
    }

    /// Value of `node`.
    ///
    /// # Panics
    /// Panics when `node` is not a node of this tree.
    #[must_use]
    pub fn value(&self, node: NodeId) -> &V {
        &self.values[node as usize]
    }

    /// Node ids in increasing index order, parents before children.
    ///
    /// The range is lazy and can be cloned to restart the walk.
    #[must_use]
    pub fn nodes(&self) -> Range<NodeId> {
        0..node_id(self.parent.len())
    }

    /// Distance of every node from the root.
    #[must_use]
    pub fn depth(&self) -> Vec<usize> {
        let mut depth = vec![0; self.parent.len()];
        for x in 1..self.parent.len() {
            depth[x] = depth[self.parent[x] as usize] + 1;
        }
        depth
    }

    /// Number of children of every node.
    #[must_use]
    pub fn child_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.parent.len()];
        for &p in self.parent.iter().skip(1) {
            counts[p as usize] += 1;
        }
        counts
    }

    /// Rebuilds an image by reading `values[nodemap[p]]` at every point.
    ///
    /// # Panics
    /// Panics when `nodemap` refers to nodes this tree does not have, which
    /// happens when a node map from an older tree is paired with a filtered
    /// one.
    #[must_use]
    pub fn reconstruct(&self, nodemap: &NodeMap) -> Image2d<V>
    where
        V: Clone,
    {
        self.reconstruct_from(nodemap, &self.values)
    }

    /// Rebuilds an image from any per-node array, such as an attribute.
    ///
    /// # Panics
    /// Panics when `values` is shorter than the tree or `nodemap` is stale.
    #[must_use]
    pub fn reconstruct_from<T: Clone>(&self, nodemap: &NodeMap, values: &[T]) -> Image2d<T> {
        assert!(
            values.len() >= self.len(),
            "per-node array holds {} values for {} nodes",
            values.len(),
            self.len()
        );
        nodemap.map(|&node| values[node as usize].clone())
    }

    /// Labels every point with the highest node whose value does not exceed
    /// `threshold`.
    ///
    /// A node starts a new label when the value of its parent is strictly
    /// above `threshold`; the root always starts one. On an alpha-tree this
    /// yields the partition of the image into alpha-connected components.
    ///
    /// When the neighbourhood graph of an alpha-tree is disconnected, its
    /// components meet under a top node valued at the largest accepted weight
    /// (the leaf default when there are no edges at all). A cut at or above
    /// that value labels them together.
    ///
    /// # Examples
    /// ```
    /// use canopy_core::{ComponentTree, Image2d};
    ///
    /// // root(5) -> a(2) -> {leaf 0, leaf 1}, root -> leaf 2
    /// let tree = ComponentTree::from_parts(vec![0, 0, 0, 1, 1], vec![5, 2, 0, 0, 0])?;
    /// let nodemap = Image2d::from_vec(3, 1, vec![3, 4, 2])?;
    /// let cut = tree.horizontal_cut(&2, &nodemap);
    /// assert_eq!(cut.values(), &[1, 1, 2]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn horizontal_cut(&self, threshold: &V, nodemap: &NodeMap) -> NodeMap
    where
        V: PartialOrd,
    {
        let mut label = vec![0; self.len()];
        for x in 1..self.len() {
            let p = self.parent[x] as usize;
            label[x] = if self.values[p] > *threshold {
                node_id(x)
            } else {
                label[p]
            };
        }
        nodemap.map(|&node| label[node as usize])
    }

    /// Pixel count of every node's component, children included.
    #[must_use]
    pub fn area(&self, nodemap: &NodeMap) -> Vec<usize> {
        self.accumulate(nodemap, |_| (), Count::default())
    }

    /// Folds a per-pixel sample into a per-node attribute.
    ///
    /// Every pixel is fed to the accumulator of its node, then each node is
    /// merged into its parent in reverse index order, so a node is complete
    /// before its parent reads it.
    ///
    /// # Panics
    /// Panics when `nodemap` is stale.
    #[must_use]
    pub fn accumulate<T, A, F>(&self, nodemap: &NodeMap, mut sample: F, init: A) -> Vec<A::Output>
    where
        A: Accumulator<T> + Clone,
        F: FnMut(Point) -> T,
    {
        let mut accs = vec![init; self.len()];
        for (p, &node) in nodemap.values().iter().enumerate() {
            accs[node as usize].take(sample(p));
        }
        for x in (1..self.len()).rev() {
            let p = self.parent[x] as usize;
            let (ancestors, rest) = accs.split_at_mut(x);
            ancestors[p].merge(&rest[0]);
        }
        accs.iter().map(<A as Accumulator<T>>::finish).collect()
    }

    /// [`Self::accumulate`] fed with the image values themselves.
    #[must_use]
    pub fn accumulate_on_values<T, A>(
        &self,
        nodemap: &NodeMap,
        image: &Image2d<T>,
        init: A,
    ) -> Vec<A::Output>
    where
        T: Clone,
        A: Accumulator<T> + Clone,
    {
        self.accumulate(nodemap, |p| image[p].clone(), init)
    }
}
