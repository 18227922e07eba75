//! Tree filtering and the connected filters built on the union-find engine.
//!
//! [`ComponentTree::filter`] never touches the tree it is called on. It returns
//! a new compacted tree together with a [`Relabeling`] that moves any node map
//! of the old tree onto the new one. Structural filtering works for any value
//! type; [`ComponentTree::filter_subtractive`] also rewrites values and needs
//! [`Contrast`].

mod connected;
mod contrast;
#[cfg(test)]
mod tests;

use std::fmt;

use tracing::{debug, instrument};

pub use self::{
    connected::{area_closing, area_opening, dynamic_closing, dynamic_opening},
    contrast::Contrast,
};
use crate::tree::{ComponentTree, NodeId, NodeMap, linked::LinkedTree, node_id};

/// How nodes failing the predicate are removed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterPolicy {
    /// Only the failing node disappears; its children move to its parent.
    Direct,
    /// A failing node takes its whole subtree with it.
    Min,
    /// A node survives when it or any of its descendants passes.
    Max,
}

impl fmt::Display for FilterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::Min => "min",
            Self::Max => "max",
        })
    }
}

/// Old-to-new node table produced by a filtering pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relabeling {
    table: Vec<NodeId>,
}

impl Relabeling {
    /// New id of every old node; removed nodes map to their surviving
    /// ancestor.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[NodeId] { &self.table }

    /// New id of the old node `node`.
    ///
    /// # Panics
    /// Panics when `node` is not a node of the filtered tree.
    #[must_use]
    pub fn get(&self, node: NodeId) -> NodeId {
        self.table[node as usize]
    }

    /// Whether every node kept its id.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.table
            .iter()
            .enumerate()
            .all(|(old, &new)| new as usize == old)
    }

    /// Rewrites a node map of the old tree so it refers to the new one.
    ///
    /// # Panics
    /// Panics when `nodemap` does not belong to the filtered tree.
    pub fn apply(&self, nodemap: &mut NodeMap) {
        for p in nodemap.points() {
            nodemap[p] = self.table[nodemap[p] as usize];
        }
    }
}

/// Result of [`ComponentTree::filter`] and
/// [`ComponentTree::filter_subtractive`].
#[derive(Clone, Debug, PartialEq)]
pub struct Filtered<V> {
    tree: ComponentTree<V>,
    relabeling: Relabeling,
}

impl<V> Filtered<V> {
    /// The compacted tree.
    #[must_use]
    #[rustfmt::skip]
    pub fn tree(&self) -> &ComponentTree<V> { &self.tree }

    /// The old-to-new node table.
    #[must_use]
    #[rustfmt::skip]
    pub fn relabeling(&self) -> &Relabeling { &self.relabeling }

    /// Splits the result into its tree and relabeling table.
    #[must_use]
    pub fn into_parts(self) -> (ComponentTree<V>, Relabeling) {
        (self.tree, self.relabeling)
    }
}

impl<V: Clone> ComponentTree<V> {
    /// Removes the nodes failing `predicate` under `policy`.
    ///
    /// The predicate is evaluated once per node in index order. The root is
    /// always kept. Surviving nodes keep their relative order, so the new tree
    /// satisfies the same parent-before-child layout.
    ///
    /// LCA structures and node maps built for `self` stay tied to `self`; use
    /// [`Relabeling::apply`] to carry a node map over.
    ///
    /// # Examples
    /// ```
    /// use canopy_core::{ComponentTree, FilterPolicy};
    ///
    /// let tree = ComponentTree::from_parts(vec![0, 0, 1, 1], vec![0_u8, 3, 5, 9])?;
    /// let filtered = tree.filter(FilterPolicy::Direct, |x| x != 1);
    /// assert_eq!(filtered.tree().parents(), &[0, 0, 0]);
    /// assert_eq!(filtered.relabeling().as_slice(), &[0, 0, 1, 2]);
    /// # Ok::<(), canopy_core::TreeError>(())
    /// ```
    #[instrument(
        name = "canopy.filter",
        skip_all,
        fields(policy = %policy, nodes = self.len()),
    )]
    pub fn filter<P>(&self, policy: FilterPolicy, predicate: P) -> Filtered<V>
    where
        P: FnMut(NodeId) -> bool,
    {
        let (repr, removed) = self.survivors(policy, predicate);
        let filtered = self.compact(&repr, self.values().to_vec());
        debug!(
            removed,
            nodes = filtered.tree.len(),
            "tree filtered"
        );
        filtered
    }

    /// Surviving representative of every node, and how many were removed.
    fn survivors<P>(&self, policy: FilterPolicy, mut predicate: P) -> (Vec<usize>, usize)
    where
        P: FnMut(NodeId) -> bool,
    {
        let passes: Vec<bool> = self.nodes().map(&mut predicate).collect();
        let mut linked = LinkedTree::new(self.parents());
        let removed = match policy {
            FilterPolicy::Direct => linked.remove_nodes(|x| !passes[x]),
            FilterPolicy::Min => linked.prune_subtrees(|x| !passes[x]),
            FilterPolicy::Max => {
                let mut active = passes;
                for x in (1..self.len()).rev() {
                    let p = self.parent_of(node_id(x)) as usize;
                    active[p] |= active[x];
                }
                linked.prune_subtrees(|x| !active[x])
            }
        };
        (linked.representatives(), removed)
    }

    /// Keeps the nodes that represent themselves, in index order.
    fn compact(&self, repr: &[usize], values: Vec<V>) -> Filtered<V> {
        let parents = self.parents();
        let mut new_id = vec![0; self.len()];
        let mut parent = Vec::new();
        let mut kept_values = Vec::new();
        for (x, value) in values.into_iter().enumerate() {
            if repr[x] != x {
                continue;
            }
            new_id[x] = node_id(parent.len());
            parent.push(new_id[repr[parents[x] as usize]]);
            kept_values.push(value);
        }
        let table = repr.iter().map(|&r| new_id[r]).collect();
        Filtered {
            tree: ComponentTree::from_raw(parent, kept_values),
            relabeling: Relabeling { table },
        }
    }
}

impl<V> ComponentTree<V>
where
    V: Contrast + Clone,
{
    /// Subtractive filter: removes the nodes failing `predicate` like
    /// [`FilterPolicy::Direct`], but every survivor keeps the contrast to its
    /// original parent on top of its new parent's value.
    ///
    /// Shifted values saturate at the bounds of `V`.
    ///
    /// # Examples
    /// ```
    /// use canopy_core::ComponentTree;
    ///
    /// let tree = ComponentTree::from_parts(vec![0, 0, 1], vec![0_u8, 4, 9])?;
    /// let filtered = tree.filter_subtractive(|x| x != 1);
    /// assert_eq!(filtered.tree().values(), &[0, 5]);
    /// # Ok::<(), canopy_core::TreeError>(())
    /// ```
    #[instrument(
        name = "canopy.filter",
        skip_all,
        fields(policy = "subtractive", nodes = self.len()),
    )]
    pub fn filter_subtractive<P>(&self, predicate: P) -> Filtered<V>
    where
        P: FnMut(NodeId) -> bool,
    {
        let (repr, removed) = self.survivors(FilterPolicy::Direct, predicate);
        let filtered = self.compact(&repr, self.subtractive_values(&repr));
        debug!(
            removed,
            nodes = filtered.tree.len(),
            "tree filtered"
        );
        filtered
    }

    fn subtractive_values(&self, repr: &[usize]) -> Vec<V> {
        let parents = self.parents();
        let values = self.values();
        let mut shifted = values.to_vec();
        for x in 1..self.len() {
            if repr[x] != x {
                continue;
            }
            let p = parents[x] as usize;
            shifted[x] = shifted[repr[p]].shift(&values[p], &values[x]);
        }
        shifted
    }
}
