//! Disjoint-set forest where the discoverer decides which root survives.
//!
//! Unlike a rank-balanced structure, the surviving representative of a merge is
//! chosen by the caller. The tree builders rely on this to keep the most
//! recently processed point as the root of every growing component.

/// Disjoint-set forest over dense `usize` indices.
///
/// # Examples
/// ```
/// use canopy_core::DisjointSet;
///
/// let mut set = DisjointSet::new(3);
/// for p in 0..3 {
///     set.make_set(p);
/// }
/// assert_eq!(set.union_by_discovery(2, 0), 2);
/// assert_eq!(set.find_root(0), 2);
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates a forest of `len` singletons.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    /// Number of indices covered by the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.parent.len() }

    /// Whether the forest covers no index.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.parent.is_empty() }

    /// Resets `p` to a singleton.
    pub fn make_set(&mut self, p: usize) {
        self.parent[p] = p;
    }

    /// Returns the representative of `p`, compressing the path behind it.
    pub fn find_root(&mut self, mut p: usize) -> usize {
        let mut root = p;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[p] != root {
            let next = self.parent[p];
            self.parent[p] = root;
            p = next;
        }

        root
    }

    /// Merges the sets of `p` and `q`, keeping the root of `p`.
    ///
    /// Returns the surviving representative.
    pub fn union_by_discovery(&mut self, p: usize, q: usize) -> usize {
        let rp = self.find_root(p);
        let rq = self.find_root(q);
        if rp != rq {
            self.link(rq, rp);
        }
        rp
    }

    /// Attaches the root `child` below the root `parent`.
    pub(crate) fn link(&mut self, child: usize, parent: usize) {
        debug_assert_eq!(self.parent[child], child, "{child} is not a root");
        self.parent[child] = parent;
    }
}
