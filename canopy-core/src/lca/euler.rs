//! Euler tour linearisation of a component tree.

use std::marker::PhantomData;

use crate::tree::{NodeId, node_id};

/// Depth-first tour recording a node every time the walk enters or returns to
/// it: `2n - 1` entries for `n` nodes, consecutive depths differing by one.
#[derive(Clone, Debug)]
pub(crate) struct EulerTour<'t> {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) depth: Vec<u32>,
    first: Vec<usize>,
    last: Vec<usize>,
    _tree: PhantomData<&'t [NodeId]>,
}

impl<'t> EulerTour<'t> {
    pub(crate) fn new(parent: &'t [NodeId]) -> Self {
        let n = parent.len();
        let nil = n;
        // Child lists in ascending order.
        let mut first_child = vec![nil; n];
        let mut next_child = vec![nil; n];
        for x in (1..n).rev() {
            let p = parent[x] as usize;
            next_child[x] = first_child[p];
            first_child[p] = x;
        }

        let len = (2 * n).saturating_sub(1);
        let mut nodes = Vec::with_capacity(len);
        let mut depth = Vec::with_capacity(len);
        let mut first = vec![0; n];
        let mut last = vec![0; n];
        let mut stack: Vec<(usize, usize)> = Vec::new();
        if n > 0 {
            nodes.push(0);
            depth.push(0);
            stack.push((0, first_child[0]));
        }
        while let Some(top) = stack.last_mut() {
            let child = top.1;
            if child == nil {
                stack.pop();
                if let Some(&(p, _)) = stack.last() {
                    last[p] = nodes.len();
                    nodes.push(node_id(p));
                    depth.push(node_id(stack.len() - 1));
                }
            } else {
                top.1 = next_child[child];
                first[child] = nodes.len();
                last[child] = nodes.len();
                nodes.push(node_id(child));
                depth.push(node_id(stack.len()));
                stack.push((child, first_child[child]));
            }
        }
        debug_assert_eq!(nodes.len(), len);

        Self {
            nodes,
            depth,
            first,
            last,
            _tree: PhantomData,
        }
    }

    /// Tour positions of the first visits of `x` and `y`, in increasing order.
    pub(crate) fn span(&self, x: NodeId, y: NodeId) -> (usize, usize) {
        let (a, b) = (self.first[x as usize], self.first[y as usize]);
        (a.min(b), a.max(b))
    }

    /// The one of `x` and `y` that is an ancestor of the other, if any.
    ///
    /// A node's first and last visits bracket every visit to its subtree.
    pub(crate) fn enclosing(&self, x: NodeId, y: NodeId) -> Option<NodeId> {
        let (xi, yi) = (x as usize, y as usize);
        if self.first[xi] <= self.first[yi] && self.last[yi] <= self.last[xi] {
            Some(x)
        } else if self.first[yi] <= self.first[xi] && self.last[xi] <= self.last[yi] {
            Some(y)
        } else {
            None
        }
    }
}
