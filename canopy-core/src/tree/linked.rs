//! Linked arena form of a component tree used for in-place pruning.
//!
//! Nodes are threaded in depth-first preorder through `next_node` and
//! `prev_node`. `next_sibling[x]` jumps to the first node after the subtree of
//! `x`, so a whole subtree is spliced out of the walk in constant time without
//! touching its members. Slot `n` is a sentinel closing the list into a ring.

use super::NodeId;

#[derive(Clone, Debug)]
pub(crate) struct LinkedTree {
    parent: Vec<usize>,
    next_node: Vec<usize>,
    prev_node: Vec<usize>,
    next_sibling: Vec<usize>,
    preorder: Vec<usize>,
    subtree_end: Vec<usize>,
}

impl LinkedTree {
    pub(crate) fn new(parent: &[NodeId]) -> Self {
        let n = parent.len();
        let nil = n;
        let parent: Vec<usize> = parent.iter().map(|&p| p as usize).collect();

        // Child lists in descending order so the stack pops the smallest child
        // first.
        let mut first_child = vec![nil; n];
        let mut next_child = vec![nil; n];
        for x in 1..n {
            next_child[x] = first_child[parent[x]];
            first_child[parent[x]] = x;
        }

        let mut preorder = Vec::with_capacity(n);
        let mut stack = if n > 0 { vec![0] } else { Vec::new() };
        while let Some(x) = stack.pop() {
            preorder.push(x);
            let mut child = first_child[x];
            while child != nil {
                stack.push(child);
                child = next_child[child];
            }
        }

        let mut size = vec![1_usize; n];
        for x in (1..n).rev() {
            size[parent[x]] += size[x];
        }
        let mut position = vec![0; n];
        for (pos, &x) in preorder.iter().enumerate() {
            position[x] = pos;
        }
        let subtree_end: Vec<usize> = (0..n).map(|x| position[x] + size[x]).collect();

        let mut next_node = vec![nil; n + 1];
        let mut prev_node = vec![nil; n + 1];
        let mut prev = nil;
        for &x in &preorder {
            next_node[prev] = x;
            prev_node[x] = prev;
            prev = x;
        }
        next_node[prev] = nil;
        prev_node[nil] = prev;

        let next_sibling = subtree_end
            .iter()
            .map(|&end| preorder.get(end).copied().unwrap_or(nil))
            .collect();

        Self {
            parent,
            next_node,
            prev_node,
            next_sibling,
            preorder,
            subtree_end,
        }
    }

    fn nil(&self) -> usize {
        self.parent.len()
    }

    /// Live nodes in preorder.
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let nil = self.nil();
        std::iter::successors(Some(self.next_node[nil]), move |&x| Some(self.next_node[x]))
            .take_while(move |&x| x != nil)
    }

    /// Splices out the subtree of every live node for which `doomed` holds.
    ///
    /// Descendants of a spliced node are skipped, so `doomed` only sees nodes
    /// whose ancestors all survived. The root is never removed.
    pub(crate) fn prune_subtrees<F>(&mut self, mut doomed: F) -> usize
    where
        F: FnMut(usize) -> bool,
    {
        let nil = self.nil();
        let mut pruned = 0;
        let mut x = self.next_node[nil];
        while x != nil {
            if x != 0 && doomed(x) {
                let end = self.next_sibling[x];
                let prev = self.prev_node[x];
                self.next_node[prev] = end;
                self.prev_node[end] = prev;
                pruned += 1;
                x = end;
            } else {
                x = self.next_node[x];
            }
        }
        self.repair_skips();
        pruned
    }

    /// Splices out every live node for which `doomed` holds, keeping its
    /// descendants in the walk. The root is never removed.
    pub(crate) fn remove_nodes<F>(&mut self, mut doomed: F) -> usize
    where
        F: FnMut(usize) -> bool,
    {
        let nil = self.nil();
        let mut removed = 0;
        let mut x = self.next_node[nil];
        while x != nil {
            let next = self.next_node[x];
            if x != 0 && doomed(x) {
                let prev = self.prev_node[x];
                self.next_node[prev] = next;
                self.prev_node[next] = prev;
                removed += 1;
            }
            x = next;
        }
        self.repair_skips();
        removed
    }

    /// Points every live `next_sibling` at the first live node after its
    /// subtree.
    fn repair_skips(&mut self) {
        let nil = self.nil();
        let alive = self.alive();
        let mut first_alive_from = vec![nil; self.preorder.len() + 1];
        for pos in (0..self.preorder.len()).rev() {
            let x = self.preorder[pos];
            first_alive_from[pos] = if alive[x] { x } else { first_alive_from[pos + 1] };
        }
        for x in self.iter().collect::<Vec<_>>() {
            self.next_sibling[x] = first_alive_from[self.subtree_end[x]];
        }
    }

    pub(crate) fn alive(&self) -> Vec<bool> {
        let mut alive = vec![false; self.parent.len()];
        for x in self.iter() {
            alive[x] = true;
        }
        alive
    }

    /// Maps every node to itself if it is live, else to the representative of
    /// its parent.
    pub(crate) fn representatives(&self) -> Vec<usize> {
        let alive = self.alive();
        let mut repr = vec![0; self.parent.len()];
        for x in 1..self.parent.len() {
            repr[x] = if alive[x] { x } else { repr[self.parent[x]] };
        }
        repr
    }

    #[cfg(test)]
    pub(crate) fn next_sibling(&self, x: usize) -> usize {
        self.next_sibling[x]
    }
}
