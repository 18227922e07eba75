//! Alpha-tree construction by Kruskal merging over neighbourhood edges.
//!
//! Every pixel is a leaf. Edges of the neighbourhood graph are merged in
//! ascending weight order, each accepted edge creating one binary node valued
//! at its weight. The dendrogram is then reversed so the root comes first, and
//! internal nodes that carry the same weight as their surviving parent are
//! folded into it, turning runs of equal-weight binary merges into one k-ary
//! node. Leaves are never folded.

use std::cmp::Ordering;

use tracing::{debug, instrument, trace};

use crate::{
    Result,
    config::TreeConfig,
    error::TreeError,
    filter::Contrast,
    image::{Grid, Image2d, Neighborhood, Point},
    tree::{ComponentTree, NodeId, NodeMap, node_id},
    union_find::DisjointSet,
};

/// Builds the alpha-tree of `image` with `|a - b|` as dissimilarity.
///
/// # Errors
/// See [`build_alphatree_by`].
///
/// # Examples
/// ```
/// use canopy_core::{C4, Image2d, TreeConfig, build_alphatree};
///
/// let image = Image2d::from_rows(vec![vec![1_u8, 1, 4]])?;
/// let (tree, nodemap) = build_alphatree(&image, &C4, &TreeConfig::default())?;
/// // root(3) -> {a(0) -> {leaf 0, leaf 1}, leaf 2}
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.value(0), &3);
/// assert_eq!(tree.parent_of(nodemap[0]), tree.parent_of(nodemap[1]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_alphatree<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    config: &TreeConfig,
) -> Result<(ComponentTree<V>, NodeMap)>
where
    V: Contrast + PartialOrd + Default + Clone,
    N: Neighborhood + ?Sized,
{
    build_alphatree_by(image, nbh, config, V::abs_diff)
}

/// Builds the alpha-tree of `image` under an arbitrary dissimilarity.
///
/// Leaves hold `W::default()`. Edges of equal weight are merged in the order
/// they are discovered: by source point in raster order, then by the order of
/// the neighbourhood's forward offsets.
///
/// The weights must be totally ordered among themselves. When the
/// neighbourhood leaves the image in several components (a row-only
/// neighbourhood, say), they are joined under one top node valued at the
/// largest accepted weight, so [`ComponentTree::horizontal_cut`] at or above
/// that weight merges components no edge connects.
///
/// # Errors
/// Returns [`TreeError::EmptyDomain`] for an empty image,
/// [`TreeError::NodeCountOverflow`] when the `2n - 1` nodes of the dendrogram
/// exceed the configured node limit, and [`TreeError::IncomparableWeight`]
/// when two dissimilarities cannot be ordered against each other (such as
/// NaN against anything).
#[instrument(
    name = "canopy.alphatree",
    err,
    skip_all,
    fields(width = image.width(), height = image.height()),
)]
pub fn build_alphatree_by<V, W, N, F>(
    image: &Image2d<V>,
    nbh: &N,
    config: &TreeConfig,
    mut dissimilarity: F,
) -> Result<(ComponentTree<W>, NodeMap)>
where
    W: PartialOrd + Default + Clone,
    N: Neighborhood + ?Sized,
    F: FnMut(&V, &V) -> W,
{
    if image.is_empty() {
        return Err(TreeError::EmptyDomain);
    }
    let n = image.len();
    config.check_node_count(2 * n - 1)?;

    let grid = Grid::new(image.width(), image.height(), nbh, &config.extension());
    let mut edges: Vec<(Point, Point, W)> = Vec::new();
    for p in image.points() {
        for q in grid.forward_neighbors(p) {
            if q == p {
                continue;
            }
            let weight = dissimilarity(&image[p], &image[q]);
            if weight.partial_cmp(&weight).is_none() {
                return Err(TreeError::IncomparableWeight { left: p, right: q });
            }
            edges.push((p, q, weight));
        }
    }
    let edges = sort_edges(edges)?;
    trace!(edges = edges.len(), "edges sorted");

    let (raw_parent, raw_values) = kruskal(n, edges);
    let m = raw_parent.len();

    // Reverse so the root is first and every parent precedes its children.
    let parent: Vec<usize> = raw_parent.iter().rev().map(|&p| m - 1 - p).collect();
    let values: Vec<W> = raw_values.into_iter().rev().collect();

    let leaves_start = m - n;
    let mut repr = vec![0_usize; m];
    for x in 1..m {
        let rp = repr[parent[x]];
        let folded = x < leaves_start && values[x].partial_cmp(&values[rp]) == Some(Ordering::Equal);
        repr[x] = if folded { rp } else { x };
    }

    let mut new_id = vec![0_usize; m];
    let mut tree_parent: Vec<NodeId> = Vec::with_capacity(m);
    let mut tree_values: Vec<W> = Vec::with_capacity(m);
    for (x, value) in values.into_iter().enumerate() {
        if repr[x] != x {
            continue;
        }
        new_id[x] = tree_parent.len();
        tree_parent.push(node_id(new_id[repr[parent[x]]]));
        tree_values.push(value);
    }

    let nodemap = Image2d::from_fn(image.width(), image.height(), |p| {
        node_id(new_id[m - 1 - p])
    });

    debug!(
        raw_nodes = m,
        nodes = tree_parent.len(),
        "alpha-tree canonicalized"
    );
    Ok((ComponentTree::from_raw(tree_parent, tree_values), nodemap))
}

/// Stable merge sort by weight. Fails on the first pair of weights that do
/// not compare, naming the later edge.
fn sort_edges<W>(mut edges: Vec<(Point, Point, W)>) -> Result<Vec<(Point, Point, W)>>
where
    W: PartialOrd,
{
    if edges.len() < 2 {
        return Ok(edges);
    }
    let back = edges.split_off(edges.len() / 2);
    let mut front = sort_edges(edges)?.into_iter().peekable();
    let mut back = sort_edges(back)?.into_iter().peekable();
    let mut merged = Vec::with_capacity(front.len() + back.len());
    while let (Some(a), Some(b)) = (front.peek(), back.peek()) {
        let order = a.2.partial_cmp(&b.2).ok_or(TreeError::IncomparableWeight {
            left: b.0,
            right: b.1,
        })?;
        let next = if order == Ordering::Greater {
            back.next()
        } else {
            front.next()
        };
        merged.extend(next);
    }
    merged.extend(front);
    merged.extend(back);
    Ok(merged)
}

/// Runs Kruskal over sorted edges and returns the binary dendrogram, leaves
/// first. Components left apart by the neighbourhood are joined under one
/// extra node valued at the largest accepted weight.
fn kruskal<W>(n: usize, edges: Vec<(Point, Point, W)>) -> (Vec<usize>, Vec<W>)
where
    W: Default + Clone,
{
    let mut set = DisjointSet::new(n);
    let mut component_node: Vec<usize> = (0..n).collect();
    let mut raw_parent: Vec<usize> = (0..n).collect();
    let mut raw_values: Vec<W> = vec![W::default(); n];
    let full = 2 * n - 1;

    for (p, q, weight) in edges {
        if raw_parent.len() == full {
            break;
        }
        let rp = set.find_root(p);
        let rq = set.find_root(q);
        if rp == rq {
            continue;
        }
        let node = raw_parent.len();
        raw_parent[component_node[rp]] = node;
        raw_parent[component_node[rq]] = node;
        raw_parent.push(node);
        raw_values.push(weight);
        let survivor = set.union_by_discovery(rp, rq);
        component_node[survivor] = node;
    }

    if raw_parent.len() < full {
        let top = raw_parent.len();
        let weight = raw_values[top - 1].clone();
        for p in 0..n {
            if set.find_root(p) == p {
                raw_parent[component_node[p]] = top;
            }
        }
        raw_parent.push(top);
        raw_values.push(weight);
    }
    (raw_parent, raw_values)
}
