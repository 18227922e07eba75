//! Max-tree construction by union-find flooding.
//!
//! Points are processed from the highest value to the lowest, equal values in
//! raster order. Every point allocates one raw node; a merge hangs the node of
//! the absorbed root below the node of the current point. A final scan from the
//! last raw node down renumbers the nodes root first and folds every raw node
//! into its parent when both carry the same value, leaving one node per flat
//! component of each upper level set.

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::{
    Result,
    config::TreeConfig,
    error::TreeError,
    image::{Image2d, Neighborhood, Point},
    tree::{ComponentTree, NodeId, NodeMap, node_id},
    union_find::{UnionFindVisitor, union_find},
};

/// Raw node allocation during flooding: one node per point.
struct Flooding {
    node_of: Vec<usize>,
    point_of: Vec<Point>,
    raw_parent: Vec<usize>,
}

impl Flooding {
    fn new(len: usize) -> Self {
        Self {
            node_of: vec![0; len],
            point_of: Vec::with_capacity(len),
            raw_parent: Vec::with_capacity(len),
        }
    }
}

impl UnionFindVisitor for Flooding {
    fn on_make_set(&mut self, p: Point) {
        let node = self.raw_parent.len();
        self.node_of[p] = node;
        self.point_of.push(p);
        self.raw_parent.push(node);
    }

    fn on_union(&mut self, root_p: Point, root_q: Point) -> Point {
        self.raw_parent[self.node_of[root_q]] = self.node_of[root_p];
        root_p
    }
}

/// Builds the max-tree of `image` under the natural ordering of its values.
///
/// # Errors
/// See [`build_maxtree_by`].
///
/// # Examples
/// ```
/// use canopy_core::{C4, Image2d, TreeConfig, build_maxtree};
///
/// let image = Image2d::from_rows(vec![vec![0_u8, 2, 0], vec![0, 5, 1]])?;
/// let (tree, nodemap) = build_maxtree(&image, &C4, &TreeConfig::default())?;
/// assert_eq!(tree.values(), &[0, 1, 2, 5]);
/// assert_eq!(tree.reconstruct(&nodemap), image);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_maxtree<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    config: &TreeConfig,
) -> Result<(ComponentTree<V>, NodeMap)>
where
    V: Ord + Clone,
    N: Neighborhood + ?Sized,
{
    build_maxtree_by(image, nbh, config, V::cmp)
}

/// Builds the min-tree of `image`: the max-tree under the reversed ordering.
///
/// # Errors
/// See [`build_maxtree_by`].
pub fn build_mintree<V, N>(
    image: &Image2d<V>,
    nbh: &N,
    config: &TreeConfig,
) -> Result<(ComponentTree<V>, NodeMap)>
where
    V: Ord + Clone,
    N: Neighborhood + ?Sized,
{
    build_maxtree_by(image, nbh, config, |a: &V, b: &V| b.cmp(a))
}

/// Builds the max-tree of `image` where `compare` ranks values from the root
/// (least) towards the leaves (greatest).
///
/// The root is node 0 and holds the least value. Points of equal value are
/// discovered in raster order, which is the only tie-break applied.
///
/// # Errors
/// Returns [`TreeError::EmptyDomain`] for an empty image and
/// [`TreeError::NodeCountOverflow`] when the image has more points than the
/// configured node limit; both are reported before any allocation.
#[instrument(
    name = "canopy.maxtree",
    err,
    skip_all,
    fields(width = image.width(), height = image.height()),
)]
pub fn build_maxtree_by<V, N, F>(
    image: &Image2d<V>,
    nbh: &N,
    config: &TreeConfig,
    mut compare: F,
) -> Result<(ComponentTree<V>, NodeMap)>
where
    V: Clone,
    N: Neighborhood + ?Sized,
    F: FnMut(&V, &V) -> Ordering,
{
    if image.is_empty() {
        return Err(TreeError::EmptyDomain);
    }
    config.check_node_count(image.len())?;

    let mut order: Vec<Point> = image.points().collect();
    order.sort_by(|&a, &b| compare(&image[b], &image[a]));

    let flooding = union_find(
        image.width(),
        image.height(),
        &order,
        nbh,
        &config.extension(),
        Flooding::new(image.len()),
    );

    let raw_len = flooding.raw_parent.len();
    let root = raw_len - 1;
    let mut id_of = vec![0_usize; raw_len];
    let mut parent: Vec<NodeId> = Vec::new();
    let mut values: Vec<V> = Vec::new();
    for x in (0..raw_len).rev() {
        // Components the neighbourhood never joined hang below the global root.
        let rp = match flooding.raw_parent[x] {
            rp if rp == x => root,
            rp => rp,
        };
        let value = &image[flooding.point_of[x]];
        let distinct =
            x == root || compare(value, &image[flooding.point_of[rp]]) != Ordering::Equal;
        if distinct {
            id_of[x] = parent.len();
            parent.push(node_id(id_of[rp]));
            values.push(value.clone());
        } else {
            id_of[x] = id_of[rp];
        }
    }

    let nodemap = Image2d::from_fn(image.width(), image.height(), |p| {
        node_id(id_of[flooding.node_of[p]])
    });

    debug!(
        raw_nodes = raw_len,
        nodes = parent.len(),
        "max-tree canonicalized"
    );
    Ok((ComponentTree::from_raw(parent, values), nodemap))
}
