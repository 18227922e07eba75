//! Union-find engine driving the tree builders and connected filters.
//!
//! [`union_find`] runs two linear passes over the points of a domain:
//!
//! 1. A forward pass in the caller's processing order. Each point becomes a
//!    singleton, then absorbs the components of its already processed
//!    neighbours. The surviving root of every merge is chosen by the
//!    [`UnionFindVisitor`], not by rank.
//! 2. A backward pass that compresses every point straight onto its final root
//!    and reports it through [`UnionFindVisitor::on_finish`].
//!
//! Components whose root passed [`UnionFindVisitor::test`] stop absorbing
//! neighbours; a point touching such a component inherits the `Pass` status
//! instead.

mod disjoint_set;

use tracing::{instrument, trace};

pub use self::disjoint_set::DisjointSet;
use crate::{
    config::Extension,
    image::{Grid, Neighborhood, Point},
};

/// Processing status of a point in the padded layout.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Status {
    /// Not processed yet, or part of a filled border.
    #[default]
    None,
    /// The component rooted here passed its test and stopped growing.
    Pass,
    /// The component rooted here keeps absorbing neighbours.
    Fail,
}

/// Merge policy plugged into [`union_find`].
///
/// All points handed to the hooks are raster indices of the image domain.
pub trait UnionFindVisitor {
    /// Called when `p` becomes a singleton.
    fn on_make_set(&mut self, _p: Point) {}

    /// Called before the components rooted at `root_p` (the one growing around
    /// the current point) and `root_q` merge.
    ///
    /// Returns the root that survives; it must be one of the two arguments.
    fn on_union(&mut self, root_p: Point, _root_q: Point) -> Point {
        root_p
    }

    /// Called once per point during the backward pass with its final root.
    fn on_finish(&mut self, _p: Point, _root: Point) {}

    /// Whether the component rooted at `root` should stop growing.
    fn test(&self, _root: Point) -> bool {
        false
    }
}

/// Runs the two-pass union-find over a `width x height` domain.
///
/// `order` lists every point once in processing order. The visitor is taken by
/// value and handed back once both passes are done.
///
/// # Examples
/// ```
/// use canopy_core::{C4, Extension, Point, UnionFindVisitor, union_find};
///
/// #[derive(Default)]
/// struct Roots(Vec<(Point, Point)>);
///
/// impl UnionFindVisitor for Roots {
///     fn on_finish(&mut self, p: Point, root: Point) {
///         self.0.push((p, root));
///     }
/// }
///
/// let roots = union_find(3, 1, &[0, 1, 2], &C4, &Extension::fill(), Roots::default());
/// assert!(roots.0.iter().all(|&(_, root)| root == 2));
/// ```
#[instrument(
    name = "canopy.union_find",
    skip_all,
    fields(width = width, height = height, points = order.len()),
)]
pub fn union_find<N, V>(
    width: usize,
    height: usize,
    order: &[Point],
    nbh: &N,
    extension: &Extension,
    mut visitor: V,
) -> V
where
    N: Neighborhood + ?Sized,
    V: UnionFindVisitor,
{
    debug_assert_eq!(order.len(), width * height, "order must cover the domain");
    let grid = Grid::new(width, height, nbh, extension);
    let mut set = DisjointSet::new(grid.padded_len());
    let mut status = vec![Status::None; grid.padded_len()];

    trace!(points = order.len(), "forward pass");
    for &p in order {
        let q = grid.to_padded(p);
        set.make_set(q);
        status[q] = Status::Fail;
        visitor.on_make_set(p);
        let mut root = q;
        let mut passed = false;

        for n in grid.neighbors(q) {
            if status[n] == Status::None {
                continue;
            }
            let rn = set.find_root(n);
            if rn == root {
                continue;
            }
            if status[rn] == Status::Pass {
                passed = true;
                continue;
            }
            let survivor = visitor.on_union(grid.to_image(root), grid.to_image(rn));
            let survivor = grid.to_padded(survivor);
            debug_assert!(
                survivor == root || survivor == rn,
                "visitor picked a survivor outside the merged roots"
            );
            let absorbed = if survivor == root { rn } else { root };
            set.link(absorbed, survivor);
            root = survivor;
        }

        status[root] = if passed || visitor.test(grid.to_image(root)) {
            Status::Pass
        } else {
            Status::Fail
        };
    }

    trace!(points = order.len(), "backward pass");
    for &p in order.iter().rev() {
        let root = set.find_root(grid.to_padded(p));
        visitor.on_finish(p, grid.to_image(root));
    }

    visitor
}
