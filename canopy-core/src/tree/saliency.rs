//! Edge saliency read off a component tree through its LCA structure.

use super::{ComponentTree, NodeMap};
use crate::{
    TreeConfig,
    image::{Grid, Neighborhood, Point},
    lca::LcaQuery,
};

impl<V: Clone> ComponentTree<V> {
    /// Weights every edge of the neighbourhood graph with the value of the
    /// lowest node containing both of its endpoints.
    ///
    /// Edges are listed once each, from every point `p` in raster order to its
    /// forward neighbours `q`, and come back as `(p, q, value)`. On an
    /// alpha-tree the value is the smallest alpha at which `p` and `q` join,
    /// which makes the result an ultrametric contour map.
    ///
    /// `nbh` and `config` should match the ones the tree was built with, and
    /// `lca` must have been prepared for `self`.
    ///
    /// # Panics
    /// Panics when `nodemap` or `lca` belong to another tree.
    ///
    /// # Examples
    /// ```
    /// use canopy_core::{C4, Image2d, LcaKind, TreeConfig, build_alphatree, make_lca};
    ///
    /// let image = Image2d::from_rows(vec![vec![1_u8, 1, 4]])?;
    /// let config = TreeConfig::default();
    /// let (tree, nodemap) = build_alphatree(&image, &C4, &config)?;
    /// let lca = make_lca(&tree, LcaKind::Linear);
    /// let edges = tree.saliency(&nodemap, &C4, &config, &lca);
    /// assert_eq!(edges, vec![(0, 1, 0), (1, 2, 3)]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn saliency<N, L>(
        &self,
        nodemap: &NodeMap,
        nbh: &N,
        config: &TreeConfig,
        lca: &L,
    ) -> Vec<(Point, Point, V)>
    where
        N: Neighborhood + ?Sized,
        L: LcaQuery + ?Sized,
    {
        let grid = Grid::new(nodemap.width(), nodemap.height(), nbh, &config.extension());
        nodemap
            .points()
            .flat_map(|p| grid.forward_neighbors(p).map(move |q| (p, q)))
            .map(|(p, q)| {
                let meet = lca.lca(nodemap[p], nodemap[q]);
                (p, q, self.value(meet).clone())
            })
            .collect()
    }
}
