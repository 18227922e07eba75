#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Property suites over random images: tree invariants, filter policies,
//! LCA backends and the connected filters.

use std::collections::{BTreeSet, VecDeque};

use canopy_core::{
    C4, C8, ComponentTree, FilterPolicy, Image2d, LcaKind, LcaQuery, Neighborhood, NodeId,
    NodeMap, TreeConfig, area_closing, area_opening, build_alphatree, build_maxtree, make_lca,
};
use canopy_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{
    prelude::{Strategy, any, prop},
    prop_assert, prop_assert_eq, proptest,
    test_runner::Config as ProptestConfig,
};
use test_strategy::Arbitrary;

fn config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(64, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Connectivity sampled per case.
#[derive(Clone, Copy, Debug, Arbitrary)]
enum Connectivity {
    Four,
    Eight,
}

impl Connectivity {
    fn nbh(self) -> &'static dyn Neighborhood {
        match self {
            Self::Four => &C4,
            Self::Eight => &C8,
        }
    }
}

/// Images up to 9x9 with either few grey levels (large plateaus) or many.
fn images() -> impl Strategy<Value = Image2d<u8>> {
    (1_usize..10, 1_usize..10, prop::sample::select(vec![2_u8, 4, 16, 255])).prop_flat_map(
        |(width, height, levels)| {
            prop::collection::vec(0..levels, width * height).prop_map(move |pixels| {
                Image2d::from_vec(width, height, pixels).expect("buffer covers the image")
            })
        },
    )
}

fn maxtree(image: &Image2d<u8>, nbh: &dyn Neighborhood) -> (ComponentTree<u8>, NodeMap) {
    build_maxtree(image, nbh, &TreeConfig::default()).expect("non-empty image")
}

/// Counts the connected components of every upper level set `{v >= t}` that
/// reach level `t` exactly, which is the number of max-tree nodes.
fn count_level_components(image: &Image2d<u8>, nbh: &dyn Neighborhood) -> usize {
    let levels: BTreeSet<u8> = image.values().iter().copied().collect();
    let (width, height) = (image.width(), image.height());
    let mut total = 0;
    for &t in &levels {
        let mut seen = vec![false; image.len()];
        for start in image.points() {
            if seen[start] || image[start] < t {
                continue;
            }
            seen[start] = true;
            let mut queue = VecDeque::from([start]);
            let mut reaches_level = false;
            while let Some(p) = queue.pop_front() {
                reaches_level |= image[p] == t;
                let (x, y) = image.coords(p);
                for &(dx, dy) in nbh.offsets() {
                    let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                    else {
                        continue;
                    };
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let q = ny * width + nx;
                    if !seen[q] && image[q] >= t {
                        seen[q] = true;
                        queue.push_back(q);
                    }
                }
            }
            total += usize::from(reaches_level);
        }
    }
    total
}

fn ancestor_scan<V>(tree: &ComponentTree<V>, depth: &[usize], x: NodeId, y: NodeId) -> NodeId {
    let (mut x, mut y) = (x, y);
    while x != y {
        if depth[x as usize] >= depth[y as usize] {
            x = tree.parent_of(x);
        } else {
            y = tree.parent_of(y);
        }
    }
    x
}

fn unchanged_pixels(image: &Image2d<u8>, filtered: &Image2d<u8>) -> usize {
    image
        .values()
        .iter()
        .zip(filtered.values())
        .filter(|(a, b)| a == b)
        .count()
}

const POLICIES: [FilterPolicy; 3] = [FilterPolicy::Direct, FilterPolicy::Min, FilterPolicy::Max];

proptest! {
    #![proptest_config(config())]

    #[test]
    fn maxtree_reconstructs_and_orders_nodes(
        image in images(),
        connectivity in any::<Connectivity>(),
    ) {
        let (tree, nodemap) = maxtree(&image, connectivity.nbh());
        prop_assert_eq!(tree.reconstruct(&nodemap), image);
        prop_assert_eq!(tree.parent_of(0), 0);

        let depth = tree.depth();
        prop_assert_eq!(depth[0], 0);
        for x in tree.nodes().skip(1) {
            let p = tree.parent_of(x);
            prop_assert!(p < x);
            prop_assert!(tree.value(p) < tree.value(x));
            prop_assert_eq!(depth[x as usize], depth[p as usize] + 1);
        }
    }

    #[test]
    fn maxtree_has_one_node_per_level_component(
        image in images(),
        connectivity in any::<Connectivity>(),
    ) {
        let (tree, _) = maxtree(&image, connectivity.nbh());
        prop_assert_eq!(tree.len(), count_level_components(&image, connectivity.nbh()));
    }

    #[test]
    fn filters_keep_topology_and_relabel_onto_survivors(
        image in images(),
        connectivity in any::<Connectivity>(),
        min_area in 1_usize..20,
    ) {
        let (tree, nodemap) = maxtree(&image, connectivity.nbh());
        let area = tree.area(&nodemap);
        for policy in POLICIES {
            let filtered = tree.filter(policy, |x| area[x as usize] >= min_area);
            let (new_tree, relabeling) = (filtered.tree(), filtered.relabeling());
            prop_assert!(new_tree.len() <= tree.len());
            prop_assert_eq!(new_tree.parent_of(0), 0);
            for x in new_tree.nodes().skip(1) {
                prop_assert!(new_tree.parent_of(x) < x);
            }
            prop_assert_eq!(relabeling.as_slice().len(), tree.len());
            prop_assert_eq!(relabeling.get(0), 0);
            for x in tree.nodes() {
                let target = relabeling.get(x);
                prop_assert!((target as usize) < new_tree.len());
                // A node lands on itself or on an ancestor, never on a sibling.
                let parent_target = relabeling.get(tree.parent_of(x));
                prop_assert!(target >= parent_target);
            }

            let mut relabeled = nodemap.clone();
            relabeling.apply(&mut relabeled);
            prop_assert!(relabeled.values().iter().all(|&node| (node as usize) < new_tree.len()));
        }
    }

    #[test]
    fn accepting_every_node_changes_nothing(
        image in images(),
        connectivity in any::<Connectivity>(),
    ) {
        let (tree, nodemap) = maxtree(&image, connectivity.nbh());
        for policy in POLICIES {
            let filtered = tree.filter(policy, |_| true);
            prop_assert!(filtered.relabeling().is_identity());
            prop_assert_eq!(filtered.tree().parents(), tree.parents());
            prop_assert_eq!(filtered.tree().reconstruct(&nodemap), image.clone());
        }
        let subtractive = tree.filter_subtractive(|_| true);
        prop_assert!(subtractive.relabeling().is_identity());
        prop_assert_eq!(subtractive.tree(), &tree);
    }

    #[test]
    fn min_changes_at_least_as_much_as_direct(
        image in images(),
        connectivity in any::<Connectivity>(),
        cutoff in 0_u8..=255,
    ) {
        let (tree, nodemap) = maxtree(&image, connectivity.nbh());
        // A non-increasing criterion so the policies disagree.
        let keep = |x: NodeId| tree.value(x) % 2 == 0 || *tree.value(x) > cutoff;
        let rendered = |policy| {
            let filtered = tree.filter(policy, keep);
            let mut relabeled = nodemap.clone();
            filtered.relabeling().apply(&mut relabeled);
            filtered.tree().reconstruct(&relabeled)
        };
        let direct = unchanged_pixels(&image, &rendered(FilterPolicy::Direct));
        let min = unchanged_pixels(&image, &rendered(FilterPolicy::Min));
        prop_assert!(min <= direct, "min kept {min} pixels, direct kept {direct}");

        let survivors = |policy| tree.filter(policy, keep).tree().len();
        prop_assert!(survivors(FilterPolicy::Max) >= survivors(FilterPolicy::Direct));
        prop_assert!(survivors(FilterPolicy::Min) <= survivors(FilterPolicy::Direct));
    }

    #[test]
    fn lca_backends_match_an_ancestor_scan(
        image in images(),
        connectivity in any::<Connectivity>(),
    ) {
        let (tree, _) = maxtree(&image, connectivity.nbh());
        let depth = tree.depth();
        let backends = [LcaKind::Naive, LcaKind::SparseTable, LcaKind::Linear]
            .map(|kind| make_lca(&tree, kind));
        for x in tree.nodes() {
            for y in tree.nodes() {
                let expected = ancestor_scan(&tree, &depth, x, y);
                for lca in &backends {
                    prop_assert_eq!(lca.lca(x, y), expected, "{} on ({}, {})", lca.kind(), x, y);
                }
            }
        }
    }

    #[test]
    fn alphatree_size_is_bounded_by_its_dendrogram(
        image in images(),
        connectivity in any::<Connectivity>(),
    ) {
        let n = image.len();
        let (tree, nodemap) =
            build_alphatree(&image, connectivity.nbh(), &TreeConfig::default())
                .expect("non-empty image");
        prop_assert!(tree.len() >= n);
        prop_assert!(tree.len() <= 2 * n - 1);
        for x in tree.nodes().skip(1) {
            prop_assert!(tree.parent_of(x) < x);
        }
        // Cutting below every weight isolates the flat zones, which are
        // exactly the level components of the image under the same adjacency.
        let flat_zones: BTreeSet<NodeId> =
            tree.horizontal_cut(&0, &nodemap).values().iter().copied().collect();
        let (components, _) = maxtree(&image, connectivity.nbh());
        prop_assert!(flat_zones.len() >= components.len());
    }

    #[test]
    fn area_opening_matches_a_direct_area_filter(
        image in images(),
        connectivity in any::<Connectivity>(),
        min_area in 1_usize..30,
    ) {
        let nbh = connectivity.nbh();
        let (tree, mut nodemap) = maxtree(&image, nbh);
        let area = tree.area(&nodemap);
        let filtered = tree.filter(FilterPolicy::Direct, |x| area[x as usize] >= min_area);
        filtered.relabeling().apply(&mut nodemap);
        let expected = filtered.tree().reconstruct(&nodemap);
        prop_assert_eq!(area_opening(&image, nbh, min_area, &TreeConfig::default()), expected);
    }

    #[test]
    fn area_closing_is_the_dual_of_opening(
        image in images(),
        connectivity in any::<Connectivity>(),
        min_area in 1_usize..30,
    ) {
        let nbh = connectivity.nbh();
        let config = TreeConfig::default();
        let inverted = image.map(|&v| u8::MAX - v);
        let expected = area_opening(&inverted, nbh, min_area, &config).map(|&v| u8::MAX - v);
        prop_assert_eq!(area_closing(&image, nbh, min_area, &config), expected);
    }
}
