//! Agreement tests for the LCA backends.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{LcaKind, LcaQuery, make_lca};
use crate::{C4, ComponentTree, Image2d, NodeId, TreeConfig, build_maxtree, tree::node_id};

/// Random tree in topological order: every node picks an earlier parent.
fn random_tree(rng: &mut SmallRng, n: usize) -> ComponentTree<u8> {
    let parent = (0..n)
        .map(|x| if x == 0 { 0 } else { node_id(rng.gen_range(0..x)) })
        .collect();
    ComponentTree::from_parts(parent, vec![0; n]).expect("parents precede children")
}

/// Reference answer: collect the ancestors of `x`, then climb from `y`.
fn ancestor_scan(parent: &[NodeId], x: NodeId, y: NodeId) -> NodeId {
    let mut marked = vec![false; parent.len()];
    let mut a = x as usize;
    loop {
        marked[a] = true;
        if a == 0 {
            break;
        }
        a = parent[a] as usize;
    }
    let mut b = y as usize;
    while !marked[b] {
        b = parent[b] as usize;
    }
    node_id(b)
}

#[rstest]
#[case::naive(LcaKind::Naive)]
#[case::sparse_table(LcaKind::SparseTable)]
#[case::linear(LcaKind::Linear)]
fn answers_known_queries(#[case] kind: LcaKind) {
    //        0
    //      / | \
    //     1  2  3
    //    /|     |
    //   4 5     6
    //   |
    //   7
    let tree = ComponentTree::from_parts(vec![0, 0, 0, 0, 1, 1, 3, 4], vec![0_u8; 8])
        .expect("valid tree");
    let lca = make_lca(&tree, kind);
    assert_eq!(lca.kind(), kind);
    assert_eq!(lca.lca(7, 5), 1);
    assert_eq!(lca.lca(5, 7), 1);
    assert_eq!(lca.lca(7, 6), 0);
    assert_eq!(lca.lca(4, 7), 4);
    assert_eq!(lca.lca(2, 2), 2);
    assert_eq!(lca.lca(0, 6), 0);
}

#[rstest]
#[case::naive(LcaKind::Naive)]
#[case::sparse_table(LcaKind::SparseTable)]
#[case::linear(LcaKind::Linear)]
fn single_node_tree(#[case] kind: LcaKind) {
    let tree = ComponentTree::from_parts(vec![0], vec![1_u8]).expect("valid tree");
    assert_eq!(make_lca(&tree, kind).lca(0, 0), 0);
}

#[rstest]
#[case(2, 11)]
#[case(64, 12)]
#[case(1_000, 13)]
#[case(5_000, 14)]
fn backends_agree_on_random_trees(#[case] n: usize, #[case] seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let tree = random_tree(&mut rng, n);
    let backends = [
        make_lca(&tree, LcaKind::Naive),
        make_lca(&tree, LcaKind::SparseTable),
        make_lca(&tree, LcaKind::Linear),
    ];
    for _ in 0..1_000 {
        let x = node_id(rng.gen_range(0..n));
        let y = node_id(rng.gen_range(0..n));
        let expected = ancestor_scan(tree.parents(), x, y);
        for lca in &backends {
            assert_eq!(lca.lca(x, y), expected, "{} on ({x}, {y})", lca.kind());
        }
    }
}

#[test]
fn chain_tree_answers_the_shallower_node() {
    let n = 300;
    let parent = (0..n).map(|x: usize| node_id(x.saturating_sub(1))).collect();
    let tree = ComponentTree::from_parts(parent, vec![0_u16; n]).expect("valid chain");
    let lca = make_lca(&tree, LcaKind::Linear);
    assert_eq!(lca.lca(299, 17), 17);
    assert_eq!(lca.lca(150, 151), 150);
}

#[test]
fn pixels_meet_at_the_component_containing_both() {
    // Two bright blobs on a dark floor: their pixels only meet at the root.
    let image = Image2d::from_rows(vec![
        vec![0_u8, 0, 0, 0, 0],
        vec![0, 5, 0, 7, 0],
        vec![0, 5, 0, 7, 0],
    ])
    .expect("rectangular rows");
    let (tree, nodemap) = build_maxtree(&image, &C4, &TreeConfig::default()).expect("build");
    for kind in [LcaKind::Naive, LcaKind::SparseTable, LcaKind::Linear] {
        let lca = make_lca(&tree, kind);
        let left = nodemap[6];
        let right = nodemap[8];
        assert_eq!(lca.lca(left, nodemap[11]), left);
        assert_eq!(lca.lca(left, right), 0);
        assert_eq!(*tree.value(lca.lca(left, right)), 0);
    }
}

#[test]
fn display_names_are_stable() {
    assert_eq!(LcaKind::Naive.to_string(), "naive");
    assert_eq!(LcaKind::SparseTable.to_string(), "sparse_table");
    assert_eq!(LcaKind::Linear.to_string(), "linear");
    assert_eq!(LcaKind::default(), LcaKind::Linear);
}
