//! Unit tests for tree filtering and the union-find connected filters.

use std::cell::Cell;

use rstest::{fixture, rstest};

use super::*;
use crate::{C4, C8, Image2d, TreeConfig, build_maxtree};

/// `0 -> 1 -> 2 -> 3` with values equal to the ids.
#[fixture]
fn chain() -> ComponentTree<u8> {
    ComponentTree::from_parts(vec![0, 0, 1, 2], vec![0, 1, 2, 3]).expect("valid chain")
}

/// ```text
///     0
///    / \
///   1   2
///   |   |
///   3   4
/// ```
#[fixture]
fn fork() -> ComponentTree<u8> {
    ComponentTree::from_parts(vec![0, 0, 0, 1, 2], vec![0, 1, 1, 2, 2]).expect("valid fork")
}

fn level_image() -> Image2d<u8> {
    Image2d::from_rows(vec![
        vec![0, 0, 0, 0, 0, 0],
        vec![0, 10, 12, 0, 0, 0],
        vec![0, 10, 15, 0, 0, 0],
        vec![0, 0, 0, 0, 8, 10],
        vec![0, 0, 0, 12, 6, 17],
    ])
    .expect("rectangular rows")
}

#[test]
fn min_policy_collapses_failing_subtrees() {
    let image = level_image();
    let (tree, mut nodemap) = build_maxtree(&image, &C4, &TreeConfig::default()).expect("build");
    let filtered = tree.filter(FilterPolicy::Min, |x| matches!(tree.value(x), 6 | 8 | 10));
    filtered.relabeling().apply(&mut nodemap);

    let expected = Image2d::from_rows(vec![
        vec![0, 0, 0, 0, 0, 0],
        vec![0, 10, 10, 0, 0, 0],
        vec![0, 10, 10, 0, 0, 0],
        vec![0, 0, 0, 0, 8, 10],
        vec![0, 0, 0, 6, 6, 10],
    ])
    .expect("rectangular rows");
    assert_eq!(filtered.tree().reconstruct(&nodemap), expected);
}

#[rstest]
fn direct_reparents_children(chain: ComponentTree<u8>) {
    let filtered = chain.filter(FilterPolicy::Direct, |x| x != 1);
    assert_eq!(filtered.tree().parents(), &[0, 0, 1]);
    assert_eq!(filtered.tree().values(), &[0, 2, 3]);
    assert_eq!(filtered.relabeling().as_slice(), &[0, 0, 1, 2]);
}

#[rstest]
fn min_drops_whole_subtrees(chain: ComponentTree<u8>) {
    let filtered = chain.filter(FilterPolicy::Min, |x| x != 1);
    assert_eq!(filtered.tree().len(), 1);
    assert_eq!(filtered.relabeling().as_slice(), &[0, 0, 0, 0]);
}

#[rstest]
fn max_keeps_ancestors_of_passing_nodes(chain: ComponentTree<u8>) {
    let filtered = chain.filter(FilterPolicy::Max, |x| x == 3);
    assert!(filtered.relabeling().is_identity());
    assert_eq!(filtered.tree(), &chain);
}

#[rstest]
fn max_prunes_branches_without_survivors(fork: ComponentTree<u8>) {
    let filtered = fork.filter(FilterPolicy::Max, |x| x == 3);
    assert_eq!(filtered.tree().parents(), &[0, 0, 1]);
    assert_eq!(filtered.relabeling().as_slice(), &[0, 1, 0, 2, 0]);
}

#[rstest]
fn subtractive_preserves_local_contrast(chain: ComponentTree<u8>) {
    let filtered = chain.filter_subtractive(|x| x != 1);
    assert_eq!(filtered.tree().parents(), &[0, 0, 1]);
    assert_eq!(filtered.tree().values(), &[0, 1, 2]);
}

#[test]
fn subtractive_clamps_at_the_type_bounds() {
    let tree = ComponentTree::from_parts(vec![0, 0, 1], vec![250_u8, 100, 200]).expect("valid");
    let filtered = tree.filter_subtractive(|x| x != 1);
    assert_eq!(filtered.tree().values(), &[250, 255]);
}

#[rstest]
#[case(FilterPolicy::Direct)]
#[case(FilterPolicy::Min)]
#[case(FilterPolicy::Max)]
fn accepting_everything_is_the_identity(#[case] policy: FilterPolicy) {
    let image = level_image();
    let (tree, mut nodemap) = build_maxtree(&image, &C8, &TreeConfig::default()).expect("build");
    let filtered = tree.filter(policy, |_| true);
    assert!(filtered.relabeling().is_identity());
    filtered.relabeling().apply(&mut nodemap);
    assert_eq!(filtered.tree().reconstruct(&nodemap), image);
}

#[rstest]
#[case(FilterPolicy::Direct)]
#[case(FilterPolicy::Min)]
#[case(FilterPolicy::Max)]
fn root_survives_rejection(fork: ComponentTree<u8>, #[case] policy: FilterPolicy) {
    let (tree, relabeling) = fork.filter(policy, |_| false).into_parts();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.values(), &[0]);
    assert!(relabeling.as_slice().iter().all(|&node| node == 0));
}

#[rstest]
fn subtractive_keeps_only_the_root_on_rejection(fork: ComponentTree<u8>) {
    let (tree, relabeling) = fork.filter_subtractive(|_| false).into_parts();
    assert_eq!(tree.values(), &[0]);
    assert!(relabeling.as_slice().iter().all(|&node| node == 0));
}

#[rstest]
#[case(FilterPolicy::Direct)]
#[case(FilterPolicy::Min)]
#[case(FilterPolicy::Max)]
fn boolean_trees_filter_without_arithmetic(#[case] policy: FilterPolicy) {
    let image = Image2d::from_rows(vec![vec![true, true, false, false, true]]).expect("single row");
    let (tree, mut nodemap) = build_maxtree(&image, &C4, &TreeConfig::default()).expect("build");
    let area = tree.area(&nodemap);
    let filtered = tree.filter(policy, |x| area[x as usize] >= 2);
    assert_eq!(filtered.tree().values(), &[false, true]);
    filtered.relabeling().apply(&mut nodemap);
    assert_eq!(
        filtered.tree().reconstruct(&nodemap).values(),
        &[true, true, false, false, false]
    );
}

#[rstest]
fn predicate_runs_once_per_node(fork: ComponentTree<u8>) {
    let calls = Cell::new(0);
    let _filtered = fork.filter(FilterPolicy::Max, |x| {
        calls.set(calls.get() + 1);
        x % 2 == 0
    });
    assert_eq!(calls.get(), fork.len());
}

#[test]
fn relabeling_moves_node_maps() {
    let tree = ComponentTree::from_parts(vec![0, 0, 1], vec![0_u8, 4, 9]).expect("valid");
    let mut nodemap = Image2d::from_vec(3, 1, vec![0, 1, 2]).expect("3x1 map");
    let filtered = tree.filter(FilterPolicy::Direct, |x| x != 1);
    assert_eq!(filtered.relabeling().get(2), 1);
    filtered.relabeling().apply(&mut nodemap);
    assert_eq!(nodemap.values(), &[0, 0, 1]);
    assert_eq!(filtered.tree().reconstruct(&nodemap).values(), &[0, 0, 9]);
}

#[test]
fn policies_display_lowercase() {
    assert_eq!(FilterPolicy::Direct.to_string(), "direct");
    assert_eq!(FilterPolicy::Min.to_string(), "min");
    assert_eq!(FilterPolicy::Max.to_string(), "max");
}

#[rstest]
#[case(1, vec![0, 9, 0, 7, 7])]
#[case(2, vec![0, 0, 0, 7, 7])]
#[case(3, vec![0, 0, 0, 0, 0])]
fn area_opening_removes_small_peaks(#[case] area: usize, #[case] expected: Vec<u8>) {
    let image = Image2d::from_rows(vec![vec![0_u8, 9, 0, 7, 7]]).expect("single row");
    let opened = area_opening(&image, &C4, area, &TreeConfig::default());
    assert_eq!(opened.values(), expected.as_slice());
}

#[test]
fn area_closing_fills_small_pits() {
    let image = Image2d::from_rows(vec![vec![9_u8, 0, 9, 2, 2]]).expect("single row");
    let closed = area_closing(&image, &C4, 2, &TreeConfig::default());
    assert_eq!(closed.values(), &[9, 9, 9, 2, 2]);
}

#[rstest]
#[case(0, vec![0, 3, 1, 5, 0])]
#[case(3, vec![0, 1, 1, 1, 0])]
#[case(5, vec![0, 0, 0, 0, 0])]
fn dynamic_opening_flattens_low_contrast_peaks(#[case] dynamic: u8, #[case] expected: Vec<u8>) {
    let image = Image2d::from_rows(vec![vec![0_u8, 3, 1, 5, 0]]).expect("single row");
    let opened = dynamic_opening(&image, &C4, dynamic, &TreeConfig::default());
    assert_eq!(opened.values(), expected.as_slice());
}

#[test]
fn dynamic_closing_is_the_dual() {
    let image = Image2d::from_rows(vec![vec![9_u8, 6, 8, 4, 9]]).expect("single row");
    let closed = dynamic_closing(&image, &C4, 3, &TreeConfig::default());
    assert_eq!(closed.values(), &[9, 8, 8, 8, 9]);
}
