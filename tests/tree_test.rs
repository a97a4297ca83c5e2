//! Traversal properties over differently shaped trees

use std::collections::HashSet;

use rsforest::{NodeId, Tree, TreeBuilder, TreeNodeConvert};
use rstest::rstest;

/// Builds a tree where node `n` gets `fanout(n)` children numbered after it.
fn build(depth_limit: u32, fanout: fn(u32) -> u32) -> Tree<(u32, u32)> {
    let mut next = 1;
    TreeBuilder::new()
        .build_from_root((0, 0), |&(_, level)| {
            if level >= depth_limit {
                return Vec::new();
            }
            (0..fanout(next))
                .map(|_| {
                    next += 1;
                    (next, level + 1)
                })
                .collect()
        })
        .unwrap()
}

fn ids<'a, M: 'a>(nodes: impl Iterator<Item = rsforest::NodeRef<'a, M>>) -> HashSet<NodeId> {
    nodes.map(|n| n.id()).collect()
}

#[rstest]
#[case::lone_root(0, |_| 0)]
#[case::chain(6, |_| 1)]
#[case::binary(4, |_| 2)]
#[case::ragged(5, |n| n % 3)]
#[case::wide(1, |_| 12)]
fn given_tree_when_walking_descendants_then_covers_all_but_root(
    #[case] depth: u32,
    #[case] fanout: fn(u32) -> u32,
) {
    let tree = build(depth, fanout);

    let descendants: Vec<NodeId> = tree.descendants().map(|n| n.id()).collect();

    assert_eq!(descendants.len(), tree.node_count() - 1);
    assert!(!descendants.contains(&tree.root()));
    let unique: HashSet<_> = descendants.iter().copied().collect();
    assert_eq!(unique.len(), descendants.len());
}

#[rstest]
#[case::chain(6, |_| 1)]
#[case::binary(4, |_| 2)]
#[case::ragged(5, |n| n % 3)]
fn given_tree_when_splitting_leaves_and_non_leaves_then_partition_descendants(
    #[case] depth: u32,
    #[case] fanout: fn(u32) -> u32,
) {
    let tree = build(depth, fanout);

    let all = ids(tree.descendants());
    let leaves = ids(tree.leaf_nodes());
    let non_leaves = ids(tree.non_leaf_nodes());

    assert!(leaves.is_disjoint(&non_leaves));
    let union: HashSet<_> = leaves.union(&non_leaves).copied().collect();
    assert_eq!(union, all);
}

#[rstest]
#[case::binary(4, |_| 2)]
#[case::ragged(5, |n| n % 3)]
fn given_unmodified_tree_when_walking_twice_then_order_is_identical(
    #[case] depth: u32,
    #[case] fanout: fn(u32) -> u32,
) {
    let tree = build(depth, fanout);

    let first: Vec<NodeId> = tree.descendants().map(|n| n.id()).collect();
    let second: Vec<NodeId> = tree.descendants().map(|n| n.id()).collect();

    assert_eq!(first, second);
}

#[test]
fn given_equal_input_when_building_twice_then_walk_order_matches() {
    let first = build(4, |n| n % 3 + 1);
    let second = build(4, |n| n % 3 + 1);

    let models = |tree: &Tree<(u32, u32)>| -> Vec<(u32, u32)> {
        tree.descendants().map(|n| *n.model()).collect()
    };

    assert_eq!(models(&first), models(&second));
}

#[test]
fn given_descendants_when_walking_then_parent_precedes_child() {
    let tree = build(4, |_| 2);
    let order: Vec<NodeId> = tree.descendants().map(|n| n.id()).collect();

    for (pos, id) in order.iter().enumerate() {
        let node = tree.node(*id).unwrap();
        let parent = node.parent().unwrap();
        if !parent.is_root() {
            let parent_pos = order.iter().position(|p| *p == parent.id()).unwrap();
            assert!(parent_pos < pos);
        }
    }
}

#[test]
fn given_tree_when_postorder_iterating_then_visits_leaves_before_root() {
    let tree = build(3, |_| 2);

    let order: Vec<NodeId> = tree.iter_postorder().map(|n| n.id()).collect();

    assert_eq!(order.len(), tree.node_count());
    assert_eq!(order.last(), Some(&tree.root()));
}

#[test]
fn given_tree_when_rendering_then_lists_every_node() {
    let tree = build(2, |_| 2);

    let rendered = tree
        .render_with(|(id, _)| id.to_string())
        .to_string();

    assert_eq!(rendered.lines().count(), tree.node_count());
}

#[test]
fn given_display_models_when_converting_then_matches_label_rendering() {
    let tree = TreeBuilder::new()
        .build_from_root(1, |&n| if n < 3 { vec![n + 1] } else { vec![] })
        .unwrap();

    assert_eq!(tree.to_tree_string().to_string(), "1\n└── 2\n    └── 3\n");
}
