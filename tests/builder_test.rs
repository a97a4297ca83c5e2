//! Tests for TreeBuilder construction strategies

use std::collections::HashSet;

use rsforest::{BuildOptions, DomainError, Tree, TreeBuilder};

#[derive(Debug, Clone, PartialEq)]
struct Rec {
    id: u32,
    parent: Option<u32>,
}

fn rec(id: u32, parent: Option<u32>) -> Rec {
    Rec { id, parent }
}

fn ids<'a>(nodes: impl Iterator<Item = rsforest::NodeRef<'a, Rec>>) -> Vec<u32> {
    nodes.map(|n| n.model().id).collect()
}

// ============================================================
// Flat relation
// ============================================================

//      1
//     / \
//    2   3
//    |
//    4
#[test]
fn given_flat_records_when_building_then_produces_single_rooted_tree() {
    // Arrange
    let records = vec![
        rec(1, None),
        rec(2, Some(1)),
        rec(3, Some(1)),
        rec(4, Some(2)),
    ];

    // Act
    let forest = TreeBuilder::new()
        .build_from_flat_relation(records, |r: &Rec| r.id, |r: &Rec| r.parent)
        .unwrap();

    // Assert
    assert_eq!(forest.len(), 1);
    let tree = &forest[0];
    assert_eq!(tree[tree.root()].id, 1);
    assert_eq!(ids(tree.root_ref().children()), vec![2, 3]);

    let two = tree.root_ref().children().next().unwrap();
    assert_eq!(ids(two.children()), vec![4]);

    assert_eq!(ids(tree.descendants()), vec![2, 4, 3]);
    let leaves: HashSet<u32> = tree.leaf_nodes().map(|n| n.model().id).collect();
    assert_eq!(leaves, HashSet::from([3, 4]));
}

#[test]
fn given_flat_records_when_building_then_every_record_appears_once() {
    // Arrange
    let records = vec![
        rec(10, None),
        rec(11, Some(10)),
        rec(20, None),
        rec(21, Some(20)),
        rec(22, Some(21)),
        rec(30, Some(404)),
    ];

    // Act
    let forest = TreeBuilder::new()
        .build_from_flat_relation(records.clone(), |r: &Rec| r.id, |r: &Rec| r.parent)
        .unwrap();

    // Assert
    let mut seen: Vec<u32> = forest
        .iter()
        .flat_map(|tree| tree.iter().map(|n| n.model().id))
        .collect();
    seen.sort();
    let mut expected: Vec<u32> = records.iter().map(|r| r.id).collect();
    expected.sort();
    assert_eq!(seen, expected);

    for tree in &forest {
        for node in tree.descendants() {
            let parent = node.parent().unwrap();
            assert_eq!(node.model().parent, Some(parent.model().id));
        }
    }
    let roots: Vec<u32> = forest.iter().map(|t| t[t.root()].id).collect();
    assert_eq!(roots, vec![10, 20, 30]);
}

#[test]
fn given_non_nullable_parent_key_when_building_then_fails_before_reading_input() {
    // Arrange: any attempt to read the input panics
    let input = std::iter::from_fn(|| -> Option<(u32, u32)> { panic!("input was read") });

    // Act
    let result = TreeBuilder::new().build_from_flat_relation(
        input,
        |r: &(u32, u32)| r.0,
        |r: &(u32, u32)| r.1,
    );

    // Assert
    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
}

#[test]
fn given_empty_input_when_building_then_returns_empty_forest() {
    let forest = TreeBuilder::new()
        .build_from_flat_relation(Vec::<Rec>::new(), |r: &Rec| r.id, |r: &Rec| r.parent)
        .unwrap();
    assert!(forest.is_empty());

    let forest = TreeBuilder::new()
        .build_forest(Vec::<u32>::new(), |_: &u32| Vec::new())
        .unwrap();
    assert!(forest.is_empty());
}

#[test]
fn given_mutual_parents_when_building_then_reports_cycle() {
    // Arrange
    let records = vec![rec(1, None), rec(2, Some(3)), rec(3, Some(2))];

    // Act
    let result =
        TreeBuilder::new().build_from_flat_relation(records, |r: &Rec| r.id, |r: &Rec| r.parent);

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, DomainError::CycleDetected(_)));
    assert!(err.to_string().contains("cycle"));
}

#[test]
fn given_string_keys_when_building_then_links_by_string() {
    let records = vec![
        ("root".to_string(), None),
        ("leaf".to_string(), Some("root".to_string())),
    ];

    let forest = TreeBuilder::new()
        .build_from_flat_relation(
            records,
            |r: &(String, Option<String>)| r.0.clone(),
            |r: &(String, Option<String>)| r.1.clone(),
        )
        .unwrap();

    assert_eq!(forest.len(), 1);
    let leaves: Vec<_> = forest[0].leaf_nodes().map(|n| n.model().0.as_str()).collect();
    assert_eq!(leaves, vec!["leaf"]);
}

// ============================================================
// Root plus children rule
// ============================================================

#[test]
fn given_chain_rule_when_building_from_root_then_only_middle_is_non_leaf() {
    // Act
    let tree = TreeBuilder::new()
        .build_from_root(1, |&n| if n < 3 { vec![n + 1] } else { vec![] })
        .unwrap();

    // Assert
    let non_leaves: Vec<i32> = tree.non_leaf_nodes().map(|n| *n.model()).collect();
    assert_eq!(non_leaves, vec![2]);
    let leaves: Vec<i32> = tree.leaf_nodes().map(|n| *n.model()).collect();
    assert_eq!(leaves, vec![3]);
}

#[test]
fn given_models_when_building_forest_then_keeps_input_order() {
    // Arrange: each model n has children n*10 + 1 and n*10 + 2 while below 10
    let rule = |&n: &u32| {
        if n < 10 {
            vec![n * 10 + 1, n * 10 + 2]
        } else {
            vec![]
        }
    };

    // Act
    let forest = TreeBuilder::new().build_forest(vec![3, 1, 2], rule).unwrap();

    // Assert
    let roots: Vec<u32> = forest.iter().map(|t| t[t.root()]).collect();
    assert_eq!(roots, vec![3, 1, 2]);
    assert!(forest.iter().all(|t| t.node_count() == 3));
    let first: Vec<u32> = forest[0].descendants().map(|n| *n.model()).collect();
    assert_eq!(first, vec![31, 32]);
}

#[test]
fn given_rule_that_rederives_root_when_building_then_reports_depth_exceeded() {
    // Arrange
    let builder = TreeBuilder::with_options(BuildOptions { max_depth: 64 });

    // Act
    let result = builder.build_from_root("loop", |&m| vec![m]);

    // Assert
    assert_eq!(
        result.unwrap_err(),
        DomainError::DepthExceeded { limit: 64 }
    );
}

#[test]
fn given_childless_root_when_building_then_returns_leaf_root() {
    let tree: Tree<&str> = TreeBuilder::new()
        .build_from_root("solo", |_| Vec::new())
        .unwrap();

    assert!(tree.root_ref().is_leaf());
    assert_eq!(tree.descendants().count(), 0);
}
