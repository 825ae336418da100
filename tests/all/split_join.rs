use summing_splay_tree::{Bias, InvariantViolation, SplayForest, Tree};

pub fn tree_from(forest: &mut SplayForest, keys: &[i64]) -> Tree {
    let mut tree = Tree::new();
    for &key in keys {
        forest.insert(&mut tree, key);
    }
    forest.check(&tree).unwrap();
    tree
}

#[test]
fn split_right_bias_moves_match_right() {
    let mut forest = SplayForest::new();
    let tree = tree_from(&mut forest, &[4, 2, 1, 3, 6, 5, 7]);

    let (left, right) = forest.split(tree, 5, Bias::Right);
    assert_eq!(forest.keys(&left), [1, 2, 3, 4]);
    assert_eq!(forest.keys(&right), [5, 6, 7]);
    assert_eq!(forest.sum(&left), 10);
    assert_eq!(forest.sum(&right), 18);
    forest.check(&left).unwrap();
    forest.check(&right).unwrap();
}

#[test]
fn split_left_bias_keeps_match_left() {
    let mut forest = SplayForest::new();
    let tree = tree_from(&mut forest, &[1, 2, 3, 4, 5, 6, 7]);

    let (left, right) = forest.split(tree, 5, Bias::Left);
    assert_eq!(forest.keys(&left), [1, 2, 3, 4, 5]);
    assert_eq!(forest.keys(&right), [6, 7]);
    forest.check(&left).unwrap();
    forest.check(&right).unwrap();
}

#[test]
fn split_at_absent_key_ignores_bias() {
    for &bias in &[Bias::Left, Bias::Right] {
        let mut forest = SplayForest::new();
        let tree = tree_from(&mut forest, &[10, 20, 30, 40]);

        let (left, right) = forest.split(tree, 25, bias);
        assert_eq!(forest.keys(&left), [10, 20]);
        assert_eq!(forest.keys(&right), [30, 40]);
        forest.check(&left).unwrap();
        forest.check(&right).unwrap();
    }
}

#[test]
fn split_past_either_end() {
    let mut forest = SplayForest::new();
    let tree = tree_from(&mut forest, &[1, 2, 3]);

    let (left, right) = forest.split(tree, 0, Bias::Left);
    assert!(left.is_empty());
    assert_eq!(forest.keys(&right), [1, 2, 3]);

    let (left, right2) = forest.split(right, 9, Bias::Right);
    assert!(right2.is_empty());
    assert_eq!(forest.keys(&left), [1, 2, 3]);
    assert_eq!(forest.sum(&left), 6);
}

#[test]
fn split_empty_tree() {
    let mut forest = SplayForest::new();
    let (left, right) = forest.split(Tree::new(), 3, Bias::Left);
    assert!(left.is_empty());
    assert!(right.is_empty());
}

#[test]
fn join_example() {
    let mut forest = SplayForest::new();
    let left = tree_from(&mut forest, &[1, 2, 3]);
    let right = tree_from(&mut forest, &[5, 6, 7]);

    let joined = forest.join(left, right);
    assert_eq!(forest.keys(&joined), [1, 2, 3, 5, 6, 7]);
    assert_eq!(forest.sum(&joined), 24);
    // The maximum of the left tree becomes the root.
    assert_eq!(forest.root_key(&joined), Some(3));
    forest.check(&joined).unwrap();
}

#[test]
fn join_with_empty_side() {
    let mut forest = SplayForest::new();
    let tree = tree_from(&mut forest, &[1, 2, 3]);

    let tree = forest.join(Tree::new(), tree);
    assert_eq!(forest.keys(&tree), [1, 2, 3]);
    let tree = forest.join(tree, Tree::new());
    assert_eq!(forest.keys(&tree), [1, 2, 3]);

    let empty = forest.join(Tree::new(), Tree::new());
    assert!(empty.is_empty());
    assert_eq!(forest.sum(&empty), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "joined trees overlap")]
fn join_overlapping_trees_panics_in_debug() {
    let mut forest = SplayForest::new();
    let left = tree_from(&mut forest, &[1, 5]);
    let right = tree_from(&mut forest, &[3, 7]);
    let _ = forest.join(left, right);
}

#[test]
fn split_then_join_round_trips() {
    let keys: Vec<i64> = (0..200).map(|k| (k * 37) % 211).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    let total: i128 = keys.iter().map(|&k| i128::from(k)).sum();

    let mut forest = SplayForest::new();
    let mut tree = tree_from(&mut forest, &keys);
    for at in -1..215 {
        let bias = if at % 2 == 0 { Bias::Left } else { Bias::Right };
        let (left, right) = forest.split(tree, at, bias);
        tree = forest.join(left, right);
        forest.check(&tree).unwrap();
        assert_eq!(forest.keys(&tree), sorted);
        assert_eq!(forest.sum(&tree), total);
    }
}

#[test]
fn trees_share_a_forest() {
    let mut forest = SplayForest::new();
    let mut a = tree_from(&mut forest, &[1, 2, 3]);
    let b = tree_from(&mut forest, &[10, 20]);
    assert_eq!(forest.len(), 5);
    assert_eq!(forest.size(&a), 3);
    assert_eq!(forest.size(&b), 2);

    assert!(forest.remove(&mut a, 2));
    assert!(!forest.find(&mut a, 10));
    assert_eq!(forest.len(), 4);

    assert_eq!(forest.release(b), 2);
    assert_eq!(forest.len(), 2);

    // Released slots get reused.
    let c = tree_from(&mut forest, &[100]);
    assert_eq!(forest.len(), 3);
    assert_eq!(forest.keys(&a), [1, 3]);
    assert_eq!(forest.keys(&c), [100]);
}

#[test]
fn min_max_and_range_keys() {
    let mut forest = SplayForest::new();
    let mut tree = tree_from(&mut forest, &[8, 3, 5, 1, 9]);
    assert_eq!(forest.min(&mut tree), Some(1));
    assert_eq!(forest.root_key(&tree), Some(1));
    assert_eq!(forest.max(&mut tree), Some(9));
    assert_eq!(forest.root_key(&tree), Some(9));
    assert_eq!(forest.range_keys(&mut tree, 2, 8), [3, 5, 8]);
    forest.check(&tree).unwrap();
}

#[test]
fn invariant_violation_messages() {
    let stale = InvariantViolation::StaleSum {
        key: 4,
        cached: 10,
        actual: 9,
    };
    assert_eq!(
        stale.to_string(),
        "node 4 caches sum 10, but its subtree sums to 9"
    );
    let order = InvariantViolation::OutOfOrder {
        previous: 5,
        next: 3,
    };
    assert_eq!(order.to_string(), "key 3 follows 5 in order");
}
