use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use summing_splay_tree::SumSet;

fn example_set() -> SumSet {
    let mut set = SumSet::new();
    for key in [4, 2, 1, 3, 6, 5, 7] {
        assert!(set.insert(key));
    }
    set.check().unwrap();
    set
}

#[test]
fn find_splays_to_root() {
    let mut set = example_set();
    assert!(set.contains(4));
    assert_eq!(set.root(), Some(4));
    assert_eq!(set.keys(), [1, 2, 3, 4, 5, 6, 7]);
    set.check().unwrap();
}

#[test]
fn find_miss_splays_last_visited() {
    let mut set = SumSet::new();
    set.extend([10, 20, 30]);
    assert!(!set.contains(25));
    let root = set.root().unwrap();
    assert!(root == 20 || root == 30);
    assert_eq!(set.keys(), [10, 20, 30]);
}

#[test]
fn find_is_idempotent() {
    let mut set = example_set();
    for key in 0..10 {
        let first = set.contains(key);
        let second = set.contains(key);
        assert_eq!(first, second);
        assert_eq!(first, (1..=7).contains(&key));
        assert_eq!(set.keys(), [1, 2, 3, 4, 5, 6, 7]);
    }
}

#[test]
fn range_sum_examples() {
    let mut set = example_set();
    assert_eq!(set.range_sum(2, 6), 20);
    assert_eq!(set.keys(), [1, 2, 3, 4, 5, 6, 7]);
    set.check().unwrap();

    assert!(set.remove(4));
    assert_eq!(set.range_sum(2, 6), 16);
    set.check().unwrap();
}

#[test]
fn range_sum_bounds_are_inclusive() {
    let mut set = example_set();
    assert_eq!(set.range_sum(3, 3), 3);
    assert_eq!(set.range_sum(7, 100), 7);
    assert_eq!(set.range_sum(-100, 1), 1);
    assert_eq!(set.range_sum(8, 100), 0);
    assert_eq!(set.range_sum(-100, 0), 0);
    assert_eq!(set.range_sum(i64::MIN, i64::MAX - 1), 28);
    set.check().unwrap();
}

#[test]
fn range_sum_with_reversed_bounds_is_zero() {
    let mut set = example_set();
    assert_eq!(set.range_sum(6, 2), 0);
    assert_eq!(set.len(), 7);
}

#[test]
fn empty_set_operations() {
    let mut set = SumSet::new();
    assert!(set.is_empty());
    assert_eq!(set.range_sum(0, 100), 0);
    assert_eq!(set.range_sum(i64::MIN, i64::MAX), 0);
    assert!(!set.contains(1));
    assert!(!set.remove(1));
    assert_eq!(set.min(), None);
    assert_eq!(set.max(), None);
    assert_eq!(set.sum(), 0);
    assert_eq!(set.height(), 0);
    assert!(set.range_keys(0, 10).is_empty());
    set.check().unwrap();
}

#[test]
fn duplicate_insert_is_a_no_op() {
    let mut set = example_set();
    assert!(!set.insert(3));
    assert_eq!(set.len(), 7);
    assert_eq!(set.sum(), 28);
    set.check().unwrap();
}

#[test]
fn remove_absent_key_is_a_no_op() {
    let mut set = example_set();
    assert!(!set.remove(42));
    assert_eq!(set.keys(), [1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(set.sum(), 28);
}

#[test]
fn remove_every_key() {
    let mut set = example_set();
    for key in [4, 1, 7, 2, 6, 3, 5] {
        assert!(set.remove(key));
        assert!(!set.contains(key));
        set.check().unwrap();
    }
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn negative_keys() {
    let mut set: SumSet = [-5, -1, 0, 3, 8].iter().copied().collect();
    assert_eq!(set.sum(), 5);
    assert_eq!(set.range_sum(-5, 0), -6);
    assert_eq!(set.min(), Some(-5));
    assert_eq!(set.root(), Some(-5));
    assert_eq!(set.max(), Some(8));
    assert_eq!(set.root(), Some(8));
    set.check().unwrap();
}

#[test]
fn large_keys_do_not_overflow_the_sum() {
    let big = i64::MAX - 1;
    let mut set: SumSet = (0..4).map(|i| big - i).collect();
    let expected = (0..4).map(|i| i128::from(big - i)).sum::<i128>();
    assert_eq!(set.sum(), expected);
    assert_eq!(set.range_sum(0, big), expected);
}

#[test]
fn range_keys_in_order() {
    let mut set = example_set();
    assert_eq!(set.range_keys(2, 5), [2, 3, 4, 5]);
    assert_eq!(set.range_keys(0, 1), [1]);
    assert_eq!(set.range_keys(8, 9), Vec::<i64>::new());
    assert!(set.remove(3));
    assert_eq!(set.range_keys(3, 3), Vec::<i64>::new());
    assert_eq!(set.range_keys(2, 4), [2, 4]);
}

#[test]
fn walk_can_break_early() {
    let set = example_set();
    let found = set.walk(|key| if key > 4 { Some(key) } else { None });
    assert_eq!(found, Some(5));

    let err = set.walk(|key| if key == 3 { Err("three") } else { Ok(()) });
    assert_eq!(err, Some("three"));

    let mut seen = 0;
    assert_eq!(set.walk(|_| seen += 1), None);
    assert_eq!(seen, 7);
}

#[test]
fn debug_formats_as_a_set() {
    let set: SumSet = [3, 1, 2].iter().copied().collect();
    assert_eq!(format!("{:?}", set), "{1, 2, 3}");
}

#[test]
fn clear_empties_the_set() {
    let mut set = example_set();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(set.insert(9));
    assert_eq!(set.keys(), [9]);
}

#[test]
fn sequential_inserts_stay_cheap() {
    let n = 10_000;
    let mut set = SumSet::with_capacity(n as usize);
    for key in 0..n {
        set.insert(key);
    }
    // Ascending inserts each rotate the new key above the previous root
    // once, leaving a left spine.
    assert_eq!(set.rotations(), n as u64 - 1);
    assert_eq!(set.height(), n as usize);

    // Splaying the deepest key roughly halves the depth.
    assert!(set.contains(0));
    assert_eq!(set.root(), Some(0));
    assert!(set.height() <= n as usize / 2 + 2);
    set.check().unwrap();
}

#[test]
fn rotations_are_amortized_logarithmic() {
    let n: u64 = 20_000;
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut set = SumSet::new();

    for _ in 0..n {
        let key = rng.gen_range(0..5_000);
        match rng.gen_range(0..4) {
            0 => {
                set.insert(key);
            }
            1 => {
                set.remove(key);
            }
            2 => {
                set.contains(key);
            }
            _ => {
                let to = key + rng.gen_range(0..500);
                set.range_sum(key, to);
            }
        }
    }
    set.check().unwrap();

    let log_n = u64::from(64 - n.leading_zeros());
    assert!(
        set.rotations() <= 8 * n * log_n,
        "{} rotations for {} operations",
        set.rotations(),
        n
    );
}
