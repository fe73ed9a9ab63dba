//! Randomized and exhaustive checks of the tree against a `BTreeSet` model.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tree23::{Order, Result, Tree23};

/// Assert every observable property of `tree` against the model
fn assert_matches_model(tree: &Tree23<i32>, model: &BTreeSet<i32>) -> Result<()> {
    tree.check_invariants()?;

    let in_order: Vec<i32> = tree.traverse(Order::InOrder).copied().collect();
    let expected: Vec<i32> = model.iter().copied().collect();
    assert_eq!(in_order, expected);

    assert_eq!(tree.size(), model.len());
    assert_eq!(tree.is_empty(), model.is_empty());
    assert_eq!(tree.find_min(), model.first());
    assert_eq!(tree.find_max(), model.last());

    // pre- and post-order visit the same keys, just differently arranged
    for order in [Order::PreOrder, Order::PostOrder] {
        let mut keys: Vec<i32> = tree.traverse(order).copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, expected, "{} lost or duplicated keys", order);
    }
    Ok(())
}

#[test]
fn test_random_operations_match_model() -> Result<()> {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = Tree23::new();
        let mut model = BTreeSet::new();
        let mut added = 0usize;
        let mut removed = 0usize;

        for _ in 0..2_000 {
            let key = rng.gen_range(0..300);
            if rng.gen_bool(0.55) {
                let inserted = tree.add(key);
                assert_eq!(inserted, model.insert(key), "add({}) seed {}", key, seed);
                added += usize::from(inserted);
            } else {
                let was_present = tree.remove(&key);
                assert_eq!(was_present, model.remove(&key), "remove({}) seed {}", key, seed);
                removed += usize::from(was_present);
            }
            assert_eq!(tree.size(), added - removed);
            tree.check_invariants()?;
        }

        assert_matches_model(&tree, &model)?;
        for key in -5..305 {
            assert_eq!(tree.search(&key), model.contains(&key), "search({}) seed {}", key, seed);
        }
    }
    Ok(())
}

#[test]
fn test_shuffled_round_trip_empties_tree() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x2323);
    for n in [1, 2, 3, 10, 100, 1_000] {
        let mut keys: Vec<i32> = (0..n).collect();
        keys.shuffle(&mut rng);

        let mut tree = Tree23::new();
        for &key in &keys {
            assert!(tree.add(key));
        }
        assert_eq!(tree.size(), n as usize);
        tree.check_invariants()?;

        keys.shuffle(&mut rng);
        for &key in &keys {
            assert!(tree.remove(&key));
            assert!(!tree.search(&key));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.height(), 0);
    }
    Ok(())
}

#[test]
fn test_duplicates_leave_tree_identical() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree = Tree23::new();
    for _ in 0..500 {
        tree.add(rng.gen_range(0..1_000));
    }

    for _ in 0..200 {
        let key = rng.gen_range(0..1_000);
        let mut single = tree.clone();
        let first = single.add(key);
        let mut double = single.clone();
        assert!(!double.add(key));
        assert_eq!(single.root(), double.root());
        assert_eq!(single.size(), double.size());
        assert_eq!(first, !tree.search(&key));
    }
}

/// All orderings of a small key set, for both insertion and removal
fn permutations(keys: &[i32]) -> Vec<Vec<i32>> {
    if keys.len() <= 1 {
        return vec![keys.to_vec()];
    }
    let mut result = Vec::new();
    for (i, &first) in keys.iter().enumerate() {
        let mut rest = keys.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            result.push(tail);
        }
    }
    result
}

#[test]
fn test_every_insertion_order_of_seven_keys() -> Result<()> {
    let keys: Vec<i32> = (1..=7).collect();
    let expected: BTreeSet<i32> = keys.iter().copied().collect();

    for order in permutations(&keys) {
        let tree: Tree23<i32> = order.iter().copied().collect();
        assert_matches_model(&tree, &expected)?;
    }
    Ok(())
}

#[test]
fn test_every_removal_order_of_six_keys() -> Result<()> {
    let keys: Vec<i32> = (1..=6).collect();
    let insertion_orders = [keys.clone(), keys.iter().rev().copied().collect(), vec![3, 1, 5, 2, 6, 4]];

    for insertion in &insertion_orders {
        let start: Tree23<i32> = insertion.iter().copied().collect();
        for removal in permutations(&keys) {
            let mut tree = start.clone();
            let mut model: BTreeSet<i32> = keys.iter().copied().collect();
            for key in removal {
                assert!(tree.remove(&key));
                model.remove(&key);
                assert_matches_model(&tree, &model)?;
            }
        }
    }
    Ok(())
}

#[test]
fn test_deep_tree_deletions_keep_height_uniform() -> Result<()> {
    let mut tree: Tree23<i32> = (0..2_000).collect();
    let full_height = tree.height();
    assert!(full_height >= 7);

    // strip every other key, then the rest from the middle outward
    for key in (0..2_000).step_by(2) {
        assert!(tree.remove(&key));
    }
    tree.check_invariants()?;
    assert!(tree.height() <= full_height);

    let mut rest: Vec<i32> = (1..2_000).step_by(2).collect();
    rest.sort_by_key(|k| (k - 1_000).abs());
    for key in rest {
        assert!(tree.remove(&key));
        tree.check_invariants()?;
    }
    assert!(tree.is_empty());
    Ok(())
}

#[test]
fn test_clear_then_reuse() -> Result<()> {
    let mut tree: Tree23<i32> = (0..50).collect();
    tree.clear();
    assert_matches_model(&tree, &BTreeSet::new())?;

    let model: BTreeSet<i32> = [3, 1, 4, 1, 5, 9, 2, 6].into_iter().collect();
    tree.extend([3, 1, 4, 1, 5, 9, 2, 6]);
    assert_matches_model(&tree, &model)
}
