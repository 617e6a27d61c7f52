use super::RandomKeys;
use crate::{BSTree, Error, Map, Position, Set};
use std::collections::{BTreeMap, BTreeSet};

/// Compare a map element by element with the std one, in sorted order
fn assert_maps_equal(map: &Map<i32, String>, reference: &BTreeMap<i32, String>) {
    assert_eq!(map.len(), reference.len());
    assert_eq!(map.is_empty(), reference.is_empty());
    assert!(map.iter().eq(reference.iter()));
    assert!(map.iter().rev().eq(reference.iter().rev()));
}

fn assert_sets_equal(set: &Set<i32>, reference: &BTreeSet<i32>) {
    assert_eq!(set.len(), reference.len());
    assert_eq!(set.first(), reference.iter().next());
    assert_eq!(set.last(), reference.iter().next_back());
    assert!(set.iter().eq(reference.iter()));
}

/// Walk the positions of a tree from `begin` to `end`, checking order and counting
fn count_by_positions(tree: &BSTree<i32>) -> usize {
    let mut count = 0;
    let mut previous = None;
    let mut pos = tree.begin();
    while pos != tree.end() {
        let value = *tree.get(pos).unwrap();
        if let Some(previous) = previous {
            assert!(previous <= value);
        }
        previous = Some(value);
        count += 1;
        pos = tree.next(pos).unwrap();
    }
    count
}

#[test]
fn map_against_std() {
    for &(num, max, seed) in &[(10, 5, 1), (100, 50, 2), (1000, 200, 3), (1000, 5000, 4)] {
        let mut map = Map::new();
        let mut reference = BTreeMap::new();
        let mut keys = RandomKeys::new(num, max, seed);

        while let Some(key) = keys.next() {
            match keys.below(4) {
                0 => {
                    let inserted = map.insert(key, key.to_string()).1;
                    let expected = !reference.contains_key(&key);
                    reference.entry(key).or_insert_with(|| key.to_string());
                    assert_eq!(inserted, expected);
                }
                1 => {
                    let inserted = map.insert_or_assign(key, format!("v{}", key)).1;
                    assert_eq!(inserted, reference.insert(key, format!("v{}", key)).is_none());
                }
                2 => {
                    assert_eq!(map.remove(&key), reference.remove(&key));
                }
                _ => {
                    assert_eq!(map.contains(&key), reference.contains_key(&key));
                    assert_eq!(map.get(&key), reference.get(&key));
                    match reference.get(&key) {
                        Some(value) => assert_eq!(map.at(&key), Ok(value)),
                        None => assert_eq!(map.at(&key), Err(Error::KeyNotFound)),
                    }
                }
            }
        }

        assert_maps_equal(&map, &reference);
    }
}

#[test]
fn set_against_std() {
    for &(num, max, seed) in &[(10, 5, 5), (500, 100, 6), (2000, 10_000, 7)] {
        let mut set = Set::new();
        let mut reference = BTreeSet::new();
        let mut keys = RandomKeys::new(num, max, seed);

        while let Some(key) = keys.next() {
            if keys.below(3) == 0 {
                assert_eq!(set.remove(&key), reference.remove(&key));
            } else {
                assert_eq!(set.insert(key).1, reference.insert(key));
            }
        }

        assert_sets_equal(&set, &reference);
    }
}

#[test]
fn ordering_and_size_consistency() {
    let mut tree: BSTree<i32> = RandomKeys::new(500, 100, 8).collect();
    assert_eq!(count_by_positions(&tree), tree.len());
    assert_eq!(tree.count_reachable(), tree.len());

    let mut keys = RandomKeys::new(300, 100, 9);
    while let Some(key) = keys.next() {
        let pos = tree.find(&key);
        if pos.is_end() {
            assert!(tree.iter().all(|&value| value != key));
        } else {
            tree.erase(pos).unwrap();
        }
        assert_eq!(count_by_positions(&tree), tree.len());
        assert_eq!(tree.count_reachable(), tree.len());
    }
}

#[test]
fn erase_everything_in_any_order() {
    for seed in 0..10 {
        let mut keys = RandomKeys::new(200, 1_000_000, seed);
        let mut set: Set<i32> = Set::new();
        let mut inserted = vec![];
        while let Some(key) = keys.next() {
            if set.insert(key).1 {
                inserted.push(key);
            }
        }

        // Shuffle the removal order
        for i in (1..inserted.len()).rev() {
            let j = keys.below(i + 1);
            inserted.swap(i, j);
        }

        for key in &inserted {
            assert_eq!(set.erase(set.find(key)), Ok(*key));
        }
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.begin(), set.end());
    }
}

#[test]
fn map_uniqueness() {
    let mut map = Map::new();
    assert!(map.insert(7, "first").1);
    let (pos, inserted) = map.insert(7, "second");
    assert!(!inserted);
    assert_eq!(map.len(), 1);
    assert_eq!(map.entry_at(pos), Ok((&7, &"first")));
}

#[test]
fn map_merge_precision() {
    let mut a: Map<i32, &str> = vec![(1, "a"), (2, "b")].into_iter().collect();
    let mut b: Map<i32, &str> = vec![(2, "x"), (3, "c")].into_iter().collect();
    a.merge(&mut b);
    assert_eq!(
        a.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(),
        vec![(1, "a"), (2, "b"), (3, "c")]
    );
    assert_eq!(b.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(), vec![(2, "x")]);
}

#[test]
fn set_merge_against_std() {
    let mut a: Set<i32> = RandomKeys::new(100, 200, 10).collect();
    let mut b: Set<i32> = RandomKeys::new(100, 200, 11).collect();
    let reference_a: BTreeSet<i32> = a.iter().cloned().collect();
    let reference_b: BTreeSet<i32> = b.iter().cloned().collect();

    a.merge(&mut b);

    let union: BTreeSet<i32> = reference_a.union(&reference_b).cloned().collect();
    let conflicts: BTreeSet<i32> = reference_a.intersection(&reference_b).cloned().collect();
    assert_sets_equal(&a, &union);
    assert_sets_equal(&b, &conflicts);
}

#[test]
fn iterator_boundary() {
    for num in 1..20 {
        let set: Set<i32> = RandomKeys::new(num, 50, num as u64).collect();
        let last = set.prev(set.end()).unwrap();
        assert_eq!(set.get(last).ok(), set.iter().next_back());
        assert_eq!(set.next(last), Ok(set.end()));
        assert_eq!(set.get(set.end()), Err(Error::EndPosition));
    }

    let empty: Set<i32> = Set::new();
    assert_eq!(empty.prev(empty.end()), Ok(Position::End));
}

#[test]
fn erase_cases_on_sample_tree() {
    let mut tree: BSTree<i32> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();

    tree.erase(tree.find(&5)).unwrap();
    assert_eq!(tree.len(), 6);
    assert_eq!(count_by_positions(&tree), 6);

    tree.erase(tree.find(&1)).unwrap();
    assert_eq!(tree.len(), 5);
    assert_eq!(count_by_positions(&tree), 5);

    // 3 is left with a single child (4)
    tree.erase(tree.find(&3)).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(count_by_positions(&tree), 4);
    assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), vec![4, 7, 8, 9]);
}
