mod common;
use common::*;

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use bitreap::{Bimap, Builder, Error, Natural, Reversed, Side};
use rand::prelude::*;

const SEED: u64 = 1488228;

#[test]
fn simple() {
    let mut map = Bimap::new();
    map.insert(4, 4);
    assert_eq!(map.at_right(&4), map.at_left(&4));
}

#[test]
fn custom_comparator() {
    let mut map = Bimap::with_comparators(Reversed(Natural), Natural);
    map.insert(3, 4);
    map.insert(1, 5);
    map.insert(10, -10);

    let lefts: Vec<_> = map.iter_left().map(|(l, _)| *l).collect();
    assert_eq!(lefts, vec![10, 3, 1]);
    let rights: Vec<_> = map.iter_right().map(|(r, _)| *r).collect();
    assert_eq!(rights, vec![-10, 4, 5]);
    map.assert_correctness();
}

#[test]
fn closure_comparator() {
    // orders points by their manhattan distance from the origin
    let manhattan = |a: &(i32, i32), b: &(i32, i32)| a.0.abs() + a.1.abs() < b.0.abs() + b.1.abs();
    let mut map = Bimap::with_comparators(manhattan, Natural);
    map.insert((1, 1), "near");
    map.insert((5, -5), "far");
    assert!(map.insert((2, 0), "same distance as (1, 1)").is_end());
    assert_eq!(map.at_left(&(0, -2)), Ok(&"near"));
    assert_eq!(map.len(), 2);
}

#[test]
fn copies() {
    let mut map = Bimap::new();
    map.insert(3, 4);
    let mut copy = map.clone();
    assert_eq!(*map.key(map.find_left(&3).flip()), 4);
    copy.insert(4, 5);
    assert_eq!(map.find_left(&4), map.end_left());

    copy.insert(10, -10);
    map = copy.clone();
    assert_ne!(map.find_right(&-10), map.end_right());
    assert_eq!(map, copy);
}

#[test]
fn moves() {
    let mut map = Bimap::new();
    map.insert(1, 'a');
    map.insert(2, 'b');
    let moved = std::mem::take(&mut map);
    assert!(map.is_empty());
    assert_eq!(map.begin_left(), map.end_left());
    assert_eq!(moved.at_left(&2), Ok(&'b'));
    moved.assert_correctness();
    map.assert_correctness();
}

#[test]
fn insert() {
    let mut map = Bimap::new();
    map.insert(4, 10);
    map.insert(10, 4);
    assert_eq!(*map.key(map.find_right(&4).flip()), 10);
    assert_eq!(map.at_left(&10), Ok(&4));
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug)]
struct NoClone(i32);

#[test]
fn insert_move_only_keys() {
    let mut map = Bimap::new();
    map.insert(4, NoClone(3));
    assert_eq!(map.at_right(&NoClone(3)), Ok(&4));
    assert_eq!(map.at_left(&4), Ok(&NoClone(3)));

    let mut map2 = Bimap::new();
    map2.insert(NoClone(4), 3);
    assert_eq!(map2.at_left(&NoClone(4)), Ok(&3));
    assert_eq!(map2.at_right(&3), Ok(&NoClone(4)));
}

#[test]
fn at() {
    let mut map = Bimap::new();
    map.insert(4, 3);

    assert_eq!(map.at_left(&1), Err(Error::NotFound { side: Side::Left }));
    assert_eq!(map.at_right(&300), Err(Error::NotFound { side: Side::Right }));
    assert_eq!(map.at_left(&4), Ok(&3));
    assert_eq!(map.at_right(&3), Ok(&4));
}

#[test]
fn find() {
    let mut map = Bimap::new();
    map.insert(1, 2);
    map.insert(2, 3);
    map.insert(42, 1000);

    assert_eq!(*map.key(map.find_right(&1000).flip()), 42);
    assert_eq!(*map.key(map.find_right(&3).flip()), 2);
    assert_eq!(*map.key(map.find_left(&1).flip()), 2);
    assert_eq!(map.find_left(&3436), map.end_left());
    assert_eq!(map.find_right(&-1000), map.end_right());
}

#[test]
fn end_flips_to_end() {
    let mut map = Bimap::new();
    assert_eq!(map.end_left().flip(), map.end_right());
    map.insert(1, 1);
    assert_eq!(map.end_right().flip(), map.end_left());
    assert_eq!(map.prev(map.end_left()), map.begin_left());
    assert_eq!(map.next(map.begin_right()), map.end_right());
}

#[test]
fn empty() {
    let mut map = Bimap::new();
    assert!(map.is_empty());
    map.insert(1, 1);
    assert!(!map.is_empty());
}

#[test]
fn insert_exist() {
    let mut map = Bimap::new();
    map.insert(1, 2);
    map.insert(2, 3);
    map.insert(3, 4);
    assert_eq!(map.len(), 3);
    let cursor = map.insert(2, -1);
    assert_eq!(cursor, map.end_left());
    assert_eq!(map.len(), 3);
    let cursor = map.insert(-1, 3);
    assert_eq!(cursor, map.end_left());
    assert_eq!(map.len(), 3);
    assert_eq!(map.at_right(&3), Ok(&2));
}

#[test]
fn erase_cursor() {
    let mut map = Bimap::new();
    let cursor = map.insert(1, 2);
    map.insert(5, 10);
    map.insert(100, 200);
    let next = map.erase_left(cursor);
    assert_eq!(map.len(), 2);
    assert_eq!(*map.key(next), 5);
    assert_eq!(map.find_left(&1), map.end_left());
    assert_eq!(map.find_right(&2), map.end_right());

    let cursor = map.insert(-1, -2);
    let next = map.erase_right(cursor.flip());
    assert_eq!(map.len(), 2);
    assert_eq!(*map.key(next), 10);
    map.assert_correctness();
}

#[test]
fn erase_value() {
    let mut map = Bimap::new();
    map.insert(111, 222);
    map.insert(333, 444);
    assert!(map.remove_left(&111));
    assert_eq!(map.len(), 1);
    assert!(!map.remove_right(&333333));
    assert_eq!(map.len(), 1);
    assert!(map.remove_right(&444));
    assert!(map.is_empty());
}

#[test]
fn erase_range() {
    let mut map = Bimap::new();
    map.insert(1, 2);
    let first = map.insert(2, 3);
    map.insert(3, 4);
    let last = map.insert(4, 5);
    map.insert(5, 6);

    let cursor = map.erase_left_range(first, last);
    assert_eq!(cursor, last);
    assert_eq!(*map.key(cursor), 4);
    assert_eq!(map.len(), 3);

    let first = map.insert(100, 4).flip();
    let last = map.insert(200, 10).flip();
    let cursor = map.erase_right_range(first, last);
    assert_eq!(*map.key(cursor), 10);
    assert_eq!(map.len(), 2);

    map.erase_left_range(map.begin_left(), map.end_left());
    assert!(map.is_empty());
    map.assert_correctness();
}

fn shuffled_bounds_data(rng: &mut StdRng) -> Bimap<i32, i32> {
    let mut data = vec![(1, 2), (2, 3), (3, 4), (8, 16), (32, 66)];
    data.shuffle(rng);
    data.into_iter().collect()
}

#[test]
fn lower_bound() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..20 {
        let map = shuffled_bounds_data(&mut rng);
        assert_eq!(*map.key(map.lower_bound_left(&5)), 8);
        assert_eq!(*map.key(map.lower_bound_left(&4)), 8);
        assert_eq!(*map.key(map.lower_bound_right(&4)), 4);
        assert_eq!(*map.key(map.lower_bound_left(&4).flip()), 16);
        assert_eq!(map.lower_bound_right(&100), map.end_right());
        assert_eq!(map.lower_bound_left(&100), map.end_left());
    }
}

#[test]
fn upper_bound() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..20 {
        let map = shuffled_bounds_data(&mut rng);
        assert_eq!(*map.key(map.upper_bound_left(&5)), 8);
        assert_eq!(*map.key(map.upper_bound_left(&8)), 32);
        assert_eq!(*map.key(map.upper_bound_right(&-100)), 2);
        assert_eq!(map.upper_bound_right(&100), map.end_right());
        assert_eq!(map.upper_bound_left(&400), map.end_left());
    }
}

#[test]
fn at_or_default() {
    let mut map: Bimap<i32, i32> = Bimap::new();
    map.insert(1, 0);
    map.insert(2, 5);

    assert_eq!(*map.at_left_or_default(2), 5);
    assert_eq!(map.len(), 2);

    // 0 is taken by 1 on the right side, so the pair (1, 0) goes away
    assert_eq!(*map.at_left_or_default(3), 0);
    assert_eq!(map.len(), 2);
    assert_eq!(map.at_left(&3), Ok(&0));
    assert!(!map.contains_left(&1));

    assert_eq!(*map.at_right_or_default(7), 0);
    assert_eq!(map.at_right(&7), Ok(&0));
    assert_eq!(map.at_right(&0), Ok(&3));
    map.assert_correctness();
}

#[test]
fn equality_ignores_insertion_order() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut pairs = random_distinct_pairs(&mut rng, 40_000);

    let mut first = Builder::new().seed(1).build();
    let mut second = Builder::new().seed(2).build();
    pairs.shuffle(&mut rng);
    first.extend(pairs.iter().cloned());
    pairs.shuffle(&mut rng);
    second.extend(pairs.iter().cloned());

    assert_eq!(first.len(), pairs.len());
    assert_eq!(first.len(), second.len());
    assert_eq!(first, second);
    second.remove_left(&pairs[0].0);
    assert_ne!(first, second);
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug)]
struct Fragile(i32);

impl Clone for Fragile {
    fn clone(&self) -> Self {
        if self.0 == 13 {
            panic!("unlucky");
        }
        Fragile(self.0)
    }
}

#[test]
fn failed_clone_leaves_source_intact() {
    let mut map = Bimap::new();
    for i in 0..30 {
        map.insert(Fragile(i), i);
    }
    let result = panic::catch_unwind(AssertUnwindSafe(|| map.clone()));
    assert!(result.is_err());
    assert_eq!(map.len(), 30);
    assert_eq!(map.at_left(&Fragile(13)), Ok(&13));
    map.assert_correctness();
}

#[test]
#[should_panic]
fn erasing_the_end_panics() {
    let mut map: Bimap<i32, i32> = Bimap::new();
    map.insert(1, 2);
    let end = map.end_left();
    map.erase(end);
}

#[test]
fn many_random_inserts() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut map = Bimap::new();
    for _ in 0..10_000 {
        map.insert(rng.gen::<i32>(), rng.gen::<i32>());
    }
    map.assert_correctness();
    assert_strictly_increasing(&map);
    map.clear();
    assert!(map.is_empty());
    map.assert_correctness();
}

#[test]
fn invariant_check() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut map = Bimap::new();
    for i in 0..50_000 {
        if rng.gen_range(0..10) > 2 {
            map.insert(rng.gen::<i32>(), rng.gen::<i32>());
        } else if !map.is_empty() {
            let mut cursor = map.end_left();
            while cursor.is_end() {
                cursor = map.lower_bound_left(&rng.gen());
            }
            map.erase_left(cursor);
        }
        if i % 1000 == 0 {
            map.assert_correctness();
            assert_strictly_increasing(&map);
        }
    }
}

#[test]
fn compare_to_two_maps() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut map = Bimap::new();
    let mut left_view = BTreeMap::new();
    let mut right_view = BTreeMap::new();
    for i in 0..60_000 {
        if rng.gen_range(0..10) > 2 {
            let (left, right) = (rng.gen::<i32>(), rng.gen::<i32>());
            if !map.insert(left, right).is_end() {
                left_view.insert(left, right);
                right_view.insert(right, left);
            }
        } else if !map.is_empty() {
            let mut cursor = map.end_left();
            while cursor.is_end() {
                cursor = map.lower_bound_left(&rng.gen());
            }
            assert!(left_view.remove(map.key(cursor)).is_some());
            assert!(right_view.remove(map.key(cursor.flip())).is_some());
            map.erase_left(cursor);
        }
        if i % 1000 == 0 {
            assert_eq!(map.len(), left_view.len());
            assert_eq!(map.len(), right_view.len());
            assert!(map.iter_left().eq(left_view.iter()));
            assert!(map.iter_right().eq(right_view.iter()));
        }
    }
}

#[test]
fn random_rounds_against_model() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut map = Bimap::new();
    let mut model = Model::default();
    for round in 0..20_000 {
        let action = random_round_action(&mut rng, 100);
        if let Err(message) = apply(&mut map, &mut model, &action) {
            panic!("round {} ({:?}): {}", round, action, message);
        }
        if round % 500 == 0 {
            check_against_model(&map, &model).unwrap();
        }
    }
    check_against_model(&map, &model).unwrap();
}
