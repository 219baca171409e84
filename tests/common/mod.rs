#![allow(dead_code)]

use std::collections::BTreeMap;

use bitreap::Bimap;
use itertools::Itertools;
use rand::prelude::*;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert { left: i32, right: i32 },
    RemoveLeft { left: i32 },
    RemoveRight { right: i32 },
    /// erase whatever the left lower bound of `left` points at
    EraseAtBound { left: i32 },
    /// erase the right keys in `[start, end)`
    EraseRightRange { start: i32, end: i32 },
    AtLeftOrDefault { left: i32 },
    AtRightOrDefault { right: i32 },
    Query { left: i32, right: i32 },
}

/// The reference model: a map for each direction.
#[derive(Clone, Default, Debug)]
pub struct Model {
    pub by_left: BTreeMap<i32, i32>,
    pub by_right: BTreeMap<i32, i32>,
}

impl Model {
    fn insert(&mut self, left: i32, right: i32) -> bool {
        if self.by_left.contains_key(&left) || self.by_right.contains_key(&right) {
            return false;
        }
        self.by_left.insert(left, right);
        self.by_right.insert(right, left);
        true
    }

    fn remove_left(&mut self, left: i32) -> bool {
        match self.by_left.remove(&left) {
            Some(right) => {
                self.by_right.remove(&right);
                true
            }
            None => false,
        }
    }

    fn remove_right(&mut self, right: i32) -> bool {
        match self.by_right.remove(&right) {
            Some(left) => {
                self.by_left.remove(&left);
                true
            }
            None => false,
        }
    }
}

/// Applies one action to both the map and the model, and checks that the results agree.
/// Returns a description of the first disagreement.
pub fn apply(map: &mut Bimap<i32, i32>, model: &mut Model, action: &RoundAction) -> Result<(), String> {
    use RoundAction::*;
    match *action {
        Insert { left, right } => {
            let cursor = map.insert(left, right);
            let inserted = model.insert(left, right);
            if inserted == cursor.is_end() {
                return Err(format!("insert({}, {}) disagrees", left, right));
            }
            if inserted && *map.key(cursor.flip()) != right {
                return Err(format!("insert({}, {}) returned a wrong cursor", left, right));
            }
        }
        RemoveLeft { left } => {
            if map.remove_left(&left) != model.remove_left(left) {
                return Err(format!("remove_left({}) disagrees", left));
            }
        }
        RemoveRight { right } => {
            if map.remove_right(&right) != model.remove_right(right) {
                return Err(format!("remove_right({}) disagrees", right));
            }
        }
        EraseAtBound { left } => {
            let cursor = map.lower_bound_left(&left);
            let expected = model.by_left.range(left..).next().map(|(l, _)| *l);
            match expected {
                None if cursor.is_end() => (),
                Some(key) if !cursor.is_end() && *map.key(cursor) == key => {
                    let next = map.erase_left(cursor);
                    model.remove_left(key);
                    let expected_next = model.by_left.range(key..).next().map(|(l, _)| *l);
                    let actual_next = if next.is_end() { None } else { Some(*map.key(next)) };
                    if expected_next != actual_next {
                        return Err(format!("erase at {} returned {:?}", key, actual_next));
                    }
                }
                _ => return Err(format!("lower_bound_left({}) disagrees", left)),
            }
        }
        EraseRightRange { start, end } => {
            let (start, end) = if start <= end { (start, end) } else { (end, start) };
            let first = map.lower_bound_right(&start);
            let last = map.lower_bound_right(&end);
            if map.erase_right_range(first, last) != last {
                return Err("erase_right_range didn't return its end".to_string());
            }
            let doomed = model.by_right.range(start..end).map(|(r, _)| *r).collect_vec();
            for right in doomed {
                model.remove_right(right);
            }
        }
        AtLeftOrDefault { left } => {
            let expected = match model.by_left.get(&left) {
                Some(right) => *right,
                None => {
                    model.remove_right(0);
                    model.insert(left, 0);
                    0
                }
            };
            if *map.at_left_or_default(left) != expected {
                return Err(format!("at_left_or_default({}) disagrees", left));
            }
        }
        AtRightOrDefault { right } => {
            let expected = match model.by_right.get(&right) {
                Some(left) => *left,
                None => {
                    model.remove_left(0);
                    model.insert(0, right);
                    0
                }
            };
            if *map.at_right_or_default(right) != expected {
                return Err(format!("at_right_or_default({}) disagrees", right));
            }
        }
        Query { left, right } => {
            if map.at_left(&left).ok() != model.by_left.get(&left) {
                return Err(format!("at_left({}) disagrees", left));
            }
            if map.at_right(&right).ok() != model.by_right.get(&right) {
                return Err(format!("at_right({}) disagrees", right));
            }
        }
    }
    Ok(())
}

/// Checks the map against the model: same size, same pairs in both orders.
pub fn check_against_model(map: &Bimap<i32, i32>, model: &Model) -> Result<(), String> {
    map.assert_correctness();
    if map.len() != model.by_left.len() || map.len() != model.by_right.len() {
        return Err(format!("size {} vs {}", map.len(), model.by_left.len()));
    }
    if !map.iter_left().map(|(l, r)| (*l, *r)).eq(model.by_left.iter().map(|(l, r)| (*l, *r))) {
        return Err("left order disagrees".to_string());
    }
    if !map.iter_right().map(|(r, l)| (*r, *l)).eq(model.by_right.iter().map(|(r, l)| (*r, *l))) {
        return Err("right order disagrees".to_string());
    }
    Ok(())
}

pub fn random_round_action(rng: &mut StdRng, key_range: i32) -> RoundAction {
    use RoundAction::*;
    let choice = rng.gen_range(0..10);
    let mut key = || rng.gen_range(-key_range..key_range);
    match choice {
        0..=3 => Insert { left: key(), right: key() },
        4 => RemoveLeft { left: key() },
        5 => RemoveRight { right: key() },
        6 => EraseAtBound { left: key() },
        7 => EraseRightRange { start: key(), end: key() },
        8 => {
            if key() % 2 == 0 {
                AtLeftOrDefault { left: key() }
            } else {
                AtRightOrDefault { right: key() }
            }
        }
        _ => Query { left: key(), right: key() },
    }
}

/// Distinct lefts and distinct rights, paired up at random.
pub fn random_distinct_pairs(rng: &mut StdRng, total: usize) -> Vec<(u32, u32)> {
    let lefts = (0..total).map(|_| rng.gen::<u32>()).unique().collect_vec();
    let rights = (0..total).map(|_| rng.gen::<u32>()).unique().collect_vec();
    let mut pairs = lefts.into_iter().zip(rights).collect_vec();
    pairs.shuffle(rng);
    pairs
}

/// Asserts that both views iterate in strictly increasing order.
pub fn assert_strictly_increasing<L: Ord + std::fmt::Debug, R: Ord + std::fmt::Debug>(map: &Bimap<L, R>) {
    for ((a, _), (b, _)) in map.iter_left().tuple_windows() {
        assert!(a < b, "{:?} is not less than {:?}", a, b);
    }
    for ((a, _), (b, _)) in map.iter_right().tuple_windows() {
        assert!(a < b, "{:?} is not less than {:?}", a, b);
    }
}
