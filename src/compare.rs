//! Comparators used to order the two sides of a [`crate::Bimap`].
//!
//! A comparator is anything that can answer "is `a` strictly less than `b`".
//! It must be a strict weak ordering: irreflexive, transitive, and
//! incomparability must be transitive as well. Two keys are considered equal
//! when neither is less than the other.

/// A strict weak ordering over `T`.
///
/// References to anonymous functions of the type `Fn(&T, &T) -> bool` can be
/// used as comparators.
///```
/// use bitreap::Bimap;
///
/// let by_abs = |a : &i32, b : &i32| a.abs() < b.abs();
/// let mut map = Bimap::with_comparators(by_abs, bitreap::Natural);
/// map.insert(-3, 'a');
/// map.insert(2, 'b');
/// assert!(map.contains_left(&3)); // 3 and -3 are equivalent under `by_abs`
/// assert_eq!(map.iter_left().map(|(l, _)| *l).collect::<Vec<_>>(), vec![2, -3]);
///```
pub trait Compare<T : ?Sized> {
    /// Returns true iff `a` is strictly less than `b`.
    fn less(&self, a : &T, b : &T) -> bool;

    /// Returns true iff neither key is less than the other.
    fn equivalent(&self, a : &T, b : &T) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// The natural order of `T : Ord`. This is the default for both sides of a map.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T : Ord + ?Sized> Compare<T> for Natural {
    fn less(&self, a : &T, b : &T) -> bool {
        a < b
    }
}

/// Reverses another comparator.
///```
/// use bitreap::{Bimap, Natural, Reversed};
///
/// let mut map = Bimap::with_comparators(Reversed(Natural), Natural);
/// map.insert(3, 4);
/// map.insert(1, 5);
/// map.insert(10, -10);
/// assert_eq!(map.iter_left().map(|(l, _)| *l).collect::<Vec<_>>(), vec![10, 3, 1]);
/// assert_eq!(map.iter_right().map(|(r, _)| *r).collect::<Vec<_>>(), vec![-10, 4, 5]);
///```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T : ?Sized, C : Compare<T>> Compare<T> for Reversed<C> {
    fn less(&self, a : &T, b : &T) -> bool {
        self.0.less(b, a)
    }
}

impl<T : ?Sized, F> Compare<T> for F where
    F : Fn(&T, &T) -> bool
{
    fn less(&self, a : &T, b : &T) -> bool {
        self(a, b)
    }
}

#[test]
fn natural_and_reversed() {
    assert!(Natural.less(&1, &2));
    assert!(!Natural.less(&2, &2));
    assert!(Natural.equivalent("ab", "ab"));
    assert!(Reversed(Natural).less(&2, &1));
    assert!(!Reversed(Natural).less(&1, &2));
}

#[test]
fn closures_are_comparators() {
    let by_len = |a : &String, b : &String| a.len() < b.len();
    assert!(by_len.less(&"a".to_string(), &"bb".to_string()));
    assert!(by_len.equivalent(&"ab".to_string(), &"cd".to_string()));
}
