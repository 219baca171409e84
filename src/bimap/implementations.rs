use std::fmt;

use super::*;

impl<L, R, CL, CR> Clone for Bimap<L, R, CL, CR> where
    L : Clone,
    R : Clone,
    CL : Compare<L> + Clone,
    CR : Compare<R> + Clone,
{
    /// Builds a new map by reinserting every pair, which takes `O(n log n)`.
    ///
    /// If cloning a key panics, the partially built copy is dropped while unwinding,
    /// and `self` is unaffected.
    fn clone(&self) -> Self {
        log::trace!("cloning a bimap of {} pairs", self.len);
        let mut copy = Bimap::from_parts(
            self.left_comparator().clone(),
            self.right_comparator().clone(),
            self.rng.clone(),
            self.len,
        );
        for (left, right) in self.iter_left() {
            copy.insert(left.clone(), right.clone());
        }
        copy
    }
}

/// Two maps are equal if they have the same pairs, compared in the order of the left keys.
impl<L, R, CL, CR> PartialEq for Bimap<L, R, CL, CR> where
    L : PartialEq,
    R : PartialEq,
{
    fn eq(&self, other : &Self) -> bool {
        self.len() == other.len() && self.iter_left().eq(other.iter_left())
    }
}

impl<L : Eq, R : Eq, CL, CR> Eq for Bimap<L, R, CL, CR> {}

impl<L : fmt::Debug, R : fmt::Debug, CL, CR> fmt::Debug for Bimap<L, R, CL, CR> {
    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_left()).finish()
    }
}

impl<L, R, CL, CR> Default for Bimap<L, R, CL, CR> where
    CL : Compare<L> + Default,
    CR : Compare<R> + Default,
{
    fn default() -> Self {
        Bimap::with_comparators(CL::default(), CR::default())
    }
}

/// Inserts the pairs in order. A pair whose left or right key is already present is skipped.
impl<L, R, CL, CR> Extend<(L, R)> for Bimap<L, R, CL, CR> where
    CL : Compare<L>,
    CR : Compare<R>,
{
    fn extend<I : IntoIterator<Item = (L, R)>>(&mut self, iter : I) {
        for (left, right) in iter {
            self.insert(left, right);
        }
    }
}

impl<L, R, CL, CR> std::iter::FromIterator<(L, R)> for Bimap<L, R, CL, CR> where
    CL : Compare<L> + Default,
    CR : Compare<R> + Default,
{
    ///```
    /// use bitreap::Bimap;
    ///
    /// let map : Bimap<i32, char> = vec![(1, 'a'), (2, 'b'), (3, 'a')].into_iter().collect();
    /// assert_eq!(map.len(), 2);
    /// assert_eq!(map.at_right(&'a'), Ok(&1));
    ///```
    fn from_iter<I : IntoIterator<Item = (L, R)>>(iter : I) -> Self {
        let mut map = Bimap::default();
        map.extend(iter);
        map
    }
}

impl<'a, L, R, CL, CR> IntoIterator for &'a Bimap<L, R, CL, CR> {
    type Item = (&'a L, &'a R);
    type IntoIter = Iter<'a, L, R, Left>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_left()
    }
}

#[test]
fn clone_is_independent() {
    let mut map : Bimap<i32, i32> = Bimap::new();
    map.insert(3, 4);
    let mut copy = map.clone();
    assert_eq!(*map.key(map.find_left(&3).flip()), 4);
    copy.insert(4, 5);
    assert_eq!(map.find_left(&4), map.end_left());
    copy.insert(10, -10);
    map = copy.clone();
    assert!(!map.find_right(&-10).is_end());
    map.assert_correctness();
    copy.assert_correctness();
}

#[test]
fn debug_prints_in_left_order() {
    let map : Bimap<i32, char> = vec![(2, 'x'), (1, 'y')].into_iter().collect();
    assert_eq!(format!("{:?}", map), "{1: 'y', 2: 'x'}");
}
