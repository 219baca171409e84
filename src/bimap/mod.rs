//! The bidirectional map.
//!
//! A [`Bimap`] keeps a bijection between left keys and right keys. Every pair is stored
//! once, in a record that is linked into two treaps: one ordered by the left keys and one
//! ordered by the right keys. Either side can be used to look up, bound, or iterate in
//! order, and a position on one side can be flipped to the same pair on the other side
//! in constant time.
//!
//!```
//! use bitreap::Bimap;
//!
//! let mut map = Bimap::new();
//! map.insert(1, 2);
//! map.insert(2, 3);
//! map.insert(42, 1000);
//!
//! assert_eq!(*map.key(map.find_right(&1000).flip()), 42);
//! assert_eq!(map.find_left(&3436), map.end_left());
//! assert_eq!(map.at_left(&2), Ok(&3));
//!```

mod cursor;
mod implementations;

pub use cursor::*;

use rand::rngs::StdRng;
use rand::Rng;

use crate::trees::iterators::{self, Iter};
use crate::trees::{Arena, Left, NodeId, Right, Side, Treap, View};
use crate::{Builder, Compare, Error, Natural, Result};

/// An ordered bidirectional map between left keys `L` and right keys `R`.
///
/// `CL` and `CR` are the comparators of the two sides. No two pairs have equivalent
/// left keys, and no two pairs have equivalent right keys.
pub struct Bimap<L, R, CL = Natural, CR = Natural> {
    arena: Arena<L, R>,
    left: Treap<CL>,
    right: Treap<CR>,
    len: usize,
    rng: StdRng,
}

impl<L : Ord, R : Ord> Bimap<L, R> {
    /// Creates an empty map, ordering both sides naturally.
    pub fn new() -> Self {
        Builder::new().build()
    }
}

impl<L, R, CL, CR> Bimap<L, R, CL, CR> {
    pub(crate) fn from_parts(left : CL, right : CR, rng : StdRng, capacity : usize) -> Self {
        Bimap {
            arena : Arena::with_capacity(capacity),
            left : Treap::new(left),
            right : Treap::new(right),
            len : 0,
            rng,
        }
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn left_comparator(&self) -> &CL {
        self.left.comparator()
    }

    pub fn right_comparator(&self) -> &CR {
        self.right.comparator()
    }

    /// Removes all pairs. Invalidates every cursor except the end cursors.
    pub fn clear(&mut self) {
        log::debug!("clearing bimap of {} pairs", self.len);
        self.arena.clear();
        self.len = 0;
    }

    /// The cursor at the smallest left key, or the left end cursor if the map is empty.
    pub fn begin_left(&self) -> LeftCursor {
        Cursor::new(self.left.first(&self.arena.links::<Left>()))
    }

    /// The cursor one past the largest left key.
    pub fn end_left(&self) -> LeftCursor {
        Cursor::new(self.left.last())
    }

    /// The cursor at the smallest right key, or the right end cursor if the map is empty.
    pub fn begin_right(&self) -> RightCursor {
        Cursor::new(self.right.first(&self.arena.links::<Right>()))
    }

    /// The cursor one past the largest right key.
    pub fn end_right(&self) -> RightCursor {
        Cursor::new(self.right.last())
    }

    /// The key the cursor points at, in the cursor's view.
    ///
    /// # Panics
    /// If the cursor is an end cursor.
    pub fn key<V : View>(&self, cursor : Cursor<V>) -> &V::Key<L, R> {
        self.arena.key::<V>(cursor.node)
    }

    /// The whole pair the cursor points at, as `(left, right)`.
    ///
    /// # Panics
    /// If the cursor is an end cursor.
    pub fn pair<V : View>(&self, cursor : Cursor<V>) -> (&L, &R) {
        match self.arena.pair(cursor.node) {
            Some((left, right)) => (left, right),
            None => panic!("the end position has no pair"),
        }
    }

    /// The cursor at the next key of the same view. The last pair steps to the end cursor.
    pub fn next<V : View>(&self, cursor : Cursor<V>) -> Cursor<V> {
        let next = iterators::successor(&self.arena.links::<V>(), cursor.node);
        Cursor::new(next.unwrap_or(NodeId::SENTINEL))
    }

    /// The cursor at the previous key of the same view. The end cursor steps to the last pair,
    /// and stepping back from the first pair gives the end cursor.
    pub fn prev<V : View>(&self, cursor : Cursor<V>) -> Cursor<V> {
        let prev = iterators::predecessor(&self.arena.links::<V>(), cursor.node);
        Cursor::new(prev.unwrap_or(NodeId::SENTINEL))
    }

    /// Iterates over `(left, right)` pairs in the order of the left keys.
    pub fn iter_left(&self) -> Iter<'_, L, R, Left> {
        Iter::new(&self.arena, self.begin_left().node, NodeId::SENTINEL, self.len)
    }

    /// Iterates over `(right, left)` pairs in the order of the right keys.
    pub fn iter_right(&self) -> Iter<'_, L, R, Right> {
        Iter::new(&self.arena, self.begin_right().node, NodeId::SENTINEL, self.len)
    }

    /// Removes the pair at `cursor` from both views.
    /// Returns the cursor following it in the cursor's view.
    ///
    /// Invalidates the cursors to the removed pair, in both views.
    ///
    /// # Panics
    /// If the cursor is an end cursor.
    pub fn erase<V : View>(&mut self, cursor : Cursor<V>) -> Cursor<V> {
        assert!(!cursor.is_end(), "erase of the end cursor");
        let next = self.next(cursor);
        self.unlink(cursor.node);
        self.arena.free(cursor.node);
        self.len -= 1;
        next
    }

    /// Removes the pair at `cursor`. Returns the cursor to the next left key.
    pub fn erase_left(&mut self, cursor : LeftCursor) -> LeftCursor {
        self.erase(cursor)
    }

    /// Removes the pair at `cursor`. Returns the cursor to the next right key.
    pub fn erase_right(&mut self, cursor : RightCursor) -> RightCursor {
        self.erase(cursor)
    }

    /// Removes every pair in `[first, last)`, in the order of their view.
    /// Returns `last`, which stays valid.
    pub fn erase_range<V : View>(&mut self, mut first : Cursor<V>, last : Cursor<V>) -> Cursor<V> {
        while first != last {
            first = self.erase(first);
        }
        last
    }

    pub fn erase_left_range(&mut self, first : LeftCursor, last : LeftCursor) -> LeftCursor {
        self.erase_range(first, last)
    }

    pub fn erase_right_range(&mut self, first : RightCursor, last : RightCursor) -> RightCursor {
        self.erase_range(first, last)
    }

    // unlinks a record from both trees. Both unlinkings always happen together.
    fn unlink(&mut self, node : NodeId) {
        self.left.remove(&mut self.arena.links_mut::<Left>(), node);
        self.right.remove(&mut self.arena.links_mut::<Right>(), node);
    }

    fn priority(&mut self) -> u64 {
        // the maximum is reserved for the sentinel
        self.rng.gen_range(0..u64::MAX)
    }

    #[cfg(test)]
    pub(crate) fn arena_links(&self) -> Vec<(crate::trees::ViewNode, crate::trees::ViewNode)> {
        use crate::trees::Links;
        (0..self.arena.slots())
            .map(|i| {
                let id = NodeId(i);
                (*self.arena.links::<Left>().node(id), *self.arena.links::<Right>().node(id))
            })
            .collect()
    }
}

impl<L, R, CL, CR> Bimap<L, R, CL, CR> where
    CL : Compare<L>,
    CR : Compare<R>,
{
    /// Creates an empty map with the given comparators.
    pub fn with_comparators(left : CL, right : CR) -> Self {
        Builder::new().left_order(left).right_order(right).build()
    }

    /// Inserts the pair `(left, right)` and returns the cursor to its left key.
    ///
    /// If `left` is already a left key, or `right` is already a right key, nothing is
    /// inserted and the left end cursor is returned. Both sides are checked before
    /// anything is changed.
    pub fn insert(&mut self, left : L, right : R) -> LeftCursor {
        if self.contains_left(&left) || self.contains_right(&right) {
            log::trace!("rejected a pair with an existing key");
            return self.end_left();
        }
        let priorities = [self.priority(), self.priority()];
        let node = self.arena.alloc((left, right), priorities);

        let (mut links, keys) = self.arena.view_mut::<Left>();
        self.left.insert(&mut links, &keys, node);
        let (mut links, keys) = self.arena.view_mut::<Right>();
        self.right.insert(&mut links, &keys, node);

        self.len += 1;
        Cursor::new(node)
    }

    /// Removes the pair with this left key. Returns whether there was one.
    pub fn remove_left(&mut self, left : &L) -> bool {
        let cursor = self.find_left(left);
        if cursor.is_end() {
            return false;
        }
        self.erase(cursor);
        true
    }

    /// Removes the pair with this right key. Returns whether there was one.
    pub fn remove_right(&mut self, right : &R) -> bool {
        let cursor = self.find_right(right);
        if cursor.is_end() {
            return false;
        }
        self.erase(cursor);
        true
    }

    /// The cursor to this left key, or the left end cursor.
    pub fn find_left(&self, left : &L) -> LeftCursor {
        Cursor::new(self.left.find(&self.arena.links::<Left>(), &self.arena.keys::<Left>(), left))
    }

    /// The cursor to this right key, or the right end cursor.
    pub fn find_right(&self, right : &R) -> RightCursor {
        Cursor::new(self.right.find(&self.arena.links::<Right>(), &self.arena.keys::<Right>(), right))
    }

    pub fn contains_left(&self, left : &L) -> bool {
        !self.find_left(left).is_end()
    }

    pub fn contains_right(&self, right : &R) -> bool {
        !self.find_right(right).is_end()
    }

    /// The right key paired with this left key.
    pub fn at_left(&self, left : &L) -> Result<&R> {
        let cursor = self.find_left(left);
        if cursor.is_end() {
            return Err(Error::NotFound { side : Side::Left });
        }
        Ok(self.key(cursor.flip()))
    }

    /// The left key paired with this right key.
    pub fn at_right(&self, right : &R) -> Result<&L> {
        let cursor = self.find_right(right);
        if cursor.is_end() {
            return Err(Error::NotFound { side : Side::Right });
        }
        Ok(self.key(cursor.flip()))
    }

    /// The right key paired with `left`. If there is none, pairs `left` with `R::default()`
    /// and returns that.
    ///
    /// If the default right key is already paired with some other left key, that other
    /// pair is erased first, so the default value moves over to `left`.
    ///```
    /// use bitreap::Bimap;
    ///
    /// let mut map = Bimap::new();
    /// map.insert(1, 0);
    /// map.insert(2, 5);
    /// assert_eq!(*map.at_left_or_default(2), 5);
    /// assert_eq!(*map.at_left_or_default(3), 0);
    /// assert!(!map.contains_left(&1));
    /// assert_eq!(map.len(), 2);
    ///```
    pub fn at_left_or_default(&mut self, left : L) -> &R where
        R : Default,
    {
        let found = self.find_left(&left);
        if !found.is_end() {
            return self.key(found.flip());
        }
        let default = R::default();
        let taken = self.find_right(&default);
        if !taken.is_end() {
            log::debug!("erasing the pair holding the default right key");
            self.erase(taken);
        }
        let inserted = self.insert(left, default);
        self.key(inserted.flip())
    }

    /// The left key paired with `right`. If there is none, pairs `right` with `L::default()`
    /// and returns that.
    ///
    /// If the default left key is already paired with some other right key, that other
    /// pair is erased first.
    pub fn at_right_or_default(&mut self, right : R) -> &L where
        L : Default,
    {
        let found = self.find_right(&right);
        if !found.is_end() {
            return self.key(found.flip());
        }
        let default = L::default();
        let taken = self.find_left(&default);
        if !taken.is_end() {
            log::debug!("erasing the pair holding the default left key");
            self.erase(taken);
        }
        let inserted = self.insert(default, right);
        self.key(inserted)
    }

    /// The cursor to the first left key not less than `left`, or the left end cursor.
    pub fn lower_bound_left(&self, left : &L) -> LeftCursor {
        Cursor::new(self.left.lower_bound(&self.arena.links::<Left>(), &self.arena.keys::<Left>(), left))
    }

    /// The cursor to the first left key greater than `left`, or the left end cursor.
    pub fn upper_bound_left(&self, left : &L) -> LeftCursor {
        Cursor::new(self.left.upper_bound(&self.arena.links::<Left>(), &self.arena.keys::<Left>(), left))
    }

    /// The cursor to the first right key not less than `right`, or the right end cursor.
    pub fn lower_bound_right(&self, right : &R) -> RightCursor {
        Cursor::new(self.right.lower_bound(&self.arena.links::<Right>(), &self.arena.keys::<Right>(), right))
    }

    /// The cursor to the first right key greater than `right`, or the right end cursor.
    pub fn upper_bound_right(&self, right : &R) -> RightCursor {
        Cursor::new(self.right.upper_bound(&self.arena.links::<Right>(), &self.arena.keys::<Right>(), right))
    }

    /// Checks that every invariant holds: both trees are ordered and heap ordered with
    /// consistent links, every pair is in both trees, and the length is right.
    /// Panics otherwise.
    pub fn assert_correctness(&self) {
        let in_left = self.left.assert_correctness(&self.arena.links::<Left>(), &self.arena.keys::<Left>());
        let in_right = self.right.assert_correctness(&self.arena.links::<Right>(), &self.arena.keys::<Right>());
        assert_eq!(in_left, self.len, "left tree size");
        assert_eq!(in_right, self.len, "right tree size");
        assert_eq!(self.arena.live(), self.len, "live records");
        // every record reached in left order is also linked into the right tree
        let mut cursor = self.begin_left();
        while !cursor.is_end() {
            let (left, right) = self.pair(cursor);
            assert_eq!(self.find_left(left), cursor);
            assert_eq!(self.find_right(right), cursor.flip());
            cursor = self.next(cursor);
        }
    }
}
