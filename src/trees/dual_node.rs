//! Pair records that are nodes of two trees at once.
//!
//! Every pair lives in one slot of an [`Arena`]. The slot holds two [`ViewNode`]s,
//! one for the left tree and one for the right tree, and the `(left, right)` pair itself.
//! A [`NodeId`] therefore names the same record in both trees, and switching from one
//! view to the other ("flipping") is only a change of the type-level [`View`] tag.
//!
//! Slot 0 is the sentinel, which has links in both views but no pair.

use std::fmt;
use std::marker::PhantomData;

use super::*;

/// Which of the two sides of a pair.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Left {}
    impl Sealed for super::Right {}
}

/// A zero sized tag naming one of the two views at the type level.
///
/// Code that is generic over the view is monomorphised per view,
/// so choosing a view is never a runtime branch.
pub trait View: sealed::Sealed + Copy + Eq + fmt::Debug + std::hash::Hash + 'static {
    /// The view on the other side.
    type Other: View<Other = Self>;
    /// The key type of this view, given the pair types.
    type Key<L, R>;
    const SIDE: Side;

    /// Projects this view's key out of a pair.
    fn key<L, R>(pair: &(L, R)) -> &Self::Key<L, R>;
}

/// The view ordered by left keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Left;

/// The view ordered by right keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Right;

impl View for Left {
    type Other = Right;
    type Key<L, R> = L;
    const SIDE: Side = Side::Left;

    fn key<L, R>(pair: &(L, R)) -> &L {
        &pair.0
    }
}

impl View for Right {
    type Other = Left;
    type Key<L, R> = R;
    const SIDE: Side = Side::Right;

    fn key<L, R>(pair: &(L, R)) -> &R {
        &pair.1
    }
}

/// Converts a node of one view into the node of the same record in the other view.
///
/// The handle of a record is shared by both views, so this is the identity on handles.
/// It never searches.
pub fn flip<V: View>(node: NodeId) -> NodeId {
    node
}

/// Owns every pair record, and the sentinel.
///
/// Records are stored as parallel columns: `links[i]` are the two view nodes of record `i`
/// and `pairs[i]` is its pair. The sentinel and the free slots have no pair.
pub struct Arena<L, R> {
    links: Vec<[ViewNode; 2]>,
    pairs: Vec<Option<(L, R)>>,
    free: Vec<NodeId>,
}

impl<L, R> Arena<L, R> {
    pub fn new() -> Arena<L, R> {
        Arena::with_capacity(0)
    }

    /// Reserves room for `capacity` records besides the sentinel.
    pub fn with_capacity(capacity: usize) -> Arena<L, R> {
        let mut links = Vec::with_capacity(capacity + 1);
        let mut pairs = Vec::with_capacity(capacity + 1);
        links.push([ViewNode::sentinel(); 2]);
        pairs.push(None);
        Arena {
            links,
            pairs,
            free: vec![],
        }
    }

    /// Stores a new detached record. `priorities` are the record's priorities in the
    /// left view and in the right view, in that order.
    pub fn alloc(&mut self, pair: (L, R), priorities: [u64; 2]) -> NodeId {
        let nodes = [ViewNode::new(priorities[0]), ViewNode::new(priorities[1])];
        if let Some(id) = self.free.pop() {
            self.links[id.0] = nodes;
            self.pairs[id.0] = Some(pair);
            id
        } else {
            self.links.push(nodes);
            self.pairs.push(Some(pair));
            NodeId(self.pairs.len() - 1)
        }
    }

    /// Frees a record and returns its pair. The record must already be unlinked from both views.
    pub fn free(&mut self, id: NodeId) -> (L, R) {
        assert!(!id.is_sentinel(), "the sentinel can't be freed");
        let pair = match self.pairs[id.0].take() {
            Some(pair) => pair,
            None => panic!("freed a record that is not live"),
        };
        self.links[id.0] = [ViewNode::new(0); 2];
        self.free.push(id);
        pair
    }

    /// Drops every record. Only the sentinel remains, with both views empty.
    pub fn clear(&mut self) {
        self.links.truncate(1);
        self.pairs.truncate(1);
        self.links[0] = [ViewNode::sentinel(); 2];
        self.free.clear();
    }

    /// The number of live records.
    pub fn live(&self) -> usize {
        self.pairs.len() - 1 - self.free.len()
    }

    /// The number of slots, counting the sentinel and the free slots.
    pub fn slots(&self) -> usize {
        self.pairs.len()
    }

    /// The pair of a record, or `None` for the sentinel and free slots.
    pub fn pair(&self, id: NodeId) -> Option<&(L, R)> {
        self.pairs.get(id.0)?.as_ref()
    }

    /// The key of a record in view `V`.
    /// Panics when called on the sentinel, which has no key.
    pub fn key<V: View>(&self, id: NodeId) -> &V::Key<L, R> {
        key_in::<L, R, V>(&self.pairs, id)
    }

    pub fn links<V: View>(&self) -> ViewLinks<'_, V> {
        ViewLinks {
            links: &self.links,
            view: PhantomData,
        }
    }

    pub fn links_mut<V: View>(&mut self) -> ViewLinksMut<'_, V> {
        ViewLinksMut {
            links: &mut self.links,
            view: PhantomData,
        }
    }

    pub fn keys<V: View>(&self) -> ViewKeys<'_, L, R, V> {
        ViewKeys {
            pairs: &self.pairs,
            view: PhantomData,
        }
    }

    /// Borrows the links of view `V` for rewiring, while its keys stay readable.
    pub fn view_mut<V: View>(&mut self) -> (ViewLinksMut<'_, V>, ViewKeys<'_, L, R, V>) {
        (
            ViewLinksMut {
                links: &mut self.links,
                view: PhantomData,
            },
            ViewKeys {
                pairs: &self.pairs,
                view: PhantomData,
            },
        )
    }
}

impl<L, R> Default for Arena<L, R> {
    fn default() -> Self {
        Arena::new()
    }
}

fn key_in<L, R, V: View>(pairs: &[Option<(L, R)>], id: NodeId) -> &V::Key<L, R> {
    match &pairs[id.0] {
        Some(pair) => V::key(pair),
        None => panic!("the end position has no key"),
    }
}

/// The links of the records, as seen from view `V`.
pub struct ViewLinks<'a, V> {
    links: &'a [[ViewNode; 2]],
    view: PhantomData<V>,
}

impl<'a, V: View> Links for ViewLinks<'a, V> {
    fn node(&self, id: NodeId) -> &ViewNode {
        &self.links[id.0][V::SIDE.index()]
    }
}

/// The links of the records, as seen from view `V`, writable.
pub struct ViewLinksMut<'a, V> {
    links: &'a mut Vec<[ViewNode; 2]>,
    view: PhantomData<V>,
}

impl<'a, V: View> Links for ViewLinksMut<'a, V> {
    fn node(&self, id: NodeId) -> &ViewNode {
        &self.links[id.0][V::SIDE.index()]
    }
}

impl<'a, V: View> LinksMut for ViewLinksMut<'a, V> {
    fn node_mut(&mut self, id: NodeId) -> &mut ViewNode {
        &mut self.links[id.0][V::SIDE.index()]
    }
}

/// The keys of the records, as seen from view `V`.
pub struct ViewKeys<'a, L, R, V> {
    pairs: &'a [Option<(L, R)>],
    view: PhantomData<V>,
}

impl<'a, L, R, V: View> Keys for ViewKeys<'a, L, R, V> {
    type Key = V::Key<L, R>;

    fn key(&self, id: NodeId) -> &V::Key<L, R> {
        key_in::<L, R, V>(self.pairs, id)
    }
}

#[test]
fn flip_keeps_the_record() {
    let mut arena: Arena<i32, char> = Arena::new();
    let id = arena.alloc((7, 'x'), [1, 2]);
    let other = flip::<Left>(id);
    assert_eq!(*arena.key::<Left>(id), 7);
    assert_eq!(*arena.key::<Right>(other), 'x');
    assert_eq!(arena.links::<Left>().node(id).priority, 1);
    assert_eq!(arena.links::<Right>().node(other).priority, 2);
    assert_eq!(flip::<Right>(other), id);
    assert_eq!(flip::<Left>(NodeId::SENTINEL), NodeId::SENTINEL);
}

#[test]
fn views_are_linked_independently() {
    let mut arena: Arena<i32, i32> = Arena::new();
    let a = arena.alloc((1, 1), [5, 5]);
    let b = arena.alloc((2, 2), [6, 6]);
    {
        let (mut links, keys) = arena.view_mut::<Left>();
        links.node_mut(a).right = Some(b);
        links.node_mut(b).parent = Some(a);
        assert_eq!(*keys.key(b), 2);
    }
    assert_eq!(arena.links::<Left>().node(a).right, Some(b));
    assert_eq!(arena.links::<Right>().node(a).right, None);
    assert_eq!(arena.links::<Right>().node(b).parent, None);
}

#[test]
fn freed_slots_are_reused() {
    let mut arena: Arena<i32, i32> = Arena::with_capacity(4);
    let a = arena.alloc((1, 10), [0, 0]);
    let b = arena.alloc((2, 20), [0, 0]);
    assert_eq!(arena.live(), 2);
    assert_eq!(arena.free(a), (1, 10));
    assert_eq!(arena.pair(a), None);
    assert_eq!(arena.live(), 1);
    let c = arena.alloc((3, 30), [0, 0]);
    assert_eq!(c, a);
    assert_eq!(arena.pair(b), Some(&(2, 20)));
    arena.clear();
    assert_eq!(arena.live(), 0);
    assert_eq!(arena.links::<Left>().node(NodeId::SENTINEL), &ViewNode::sentinel());
}

#[test]
#[should_panic]
fn sentinel_has_no_key() {
    let arena: Arena<i32, i32> = Arena::new();
    arena.key::<Left>(NodeId::SENTINEL);
}
