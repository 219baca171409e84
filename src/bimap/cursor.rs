use std::fmt;
use std::marker::PhantomData;

use crate::trees::{flip, Left, NodeId, Right, View};

/// A position in one view of a [`crate::Bimap`]: either a pair, or the end of the view.
///
/// Cursors are plain handles and do not borrow the map. Reading through a cursor and
/// moving it are done by the map: see [`crate::Bimap::key`], [`crate::Bimap::next`]
/// and [`crate::Bimap::prev`].
///
/// A cursor stays valid until the pair it points to is erased, or the map is cleared
/// or dropped. Using an invalidated cursor is a logic error: it will not cause memory
/// unsafety, but the results are unspecified.
pub struct Cursor<V> {
    pub(crate) node: NodeId,
    view: PhantomData<V>,
}

/// A cursor ordered by left keys.
pub type LeftCursor = Cursor<Left>;
/// A cursor ordered by right keys.
pub type RightCursor = Cursor<Right>;

impl<V: View> Cursor<V> {
    pub(crate) fn new(node: NodeId) -> Self {
        Cursor {
            node,
            view: PhantomData,
        }
    }

    /// The cursor at the same pair, in the other view.
    /// The end cursor of one view flips to the end cursor of the other view.
    pub fn flip(self) -> Cursor<V::Other> {
        Cursor::new(flip::<V>(self.node))
    }

    /// Returns true if this is the end cursor of its view.
    pub fn is_end(self) -> bool {
        self.node.is_sentinel()
    }

    pub fn node(self) -> NodeId {
        self.node
    }
}

// the derives would require `V : Clone` and so on, which is unnecessary
impl<V> Clone for Cursor<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Cursor<V> {}

impl<V> PartialEq for Cursor<V> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<V> Eq for Cursor<V> {}

impl<V> std::hash::Hash for Cursor<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<V: View> fmt::Debug for Cursor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            write!(f, "Cursor<{}>(end)", V::SIDE)
        } else {
            write!(f, "Cursor<{}>({})", V::SIDE, self.node.index())
        }
    }
}

#[test]
fn flip_is_an_involution() {
    let cursor: LeftCursor = Cursor::new(NodeId(3));
    let flipped: RightCursor = cursor.flip();
    assert_eq!(flipped.node(), NodeId(3));
    assert_eq!(flipped.flip(), cursor);
    let end: LeftCursor = Cursor::new(NodeId::SENTINEL);
    assert!(end.flip().is_end());
    assert_eq!(format!("{:?}", end), "Cursor<left>(end)");
}
