//! This module contains the balanced tree machinery behind the bimap.
//!
//! The trees here never own their nodes. A node is a [`NodeId`] into storage owned
//! by someone else, and a tree is read and relinked only through the [`Links`],
//! [`LinksMut`] and [`Keys`] capabilities. This is what lets one pair record be
//! a node of two different trees at the same time.

pub mod dual_node;
pub mod iterators;
pub mod treap;

pub use dual_node::*;
pub use treap::Treap;

/// A handle to a node. Handles are stable: a node keeps its handle until it is freed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The keyless anchor shared by both views. Its left son is the root of the view,
    /// and it doubles as the "past the end" position.
    pub const SENTINEL: NodeId = NodeId(0);

    pub fn is_sentinel(self) -> bool {
        self == NodeId::SENTINEL
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// The per-view part of a node: its links in one tree, and its priority in that tree.
///
/// The links are navigation only. Ownership of the node is elsewhere.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ViewNode {
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// convention: a bigger number should go higher up the tree.
    pub priority: u64,
}

impl ViewNode {
    /// A detached node with the given priority.
    pub fn new(priority: u64) -> ViewNode {
        ViewNode {
            parent: None,
            left: None,
            right: None,
            priority,
        }
    }

    /// The sentinel is never displaced by any other node.
    pub fn sentinel() -> ViewNode {
        ViewNode::new(u64::MAX)
    }
}

/// Read access to the links of one view.
pub trait Links {
    fn node(&self, id: NodeId) -> &ViewNode;
}

/// Write access to the links of one view.
pub trait LinksMut: Links {
    fn node_mut(&mut self, id: NodeId) -> &mut ViewNode;
}

/// The key accessor of one view.
///
/// Kept apart from [`Links`] so that a key can stay borrowed while the links are rewired.
pub trait Keys {
    type Key: ?Sized;
    fn key(&self, id: NodeId) -> &Self::Key;
}
