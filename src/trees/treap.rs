//! Implementation of treaps
//!
//! A treap is a binary search tree by key, and at the same time a max-heap by a random
//! priority kept in every node. This keeps the expected depth logarithmic, without any
//! explicit balancing bookkeeping: [`Treap::split`] and [`Treap::merge`] are the only
//! rebalancing primitives, and insertion and removal are built out of them.
//!
//! Its operations take `O(log n)` expected time, probabilistically.
//! Each operation may take up to linear time, but the probability of any operation
//! taking more than `O(log n)` time is extremely low.
//!
//! The [`Treap`] value itself holds nothing but the comparator. The nodes are reached
//! through [`Links`] and [`Keys`], and the root of the tree is the left son of
//! [`NodeId::SENTINEL`].

use super::*;
use crate::Compare;

pub struct Treap<C> {
    cmp: C,
}

type Subtree = Option<NodeId>;

impl<C> Treap<C> {
    pub fn new(cmp: C) -> Treap<C> {
        Treap { cmp }
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// The root of the tree, i.e., the left son of the sentinel.
    pub fn root<N: Links>(&self, nodes: &N) -> Subtree {
        nodes.node(NodeId::SENTINEL).left
    }

    fn set_parent<N: LinksMut>(nodes: &mut N, child: Subtree, parent: Subtree) {
        if let Some(child) = child {
            nodes.node_mut(child).parent = parent;
        }
    }

    fn set_root<N: LinksMut>(nodes: &mut N, root: Subtree) {
        nodes.node_mut(NodeId::SENTINEL).left = root;
        Self::set_parent(nodes, root, Some(NodeId::SENTINEL));
    }

    /// Splits `tree` into the nodes whose keys are less than `key`, and the rest.
    /// Both returned subtrees are detached: their roots have no parent.
    pub fn split<N, S>(&self, nodes: &mut N, keys: &S, tree: Subtree, key: &S::Key) -> (Subtree, Subtree)
    where
        N: LinksMut,
        S: Keys,
        C: Compare<S::Key>,
    {
        let (less, geq) = self.split_internal(nodes, keys, tree, key);
        Self::set_parent(nodes, less, None);
        Self::set_parent(nodes, geq, None);
        (less, geq)
    }

    fn split_internal<N, S>(&self, nodes: &mut N, keys: &S, tree: Subtree, key: &S::Key) -> (Subtree, Subtree)
    where
        N: LinksMut,
        S: Keys,
        C: Compare<S::Key>,
    {
        let node = match tree {
            None => return (None, None),
            Some(node) => node,
        };
        if self.cmp.less(keys.key(node), key) {
            let right = nodes.node(node).right;
            let (less, geq) = self.split_internal(nodes, keys, right, key);
            nodes.node_mut(node).right = less;
            Self::set_parent(nodes, less, Some(node));
            Self::set_parent(nodes, geq, None);
            (Some(node), geq)
        } else {
            let left = nodes.node(node).left;
            let (less, geq) = self.split_internal(nodes, keys, left, key);
            nodes.node_mut(node).left = geq;
            Self::set_parent(nodes, geq, Some(node));
            Self::set_parent(nodes, less, None);
            (less, Some(node))
        }
    }

    /// Concatenates two trees. Every key in `tree1` must be less than every key in `tree2`.
    /// Returns the root of the result, whose parent link is left for the caller to set.
    pub fn merge<N: LinksMut>(&self, nodes: &mut N, tree1: Subtree, tree2: Subtree) -> Subtree {
        let (node1, node2) = match (tree1, tree2) {
            (None, tree) | (tree, None) => return tree,
            (Some(node1), Some(node2)) => (node1, node2),
        };
        if nodes.node(node1).priority > nodes.node(node2).priority {
            let right = nodes.node(node1).right;
            let merged = self.merge(nodes, right, tree2);
            nodes.node_mut(node1).right = merged;
            Self::set_parent(nodes, merged, tree1);
            tree1
        } else {
            let left = nodes.node(node2).left;
            let merged = self.merge(nodes, tree1, left);
            nodes.node_mut(node2).left = merged;
            Self::set_parent(nodes, merged, tree2);
            tree2
        }
    }

    /// Links a detached node into the tree.
    ///
    /// Equal keys are not rejected here: a node equal to an existing key goes to its right.
    pub fn insert<N, S>(&self, nodes: &mut N, keys: &S, node: NodeId)
    where
        N: LinksMut,
        S: Keys,
        C: Compare<S::Key>,
    {
        let root = self.root(nodes);
        let root = self.insert_internal(nodes, keys, root, node);
        Self::set_root(nodes, Some(root));
    }

    // returns the new root of `tree`.
    fn insert_internal<N, S>(&self, nodes: &mut N, keys: &S, tree: Subtree, node: NodeId) -> NodeId
    where
        N: LinksMut,
        S: Keys,
        C: Compare<S::Key>,
    {
        let root = match tree {
            None => return node,
            Some(root) => root,
        };
        let priority = nodes.node(node).priority;
        let root_priority = nodes.node(root).priority;
        if priority == root_priority {
            log::trace!("found equal priorities {} while inserting", priority);
        }

        if priority > root_priority {
            let (less, geq) = self.split(nodes, keys, tree, keys.key(node));
            let new = nodes.node_mut(node);
            new.left = less;
            new.right = geq;
            Self::set_parent(nodes, less, Some(node));
            Self::set_parent(nodes, geq, Some(node));
            return node;
        }

        if self.cmp.less(keys.key(node), keys.key(root)) {
            let left = nodes.node(root).left;
            let left = self.insert_internal(nodes, keys, left, node);
            nodes.node_mut(root).left = Some(left);
            nodes.node_mut(left).parent = Some(root);
        } else {
            let right = nodes.node(root).right;
            let right = self.insert_internal(nodes, keys, right, node);
            nodes.node_mut(root).right = Some(right);
            nodes.node_mut(right).parent = Some(root);
        }
        root
    }

    /// Unlinks a node from the tree. Its sons are merged in its place.
    /// Returns the merged subtree, which now hangs where the node was.
    /// The node is left detached.
    pub fn remove<N: LinksMut>(&self, nodes: &mut N, node: NodeId) -> Subtree {
        let ViewNode {
            parent,
            left,
            right,
            ..
        } = *nodes.node(node);
        let merged = self.merge(nodes, left, right);
        Self::set_parent(nodes, merged, parent);
        // the root's parent is the sentinel, so the root needs no special case
        if let Some(parent) = parent {
            let parent = nodes.node_mut(parent);
            if parent.left == Some(node) {
                parent.left = merged;
            } else {
                parent.right = merged;
            }
        }
        let detached = nodes.node_mut(node);
        detached.parent = None;
        detached.left = None;
        detached.right = None;
        merged
    }

    /// Returns the node with a key equivalent to `key`, or the sentinel.
    pub fn find<N, S>(&self, nodes: &N, keys: &S, key: &S::Key) -> NodeId
    where
        N: Links,
        S: Keys,
        C: Compare<S::Key>,
    {
        let mut current = self.root(nodes);
        while let Some(node) = current {
            let node_key = keys.key(node);
            if self.cmp.less(node_key, key) {
                current = nodes.node(node).right;
            } else if self.cmp.less(key, node_key) {
                current = nodes.node(node).left;
            } else {
                return node;
            }
        }
        NodeId::SENTINEL
    }

    /// Returns the first node whose key is not less than `key`, or the sentinel.
    pub fn lower_bound<N, S>(&self, nodes: &N, keys: &S, key: &S::Key) -> NodeId
    where
        N: Links,
        S: Keys,
        C: Compare<S::Key>,
    {
        self.descend(nodes, |node| !self.cmp.less(keys.key(node), key))
    }

    /// Returns the first node whose key is greater than `key`, or the sentinel.
    pub fn upper_bound<N, S>(&self, nodes: &N, keys: &S, key: &S::Key) -> NodeId
    where
        N: Links,
        S: Keys,
        C: Compare<S::Key>,
    {
        self.descend(nodes, |node| self.cmp.less(key, keys.key(node)))
    }

    // finds the first node for which `goes_left` holds. `goes_left` must be monotone
    // along the in-order traversal.
    fn descend<N, F>(&self, nodes: &N, goes_left: F) -> NodeId
    where
        N: Links,
        F: Fn(NodeId) -> bool,
    {
        let mut result = NodeId::SENTINEL;
        let mut current = self.root(nodes);
        while let Some(node) = current {
            if goes_left(node) {
                result = node;
                current = nodes.node(node).left;
            } else {
                current = nodes.node(node).right;
            }
        }
        result
    }

    /// The leftmost node, or the sentinel if the tree is empty.
    pub fn first<N: Links>(&self, nodes: &N) -> NodeId {
        let mut node = NodeId::SENTINEL;
        while let Some(left) = nodes.node(node).left {
            node = left;
        }
        node
    }

    /// The position past the last node, which is always the sentinel.
    pub fn last(&self) -> NodeId {
        NodeId::SENTINEL
    }

    /// Checks that the invariants hold: keys are strictly increasing in order,
    /// priorities are ordered as a max-heap, and parent links agree with son links.
    /// Panics otherwise. Returns the number of nodes in the tree.
    pub fn assert_correctness<N, S>(&self, nodes: &N, keys: &S) -> usize
    where
        N: Links,
        S: Keys,
        C: Compare<S::Key>,
    {
        let sentinel = nodes.node(NodeId::SENTINEL);
        assert_eq!(sentinel.parent, None);
        assert_eq!(sentinel.right, None);
        assert_eq!(sentinel.priority, u64::MAX);
        match sentinel.left {
            None => 0,
            Some(root) => self.assert_correctness_internal(nodes, keys, root, NodeId::SENTINEL, None, None),
        }
    }

    fn assert_correctness_internal<N, S>(
        &self,
        nodes: &N,
        keys: &S,
        node: NodeId,
        parent: NodeId,
        lower: Subtree,
        upper: Subtree,
    ) -> usize
    where
        N: Links,
        S: Keys,
        C: Compare<S::Key>,
    {
        let view_node = nodes.node(node);
        assert_eq!(view_node.parent, Some(parent), "broken parent link");
        assert!(view_node.priority <= nodes.node(parent).priority, "heap order violated");
        let key = keys.key(node);
        if let Some(lower) = lower {
            assert!(self.cmp.less(keys.key(lower), key), "keys out of order");
        }
        if let Some(upper) = upper {
            assert!(self.cmp.less(key, keys.key(upper)), "keys out of order");
        }

        let mut count = 1;
        if let Some(left) = view_node.left {
            count += self.assert_correctness_internal(nodes, keys, left, node, lower, Some(node));
        }
        if let Some(right) = view_node.right {
            count += self.assert_correctness_internal(nodes, keys, right, node, Some(node), upper);
        }
        count
    }
}

#[cfg(test)]
fn tree_from<I>(pairs: I) -> (Treap<crate::Natural>, Arena<i32, ()>, Vec<NodeId>)
where
    I: IntoIterator<Item = (i32, u64)>,
{
    let treap = Treap::new(crate::Natural);
    let mut arena = Arena::new();
    let mut ids = vec![];
    for (key, priority) in pairs {
        let id = arena.alloc((key, ()), [priority, 0]);
        let (mut links, keys) = arena.view_mut::<Left>();
        treap.insert(&mut links, &keys, id);
        ids.push(id);
    }
    (treap, arena, ids)
}

#[cfg(test)]
fn in_order(arena: &Arena<i32, ()>, tree: Subtree) -> Vec<i32> {
    fn walk(arena: &Arena<i32, ()>, tree: Subtree, out: &mut Vec<i32>) {
        if let Some(node) = tree {
            let links = *arena.links::<Left>().node(node);
            walk(arena, links.left, out);
            out.push(*arena.key::<Left>(node));
            walk(arena, links.right, out);
        }
    }
    let mut out = vec![];
    walk(arena, tree, &mut out);
    out
}

#[test]
fn treap_insert() {
    let (treap, arena, _) = tree_from((0..200).map(|i| ((i * 37) % 200, (i as u64 * 7919) % 1009)));
    assert_eq!(treap.assert_correctness(&arena.links::<Left>(), &arena.keys::<Left>()), 200);
    let root = treap.root(&arena.links::<Left>());
    assert_eq!(in_order(&arena, root), (0..200).collect::<Vec<_>>());
}

#[test]
fn treap_split_and_merge() {
    let (treap, mut arena, _) = tree_from((0..100).map(|i| (i * 2, (i as u64 * 104729) % 997)));
    let (mut links, keys) = arena.view_mut::<Left>();
    let root = treap.root(&links);
    let (less, geq) = treap.split(&mut links, &keys, root, &51);
    drop((links, keys));
    assert_eq!(in_order(&arena, less), (0..26).map(|i| i * 2).collect::<Vec<_>>());
    assert_eq!(in_order(&arena, geq), (26..100).map(|i| i * 2).collect::<Vec<_>>());

    let mut links = arena.links_mut::<Left>();
    let merged = treap.merge(&mut links, less, geq);
    Treap::<crate::Natural>::set_root(&mut links, merged);
    assert_eq!(treap.assert_correctness(&arena.links::<Left>(), &arena.keys::<Left>()), 100);
}

#[test]
fn treap_split_at_existing_key() {
    let (treap, mut arena, _) = tree_from((0..10).map(|i| (i, i as u64 * 13 % 7)));
    let (mut links, keys) = arena.view_mut::<Left>();
    let root = treap.root(&links);
    let (less, geq) = treap.split(&mut links, &keys, root, &4);
    drop((links, keys));
    assert_eq!(in_order(&arena, less), vec![0, 1, 2, 3]);
    assert_eq!(in_order(&arena, geq), vec![4, 5, 6, 7, 8, 9]);
}

#[test]
fn treap_remove() {
    for removed in 0..50 {
        let (treap, mut arena, ids) = tree_from((0..50).map(|i| (i, (i as u64 * 7907) % 211)));
        let mut links = arena.links_mut::<Left>();
        treap.remove(&mut links, ids[removed as usize]);
        assert_eq!(links.node(ids[removed as usize]), &ViewNode::new(links.node(ids[removed as usize]).priority));
        assert_eq!(treap.assert_correctness(&arena.links::<Left>(), &arena.keys::<Left>()), 49);
        let root = treap.root(&arena.links::<Left>());
        assert_eq!(
            in_order(&arena, root),
            (0..50).filter(|i| *i != removed).collect::<Vec<_>>()
        );
    }
}

#[test]
fn treap_bounds() {
    let (treap, arena, ids) = tree_from(vec![(1, 5), (2, 9), (3, 1), (8, 4), (32, 7)]);
    let (links, keys) = (arena.links::<Left>(), arena.keys::<Left>());
    assert_eq!(treap.find(&links, &keys, &8), ids[3]);
    assert_eq!(treap.find(&links, &keys, &7), NodeId::SENTINEL);
    assert_eq!(treap.lower_bound(&links, &keys, &4), ids[3]);
    assert_eq!(treap.lower_bound(&links, &keys, &8), ids[3]);
    assert_eq!(treap.upper_bound(&links, &keys, &8), ids[4]);
    assert_eq!(treap.lower_bound(&links, &keys, &100), NodeId::SENTINEL);
    assert_eq!(treap.upper_bound(&links, &keys, &-100), ids[0]);
    assert_eq!(treap.first(&links), ids[0]);
    assert_eq!(treap.last(), NodeId::SENTINEL);
}

#[test]
fn treap_adversarial_priorities() {
    // increasing priorities with increasing keys: every insertion becomes the root,
    // and the tree degenerates into a path. Still correct, only slower.
    let (treap, arena, ids) = tree_from((0..300).map(|i| (i, i as u64)));
    assert_eq!(treap.assert_correctness(&arena.links::<Left>(), &arena.keys::<Left>()), 300);
    assert_eq!(treap.root(&arena.links::<Left>()), Some(ids[299]));

    // all priorities equal
    let (treap, arena, _) = tree_from((0..300).rev().map(|i| (i, 42)));
    assert_eq!(treap.assert_correctness(&arena.links::<Left>(), &arena.keys::<Left>()), 300);
}

#[test]
fn treap_equal_keys_go_right() {
    let (treap, arena, ids) = tree_from(vec![(5, 10), (5, 3)]);
    let links = arena.links::<Left>();
    assert_eq!(treap.root(&links), Some(ids[0]));
    assert_eq!(links.node(ids[0]).right, Some(ids[1]));
}
