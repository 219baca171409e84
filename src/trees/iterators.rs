use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::*;

/// The in-order successor of `node`.
///
/// Stepping from the last node gives the sentinel, since the root hangs to the
/// left of the sentinel. Stepping from the sentinel itself gives `None`.
pub fn successor<N: Links>(nodes: &N, node: NodeId) -> Option<NodeId> {
    if let Some(mut current) = nodes.node(node).right {
        while let Some(left) = nodes.node(current).left {
            current = left;
        }
        return Some(current);
    }
    let mut current = node;
    let mut parent = nodes.node(current).parent;
    while let Some(p) = parent {
        if nodes.node(p).right != Some(current) {
            break;
        }
        current = p;
        parent = nodes.node(current).parent;
    }
    parent
}

/// The in-order predecessor of `node`.
///
/// Stepping back from the sentinel gives the last node. Stepping back from the first
/// node gives `None`.
pub fn predecessor<N: Links>(nodes: &N, node: NodeId) -> Option<NodeId> {
    if let Some(mut current) = nodes.node(node).left {
        while let Some(right) = nodes.node(current).right {
            current = right;
        }
        return Some(current);
    }
    let mut current = node;
    let mut parent = nodes.node(current).parent;
    while let Some(p) = parent {
        if nodes.node(p).left != Some(current) {
            break;
        }
        current = p;
        parent = nodes.node(current).parent;
    }
    parent
}

/// Iterator over the pairs of an [`Arena`] in the order of view `V`.
///
/// Yields `(key, partner)`: the key of view `V` first, then the key on the other side.
pub struct Iter<'a, L, R, V> {
    arena: &'a Arena<L, R>,
    // first node not yet yielded from the front
    front: NodeId,
    // one past the last node not yet yielded from the back
    back: NodeId,
    remaining: usize,
    view: PhantomData<V>,
}

impl<'a, L, R, V: View> Iter<'a, L, R, V> {
    /// Iterates from `front` (inclusive) to `back` (exclusive), which must be
    /// `len` steps apart.
    pub fn new(arena: &'a Arena<L, R>, front: NodeId, back: NodeId, len: usize) -> Self {
        Iter {
            arena,
            front,
            back,
            remaining: len,
            view: PhantomData,
        }
    }

    fn item(&self, node: NodeId) -> (&'a V::Key<L, R>, &'a <V::Other as View>::Key<L, R>) {
        let arena: &'a Arena<L, R> = self.arena;
        (arena.key::<V>(node), arena.key::<V::Other>(flip::<V>(node)))
    }
}

impl<'a, L, R, V: View> Iterator for Iter<'a, L, R, V> {
    type Item = (&'a V::Key<L, R>, &'a <V::Other as View>::Key<L, R>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        self.front = successor(&self.arena.links::<V>(), node).unwrap_or(NodeId::SENTINEL);
        self.remaining -= 1;
        Some(self.item(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, L, R, V: View> DoubleEndedIterator for Iter<'a, L, R, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = predecessor(&self.arena.links::<V>(), self.back).unwrap_or(NodeId::SENTINEL);
        self.remaining -= 1;
        Some(self.item(self.back))
    }
}

impl<'a, L, R, V: View> ExactSizeIterator for Iter<'a, L, R, V> {}

impl<'a, L, R, V: View> FusedIterator for Iter<'a, L, R, V> {}

impl<'a, L, R, V> Clone for Iter<'a, L, R, V> {
    fn clone(&self) -> Self {
        Iter {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            view: PhantomData,
        }
    }
}

#[test]
fn stepping_through_a_view() {
    let treap = Treap::new(crate::Natural);
    let mut arena: Arena<i32, i32> = Arena::new();
    for (i, key) in [5, 1, 9, 3, 7].iter().enumerate() {
        let id = arena.alloc((*key, -*key), [(i as u64 * 31) % 7, 0]);
        let (mut links, keys) = arena.view_mut::<Left>();
        treap.insert(&mut links, &keys, id);
    }
    let links = arena.links::<Left>();
    let mut node = treap.first(&links);
    let mut forward = vec![];
    while !node.is_sentinel() {
        forward.push(*arena.key::<Left>(node));
        node = successor(&links, node).unwrap();
    }
    assert_eq!(forward, vec![1, 3, 5, 7, 9]);
    assert_eq!(successor(&links, NodeId::SENTINEL), None);

    let mut backward = vec![];
    let mut node = predecessor(&links, NodeId::SENTINEL).unwrap();
    loop {
        backward.push(*arena.key::<Left>(node));
        match predecessor(&links, node) {
            Some(prev) => node = prev,
            None => break,
        }
    }
    assert_eq!(backward, vec![9, 7, 5, 3, 1]);
}
