use std::fmt::Debug;
use std::iter::FusedIterator;

use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::rbtree::RbTree;

/// An iterator over the entries of a `RbTree`.
///
/// Both ends walk towards each other through parent links, the number of
/// remaining entries tells them when they have met.
pub struct Iter<'a, K, V, C, Ix> {
    /// Reference to the tree
    tree_ref: &'a RbTree<K, V, C, Ix>,
    /// Next node from the front
    front: Option<NodeIndex<Ix>>,
    /// Next node from the back
    back: Option<NodeIndex<Ix>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, K, V, C, Ix> Iter<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<K, V, C, Ix>) -> Self {
        Iter {
            tree_ref,
            front: tree_ref.first_node(),
            back: tree_ref.last_node(),
            remaining: tree_ref.len(),
        }
    }
}

impl<K, V, C, Ix: Copy> Clone for Iter<'_, K, V, C, Ix> {
    fn clone(&self) -> Self {
        Iter {
            tree_ref: self.tree_ref,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: Debug, V: Debug, C, Ix: IndexType> Debug for Iter<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, C, Ix> Iterator for Iter<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front?;
        self.remaining -= 1;
        self.front = self.tree_ref.successor(x);
        Some(self.tree_ref.node_ref(x, Node::entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C, Ix> DoubleEndedIterator for Iter<'_, K, V, C, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back?;
        self.remaining -= 1;
        self.back = self.tree_ref.predecessor(x);
        Some(self.tree_ref.node_ref(x, Node::entry))
    }
}

impl<K, V, C, Ix: IndexType> ExactSizeIterator for Iter<'_, K, V, C, Ix> {}

impl<K, V, C, Ix: IndexType> FusedIterator for Iter<'_, K, V, C, Ix> {}

/// An iterator over the keys of a `RbTree`.
pub struct Keys<'a, K, V, C, Ix> {
    pub(crate) inner: Iter<'a, K, V, C, Ix>,
}

impl<'a, K, V, C, Ix: IndexType> Iterator for Keys<'a, K, V, C, Ix> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, Ix: IndexType> DoubleEndedIterator for Keys<'_, K, V, C, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, C, Ix: IndexType> ExactSizeIterator for Keys<'_, K, V, C, Ix> {}

impl<K, V, C, Ix: IndexType> FusedIterator for Keys<'_, K, V, C, Ix> {}

/// An iterator over the values of a `RbTree`.
pub struct Values<'a, K, V, C, Ix> {
    pub(crate) inner: Iter<'a, K, V, C, Ix>,
}

impl<'a, K, V, C, Ix: IndexType> Iterator for Values<'a, K, V, C, Ix> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, C, Ix: IndexType> DoubleEndedIterator for Values<'_, K, V, C, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, C, Ix: IndexType> ExactSizeIterator for Values<'_, K, V, C, Ix> {}

impl<K, V, C, Ix: IndexType> FusedIterator for Values<'_, K, V, C, Ix> {}

/// An into iterator over the entries of a `RbTree`.
///
/// Entries are moved out of their nodes as they are yielded; the links
/// stay in place so the walk can continue from a drained node.
pub struct IntoIter<K, V, C, Ix> {
    tree: RbTree<K, V, C, Ix>,
    /// Next node from the front
    front: Option<NodeIndex<Ix>>,
    /// Next node from the back
    back: Option<NodeIndex<Ix>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<K, V, C, Ix> IntoIter<K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: RbTree<K, V, C, Ix>) -> Self {
        IntoIter {
            front: tree.first_node(),
            back: tree.last_node(),
            remaining: tree.len(),
            tree,
        }
    }
}

impl<K, V, C, Ix> Iterator for IntoIter<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(x);
        Some(self.tree.nodes[x.index()].take_entry())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C, Ix> DoubleEndedIterator for IntoIter<K, V, C, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(x);
        Some(self.tree.nodes[x.index()].take_entry())
    }
}

impl<K, V, C, Ix: IndexType> ExactSizeIterator for IntoIter<K, V, C, Ix> {}

impl<K, V, C, Ix: IndexType> FusedIterator for IntoIter<K, V, C, Ix> {}
