use std::fmt;

use crate::comparator::Comparator;
use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::rbtree::RbTree;

/// A view into a single entry in a tree, which may either be vacant or occupied.
pub enum Entry<'a, K, V, C, Ix> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C, Ix>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C, Ix>),
}

/// A view into an occupied entry in a `RbTree`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C, Ix> {
    /// Reference to the tree
    pub(crate) tree_ref: &'a mut RbTree<K, V, C, Ix>,
    /// The entry node
    pub(crate) node_idx: NodeIndex<Ix>,
}

/// A view into a vacant entry in a `RbTree`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, C, Ix> {
    /// Mutable reference to the tree
    pub(crate) tree_ref: &'a mut RbTree<K, V, C, Ix>,
    /// The key of this entry
    pub(crate) key: K,
}

impl<'a, K, V, C, Ix> Entry<'a, K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbTree};
    ///
    /// let mut tree = RbTree::new();
    /// assert!(matches!(tree.entry("a"), Entry::Vacant(_)));
    /// tree.entry("a").or_insert(3);
    /// assert!(matches!(tree.entry("a"), Entry::Occupied(_)));
    /// assert_eq!(tree.get(&"a"), Some(&3));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`or_insert`](Self::or_insert), computing the default only when
    /// the entry is vacant.
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Like [`or_insert`](Self::or_insert) with `V::default()`.
    #[inline]
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the tree.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbTree};
    ///
    /// let mut tree = RbTree::new();
    ///
    /// tree.put(6, 3);
    /// assert!(matches!(tree.entry(6), Entry::Occupied(_)));
    /// tree.entry(6).and_modify(|v| *v += 1);
    /// assert_eq!(tree.get(&6), Some(&4));
    /// ```
    #[inline]
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Self::Occupied(entry)
            }
            Entry::Vacant(entry) => Self::Vacant(entry),
        }
    }

    /// The key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => &entry.key,
        }
    }
}

impl<'a, K, V, C, Ix> OccupiedEntry<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    /// The key stored in the tree.
    #[inline]
    pub fn key(&self) -> &K {
        self.tree_ref.node_ref(self.node_idx, Node::key)
    }

    /// A reference to the value.
    #[inline]
    pub fn get(&self) -> &V {
        self.tree_ref.node_ref(self.node_idx, Node::value)
    }

    /// A mutable reference to the value.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree_ref.node_mut(self.node_idx, Node::value_mut)
    }

    /// Convert the entry into a mutable reference bound to the tree.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        self.tree_ref.node_mut(self.node_idx, Node::value_mut)
    }

    /// Replace the value, returning the old one.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Remove the entry from the tree, returning its key and value.
    #[inline]
    pub fn remove_entry(self) -> (K, V) {
        self.tree_ref.remove_node(self.node_idx)
    }

    /// Remove the entry from the tree, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<'a, K, V, C, Ix> VacantEntry<'a, K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    /// The key that would be inserted.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Insert the value, returning a mutable reference to it.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        // a new node is always pushed at the end of the arena and
        // rebalancing never moves nodes between slots
        let entry_idx = NodeIndex::new(self.tree_ref.nodes.len());
        let _ignore = self.tree_ref.put(self.key, value);
        self.tree_ref.node_mut(entry_idx, Node::value_mut)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, Ix: IndexType> fmt::Debug for Entry<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Entry::Vacant(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, Ix: IndexType> fmt::Debug for OccupiedEntry<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

impl<K: fmt::Debug, V, C, Ix> fmt::Debug for VacantEntry<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(&self.key).finish()
    }
}

#[cfg(test)]
mod test {
    use crate::RbTree;

    use super::*;

    #[test]
    fn or_insert_with_counts_words() {
        let mut tree = RbTree::new();
        for word in "b a c a b a".split(' ') {
            *tree.entry(word).or_insert_with(|| 0) += 1;
        }
        assert_eq!(
            tree.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![("a", 3), ("b", 2), ("c", 1)]
        );
    }

    #[test]
    fn occupied_entry_insert_and_remove() {
        let mut tree: RbTree<i32, i32> = (0..10).map(|k| (k, k * 10)).collect();
        match tree.entry(4) {
            Entry::Occupied(mut entry) => {
                assert_eq!(entry.key(), &4);
                assert_eq!(entry.insert(41), 40);
                assert_eq!(entry.get(), &41);
                assert_eq!(entry.remove_entry(), (4, 41));
            }
            Entry::Vacant(_) => unreachable!(),
        }
        assert_eq!(tree.len(), 9);
        assert!(!tree.contains_key(&4));
    }

    #[test]
    fn vacant_entry_keeps_key() {
        let mut tree: RbTree<i32, Vec<u8>> = RbTree::new();
        let entry = tree.entry(7);
        assert_eq!(entry.key(), &7);
        match entry {
            Entry::Vacant(vacant) => {
                assert_eq!(vacant.key(), &7);
                vacant.insert(vec![1]).push(2);
            }
            Entry::Occupied(_) => unreachable!(),
        }
        assert_eq!(tree.get(&7), Some(&vec![1, 2]));
        tree.entry(8).or_default().push(9);
        assert_eq!(tree.get(&8), Some(&vec![9]));
    }
}
