use std::cmp::Ordering;
use std::fmt;

use crate::comparator::{Comparator, Natural};
use crate::cursor::Cursor;
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::node::{Color, Node};

/// An ordered key-value map backed by a red-black tree.
///
/// Nodes live in a vector and refer to each other by [`NodeIndex`], so the
/// parent links used for rebalancing and cursor movement are plain indices.
/// Keys are ordered by the comparator `C` chosen at construction.
#[derive(Clone)]
pub struct RbTree<K, V, C = Natural, Ix = DefaultIx> {
    /// Vector that stores nodes, slot 0 is the sentinel
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the tree
    pub(crate) len: usize,
    /// Order of the keys
    pub(crate) comparator: C,
}

impl<K, V> RbTree<K, V>
where
    K: Ord,
{
    /// Create an empty `RbTree` ordered by `K`'s [`Ord`] implementation.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Create an empty `RbTree` with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C, Ix> Default for RbTree<K, V, C, Ix>
where
    C: Default,
    Ix: IndexType,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity_and_comparator(0, C::default())
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Create an empty `RbTree` ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    /// Create an empty `RbTree` ordered by `comparator` with room for
    /// `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
            comparator,
        }
    }

    /// The comparator ordering this tree.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Return the entry with the smallest key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.min(), None);
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    /// assert_eq!(tree.min(), Some((&1, &"a")));
    /// ```
    #[inline]
    pub fn min(&self) -> Option<(&K, &V)> {
        self.first_node().map(|x| self.node_ref(x, Node::entry))
    }

    /// Return the entry with the largest key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.max(), None);
    /// tree.put(2, "b");
    /// tree.put(1, "a");
    /// assert_eq!(tree.max(), Some((&2, &"b")));
    /// ```
    #[inline]
    pub fn max(&self) -> Option<(&K, &V)> {
        self.last_node().map(|x| self.node_ref(x, Node::entry))
    }

    /// Remove and return the entry with the smallest key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree: RbTree<_, _> = [(1, "a"), (2, "b")].into_iter().collect();
    /// assert_eq!(tree.pop_min(), Some((1, "a")));
    /// assert_eq!(tree.pop_min(), Some((2, "b")));
    /// assert_eq!(tree.pop_min(), None);
    /// ```
    #[inline]
    pub fn pop_min(&mut self) -> Option<(K, V)> {
        self.first_node().map(|x| self.remove_node(x))
    }

    /// Remove and return the entry with the largest key.
    #[inline]
    pub fn pop_max(&mut self) -> Option<(K, V)> {
        self.last_node().map(|x| self.remove_node(x))
    }

    /// Get an iterator over the entries of the tree, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, C, Ix> {
        Iter::new(self)
    }

    /// Get an iterator over the keys of the tree, in order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, C, Ix> {
        Keys { inner: self.iter() }
    }

    /// Get an iterator over the values of the tree, in key order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, C, Ix> {
        Values { inner: self.iter() }
    }

    /// Get a cursor positioned before the first entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let tree: RbTree<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    /// let mut cursor = tree.cursor();
    /// let mut seen = vec![];
    /// while cursor.move_next() {
    ///     seen.push(*cursor.key());
    /// }
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// while cursor.move_prev() {
    ///     seen.push(*cursor.key());
    /// }
    /// assert_eq!(seen, vec![1, 2, 3, 3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, K, V, C, Ix> {
        Cursor::new(self, None)
    }

    /// Get a cursor positioned at `node`.
    ///
    /// # Panics
    ///
    /// This method panics when `node` does not refer to a node of this tree
    #[inline]
    #[must_use]
    pub fn cursor_at(&self, node: NodeIndex<Ix>) -> Cursor<'_, K, V, C, Ix> {
        assert!(
            !node.is_sentinel() && node.index() < self.nodes.len(),
            "node index out of bounds"
        );
        Cursor::new(self, Some(node))
    }

    /// Remove all elements from the tree
    #[inline]
    pub fn clear(&mut self) {
        rb_debug!(len = self.len, "clearing tree");
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    /// Insert a key-value pair into the tree.
    /// If the key exists, overwrite key and value in place and return the
    /// previous value.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.put(2, "x"), None);
    /// assert_eq!(tree.put(2, "y"), Some("x"));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&2), Some(&"y"));
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        let mut ord = Ordering::Equal;
        while !x.is_sentinel() {
            y = x;
            ord = self.comparator.compare(&key, self.node_ref(x, Node::key));
            match ord {
                Ordering::Equal => return Some(self.node_mut(x, Node::replace(key, value))),
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }

        let z = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != z,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(key, value, y));
        if y.is_sentinel() {
            self.root = z;
        } else if ord == Ordering::Less {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
        None
    }

    /// Remove a key from the tree, returning its value if the key exists.
    /// Removing an absent key leaves the tree untouched.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.put(1, "a");
    /// tree.put(2, "b");
    /// assert_eq!(tree.remove(&3), None);
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.remove(&2), Some("b"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.search(key).map(|z| self.remove_node(z).1)
    }

    /// Return a reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.put("b", 2);
    /// assert_eq!(tree.get(&"b"), Some(&2));
    /// assert_eq!(tree.get(&"a"), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(|idx| self.node_ref(idx, Node::value))
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.put(3, 0);
    /// if let Some(v) = tree.get_mut(&3) {
    ///     *v += 1;
    /// }
    /// assert_eq!(tree.get(&3), Some(&1));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.search(key).map(|idx| self.node_mut(idx, Node::value_mut))
    }

    /// Return `true` if the tree holds `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Return the handle of the node holding `key`, for use with
    /// [`cursor_at`](Self::cursor_at).
    #[inline]
    pub fn lookup(&self, key: &K) -> Option<NodeIndex<Ix>> {
        self.search(key)
    }

    /// Return the entry with the largest key less than or equal to `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let tree: RbTree<_, _> = [(10, 'a'), (20, 'b'), (5, 'c'), (15, 'd')].into_iter().collect();
    /// assert_eq!(tree.floor(&12), Some((&10, &'a')));
    /// assert_eq!(tree.floor(&15), Some((&15, &'d')));
    /// assert_eq!(tree.floor(&4), None);
    /// ```
    #[inline]
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.floor_node(key).map(|x| self.node_ref(x, Node::entry))
    }

    /// Return the entry with the smallest key greater than or equal to `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbTree;
    ///
    /// let tree: RbTree<_, _> = [(10, 'a'), (20, 'b'), (5, 'c'), (15, 'd')].into_iter().collect();
    /// assert_eq!(tree.ceiling(&12), Some((&15, &'d')));
    /// assert_eq!(tree.ceiling(&5), Some((&5, &'c')));
    /// assert_eq!(tree.ceiling(&21), None);
    /// ```
    #[inline]
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.ceiling_node(key).map(|x| self.node_ref(x, Node::entry))
    }

    /// Get the given key's corresponding entry in the tree for in-place manipulation.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbTree};
    ///
    /// let mut tree = RbTree::new();
    ///
    /// assert!(matches!(tree.entry(1), Entry::Vacant(_)));
    /// tree.entry(1).or_insert(0);
    /// assert!(matches!(tree.entry(1), Entry::Occupied(_)));
    /// tree.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(tree.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C, Ix> {
        match self.search(&key) {
            Some(node_idx) => Entry::Occupied(OccupiedEntry {
                tree_ref: self,
                node_idx,
            }),
            None => Entry::Vacant(VacantEntry {
                tree_ref: self,
                key,
            }),
        }
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, V, Ix> {
        Node {
            key: None,
            value: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new red leaf under `parent`
    fn new_node(key: K, value: V, parent: NodeIndex<Ix>) -> Node<K, V, Ix> {
        Node {
            key: Some(key),
            value: Some(value),
            left: Some(NodeIndex::sentinel()),
            right: Some(NodeIndex::sentinel()),
            parent: Some(parent),
            color: Color::Red,
        }
    }

    /// Unlink the node `z` from the tree and drop it from the arena,
    /// returning its key and value.
    pub(crate) fn remove_node(&mut self, z: NodeIndex<Ix>) -> (K, V) {
        let y = self.remove_inner(z);
        let two_children = y != z;

        // Swap the node with the last node stored in the vector and update indices
        let mut removed = self.nodes.swap_remove(y.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, y);

        if two_children {
            let z = if z == old { y } else { z };
            let node = &mut self.nodes[z.index()];
            std::mem::swap(&mut node.key, &mut removed.key);
            std::mem::swap(&mut node.value, &mut removed.value);
        }
        removed.take_entry()
    }

    /// Unlink a node from the tree, returning the handle of the node that
    /// actually left the tree structure.
    ///
    /// When `z` has two children its in-order predecessor is unlinked in
    /// its place; the caller moves the predecessor's entry into `z`.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let y = if self.node_ref(z, Node::left).is_sentinel()
            || self.node_ref(z, Node::right).is_sentinel()
        {
            z
        } else {
            self.tree_maximum(self.node_ref(z, Node::left))
        };

        // y has at most one child
        let x = if self.node_ref(y, Node::left).is_sentinel() {
            self.node_ref(y, Node::right)
        } else {
            self.node_ref(y, Node::left)
        };
        // also sets the parent of the sentinel, which the fixup relies on
        self.transplant(y, x);

        if self.node_ref(y, Node::is_black) {
            self.remove_fixup(x);
        }

        self.len = self.len.wrapping_sub(1);
        y
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    rb_trace!(node = ?z, "insert fixup: recolor");
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    rb_trace!(node = ?z, "insert fixup: recolor");
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    rb_trace!(node = ?x, "remove fixup: red sibling");
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    rb_trace!(node = ?x, "remove fixup: push deficit up");
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    rb_trace!(node = ?x, "remove fixup: absorb deficit");
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    rb_trace!(node = ?x, "remove fixup: red sibling");
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    rb_trace!(node = ?x, "remove fixup: push deficit up");
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    rb_trace!(node = ?x, "remove fixup: absorb deficit");
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        let y = self.node_ref(x, Node::right);
        rb_trace!(node = ?x, pivot = ?y, "left rotate");
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.node_ref(y, Node::left).is_sentinel() {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        let y = self.node_ref(x, Node::left);
        rb_trace!(node = ?x, pivot = ?y, "right rotate");
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.node_ref(y, Node::right).is_sentinel() {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.node_ref(x, Node::parent).is_sentinel() {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.node_ref(u, Node::parent).is_sentinel() {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Update nodes indices after remove
    ///
    /// The node formerly stored at `old` now lives at `new`; its parent and
    /// children are pointed at the new slot.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_some() {
            if !self.node_ref(new, Node::parent).is_sentinel() {
                if self.parent_ref(new, Node::left) == old {
                    self.parent_mut(new, Node::set_left(new));
                } else {
                    self.parent_mut(new, Node::set_right(new));
                }
            }
            self.left_mut(new, Node::set_parent(new));
            self.right_mut(new, Node::set_parent(new));
        }
    }
}

// Ordered queries and navigation over node handles
impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    /// Search for the node with exact the given key
    fn search(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !x.is_sentinel() {
            match self.comparator.compare(key, self.node_ref(x, Node::key)) {
                Ordering::Equal => return Some(x),
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }
        None
    }

    /// Find the node with the largest key not greater than `key`.
    pub(crate) fn floor_node(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut floor = None;
        let mut x = self.root;
        while !x.is_sentinel() {
            match self.comparator.compare(key, self.node_ref(x, Node::key)) {
                Ordering::Equal => return Some(x),
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => {
                    floor = Some(x);
                    x = self.node_ref(x, Node::right);
                }
            }
        }
        floor
    }

    /// Find the node with the smallest key not less than `key`.
    pub(crate) fn ceiling_node(&self, key: &K) -> Option<NodeIndex<Ix>> {
        let mut ceiling = None;
        let mut x = self.root;
        while !x.is_sentinel() {
            match self.comparator.compare(key, self.node_ref(x, Node::key)) {
                Ordering::Equal => return Some(x),
                Ordering::Less => {
                    ceiling = Some(x);
                    x = self.node_ref(x, Node::left);
                }
                Ordering::Greater => x = self.node_ref(x, Node::right),
            }
        }
        ceiling
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Handle of the node with the smallest key.
    pub(crate) fn first_node(&self) -> Option<NodeIndex<Ix>> {
        (!self.root.is_sentinel()).then(|| self.tree_minimum(self.root))
    }

    /// Handle of the node with the largest key.
    pub(crate) fn last_node(&self) -> Option<NodeIndex<Ix>> {
        (!self.root.is_sentinel()).then(|| self.tree_maximum(self.root))
    }

    /// Find the node with the minimum key in the subtree of `x`.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.node_ref(x, Node::left).is_sentinel() {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key in the subtree of `x`.
    fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.node_ref(x, Node::right).is_sentinel() {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// In-order successor of `x`, climbing parent links when `x` has no
    /// right subtree.
    ///
    /// Only links are followed, never keys, so entries already moved out
    /// of the arena (see `IntoIter`) do not disturb the walk.
    pub(crate) fn successor(&self, mut x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        let right = self.node_ref(x, Node::right);
        if !right.is_sentinel() {
            return Some(self.tree_minimum(right));
        }
        loop {
            let p = self.node_ref(x, Node::parent);
            if p.is_sentinel() {
                return None;
            }
            if self.node_ref(p, Node::left) == x {
                return Some(p);
            }
            x = p;
        }
    }

    /// In-order predecessor of `x`.
    pub(crate) fn predecessor(&self, mut x: NodeIndex<Ix>) -> Option<NodeIndex<Ix>> {
        let left = self.node_ref(x, Node::left);
        if !left.is_sentinel() {
            return Some(self.tree_maximum(left));
        }
        loop {
            let p = self.node_ref(x, Node::parent);
            if p.is_sentinel() {
                return None;
            }
            if self.node_ref(p, Node::right) == x {
                return Some(p);
            }
            x = p;
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<K, V, C, Ix> fmt::Debug for RbTree<K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, Ix> PartialEq for RbTree<K, V, C, Ix>
where
    K: PartialEq,
    V: PartialEq,
    Ix: IndexType,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C, Ix> Eq for RbTree<K, V, C, Ix>
where
    K: Eq,
    V: Eq,
    Ix: IndexType,
{
}

impl<K, V, C, Ix> Extend<(K, V)> for RbTree<K, V, C, Ix>
where
    C: Comparator<K>,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ignore = self.put(key, value);
        }
    }
}

impl<K, V, C, Ix> FromIterator<(K, V)> for RbTree<K, V, C, Ix>
where
    C: Comparator<K> + Default,
    Ix: IndexType,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, C, Ix> IntoIterator for &'a RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, Ix> IntoIterator for RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, C, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
