//! A resumable, bidirectional position inside an [`RbTree`].
//!
//! Unlike an [`Iterator`], a [`Cursor`] can step both ways, be reset to
//! either end, and be started at any node. It walks the tree through parent
//! links and keeps no stack, so every step is O(log n) in the worst case and
//! a full traversal is O(n).
//!
//! The cursor borrows the tree, so the tree cannot be modified while a
//! cursor over it is alive.

use std::fmt;

use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::rbtree::RbTree;

/// Where a [`Cursor`] currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// One before the first entry; `move_next` goes to the first entry.
    BeforeFirst,
    /// On an entry, readable through `key` and `value`.
    AtNode,
    /// One past the last entry; `move_prev` goes to the last entry.
    AfterLast,
}

/// A cursor over the entries of an [`RbTree`], in key order.
pub struct Cursor<'a, K, V, C, Ix> {
    /// Reference to the tree
    tree_ref: &'a RbTree<K, V, C, Ix>,
    /// Node under the cursor, `None` at either end
    current: Option<NodeIndex<Ix>>,
    /// Position relative to the entries
    position: Position,
}

impl<K, V, C, Ix: fmt::Debug> fmt::Debug for Cursor<'_, K, V, C, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current)
            .field("position", &self.position)
            .finish()
    }
}

impl<K, V, C, Ix: Copy> Clone for Cursor<'_, K, V, C, Ix> {
    fn clone(&self) -> Self {
        Cursor {
            tree_ref: self.tree_ref,
            current: self.current,
            position: self.position,
        }
    }
}

impl<'a, K, V, C, Ix> Cursor<'a, K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<K, V, C, Ix>, current: Option<NodeIndex<Ix>>) -> Self {
        let position = if current.is_some() {
            Position::AtNode
        } else {
            Position::BeforeFirst
        };
        Cursor {
            tree_ref,
            current,
            position,
        }
    }

    /// Move to the next entry and return `true` if there was one.
    ///
    /// From [`Position::BeforeFirst`] this moves to the first entry. Past the
    /// last entry the cursor settles at [`Position::AfterLast`] and stays
    /// there until repositioned.
    pub fn move_next(&mut self) -> bool {
        let next = match (self.position, self.current) {
            (Position::AfterLast, _) => None,
            (Position::AtNode, Some(x)) => self.tree_ref.successor(x),
            _ => self.tree_ref.first_node(),
        };
        match next {
            Some(x) => self.settle(x),
            None => {
                self.end();
                false
            }
        }
    }

    /// Move to the previous entry and return `true` if there was one.
    ///
    /// From [`Position::AfterLast`] this moves to the last entry. Before the
    /// first entry the cursor settles at [`Position::BeforeFirst`].
    pub fn move_prev(&mut self) -> bool {
        let prev = match (self.position, self.current) {
            (Position::BeforeFirst, _) => None,
            (Position::AtNode, Some(x)) => self.tree_ref.predecessor(x),
            _ => self.tree_ref.last_node(),
        };
        match prev {
            Some(x) => self.settle(x),
            None => {
                self.begin();
                false
            }
        }
    }

    /// Reset the cursor to one before the first entry.
    pub fn begin(&mut self) {
        self.current = None;
        self.position = Position::BeforeFirst;
    }

    /// Reset the cursor to one past the last entry.
    pub fn end(&mut self) {
        self.current = None;
        self.position = Position::AfterLast;
    }

    /// Move to the first entry and return `true` if the tree is not empty.
    pub fn first(&mut self) -> bool {
        self.begin();
        self.move_next()
    }

    /// Move to the last entry and return `true` if the tree is not empty.
    pub fn last(&mut self) -> bool {
        self.end();
        self.move_prev()
    }

    /// Current position of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Handle of the node under the cursor.
    #[inline]
    pub fn node(&self) -> Option<NodeIndex<Ix>> {
        self.current
    }

    /// Key of the entry under the cursor.
    ///
    /// # Panics
    ///
    /// This method panics when the cursor is not at [`Position::AtNode`]
    #[inline]
    pub fn key(&self) -> &'a K {
        self.entry().0
    }

    /// Value of the entry under the cursor.
    ///
    /// # Panics
    ///
    /// This method panics when the cursor is not at [`Position::AtNode`]
    #[inline]
    pub fn value(&self) -> &'a V {
        self.entry().1
    }

    /// Key and value of the entry under the cursor.
    ///
    /// # Panics
    ///
    /// This method panics when the cursor is not at [`Position::AtNode`]
    pub fn entry(&self) -> (&'a K, &'a V) {
        match self.current {
            Some(x) => self.tree_ref.node_ref(x, Node::entry),
            None => panic!("cursor is not positioned at a node"),
        }
    }

    fn settle(&mut self, x: NodeIndex<Ix>) -> bool {
        self.current = Some(x);
        self.position = Position::AtNode;
        true
    }
}
