//! `rb_ordered_map` is an ordered map based on a red-black tree.
//!
//! It fully implements the insertion and deletion functionality of a red-black tree,
//! ensuring that each modification operation requires at most O(logN) time complexity.
//! Ordered queries (`min`, `max`, `floor`, `ceiling`) are O(logN) as well.
//!
//! Nodes are kept in a vector and refer to their children and parent by index.
//! The parent links let a [`Cursor`] move forward and backward from any node,
//! or restart from either end, without keeping a stack, and they make the
//! tree `Send` and `Unpin` whenever its keys and values are.
//!
//! Keys are ordered by a [`Comparator`] fixed when the tree is built: the
//! natural [`Ord`] order by default, or any `Fn(&K, &K) -> Ordering`.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_map::RbTree;
//!
//! let mut tree = RbTree::new();
//! for (key, value) in [(10, "a"), (20, "b"), (5, "c"), (15, "d")] {
//!     tree.put(key, value);
//! }
//! assert_eq!(tree.get(&15), Some(&"d"));
//! assert_eq!(tree.floor(&12), Some((&10, &"a")));
//! assert_eq!(tree.ceiling(&12), Some((&15, &"d")));
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![5, 10, 15, 20]);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` and `Deserialize` for [`RbTree`], as a map.
//! - `graphviz`: `RbTree::to_dot` renders the tree shape as a DOT digraph.
//! - `tracing`: rotations and fix-up steps are reported as `tracing` events.

#[macro_use]
mod trace;

mod comparator;
mod cursor;
#[cfg(feature = "graphviz")]
mod dot;
mod entry;
mod index;
mod iter;
mod node;
mod rbtree;
#[cfg(feature = "serde")]
mod serialize;

#[cfg(test)]
mod tests;

pub use comparator::{Comparator, Natural, Reverse};
pub use cursor::{Cursor, Position};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use rbtree::RbTree;
