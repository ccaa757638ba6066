//! Ordering strategies for the keys of an [`RbTree`](crate::RbTree).
//!
//! A comparator is chosen when the tree is built and never changes
//! afterwards. It must be a strict total order over the keys that are put
//! into the tree; the tree does not check this, and an inconsistent
//! comparator silently breaks lookups and traversal order.
//!
//! Any `Fn(&K, &K) -> Ordering` closure is a comparator:
//!
//! ```rust
//! use rb_ordered_map::RbTree;
//!
//! let mut tree: RbTree<_, _, _> = RbTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! tree.put(1, "one");
//! tree.put(3, "three");
//! tree.put(2, "two");
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
//! ```

use std::cmp::Ordering;

/// A total order over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    /// Compare `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The natural order of `K` given by its [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of the natural order of `K`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K, F> Comparator<K> for F
where
    K: ?Sized,
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
