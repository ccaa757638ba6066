use std::fmt;
use std::hash::Hash;

/// Default integer type backing a [`NodeIndex`].
pub type DefaultIx = u32;

/// Integer types usable as arena handles.
///
/// The maximum value of the type is reserved, so a tree indexed by `u16`
/// holds at most `u16::MAX - 1` entries (slot 0 is the sentinel).
pub trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    /// Convert an arena position into the index type.
    fn new(x: usize) -> Self;
    /// Convert the index back into an arena position.
    fn index(&self) -> usize;
    /// The largest representable index.
    fn max() -> Self;
}

macro_rules! impl_index_type {
    ($($ty:ty),*) => {
        $(
            impl IndexType for $ty {
                #[inline(always)]
                #[allow(clippy::cast_possible_truncation)]
                fn new(x: usize) -> Self {
                    x as $ty
                }
                #[inline(always)]
                #[allow(clippy::cast_possible_truncation)]
                fn index(&self) -> usize {
                    *self as usize
                }
                #[inline(always)]
                fn max() -> Self {
                    <$ty>::MAX
                }
            }
        )*
    };
}

impl_index_type!(u16, u32, u64, usize);

/// Handle of a node inside an [`RbTree`](crate::RbTree).
///
/// Handles are positions in the tree's node arena. A removal moves the last
/// node of the arena into the freed slot, so any handle obtained before a
/// mutation must be looked up again afterwards.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    /// The sentinel slot, standing in for every null link.
    #[inline]
    pub(crate) fn sentinel() -> Self {
        NodeIndex(IndexType::new(0))
    }

    #[inline]
    pub(crate) fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0.index()
    }

    #[inline]
    pub(crate) fn end() -> Self {
        NodeIndex(IndexType::max())
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self.index() == 0
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}
