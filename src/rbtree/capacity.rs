use super::RBTree;
use crate::Error;
use crate::raw::RawRBTree;

impl<K> RBTree<K> {
    /// Creates an empty tree with room for at least `capacity` keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the memory cannot be obtained. Nothing is
    /// leaked: whatever was allocated before the failure is released.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let tree: RBTree<i32> = RBTree::try_with_capacity(16)?;
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self::from_raw(RawRBTree::try_with_capacity(capacity)?))
    }

    /// Creates an empty tree with room for at least `capacity` keys.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be obtained. Use [`RBTree::try_with_capacity`] to handle
    /// that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let tree: RBTree<i32> = RBTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(tree) => tree,
            Err(err) => panic!("`RBTree::with_capacity()` - {err}"),
        }
    }

    /// Reserves room for at least `additional` more keys, so that many inserts cannot fail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the memory cannot be obtained. The tree is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(1)?;
    /// tree.try_reserve(10)?;
    /// assert!(tree.capacity() >= 11);
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.raw.try_reserve(additional)
    }

    /// Returns the number of keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
