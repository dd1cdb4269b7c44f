use alloc::vec::Vec;

use super::RBTree;
use crate::Error;

impl<K: Clone> RBTree<K> {
    /// Writes every key, in ascending order, to the front of `buf` and returns how many were
    /// written.
    ///
    /// An empty tree writes nothing and succeeds, whatever the length of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if `buf` is shorter than [`len`](RBTree::len).
    /// The check happens before any write, so `buf` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::{Error, RBTree};
    ///
    /// let tree: RBTree<_> = [10, 5, 20, 1, 7].into_iter().collect();
    ///
    /// let mut buf = [0; 5];
    /// assert_eq!(tree.export_sorted(&mut buf), Ok(5));
    /// assert_eq!(buf, [1, 5, 7, 10, 20]);
    ///
    /// let mut small = [0; 3];
    /// assert_eq!(
    ///     tree.export_sorted(&mut small),
    ///     Err(Error::CapacityExceeded { required: 5, capacity: 3 })
    /// );
    /// assert_eq!(small, [0; 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn export_sorted(&self, buf: &mut [K]) -> Result<usize, Error> {
        let required = self.len();
        if required > buf.len() {
            log::debug!("export of {required} keys rejected: buffer holds {}", buf.len());
            return Err(Error::CapacityExceeded {
                required,
                capacity: buf.len(),
            });
        }

        for (slot, key) in buf.iter_mut().zip(self.iter()) {
            slot.clone_from(key);
        }
        Ok(required)
    }

    /// Collects every key, in ascending order, into a new `Vec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let tree: RBTree<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.to_vec(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_vec(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }
}
