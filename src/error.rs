/// Errors reported by [`RBTree`](crate::RBTree) operations.
///
/// A search miss and an empty tree are not errors; those come back as `None`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Memory for a node (or a requested reservation) could not be obtained. The tree is
    /// unchanged.
    #[error("memory allocation failed")]
    AllocationFailure,
    /// The [`NodeRef`](crate::NodeRef) belongs to another tree or to a node that has
    /// already been erased.
    #[error("node reference does not belong to this tree")]
    InvalidNode,
    /// The export buffer cannot hold every key. Nothing was written.
    #[error("exporting {required} keys needs a buffer of at least {required}, got {capacity}")]
    CapacityExceeded {
        /// Number of keys in the tree.
        required: usize,
        /// Length of the buffer that was supplied.
        capacity: usize,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(Error::AllocationFailure.to_string(), "memory allocation failed");
        assert_eq!(Error::InvalidNode.to_string(), "node reference does not belong to this tree");
        assert_eq!(
            Error::CapacityExceeded { required: 5, capacity: 2 }.to_string(),
            "exporting 5 keys needs a buffer of at least 5, got 2"
        );
    }
}
