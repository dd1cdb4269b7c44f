mod arena;
mod handle;
mod node;
mod raw_rbtree;

pub(crate) use arena::Generation;
pub(crate) use handle::{Handle, Link};
pub(crate) use raw_rbtree::{RawRBTree, Stack};
