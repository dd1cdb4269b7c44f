//! Red-black tree multiset for Rust.
//!
//! This crate provides [`RBTree`], an ordered container of keys kept balanced by the
//! classic red-black rules. Insertion, deletion, lookup and minimum/maximum retrieval run in
//! O(log n); keys can be exported in sorted order into a caller-supplied buffer or walked
//! lazily with an iterator.
//!
//! Lookups hand out [`NodeRef`]s: small copyable references that can later be passed back
//! to [`erase`](RBTree::erase) a specific node. A `NodeRef` is checked before use, so one that
//! belongs to another tree, or to a node that has already been erased, is reported as
//! [`Error::InvalidNode`] instead of touching an unrelated node.
//!
//! # Example
//!
//! ```
//! use kuro_tree::{Error, RBTree};
//!
//! let mut tree = RBTree::new();
//! for key in [10, 5, 20, 1, 7, 15, 25] {
//!     tree.insert(key)?;
//! }
//!
//! // Lookups return node references
//! let ten = tree.find(&10).expect("10 was inserted");
//! assert!(tree.find(&99).is_none());
//!
//! // Erase by reference; stale references are rejected
//! assert_eq!(tree.erase(ten), Ok(10));
//! assert_eq!(tree.erase(ten), Err(Error::InvalidNode));
//!
//! // Export in sorted order
//! let mut buf = [0; 6];
//! tree.export_sorted(&mut buf)?;
//! assert_eq!(buf, [1, 5, 7, 15, 20, 25]);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Multiset** - Equal keys are all kept, in insertion order
//! - **Checked node references** - Generation-tagged handles catch use after erase
//! - **Fallible allocation** - Allocation failures are returned, never aborted on
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index, so parent links need no shared
//! ownership. An absent child or parent is the sentinel, which is always black. Traversal
//! and teardown use explicit stacks bounded by the tree height.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod rbtree;

pub use error::Error;
pub use rbtree::{NodeRef, RBTree};
