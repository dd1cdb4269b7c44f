use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::sync::atomic::{AtomicUsize, Ordering};

use smallvec::SmallVec;

use crate::Error;
use crate::raw::{Generation, Handle, Link, RawRBTree, Stack};

mod capacity;
mod export;

static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct TreeId(usize);

impl TreeId {
    fn fresh() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An ordered multiset of keys stored in a red-black tree.
///
/// Nodes live in an arena owned by the tree; parent and child relations are arena indices,
/// and an absent relation is the (always black) sentinel. Every mutating operation
/// rebalances before it returns, so the height stays within `2 * log2(n + 1)`.
///
/// Equal keys are all kept: a key equal to an existing one is placed to its right, so
/// [`iter`] yields duplicates in insertion order.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the tree.
/// The behavior resulting from such a logic error is not specified, but will be confined to
/// the `RBTree` that observed it and will not result in undefined behavior.
///
/// [`iter`]: RBTree::iter
///
/// # Examples
///
/// ```
/// use kuro_tree::RBTree;
///
/// let mut tree = RBTree::new();
/// for key in [10, 5, 20, 1, 7] {
///     tree.insert(key)?;
/// }
///
/// let min = tree.min().unwrap();
/// assert_eq!(tree.get(min), Some(&1));
///
/// let ten = tree.find(&10).unwrap();
/// assert_eq!(tree.erase(ten)?, 10);
///
/// let mut buf = [0; 8];
/// let written = tree.export_sorted(&mut buf)?;
/// assert_eq!(&buf[..written], [1, 5, 7, 20]);
/// # Ok::<(), kuro_tree::Error>(())
/// ```
pub struct RBTree<K> {
    raw: RawRBTree<K>,
    id: TreeId,
}

/// A reference to a node of a particular [`RBTree`].
///
/// Returned by [`insert`], [`find`], [`min`] and [`max`]; consumed by [`get`] and
/// [`erase`]. A `NodeRef` stays valid until its node is erased or the tree is cleared.
/// After that, and on any other tree, it is rejected with [`Error::InvalidNode`] rather
/// than resolving to whatever node occupies the slot next.
///
/// [`insert`]: RBTree::insert
/// [`find`]: RBTree::find
/// [`min`]: RBTree::min
/// [`max`]: RBTree::max
/// [`get`]: RBTree::get
/// [`erase`]: RBTree::erase
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeRef {
    tree: TreeId,
    handle: Handle,
    generation: Generation,
}

/// An iterator over the keys of an `RBTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RBTree`]. It walks the tree
/// in-order with an explicit stack, so it is lazy and never recurses.
///
/// # Examples
///
/// ```
/// use kuro_tree::RBTree;
///
/// let tree: RBTree<_> = [3, 1, 2].into_iter().collect();
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.len(), 2);
/// ```
///
/// [`iter`]: RBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    tree: &'a RawRBTree<K>,
    // Nodes whose left subtree has been visited but which have not been yielded yet.
    stack: Stack<Handle>,
    remaining: usize,
}

impl<K> RBTree<K> {
    /// Makes a new, empty `RBTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(1)?;
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::from_raw(RawRBTree::new())
    }

    fn from_raw(raw: RawRBTree<K>) -> Self {
        RBTree {
            raw,
            id: TreeId::fresh(),
        }
    }

    /// Returns the number of keys in the tree, counting duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1)?;
    /// tree.insert(1)?;
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn node_ref(&self, handle: Handle) -> NodeRef {
        NodeRef {
            tree: self.id,
            handle,
            generation: self.raw.generation(handle),
        }
    }

    fn resolve(&self, node: NodeRef) -> Option<Handle> {
        (node.tree == self.id && self.raw.contains(node.handle, node.generation)).then_some(node.handle)
    }

    /// Returns the node holding the smallest key, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert!(tree.min().is_none());
    /// tree.insert(42)?;
    /// tree.insert(7)?;
    /// assert_eq!(tree.min().and_then(|n| tree.get(n)), Some(&7));
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn min(&self) -> Option<NodeRef> {
        self.raw.first().map(|handle| self.node_ref(handle))
    }

    /// Returns the node holding the largest key, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// assert!(tree.max().is_none());
    /// tree.insert(42)?;
    /// tree.insert(7)?;
    /// assert_eq!(tree.max().and_then(|n| tree.get(n)), Some(&42));
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn max(&self) -> Option<NodeRef> {
        self.raw.last().map(|handle| self.node_ref(handle))
    }

    /// Returns the smallest key, if any.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first().map(|handle| self.raw.node(handle).key())
    }

    /// Returns the largest key, if any.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last().map(|handle| self.raw.node(handle).key())
    }

    /// Returns the key held by `node`, or `None` if `node` is not a live node of this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// let node = tree.insert("a")?;
    /// assert_eq!(tree.get(node), Some(&"a"));
    ///
    /// tree.erase(node)?;
    /// assert_eq!(tree.get(node), None);
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    #[must_use]
    pub fn get(&self, node: NodeRef) -> Option<&K> {
        self.resolve(node).map(|handle| self.raw.node(handle).key())
    }

    /// Removes `node` from the tree and returns its key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNode`] if `node` came from another tree or was already
    /// erased. The tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::{Error, RBTree};
    ///
    /// let mut tree = RBTree::new();
    /// let node = tree.insert(5)?;
    /// assert_eq!(tree.erase(node), Ok(5));
    /// assert_eq!(tree.erase(node), Err(Error::InvalidNode));
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn erase(&mut self, node: NodeRef) -> Result<K, Error> {
        let Some(handle) = self.resolve(node) else {
            log::debug!("rejected erase of {node:?}: not a live node of this tree");
            return Err(Error::InvalidNode);
        };
        Ok(self.raw.erase(handle))
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let tree: RBTree<_> = [3, 1, 2, 1].into_iter().collect();
    /// let keys: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(keys, [1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.raw)
    }

    /// Removes every key, releasing nodes children-first.
    ///
    /// Every outstanding [`NodeRef`] into this tree becomes invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree: RBTree<_> = (0..10).collect();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.teardown();
    }

    /// Consumes the tree, releasing every node children-first, and returns how many nodes
    /// were released.
    ///
    /// Dropping the tree does the same; this form reports the count.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let tree: RBTree<_> = (0..10).collect();
    /// assert_eq!(tree.destroy(), 10);
    /// ```
    pub fn destroy(mut self) -> usize {
        self.raw.teardown()
    }
}

impl<K: Ord> RBTree<K> {
    /// Adds `key` to the tree and returns a reference to its node.
    ///
    /// Keys already present are not replaced: the new key is stored alongside them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the node cannot be allocated. The tree is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// let a = tree.insert(37)?;
    /// let b = tree.insert(37)?;
    /// assert_ne!(a, b);
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> Result<NodeRef, Error> {
        let handle = self.raw.insert(key)?;
        Ok(self.node_ref(handle))
    }

    /// Returns a node holding `key`, or `None` if there is none.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering on the
    /// borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree = RBTree::new();
    /// tree.insert(String::from("kuro"))?;
    /// assert!(tree.find("kuro").is_some());
    /// assert!(tree.find("shiro").is_none());
    /// # Ok::<(), kuro_tree::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|handle| self.node_ref(handle))
    }

    /// Returns `true` if the tree holds at least one key equal to `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Removes one key equal to `key` and returns it, or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use kuro_tree::RBTree;
    ///
    /// let mut tree: RBTree<_> = [1, 1, 2].into_iter().collect();
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), Some(1));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.raw.search(key)?;
        Some(self.raw.erase(handle))
    }
}

impl<K> Drop for RBTree<K> {
    fn drop(&mut self) {
        self.raw.teardown();
    }
}

impl<K> Default for RBTree<K> {
    fn default() -> Self {
        RBTree::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for RBTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> Extend<K> for RBTree<K> {
    /// # Panics
    ///
    /// Panics if a node cannot be allocated. Use [`RBTree::insert`] to handle that case.
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            if let Err(err) = self.insert(key) {
                panic!("`RBTree::extend()` - {err}");
            }
        }
    }
}

impl<K: Ord> FromIterator<K> for RBTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RBTree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K> IntoIterator for &'a RBTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iter<'a, K> {
    fn new(tree: &'a RawRBTree<K>) -> Self {
        let mut iter = Iter {
            tree,
            stack: SmallVec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root());
        iter
    }

    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.tree.node(handle).left();
        }
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.tree;
        let node = tree.node(self.stack.pop()?);
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}
