use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::{Arena, Generation};
use super::handle::{Handle, Link};
use super::node::{Color, Node, Side};
use crate::Error;

/// Explicit stack for walks bounded by tree height (at most `2 * log2(n + 1)`).
pub(crate) type Stack<T> = SmallVec<[T; 32]>;

/// The red-black tree backing `RBTree`.
pub(crate) struct RawRBTree<K> {
    /// Arena owning every node; links between nodes are handles into it.
    nodes: Arena<Node<K>>,
    /// The root node, or the sentinel when the tree is empty.
    root: Link,
}

impl<K> RawRBTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Ok(Self {
            nodes: Arena::try_with_capacity(capacity)?,
            root: None,
        })
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.nodes.try_reserve(additional)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.nodes.get_mut(handle)
    }

    /// Returns true if `handle` is a live node allocated at `generation`.
    pub(crate) fn contains(&self, handle: Handle, generation: Generation) -> bool {
        self.nodes.contains(handle, generation)
    }

    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.nodes.generation(handle)
    }

    /// The sentinel is black.
    #[inline]
    fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |h| self.node(h).color())
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    /// Leftmost node of the subtree rooted at `handle`.
    pub(crate) fn minimum(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.node(handle).left() {
            handle = left;
        }
        handle
    }

    /// Rightmost node of the subtree rooted at `handle`.
    pub(crate) fn maximum(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.node(handle).right() {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.minimum(root))
    }

    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.maximum(root))
    }

    /// Points `parent`'s link to `old` at `new` instead. A sentinel parent means `old` was
    /// the root.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.node(p).side_of(Some(old));
                self.node_mut(p).set_child(side, new);
            }
        }
    }

    /// Moves `x` down toward `side`, promoting its child on the opposite side into its place.
    /// `Side::Left` is a left rotation, `Side::Right` a right rotation. The in-order sequence
    /// and all colors are unchanged.
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     =>     x   c      (side = Left)
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    fn rotate(&mut self, x: Handle, side: Side) {
        let up = side.opposite();
        let y = self.node(x).child(up).expect("`RawRBTree::rotate()` - no child to promote!");

        let inner = self.node(y).child(side);
        self.node_mut(x).set_child(up, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(x));
        }

        let parent = self.node(x).parent();
        self.node_mut(y).set_parent(parent);
        self.replace_child(parent, x, Some(y));

        self.node_mut(y).set_child(side, Some(x));
        self.node_mut(x).set_parent(Some(y));
    }

    /// Restores the red-black properties after `node` was linked in as a red leaf.
    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(parent) = self.node(node).parent()
            && self.node(parent).color() == Color::Red
        {
            // A red node is never the root, so the grandparent exists.
            let grandparent = self.node(parent).parent().expect("`RawRBTree::insert_fixup()` - red root!");
            let side = self.node(grandparent).side_of(Some(parent));
            let uncle = self.node(grandparent).child(side.opposite());

            if let Some(uncle) = uncle
                && self.node(uncle).color() == Color::Red
            {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.node(parent).child(side.opposite()) == Some(node) {
                // Zig-zag: straighten it out so `node` is on the outer side.
                self.rotate(parent, side);
                node = parent;
                parent = self.node(node).parent().expect("`RawRBTree::insert_fixup()` - lost parent!");
            }

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new`.
    fn transplant(&mut self, old: Handle, new: Link) {
        let parent = self.node(old).parent();
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
    }

    /// Unlinks `node`, rebalances, then releases its slot and hands back the key.
    pub(crate) fn erase(&mut self, node: Handle) -> K {
        let (left, right, parent) = {
            let n = self.node(node);
            (n.left(), n.right(), n.parent())
        };

        // `x` ends up in the position that may be one black short; `x_parent` is tracked
        // separately because `x` may be the sentinel.
        let (vacated, x, x_parent) = match (left, right) {
            (None, _) => {
                self.transplant(node, right);
                (self.node(node).color(), right, parent)
            }
            (_, None) => {
                self.transplant(node, left);
                (self.node(node).color(), left, parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                let vacated = self.node(successor).color();
                let x = self.node(successor).right();

                let x_parent = if successor == right {
                    successor
                } else {
                    let successor_parent = self.node(successor).parent();
                    self.transplant(successor, x);
                    self.node_mut(successor).set_child(Side::Right, Some(right));
                    self.node_mut(right).set_parent(Some(successor));
                    successor_parent.expect("`RawRBTree::erase()` - successor has no parent!")
                };

                self.transplant(node, Some(successor));
                self.node_mut(successor).set_child(Side::Left, Some(left));
                self.node_mut(left).set_parent(Some(successor));
                let color = self.node(node).color();
                self.set_color(successor, color);

                (vacated, x, Some(x_parent))
            }
        };

        if vacated == Color::Black {
            self.erase_fixup(x, x_parent);
        }

        self.nodes.take(node).into_key()
    }

    /// Child of `parent` on `side`, which must exist: it is the sibling of a position that
    /// is one black short, so its subtree holds at least one black node.
    fn sibling(&self, parent: Handle, side: Side) -> Handle {
        self.node(parent).child(side).expect("`RawRBTree::sibling()` - missing sibling!")
    }

    /// Pushes the extra black carried by `x` up the tree until it can be absorbed.
    fn erase_fixup(&mut self, mut x: Link, mut parent: Link) {
        while x != self.root && self.color(x) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = self.node(p).side_of(x);
            let far = side.opposite();

            let mut w = self.sibling(p, far);
            if self.node(w).color() == Color::Red {
                self.set_color(w, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                w = self.sibling(p, far);
            }

            let near_child = self.node(w).child(side);
            let far_child = self.node(w).child(far);
            if self.color(near_child) == Color::Black && self.color(far_child) == Color::Black {
                self.set_color(w, Color::Red);
                x = Some(p);
                parent = self.node(p).parent();
                continue;
            }

            if self.color(far_child) == Color::Black {
                if let Some(near_child) = near_child {
                    self.set_color(near_child, Color::Black);
                }
                self.set_color(w, Color::Red);
                self.rotate(w, far);
                w = self.sibling(p, far);
            }

            let parent_color = self.node(p).color();
            self.set_color(w, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far_child) = self.node(w).child(far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    /// Releases every node, children before parents, and returns how many were released.
    pub(crate) fn teardown(&mut self) -> usize {
        let mut released = 0;
        let mut stack: Stack<(Handle, bool)> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, false)));

        while let Some((handle, children_done)) = stack.pop() {
            if children_done {
                self.nodes.free(handle);
                released += 1;
                continue;
            }

            let node = self.node(handle);
            let (left, right) = (node.left(), node.right());
            stack.push((handle, true));
            stack.extend(right.map(|right| (right, false)));
            stack.extend(left.map(|left| (left, false)));
        }

        self.root = None;
        debug_assert!(self.nodes.is_empty(), "`RawRBTree::teardown()` - unreachable nodes left behind!");
        log::trace!("released {released} nodes");
        released
    }
}

impl<K: Ord> RawRBTree<K> {
    /// Finds a node holding `key`. With duplicates, the one closest to the root wins.
    pub(crate) fn search<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts `key` as a new node. Equal keys go to the right, so duplicates are kept in
    /// insertion order.
    ///
    /// On allocation failure the tree is left untouched.
    pub(crate) fn insert(&mut self, key: K) -> Result<Handle, Error> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            parent = Some(handle);
            side = if key < *self.node(handle).key() { Side::Left } else { Side::Right };
            current = self.node(handle).child(side);
        }

        let node = self.nodes.try_alloc(Node::new(key, parent))?;
        match parent {
            None => self.root = Some(node),
            Some(parent) => self.node_mut(parent).set_child(side, Some(node)),
        }

        self.insert_fixup(node);
        Ok(node)
    }
}
