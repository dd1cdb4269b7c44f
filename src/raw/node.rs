use super::handle::{Handle, Link};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child of a node. Every rebalancing case comes in a left and a right flavor;
/// writing them once against a `Side` and its opposite keeps the two in lockstep.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

pub(crate) struct Node<K> {
    key: K,
    color: Color,
    parent: Link,
    left: Link,
    right: Link,
}

impl<K> Node<K> {
    /// Creates a red leaf hanging off `parent`; both children are the sentinel.
    pub(crate) const fn new(key: K, parent: Link) -> Self {
        Self {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Link {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Link {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Link {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Link) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns which side `child` hangs from. `None` matches an absent child, so with two
    /// absent children this reports `Left`.
    #[inline]
    pub(crate) fn side_of(&self, child: Link) -> Side {
        if self.left == child { Side::Left } else { Side::Right }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_red_leaf() {
        let parent = Some(Handle::from_index(3));
        let node = Node::new(7, parent);
        assert_eq!(*node.key(), 7);
        assert_eq!(node.color(), Color::Red);
        assert_eq!(node.parent(), parent);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
    }

    #[test]
    fn children_by_side() {
        let mut node = Node::new('k', None);
        let a = Some(Handle::from_index(0));
        let b = Some(Handle::from_index(1));

        node.set_child(Side::Left, a);
        node.set_child(Side::Right.opposite().opposite(), b);

        assert_eq!(node.child(Side::Left), a);
        assert_eq!(node.child(Side::Right), b);
        assert_eq!(node.side_of(a), Side::Left);
        assert_eq!(node.side_of(b), Side::Right);
        assert_eq!(node.into_key(), 'k');
    }
}
