//! Iterators over the nodes of a [`Tree`][crate::Tree].
//!
//! Every traversal is a one-shot iterator: it borrows the tree, yields each
//! node exactly once in its order, and has to be recreated to walk the tree
//! again. None of them recurse, so walking a degenerate tree can't overflow the
//! stack.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Order, Tree};
//!
//! let tree = Tree::new([5, 3, 8, 1, 4, 7, 9]);
//!
//! let level: Vec<_> = tree.traverse(Order::LevelOrder).map(|n| *n.value()).collect();
//! assert_eq!(level, [5, 3, 8, 1, 4, 7, 9]);
//!
//! let post: Vec<_> = tree.post_order_iter().map(|n| *n.value()).collect();
//! assert_eq!(post, [1, 4, 3, 7, 9, 8, 5]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::balanced::{Link, Node};

/// The order in which a traversal visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// The node, then its left subtree, then its right subtree.
    PreOrder,
    /// The left subtree, then the node, then the right subtree. Values come out ascending.
    InOrder,
    /// The left subtree, then the right subtree, then the node.
    PostOrder,
    /// Breadth-first: the root, then every node of each following level from left to right.
    LevelOrder,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreOrder => "pre-order",
            Self::InOrder => "in-order",
            Self::PostOrder => "post-order",
            Self::LevelOrder => "level-order",
        })
    }
}

/// Pre-order iterator. See [`Tree::pre_order_iter`][crate::Tree::pre_order_iter].
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is finished before it.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

/// In-order iterator. See [`Tree::in_order_iter`][crate::Tree::in_order_iter].
pub struct InOrder<'a, T> {
    /// The left spine of the subtree currently being walked.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

/// Post-order iterator. See [`Tree::post_order_iter`][crate::Tree::post_order_iter].
pub struct PostOrder<'a, T> {
    /// Pending nodes, flagged once their children have been scheduled.
    stack: Vec<(&'a Node<T>, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.map(|n| (n, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, children_scheduled) = self.stack.pop()?;
            if children_scheduled {
                return Some(node);
            }

            self.stack.push((node, true));
            self.stack.extend(node.right().map(|n| (n, false)));
            self.stack.extend(node.left().map(|n| (n, false)));
        }
    }
}

/// Level-order iterator. See [`Tree::level_order_iter`][crate::Tree::level_order_iter].
pub struct LevelOrder<'a, T> {
    discovered: VecDeque<&'a Node<T>>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            discovered: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.discovered.pop_front()?;
        self.discovered.extend(node.left());
        self.discovered.extend(node.right());
        Some(node)
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}
impl<T> FusedIterator for InOrder<'_, T> {}
impl<T> FusedIterator for PostOrder<'_, T> {}
impl<T> FusedIterator for LevelOrder<'_, T> {}

/// A traversal in an [`Order`] picked at runtime. See [`Tree::traverse`][crate::Tree::traverse].
pub enum Traversal<'a, T> {
    /// Walking in pre-order.
    PreOrder(PreOrder<'a, T>),
    /// Walking in-order.
    InOrder(InOrder<'a, T>),
    /// Walking in post-order.
    PostOrder(PostOrder<'a, T>),
    /// Walking breadth-first.
    LevelOrder(LevelOrder<'a, T>),
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, order: Order) -> Self {
        match order {
            Order::PreOrder => Self::PreOrder(PreOrder::new(root)),
            Order::InOrder => Self::InOrder(InOrder::new(root)),
            Order::PostOrder => Self::PostOrder(PostOrder::new(root)),
            Order::LevelOrder => Self::LevelOrder(LevelOrder::new(root)),
        }
    }

    /// The order this traversal visits nodes in.
    pub fn order(&self) -> Order {
        match self {
            Self::PreOrder(_) => Order::PreOrder,
            Self::InOrder(_) => Order::InOrder,
            Self::PostOrder(_) => Order::PostOrder,
            Self::LevelOrder(_) => Order::LevelOrder,
        }
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::PreOrder(iter) => iter.next(),
            Self::InOrder(iter) => iter.next(),
            Self::PostOrder(iter) => iter.next(),
            Self::LevelOrder(iter) => iter.next(),
        }
    }
}

impl<T> FusedIterator for Traversal<'_, T> {}

/// Iterator over the values of a tree in ascending order. See [`Tree::iter`][crate::Tree::iter].
pub struct Iter<'a, T>(pub(crate) InOrder<'a, T>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Node::value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Consuming iterator yielding owned values in ascending order.
///
/// Each node is dismantled as it is passed, so the tree's memory is released
/// while iterating.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        Some(node.value)
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Drain the rest so unvisited right subtrees are freed one node at a time.
        for _ in self.by_ref() {}
    }
}
