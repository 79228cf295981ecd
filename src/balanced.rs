//! A BST that is built balanced and only rebalanced on request.
//!
//! The tree is constructed from any sequence of values. Duplicates are dropped, the
//! rest are sorted, and the middle element of every sorted run becomes the root of
//! its subtree, so a freshly built tree has minimal height. Inserts and deletes keep
//! the BST invariants but do nothing to keep the tree short. Call
//! [`rebalance`][Tree::rebalance] to get back to minimal height.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::Tree;
//!
//! let mut tree = Tree::new([5, 3, 8, 1, 4, 7, 9, 3]);
//!
//! // Built balanced, with the duplicate dropped.
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.root().map(|n| *n.value()), Some(5));
//! assert!(tree.is_balanced());
//!
//! // Inserting a run of larger values makes the tree lopsided...
//! for value in 10..15 {
//!     tree.insert(value);
//! }
//! assert!(!tree.is_balanced());
//! assert_eq!(tree.height(&5), Some(7));
//!
//! // ...until it is rebalanced.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.root().map(|n| *n.value()), Some(9));
//! assert_eq!(tree.height(&9), Some(3));
//!
//! // Deleting returns the removed value.
//! assert_eq!(tree.delete(&8), Some(8));
//! assert!(tree.find(&8).is_none());
//! ```

use std::cmp::Ordering;
use std::mem;

use tracing::{debug, instrument, trace};

use crate::error::{Result, TreeError};
use crate::traverse::{InOrder, IntoIter, Iter, LevelOrder, Order, PostOrder, PreOrder, Traversal};

/// An owned, possibly absent, child. This is either a parent's `left` or `right`, or the
/// tree's root, so rewriting it rewires whichever of those holds the node.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A `Node` holds a value and up to two children. Every value in its left subtree is
/// smaller than its own value and every value in its right subtree is larger.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Construct a new leaf `Node` holding `value`.
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of this node's left subtree, if it has one.
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    /// The root of this node's right subtree, if it has one.
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has 1 level.
    fn levels(&self) -> usize {
        let left = self.left().map_or(0, Node::levels);
        let right = self.right().map_or(0, Node::levels);
        left.max(right) + 1
    }

    /// A node is balanced if it is a leaf, if it has two children that are both
    /// balanced, or if its only child is a leaf.
    fn is_balanced(&self) -> bool {
        match (self.left(), self.right()) {
            (None, None) => true,
            (Some(left), Some(right)) => left.is_balanced() && right.is_balanced(),
            (Some(child), None) | (None, Some(child)) => child.is_leaf(),
        }
    }

    /// Splits the smallest node off the subtree rooted at `node`. Returns that node,
    /// with no children, and what remains of the subtree.
    fn detach_min(mut node: Box<Self>) -> (Box<Self>, Link<T>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                (node, rest)
            }
            Some(left) => {
                let (min, rest) = Self::detach_min(left);
                node.left = rest;
                (min, Some(node))
            }
        }
    }
}

/// A Binary Search Tree over unique, ordered values. It is built with minimal height
/// and can be brought back to minimal height with [`rebalance`][Tree::rebalance].
#[derive(Debug, Clone)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        // Tear down with an explicit stack. A tree grown by ascending inserts is as
        // deep as it is long and dropping it recursively could overflow.
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<T> Tree<T> {
    /// Builds a balanced tree from `values`. Duplicates are dropped. Any permutation
    /// of the same values builds the same tree, and an empty input builds an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([9, 1, 5, 1]);
    ///
    /// // The sorted values are [1, 5, 9] and the middle one is the root.
    /// let root = tree.root().unwrap();
    /// assert_eq!(root.value(), &5);
    /// assert_eq!(root.left().map(|n| *n.value()), Some(1));
    /// assert_eq!(root.right().map(|n| *n.value()), Some(9));
    ///
    /// assert!(Tree::<i32>::new([]).is_empty());
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Ord,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self::from_sorted(values)
    }

    /// Builds a balanced tree from values that are already sorted and unique.
    fn from_sorted(values: Vec<T>) -> Self {
        let len = values.len();
        let root = Self::build(len, &mut values.into_iter());
        debug!(len, "built balanced tree");
        Self { root, len }
    }

    /// Builds the subtree for the next `len` values. The root is the value at
    /// `len / 2` so for an even `len` the left side gets the extra value.
    fn build<I>(len: usize, values: &mut I) -> Link<T>
    where
        I: Iterator<Item = T>,
    {
        if len == 0 {
            return None;
        }

        let middle = len / 2;
        let left = Self::build(middle, values);
        let value = values.next()?;
        let right = Self::build(len - middle - 1, values);

        Some(Box::new(Node { value, left, right }))
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Inserts `value` as a new leaf. Returns `false`, leaving the tree untouched, if
    /// the value is already present. The tree is not rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new([2]);
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.depth(&1), Some(1));
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => {
                    trace!("value already present, ignoring insert");
                    return false;
                }
                Ordering::Greater => &mut node.right,
            };
        }

        *slot = Some(Box::new(Node::new(value)));
        self.len += 1;
        true
    }

    /// Deletes the node holding `value` and returns the value. If the tree does not
    /// contain it, nothing happens. The tree is not rebalanced.
    ///
    /// A node with two children is replaced by its in-order successor, the smallest
    /// value in its right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new([5, 3, 8, 1, 4, 7, 9]);
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.root().map(|n| *n.value()), Some(7));
    /// assert_eq!(tree.delete(&5), None);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let Some(slot) = Self::slot_of(&mut self.root, value) else {
            trace!("value not present, nothing to delete");
            return None;
        };

        let removed = Self::unlink(slot)?;
        self.len -= 1;
        Some(removed)
    }

    /// Finds the slot holding the node with `value`.
    fn slot_of<'a>(slot: &'a mut Link<T>, value: &T) -> Option<&'a mut Link<T>>
    where
        T: Ord,
    {
        let ordering = value.cmp(&slot.as_ref()?.value);
        match ordering {
            Ordering::Less => Self::slot_of(&mut slot.as_mut()?.left, value),
            Ordering::Equal => Some(slot),
            Ordering::Greater => Self::slot_of(&mut slot.as_mut()?.right, value),
        }
    }

    /// Removes the node in `slot`, putting whatever should replace it in its place, and
    /// returns its value. The removed node is left holding no children.
    fn unlink(slot: &mut Link<T>) -> Option<T> {
        let mut node = slot.take()?;

        *slot = match (node.left.take(), node.right.take()) {
            (None, None) => {
                trace!("deleting leaf");
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("splicing out node with a single child");
                Some(child)
            }
            (Some(left), Some(right)) => {
                // `rest` is the right subtree minus the successor. When the successor was
                // the root of `right` that is just its own right subtree.
                let (mut successor, rest) = Node::detach_min(right);
                trace!("replacing node with two children by its successor");
                successor.left = Some(left);
                successor.right = rest;
                Some(successor)
            }
        };

        Some(node.value)
    }

    /// Finds the node holding `value`, or `None` if there isn't one.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([1, 2, 3]);
    ///
    /// assert!(tree.find(&3).unwrap().is_leaf());
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut node = self.root();
        while let Some(n) = node {
            node = match value.cmp(&n.value) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(n),
                Ordering::Greater => n.right(),
            };
        }
        None
    }

    /// Whether the tree holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// The number of edges between the root and the node holding `value`, or `None`
    /// if there isn't one. The root has depth 0.
    pub fn depth(&self, value: &T) -> Option<usize>
    where
        T: Ord,
    {
        let mut node = self.root();
        let mut depth = 0;
        while let Some(n) = node {
            node = match value.cmp(&n.value) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(depth),
                Ordering::Greater => n.right(),
            };
            depth += 1;
        }
        None
    }

    /// The number of edges on the longest path from the node holding `value` down to a
    /// leaf, or `None` if there isn't one. A leaf has height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let tree = Tree::new([5, 3, 8, 1, 4, 7, 9]);
    ///
    /// assert_eq!(tree.height(&5), Some(2));
    /// assert_eq!(tree.height(&8), Some(1));
    /// assert_eq!(tree.height(&9), Some(0));
    /// assert_eq!(tree.height(&6), None);
    /// ```
    pub fn height(&self, value: &T) -> Option<usize>
    where
        T: Ord,
    {
        self.find(value).map(|node| node.levels() - 1)
    }

    /// Whether every node passes a local structural check: it is a leaf, it has two
    /// balanced children, or its only child is a leaf. An empty tree is balanced.
    ///
    /// This is not the AVL criterion. A node with two children passes whenever both
    /// children do, however different their heights, while a node with one child fails
    /// as soon as that child has children of its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Tree;
    ///
    /// let mut tree = Tree::new([1]);
    /// tree.insert(2);
    /// assert!(tree.is_balanced());
    ///
    /// tree.insert(3);
    /// assert!(!tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.root().map_or(true, Node::is_balanced)
    }

    /// Rebuilds the tree with minimal height from the values it holds. Values are moved
    /// into the new nodes, not cloned.
    #[instrument(level = "trace", skip_all)]
    pub fn rebalance(&mut self) {
        let values: Vec<T> = mem::take(self).into_iter().collect();
        *self = Self::from_sorted(values);
        debug!(
            len = self.len,
            levels = self.root().map_or(0, Node::levels),
            "rebalanced tree"
        );
    }

    /// Calls `visitor` on every node in pre-order: a node, then its left subtree, then
    /// its right subtree.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingVisitor`] if `visitor` is `None`. No node is visited.
    pub fn pre_order<F>(&self, visitor: Option<F>) -> Result<()>
    where
        F: FnMut(&Node<T>),
    {
        self.visit(Order::PreOrder, visitor)
    }

    /// Calls `visitor` on every node in-order: a node's left subtree, then the node,
    /// then its right subtree. Values are visited in ascending order.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingVisitor`] if `visitor` is `None`. No node is visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{Node, Order, Tree, TreeError};
    ///
    /// let tree = Tree::new([3, 1, 2]);
    ///
    /// let mut values = Vec::new();
    /// tree.in_order(Some(|node: &Node<i32>| values.push(*node.value())))
    ///     .unwrap();
    /// assert_eq!(values, [1, 2, 3]);
    ///
    /// assert_eq!(
    ///     tree.in_order(None::<fn(&Node<i32>)>),
    ///     Err(TreeError::MissingVisitor(Order::InOrder))
    /// );
    /// ```
    pub fn in_order<F>(&self, visitor: Option<F>) -> Result<()>
    where
        F: FnMut(&Node<T>),
    {
        self.visit(Order::InOrder, visitor)
    }

    /// Calls `visitor` on every node in post-order: a node's left subtree, then its
    /// right subtree, then the node.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingVisitor`] if `visitor` is `None`. No node is visited.
    pub fn post_order<F>(&self, visitor: Option<F>) -> Result<()>
    where
        F: FnMut(&Node<T>),
    {
        self.visit(Order::PostOrder, visitor)
    }

    /// Calls `visitor` on every node breadth-first: the root, then every node of each
    /// following level from left to right.
    ///
    /// # Errors
    ///
    /// [`TreeError::MissingVisitor`] if `visitor` is `None`. No node is visited.
    pub fn level_order<F>(&self, visitor: Option<F>) -> Result<()>
    where
        F: FnMut(&Node<T>),
    {
        self.visit(Order::LevelOrder, visitor)
    }

    fn visit<F>(&self, order: Order, visitor: Option<F>) -> Result<()>
    where
        F: FnMut(&Node<T>),
    {
        let visitor = visitor.ok_or(TreeError::MissingVisitor(order))?;
        self.traverse(order).for_each(visitor);
        Ok(())
    }

    /// Iterates over the nodes in the given `order`.
    pub fn traverse(&self, order: Order) -> Traversal<'_, T> {
        Traversal::new(self.root(), order)
    }

    /// Iterates over the nodes in pre-order.
    pub fn pre_order_iter(&self) -> PreOrder<'_, T> {
        PreOrder::new(self.root())
    }

    /// Iterates over the nodes in-order, so in ascending order of their values.
    pub fn in_order_iter(&self) -> InOrder<'_, T> {
        InOrder::new(self.root())
    }

    /// Iterates over the nodes in post-order.
    pub fn post_order_iter(&self) -> PostOrder<'_, T> {
        PostOrder::new(self.root())
    }

    /// Iterates over the nodes breadth-first.
    pub fn level_order_iter(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self.root())
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.in_order_iter())
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take())
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of values in both.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(v) => {
                    assert_eq!(bst.insert(v.clone()), set.insert(v.clone()));
                }
                Op::Delete(v) => {
                    assert_eq!(bst.delete(v), set.take(v));
                }
                Op::Rebalance => {
                    bst.rebalance();
                    assert!(bst.is_balanced());
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
            assert_eq!(bst.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::default();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|v| tree.contains(v)) && tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn build_has_minimal_height(xs: Vec<i16>) -> bool {
            let tree = Tree::new(xs);
            match tree.root() {
                None => tree.is_empty(),
                Some(root) => {
                    let n = tree.len();
                    let minimal = (usize::BITS - n.leading_zeros()) as usize - 1;
                    tree.height(root.value()) == Some(minimal) && tree.is_balanced()
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn every_node_has_its_depth(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
            let mut tree = Tree::new(xs);
            tree.extend(inserts);

            // Level order visits depths in non-decreasing order.
            let depths: Vec<usize> = tree
                .level_order_iter()
                .map(|n| tree.depth(n.value()).unwrap_or(usize::MAX))
                .collect();
            depths.windows(2).all(|w| w[0] <= w[1])
        }
    }
}
