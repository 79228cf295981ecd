//! Renders a [`Tree`] as indented text, sideways: the right subtree is drawn above
//! its node and the left subtree below it.
//!
//! ```text
//! │       ┌── 9
//! │   ┌── 8
//! │   │   └── 7
//! └── 5
//!     │   ┌── 4
//!     └── 3
//!         └── 1
//! ```

use std::fmt;

use crate::balanced::{Node, Tree};

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => render(f, root, "", true),
            None => Ok(()),
        }
    }
}

/// Writes the subtree rooted at `node`. `is_left` is true for left children and for
/// the root.
fn render<T>(f: &mut fmt::Formatter<'_>, node: &Node<T>, prefix: &str, is_left: bool) -> fmt::Result
where
    T: fmt::Display,
{
    if let Some(right) = node.right() {
        let prefix = format!("{prefix}{}", if is_left { "│   " } else { "    " });
        render(f, right, &prefix, false)?;
    }

    let connector = if is_left { "└── " } else { "┌── " };
    writeln!(f, "{prefix}{connector}{}", node.value())?;

    if let Some(left) = node.left() {
        let prefix = format!("{prefix}{}", if is_left { "    " } else { "│   " });
        render(f, left, &prefix, true)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::Tree;

    #[test]
    fn renders_right_above_left_below() {
        let tree = Tree::new([1, 2, 3]);
        assert_eq!(tree.to_string(), "│   ┌── 3\n└── 2\n    └── 1\n");
    }

    #[test]
    fn renders_nested_subtrees() {
        let tree = Tree::new([5, 3, 8, 1, 4, 7, 9]);
        let expected = [
            "│       ┌── 9",
            "│   ┌── 8",
            "│   │   └── 7",
            "└── 5",
            "    │   ┌── 4",
            "    └── 3",
            "        └── 1",
        ];
        assert_eq!(tree.to_string().lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn renders_empty_tree_as_nothing() {
        assert_eq!(Tree::<i32>::default().to_string(), "");
    }
}
