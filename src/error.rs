//! Errors reported by [`Tree`][crate::Tree] operations.
//!
//! Most operations are total: inserting a duplicate or deleting a missing value
//! is a no-op, and a missing value is reported through `Option`. The only
//! failure is a usage error when a traversal is started without a visitor.

use crate::traverse::Order;

/// Errors triggered by tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A traversal was requested without a visitor to call for each node.
    /// Nothing was visited.
    #[error("{0} traversal requires a visitor")]
    MissingVisitor(Order),
}

/// Result alias for fallible tree operations.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;
