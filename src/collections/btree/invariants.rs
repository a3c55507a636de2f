//! Structural validation for [`BTree`].
//!
//! `validate` walks the whole tree, so it is meant for tests and debugging,
//! not for hot paths.

use super::node::Node;
use super::BTree;
use std::fmt;

/// A broken B-tree invariant, reported with the depth of the offending node
/// (the root is at depth 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A node holds more than `2t - 1` keys.
    Overfull {
        /// Depth of the node.
        depth: usize,
        /// Keys found.
        keys: usize,
    },
    /// A non-root node holds fewer than `t - 1` keys, or the root of a
    /// non-empty tree holds none.
    Underfull {
        /// Depth of the node.
        depth: usize,
        /// Keys found.
        keys: usize,
    },
    /// An internal node's child count is not its key count plus one.
    ChildCount {
        /// Depth of the node.
        depth: usize,
        /// Keys found.
        keys: usize,
        /// Children found.
        children: usize,
    },
    /// A leaf node owns children.
    LeafWithChildren {
        /// Depth of the node.
        depth: usize,
    },
    /// A node carries a different minimum degree than its tree.
    DegreeMismatch {
        /// Depth of the node.
        depth: usize,
        /// Degree stored in the node.
        found: usize,
    },
    /// Keys within a node are not in non-decreasing order.
    Unsorted {
        /// Depth of the node.
        depth: usize,
    },
    /// A key lies outside the range its parent's separators allow.
    OutOfRange {
        /// Depth of the node.
        depth: usize,
    },
    /// Leaves sit at different depths.
    UnevenLeaves {
        /// Depth of the first leaf reached.
        expected: usize,
        /// Depth of the offending leaf.
        found: usize,
    },
    /// The recorded length differs from the number of stored keys.
    LengthMismatch {
        /// Length recorded by the tree.
        recorded: usize,
        /// Keys actually stored.
        counted: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Overfull { depth, keys } => {
                write!(f, "node at depth {depth} is overfull with {keys} keys")
            }
            Self::Underfull { depth, keys } => {
                write!(f, "node at depth {depth} is underfull with {keys} keys")
            }
            Self::ChildCount {
                depth,
                keys,
                children,
            } => write!(
                f,
                "internal node at depth {depth} has {keys} keys but {children} children"
            ),
            Self::LeafWithChildren { depth } => {
                write!(f, "leaf at depth {depth} has children")
            }
            Self::DegreeMismatch { depth, found } => {
                write!(f, "node at depth {depth} has minimum degree {found}")
            }
            Self::Unsorted { depth } => write!(f, "keys at depth {depth} are out of order"),
            Self::OutOfRange { depth } => {
                write!(f, "key at depth {depth} lies outside its separators")
            }
            Self::UnevenLeaves { expected, found } => {
                write!(f, "leaf at depth {found}, expected depth {expected}")
            }
            Self::LengthMismatch { recorded, counted } => {
                write!(f, "tree records {recorded} keys but holds {counted}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

struct Checker {
    degree: usize,
    leaf_depth: Option<usize>,
    counted: usize,
}

impl Checker {
    fn check<K: Ord>(
        &mut self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation> {
        let keys = node.key_count();

        if node.degree() != self.degree {
            return Err(InvariantViolation::DegreeMismatch {
                depth,
                found: node.degree(),
            });
        }
        if keys > 2 * self.degree - 1 {
            return Err(InvariantViolation::Overfull { depth, keys });
        }
        let min_keys = if depth == 0 { 1 } else { self.degree - 1 };
        if keys < min_keys {
            return Err(InvariantViolation::Underfull { depth, keys });
        }
        if node.keys.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(InvariantViolation::Unsorted { depth });
        }
        // Bounds are closed: equal keys may sit on either side of a separator.
        let below = lower.is_some_and(|lo| node.keys.first().is_some_and(|k| k < lo));
        let above = upper.is_some_and(|hi| node.keys.last().is_some_and(|k| k > hi));
        if below || above {
            return Err(InvariantViolation::OutOfRange { depth });
        }
        self.counted += keys;

        if node.is_leaf() {
            if !node.children.is_empty() {
                return Err(InvariantViolation::LeafWithChildren { depth });
            }
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(InvariantViolation::UnevenLeaves {
                    expected,
                    found: depth,
                }),
            };
        }

        if node.children.len() != keys + 1 {
            return Err(InvariantViolation::ChildCount {
                depth,
                keys,
                children: node.children.len(),
            });
        }
        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { node.keys.get(i - 1) };
            let hi = if i == keys { upper } else { node.keys.get(i) };
            self.check(child, depth + 1, lo, hi)?;
        }
        Ok(())
    }
}

impl<K: Ord> BTree<K> {
    /// Checks every structural invariant of the tree.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found in a depth-first walk.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut checker = Checker {
            degree: self.config.minimum_degree(),
            leaf_depth: None,
            counted: 0,
        };
        if let Some(root) = &self.root {
            checker.check(root, 0, None, None)?;
        }
        if checker.counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                counted: checker.counted,
            });
        }
        Ok(())
    }
}
