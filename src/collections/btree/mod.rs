//! `BTree` — a B-tree of minimum degree `t` with proactive node splitting.
//!
//! The module is layered bottom-up:
//! - `node`: key/child storage and the two mutating algorithms
//!   (`insert_into_non_full`, `split_child`) plus search descent.
//! - `reserve`: up-front allocation of every node an insert will consume.
//! - `tree`: the public handle; the only place the tree grows in height.
//! - `invariants`: structural validation.

pub mod config;
pub mod error;
pub mod invariants;
pub(crate) mod node;
mod reserve;
mod serialize;
pub mod tree;

pub use config::TreeConfig;
pub use error::TreeError;
pub use invariants::InvariantViolation;
pub use tree::BTree;

/// Smallest minimum degree for which the node size bounds are meaningful.
pub const MIN_DEGREE: usize = 2;

/// Minimum degree used by [`BTree::default`] and [`TreeConfig::default`].
///
/// Gives nodes of 5 to 11 keys.
pub const DEFAULT_DEGREE: usize = 6;
