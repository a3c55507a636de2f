//! Ordered collections.
//!
//! - `btree`: B-tree keyed by any `Ord` type, with proactive node splitting

pub mod btree;

pub use btree::BTree;
