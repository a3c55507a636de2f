//! # `arbor` - In-Memory B-Tree
//!
//! A generic, order-preserving B-tree of configurable minimum degree `t`.
//! Keys are kept sorted across a balanced hierarchy of nodes, each holding
//! between `t - 1` and `2t - 1` keys (the root may hold fewer).
//!
//! ## Structural Guarantees
//!
//! - **Bounded fan-out**: no node ever exceeds `2t - 1` keys or `2t` children.
//! - **Proactive splitting**: a full node is split *before* an insertion
//!   descends into it, so a single top-down pass suffices and no node is
//!   revisited on the way back up.
//! - **Uniform depth**: all leaves sit at the same depth. Height only grows by
//!   replacing the root.
//! - **Duplicates**: equal keys are stored, never merged.
//!
//! ## Allocation Model
//!
//! Every node reserves its full key and child capacity at creation. An insert
//! first works out how many nodes it will need (one per split, plus a new root
//! when the root is full), allocates them, and only then touches the tree.
//! [`BTree::try_insert`] performs that allocation fallibly, so a
//! [`TreeError::ResourceExhaustion`] leaves the tree exactly as it was.
//!
//! ## Cargo Features
//!
//! - `tracing`: emits `tracing` events for node splits, root growth and
//!   failed reservations.
//!
//! ## Example
//!
//! ```rust
//! use arbor::BTree;
//!
//! let mut tree = BTree::new(3)?;
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.search(&10));
//! assert!(!tree.search(&15));
//! assert_eq!(tree.to_vec(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
//! # Ok::<(), arbor::TreeError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;

pub use collections::btree::{
    BTree, InvariantViolation, TreeConfig, TreeError, DEFAULT_DEGREE, MIN_DEGREE,
};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // The root is held inline; the empty tree is encoded in the `Vec` niche.
    assert!(
        mem::size_of::<Option<collections::btree::node::Node<u64>>>()
            == mem::size_of::<collections::btree::node::Node<u64>>()
    );

    // Handle stays a handful of words regardless of key type.
    assert!(mem::size_of::<BTree<u64>>() <= mem::size_of::<usize>() * 12);
    assert!(mem::size_of::<BTree<String>>() == mem::size_of::<BTree<u64>>());
};
