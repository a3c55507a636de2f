//! Up-front node allocation for a single insert.
//!
//! With proactive splitting, an insert splits exactly the full nodes on its
//! root-to-leaf path, plus allocates a new root when the root itself is full.
//! That path is known before the tree is touched, so every node the insert
//! will need can be allocated first. Once a [`NodeReserve`] exists the insert
//! itself cannot fail.

use super::node::Node;
use super::TreeError;

/// How many empty nodes of each kind an insert will consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct ReservePlan {
    pub(super) leaves: usize,
    pub(super) internals: usize,
}

impl ReservePlan {
    /// Walks the insertion path for `key` without modifying anything.
    ///
    /// Routing matches `Node::insert_into_non_full`: splitting a node on the
    /// path does not change which grandchild `key` reaches, so the full
    /// nodes counted here are exactly the ones that will be split.
    pub(super) fn for_insert<K: Ord>(root: Option<&Node<K>>, key: &K) -> Self {
        let mut plan = Self::default();
        let Some(root) = root else {
            plan.leaves = 1;
            return plan;
        };

        if root.is_full() {
            plan.internals += 1;
        }

        let mut node = root;
        loop {
            if node.is_full() {
                if node.is_leaf() {
                    plan.leaves += 1;
                } else {
                    plan.internals += 1;
                }
            }
            if node.is_leaf() {
                return plan;
            }
            node = &node.children[node.insert_position(key)];
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub(super) fn total(self) -> usize {
        self.leaves + self.internals
    }
}

/// Pre-allocated empty nodes, consumed by splits and root growth.
pub(crate) struct NodeReserve<K> {
    degree: usize,
    leaves: Vec<Node<K>>,
    internals: Vec<Node<K>>,
}

impl<K> NodeReserve<K> {
    pub(super) fn empty(degree: usize) -> Self {
        Self {
            degree,
            leaves: Vec::new(),
            internals: Vec::new(),
        }
    }

    /// Allocates every node in `plan`. Aborts on allocation failure.
    pub(super) fn allocate(plan: ReservePlan, degree: usize) -> Self {
        Self {
            degree,
            leaves: (0..plan.leaves).map(|_| Node::new(degree, true)).collect(),
            internals: (0..plan.internals)
                .map(|_| Node::new(degree, false))
                .collect(),
        }
    }

    /// Allocates every node in `plan`, failing without side effects.
    pub(super) fn try_allocate(plan: ReservePlan, degree: usize) -> Result<Self, TreeError> {
        let mut reserve = Self::empty(degree);
        reserve.leaves.try_reserve_exact(plan.leaves)?;
        reserve.internals.try_reserve_exact(plan.internals)?;

        for _ in 0..plan.leaves {
            reserve.leaves.push(Node::try_new(degree, true)?);
        }
        for _ in 0..plan.internals {
            reserve.internals.push(Node::try_new(degree, false)?);
        }
        Ok(reserve)
    }

    /// Takes an empty node of the requested kind.
    pub(super) fn take(&mut self, leaf: bool) -> Node<K> {
        let degree = self.degree;
        let pool = if leaf {
            &mut self.leaves
        } else {
            &mut self.internals
        };
        pool.pop().unwrap_or_else(|| {
            debug_assert!(false, "insert consumed more nodes than planned");
            Node::new(degree, leaf)
        })
    }

    pub(super) fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.internals.is_empty()
    }

    #[cfg(test)]
    pub(super) fn push(&mut self, node: Node<K>) {
        if node.is_leaf() {
            self.leaves.push(node);
        } else {
            self.internals.push(node);
        }
    }
}
