//! B-tree node storage and the structural algorithms that run on it.

use super::reserve::NodeReserve;
use super::TreeError;
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};

/// One vertex of the tree.
///
/// Invariants (outside a split in progress):
/// - `keys.len() <= 2 * degree - 1`, keys non-decreasing
/// - `children.len() == keys.len() + 1` for internal nodes
/// - `children.is_empty()` for leaf nodes
///
/// Both vectors reserve their maximum size at creation, so inserting into a
/// node never reallocates.
pub(crate) struct Node<K> {
    degree: usize,
    leaf: bool,
    pub(super) keys: Vec<K>,
    pub(super) children: Vec<Node<K>>,
}

impl<K> Node<K> {
    /// Creates an empty node with full capacity. Aborts on allocation failure.
    pub(super) fn new(degree: usize, leaf: bool) -> Self {
        let children = if leaf {
            Vec::new()
        } else {
            Vec::with_capacity(2 * degree)
        };

        Self {
            degree,
            leaf,
            keys: Vec::with_capacity(2 * degree - 1),
            children,
        }
    }

    /// Fallible counterpart of [`Node::new`].
    pub(super) fn try_new(degree: usize, leaf: bool) -> Result<Self, TreeError> {
        let mut keys = Vec::new();
        keys.try_reserve_exact(2 * degree - 1)?;

        let mut children = Vec::new();
        if !leaf {
            children.try_reserve_exact(2 * degree)?;
        }

        Ok(Self {
            degree,
            leaf,
            keys,
            children,
        })
    }

    pub(super) fn degree(&self) -> usize {
        self.degree
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.leaf
    }

    pub(super) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(super) fn is_full(&self) -> bool {
        self.keys.len() == 2 * self.degree - 1
    }

    /// Number of levels from this node down to its leaves, inclusive.
    pub(super) fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Some(first) = node.children.first() {
            node = first;
            height += 1;
        }
        height
    }

    pub(super) fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Appends references to every key of the subtree, in order.
    pub(super) fn traverse_into<'a>(&'a self, out: &mut Vec<&'a K>) {
        for (i, key) in self.keys.iter().enumerate() {
            if !self.leaf {
                self.children[i].traverse_into(out);
            }
            out.push(key);
        }
        if let Some(last) = self.children.last() {
            last.traverse_into(out);
        }
    }

    /// Moves the upper half of the full child at `index` into `sibling` and
    /// promotes the child's median key into this node.
    ///
    /// `sibling` must be an empty node with the child's leaf-ness. It is
    /// allocated by the caller so that this method never allocates.
    pub(super) fn split_child(&mut self, index: usize, mut sibling: Node<K>) {
        let t = self.degree;
        let child = &mut self.children[index];
        debug_assert!(child.is_full(), "split_child on a non-full child");
        debug_assert_eq!(sibling.leaf, child.leaf);
        debug_assert!(sibling.keys.is_empty() && sibling.children.is_empty());

        // child keys: [0 .. t-1) [t-1] [t .. 2t-1)
        //              left      median right
        sibling.keys.extend(child.keys.drain(t..));
        if !child.leaf {
            sibling.children.extend(child.children.drain(t..));
        }
        let median = child.keys.remove(t - 1);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            index,
            degree = t,
            leaf = sibling.leaf,
            "split full child"
        );

        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);
    }
}

impl<K: Ord> Node<K> {
    /// Index of the child an inserted `key` descends into: the number of keys
    /// less than or equal to it. The same index places `key` in a leaf after
    /// any equal keys.
    pub(super) fn insert_position(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Inserts `key` into the subtree rooted here.
    ///
    /// The caller guarantees this node is not full. Any full child on the
    /// way down is split before descending, taking its sibling from `reserve`.
    pub(super) fn insert_into_non_full(&mut self, key: K, reserve: &mut NodeReserve<K>) {
        debug_assert!(!self.is_full(), "insert_into_non_full on a full node");

        let mut index = self.insert_position(&key);
        if self.leaf {
            self.keys.insert(index, key);
            return;
        }

        if self.children[index].is_full() {
            let sibling = reserve.take(self.children[index].leaf);
            self.split_child(index, sibling);
            // Ties go right, matching `insert_position`.
            if self.keys[index] <= key {
                index += 1;
            }
        }
        self.children[index].insert_into_non_full(key, reserve);
    }

    /// Returns the node holding `key`, if any node in this subtree does.
    pub(super) fn search<Q>(&self, key: &Q) -> Option<&Node<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.keys.partition_point(|k| k.borrow() < key);
        if self.keys.get(index).is_some_and(|k| k.borrow() == key) {
            return Some(self);
        }
        if self.leaf {
            return None;
        }
        self.children[index].search(key)
    }
}

impl<K: Clone> Clone for Node<K> {
    // Derived `Clone` would shrink capacity to the live length and break the
    // no-reallocation guarantee of `insert_into_non_full`.
    fn clone(&self) -> Self {
        let mut node = Node::new(self.degree, self.leaf);
        node.keys.extend(self.keys.iter().cloned());
        node.children.extend(self.children.iter().cloned());
        node
    }
}

impl<K: Debug> Debug for Node<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("leaf", &self.leaf).field("keys", &self.keys);
        if !self.leaf {
            s.field("children", &self.children);
        }
        s.finish()
    }
}

impl<K: Display> Node<K> {
    /// Writes one line per node, indented by depth.
    pub(super) fn fmt_depth(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        f.write_str(&"  ".repeat(depth))?;
        f.write_str("[")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str("]\n")?;
        for child in &self.children {
            child.fmt_depth(f, depth + 1)?;
        }
        Ok(())
    }
}
