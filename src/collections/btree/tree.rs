//! `BTree` — the public handle owning the root node.

use super::node::Node;
use super::reserve::{NodeReserve, ReservePlan};
use super::{TreeConfig, TreeError};
use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};

/// A B-tree of minimum degree `t` holding keys of type `K`.
///
/// Equal keys are stored side by side; inserting a key twice stores it twice.
pub struct BTree<K> {
    pub(super) root: Option<Node<K>>,
    pub(super) config: TreeConfig,
    pub(super) len: usize,
}

impl<K> BTree<K> {
    /// Creates an empty tree with the given minimum degree.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidConfiguration`] if `minimum_degree < 2`.
    pub fn new(minimum_degree: usize) -> Result<Self, TreeError> {
        Ok(Self::from_valid_config(TreeConfig::new(minimum_degree)?))
    }

    /// Creates an empty tree from a configuration.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidConfiguration`] if the configuration was
    /// obtained without validation (e.g. deserialized) and is out of bounds.
    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TreeConfig) -> Self {
        Self {
            root: None,
            config,
            len: 0,
        }
    }

    /// Returns the number of keys, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The minimum degree `t` the tree was built with.
    pub fn minimum_degree(&self) -> usize {
        self.config.minimum_degree()
    }

    /// The tree's configuration.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Number of levels; `0` for an empty tree, `1` for a lone leaf root.
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, Node::height)
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::node_count)
    }

    /// Keys held directly by the root node.
    pub fn root_keys(&self) -> &[K] {
        match &self.root {
            Some(root) => &root.keys,
            None => &[],
        }
    }

    /// Returns every key in ascending order, duplicates included.
    pub fn traverse(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            root.traverse_into(&mut out);
        }
        out
    }

    /// Owned counterpart of [`BTree::traverse`].
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.traverse().into_iter().cloned().collect()
    }
}

impl<K: Ord> BTree<K> {
    /// Returns `true` if some stored key equals `key`.
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root
            .as_ref()
            .is_some_and(|root| root.search(key).is_some())
    }

    /// Inserts `key`, splitting full nodes on the way down.
    ///
    /// Aborts the process if node storage cannot be allocated; see
    /// [`BTree::try_insert`] for a fallible variant.
    pub fn insert(&mut self, key: K) {
        let plan = ReservePlan::for_insert(self.root.as_ref(), &key);
        let mut reserve = NodeReserve::allocate(plan, self.config.minimum_degree());
        self.insert_reserved(key, &mut reserve);
    }

    /// Inserts `key`, allocating every node it needs before touching the tree.
    ///
    /// # Errors
    /// Returns [`TreeError::ResourceExhaustion`] if allocation fails. The tree
    /// is unchanged in that case.
    pub fn try_insert(&mut self, key: K) -> Result<(), TreeError> {
        let plan = ReservePlan::for_insert(self.root.as_ref(), &key);
        let mut reserve = NodeReserve::try_allocate(plan, self.config.minimum_degree())
            .inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    error = %_err,
                    nodes = plan.total(),
                    "failed to reserve nodes for insert"
                );
            })?;
        self.insert_reserved(key, &mut reserve);
        Ok(())
    }

    fn insert_reserved(&mut self, key: K, reserve: &mut NodeReserve<K>) {
        self.root = Some(match self.root.take() {
            None => {
                let mut root = reserve.take(true);
                root.keys.push(key);
                root
            }
            Some(old_root) if old_root.is_full() => {
                let mut new_root = reserve.take(false);
                let sibling = reserve.take(old_root.is_leaf());
                new_root.children.push(old_root);
                new_root.split_child(0, sibling);

                let index = usize::from(new_root.keys[0] <= key);
                new_root.children[index].insert_into_non_full(key, reserve);

                #[cfg(feature = "tracing")]
                tracing::debug!(height = new_root.height(), "grew tree height");

                new_root
            }
            Some(mut root) => {
                root.insert_into_non_full(key, reserve);
                root
            }
        });
        self.len += 1;
        debug_assert!(reserve.is_empty(), "insert left reserved nodes unused");
    }
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self::from_valid_config(TreeConfig::default())
    }
}

impl<K: Clone> Clone for BTree<K> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            config: self.config,
            len: self.len,
        }
    }
}

impl<K: Debug> Debug for BTree<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("minimum_degree", &self.minimum_degree())
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

/// Formats keys in order separated by spaces. The alternate form (`{:#}`)
/// prints the node structure instead, one node per line indented by depth.
impl<K: Display> Display for BTree<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return match &self.root {
                Some(root) => root.fmt_depth(f, 0),
                None => f.write_str("[]\n"),
            };
        }

        for (i, key) in self.traverse().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl<K: Ord> Extend<K> for BTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::btree::DEFAULT_DEGREE;

    fn tree_of(degree: usize, keys: &[i32]) -> BTree<i32> {
        let mut tree = BTree::new(degree).unwrap();
        tree.extend(keys.iter().copied());
        tree
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<i32> = BTree::new(3).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.node_count(), 0);
        assert!(tree.root_keys().is_empty());
        assert!(!tree.search(&10));
        assert!(tree.traverse().is_empty());
    }

    #[test]
    fn test_invalid_degree() {
        for t in [0, 1] {
            assert!(matches!(
                BTree::<i32>::new(t),
                Err(TreeError::InvalidConfiguration { minimum_degree }) if minimum_degree == t
            ));
        }
    }

    #[test]
    fn test_first_insert_creates_leaf_root() {
        let tree = tree_of(3, &[100]);
        assert!(!tree.is_empty());
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root_keys(), &[100]);
        assert!(tree.search(&100));
        assert!(!tree.search(&10));
    }

    #[test]
    fn test_root_split_promotes_median() {
        let mut tree = tree_of(2, &[1, 2, 3]);
        assert_eq!(tree.root_keys(), &[1, 2, 3]);
        assert_eq!(tree.height(), 1);

        tree.insert(4);
        assert_eq!(tree.root_keys(), &[2]);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_internal_splits_keep_order() {
        let keys = [10, 20, 5, 30, 15, 25, 3, 7, 12, 18, 22, 28, 1, 35, 40];
        let tree = tree_of(2, &keys);

        let mut expected = keys.to_vec();
        expected.sort_unstable();
        assert_eq!(tree.to_vec(), expected);
        assert!(tree.height() >= 2);
        for key in keys {
            assert!(tree.search(&key));
        }
        assert!(!tree.search(&0));
        assert!(!tree.search(&50));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_duplicates_are_stored() {
        let mut tree = tree_of(3, &[10, 20]);
        tree.insert(10);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_vec(), vec![10, 10, 20]);

        tree.insert(5);
        assert_eq!(tree.to_vec(), vec![5, 10, 10, 20]);
        assert!(tree.search(&10));
    }

    #[test]
    fn test_many_duplicates_across_splits() {
        let tree = tree_of(2, &[7; 50]);
        assert_eq!(tree.len(), 50);
        assert_eq!(tree.to_vec(), vec![7; 50]);
        assert!(tree.search(&7));
        assert!(!tree.search(&6));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_try_insert_matches_insert() {
        let mut a = BTree::new(2).unwrap();
        let mut b = BTree::new(2).unwrap();
        for key in (0..200).rev() {
            a.insert(key);
            b.try_insert(key).unwrap();
        }
        assert_eq!(a.to_vec(), b.to_vec());
        assert_eq!(a.height(), b.height());
        assert_eq!(a.node_count(), b.node_count());
    }

    #[test]
    fn test_try_insert_failure_leaves_tree_empty() {
        let mut tree: BTree<u64> = BTree::new(usize::MAX / 4).unwrap();
        let result = tree.try_insert(1);
        assert!(matches!(result, Err(TreeError::ResourceExhaustion(_))));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(!tree.search(&1));
    }

    #[test]
    fn test_borrowed_search() {
        let mut tree = BTree::new(2).unwrap();
        for word in ["pear", "apple", "fig", "kiwi"] {
            tree.insert(word.to_string());
        }
        assert!(tree.search("fig"));
        assert!(!tree.search("plum"));
    }

    #[test]
    fn test_default_and_from_iter() {
        let tree: BTree<i32> = (0..100).rev().collect();
        assert_eq!(tree.minimum_degree(), DEFAULT_DEGREE);
        assert_eq!(tree.config(), TreeConfig::default());
        assert_eq!(tree.to_vec(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = tree_of(2, &[1, 2, 3, 4, 5]);
        let mut copy = original.clone();
        copy.insert(6);
        assert_eq!(original.len(), 5);
        assert_eq!(copy.to_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert!(copy.validate().is_ok());
    }

    #[test]
    fn test_display() {
        let tree = tree_of(2, &[3, 1, 4, 2]);
        assert_eq!(tree.to_string(), "1 2 3 4");
        assert_eq!(format!("{tree:#}"), "[3]\n  [1 2]\n  [4]\n");

        let empty: BTree<i32> = BTree::new(2).unwrap();
        assert_eq!(empty.to_string(), "");
        assert_eq!(format!("{empty:#}"), "[]\n");
    }

    #[test]
    fn test_debug_mentions_degree() {
        let tree = tree_of(2, &[1]);
        let rendered = format!("{tree:?}");
        assert!(rendered.contains("minimum_degree: 2"));
        assert!(rendered.contains("keys: [1]"));
    }
}
