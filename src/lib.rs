//! # 2-3 Tree
//!
//! An in-memory balanced 2-3 search tree over ordered keys.
//!
//! ## Architecture
//!
//! - **Node** (`tree::Node`): a 2-node or 3-node, leaf or internal
//! - **Engine** (`tree::Tree23`): insertion with splitting, deletion with
//!   borrowing and merging, lookups and traversal
//! - **Shared handle** (`SharedTree`): a lock-guarded tree for use across
//!   threads
//!
//! Every leaf sits at the same depth. Height grows only when a split reaches
//! the root and shrinks only when a merge empties it.
//!
//! ## Usage
//!
//! ```rust
//! use tree23::{Order, Tree23};
//!
//! let mut tree = Tree23::new();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.add(key);
//! }
//!
//! assert!(!tree.add(10));
//! assert_eq!(tree.find_min(), Some(&5));
//! assert_eq!(tree.find_max(), Some(&30));
//!
//! let sorted: Vec<i32> = tree.traverse(Order::InOrder).copied().collect();
//! assert_eq!(sorted, vec![5, 6, 7, 10, 12, 17, 20, 30]);
//!
//! assert!(tree.remove(&10));
//! assert!(!tree.search(&10));
//! assert_eq!(tree.size(), 7);
//! ```

pub mod error;
pub mod tree;
pub mod types;

pub use error::{Result, TreeError};
pub use tree::{Node, Traversal, Tree23};
pub use types::{Order, ServerConfig};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Node snapshot for visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<K> {
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node, ascending
    pub keys: Vec<K>,
    /// Child nodes, left to right (empty for leaves)
    pub children: Vec<TreeNode<K>>,
}

/// Tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of keys
    pub size: usize,
    /// Number of levels
    pub tree_height: usize,
}

/// Thread-safe handle to a [`Tree23`].
///
/// Mutations take the write lock for their whole duration, since splits and
/// merges leave the tree inconsistent until they finish. Reads share the
/// read lock and may run concurrently with each other. Clones refer to the
/// same tree.
pub struct SharedTree<K> {
    tree: Arc<RwLock<Tree23<K>>>,
}

impl<K> Clone for SharedTree<K> {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
        }
    }
}

impl<K> Default for SharedTree<K> {
    fn default() -> Self {
        Self::from_tree(Tree23::new())
    }
}

impl<K> SharedTree<K> {
    /// Create a handle to an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing tree
    pub fn from_tree(tree: Tree23<K>) -> Self {
        Self {
            tree: Arc::new(RwLock::new(tree)),
        }
    }

    /// Run `f` against the tree under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Tree23<K>) -> R) -> R {
        f(&self.tree.read())
    }

    /// Remove every key
    pub fn clear(&self) {
        self.tree.write().clear();
    }

    pub fn size(&self) -> usize {
        self.tree.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.read().stats()
    }
}

impl<K: Ord + Clone> SharedTree<K> {
    /// Insert a key. Returns `false` for a duplicate.
    pub fn add(&self, key: K) -> bool {
        self.tree.write().add(key)
    }

    /// Remove a key. Returns `false` if it was absent.
    pub fn remove(&self, key: &K) -> bool {
        self.tree.write().remove(key)
    }

    pub fn search(&self, key: &K) -> bool {
        self.tree.read().search(key)
    }

    pub fn find_min(&self) -> Option<K> {
        self.tree.read().find_min().cloned()
    }

    pub fn find_max(&self) -> Option<K> {
        self.tree.read().find_max().cloned()
    }

    /// Snapshot of the keys in the given order
    pub fn traverse(&self, order: Order) -> Vec<K> {
        self.tree.read().traverse(order).cloned().collect()
    }

    /// Export the tree structure for visualization
    pub fn export(&self) -> Option<TreeNode<K>> {
        self.tree.read().export()
    }

    /// Validate the tree under the read lock
    pub fn check_invariants(&self) -> Result<()> {
        self.tree.read().check_invariants()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_operations() -> Result<()> {
        let tree = SharedTree::new();

        assert!(tree.add(7));
        assert!(!tree.add(7));
        assert!(tree.search(&7));
        assert_eq!(tree.size(), 1);

        assert!(tree.remove(&7));
        assert!(!tree.remove(&7));
        assert!(tree.is_empty());
        assert_eq!(tree.find_min(), None);

        tree.check_invariants()
    }

    #[test]
    fn test_traversal_snapshots() {
        let tree = SharedTree::from_tree([4, 2, 6].into_iter().collect());
        assert_eq!(tree.traverse(Order::InOrder), vec![2, 4, 6]);
        assert_eq!(tree.traverse(Order::PreOrder), vec![4, 2, 6]);
        assert_eq!(tree.find_max(), Some(6));
        assert_eq!(
            tree.stats(),
            TreeStats {
                size: 3,
                tree_height: 2
            }
        );
    }

    #[test]
    fn test_concurrent_writers_and_readers() -> Result<()> {
        let tree = SharedTree::new();

        let writers: Vec<_> = (0..4)
            .map(|worker| {
                let tree = tree.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        tree.add(i * 4 + worker);
                    }
                })
            })
            .collect();
        let reader = {
            let tree = tree.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let keys = tree.traverse(Order::InOrder);
                    assert!(keys.windows(2).all(|w| w[0] < w[1]));
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(tree.size(), 1000);
        assert_eq!(tree.read(|t| t.iter().count()), 1000);
        tree.check_invariants()
    }

    #[test]
    fn test_export_serializes() {
        let tree = SharedTree::from_tree([1, 2, 3].into_iter().collect());
        let json = serde_json::to_value(tree.export()).unwrap();
        assert_eq!(json["keys"], serde_json::json!([2]));
        assert_eq!(json["isLeaf"], serde_json::json!(false));
        assert_eq!(json["children"][1]["keys"], serde_json::json!([3]));
    }
}
