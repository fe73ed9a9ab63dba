//! 2-3 tree engine.
//!
//! This module provides the [`Tree23`] struct with operations for:
//! - add / remove: mutation with split and borrow/merge rebalancing
//! - search, find_min, find_max: read-only lookups
//! - traverse: in-, pre- and post-order walks
//! - check_invariants / export: validation and visualization

use super::insert::{self, Insertion};
use super::node::{Link, Node};
use super::remove::{self, Removal, Shrink};
use super::traverse::Traversal;
use crate::error::{Result, TreeError};
use crate::types::Order;
use crate::{TreeNode, TreeStats};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// An in-memory 2-3 search tree holding distinct keys
#[derive(Debug, Clone)]
pub struct Tree23<K> {
    /// Root node (`None` means empty tree)
    root: Link<K>,
    /// Number of keys, maintained incrementally
    len: usize,
}

impl<K> Default for Tree23<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree23<K> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the tree
    pub fn size(&self) -> usize {
        self.len
    }

    /// Alias of [`size`](Self::size)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove every key
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing tree");
        self.root = None;
        self.len = 0;
    }

    /// Root node, for read-only structural inspection
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Number of levels; 0 for an empty tree, 1 for a single leaf
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            height += 1;
            current = match node {
                Node::Two { left, .. } | Node::Three { left, .. } => left.as_deref(),
            };
        }
        height
    }

    /// Smallest key, `None` on an empty tree
    pub fn find_min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        loop {
            match node {
                Node::Two { left: Some(left), .. } | Node::Three { left: Some(left), .. } => {
                    node = &**left
                }
                _ => return Some(node.first_key()),
            }
        }
    }

    /// Largest key, `None` on an empty tree
    pub fn find_max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        loop {
            match node {
                Node::Three { right: Some(right), .. } => node = &**right,
                Node::Two { middle: Some(middle), .. } => node = &**middle,
                _ => return Some(node.last_key()),
            }
        }
    }

    /// Walk the keys in the given order. Every call starts a new walk.
    pub fn traverse(&self, order: Order) -> Traversal<'_, K> {
        Traversal::new(self.root.as_deref(), order)
    }

    pub fn traverse_in_order(&self) -> Traversal<'_, K> {
        self.traverse(Order::InOrder)
    }

    pub fn traverse_pre_order(&self) -> Traversal<'_, K> {
        self.traverse(Order::PreOrder)
    }

    pub fn traverse_post_order(&self) -> Traversal<'_, K> {
        self.traverse(Order::PostOrder)
    }

    /// Keys in ascending order
    pub fn iter(&self) -> Traversal<'_, K> {
        self.traverse_in_order()
    }

    /// Size and height snapshot
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            size: self.len,
            tree_height: self.height(),
        }
    }

    /// Export the node graph for visualization
    pub fn export(&self) -> Option<TreeNode<K>>
    where
        K: Clone,
    {
        self.root.as_deref().map(export_node)
    }
}

impl<K: Ord> Tree23<K> {
    /// Insert a key.
    ///
    /// Returns `true` if the key was absent and is now present, `false` if it
    /// was already in the tree (the tree is left unchanged).
    pub fn add(&mut self, key: K) -> bool {
        let Some(root) = self.root.take() else {
            self.root = Some(Box::new(Node::leaf(key)));
            self.len = 1;
            trace!("created root leaf");
            return true;
        };

        match insert::insert(*root, key) {
            Insertion::Fit { node, inserted } => {
                self.root = Some(Box::new(node));
                if inserted {
                    self.len += 1;
                }
                inserted
            }
            Insertion::Split { left, key, right } => {
                self.root = Some(Box::new(Node::branch(left, key, right)));
                self.len += 1;
                debug!(height = self.height(), "root split, tree grew one level");
                true
            }
        }
    }

    /// Remove a key.
    ///
    /// Returns `true` if the key was present and has been removed. An absent
    /// key leaves the tree and its size untouched.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(root) = self.root.take() else {
            return false;
        };

        match remove::remove(*root, key) {
            Removal::Absent(node) => {
                self.root = Some(Box::new(node));
                false
            }
            Removal::Removed(Shrink::Kept(node)) => {
                self.root = Some(Box::new(node));
                self.len -= 1;
                true
            }
            Removal::Removed(Shrink::Underflow(orphan)) => {
                self.root = orphan;
                self.len -= 1;
                if self.root.is_some() {
                    debug!(height = self.height(), "root collapsed, tree shrank one level");
                } else {
                    trace!("removed last key");
                }
                true
            }
        }
    }

    /// Whether `key` is in the tree
    pub fn search(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match node {
                Node::Two { left, k0, middle } => match key.cmp(k0) {
                    Ordering::Equal => return true,
                    Ordering::Less => left.as_deref(),
                    Ordering::Greater => middle.as_deref(),
                },
                Node::Three {
                    left,
                    k0,
                    middle,
                    k1,
                    right,
                } => match (key.cmp(k0), key.cmp(k1)) {
                    (Ordering::Equal, _) | (_, Ordering::Equal) => return true,
                    (Ordering::Less, _) => left.as_deref(),
                    (Ordering::Greater, Ordering::Less) => middle.as_deref(),
                    (_, Ordering::Greater) => right.as_deref(),
                },
            };
        }
        false
    }

    /// Alias of [`search`](Self::search)
    pub fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    /// Validate the whole tree: key order inside nodes, separator ranges,
    /// child arity, uniform leaf depth and the size counter.
    pub fn check_invariants(&self) -> Result<()> {
        let mut actual = 0;
        if let Some(root) = self.root.as_deref() {
            let mut leaf_depth = None;
            check_node(root, None, None, 0, &mut leaf_depth, &mut actual)?;
        }
        if actual != self.len {
            return Err(TreeError::SizeMismatch {
                recorded: self.len,
                actual,
            });
        }
        Ok(())
    }
}

fn check_node<K: Ord>(
    node: &Node<K>,
    lower: Option<&K>,
    upper: Option<&K>,
    depth: usize,
    leaf_depth: &mut Option<usize>,
    count: &mut usize,
) -> Result<()> {
    if !node.is_balanced() {
        return Err(TreeError::ChildArity { depth });
    }
    if let Node::Three { k0, k1, .. } = node {
        if k0 >= k1 {
            return Err(TreeError::UnorderedKeys { depth });
        }
    }
    let below_lower = lower.is_some_and(|lo| node.first_key() <= lo);
    let above_upper = upper.is_some_and(|hi| node.last_key() >= hi);
    if below_lower || above_upper {
        return Err(TreeError::SubtreeOutOfRange { depth });
    }
    *count += node.key_count();

    if node.is_leaf() {
        match *leaf_depth {
            None => *leaf_depth = Some(depth),
            Some(expected) if expected != depth => {
                return Err(TreeError::UnevenLeafDepth {
                    expected,
                    found: depth,
                })
            }
            Some(_) => {}
        }
        return Ok(());
    }

    // child i lies between key i-1 and key i
    let last = node.key_count();
    for (index, child) in node.links().enumerate() {
        let lo = if index == 0 { lower } else { Some(node.key(index - 1)) };
        let hi = if index == last { upper } else { Some(node.key(index)) };
        check_node(child, lo, hi, depth + 1, leaf_depth, count)?;
    }
    Ok(())
}

fn export_node<K: Clone>(node: &Node<K>) -> TreeNode<K> {
    let keys = match node {
        Node::Two { k0, .. } => vec![k0.clone()],
        Node::Three { k0, k1, .. } => vec![k0.clone(), k1.clone()],
    };
    TreeNode {
        is_leaf: node.is_leaf(),
        keys,
        children: node.links().map(export_node).collect(),
    }
}

impl<K: Ord> FromIterator<K> for Tree23<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for Tree23<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree23<K> {
    type Item = &'a K;
    type IntoIter = Traversal<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
