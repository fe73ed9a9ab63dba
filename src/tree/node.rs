//! 2-3 tree node.
//!
//! A node is tagged by its key count: a [`Node::Two`] holds one key, a
//! [`Node::Three`] holds two. Children are optional links that are either
//! all present (internal node) or all absent (leaf), so the four legal shapes
//! are leaf-2, leaf-3, internal-2 and internal-3.
//!
//! Accessors are read-only. Calling one with an index the node's shape does
//! not have is an engine defect and panics.

/// Owned link to a child node. `None` at the leaf level.
pub type Link<K> = Option<Box<Node<K>>>;

/// A 2-node or 3-node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<K> {
    /// One key; keys in `left` are smaller than `k0`, keys in `middle` larger.
    Two {
        left: Link<K>,
        k0: K,
        middle: Link<K>,
    },
    /// Two keys with `k0 < k1`, separating `left`, `middle` and `right`.
    Three {
        left: Link<K>,
        k0: K,
        middle: Link<K>,
        k1: K,
        right: Link<K>,
    },
}

impl<K> Node<K> {
    /// Create a leaf holding a single key
    pub fn leaf(key: K) -> Self {
        Self::Two {
            left: None,
            k0: key,
            middle: None,
        }
    }

    /// Create a leaf holding two keys, `k0 < k1`
    pub fn leaf3(k0: K, k1: K) -> Self {
        Self::Three {
            left: None,
            k0,
            middle: None,
            k1,
            right: None,
        }
    }

    /// Create an internal 2-node from two owned subtrees
    pub fn branch(left: Node<K>, k0: K, middle: Node<K>) -> Self {
        Self::Two {
            left: Some(Box::new(left)),
            k0,
            middle: Some(Box::new(middle)),
        }
    }

    /// Whether this node has no children
    pub fn is_leaf(&self) -> bool {
        match self {
            Self::Two { left, .. } | Self::Three { left, .. } => left.is_none(),
        }
    }

    /// Number of keys held, 1 or 2
    pub fn key_count(&self) -> usize {
        match self {
            Self::Two { .. } => 1,
            Self::Three { .. } => 2,
        }
    }

    /// Number of children, 0 for a leaf
    pub fn child_count(&self) -> usize {
        if self.is_leaf() {
            0
        } else {
            self.key_count() + 1
        }
    }

    /// Whether this is a 2-node
    pub fn is_two(&self) -> bool {
        matches!(self, Self::Two { .. })
    }

    /// Whether this is a 3-node
    pub fn is_three(&self) -> bool {
        matches!(self, Self::Three { .. })
    }

    /// Key at `index` (0 or 1).
    ///
    /// # Panics
    ///
    /// Panics if the node does not hold a key at `index`.
    pub fn key(&self, index: usize) -> &K {
        match (self, index) {
            (Self::Two { k0, .. } | Self::Three { k0, .. }, 0) => k0,
            (Self::Three { k1, .. }, 1) => k1,
            _ => panic!(
                "key index {index} out of range for a node with {} key(s)",
                self.key_count()
            ),
        }
    }

    /// Smallest key held by this node
    pub fn first_key(&self) -> &K {
        self.key(0)
    }

    /// Largest key held by this node
    pub fn last_key(&self) -> &K {
        match self {
            Self::Two { k0, .. } => k0,
            Self::Three { k1, .. } => k1,
        }
    }

    /// Child at `index`: 0 = left, 1 = middle, 2 = right.
    ///
    /// # Panics
    ///
    /// Panics on a leaf, or when asking a 2-node for its right child.
    pub fn child(&self, index: usize) -> &Node<K> {
        let link = match (self, index) {
            (Self::Two { left, .. } | Self::Three { left, .. }, 0) => left,
            (Self::Two { middle, .. } | Self::Three { middle, .. }, 1) => middle,
            (Self::Three { right, .. }, 2) => right,
            _ => panic!(
                "child index {index} out of range for a {}-node",
                self.key_count() + 1
            ),
        };
        match link {
            Some(child) => child,
            None => panic!("child index {index} requested on a leaf"),
        }
    }

    /// Whether the node's immediate children are mutually consistent: all
    /// present for an internal node, all absent for a leaf.
    ///
    /// This only looks one level down. Full-subtree validation lives in
    /// [`Tree23::check_invariants`](crate::Tree23::check_invariants).
    pub fn is_balanced(&self) -> bool {
        match self {
            Self::Two { left, middle, .. } => left.is_some() == middle.is_some(),
            Self::Three {
                left,
                middle,
                right,
                ..
            } => left.is_some() == middle.is_some() && middle.is_some() == right.is_some(),
        }
    }

    /// Links to the children, left to right. Empty for a leaf.
    pub(crate) fn links(&self) -> impl Iterator<Item = &Node<K>> {
        let (left, middle, right) = match self {
            Self::Two { left, middle, .. } => (left.as_deref(), middle.as_deref(), None),
            Self::Three {
                left,
                middle,
                right,
                ..
            } => (left.as_deref(), middle.as_deref(), right.as_deref()),
        };
        [left, middle, right].into_iter().flatten()
    }
}

/// Abort on a node whose children are neither all present nor all absent.
#[cold]
#[track_caller]
pub(crate) fn malformed() -> ! {
    panic!("malformed 2-3 node: children must be all present or all absent")
}
