//! Insertion with node splitting.
//!
//! Insertion descends to a leaf and rebuilds the path on the way back up.
//! Each level reports either that it absorbed the change ([`Insertion::Fit`])
//! or that it overflowed and split, promoting its median key together with
//! the two halves ([`Insertion::Split`]).

use super::node::{malformed, Node};
use std::cmp::Ordering::{Equal, Greater, Less};

/// Outcome of inserting into a subtree
#[derive(Debug)]
pub(crate) enum Insertion<K> {
    /// The subtree kept its height. `inserted` is false for a duplicate.
    Fit { node: Node<K>, inserted: bool },
    /// The subtree split: `left < key < right`, both halves one level
    /// shallower than the node that produced them would have been.
    Split {
        left: Node<K>,
        key: K,
        right: Node<K>,
    },
}

impl<K> Insertion<K> {
    fn unchanged(node: Node<K>) -> Self {
        Self::Fit {
            node,
            inserted: false,
        }
    }

    fn absorbed(node: Node<K>) -> Self {
        Self::Fit {
            node,
            inserted: true,
        }
    }
}

/// Insert `key` into the subtree rooted at `node`.
///
/// Equality with any key on the descent path stops with no change.
pub(crate) fn insert<K: Ord>(node: Node<K>, key: K) -> Insertion<K> {
    match node {
        Node::Two {
            left: None,
            k0,
            middle: None,
        } => match key.cmp(&k0) {
            Equal => Insertion::unchanged(Node::leaf(k0)),
            Less => Insertion::absorbed(Node::leaf3(key, k0)),
            Greater => Insertion::absorbed(Node::leaf3(k0, key)),
        },

        Node::Three {
            left: None,
            k0,
            middle: None,
            k1,
            right: None,
        } => split_leaf(k0, k1, key),

        Node::Two {
            left: Some(left),
            k0,
            middle: Some(middle),
        } => match key.cmp(&k0) {
            Equal => Insertion::unchanged(Node::Two {
                left: Some(left),
                k0,
                middle: Some(middle),
            }),
            Less => match insert(*left, key) {
                Insertion::Fit { node, inserted } => Insertion::Fit {
                    node: Node::Two {
                        left: Some(Box::new(node)),
                        k0,
                        middle: Some(middle),
                    },
                    inserted,
                },
                Insertion::Split {
                    left: a,
                    key: promoted,
                    right: b,
                } => Insertion::absorbed(Node::Three {
                    left: Some(Box::new(a)),
                    k0: promoted,
                    middle: Some(Box::new(b)),
                    k1: k0,
                    right: Some(middle),
                }),
            },
            Greater => match insert(*middle, key) {
                Insertion::Fit { node, inserted } => Insertion::Fit {
                    node: Node::Two {
                        left: Some(left),
                        k0,
                        middle: Some(Box::new(node)),
                    },
                    inserted,
                },
                Insertion::Split {
                    left: a,
                    key: promoted,
                    right: b,
                } => Insertion::absorbed(Node::Three {
                    left: Some(left),
                    k0,
                    middle: Some(Box::new(a)),
                    k1: promoted,
                    right: Some(Box::new(b)),
                }),
            },
        },

        Node::Three {
            left: Some(left),
            k0,
            middle: Some(middle),
            k1,
            right: Some(right),
        } => match (key.cmp(&k0), key.cmp(&k1)) {
            (Equal, _) | (_, Equal) => Insertion::unchanged(Node::Three {
                left: Some(left),
                k0,
                middle: Some(middle),
                k1,
                right: Some(right),
            }),
            (Less, _) => match insert(*left, key) {
                Insertion::Fit { node, inserted } => Insertion::Fit {
                    node: Node::Three {
                        left: Some(Box::new(node)),
                        k0,
                        middle: Some(middle),
                        k1,
                        right: Some(right),
                    },
                    inserted,
                },
                // k0 rises; the old middle and right pair up under k1
                Insertion::Split {
                    left: a,
                    key: promoted,
                    right: b,
                } => Insertion::Split {
                    left: Node::branch(a, promoted, b),
                    key: k0,
                    right: Node::Two {
                        left: Some(middle),
                        k0: k1,
                        middle: Some(right),
                    },
                },
            },
            (Greater, Less) => match insert(*middle, key) {
                Insertion::Fit { node, inserted } => Insertion::Fit {
                    node: Node::Three {
                        left: Some(left),
                        k0,
                        middle: Some(Box::new(node)),
                        k1,
                        right: Some(right),
                    },
                    inserted,
                },
                // the promoted key is the median itself
                Insertion::Split {
                    left: a,
                    key: promoted,
                    right: b,
                } => Insertion::Split {
                    left: Node::Two {
                        left: Some(left),
                        k0,
                        middle: Some(Box::new(a)),
                    },
                    key: promoted,
                    right: Node::Two {
                        left: Some(Box::new(b)),
                        k0: k1,
                        middle: Some(right),
                    },
                },
            },
            (_, Greater) => match insert(*right, key) {
                Insertion::Fit { node, inserted } => Insertion::Fit {
                    node: Node::Three {
                        left: Some(left),
                        k0,
                        middle: Some(middle),
                        k1,
                        right: Some(Box::new(node)),
                    },
                    inserted,
                },
                Insertion::Split {
                    left: a,
                    key: promoted,
                    right: b,
                } => Insertion::Split {
                    left: Node::Two {
                        left: Some(left),
                        k0,
                        middle: Some(middle),
                    },
                    key: k1,
                    right: Node::branch(a, promoted, b),
                },
            },
        },

        _ => malformed(),
    }
}

/// Split a full leaf around the median of its two keys and `key`
fn split_leaf<K: Ord>(k0: K, k1: K, key: K) -> Insertion<K> {
    match (key.cmp(&k0), key.cmp(&k1)) {
        (Equal, _) | (_, Equal) => Insertion::unchanged(Node::leaf3(k0, k1)),
        (Less, _) => Insertion::Split {
            left: Node::leaf(key),
            key: k0,
            right: Node::leaf(k1),
        },
        (Greater, Less) => Insertion::Split {
            left: Node::leaf(k0),
            key,
            right: Node::leaf(k1),
        },
        (_, Greater) => Insertion::Split {
            left: Node::leaf(k0),
            key: k1,
            right: Node::leaf(key),
        },
    }
}
