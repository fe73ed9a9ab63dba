//! Deletion with borrowing and merging.
//!
//! A key found in an internal node is replaced by its in-order predecessor
//! (left key) or successor (right key), which is then taken out of a leaf.
//! Removing the last key of a leaf leaves a hole one level shorter than its
//! siblings. The parent repairs the hole on the way back up:
//!
//! - if an adjacent sibling is a 3-node, one key rotates through the parent
//!   into the hole (borrow);
//! - otherwise the hole, the separating parent key and the sibling merge into
//!   one 3-node, and the parent loses a key. A 2-node parent is then itself a
//!   hole, and the repair continues one level up.
//!
//! The left, middle and right positions are handled separately because the
//! available siblings differ: left and right children have one neighbour,
//! the middle child of a 3-node has two.

use super::node::{malformed, Link, Node};
use std::cmp::Ordering::{Equal, Greater, Less};

/// A subtree after a key was taken out of it
#[derive(Debug)]
pub(crate) enum Shrink<K> {
    /// Same height as before.
    Kept(Node<K>),
    /// One level shorter: the node lost its only key. The link holds what is
    /// left of it, `None` at the leaf level.
    Underflow(Link<K>),
}

/// Outcome of removing a key from a subtree
#[derive(Debug)]
pub(crate) enum Removal<K> {
    /// The key was not present; the subtree is returned untouched.
    Absent(Node<K>),
    Removed(Shrink<K>),
}

/// Remove `key` from the subtree rooted at `node`.
pub(crate) fn remove<K: Ord>(node: Node<K>, key: &K) -> Removal<K> {
    match node {
        Node::Two {
            left: None,
            k0,
            middle: None,
        } => {
            if *key == k0 {
                Removal::Removed(Shrink::Underflow(None))
            } else {
                Removal::Absent(Node::leaf(k0))
            }
        }

        Node::Three {
            left: None,
            k0,
            middle: None,
            k1,
            right: None,
        } => match (key.cmp(&k0), key.cmp(&k1)) {
            (Equal, _) => Removal::Removed(Shrink::Kept(Node::leaf(k1))),
            (_, Equal) => Removal::Removed(Shrink::Kept(Node::leaf(k0))),
            _ => Removal::Absent(Node::leaf3(k0, k1)),
        },

        Node::Two {
            left: Some(left),
            k0,
            middle: Some(middle),
        } => match key.cmp(&k0) {
            Equal => {
                let (predecessor, child) = take_max(*left);
                Removal::Removed(rejoin_two_left(child, predecessor, middle))
            }
            Less => match remove(*left, key) {
                Removal::Absent(node) => Removal::Absent(Node::Two {
                    left: Some(Box::new(node)),
                    k0,
                    middle: Some(middle),
                }),
                Removal::Removed(child) => Removal::Removed(rejoin_two_left(child, k0, middle)),
            },
            Greater => match remove(*middle, key) {
                Removal::Absent(node) => Removal::Absent(Node::Two {
                    left: Some(left),
                    k0,
                    middle: Some(Box::new(node)),
                }),
                Removal::Removed(child) => Removal::Removed(rejoin_two_middle(left, k0, child)),
            },
        },

        Node::Three {
            left: Some(left),
            k0,
            middle: Some(middle),
            k1,
            right: Some(right),
        } => match (key.cmp(&k0), key.cmp(&k1)) {
            (Equal, _) => {
                let (predecessor, child) = take_max(*left);
                Removal::Removed(Shrink::Kept(rejoin_three_left(
                    child,
                    predecessor,
                    middle,
                    k1,
                    right,
                )))
            }
            (_, Equal) => {
                let (successor, child) = take_min(*right);
                Removal::Removed(Shrink::Kept(rejoin_three_right(
                    left, k0, middle, successor, child,
                )))
            }
            (Less, _) => match remove(*left, key) {
                Removal::Absent(node) => Removal::Absent(Node::Three {
                    left: Some(Box::new(node)),
                    k0,
                    middle: Some(middle),
                    k1,
                    right: Some(right),
                }),
                Removal::Removed(child) => Removal::Removed(Shrink::Kept(rejoin_three_left(
                    child, k0, middle, k1, right,
                ))),
            },
            (Greater, Less) => match remove(*middle, key) {
                Removal::Absent(node) => Removal::Absent(Node::Three {
                    left: Some(left),
                    k0,
                    middle: Some(Box::new(node)),
                    k1,
                    right: Some(right),
                }),
                Removal::Removed(child) => Removal::Removed(Shrink::Kept(rejoin_three_middle(
                    left, k0, child, k1, right,
                ))),
            },
            (_, Greater) => match remove(*right, key) {
                Removal::Absent(node) => Removal::Absent(Node::Three {
                    left: Some(left),
                    k0,
                    middle: Some(middle),
                    k1,
                    right: Some(Box::new(node)),
                }),
                Removal::Removed(child) => Removal::Removed(Shrink::Kept(rejoin_three_right(
                    left, k0, middle, k1, child,
                ))),
            },
        },

        _ => malformed(),
    }
}

/// Take the largest key out of a subtree
fn take_max<K>(node: Node<K>) -> (K, Shrink<K>) {
    match node {
        Node::Two {
            left: None,
            k0,
            middle: None,
        } => (k0, Shrink::Underflow(None)),
        Node::Three {
            left: None,
            k0,
            middle: None,
            k1,
            right: None,
        } => (k1, Shrink::Kept(Node::leaf(k0))),
        Node::Two {
            left: Some(left),
            k0,
            middle: Some(middle),
        } => {
            let (max, child) = take_max(*middle);
            (max, rejoin_two_middle(left, k0, child))
        }
        Node::Three {
            left: Some(left),
            k0,
            middle: Some(middle),
            k1,
            right: Some(right),
        } => {
            let (max, child) = take_max(*right);
            (
                max,
                Shrink::Kept(rejoin_three_right(left, k0, middle, k1, child)),
            )
        }
        _ => malformed(),
    }
}

/// Take the smallest key out of a subtree
fn take_min<K>(node: Node<K>) -> (K, Shrink<K>) {
    match node {
        Node::Two {
            left: None,
            k0,
            middle: None,
        } => (k0, Shrink::Underflow(None)),
        Node::Three {
            left: None,
            k0,
            middle: None,
            k1,
            right: None,
        } => (k0, Shrink::Kept(Node::leaf(k1))),
        Node::Two {
            left: Some(left),
            k0,
            middle: Some(middle),
        } => {
            let (min, child) = take_min(*left);
            (min, rejoin_two_left(child, k0, middle))
        }
        Node::Three {
            left: Some(left),
            k0,
            middle: Some(middle),
            k1,
            right: Some(right),
        } => {
            let (min, child) = take_min(*left);
            (
                min,
                Shrink::Kept(rejoin_three_left(child, k0, middle, k1, right)),
            )
        }
        _ => malformed(),
    }
}

/// Reattach the left child of a 2-node parent.
fn rejoin_two_left<K>(child: Shrink<K>, k0: K, middle: Box<Node<K>>) -> Shrink<K> {
    let hole = match child {
        Shrink::Kept(node) => {
            return Shrink::Kept(Node::Two {
                left: Some(Box::new(node)),
                k0,
                middle: Some(middle),
            })
        }
        Shrink::Underflow(hole) => hole,
    };

    match *middle {
        // k0 drops into the hole, the sibling's smaller key takes its place
        Node::Three {
            left: ml,
            k0: m0,
            middle: mm,
            k1: m1,
            right: mr,
        } => Shrink::Kept(Node::Two {
            left: Some(Box::new(Node::Two {
                left: hole,
                k0,
                middle: ml,
            })),
            k0: m0,
            middle: Some(Box::new(Node::Two {
                left: mm,
                k0: m1,
                middle: mr,
            })),
        }),
        // both children hold one key: merge and push the hole upward
        Node::Two {
            left: ml,
            k0: m0,
            middle: mm,
        } => Shrink::Underflow(Some(Box::new(Node::Three {
            left: hole,
            k0,
            middle: ml,
            k1: m0,
            right: mm,
        }))),
    }
}

/// Reattach the middle (rightmost) child of a 2-node parent.
fn rejoin_two_middle<K>(left: Box<Node<K>>, k0: K, child: Shrink<K>) -> Shrink<K> {
    let hole = match child {
        Shrink::Kept(node) => {
            return Shrink::Kept(Node::Two {
                left: Some(left),
                k0,
                middle: Some(Box::new(node)),
            })
        }
        Shrink::Underflow(hole) => hole,
    };

    match *left {
        Node::Three {
            left: ll,
            k0: l0,
            middle: lm,
            k1: l1,
            right: lr,
        } => Shrink::Kept(Node::Two {
            left: Some(Box::new(Node::Two {
                left: ll,
                k0: l0,
                middle: lm,
            })),
            k0: l1,
            middle: Some(Box::new(Node::Two {
                left: lr,
                k0,
                middle: hole,
            })),
        }),
        Node::Two {
            left: ll,
            k0: l0,
            middle: lm,
        } => Shrink::Underflow(Some(Box::new(Node::Three {
            left: ll,
            k0: l0,
            middle: lm,
            k1: k0,
            right: hole,
        }))),
    }
}

/// Reattach the left child of a 3-node parent. A 3-node parent can always
/// absorb a merge, so the result never underflows.
fn rejoin_three_left<K>(
    child: Shrink<K>,
    k0: K,
    middle: Box<Node<K>>,
    k1: K,
    right: Box<Node<K>>,
) -> Node<K> {
    let hole = match child {
        Shrink::Kept(node) => {
            return Node::Three {
                left: Some(Box::new(node)),
                k0,
                middle: Some(middle),
                k1,
                right: Some(right),
            }
        }
        Shrink::Underflow(hole) => hole,
    };

    match *middle {
        Node::Three {
            left: ml,
            k0: m0,
            middle: mm,
            k1: m1,
            right: mr,
        } => Node::Three {
            left: Some(Box::new(Node::Two {
                left: hole,
                k0,
                middle: ml,
            })),
            k0: m0,
            middle: Some(Box::new(Node::Two {
                left: mm,
                k0: m1,
                middle: mr,
            })),
            k1,
            right: Some(right),
        },
        Node::Two {
            left: ml,
            k0: m0,
            middle: mm,
        } => Node::Two {
            left: Some(Box::new(Node::Three {
                left: hole,
                k0,
                middle: ml,
                k1: m0,
                right: mm,
            })),
            k0: k1,
            middle: Some(right),
        },
    }
}

/// Reattach the middle child of a 3-node parent.
///
/// Borrowing prefers the left sibling, then the right one; with no spare key
/// on either side the hole merges into the left sibling.
fn rejoin_three_middle<K>(
    left: Box<Node<K>>,
    k0: K,
    child: Shrink<K>,
    k1: K,
    right: Box<Node<K>>,
) -> Node<K> {
    let hole = match child {
        Shrink::Kept(node) => {
            return Node::Three {
                left: Some(left),
                k0,
                middle: Some(Box::new(node)),
                k1,
                right: Some(right),
            }
        }
        Shrink::Underflow(hole) => hole,
    };

    match (*left, *right) {
        (
            Node::Three {
                left: ll,
                k0: l0,
                middle: lm,
                k1: l1,
                right: lr,
            },
            right,
        ) => Node::Three {
            left: Some(Box::new(Node::Two {
                left: ll,
                k0: l0,
                middle: lm,
            })),
            k0: l1,
            middle: Some(Box::new(Node::Two {
                left: lr,
                k0,
                middle: hole,
            })),
            k1,
            right: Some(Box::new(right)),
        },
        (
            left @ Node::Two { .. },
            Node::Three {
                left: rl,
                k0: r0,
                middle: rm,
                k1: r1,
                right: rr,
            },
        ) => Node::Three {
            left: Some(Box::new(left)),
            k0,
            middle: Some(Box::new(Node::Two {
                left: hole,
                k0: k1,
                middle: rl,
            })),
            k1: r0,
            right: Some(Box::new(Node::Two {
                left: rm,
                k0: r1,
                middle: rr,
            })),
        },
        (
            Node::Two {
                left: ll,
                k0: l0,
                middle: lm,
            },
            right,
        ) => Node::Two {
            left: Some(Box::new(Node::Three {
                left: ll,
                k0: l0,
                middle: lm,
                k1: k0,
                right: hole,
            })),
            k0: k1,
            middle: Some(Box::new(right)),
        },
    }
}

/// Reattach the right child of a 3-node parent.
fn rejoin_three_right<K>(
    left: Box<Node<K>>,
    k0: K,
    middle: Box<Node<K>>,
    k1: K,
    child: Shrink<K>,
) -> Node<K> {
    let hole = match child {
        Shrink::Kept(node) => {
            return Node::Three {
                left: Some(left),
                k0,
                middle: Some(middle),
                k1,
                right: Some(Box::new(node)),
            }
        }
        Shrink::Underflow(hole) => hole,
    };

    match *middle {
        Node::Three {
            left: ml,
            k0: m0,
            middle: mm,
            k1: m1,
            right: mr,
        } => Node::Three {
            left: Some(left),
            k0,
            middle: Some(Box::new(Node::Two {
                left: ml,
                k0: m0,
                middle: mm,
            })),
            k1: m1,
            right: Some(Box::new(Node::Two {
                left: mr,
                k0: k1,
                middle: hole,
            })),
        },
        Node::Two {
            left: ml,
            k0: m0,
            middle: mm,
        } => Node::Two {
            left: Some(left),
            k0,
            middle: Some(Box::new(Node::Three {
                left: ml,
                k0: m0,
                middle: mm,
                k1,
                right: hole,
            })),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: i32) -> Box<Node<i32>> {
        Box::new(Node::leaf(key))
    }

    fn removed(result: Removal<i32>) -> Shrink<i32> {
        match result {
            Removal::Removed(shrink) => shrink,
            Removal::Absent(_) => panic!("expected the key to be removed"),
        }
    }

    fn kept(shrink: Shrink<i32>) -> Node<i32> {
        match shrink {
            Shrink::Kept(node) => node,
            Shrink::Underflow(_) => panic!("expected the subtree to keep its height"),
        }
    }

    #[test]
    fn test_remove_from_leaf() {
        assert!(matches!(
            remove(Node::leaf(4), &4),
            Removal::Removed(Shrink::Underflow(None))
        ));
        assert_eq!(kept(removed(remove(Node::leaf3(4, 8), &4))), Node::leaf(8));
        assert_eq!(kept(removed(remove(Node::leaf3(4, 8), &8))), Node::leaf(4));
        assert!(matches!(remove(Node::leaf3(4, 8), &6), Removal::Absent(_)));
    }

    #[test]
    fn test_absent_key_returns_same_tree() {
        let tree = Node::branch(Node::leaf3(1, 2), 5, Node::leaf(9));
        match remove(tree.clone(), &7) {
            Removal::Absent(node) => assert_eq!(node, tree),
            Removal::Removed(_) => panic!("nothing should have been removed"),
        }
    }

    #[test]
    fn test_borrow_from_right_sibling() {
        let tree = Node::branch(Node::leaf(1), 5, Node::leaf3(7, 9));
        let node = kept(removed(remove(tree, &1)));
        assert_eq!(node, Node::branch(Node::leaf(5), 7, Node::leaf(9)));
    }

    #[test]
    fn test_borrow_from_left_sibling() {
        let tree = Node::branch(Node::leaf3(1, 3), 5, Node::leaf(9));
        let node = kept(removed(remove(tree, &9)));
        assert_eq!(node, Node::branch(Node::leaf(1), 3, Node::leaf(5)));
    }

    #[test]
    fn test_merge_underflows_two_node_parent() {
        let tree = Node::branch(Node::leaf(1), 5, Node::leaf(9));
        match removed(remove(tree, &9)) {
            Shrink::Underflow(Some(node)) => assert_eq!(*node, Node::leaf3(1, 5)),
            other => panic!("expected a merged orphan, got {other:?}"),
        }
    }

    #[test]
    fn test_middle_child_borrows_from_right_when_left_is_minimal() {
        let tree = Node::Three {
            left: Some(leaf(1)),
            k0: 5,
            middle: Some(leaf(6)),
            k1: 10,
            right: Some(Box::new(Node::leaf3(11, 12))),
        };
        let node = kept(removed(remove(tree, &6)));
        assert_eq!(
            node,
            Node::Three {
                left: Some(leaf(1)),
                k0: 5,
                middle: Some(leaf(10)),
                k1: 11,
                right: Some(leaf(12)),
            }
        );
    }

    #[test]
    fn test_middle_child_merges_left_when_no_spare_keys() {
        let tree = Node::Three {
            left: Some(leaf(1)),
            k0: 5,
            middle: Some(leaf(6)),
            k1: 10,
            right: Some(leaf(12)),
        };
        let node = kept(removed(remove(tree, &6)));
        assert_eq!(node, Node::branch(Node::leaf3(1, 5), 10, Node::leaf(12)));
    }

    #[test]
    fn test_internal_key_replaced_by_predecessor() {
        let tree = Node::branch(Node::leaf3(1, 3), 5, Node::leaf(9));
        let node = kept(removed(remove(tree, &5)));
        assert_eq!(node, Node::branch(Node::leaf(1), 3, Node::leaf(9)));
    }

    #[test]
    fn test_right_key_replaced_by_successor() {
        let tree = Node::Three {
            left: Some(leaf(1)),
            k0: 5,
            middle: Some(leaf(6)),
            k1: 10,
            right: Some(Box::new(Node::leaf3(11, 12))),
        };
        let node = kept(removed(remove(tree, &10)));
        assert_eq!(*node.key(1), 11);
        assert_eq!(*node.child(2), Node::leaf(12));
    }

    #[test]
    fn test_take_min_and_max() {
        let tree = Node::branch(Node::leaf3(1, 2), 5, Node::leaf3(7, 9));
        let (min, rest) = take_min(tree.clone());
        assert_eq!(min, 1);
        assert_eq!(kept(rest), Node::branch(Node::leaf(2), 5, Node::leaf3(7, 9)));

        let (max, rest) = take_max(tree);
        assert_eq!(max, 9);
        assert_eq!(kept(rest), Node::branch(Node::leaf3(1, 2), 5, Node::leaf(7)));
    }
}
