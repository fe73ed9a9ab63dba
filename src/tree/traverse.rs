//! Depth-first traversal iterators.
//!
//! A [`Traversal`] walks the tree with an explicit stack of pending visits,
//! so it borrows the tree read-only and never recurses. Each call to
//! [`Tree23::traverse`](crate::Tree23::traverse) starts a fresh walk.
//!
//! Node expansion per [`Order`]:
//!
//! | order      | sequence              |
//! |------------|-----------------------|
//! | in-order   | `L, k0, M, k1, R`     |
//! | pre-order  | `k0, L, M, k1, R`     |
//! | post-order | `L, M, k0, k1, R`     |
//!
//! `k1` and `R` are only present on a 3-node; children only on internal nodes.

use super::node::Node;
use crate::types::Order;
use std::iter::FusedIterator;

enum Visit<'a, K> {
    Key(&'a K),
    Node(&'a Node<K>),
}

impl<K> Clone for Visit<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Visit<'_, K> {}

/// Iterator over the keys of a tree in a chosen [`Order`]
pub struct Traversal<'a, K> {
    order: Order,
    /// Pending visits, next one on top
    stack: Vec<Visit<'a, K>>,
}

impl<'a, K> Traversal<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, order: Order) -> Self {
        Self {
            order,
            stack: root.map(Visit::Node).into_iter().collect(),
        }
    }

    /// The order this traversal emits keys in
    pub fn order(&self) -> Order {
        self.order
    }

    fn expand(&mut self, node: &'a Node<K>) {
        let (left, k0, middle, k1, right) = match node {
            Node::Two { left, k0, middle } => (left.as_deref(), k0, middle.as_deref(), None, None),
            Node::Three {
                left,
                k0,
                middle,
                k1,
                right,
            } => (
                left.as_deref(),
                k0,
                middle.as_deref(),
                Some(k1),
                right.as_deref(),
            ),
        };
        let left = left.map(Visit::Node);
        let middle = middle.map(Visit::Node);
        let right = right.map(Visit::Node);
        let k0 = Some(Visit::Key(k0));
        let k1 = k1.map(Visit::Key);

        let sequence = match self.order {
            Order::InOrder => [left, k0, middle, k1, right],
            Order::PreOrder => [k0, left, middle, k1, right],
            Order::PostOrder => [left, middle, k0, k1, right],
        };
        self.stack.extend(sequence.into_iter().rev().flatten());
    }
}

impl<'a, K> Iterator for Traversal<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            match self.stack.pop()? {
                Visit::Key(key) => return Some(key),
                Visit::Node(node) => self.expand(node),
            }
        }
    }
}

impl<K> FusedIterator for Traversal<'_, K> {}

impl<K> Clone for Traversal<'_, K> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            stack: self.stack.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(root: &Node<i32>, order: Order) -> Vec<i32> {
        Traversal::new(Some(root), order).copied().collect()
    }

    fn three_leaves() -> Node<i32> {
        Node::Three {
            left: Some(Box::new(Node::leaf(1))),
            k0: 5,
            middle: Some(Box::new(Node::leaf(6))),
            k1: 10,
            right: Some(Box::new(Node::leaf(12))),
        }
    }

    #[test]
    fn test_empty_traversal() {
        let mut walk = Traversal::<i32>::new(None, Order::InOrder);
        assert_eq!(walk.next(), None);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn test_two_node_orders() {
        let root = Node::branch(Node::leaf3(1, 2), 5, Node::leaf3(7, 9));
        assert_eq!(collect(&root, Order::InOrder), vec![1, 2, 5, 7, 9]);
        assert_eq!(collect(&root, Order::PreOrder), vec![5, 1, 2, 7, 9]);
        assert_eq!(collect(&root, Order::PostOrder), vec![1, 2, 7, 9, 5]);
    }

    #[test]
    fn test_three_node_orders() {
        let root = three_leaves();
        assert_eq!(collect(&root, Order::InOrder), vec![1, 5, 6, 10, 12]);
        assert_eq!(collect(&root, Order::PreOrder), vec![5, 1, 6, 10, 12]);
        assert_eq!(collect(&root, Order::PostOrder), vec![1, 6, 5, 10, 12]);
    }

    #[test]
    fn test_clone_resumes_from_same_position() {
        let root = three_leaves();
        let mut walk = Traversal::new(Some(&root), Order::InOrder);
        walk.next();
        walk.next();
        let rest: Vec<i32> = walk.clone().copied().collect();
        assert_eq!(rest, vec![6, 10, 12]);
        assert_eq!(walk.copied().collect::<Vec<_>>(), rest);
    }
}
