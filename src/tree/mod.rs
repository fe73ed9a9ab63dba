//! 2-3 tree implementation.
//!
//! This module provides an in-memory 2-3 tree that supports:
//! - Insertion with node splitting (add)
//! - Deletion with borrowing and merging (remove)
//! - Point lookups and min/max (search, find_min, find_max)
//! - In-, pre- and post-order traversal

mod engine;
mod insert;
mod node;
mod remove;
mod traverse;

pub use engine::Tree23;
pub use node::{Link, Node};
pub use traverse::Traversal;
