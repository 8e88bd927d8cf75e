//! Fixed-dimension point primitives and a balanced k-d tree.
//!
//! The tree is built once from a snapshot of points and answers
//! nearest-neighbor and fixed-radius queries deterministically.

pub mod error;
pub mod point;
pub mod tree;

#[cfg(test)]
mod point_test;

pub use error::KdTreeError;
pub use point::{Point, Vector};
pub use tree::{KdTree, Neighbor};
