use thiserror::Error;

/// Errors reported by [`KdTree`](crate::KdTree)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KdTreeError {
    /// A query was made against a tree with no points
    #[error("nearest-neighbor query on an empty tree")]
    Empty,

    /// An input point had a NaN or infinite coordinate
    #[error("point {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}
