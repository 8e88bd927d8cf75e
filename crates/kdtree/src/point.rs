//! Fixed-dimension point primitives
//!
//! Points and vectors are plain `nalgebra` types, so arithmetic and dot
//! products come for free. This module adds the pieces the tree needs on top:
//! a total order over whole points and the per-dimension comparison used to
//! split the tree.

use std::cmp::Ordering;

use nalgebra::SVector;

/// A point in `D`-dimensional space
pub type Point<const D: usize> = nalgebra::Point<f64, D>;

/// A displacement in `D`-dimensional space
pub type Vector<const D: usize> = SVector<f64, D>;

/// Lexicographic total order over whole points
///
/// Coordinates are compared with `f64::total_cmp`, so the order is total
/// even for signed zeros. Used to break ties wherever two points compare
/// equal along a single dimension or sit at the same distance from a query.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use kdtree::point::{total_cmp, Point};
///
/// let a = Point::<3>::new(1.0, 2.0, 3.0);
/// let b = Point::<3>::new(1.0, 2.0, 4.0);
/// assert_eq!(total_cmp(&a, &b), Ordering::Less);
/// assert_eq!(total_cmp(&a, &a), Ordering::Equal);
/// ```
pub fn total_cmp<const D: usize>(a: &Point<D>, b: &Point<D>) -> Ordering {
    a.coords
        .iter()
        .zip(b.coords.iter())
        .map(|(x, y)| x.total_cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Compares two points along `dim`, falling back to [`total_cmp`] on a tie
pub fn cmp_along<const D: usize>(a: &Point<D>, b: &Point<D>, dim: usize) -> Ordering {
    a[dim]
        .total_cmp(&b[dim])
        .then_with(|| total_cmp(a, b))
}

/// Squared Euclidean distance
#[inline]
pub fn distance_squared<const D: usize>(a: &Point<D>, b: &Point<D>) -> f64 {
    (a - b).norm_squared()
}

/// Returns true when every coordinate is finite
pub fn is_finite<const D: usize>(p: &Point<D>) -> bool {
    p.coords.iter().all(|c| c.is_finite())
}
