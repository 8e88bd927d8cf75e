//! Collision detection using various strategies
//!
//! Bodies are treated as uniform spheres of a fixed density, so each radius
//! follows from the mass alone. Two bodies are in contact when the distance
//! between their centers is at most the sum of their radii.
//!
//! Detectors report only the *first* contact in scan order: outer index
//! ascending, inner index ascending. The engine resolves that one pair per
//! step; simultaneous multi-body contacts are worked off over successive
//! steps.
//!
//! Provides two implementations with identical results:
//! - DirectDetector: O(N²) pairwise scan
//! - TreeDetector: k-d tree broad-phase rebuilt on every call

use crate::body::Body;
use crate::state::SystemState;
use kdtree::KdTree;

/// A detected contact between the bodies at indices `first` and `second`
///
/// Contact is symmetric, so the first contact in scan order always has
/// `first < second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the first body in `state.bodies`
    pub first: usize,
    /// Index of the second body in `state.bodies`
    pub second: usize,
    /// Squared distance between the centers
    pub distance_squared: f64,
    /// Sum of the two radii
    pub contact_radius: f64,
}

/// Squared distance and radius sum for a pair that touches or overlaps
///
/// Compares squared distance with the squared radius sum, so no square root
/// is taken.
fn check_pair(a: &Body, b: &Body, density: f64) -> Option<(f64, f64)> {
    let distance_squared = a.distance_squared_to(b);
    let contact_radius = a.radius(density) + b.radius(density);

    (distance_squared <= contact_radius * contact_radius)
        .then_some((distance_squared, contact_radius))
}

fn contact_at(state: &SystemState, i: usize, j: usize, density: f64) -> Option<Contact> {
    check_pair(&state.bodies[i], &state.bodies[j], density).map(
        |(distance_squared, contact_radius)| Contact {
            first: i,
            second: j,
            distance_squared,
            contact_radius,
        },
    )
}

/// Collision detector trait
///
/// Different implementations offer tradeoffs in cost, but every
/// implementation must report the same contact for the same state.
pub trait CollisionDetector: Send + Sync {
    /// Find the first contact in scan order, if any
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state
    /// * `density` - Mass density used to derive radii
    fn first_contact(&self, state: &SystemState, density: f64) -> Option<Contact>;
}

/// Direct O(N²) collision detector
///
/// Checks ordered pairs `(i, j)`, `i != j`, and stops at the first one in
/// contact.
///
/// # Examples
///
/// ```
/// use nbody::body::Color;
/// use nbody::collisions::{CollisionDetector, DirectDetector};
/// use nbody::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0, Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
/// system.add_body(1.0, Point3::new(5.0, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
/// system.add_body(1.0, Point3::new(1.5, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
///
/// // Unit density: every radius is 1.0
/// let contact = DirectDetector.first_contact(&system, 1.0).unwrap();
/// assert_eq!((contact.first, contact.second), (0, 2));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn first_contact(&self, state: &SystemState, density: f64) -> Option<Contact> {
        let n = state.bodies.len();

        (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .find_map(|(i, j)| contact_at(state, i, j, density))
    }
}

/// Tree-based collision detector using a k-d tree broad-phase
///
/// Positions change every step, so the tree is rebuilt on every call. For
/// body `i` the tree returns every body within `r_i + r_max`, which is a
/// superset of the bodies that can touch `i`; the exact contact test then
/// runs on that shortlist. Taking the smallest matching `j` for the smallest
/// `i` reproduces the direct scan order exactly.
///
/// # Examples
///
/// ```
/// use nbody::body::Color;
/// use nbody::collisions::{CollisionDetector, DirectDetector, TreeDetector};
/// use nbody::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0, Point3::new(0.0, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
/// system.add_body(1.0, Point3::new(1.0, 0.5, 0.0), Vector3::zeros(), Color::WHITE);
///
/// assert_eq!(
///     TreeDetector.first_contact(&system, 1.0),
///     DirectDetector.first_contact(&system, 1.0),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeDetector;

impl CollisionDetector for TreeDetector {
    fn first_contact(&self, state: &SystemState, density: f64) -> Option<Contact> {
        if state.bodies.len() < 2 {
            return None;
        }

        let positions = state.positions();
        let tree = match KdTree::build(&positions) {
            Ok(tree) => tree,
            Err(err) => {
                // Non-finite positions cannot be indexed; fall back to the exact scan
                log::warn!("k-d tree broad-phase unavailable ({err}), using direct scan");
                return DirectDetector.first_contact(state, density);
            }
        };

        let max_radius = state
            .bodies
            .iter()
            .map(|b| b.radius(density))
            .fold(0.0_f64, f64::max);

        state.bodies.iter().enumerate().find_map(|(i, body)| {
            let search_radius = body.radius(density) + max_radius;

            tree.within_radius(&body.position, search_radius)
                .into_iter()
                .filter(|&j| j != i)
                .filter_map(|j| contact_at(state, i, j, density))
                .min_by_key(|contact| contact.second)
        })
    }
}
