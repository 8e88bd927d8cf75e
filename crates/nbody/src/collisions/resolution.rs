//! Collision resolution
//!
//! A contact is resolved one of two ways:
//! - Elastic: both bodies survive and exchange momentum along the line
//!   between their centers, conserving momentum and kinetic energy.
//! - Inelastic: the bodies merge, conserving mass and momentum.

use crate::body::{Body, BodyId};
use crate::collisions::Contact;
use crate::config::CollisionMode;
use crate::state::SystemState;
use nalgebra::{Point3, Vector3};

/// What happened when a contact was resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// Both bodies survived with new velocities
    Bounced { first: BodyId, second: BodyId },
    /// `absorbed` was merged into `survivor` and removed
    Merged { survivor: BodyId, absorbed: BodyId },
    /// Elastic resolution skipped because the centers coincide
    Skipped { first: BodyId, second: BodyId },
}

/// Post-collision velocities for a two-body elastic collision
///
/// ```text
/// v1' = v1 - 2 m2 / (m1 + m2) * <v1 - v2, p1 - p2> / |p1 - p2|² * (p1 - p2)
/// v2' = v2 - 2 m1 / (m1 + m2) * <v2 - v1, p2 - p1> / |p2 - p1|² * (p2 - p1)
/// ```
///
/// # Returns
///
/// `None` when the centers coincide and the collision normal is undefined
///
/// # Examples
///
/// ```
/// use nbody::body::Body;
/// use nbody::collisions::elastic_velocities;
/// use nalgebra::Vector3;
///
/// // Equal masses, head-on: velocities swap
/// let a = Body::new(1.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
/// let b = Body::new(1.0, [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]);
///
/// let (va, vb) = elastic_velocities(&a, &b).unwrap();
/// assert!((va - Vector3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
/// assert!((vb - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
/// ```
pub fn elastic_velocities(a: &Body, b: &Body) -> Option<(Vector3<f64>, Vector3<f64>)> {
    let dp = a.position - b.position;
    let dist_sq = dp.magnitude_squared();
    if dist_sq == 0.0 {
        return None;
    }

    let total_mass = a.mass + b.mass;
    let dv = a.velocity - b.velocity;

    let va = a.velocity - dp * (2.0 * b.mass / total_mass * dv.dot(&dp) / dist_sq);
    let vb = b.velocity - (-dp) * (2.0 * a.mass / total_mass * (-dv).dot(&(-dp)) / dist_sq);

    Some((va, vb))
}

/// Merge two bodies, conserving mass and momentum
///
/// The merged body:
/// - Mass: m = m_a + m_b
/// - Velocity: v = (m_a v_a + m_b v_b) / (m_a + m_b)
/// - Position: midpoint of the two centers
/// - Color: channel-wise average
/// - Id: taken from `a`
///
/// # Examples
///
/// ```
/// use nbody::collisions::merge_bodies;
/// use nbody::body::Body;
///
/// let a = Body::new(1.0, [1.0, 0.0, 0.0], [0.0, 5.0, 0.0]);
/// let b = Body::new(3.0, [2.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
///
/// let merged = merge_bodies(&a, &b);
///
/// // Mass is conserved
/// assert!((merged.mass - 4.0).abs() < 1e-12);
///
/// // Momentum is conserved
/// let p_initial = a.momentum() + b.momentum();
/// assert!((merged.momentum() - p_initial).norm() < 1e-12);
/// ```
pub fn merge_bodies(a: &Body, b: &Body) -> Body {
    let total_mass = a.mass + b.mass;

    let velocity = (a.momentum() + b.momentum()) / total_mass;
    let position = Point3::from((a.position.coords + b.position.coords) / 2.0);

    Body {
        id: a.id,
        mass: total_mass,
        position,
        velocity,
        color: a.color.average(&b.color),
    }
}

/// Resolve a detected contact in place
///
/// The surviving body of a merge is the lower-indexed one and keeps its slot
/// in `state.bodies`; the other body is removed, shifting later bodies down.
///
/// # Examples
///
/// ```
/// use nbody::body::Color;
/// use nbody::collisions::{resolve_contact, CollisionDetector, CollisionOutcome, DirectDetector};
/// use nbody::config::CollisionMode;
/// use nbody::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut system = SystemState::new();
/// let a = system.add_body(1.0, Point3::origin(), Vector3::zeros(), Color::WHITE);
/// let b = system.add_body(1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
///
/// let contact = DirectDetector.first_contact(&system, 1.0).unwrap();
/// let outcome = resolve_contact(&mut system, contact, CollisionMode::Inelastic);
///
/// assert_eq!(outcome, CollisionOutcome::Merged { survivor: a, absorbed: b });
/// assert_eq!(system.body_count(), 1);
/// ```
pub fn resolve_contact(
    state: &mut SystemState,
    contact: Contact,
    mode: CollisionMode,
) -> CollisionOutcome {
    let (lo, hi) = if contact.first < contact.second {
        (contact.first, contact.second)
    } else {
        (contact.second, contact.first)
    };

    match mode {
        CollisionMode::Elastic => resolve_elastic(state, contact.first, contact.second),
        CollisionMode::Inelastic => resolve_merge(state, lo, hi),
    }
}

fn resolve_elastic(state: &mut SystemState, i: usize, j: usize) -> CollisionOutcome {
    let (a, b) = (state.bodies[i], state.bodies[j]);

    match elastic_velocities(&a, &b) {
        Some((va, vb)) => {
            state.bodies[i].velocity = va;
            state.bodies[j].velocity = vb;
            CollisionOutcome::Bounced {
                first: a.id,
                second: b.id,
            }
        }
        None => CollisionOutcome::Skipped {
            first: a.id,
            second: b.id,
        },
    }
}

fn resolve_merge(state: &mut SystemState, lo: usize, hi: usize) -> CollisionOutcome {
    let absorbed = state.bodies.remove(hi);
    let survivor = &mut state.bodies[lo];
    *survivor = merge_bodies(survivor, &absorbed);

    CollisionOutcome::Merged {
        survivor: survivor.id,
        absorbed: absorbed.id,
    }
}
