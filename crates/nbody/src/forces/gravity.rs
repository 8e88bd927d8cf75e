//! Direct N-body gravity (O(N²) implementation)

use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::{Point3, Vector3};

/// Direct O(N²) gravitational force computation
///
/// Sums Newton's attraction from every other body. A body never pulls on
/// itself; that exclusion is by index, so two distinct bodies that happen to
/// share coordinates are still distinct. Such a coincident pair has no
/// defined direction and contributes zero force unless softening is set.
///
/// # Examples
///
/// ```
/// use nbody::body::Color;
/// use nbody::forces::{DirectGravity, ForceModel};
/// use nbody::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0, Point3::new(1.0, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
/// system.add_body(1.0e3, Point3::origin(), Vector3::zeros(), Color::WHITE);
///
/// let gravity = DirectGravity::new(6.6742e-11);
/// let force = gravity.force(0, &system);
///
/// // Should point toward the heavy body (negative x direction)
/// assert!(force.x < 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DirectGravity {
    /// Gravitational constant (already scaled)
    pub g: f64,
    /// Optional softening length to prevent singularities
    pub softening: f64,
}

impl DirectGravity {
    /// Creates a new direct gravity force with no softening
    pub fn new(g: f64) -> Self {
        Self { g, softening: 0.0 }
    }

    /// Creates a new direct gravity force with specified softening length
    pub fn with_softening(g: f64, softening: f64) -> Self {
        Self { g, softening }
    }

    /// Force exerted on a body of mass `m_b` at `b` by a body of mass `m_m` at `m`
    #[inline]
    fn pairwise(&self, b: Point3<f64>, m_b: f64, m: Point3<f64>, m_m: f64) -> Vector3<f64> {
        let dr = m - b;
        let r2 = dr.magnitude_squared() + self.softening * self.softening;
        if r2 == 0.0 {
            return Vector3::zeros();
        }
        let r = r2.sqrt();

        // |F| = G m_m m_b / r², along the unit vector dr / r
        dr * (self.g * m_m * m_b / (r2 * r))
    }
}

impl ForceModel for DirectGravity {
    fn force(&self, idx: usize, state: &SystemState) -> Vector3<f64> {
        let body = &state.bodies[idx];

        state
            .bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, other)| self.pairwise(body.position, body.mass, other.position, other.mass))
            .fold(Vector3::zeros(), |acc, f| acc + f)
    }

    fn potential_energy(&self, state: &SystemState) -> f64 {
        let eps2 = self.softening * self.softening;

        // Each pair counted once; coincident unsoftened pairs are skipped
        state
            .bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                state.bodies[i + 1..].iter().filter_map(move |b| {
                    let r2 = (a.position - b.position).magnitude_squared() + eps2;
                    (r2 > 0.0).then(|| -self.g * a.mass * b.mass / r2.sqrt())
                })
            })
            .sum()
    }
}
