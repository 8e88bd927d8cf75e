//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and the direct-summation
//! gravity used by the engine.

use crate::state::SystemState;
use nalgebra::Vector3;

pub mod gravity;


pub use gravity::DirectGravity;

/// A source of force on bodies in an N-body system
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
/// system.add_body(1.0, Point3::origin(), Vector3::zeros(), Color::WHITE);
/// system.add_body(1.0, Point3::new(2.0, 0.0, 0.0), Vector3::zeros(), Color::WHITE);
///
/// let gravity = DirectGravity::new(1.0);
/// let force = gravity.force(0, &system);
///
/// // Pulled toward the second body, G * 1 * 1 / 2²
/// assert!((force.x - 0.25).abs() < 1e-12);
/// ```
pub trait ForceModel: Send + Sync {
    /// Compute the net force on body at index `idx` given the full system state
    fn force(&self, idx: usize, state: &SystemState) -> Vector3<f64>;

    /// Compute acceleration on body at index `idx`
    fn acceleration(&self, idx: usize, state: &SystemState) -> Vector3<f64> {
        self.force(idx, state) / state.bodies[idx].mass
    }

    /// Compute potential energy contribution (optional)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _state: &SystemState) -> f64 {
        0.0
    }
}
