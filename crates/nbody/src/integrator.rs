//! Time integration for N-body systems
//!
//! The engine uses semi-implicit (symplectic) Euler: every velocity is
//! updated from the forces at the current positions, and only then is every
//! position advanced with the new velocities.

use crate::forces::ForceModel;
use crate::state::SystemState;
use nalgebra::Vector3;

/// A time integrator for N-body systems
///
/// Integrators advance the system state forward in time by computing
/// accelerations from force models and updating positions and velocities.
pub trait Integrator: Send + Sync {
    /// Advance the system by one timestep
    ///
    /// # Arguments
    ///
    /// * `state` - Current system state (modified in place)
    /// * `dt` - Timestep
    /// * `force` - Force model to compute accelerations
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel);

    /// Advance the system by multiple timesteps
    ///
    /// # Returns
    ///
    /// Final time after integration
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(state, dt, force);
        }
        state.time
    }
}

/// Semi-implicit Euler integrator (1st order, symplectic)
///
/// Two full passes over the body list per step:
///
/// 1. Kick: v(t + dt) = v(t) + F(x(t)) / m * dt, for every body
/// 2. Drift: x(t + dt) = x(t) + v(t + dt) * dt, for every body
///
/// No position moves until every force has been computed, so the result
/// does not depend on body order.
///
/// # Examples
///
/// ```
/// use nbody::body::Color;
/// use nbody::forces::DirectGravity;
/// use nbody::integrator::{Integrator, SymplecticEuler};
/// use nbody::state::SystemState;
/// use nalgebra::{Point3, Vector3};
///
/// let mut system = SystemState::new();
/// system.add_body(1.0, Point3::origin(), Vector3::new(2.0, 4.0, 6.0), Color::WHITE);
///
/// SymplecticEuler.step(&mut system, 1.0, &DirectGravity::new(1.0));
///
/// assert_eq!(system.bodies[0].position, Point3::new(2.0, 4.0, 6.0));
/// assert_eq!(system.time, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SymplecticEuler;

impl SymplecticEuler {
    /// Update every velocity from forces at the current positions
    fn kick(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        // All forces are read before any velocity is written
        let accelerations: Vec<Vector3<f64>> = (0..state.bodies.len())
            .map(|i| force.acceleration(i, state))
            .collect();

        state
            .bodies
            .iter_mut()
            .zip(accelerations.iter())
            .for_each(|(body, accel)| {
                body.velocity += accel * dt;
            });
    }

    /// Update every position from the already-updated velocities
    fn drift(&self, state: &mut SystemState, dt: f64) {
        state.bodies.iter_mut().for_each(|body| {
            body.position += body.velocity * dt;
        });
    }
}

impl Integrator for SymplecticEuler {
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        self.kick(state, dt, force);
        self.drift(state, dt);
        state.time += dt;
    }
}
