//! The simulation engine
//!
//! [`Simulation`] owns the body list and is the only thing that mutates it.
//! Callers add and remove bodies, advance the clock one fixed step at a
//! time, and read back positions or a serializable snapshot for display.
//!
//! Each [`step`](Simulation::step):
//! 1. computes every pairwise gravitational force from current positions,
//! 2. updates every velocity, then every position (semi-implicit Euler),
//! 3. scans for the first pair of bodies in contact and resolves it.
//!
//! At most one collision is resolved per step.
//!
//! # Example
//!
//! ```
//! use nbody::body::Color;
//! use nbody::config::SimulationConfig;
//! use nbody::simulation::Simulation;
//! use nalgebra::{Point3, Vector3};
//!
//! let mut sim = Simulation::new(SimulationConfig::default().with_time_step(0.5)).unwrap();
//! sim.add_body(Point3::origin(), Vector3::new(2.0, 0.0, 0.0), 1.0, Color::WHITE)
//!     .unwrap();
//!
//! sim.step();
//! sim.step();
//!
//! assert_eq!(sim.body_positions(), vec![Point3::new(2.0, 0.0, 0.0)]);
//! assert_eq!(sim.time(), 1.0);
//! ```

use log::{debug, trace, warn};
use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::body::{Body, BodyId, Color};
use crate::collisions::{
    CollisionDetector, CollisionOutcome, DirectDetector, TreeDetector, resolve_contact,
};
use crate::config::{CollisionMode, DetectorKind, SimulationConfig};
use crate::error::SimulationError;
use crate::forces::{DirectGravity, ForceModel};
use crate::integrator::{Integrator, SymplecticEuler};
use crate::state::SystemState;

enum DetectorType {
    Direct(DirectDetector),
    Tree(TreeDetector),
}

impl DetectorType {
    fn from_kind(kind: DetectorKind) -> Self {
        match kind {
            DetectorKind::Direct => DetectorType::Direct(DirectDetector),
            DetectorKind::Tree => DetectorType::Tree(TreeDetector),
        }
    }

    fn as_detector(&self) -> &dyn CollisionDetector {
        match self {
            DetectorType::Direct(d) => d,
            DetectorType::Tree(d) => d,
        }
    }
}

/// Summary of one call to [`Simulation::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Simulation time after the step
    pub time: f64,
    /// The collision resolved during this step, if any
    pub collision: Option<CollisionOutcome>,
}

/// Body state snapshot for a presentation layer
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u32,
    pub mass: f64,
    /// Radius derived from mass and the configured density
    pub radius: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub color: Color,
}

/// Complete simulation state snapshot
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub time: f64,
    pub collision_mode: CollisionMode,
    pub bodies: Vec<BodySnapshot>,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    /// Kinetic plus potential; drifts slowly with the integrator's error
    pub total_energy: f64,
}

/// A self-contained N-body simulation
pub struct Simulation {
    config: SimulationConfig,
    state: SystemState,
    integrator: SymplecticEuler,
    gravity: DirectGravity,
    detector: DetectorType,
    collision_mode: CollisionMode,
}

impl Simulation {
    /// Creates an empty simulation
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidConfig`] if any constant is out of
    /// range (see [`SimulationConfig::validate`]).
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        Ok(Self {
            gravity: DirectGravity::with_softening(config.effective_g(), config.softening),
            detector: DetectorType::from_kind(config.detector),
            collision_mode: config.collision_mode,
            integrator: SymplecticEuler,
            state: SystemState::new(),
            config,
        })
    }

    /// Adds a body and returns its ID
    ///
    /// # Errors
    ///
    /// - [`SimulationError::InvalidMass`] if `mass` is not finite and positive
    /// - [`SimulationError::NonFiniteVector`] if `position` or `velocity` has a
    ///   NaN or infinite component
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::Color;
    /// use nbody::config::SimulationConfig;
    /// use nbody::error::SimulationError;
    /// use nbody::simulation::Simulation;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    ///
    /// let rejected = sim.add_body(Point3::origin(), Vector3::zeros(), 0.0, Color::WHITE);
    /// assert_eq!(rejected, Err(SimulationError::InvalidMass(0.0)));
    /// assert_eq!(sim.body_count(), 0);
    /// ```
    pub fn add_body(
        &mut self,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        mass: f64,
        color: Color,
    ) -> Result<BodyId, SimulationError> {
        let validation = if !(mass.is_finite() && mass > 0.0) {
            Err(SimulationError::InvalidMass(mass))
        } else if !position.coords.iter().all(|c| c.is_finite()) {
            Err(SimulationError::NonFiniteVector { field: "position" })
        } else if !velocity.iter().all(|c| c.is_finite()) {
            Err(SimulationError::NonFiniteVector { field: "velocity" })
        } else {
            Ok(())
        };

        if let Err(err) = validation {
            warn!("rejected body: {err}");
            return Err(err);
        }

        let id = self.state.add_body(mass, position, velocity, color);
        debug!(
            "added body {} (mass {mass}), {} bodies",
            id.0,
            self.state.body_count()
        );
        Ok(id)
    }

    /// Removes the most recently added body still present
    ///
    /// Returns `None`, and does nothing, when there are no bodies.
    pub fn remove_previous_body(&mut self) -> Option<Body> {
        let removed = self.state.remove_last();
        if let Some(body) = &removed {
            debug!(
                "removed body {}, {} bodies",
                body.id.0,
                self.state.body_count()
            );
        }
        removed
    }

    /// Advances the simulation by one configured time step
    pub fn step(&mut self) -> StepReport {
        self.integrator
            .step(&mut self.state, self.config.time_step, &self.gravity);

        let collision = self
            .detector
            .as_detector()
            .first_contact(&self.state, self.config.density)
            .map(|contact| resolve_contact(&mut self.state, contact, self.collision_mode));

        match collision {
            Some(CollisionOutcome::Skipped { first, second }) => warn!(
                "skipped elastic collision between bodies {} and {}: centers coincide",
                first.0, second.0
            ),
            Some(outcome) => debug!(
                "t={}: {:?}, {} bodies",
                self.state.time,
                outcome,
                self.state.body_count()
            ),
            None => {}
        }
        trace!(
            "t={} bodies={}",
            self.state.time,
            self.state.body_count()
        );

        StepReport {
            time: self.state.time,
            collision,
        }
    }

    /// Advances the simulation by `n_steps` steps
    ///
    /// # Returns
    ///
    /// Final time after integration
    pub fn run(&mut self, n_steps: usize) -> f64 {
        for _ in 0..n_steps {
            self.step();
        }
        self.state.time
    }

    /// Snapshot of every body position, in body order
    pub fn body_positions(&self) -> Vec<Point3<f64>> {
        self.state.positions()
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.state.body_count()
    }

    /// Switches between elastic and inelastic resolution for later steps
    pub fn set_elastic_collision_mode(&mut self, elastic: bool) {
        self.set_collision_mode(CollisionMode::from_elastic(elastic));
    }

    pub fn set_collision_mode(&mut self, mode: CollisionMode) {
        if mode != self.collision_mode {
            debug!("collision mode {:?} -> {:?}", self.collision_mode, mode);
        }
        self.collision_mode = mode;
    }

    pub fn collision_mode(&self) -> CollisionMode {
        self.collision_mode
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current simulation time
    pub fn time(&self) -> f64 {
        self.state.time
    }

    /// Read-only view of the bodies, in body order
    pub fn bodies(&self) -> &[Body] {
        &self.state.bodies
    }

    /// Read-only view of the full system state
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        self.state.total_momentum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    pub fn potential_energy(&self) -> f64 {
        self.gravity.potential_energy(&self.state)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Serializable view of the whole simulation
    pub fn snapshot(&self) -> SimulationSnapshot {
        let density = self.config.density;
        let kinetic_energy = self.kinetic_energy();
        let potential_energy = self.potential_energy();

        SimulationSnapshot {
            time: self.state.time,
            collision_mode: self.collision_mode,
            bodies: self
                .state
                .bodies
                .iter()
                .map(|b| BodySnapshot {
                    id: b.id.0,
                    mass: b.mass,
                    radius: b.radius(density),
                    position: [b.position.x, b.position.y, b.position.z],
                    velocity: [b.velocity.x, b.velocity.y, b.velocity.z],
                    color: b.color,
                })
                .collect(),
            kinetic_energy,
            potential_energy,
            total_energy: kinetic_energy + potential_energy,
        }
    }
}
