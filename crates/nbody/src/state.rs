use crate::body::{Body, BodyId, Color};
use nalgebra::{Point3, Vector3};

/// Complete state of an N-body system at a given time
///
/// Bodies are kept in insertion order. That order matters: the most recently
/// added body is the one [`remove_last`](Self::remove_last) takes, and
/// collision scans walk the bodies by index.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Current simulation time
    pub time: f64,
    /// Collection of bodies, in insertion order
    pub bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
}

impl SystemState {
    /// Creates an empty system at time zero
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::state::SystemState;
    ///
    /// let system = SystemState::new();
    ///
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new body and returns its ID
    ///
    /// No validation is done here; [`Simulation::add_body`] checks the mass
    /// and vectors before calling this.
    ///
    /// # Arguments
    ///
    /// * `mass` - Body mass
    /// * `position` - Initial position
    /// * `velocity` - Initial velocity
    /// * `color` - Display tag
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::Color;
    /// use nbody::state::SystemState;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let mut system = SystemState::new();
    /// let id = system.add_body(
    ///     5.0,
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Vector3::new(0.0, 1.0, 0.0),
    ///     Color::WHITE,
    /// );
    ///
    /// assert_eq!(system.body_count(), 1);
    /// assert_eq!(system.bodies[0].id, id);
    /// assert_eq!(system.bodies[0].mass, 5.0);
    /// ```
    ///
    /// [`Simulation::add_body`]: crate::simulation::Simulation::add_body
    pub fn add_body(
        &mut self,
        mass: f64,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        color: Color,
    ) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            mass,
            position,
            velocity,
            color,
        });
        id
    }

    /// Removes the most recently added body still in the system
    ///
    /// Returns `None` when there are no bodies.
    pub fn remove_last(&mut self) -> Option<Body> {
        self.bodies.pop()
    }

    /// Returns the number of bodies in the system
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Snapshot of every body position, index-aligned with `bodies`
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    /// Returns the total mass of all bodies
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Conserved by gravity and by both collision modes.
    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    /// Returns the total kinetic energy of all bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Mass-weighted mean position, or `None` for an empty system
    pub fn center_of_mass(&self) -> Option<Point3<f64>> {
        let total = self.total_mass();
        if self.bodies.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector3::zeros(), |acc, b| acc + b.position.coords * b.mass);
        Some(Point3::from(weighted / total))
    }
}
