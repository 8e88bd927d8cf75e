//! Simulation configuration
//!
//! All physical constants the engine depends on live here and are handed to
//! [`Simulation::new`](crate::simulation::Simulation::new); nothing is
//! process-global.
//!
//! # Example
//!
//! ```
//! use nbody::config::{CollisionMode, DetectorKind, SimulationConfig};
//!
//! let config = SimulationConfig::visual()
//!     .with_time_step(0.01)
//!     .with_collision_mode(CollisionMode::Elastic)
//!     .with_detector(DetectorKind::Tree);
//!
//! assert!(config.validate().is_ok());
//! assert!((config.effective_g() - 66.742).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Newton's gravitational constant in SI units
pub const G_SI: f64 = 6.6742e-11;

/// Scale applied to `G` by [`SimulationConfig::visual`] so that bodies at
/// screen-sized distances move perceptibly
pub const VISUAL_GRAVITY_SCALE: f64 = 1.0e12;

/// How a detected contact is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Both bodies survive and bounce off each other
    Elastic,
    /// The two bodies merge into one
    #[default]
    Inelastic,
}

impl CollisionMode {
    pub fn from_elastic(elastic: bool) -> Self {
        if elastic {
            CollisionMode::Elastic
        } else {
            CollisionMode::Inelastic
        }
    }

    pub fn is_elastic(self) -> bool {
        self == CollisionMode::Elastic
    }
}

/// Which broad-phase finds candidate contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    /// Test every ordered pair
    #[default]
    Direct,
    /// Rebuild a k-d tree each step and test only nearby pairs
    Tree,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant before scaling
    pub gravitational_constant: f64,
    /// Multiplier applied to `gravitational_constant`
    pub gravity_scale: f64,
    /// Mass density used to derive body radii: `r = cbrt(m / density)`
    pub density: f64,
    /// Fixed interval advanced by each step
    pub time_step: f64,
    /// Plummer softening length (0 disables softening)
    pub softening: f64,
    /// Collision policy at startup
    pub collision_mode: CollisionMode,
    /// Broad-phase used for collision detection
    pub detector: DetectorKind,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: G_SI,
            gravity_scale: 1.0,
            density: 1.0,
            time_step: 1.0,
            softening: 0.0,
            collision_mode: CollisionMode::default(),
            detector: DetectorKind::default(),
        }
    }
}

impl SimulationConfig {
    /// Defaults with `G` scaled by [`VISUAL_GRAVITY_SCALE`]
    pub fn visual() -> Self {
        Self {
            gravity_scale: VISUAL_GRAVITY_SCALE,
            ..Self::default()
        }
    }

    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f64) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_time_step(mut self, dt: f64) -> Self {
        self.time_step = dt;
        self
    }

    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening = softening;
        self
    }

    pub fn with_collision_mode(mut self, mode: CollisionMode) -> Self {
        self.collision_mode = mode;
        self
    }

    pub fn with_detector(mut self, detector: DetectorKind) -> Self {
        self.detector = detector;
        self
    }

    /// `G` actually used for force computation
    pub fn effective_g(&self) -> f64 {
        self.gravitational_constant * self.gravity_scale
    }

    /// Checks that every constant is usable
    ///
    /// `time_step` and `density` must be finite and positive; the gravity
    /// constants and softening must be finite and non-negative.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [("time_step", self.time_step), ("density", self.density)];
        let non_negative = [
            ("gravitational_constant", self.gravitational_constant),
            ("gravity_scale", self.gravity_scale),
            ("softening", self.softening),
        ];

        positive
            .iter()
            .filter(|(_, value)| !(value.is_finite() && *value > 0.0))
            .chain(
                non_negative
                    .iter()
                    .filter(|(_, value)| !(value.is_finite() && *value >= 0.0)),
            )
            .map(|&(field, value)| Err(SimulationError::InvalidConfig { field, value }))
            .next()
            .unwrap_or(Ok(()))
    }
}
