pub mod body;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod state;

#[cfg(test)]
mod simulation_test;

pub use body::{Body, BodyId, Color};
pub use config::{CollisionMode, DetectorKind, SimulationConfig};
pub use error::SimulationError;
pub use simulation::{BodySnapshot, Simulation, SimulationSnapshot, StepReport};
