use thiserror::Error;

/// Input validation failures reported by the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Body mass must be finite and strictly positive
    #[error("body mass must be finite and positive, got {0}")]
    InvalidMass(f64),

    /// A position or velocity component was NaN or infinite
    #[error("body {field} has a non-finite component")]
    NonFiniteVector { field: &'static str },

    /// A configuration value was out of range
    #[error("invalid configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },
}
