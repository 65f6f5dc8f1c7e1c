//! Error types for cartpole_sim

use std::fmt;

/// Main error type for the simulation engine
#[derive(Debug)]
pub enum SimError {
    /// Invalid parameter or input sequence
    InvalidParameter(String),
    /// Controller synthesis failed (Riccati solve, controllability, stability)
    ControlError(String),
    /// Numerical computation failed (divergence, singular matrix, etc.)
    NumericalError(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SimError::ControlError(msg) => write!(f, "Control error: {}", msg),
            SimError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for SimError {}

/// Result type alias for simulation operations
pub type SimResult<T> = Result<T, SimError>;
