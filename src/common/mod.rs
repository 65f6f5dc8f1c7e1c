//! Common types, traits, and error definitions for cartpole_sim
//!
//! This module provides the foundational building blocks used across
//! the simulation engine.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
