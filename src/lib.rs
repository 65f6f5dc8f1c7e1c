//! cartpole_sim - cart-mounted inverted pendulum simulation
//!
//! This crate provides the simulation engine for a cart-pendulum mechanism
//! under closed-loop control: the physical state and plant description,
//! linear and nonlinear equations of motion, one-step numerical
//! integrators, controllers with offline LQR gain synthesis, an actuator
//! timing model (zero-order-hold sampling plus command lag), and the
//! deterministic stepping loop that produces state and input histories for
//! downstream analysis and rendering.

// Core modules
pub mod common;
pub mod plant;

// Engine modules
pub mod control;
pub mod disturbance;
pub mod dynamics;
pub mod integrator;
pub mod simulation;

// Re-export common types for convenience
pub use common::{FrictionCoefficient, SimulationHistory, State, StateVector};
pub use common::{Controller, DynamicsModel, Integrator};
pub use common::{SimError, SimResult};
pub use control::{ConstantController, LQRController};
pub use disturbance::{Disturbance, GaussianDisturbance};
pub use dynamics::{LinearizedModel, NonlinearModel};
pub use integrator::{EulerIntegrator, RK4Integrator};
pub use plant::{Actuator, Cart, Pendulum, Plant};
pub use simulation::Simulation;
