//! Common traits defining the three swappable families of the simulation:
//! dynamics models, controllers, and integrators.

use crate::common::types::{State, StateVector};
use crate::plant::Plant;

/// Trait for equations-of-motion models (linearized, nonlinear, ...)
pub trait DynamicsModel {
    /// Compute the state derivative in canonical units for the given
    /// state, plant, and control force `u` [N]. Pure function.
    fn calc_state_derivative(&self, state: &State, plant: &Plant, u: f64) -> StateVector;
}

/// Trait for controllers (constant force, LQR, ...)
pub trait Controller {
    /// Unclamped control law output [N].
    fn compute_raw_u(&self, plant: &Plant, state: &State) -> f64;

    /// Control force [N] with the actuator limit enforced.
    ///
    /// Limit enforcement is shared behavior across every controller and is
    /// always the last step, so variants only implement the raw law.
    fn compute_u(&self, plant: &Plant, state: &State) -> f64 {
        plant.actuator().enforce_limit(self.compute_raw_u(plant, state))
    }
}

/// Trait for one-step numerical integrators (Euler, RK4, ...)
pub trait Integrator {
    /// Advance `state` by `dt` seconds under the given derivative function.
    ///
    /// The derivative function maps a state to its canonical-unit derivative
    /// vector; any function matching the contract works, so the same
    /// integrator serves every dynamics model.
    fn step(&self, derivative: &dyn Fn(&State) -> StateVector, state: &State, dt: f64) -> State;
}
