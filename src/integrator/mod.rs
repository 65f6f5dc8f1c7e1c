//! One-step numerical integrators
//!
//! Both integrators advance a state by a single time increment under any
//! derivative function matching the `Integrator` contract; the control
//! input is whatever the caller baked into that function, held fixed for
//! the whole step.

use crate::common::{Integrator, State, StateVector};

/// Explicit Euler step, first-order accurate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerIntegrator;

impl EulerIntegrator {
    pub fn new() -> Self {
        EulerIntegrator
    }
}

impl Integrator for EulerIntegrator {
    fn step(&self, derivative: &dyn Fn(&State) -> StateVector, state: &State, dt: f64) -> State {
        state.add_vector(&(derivative(state) * dt))
    }
}

/// Classical four-stage Runge-Kutta step, fourth-order accurate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Integrator;

impl RK4Integrator {
    pub fn new() -> Self {
        RK4Integrator
    }
}

impl Integrator for RK4Integrator {
    fn step(&self, derivative: &dyn Fn(&State) -> StateVector, state: &State, dt: f64) -> State {
        let k1 = derivative(state);
        let k2 = derivative(&state.add_vector(&(k1 * (0.5 * dt))));
        let k3 = derivative(&state.add_vector(&(k2 * (0.5 * dt))));
        let k4 = derivative(&state.add_vector(&(k3 * dt)));

        state.add_vector(&((k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)))
    }
}
