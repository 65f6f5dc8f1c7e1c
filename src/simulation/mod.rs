//! Deterministic time-stepping simulation loop
//!
//! Ties together the plant, a dynamics model, a controller, and an
//! integrator across an ordered time sequence, producing the state and
//! input histories that downstream consumers (plotting, statistics) read.

use crate::common::{
    Controller, DynamicsModel, Integrator, SimError, SimResult, SimulationHistory, State,
};
use crate::plant::Plant;

/// One simulation run in progress.
///
/// The loop is a strict recurrence: each step's inputs are the previous
/// step's outputs, so it is single-threaded by construction. The expensive
/// offline work (LQR synthesis) already happened at controller
/// construction; nothing inside the loop allocates beyond the pre-sized
/// histories or performs blocking I/O.
pub struct Simulation<D, C, I>
where
    D: DynamicsModel,
    C: Controller,
    I: Integrator,
{
    plant: Plant,
    dynamics: D,
    controller: C,
    integrator: I,
    state: State,
}

impl<D, C, I> Simulation<D, C, I>
where
    D: DynamicsModel,
    C: Controller,
    I: Integrator,
{
    pub fn new(plant: Plant, dynamics: D, controller: C, integrator: I, initial_state: State) -> Self {
        Simulation {
            plant,
            dynamics,
            controller,
            integrator,
            state: initial_state,
        }
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    /// Current state; after a run, the state at the last recorded sample.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Advance through `times`, recording one `(state, input)` sample per
    /// timestamp. The first sample is the initial condition with zero
    /// input and no dynamics advance.
    pub fn run(&mut self, times: &[f64]) -> SimResult<SimulationHistory> {
        self.run_with_observer(times, |_, _, _| true)
    }

    /// Like `run`, with a per-sample checkpoint `observer(t, state, u)`.
    ///
    /// The observer fires after every recorded sample; returning `false`
    /// ends the run early with the history collected so far. Progress
    /// reporting and cancellation belong to the caller, not the loop.
    pub fn run_with_observer<F>(&mut self, times: &[f64], mut observer: F) -> SimResult<SimulationHistory>
    where
        F: FnMut(f64, &State, f64) -> bool,
    {
        validate_times(times)?;

        let mut history = SimulationHistory::with_capacity(times.len());
        let mut t_prev = times[0];
        // Currently applied command, latest computed command, and the time
        // the latest command was computed (zero-order hold plus pure delay).
        let mut u = 0.0;
        let mut lag_u = 0.0;
        let mut lag_window_start = times[0];

        history.push(times[0], self.state.to_vector(), u);
        if !observer(times[0], &self.state, u) {
            return Ok(history);
        }

        for &t in &times[1..] {
            let dt = t - t_prev;
            if dt == 0.0 {
                // Duplicate timestamp: record the unchanged sample
                history.push(t, self.state.to_vector(), u);
                if !observer(t, &self.state, u) {
                    return Ok(history);
                }
                continue;
            }

            if self.plant.actuator().is_update_time(t, dt) {
                lag_u = self.controller.compute_u(&self.plant, &self.state);
                lag_window_start = t;
            }
            if self.plant.actuator().is_past_lag_time(t, lag_window_start) {
                u = lag_u;
            }

            let plant = &self.plant;
            let dynamics = &self.dynamics;
            let next = self.integrator.step(
                &|s: &State| dynamics.calc_state_derivative(s, plant, u),
                &self.state,
                dt,
            );

            let v = next.to_vector();
            if !v.iter().all(|c| c.is_finite()) {
                return Err(SimError::NumericalError(format!(
                    "state diverged at t = {}",
                    t
                )));
            }

            self.state = next;
            t_prev = t;
            history.push(t, v, u);
            if !observer(t, &self.state, u) {
                return Ok(history);
            }
        }

        Ok(history)
    }
}

fn validate_times(times: &[f64]) -> SimResult<()> {
    if times.is_empty() {
        return Err(SimError::InvalidParameter(
            "time sequence must contain at least one element".to_string(),
        ));
    }
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(SimError::InvalidParameter(format!(
            "time sequence contains a non-finite value: {}",
            t
        )));
    }
    for w in times.windows(2) {
        if w[1] < w[0] {
            return Err(SimError::InvalidParameter(format!(
                "time sequence decreases from {} to {}",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}
