//! Core value types: physical state, canonical vectors, run histories

use nalgebra::Vector4;
use uom::si::angle::radian;
use uom::si::angular_velocity::radian_per_second;
use uom::si::f64::{Angle, AngularVelocity, Length, Velocity};
use uom::si::length::meter;
use uom::si::velocity::meter_per_second;
use uom::si::{Quantity, ISQ, SI};
use uom::typenum::{N1, P1, Z0};

/// State vector in canonical SI units: [m, m/s, rad, rad/s]
pub type StateVector = Vector4<f64>;

/// Linear friction coefficient, force per unit velocity (N s / m, i.e. kg/s).
///
/// uom has no named quantity for this dimension; build values by dividing a
/// force by a velocity.
pub type FrictionCoefficient = Quantity<ISQ<Z0, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Instantaneous physical state of the cart-pendulum mechanism.
///
/// Each component carries its physical unit; conversion to the canonical
/// SI vector happens only at the `to_vector` boundary, so everything the
/// integrators and matrix operations touch is plain `f64`. States are
/// replaced wholesale each step, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    /// Cart position along the rail
    pub x: Length,
    /// Cart velocity
    pub vx: Velocity,
    /// Pendulum angle measured from upright
    pub theta: Angle,
    /// Pendulum angular velocity
    pub omega: AngularVelocity,
}

impl State {
    pub fn new(x: Length, vx: Velocity, theta: Angle, omega: AngularVelocity) -> Self {
        State { x, vx, theta, omega }
    }

    /// The upright, stationary equilibrium.
    pub fn upright() -> Self {
        State {
            x: Length::new::<meter>(0.0),
            vx: Velocity::new::<meter_per_second>(0.0),
            theta: Angle::new::<radian>(0.0),
            omega: AngularVelocity::new::<radian_per_second>(0.0),
        }
    }

    /// Projects the four quantities into canonical units: [m, m/s, rad, rad/s].
    pub fn to_vector(&self) -> StateVector {
        Vector4::new(
            self.x.get::<meter>(),
            self.vx.get::<meter_per_second>(),
            self.theta.get::<radian>(),
            self.omega.get::<radian_per_second>(),
        )
    }

    /// Inverse of `to_vector`, reattaching canonical units.
    pub fn from_vector(v: &StateVector) -> Self {
        State {
            x: Length::new::<meter>(v[0]),
            vx: Velocity::new::<meter_per_second>(v[1]),
            theta: Angle::new::<radian>(v[2]),
            omega: AngularVelocity::new::<radian_per_second>(v[3]),
        }
    }

    /// Adds a raw canonical-unit delta and returns the shifted state.
    ///
    /// Runge-Kutta intermediate stage states are built this way; they need
    /// not themselves be physically meaningful.
    pub fn add_vector(&self, delta: &StateVector) -> Self {
        State::from_vector(&(self.to_vector() + delta))
    }
}

/// Time-indexed record of one simulation run.
///
/// Append-only while the run executes; the caller owns it afterwards. The
/// three columns always have equal length, one entry per timestamp.
#[derive(Debug, Clone)]
pub struct SimulationHistory {
    /// Timestamps [s]
    pub times: Vec<f64>,
    /// Canonical-unit state vectors
    pub states: Vec<StateVector>,
    /// Applied control force [N], post-limit and post-lag
    pub inputs: Vec<f64>,
}

impl SimulationHistory {
    /// Creates an empty history pre-sized for `n` samples.
    pub fn with_capacity(n: usize) -> Self {
        SimulationHistory {
            times: Vec::with_capacity(n),
            states: Vec::with_capacity(n),
            inputs: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, time: f64, state: StateVector, input: f64) {
        self.times.push(time);
        self.states.push(state);
        self.inputs.push(input);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_state(&self) -> Option<&StateVector> {
        self.states.last()
    }

    /// Cart position column [m]
    pub fn positions(&self) -> Vec<f64> {
        self.states.iter().map(|s| s[0]).collect()
    }

    /// Cart velocity column [m/s]
    pub fn velocities(&self) -> Vec<f64> {
        self.states.iter().map(|s| s[1]).collect()
    }

    /// Pendulum angle column [rad]
    pub fn angles(&self) -> Vec<f64> {
        self.states.iter().map(|s| s[2]).collect()
    }

    /// Pendulum angular velocity column [rad/s]
    pub fn angular_velocities(&self) -> Vec<f64> {
        self.states.iter().map(|s| s[3]).collect()
    }
}
