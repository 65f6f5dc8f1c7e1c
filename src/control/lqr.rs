//! Linear quadratic regulator with offline gain synthesis

use crate::common::{Controller, SimError, SimResult, State, StateVector};
use crate::control::riccati::solve_continuous_are;
use crate::dynamics::LinearizedModel;
use crate::plant::Plant;
use nalgebra::{Matrix1, Matrix1x4, Matrix4};

/// State-feedback controller `u = -K (x - setpoint)` with the optimal gain
/// for quadratic state cost Q and input cost R.
///
/// The whole synthesis runs once at construction: linearize the plant,
/// check controllability, solve the continuous-time algebraic Riccati
/// equation, form `K = R^-1 B' P`, and verify the closed loop is stable.
/// The gain is invariant for the controller's lifetime; changing weights
/// or plant means constructing a new controller.
pub struct LQRController {
    /// State cost matrix
    pub q: Matrix4<f64>,
    /// Input cost
    pub r: Matrix1<f64>,
    setpoint: StateVector,
    k: Matrix1x4<f64>,
}

impl LQRController {
    /// Synthesize a regulator that drives the state to the origin.
    pub fn new(
        q: Matrix4<f64>,
        r: f64,
        linear: &LinearizedModel,
        plant: &Plant,
    ) -> SimResult<Self> {
        Self::with_setpoint(q, r, linear, plant, StateVector::zeros())
    }

    /// Synthesize a regulator that drives the state to `setpoint`
    /// (canonical units).
    pub fn with_setpoint(
        q: Matrix4<f64>,
        r: f64,
        linear: &LinearizedModel,
        plant: &Plant,
        setpoint: StateVector,
    ) -> SimResult<Self> {
        if !r.is_finite() || r <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "input cost R must be positive, got {}",
                r
            )));
        }
        if q.iter().any(|v| !v.is_finite()) || (q - q.transpose()).abs().max() > 1e-9 {
            return Err(SimError::InvalidParameter(
                "state cost Q must be a finite symmetric matrix".to_string(),
            ));
        }
        if setpoint.iter().any(|v| !v.is_finite()) {
            return Err(SimError::InvalidParameter(
                "setpoint must be finite".to_string(),
            ));
        }

        let (a, b) = linear.get_a_b(plant);

        let ctrb = Matrix4::from_columns(&[b, a * b, a * a * b, a * a * a * b]);
        if ctrb.rank(1e-10) < 4 {
            return Err(SimError::ControlError(
                "linearized (A, B) pair is uncontrollable".to_string(),
            ));
        }

        let r_mat = Matrix1::new(r);
        let p = solve_continuous_are(&a, &b, &q, &r_mat)?;
        let k = (1.0 / r) * (b.transpose() * p);

        let closed_loop = a - b * k;
        let eigenvalues = closed_loop.complex_eigenvalues();
        if eigenvalues.iter().any(|e| e.re >= 0.0) {
            return Err(SimError::ControlError(
                "synthesized gain does not stabilize the closed loop".to_string(),
            ));
        }

        Ok(LQRController {
            q,
            r: r_mat,
            setpoint,
            k,
        })
    }

    /// The synthesized feedback gain.
    pub fn gain(&self) -> &Matrix1x4<f64> {
        &self.k
    }

    pub fn setpoint(&self) -> &StateVector {
        &self.setpoint
    }
}

impl Controller for LQRController {
    fn compute_raw_u(&self, _plant: &Plant, state: &State) -> f64 {
        (-(self.k * (state.to_vector() - self.setpoint)))[0]
    }
}
