//! Continuous-time algebraic Riccati equation solver

use crate::common::{SimError, SimResult};
use nalgebra::{Matrix1, Matrix4, Vector4};

const MAX_ITER: usize = 500_000;
const STEP: f64 = 1e-3;
const EPS: f64 = 1e-6;

/// Solve `A' P + P A - P B R^-1 B' P + Q = 0` for the stabilizing P.
///
/// The solution is reached by integrating the Riccati differential equation
/// `P_dot = A' P + P A - P B R^-1 B' P + Q` forward from `P = Q` until the
/// algebraic residual is negligible; convergence is judged on the residual
/// itself, so a spurious fixed point cannot be returned. Fails if the
/// iterates diverge or the residual does not settle within the iteration
/// budget.
pub fn solve_continuous_are(
    a: &Matrix4<f64>,
    b: &Vector4<f64>,
    q: &Matrix4<f64>,
    r: &Matrix1<f64>,
) -> SimResult<Matrix4<f64>> {
    let r_inv = r
        .try_inverse()
        .ok_or_else(|| SimError::ControlError("input cost R is singular".to_string()))?;

    let mut p = *q;
    for _ in 0..MAX_ITER {
        let residual = a.transpose() * p + p * a - p * b * r_inv * (b.transpose() * p) + q;
        if residual.abs().max() < EPS {
            // Symmetrize away accumulated floating-point drift
            return Ok((p + p.transpose()) * 0.5);
        }
        p += residual * STEP;
        if !p.iter().all(|v| v.is_finite()) {
            return Err(SimError::ControlError(
                "Riccati iteration diverged".to_string(),
            ));
        }
    }

    Err(SimError::ControlError(
        "Riccati iteration did not converge".to_string(),
    ))
}
