//! Full nonlinear equations of motion
//!
//! Derived from the Lagrangian of a cart sliding on a rail with linear
//! friction and a rigid pendulum pivoted at a fixed point on the cart,
//! with theta measured from upright:
//!
//! ```text
//! (M + m) x_dd + b x_d + m l th_dd cos(th) - m l th_d^2 sin(th) = u
//! J th_dd + m l x_dd cos(th) - m g l sin(th) = 0
//! ```
//!
//! where J is the pendulum moment of inertia about the pivot. Solving the
//! pair for the accelerations gives the closed forms below; both
//! denominators stay positive because J (M + m) > (m l)^2 for any physical
//! plant.

use crate::common::{DynamicsModel, State, StateVector};
use crate::plant::Plant;
use nalgebra::Vector4;

#[derive(Debug, Clone, Copy, Default)]
pub struct NonlinearModel;

impl NonlinearModel {
    pub fn new() -> Self {
        NonlinearModel
    }
}

impl DynamicsModel for NonlinearModel {
    fn calc_state_derivative(&self, state: &State, plant: &Plant, u: f64) -> StateVector {
        let v = state.to_vector();
        let vx = v[1];
        let theta = v[2];
        let omega = v[3];

        let m_total = plant.total_mass();
        let ml = plant.m_pend() * plant.l_com();
        let j = plant.moi_pivot();
        let g = plant.g();
        let b = plant.b();

        let (sin_t, cos_t) = theta.sin_cos();

        // Net force along the rail apart from the pivot reaction
        let f = u - b * vx + ml * omega * omega * sin_t;

        let x_ddot = (f - ml * ml * g * sin_t * cos_t / j) / (m_total - ml * ml * cos_t * cos_t / j);
        let theta_ddot =
            (m_total * ml * g * sin_t - ml * cos_t * f) / (j * m_total - ml * ml * cos_t * cos_t);

        Vector4::new(vx, x_ddot, omega, theta_ddot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::LinearizedModel;
    use crate::plant::{Actuator, Cart, Pendulum};
    use uom::si::acceleration::meter_per_second_squared;
    use uom::si::f64::{Acceleration, Force, Length, Mass, Velocity};
    use uom::si::force::newton;
    use uom::si::length::meter;
    use uom::si::mass::kilogram;
    use uom::si::velocity::meter_per_second;

    fn standard_plant() -> Plant {
        let friction = Force::new::<newton>(1.0) / Velocity::new::<meter_per_second>(1.0);
        Plant::new(
            Cart::new(Mass::new::<kilogram>(5.0), friction),
            Pendulum::new(Mass::new::<kilogram>(1.0), Length::new::<meter>(2.0)),
            Actuator::ideal(),
            Acceleration::new::<meter_per_second_squared>(10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_upright_equilibrium_has_zero_derivative() {
        let plant = standard_plant();
        let deriv = NonlinearModel::new().calc_state_derivative(&State::upright(), &plant, 0.0);
        assert!(deriv.norm() < 1e-12);
    }

    #[test]
    fn test_tilted_pendulum_falls_away_from_upright() {
        let plant = standard_plant();
        let state = State::from_vector(&Vector4::new(0.0, 0.0, 0.1, 0.0));
        let deriv = NonlinearModel::new().calc_state_derivative(&state, &plant, 0.0);
        // Gravity torque accelerates the tilt and pushes the cart backward
        assert!(deriv[3] > 0.0);
        assert!(deriv[1] < 0.0);
    }

    #[test]
    fn test_mirror_symmetry() {
        let plant = standard_plant();
        let model = NonlinearModel::new();
        let state = State::from_vector(&Vector4::new(0.0, 0.3, 0.4, -0.2));
        let mirrored = State::from_vector(&Vector4::new(0.0, -0.3, -0.4, 0.2));
        let d = model.calc_state_derivative(&state, &plant, 1.5);
        let dm = model.calc_state_derivative(&mirrored, &plant, -1.5);
        for i in 0..4 {
            assert!((d[i] + dm[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_well_defined_at_horizontal() {
        let plant = standard_plant();
        let state = State::from_vector(&Vector4::new(0.0, 0.0, std::f64::consts::FRAC_PI_2, 0.0));
        let deriv = NonlinearModel::new().calc_state_derivative(&state, &plant, 0.0);
        assert!(deriv.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_linearization_matches_linear_model() {
        // Finite-difference Jacobian of the nonlinear derivative at the
        // upright equilibrium must reproduce the A and B matrices.
        let plant = standard_plant();
        let model = NonlinearModel::new();
        let (a, b) = LinearizedModel::new().get_a_b(&plant);

        let h = 1e-6;
        for col in 0..4 {
            let mut plus = Vector4::zeros();
            plus[col] = h;
            let d_plus =
                model.calc_state_derivative(&State::from_vector(&plus), &plant, 0.0);
            let d_minus =
                model.calc_state_derivative(&State::from_vector(&(-plus)), &plant, 0.0);
            let jac_col = (d_plus - d_minus) / (2.0 * h);
            for row in 0..4 {
                assert!(
                    (jac_col[row] - a[(row, col)]).abs() < 1e-6,
                    "A mismatch at ({}, {}): {} vs {}",
                    row,
                    col,
                    jac_col[row],
                    a[(row, col)]
                );
            }
        }

        let d_plus = model.calc_state_derivative(&State::upright(), &plant, h);
        let d_minus = model.calc_state_derivative(&State::upright(), &plant, -h);
        let b_col = (d_plus - d_minus) / (2.0 * h);
        for row in 0..4 {
            assert!(
                (b_col[row] - b[row]).abs() < 1e-6,
                "B mismatch at {}: {} vs {}",
                row,
                b_col[row],
                b[row]
            );
        }
    }
}
