//! Dynamics linearized about the upright, stationary equilibrium

use crate::common::{DynamicsModel, State, StateVector};
use crate::plant::Plant;
use nalgebra::{Matrix4, Vector4};

/// Linear state-space model `x_dot = A x + B u` valid near the upright
/// equilibrium (theta = 0, omega = 0, vx = 0).
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearizedModel;

impl LinearizedModel {
    pub fn new() -> Self {
        LinearizedModel
    }

    /// State matrix A (4x4) and input vector B (4x1) for the plant.
    ///
    /// With J the pivot moment of inertia, m the pendulum mass, l the
    /// pivot-to-centroid distance, the denominators are
    /// `p = m_cart + m_pend - (m l)^2 / J` and
    /// `q = ((m l)^2 - J (m_cart + m_pend)) / (m l)`; q is negative for any
    /// physical plant.
    pub fn get_a_b(&self, plant: &Plant) -> (Matrix4<f64>, Vector4<f64>) {
        let b = plant.b();
        let g = plant.g();
        let j = plant.moi_pivot();
        let m_total = plant.total_mass();
        let ml = plant.m_pend() * plant.l_com();

        let p = m_total - ml * ml / j;
        let q = (ml * ml - j * m_total) / ml;

        let a22 = -b / p;
        let a23 = -g * ml * ml / (p * j);
        let a42 = -b / q;
        let a43 = -m_total * g / q;

        #[rustfmt::skip]
        let a = Matrix4::new(
            0.0, 1.0,  0.0, 0.0,
            0.0, a22,  a23, 0.0,
            0.0, 0.0,  0.0, 1.0,
            0.0, a42,  a43, 0.0,
        );

        let b_vec = Vector4::new(0.0, 1.0 / p, 0.0, 1.0 / q);

        (a, b_vec)
    }
}

impl DynamicsModel for LinearizedModel {
    fn calc_state_derivative(&self, state: &State, plant: &Plant, u: f64) -> StateVector {
        let (a, b) = self.get_a_b(plant);
        a * state.to_vector() + b * u
    }
}
