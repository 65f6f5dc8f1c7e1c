//! Equations-of-motion models for the cart-pendulum mechanism
//!
//! Both models implement the `DynamicsModel` trait; the linearized model is
//! also the plant description consumed by LQR gain synthesis.

pub mod linear;
pub mod nonlinear;

pub use linear::LinearizedModel;
pub use nonlinear::NonlinearModel;
