//! Controllers and offline gain synthesis

pub mod constant;
pub mod lqr;
pub mod riccati;

pub use constant::ConstantController;
pub use lqr::LQRController;
pub use riccati::solve_continuous_are;
