//! Fixed-force controller

use crate::common::{Controller, State};
use crate::plant::Plant;
use uom::si::f64::Force;
use uom::si::force::newton;

/// Always commands the same force, regardless of state.
///
/// Useful as an open-loop baseline and for disturbance-free divergence
/// studies of the unstable upright equilibrium.
#[derive(Debug, Clone, Copy)]
pub struct ConstantController {
    u: f64, // [N]
}

impl ConstantController {
    /// The force is converted to canonical newtons once, here.
    pub fn new(u: Force) -> Self {
        ConstantController {
            u: u.get::<newton>(),
        }
    }
}

impl Controller for ConstantController {
    fn compute_raw_u(&self, _plant: &Plant, _state: &State) -> f64 {
        self.u
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::{Actuator, Cart, Pendulum};
    use uom::si::acceleration::meter_per_second_squared;
    use uom::si::f64::{Acceleration, Length, Mass, Velocity};
    use uom::si::force::pound_force;
    use uom::si::length::meter;
    use uom::si::mass::kilogram;
    use uom::si::velocity::meter_per_second;

    fn plant_with(actuator: Actuator) -> Plant {
        let friction = Force::new::<newton>(0.1) / Velocity::new::<meter_per_second>(1.0);
        Plant::new(
            Cart::new(Mass::new::<kilogram>(1.0), friction),
            Pendulum::new(Mass::new::<kilogram>(0.5), Length::new::<meter>(1.0)),
            actuator,
            Acceleration::new::<meter_per_second_squared>(9.81),
        )
        .unwrap()
    }

    #[test]
    fn test_constant_output() {
        let plant = plant_with(Actuator::ideal());
        let controller = ConstantController::new(Force::new::<newton>(2.5));
        assert_eq!(controller.compute_u(&plant, &State::upright()), 2.5);
    }

    #[test]
    fn test_force_converted_to_newtons_at_construction() {
        let plant = plant_with(Actuator::ideal());
        let controller = ConstantController::new(Force::new::<pound_force>(1.0));
        let u = controller.compute_u(&plant, &State::upright());
        assert!((u - 4.4482216152605).abs() < 1e-9);
    }

    #[test]
    fn test_limit_enforced() {
        let plant = plant_with(Actuator::ideal().with_force_limit(Force::new::<newton>(1.0)));
        let controller = ConstantController::new(Force::new::<newton>(-7.0));
        assert_eq!(controller.compute_u(&plant, &State::upright()), -1.0);
    }
}
