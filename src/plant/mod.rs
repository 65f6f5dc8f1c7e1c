//! Physical description of the cart-pendulum plant: cart, pendulum,
//! actuator, and the assembled `Plant` with its derived constants.

use crate::common::{FrictionCoefficient, SimError, SimResult, StateVector};
use uom::si::f64::{Acceleration, Force, Frequency, Length, Mass, MomentOfInertia, Time};
use uom::si::frequency::hertz;
use uom::si::length::{inch, meter};
use uom::si::time::second;

/// Cart sliding on a frictional rail.
///
/// The geometry fields are consumed only by rendering layers; dynamics use
/// mass and friction alone.
#[derive(Debug, Clone, Copy)]
pub struct Cart {
    pub mass: Mass,
    /// Linear rail friction, force per unit velocity
    pub friction_coeff: FrictionCoefficient,
    /// Height of the cart top surface (the pendulum pivot plane)
    pub y_top: Length,
    pub width: Length,
    pub height: Length,
}

impl Cart {
    pub fn new(mass: Mass, friction_coeff: FrictionCoefficient) -> Self {
        Cart {
            mass,
            friction_coeff,
            y_top: Length::new::<inch>(0.0),
            width: Length::new::<inch>(8.0),
            height: Length::new::<inch>(4.0),
        }
    }

    pub fn with_geometry(mut self, y_top: Length, width: Length, height: Length) -> Self {
        self.y_top = y_top;
        self.width = width;
        self.height = height;
        self
    }

    /// Lower-left corner of the cart rectangle for rendering, given the cart
    /// position `x` [m]. Returns canonical meters.
    pub fn ll_corner(&self, x: f64) -> (f64, f64) {
        (
            x - self.width.get::<meter>() / 2.0,
            self.y_top.get::<meter>() - self.height.get::<meter>(),
        )
    }
}

/// Rigid pendulum pivoted at a fixed point on the cart.
#[derive(Debug, Clone, Copy)]
pub struct Pendulum {
    pub mass: Mass,
    pub length: Length,
    /// Moment of inertia about the centroid. When absent the pendulum is
    /// treated as a uniform slender rod: m * L^2 / 12. The pivot inertia is
    /// derived from this by the parallel-axis step in `Plant::new`, so only
    /// the centroidal convention is ever accepted as input.
    pub moi: Option<MomentOfInertia>,
    /// Distance from the pivot to the center of mass; half the length when
    /// absent.
    pub length_pivot_to_centroid: Option<Length>,
}

impl Pendulum {
    pub fn new(mass: Mass, length: Length) -> Self {
        Pendulum {
            mass,
            length,
            moi: None,
            length_pivot_to_centroid: None,
        }
    }

    pub fn with_moi(mut self, moi: MomentOfInertia) -> Self {
        self.moi = Some(moi);
        self
    }

    pub fn with_pivot_to_centroid(mut self, l_com: Length) -> Self {
        self.length_pivot_to_centroid = Some(l_com);
        self
    }
}

/// Actuator timing and saturation model.
///
/// All fields are optional; leaving them unset gives an ideal actuator with
/// unlimited force, continuous refresh, and instantaneous response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actuator {
    force_limit: Option<f64>,  // [N]
    refresh_rate: Option<f64>, // [Hz]
    command_lag: Option<f64>,  // [s]
}

impl Actuator {
    /// An unlimited, continuous, instantaneous actuator.
    pub fn ideal() -> Self {
        Actuator::default()
    }

    pub fn with_force_limit(mut self, limit: Force) -> Self {
        self.force_limit = Some(limit.value);
        self
    }

    pub fn with_refresh_rate(mut self, rate: Frequency) -> Self {
        self.refresh_rate = Some(rate.get::<hertz>());
        self
    }

    /// Fixed delay between command computation and its effect on the plant.
    ///
    /// The lag window restarts whenever a fresh command is computed, so a lag
    /// is only meaningful combined with a finite refresh rate.
    pub fn with_command_lag(mut self, lag: Time) -> Self {
        self.command_lag = Some(lag.get::<second>());
        self
    }

    pub fn force_limit(&self) -> Option<f64> {
        self.force_limit
    }

    pub fn refresh_rate(&self) -> Option<f64> {
        self.refresh_rate
    }

    pub fn command_lag(&self) -> Option<f64> {
        self.command_lag
    }

    /// Clamp `|u|` to the force limit, preserving sign.
    pub fn enforce_limit(&self, u: f64) -> f64 {
        match self.force_limit {
            Some(limit) if u.abs() > limit => limit.copysign(u),
            _ => u,
        }
    }

    /// True when a fresh command should be computed during the step ending
    /// at `time` with length `dt`: always without a refresh rate, otherwise
    /// when the sample boundary was crossed during this step.
    pub fn is_update_time(&self, time: f64, dt: f64) -> bool {
        match self.refresh_rate {
            None => true,
            Some(rate) => dt == 0.0 || time % (1.0 / rate) < dt,
        }
    }

    /// True when the command computed at `lag_window_start` has waited out
    /// the configured lag and may take effect.
    pub fn is_past_lag_time(&self, time: f64, lag_window_start: f64) -> bool {
        match self.command_lag {
            None => true,
            Some(lag) => time - lag_window_start >= lag,
        }
    }
}

/// The assembled plant: cart, pendulum, actuator, gravity.
///
/// Validated at construction and immutable afterwards; the aggregate
/// constants consumed by the dynamics (total mass, pivot moment of inertia,
/// pivot-to-centroid distance) are derived exactly once, in canonical SI
/// units. Read-only sharing across threads is safe.
#[derive(Debug, Clone)]
pub struct Plant {
    cart: Cart,
    pendulum: Pendulum,
    actuator: Actuator,
    gravity: Acceleration,
    // Canonical constants, derived once at construction
    m_cart: f64,      // [kg]
    m_pend: f64,      // [kg]
    total_mass: f64,  // [kg]
    l_com: f64,       // [m]
    moi_pivot: f64,   // [kg m^2]
    g: f64,           // [m/s^2]
    b: f64,           // [N s/m]
    pend_length: f64, // [m]
    y_pivot: f64,     // [m]
}

impl Plant {
    pub fn new(
        cart: Cart,
        pendulum: Pendulum,
        actuator: Actuator,
        gravity: Acceleration,
    ) -> SimResult<Self> {
        let m_cart = cart.mass.value;
        let m_pend = pendulum.mass.value;
        let pend_length = pendulum.length.value;
        let g = gravity.value;
        let b = cart.friction_coeff.value;

        if !m_cart.is_finite() || m_cart <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "cart mass must be positive, got {} kg",
                m_cart
            )));
        }
        if !m_pend.is_finite() || m_pend <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "pendulum mass must be positive, got {} kg",
                m_pend
            )));
        }
        if !pend_length.is_finite() || pend_length <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "pendulum length must be positive, got {} m",
                pend_length
            )));
        }
        if !g.is_finite() || g <= 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "gravity must be positive, got {} m/s^2",
                g
            )));
        }
        if !b.is_finite() || b < 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "friction coefficient must be non-negative, got {} N s/m",
                b
            )));
        }

        let l_com = pendulum
            .length_pivot_to_centroid
            .unwrap_or(pendulum.length / 2.0);
        let moi_centroid = pendulum
            .moi
            .unwrap_or(pendulum.mass * pendulum.length * pendulum.length / 12.0);
        if l_com.value <= 0.0 || !l_com.value.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "pivot-to-centroid distance must be positive, got {} m",
                l_com.value
            )));
        }
        if moi_centroid.value <= 0.0 || !moi_centroid.value.is_finite() {
            return Err(SimError::InvalidParameter(format!(
                "moment of inertia must be positive, got {} kg m^2",
                moi_centroid.value
            )));
        }

        if let Some(limit) = actuator.force_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(SimError::InvalidParameter(format!(
                    "actuator force limit must be positive, got {} N",
                    limit
                )));
            }
        }
        if let Some(rate) = actuator.refresh_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(SimError::InvalidParameter(format!(
                    "actuator refresh rate must be positive, got {} Hz",
                    rate
                )));
            }
        }
        if let Some(lag) = actuator.command_lag {
            if !lag.is_finite() || lag < 0.0 {
                return Err(SimError::InvalidParameter(format!(
                    "actuator command lag must be non-negative, got {} s",
                    lag
                )));
            }
        }

        // Parallel-axis step: pivot inertia from the centroidal value.
        let moi_pivot = moi_centroid + pendulum.mass * l_com * l_com;

        Ok(Plant {
            cart,
            pendulum,
            actuator,
            gravity,
            m_cart,
            m_pend,
            total_mass: m_cart + m_pend,
            l_com: l_com.value,
            moi_pivot: moi_pivot.value,
            g,
            b,
            pend_length,
            y_pivot: cart.y_top.value,
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn pendulum(&self) -> &Pendulum {
        &self.pendulum
    }

    pub fn actuator(&self) -> &Actuator {
        &self.actuator
    }

    pub fn gravity(&self) -> Acceleration {
        self.gravity
    }

    /// Cart mass [kg]
    pub fn m_cart(&self) -> f64 {
        self.m_cart
    }

    /// Pendulum mass [kg]
    pub fn m_pend(&self) -> f64 {
        self.m_pend
    }

    /// Cart plus pendulum mass [kg]
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Pivot-to-centroid distance [m]
    pub fn l_com(&self) -> f64 {
        self.l_com
    }

    /// Pendulum moment of inertia about the pivot [kg m^2]
    pub fn moi_pivot(&self) -> f64 {
        self.moi_pivot
    }

    /// Gravitational acceleration [m/s^2]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Rail friction coefficient [N s/m]
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Pivot and pendulum tip positions for rendering, canonical meters.
    ///
    /// Not used by the dynamics; `theta` is measured from upright, so the
    /// tip leans toward positive x for positive angles.
    pub fn get_endpoints(&self, x: f64, theta: f64) -> ((f64, f64), (f64, f64)) {
        let tip_x = x + self.pend_length * theta.sin();
        let tip_y = self.y_pivot + self.pend_length * theta.cos();
        ((x, self.y_pivot), (tip_x, tip_y))
    }

    /// Pendulum endpoint positions for every state in a recorded history.
    pub fn trace_endpoints(&self, states: &[StateVector]) -> Vec<((f64, f64), (f64, f64))> {
        states
            .iter()
            .map(|s| self.get_endpoints(s[0], s[2]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::acceleration::meter_per_second_squared;
    use uom::si::f64::Velocity;
    use uom::si::force::newton;
    use uom::si::mass::kilogram;
    use uom::si::moment_of_inertia::kilogram_square_meter;
    use uom::si::velocity::meter_per_second;

    fn friction(n_s_per_m: f64) -> FrictionCoefficient {
        Force::new::<newton>(n_s_per_m) / Velocity::new::<meter_per_second>(1.0)
    }

    fn standard_plant() -> Plant {
        let cart = Cart::new(Mass::new::<kilogram>(5.0), friction(1.0));
        let pendulum = Pendulum::new(Mass::new::<kilogram>(1.0), Length::new::<meter>(2.0));
        Plant::new(
            cart,
            pendulum,
            Actuator::ideal(),
            Acceleration::new::<meter_per_second_squared>(10.0),
        )
        .unwrap()
    }

    #[test]
    fn test_derived_constants() {
        let plant = standard_plant();
        assert!((plant.total_mass() - 6.0).abs() < 1e-12);
        assert!((plant.l_com() - 1.0).abs() < 1e-12);
        // Uniform rod: centroidal moi 1*2^2/12, pivot moi adds m*l_com^2
        assert!((plant.moi_pivot() - (4.0 / 12.0 + 1.0)).abs() < 1e-12);
        assert!((plant.g() - 10.0).abs() < 1e-12);
        assert!((plant.b() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_moi_override() {
        let cart = Cart::new(Mass::new::<kilogram>(5.0), friction(1.0));
        let pendulum = Pendulum::new(Mass::new::<kilogram>(1.0), Length::new::<meter>(2.0))
            .with_moi(MomentOfInertia::new::<kilogram_square_meter>(0.5))
            .with_pivot_to_centroid(Length::new::<meter>(0.8));
        let plant = Plant::new(
            cart,
            pendulum,
            Actuator::ideal(),
            Acceleration::new::<meter_per_second_squared>(9.81),
        )
        .unwrap();
        assert!((plant.l_com() - 0.8).abs() < 1e-12);
        assert!((plant.moi_pivot() - (0.5 + 0.64)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_nonpositive_mass() {
        let cart = Cart::new(Mass::new::<kilogram>(0.0), friction(1.0));
        let pendulum = Pendulum::new(Mass::new::<kilogram>(1.0), Length::new::<meter>(2.0));
        let result = Plant::new(
            cart,
            pendulum,
            Actuator::ideal(),
            Acceleration::new::<meter_per_second_squared>(9.81),
        );
        assert!(matches!(result, Err(SimError::InvalidParameter(_))));
    }

    #[test]
    fn test_rejects_bad_actuator_config() {
        let cart = Cart::new(Mass::new::<kilogram>(1.0), friction(0.1));
        let pendulum = Pendulum::new(Mass::new::<kilogram>(0.5), Length::new::<meter>(1.0));
        let actuator = Actuator::ideal().with_refresh_rate(Frequency::new::<hertz>(0.0));
        let result = Plant::new(
            cart,
            pendulum,
            actuator,
            Acceleration::new::<meter_per_second_squared>(9.81),
        );
        assert!(matches!(result, Err(SimError::InvalidParameter(_))));
    }

    #[test]
    fn test_enforce_limit_clamps_with_sign() {
        let actuator = Actuator::ideal().with_force_limit(Force::new::<newton>(5.0));
        assert_eq!(actuator.enforce_limit(12.0), 5.0);
        assert_eq!(actuator.enforce_limit(-12.0), -5.0);
        assert_eq!(actuator.enforce_limit(3.0), 3.0);

        let ideal = Actuator::ideal();
        assert_eq!(ideal.enforce_limit(1e6), 1e6);
    }

    #[test]
    fn test_update_time() {
        let ideal = Actuator::ideal();
        assert!(ideal.is_update_time(0.123, 0.01));

        // 2 Hz refresh: boundary crossed when t mod 0.5 < dt
        let sampled = Actuator::ideal().with_refresh_rate(Frequency::new::<hertz>(2.0));
        let dt = 0.0625;
        assert!(sampled.is_update_time(0.5, dt));
        assert!(!sampled.is_update_time(0.4375, dt));
        assert!(sampled.is_update_time(1.0, dt));
        assert!(sampled.is_update_time(0.3, 0.0));
    }

    #[test]
    fn test_past_lag_time() {
        let lagged = Actuator::ideal().with_command_lag(Time::new::<second>(0.25));
        assert!(!lagged.is_past_lag_time(1.1, 1.0));
        assert!(lagged.is_past_lag_time(1.25, 1.0));
        assert!(Actuator::ideal().is_past_lag_time(0.0, 0.0));
    }

    #[test]
    fn test_endpoints_geometry() {
        let plant = standard_plant();
        let ((px, py), (tx, ty)) = plant.get_endpoints(0.5, 0.0);
        assert!((px - 0.5).abs() < 1e-12);
        assert!(py.abs() < 1e-12);
        assert!((tx - 0.5).abs() < 1e-12);
        assert!((ty - 2.0).abs() < 1e-12);

        let (_, (tx, ty)) = plant.get_endpoints(0.0, std::f64::consts::FRAC_PI_2);
        assert!((tx - 2.0).abs() < 1e-12);
        assert!(ty.abs() < 1e-10);
    }

    #[test]
    fn test_plant_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Plant>();
    }
}
