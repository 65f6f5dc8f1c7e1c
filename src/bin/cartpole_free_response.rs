// Unforced response of the upright equilibrium: a cart-pendulum released
// with a small angular velocity under a zero-force controller. Consumes
// only the recorded history, like any other downstream layer.

use cartpole_sim::{
    Actuator, Cart, ConstantController, NonlinearModel, Pendulum, Plant, RK4Integrator,
    Simulation, State,
};
use itertools::izip;
use ordered_float::OrderedFloat;
use plotlib::page::Page;
use plotlib::repr::Plot;
use plotlib::style::LineStyle;
use plotlib::view::ContinuousView;
use uom::si::acceleration::meter_per_second_squared;
use uom::si::f64::{Acceleration, Force, Length, Mass, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::velocity::meter_per_second;

fn main() {
    let friction = Force::new::<newton>(1.0) / Velocity::new::<meter_per_second>(1.0);
    let plant = Plant::new(
        Cart::new(Mass::new::<kilogram>(5.0), friction),
        Pendulum::new(Mass::new::<kilogram>(1.0), Length::new::<meter>(2.0)),
        Actuator::ideal(),
        Acceleration::new::<meter_per_second_squared>(10.0),
    )
    .unwrap();

    let initial = State::from_vector(&nalgebra::Vector4::new(0.0, 0.0, 0.0, 0.5));
    let mut sim = Simulation::new(
        plant,
        NonlinearModel::new(),
        ConstantController::new(Force::new::<newton>(0.0)),
        RK4Integrator::new(),
        initial,
    );

    let dt = 0.001;
    let times: Vec<f64> = (0..20_001).map(|i| i as f64 * dt).collect();

    println!("Running free response over [0, 20] s, dt = {} s ...", dt);
    let history = sim.run(&times).expect("simulation failed");

    let peak_x = history
        .positions()
        .iter()
        .map(|x| OrderedFloat(x.abs()))
        .max()
        .unwrap()
        .0;
    let peak_theta = history
        .angles()
        .iter()
        .map(|t| OrderedFloat(t.abs()))
        .max()
        .unwrap()
        .0;
    println!("Peak |x|     = {:.3} m", peak_x);
    println!("Peak |theta| = {:.3} rad", peak_theta);

    let position_series: Vec<(f64, f64)> = izip!(history.times.iter(), history.positions())
        .map(|(&t, x)| (t, x))
        .collect();
    let angle_series: Vec<(f64, f64)> = izip!(history.times.iter(), history.angles())
        .map(|(&t, theta)| (t, theta))
        .collect();

    let y_span = peak_x.max(peak_theta) * 1.1;

    let s0: Plot = Plot::new(position_series).line_style(
        LineStyle::new()
            .colour("#0000FF")
            .width(1.5),
    );
    let s1: Plot = Plot::new(angle_series).line_style(
        LineStyle::new()
            .colour("#DD3355")
            .width(1.5),
    );

    let v = ContinuousView::new()
        .add(s0)
        .add(s1)
        .x_range(0.0, 20.0)
        .y_range(-y_span, y_span)
        .x_label("time [s]")
        .y_label("x [m] (blue), theta [rad] (red)");

    std::fs::create_dir_all("img/cartpole").unwrap();
    Page::single(&v)
        .save("./img/cartpole/free_response.svg")
        .unwrap();
    println!("Free response plot saved to: img/cartpole/free_response.svg");
}
