// LQR-stabilized cart-pendulum demo with a gnuplot frame overlay.
//
// Visualization style based on the inverted pendulum demos in
// PythonRobotics by AtsushiSakai.

use cartpole_sim::{
    Actuator, Cart, LQRController, LinearizedModel, NonlinearModel, Pendulum, Plant,
    RK4Integrator, Simulation, State,
};
use gnuplot::{AxesCommon, Coordinate, Figure, PlotOption};
use nalgebra::{Matrix4, Vector4};
use uom::si::acceleration::meter_per_second_squared;
use uom::si::f64::{Acceleration, Force, Length, Mass, Velocity};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::velocity::meter_per_second;

const SIM_TIME: f64 = 5.0; // [s]
const DELTA_T: f64 = 0.01; // [s]

fn circle_points(cx: f64, cy: f64, radius: f64) -> (Vec<f64>, Vec<f64>) {
    let n = 20;
    let mut xs = Vec::with_capacity(n + 1);
    let mut ys = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
        xs.push(cx + radius * angle.cos());
        ys.push(cy + radius * angle.sin());
    }
    (xs, ys)
}

fn main() {
    let friction = Force::new::<newton>(1.0) / Velocity::new::<meter_per_second>(1.0);
    let plant = Plant::new(
        Cart::new(Mass::new::<kilogram>(5.0), friction),
        Pendulum::new(Mass::new::<kilogram>(1.0), Length::new::<meter>(2.0)),
        Actuator::ideal(),
        Acceleration::new::<meter_per_second_squared>(10.0),
    )
    .unwrap();

    let q = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, 10.0, 1.0));
    let controller = LQRController::new(q, 0.1, &LinearizedModel::new(), &plant)
        .expect("LQR synthesis failed");
    println!("LQR gain: {:?}", controller.gain());

    // 0.3 rad initial lean (~17 deg)
    let initial = State::from_vector(&Vector4::new(0.0, 0.0, 0.3, 0.0));
    let mut sim = Simulation::new(
        plant,
        NonlinearModel::new(),
        controller,
        RK4Integrator::new(),
        initial,
    );

    let steps = (SIM_TIME / DELTA_T) as usize;
    let times: Vec<f64> = (0..=steps).map(|i| i as f64 * DELTA_T).collect();

    println!("Starting cart-pendulum LQR simulation...");
    let history = sim.run(&times).expect("simulation failed");

    let last = history.last_state().unwrap();
    println!("Simulation finished");
    println!(
        "Final state: x={:.3} [m], theta={:.2} [deg]",
        last[0],
        last[2].to_degrees()
    );

    visualize(sim.plant(), &history, "cartpole_lqr.png");
    println!("Cart-pendulum LQR demo complete!");
}

/// Overlay a handful of frames, older frames drawn lighter.
fn visualize(plant: &Plant, history: &cartpole_sim::SimulationHistory, filename: &str) {
    let num_frames = 6;
    let total_steps = history.len();
    let step_interval = total_steps / num_frames;

    let cart_width = plant.cart().width.get::<meter>();
    let cart_height = plant.cart().height.get::<meter>();
    let tip_radius = 0.1;

    let mut fg = Figure::new();
    {
        let axes = fg
            .axes2d()
            .set_title("Cart-Pendulum LQR Control", &[])
            .set_x_label("x [m]", &[])
            .set_y_label("y [m]", &[])
            .set_aspect_ratio(gnuplot::AutoOption::Fix(1.0))
            .set_x_range(
                gnuplot::AutoOption::Fix(-3.0),
                gnuplot::AutoOption::Fix(3.0),
            )
            .set_y_range(
                gnuplot::AutoOption::Fix(-1.0),
                gnuplot::AutoOption::Fix(3.0),
            );

        // Ground line
        axes.lines(
            &[-4.0, 4.0],
            &[0.0, 0.0],
            &[PlotOption::Color("gray"), PlotOption::LineWidth(2.0)],
        );

        let cart_colors = ["#CCCCFF", "#AAAAFF", "#8888FF", "#6666FF", "#4444FF", "#0000FF"];
        let pendulum_colors = ["#CCCCCC", "#AAAAAA", "#888888", "#666666", "#444444", "#000000"];

        for frame_idx in 0..num_frames {
            let step = if frame_idx == num_frames - 1 {
                total_steps - 1
            } else {
                frame_idx * step_interval
            };

            let time = history.times[step];
            let state = &history.states[step];
            let ((pivot_x, pivot_y), (tip_x, tip_y)) = plant.get_endpoints(state[0], state[2]);

            // Cart rectangle
            let (ll_x, ll_y) = plant.cart().ll_corner(state[0]);
            let cart_xs = vec![ll_x, ll_x + cart_width, ll_x + cart_width, ll_x, ll_x];
            let cart_ys = vec![
                ll_y,
                ll_y,
                ll_y + cart_height,
                ll_y + cart_height,
                ll_y,
            ];
            axes.lines(
                &cart_xs,
                &cart_ys,
                &[
                    PlotOption::Color(cart_colors[frame_idx]),
                    PlotOption::LineWidth(2.0),
                ],
            );

            // Pendulum bar and tip mass
            axes.lines(
                &[pivot_x, tip_x],
                &[pivot_y, tip_y],
                &[
                    PlotOption::Color(pendulum_colors[frame_idx]),
                    PlotOption::LineWidth(3.0),
                ],
            );
            let (tip_xs, tip_ys) = circle_points(tip_x, tip_y, tip_radius);
            axes.lines(
                &tip_xs,
                &tip_ys,
                &[
                    PlotOption::Color(pendulum_colors[frame_idx]),
                    PlotOption::LineWidth(2.0),
                ],
            );

            if frame_idx == num_frames - 1 {
                axes.label(
                    &format!("t={:.1}s", time),
                    Coordinate::Graph(0.02),
                    Coordinate::Graph(0.95),
                    &[],
                );
            }
        }

        let initial_state = &history.states[0];
        axes.label(
            &format!("Initial angle: {:.1} deg", initial_state[2].to_degrees()),
            Coordinate::Graph(0.02),
            Coordinate::Graph(0.88),
            &[],
        );
    }

    let output_path = format!("img/cartpole/{}", filename);
    std::fs::create_dir_all("img/cartpole").unwrap();
    fg.set_terminal("pngcairo size 800,600", &output_path);
    fg.show().unwrap();
    println!("Cart-pendulum visualization saved to: {}", output_path);
}
