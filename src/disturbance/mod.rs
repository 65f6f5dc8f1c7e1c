//! State disturbance generators
//!
//! Disturbances are additive canonical-unit noise vectors produced by an
//! explicitly constructed, explicitly seeded generator instance, so runs
//! are reproducible and independent runs can use independent seeds. The
//! simulation loop never calls these itself; injection belongs to outer
//! layers.

use crate::common::{State, StateVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Trait for additive state disturbances.
pub trait Disturbance {
    /// Noise vector to add to the state at `time` [s], canonical units.
    fn apply(&mut self, state: &State, time: f64) -> StateVector;
}

/// Zero-mean-by-default Gaussian noise on each state component, active
/// only inside a configurable time window.
pub struct GaussianDisturbance {
    mean: StateVector,
    std_dev: StateVector,
    start_time: f64,
    end_time: f64,
    rng: StdRng,
}

impl GaussianDisturbance {
    /// Default disturbance: noise on the velocity components only, active
    /// for the whole run.
    pub fn new(seed: u64) -> Self {
        GaussianDisturbance {
            mean: StateVector::zeros(),
            std_dev: StateVector::new(0.0, 0.05, 0.0, 0.05),
            start_time: 0.0,
            end_time: f64::INFINITY,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_mean(mut self, mean: StateVector) -> Self {
        self.mean = mean;
        self
    }

    pub fn with_std_dev(mut self, std_dev: StateVector) -> Self {
        self.std_dev = std_dev;
        self
    }

    /// Restrict the disturbance to `[start, end]` seconds.
    pub fn with_window(mut self, start: f64, end: f64) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }
}

impl Disturbance for GaussianDisturbance {
    fn apply(&mut self, _state: &State, time: f64) -> StateVector {
        if time < self.start_time || time > self.end_time {
            return StateVector::zeros();
        }

        let mut noise = StateVector::zeros();
        for i in 0..4 {
            noise[i] = if self.std_dev[i] > 0.0 {
                let normal = Normal::new(self.mean[i], self.std_dev[i]).unwrap();
                normal.sample(&mut self.rng)
            } else {
                self.mean[i]
            };
        }
        noise
    }
}
