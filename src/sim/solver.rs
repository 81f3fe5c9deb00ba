//! Fixed-step integrators for the mass-spring-damper ODE.
//!
//! Both methods share the time step, the step budget and the early-stop rule:
//! oscillating systems stop once two consecutive peaks have decayed below
//! 2% of the first peak, overdamped systems stop after two natural periods.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::system::{MassSpringDamper, SETTLING_FRACTION};
use crate::data::{Dataset, Sample};

/// Hard cap on stored samples for systems with very long natural periods.
pub const MAX_SAMPLES: usize = 5_000_000;

/// Upper bound on the time step (s).
const MAX_DT: f64 = 0.01;

/// Natural periods covered when no early stop triggers.
const PERIOD_BUDGET: f64 = 100.0;

/// Natural periods simulated for overdamped systems.
const OVERDAMPED_PERIODS: f64 = 2.0;

/// Integration method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Semi-implicit Euler: a, then v, then x.
    Euler,
    /// Classical fourth-order Runge-Kutta.
    #[default]
    Rk4,
}

/// `dt = min(0.1 / wn, 0.01)`
pub fn time_step(system: &MassSpringDamper) -> f64 {
    (0.1 / system.natural_frequency()).min(MAX_DT)
}

/// Exclusive upper bound of the step index, before the sample cap.
pub fn step_budget(system: &MassSpringDamper, dt: f64) -> usize {
    (PERIOD_BUDGET * system.natural_period() / dt) as usize
}

/// Integrate from `(x0, v0)` at `t = 0`. Row `i` is at `t = i·dt`.
pub fn simulate(system: &MassSpringDamper, method: Method) -> Dataset {
    let dt = time_step(system);
    let mut budget = step_budget(system, dt);
    if budget > MAX_SAMPLES {
        warn!(
            budget,
            cap = MAX_SAMPLES,
            "step budget exceeds sample cap, truncating run"
        );
        budget = MAX_SAMPLES;
    }

    let oscillating = system.damping_ratio() <= 1.0;
    let overdamped_stop = (OVERDAMPED_PERIODS * system.natural_period() / dt) as usize;

    let p = system.parameters();
    let mut data = Dataset::with_capacity(budget.clamp(1, 100_000));
    data.push(Sample {
        time: 0.0,
        position: p.x0,
        velocity: p.v0,
        acceleration: system.acceleration(p.x0, p.v0),
    });

    let mut x = p.x0;
    let mut v = p.v0;
    let mut peaks = PeakTracker::default();

    for i in 1..budget {
        let (nx, nv, a) = match method {
            Method::Euler => euler_step(system, x, v, dt),
            Method::Rk4 => rk4_step(system, x, v, dt),
        };
        x = nx;
        v = nv;
        data.push(Sample {
            time: i as f64 * dt,
            position: x,
            velocity: v,
            acceleration: a,
        });

        if oscillating {
            if i > 2 {
                let pos = data.position();
                let (before, peak, after) = (pos[i - 2].abs(), pos[i - 1].abs(), pos[i].abs());
                if before < peak && peak > after && peaks.observe(peak) {
                    debug!(step = i, peaks = peaks.count, "amplitude settled");
                    break;
                }
            }
        } else if i == overdamped_stop {
            break;
        }
    }

    debug!(
        method = ?method,
        dt,
        samples = data.len(),
        "simulation finished"
    );
    data
}

/// Returns `(x, v, a)` after one step; `a` is the one used to update `v`.
fn euler_step(system: &MassSpringDamper, x: f64, v: f64, dt: f64) -> (f64, f64, f64) {
    let a = system.acceleration(x, v);
    let v = v + a * dt;
    let x = x + v * dt;
    (x, v, a)
}

/// Returns `(x, v, a)` after one step; `a` is evaluated at the new state.
fn rk4_step(system: &MassSpringDamper, x: f64, v: f64, dt: f64) -> (f64, f64, f64) {
    let half = dt / 2.0;

    let kx1 = v;
    let kv1 = system.acceleration(x, v);

    let kx2 = v + kv1 * half;
    let kv2 = system.acceleration(x + kx1 * half, kx2);

    let kx3 = v + kv2 * half;
    let kv3 = system.acceleration(x + kx2 * half, kx3);

    let kx4 = v + kv3 * dt;
    let kv4 = system.acceleration(x + kx3 * dt, kx4);

    let x = x + (kx1 + 2.0 * kx2 + 2.0 * kx3 + kx4) / 6.0 * dt;
    let v = v + (kv1 + 2.0 * kv2 + 2.0 * kv3 + kv4) / 6.0 * dt;
    (x, v, system.acceleration(x, v))
}

/// Tracks |x| peaks: the first one is the reference, then the last two.
#[derive(Debug, Default)]
struct PeakTracker {
    reference: f64,
    previous: f64,
    latest: f64,
    count: usize,
}

impl PeakTracker {
    /// Record a peak amplitude; true once the last two peaks are both below
    /// the settling fraction of the reference.
    fn observe(&mut self, amplitude: f64) -> bool {
        match self.count {
            0 => {
                self.reference = amplitude;
                self.previous = amplitude;
            }
            1 => self.latest = amplitude,
            _ => {
                self.previous = self.latest;
                self.latest = amplitude;
            }
        }

        let threshold = SETTLING_FRACTION * self.reference;
        let settled = self.count > 0 && self.previous < threshold && self.latest < threshold;
        self.count += 1;
        settled
    }
}
