//! Velocity estimation for the settling phase of a gesture.
//!
//! The detector feeds one pan displacement per frame into the tracker and
//! asks for a velocity once when the last finger lifts. Estimation uses the
//! impulse strategy: per-sample velocities are integrated as kinetic energy,
//! which weighs recent samples heavier and is robust against a single
//! outlier frame.

use cgmath::Vector2;

/// Ring buffer capacity for displacement samples.
const HISTORY_SIZE: usize = 20;

/// Samples older than this lookback window behind the newest one are
/// discarded.
const HORIZON_MS: u64 = 100;

/// A gap longer than this between consecutive samples means the pointer
/// stood still; older samples no longer describe the current motion.
const ASSUME_POINTER_MOVE_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy)]
struct Sample {
    uptime_ms: u64,
    displacement: f64,
}

/// Tracks displacement samples along one axis.
#[derive(Clone)]
struct AxisVelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl AxisVelocityTracker {
    fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    fn add_displacement(&mut self, uptime_ms: u64, displacement: f64) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample {
            uptime_ms,
            displacement,
        });
    }

    /// Velocity in units per second, 0.0 when fewer than two samples fall
    /// inside the lookback window.
    fn calculate_velocity(&self) -> f64 {
        let mut displacements = [0.0; HISTORY_SIZE];
        let mut times = [0.0; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        // Walk backwards from the newest sample, newest first, until the
        // window ends or the ring buffer is exhausted.
        let mut index = self.index;
        let mut previous = newest;
        while let Some(sample) = self.samples[index] {
            let age = newest.uptime_ms.saturating_sub(sample.uptime_ms);
            let gap = previous.uptime_ms.saturating_sub(sample.uptime_ms);
            if age > HORIZON_MS || gap > ASSUME_POINTER_MOVE_STOPPED_MS {
                break;
            }

            displacements[count] = sample.displacement;
            times[count] = -(age as f64);
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }

            previous = sample;
            index = if index == 0 { HISTORY_SIZE - 1 } else { index - 1 };
        }

        impulse_velocity(&displacements[..count], &times[..count]) * 1000.0
    }
}

/// Impulse integration over displacement samples ordered newest first, with
/// `times` holding negative ages in milliseconds. Returns units per
/// millisecond.
fn impulse_velocity(displacements: &[f64], times: &[f64]) -> f64 {
    let count = displacements.len();
    if count < 2 {
        return 0.0;
    }
    if count == 2 {
        if times[0] == times[1] {
            return 0.0;
        }
        return displacements[0] / (times[0] - times[1]);
    }

    let mut work = 0.0;
    for i in (1..count).rev() {
        if times[i] == times[i - 1] {
            continue;
        }
        let velocity_before = kinetic_energy_to_velocity(work);
        // Sample i-1 is the newer of the pair; its displacement happened
        // over the interval between the two timestamps.
        let velocity_now = -displacements[i - 1] / (times[i] - times[i - 1]);
        work += (velocity_now - velocity_before) * velocity_now.abs();
        if i == count - 1 {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// Inverts `E = v^2 / 2`, keeping the sign of the accumulated energy.
fn kinetic_energy_to_velocity(kinetic_energy: f64) -> f64 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Estimates a 2D velocity from a short history of timestamped displacement
/// samples. One gesture session's worth of history at a time; reset at
/// every session start.
#[derive(Clone)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            x: AxisVelocityTracker::new(),
            y: AxisVelocityTracker::new(),
        }
    }

    /// Clears all history.
    pub fn reset_tracking(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    /// Appends one displacement sample. Timestamps are expected to be
    /// monotonically non-decreasing; feeding them out of order degrades the
    /// estimate but never fails.
    pub fn add_position(&mut self, uptime_ms: u64, displacement: Vector2<f64>) {
        self.x.add_displacement(uptime_ms, displacement.x);
        self.y.add_displacement(uptime_ms, displacement.y);
    }

    /// Estimated velocity in units per second. Degrades to the zero vector
    /// when fewer than two usable samples exist.
    pub fn calculate_velocity(&self) -> Vector2<f64> {
        Vector2::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }
}
