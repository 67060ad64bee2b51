//! Error model of the simulated robot.
//!
//! Range readings get Gaussian noise and, now and then, a lost echo (the
//! ultrasonic pulse glances off a wall and never returns). Every motion
//! command over- or undershoots by a Gaussian amount.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;
use vastu_survey::Angle;

use crate::config::SimulationConfig;

/// Seeded sensor and motion noise.
#[derive(Clone)]
pub struct SensorNoise {
    rng: SmallRng,
    range_stddev: f32,
    echo_dropout: f64,
    turn_stddev_deg: f32,
    drive_stddev: f32,
}

impl SensorNoise {
    /// Seed 0 draws the seed from OS entropy.
    pub fn new(config: &SimulationConfig) -> Self {
        let rng = if config.seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(config.seed)
        };
        Self {
            rng,
            range_stddev: config.range_stddev,
            echo_dropout: if config.echo_dropout.is_finite() {
                f64::from(config.echo_dropout.clamp(0.0, 1.0))
            } else {
                0.0
            },
            turn_stddev_deg: config.turn_stddev_deg,
            drive_stddev: config.drive_stddev,
        }
    }

    /// Reading for a surface at `distance`, `max_range` when the echo is lost.
    pub fn range(&mut self, distance: f32, max_range: f32) -> f32 {
        if distance >= max_range || self.rng.gen_bool(self.echo_dropout) {
            return max_range;
        }
        let reading = distance + self.gaussian(self.range_stddev);
        reading.clamp(0.0, max_range)
    }

    /// Rotation error of one turn command.
    pub fn turn_error(&mut self) -> Angle {
        Angle::from_degrees(self.gaussian(self.turn_stddev_deg))
    }

    /// Distance error of one drive command, cm.
    pub fn drive_error(&mut self) -> f32 {
        self.gaussian(self.drive_stddev)
    }

    fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * stddev
    }
}
