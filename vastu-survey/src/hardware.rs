//! Capability traits at the hardware boundary.
//!
//! The navigation code only needs to take a range reading at a given scan
//! angle and to execute rotations and straight moves. Motor control details
//! stay behind [`Driver`]; [`DriveGeometry`] converts a maneuver into the
//! wheel command a tracked robot executes.

use crate::core::Angle;
use crate::error::Result;

/// Rotating range sensor.
pub trait Scanner {
    /// Range in cm at `angle` (robot frame, positive to the right).
    ///
    /// A sensor that gets no echo reports its maximum range.
    fn scan(&mut self, angle: Angle) -> Result<f32>;
}

/// Drive train.
pub trait Driver {
    /// Rotate in place; positive turns right.
    fn rotate(&mut self, angle: Angle) -> Result<()>;

    /// Drive straight; negative distances back up.
    fn drive_forward(&mut self, distance_cm: f32) -> Result<()>;
}

/// Steering and motor rotation for one maneuver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelCommand {
    /// -100 (spin left) to 100 (spin right), 0 straight.
    pub steering: i32,
    /// Motor rotation in degrees; negative drives backward.
    pub degrees: f32,
}

/// Track spacing and wheel radius of a differential drive (cm).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveGeometry {
    pub track_spacing: f32,
    pub wheel_radius: f32,
}

impl DriveGeometry {
    pub fn new(track_spacing: f32, wheel_radius: f32) -> Self {
        Self {
            track_spacing,
            wheel_radius,
        }
    }

    /// Spin in place by `angle`.
    pub fn turn(&self, angle: Angle) -> WheelCommand {
        let steering = if angle.radians() < 0.0 { -100 } else { 100 };
        WheelCommand {
            steering,
            degrees: angle.degrees().abs() * self.track_spacing / (2.0 * self.wheel_radius),
        }
    }

    /// Drive straight by `distance_cm`.
    pub fn forward(&self, distance_cm: f32) -> WheelCommand {
        WheelCommand {
            steering: 0,
            degrees: (distance_cm / self.wheel_radius).to_degrees(),
        }
    }

    /// Robot rotation produced by a spin command.
    pub fn rotation_of(&self, command: &WheelCommand) -> Angle {
        let degrees = command.degrees * 2.0 * self.wheel_radius / self.track_spacing;
        Angle::from_degrees(degrees * command.steering.signum() as f32)
    }

    /// Distance covered by a straight command.
    pub fn distance_of(&self, command: &WheelCommand) -> f32 {
        command.degrees.to_radians() * self.wheel_radius
    }
}
