//! Simulated robot for running missions without hardware.
//!
//! - [`noise`]: seeded range, echo loss and motion noise
//! - [`room`]: wall segments and ray casting
//! - [`robot`]: true robot pose, driven through the Scanner / Driver traits

mod noise;
mod robot;
mod room;

pub use noise::SensorNoise;
pub use robot::{SimDriver, SimScanner, SimulatedRobot};
pub use room::Room;
