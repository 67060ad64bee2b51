//! Core geometric types: angles, points and bounding boxes.

mod angle;
mod bounds;
mod point;

pub use angle::{Angle, FLAT_ANGLE, RIGHT_ANGLE, normalize_radians};
pub use bounds::Bounds;
pub use point::Point;
