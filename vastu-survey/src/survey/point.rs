//! A single range reading projected into the map frame.

use crate::core::Point;

/// Map-frame sample with the raw reading it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurveyPoint {
    pub position: Point,
    /// Scan angle in degrees, robot frame, positive to the right.
    pub raw_angle: f32,
    /// Measured range in cm.
    pub raw_distance: f32,
    pub is_valid: bool,
}

impl SurveyPoint {
    /// New point, invalid until a close neighbor confirms it.
    pub fn new(position: Point, raw_angle: f32, raw_distance: f32) -> Self {
        Self {
            position,
            raw_angle,
            raw_distance,
            is_valid: false,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn distance(&self, other: &SurveyPoint) -> f32 {
        self.position.distance(&other.position)
    }
}
