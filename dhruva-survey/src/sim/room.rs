//! Room geometry and ray casting.

use vastu_survey::{Angle, Point};

use crate::config::WallSegment;

/// Set of wall segments, cm.
#[derive(Clone, Debug)]
pub struct Room {
    walls: Vec<WallSegment>,
}

impl Room {
    pub fn new(walls: Vec<WallSegment>) -> Self {
        Self { walls }
    }

    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    /// Distance from `origin` along `bearing` to the first wall, capped at
    /// `max_range`.
    pub fn ray_cast(&self, origin: Point, bearing: Angle, max_range: f32) -> f32 {
        let dir = Point::new(bearing.sin(), bearing.cos());
        let mut nearest = max_range;

        for wall in &self.walls {
            let a = wall.start();
            let seg = wall.end() - a;
            let denom = dir.x * seg.y - dir.y * seg.x;
            if denom.abs() < 1e-9 {
                // parallel
                continue;
            }
            let ao = a - origin;
            let t = (ao.x * seg.y - ao.y * seg.x) / denom;
            let u = (ao.x * dir.y - ao.y * dir.x) / denom;
            if t > 0.0 && (0.0..=1.0).contains(&u) && t < nearest {
                nearest = t;
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Room {
        Room::new(vec![
            WallSegment::new(0.0, 0.0, 100.0, 0.0),
            WallSegment::new(100.0, 0.0, 100.0, 100.0),
            WallSegment::new(100.0, 100.0, 0.0, 100.0),
            WallSegment::new(0.0, 100.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn test_axis_rays() {
        let room = square();
        let origin = Point::new(30.0, 40.0);
        assert_relative_eq!(room.ray_cast(origin, Angle::from_degrees(0.0), 255.0), 60.0, epsilon = 1e-3);
        assert_relative_eq!(room.ray_cast(origin, Angle::from_degrees(90.0), 255.0), 70.0, epsilon = 1e-3);
        assert_relative_eq!(room.ray_cast(origin, Angle::from_degrees(180.0), 255.0), 40.0, epsilon = 1e-3);
        assert_relative_eq!(room.ray_cast(origin, Angle::from_degrees(-90.0), 255.0), 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_diagonal_ray() {
        let room = square();
        let d = room.ray_cast(Point::new(50.0, 50.0), Angle::from_degrees(45.0), 255.0);
        assert_relative_eq!(d, 50.0 * 2f32.sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn test_no_echo_reports_max_range() {
        let room = Room::new(vec![WallSegment::new(-10.0, 50.0, 10.0, 50.0)]);
        assert_eq!(room.ray_cast(Point::new(0.0, 0.0), Angle::from_degrees(180.0), 255.0), 255.0);
        assert_eq!(room.ray_cast(Point::new(0.0, 0.0), Angle::from_degrees(0.0), 30.0), 30.0);
    }
}
