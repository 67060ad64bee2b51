//! Test utilities for survey missions.
//!
//! A ray-cast room shared by a scanner and a driver, so a mission can run
//! against known geometry without hardware.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vastu_survey::{Angle, Driver, Point, Pose, Result, Scanner, SurveyConfig, SurveyError};

/// Range reported when nothing echoes back.
pub const MAX_RANGE: f32 = 255.0;

/// Room walls plus the true robot pose.
pub struct Room {
    pub walls: Vec<(Point, Point)>,
    pub pose: Pose,
    pub sensor_offset: Point,
    pub fail_after: Option<usize>,
    pub commands: usize,
}

pub type SharedRoom = Rc<RefCell<Room>>;

pub struct RoomScanner(pub SharedRoom);

pub struct RoomDriver(pub SharedRoom);

/// Axis-aligned rectangular room with its south-west corner at the origin.
pub fn rectangular_room(width: f32, height: f32, pose: Pose, sensor_offset: Point) -> SharedRoom {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(width, height),
        Point::new(0.0, height),
    ];
    let walls = (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect();
    room_with_walls(walls, pose, sensor_offset)
}

/// Room made of arbitrary wall segments.
pub fn room_with_walls(walls: Vec<(Point, Point)>, pose: Pose, sensor_offset: Point) -> SharedRoom {
    Rc::new(RefCell::new(Room {
        walls,
        pose,
        sensor_offset,
        fail_after: None,
        commands: 0,
    }))
}

/// Survey config without sensor bias, as the room scanner reports exact ranges.
pub fn exact_config() -> SurveyConfig {
    let mut config = SurveyConfig::default();
    config.robot.range_bias = 0.0;
    config
}

impl Room {
    /// Sensor axis in the map frame.
    pub fn sensor_origin(&self) -> Point {
        let (sin, cos) = (self.pose.orientation.sin(), self.pose.orientation.cos());
        let o = self.sensor_offset;
        Point::new(
            self.pose.position.x + o.x * cos + o.y * sin,
            self.pose.position.y - o.x * sin + o.y * cos,
        )
    }

    /// Distance from `origin` along `bearing` to the nearest wall.
    pub fn cast(&self, origin: Point, bearing: Angle) -> f32 {
        let dir = Point::new(bearing.sin(), bearing.cos());
        let mut best = MAX_RANGE;
        for &(a, b) in &self.walls {
            let seg = b - a;
            let denom = dir.x * seg.y - dir.y * seg.x;
            if denom.abs() < 1e-9 {
                continue;
            }
            let ao = a - origin;
            let t = (ao.x * seg.y - ao.y * seg.x) / denom;
            let u = (ao.x * dir.y - ao.y * dir.x) / denom;
            if t > 0.0 && (0.0..=1.0).contains(&u) && t < best {
                best = t;
            }
        }
        best
    }

    /// Distance from a point to the closest room wall segment.
    pub fn distance_to_walls(&self, p: Point) -> f32 {
        self.walls
            .iter()
            .map(|&(a, b)| {
                let ab = b - a;
                let t = ((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / (ab.x * ab.x + ab.y * ab.y);
                let closest = a + ab * t.clamp(0.0, 1.0);
                p.distance(&closest)
            })
            .fold(f32::INFINITY, f32::min)
    }

    fn command(&mut self) -> Result<()> {
        self.commands += 1;
        match self.fail_after {
            Some(limit) if self.commands > limit => {
                Err(SurveyError::Hardware("drive motor stalled".to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl Scanner for RoomScanner {
    fn scan(&mut self, angle: Angle) -> Result<f32> {
        let room = self.0.borrow();
        let origin = room.sensor_origin();
        Ok(room.cast(origin, room.pose.orientation + angle))
    }
}

impl Driver for RoomDriver {
    fn rotate(&mut self, angle: Angle) -> Result<()> {
        let mut room = self.0.borrow_mut();
        room.command()?;
        room.pose.orientation += angle;
        Ok(())
    }

    fn drive_forward(&mut self, distance_cm: f32) -> Result<()> {
        let mut room = self.0.borrow_mut();
        room.command()?;
        let heading = room.pose.orientation;
        room.pose.position = Point::new(
            room.pose.position.x + distance_cm * heading.sin(),
            room.pose.position.y + distance_cm * heading.cos(),
        );
        Ok(())
    }
}
