//! Robot pose and the pose primitives turn / move forward / goto.

use log::{debug, info};

use crate::config::{RobotConfig, TourConfig};
use crate::core::{Angle, Point};
use crate::error::Result;
use crate::hardware::{Driver, Scanner};
use crate::survey::SurveyNode;

use super::Maneuver;

/// Robot pose in the map frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Point,
    pub orientation: Angle,
}

impl Pose {
    pub fn new(position: Point, orientation: Angle) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

/// Robot that takes survey sweeps and moves between stations.
///
/// The pose is dead-reckoned: every primitive sends its command to the
/// driver first and only updates the pose once the command succeeded.
pub struct Surveyor<S: Scanner, D: Driver> {
    scanner: S,
    driver: D,
    pose: Pose,
    tour: TourConfig,
    robot: RobotConfig,
}

impl<S: Scanner, D: Driver> Surveyor<S, D> {
    pub fn new(scanner: S, driver: D, tour: TourConfig, robot: RobotConfig) -> Self {
        Self {
            scanner,
            driver,
            pose: Pose::default(),
            tour,
            robot,
        }
    }

    /// Start from a known pose instead of the origin.
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Rotate in place. Positive angles turn right.
    pub fn turn(&mut self, angle: Angle) -> Result<Angle> {
        info!("[Surveyor] Turn {}", angle);
        self.driver.rotate(angle)?;
        self.pose.orientation += angle;
        debug!("[Surveyor] Orientation {}", self.pose.orientation);
        Ok(self.pose.orientation)
    }

    /// Drive straight along the current orientation.
    pub fn move_forward(&mut self, distance: f32) -> Result<Point> {
        info!("[Surveyor] Move forward {:.1}cm", distance);
        self.driver.drive_forward(distance)?;
        let heading = self.pose.orientation;
        self.pose.position = Point::new(
            self.pose.position.x + distance * heading.sin(),
            self.pose.position.y + distance * heading.cos(),
        );
        debug!(
            "[Surveyor] Position ({:.1}, {:.1})",
            self.pose.position.x, self.pose.position.y
        );
        Ok(self.pose.position)
    }

    /// Face `target` then drive to it.
    ///
    /// A target at the current position is a no-op.
    pub fn goto(&mut self, target: Point) -> Result<Point> {
        let delta = target - self.pose.position;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            debug!("[Surveyor] Already at ({:.1}, {:.1})", target.x, target.y);
            return Ok(self.pose.position);
        }
        let bearing = Angle::bearing(delta.x, delta.y);
        self.turn(bearing - self.pose.orientation)?;
        self.move_forward(distance)
    }

    /// Execute a maneuver chosen by the wall follower.
    pub fn execute(&mut self, maneuver: &Maneuver) -> Result<Pose> {
        match *maneuver {
            Maneuver::Advance { distance } => {
                self.move_forward(distance)?;
            }
            Maneuver::TurnAndAdvance { turn, distance } => {
                self.turn(turn)?;
                self.move_forward(distance)?;
            }
            Maneuver::Goto { target, .. } => {
                self.goto(target)?;
            }
            Maneuver::Turn { angle } => {
                self.turn(angle)?;
            }
        }
        Ok(self.pose)
    }

    /// Take one sweep at the current pose.
    ///
    /// Every reading is appended in scan order, then walls are fitted. The
    /// returned station is not yet part of any map.
    pub fn survey_tour(&mut self) -> Result<SurveyNode> {
        let mut node = SurveyNode::new(
            self.pose.position,
            self.pose.orientation,
            self.robot.sensor_offset(),
        );
        for angle in self.tour.angles() {
            let angle = angle as f32;
            let range = self.scanner.scan(Angle::from_degrees(angle))?;
            node.add_polar_point(angle, range + self.robot.range_bias);
        }
        node.compute_wall_data();
        info!(
            "[Surveyor] Tour at ({:.1}, {:.1}): {} points, {} walls",
            node.position().x,
            node.position().y,
            node.len(),
            node.walls().len()
        );
        Ok(node)
    }
}
