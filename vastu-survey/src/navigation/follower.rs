//! Wall-following decision procedure.
//!
//! After each tour the follower looks at the station's nearest wall:
//!
//! | Nearest wall | Maneuver |
//! |--------------|----------|
//! | none, no points | advance one station step |
//! | none | face the closest reading, stop one step short of it |
//! | left | sidestep off the wall's far end, keep it on the left |
//! | right | sidestep off the wall's near end, keep it on the right |
//! | front, walls both sides | turn around |
//! | front, wall on one side | sidestep along the front wall toward the open side |
//! | front only | turn right |

use log::info;

use crate::core::{Angle, FLAT_ANGLE, Point, RIGHT_ANGLE};
use crate::error::{Result, SurveyError};
use crate::survey::{SurveyNode, Wall, WallSide};

use super::Pose;

/// Motion chosen for the next station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Maneuver {
    /// Drive straight ahead.
    Advance { distance: f32 },
    /// Rotate then drive straight.
    TurnAndAdvance { turn: Angle, distance: f32 },
    /// Drive to a map-frame target along a wall.
    Goto { target: Point, side: WallSide },
    /// Rotate in place.
    Turn { angle: Angle },
}

impl Maneuver {
    /// Maneuver name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Maneuver::Advance { .. } => "Advance",
            Maneuver::TurnAndAdvance { .. } => "TurnAndAdvance",
            Maneuver::Goto { .. } => "Goto",
            Maneuver::Turn { .. } => "Turn",
        }
    }
}

/// Decides the next maneuver from a completed station.
#[derive(Clone, Copy, Debug)]
pub struct WallFollower {
    station_step: f32,
}

impl WallFollower {
    pub fn new(station_step: f32) -> Self {
        Self { station_step }
    }

    pub fn station_step(&self) -> f32 {
        self.station_step
    }

    /// Plan the maneuver out of `station` for a robot at `pose`.
    pub fn plan(&self, station: &SurveyNode, pose: &Pose) -> Result<Maneuver> {
        let Some(wall) = station.nearest_wall() else {
            return Ok(self.plan_without_wall(station, pose));
        };

        let maneuver = match wall.side() {
            WallSide::Left => self.follow_left(wall)?,
            WallSide::Right => self.follow_right(wall)?,
            WallSide::Front => {
                match (station.left_wall().is_some(), station.right_wall().is_some()) {
                    (true, true) => {
                        info!("[Follower] Dead end, turning around");
                        Maneuver::Turn { angle: FLAT_ANGLE }
                    }
                    (false, true) => self.follow_right(wall)?,
                    (true, false) => self.follow_left(wall)?,
                    (false, false) => {
                        info!("[Follower] Wall ahead, turning right");
                        Maneuver::Turn { angle: RIGHT_ANGLE }
                    }
                }
            }
        };
        Ok(maneuver)
    }

    fn plan_without_wall(&self, station: &SurveyNode, pose: &Pose) -> Maneuver {
        match station.nearest_point() {
            None => {
                info!("[Follower] Nothing in sight, advancing");
                Maneuver::Advance {
                    distance: self.station_step,
                }
            }
            Some(point) => {
                let bearing = station.orientation() + Angle::from_degrees(point.raw_angle);
                let turn = bearing - pose.orientation;
                let distance = point.raw_distance - self.station_step;
                info!(
                    "[Follower] No wall, heading for closest reading at {} ({:.1}cm)",
                    bearing, point.raw_distance
                );
                Maneuver::TurnAndAdvance { turn, distance }
            }
        }
    }

    /// Step past Pt2, keeping the wall on the left.
    fn follow_left(&self, wall: &Wall) -> Result<Maneuver> {
        let (pt1, pt2) = (wall.pt1(), wall.pt2());
        let d = pt2 - pt1;
        let r = self.wall_length(d)?;
        let target = pt2 + Point::new(d.y, -d.x) * (self.station_step / r);
        info!(
            "[Follower] Following left wall to ({:.1}, {:.1})",
            target.x, target.y
        );
        Ok(Maneuver::Goto {
            target,
            side: WallSide::Left,
        })
    }

    /// Step past Pt1, keeping the wall on the right.
    fn follow_right(&self, wall: &Wall) -> Result<Maneuver> {
        let (pt1, pt2) = (wall.pt1(), wall.pt2());
        let d = pt1 - pt2;
        let r = self.wall_length(d)?;
        let target = pt1 + Point::new(-d.y, d.x) * (self.station_step / r);
        info!(
            "[Follower] Following right wall to ({:.1}, {:.1})",
            target.x, target.y
        );
        Ok(Maneuver::Goto {
            target,
            side: WallSide::Right,
        })
    }

    fn wall_length(&self, d: Point) -> Result<f32> {
        let r = d.length();
        if r <= f32::EPSILON {
            return Err(SurveyError::Planning(
                "cannot follow a wall of zero length".to_string(),
            ));
        }
        Ok(r)
    }
}
