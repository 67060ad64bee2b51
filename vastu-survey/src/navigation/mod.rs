//! Wall-following navigation.
//!
//! - [`Surveyor`]: robot pose, pose primitives and the survey sweep
//! - [`WallFollower`]: decides the next maneuver from a finished station
//! - [`SurveyMission`]: Scanning → Deciding → Moving cycle over a map

mod follower;
mod mission;
mod robot;

pub use follower::{Maneuver, WallFollower};
pub use mission::{MissionState, SurveyMission, TourReport};
pub use robot::{Pose, Surveyor};
