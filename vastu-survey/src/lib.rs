//! # Vastu-Survey: Station-by-Station Survey Mapping
//!
//! Builds a 2D map from discrete range-sensor sweeps ("survey tours") taken at
//! stations, fits walls to each sweep, and decides where the robot should
//! move next by following the nearest wall.
//!
//! ## Coordinate Frame
//!
//! Topographic convention, lengths in centimeters:
//! - **X-east**, **Y-north**
//! - **Bearings** are measured clockwise from north; a positive turn is a
//!   turn to the right
//!
//! ## Architecture
//!
//! - [`core`]: Angle, Point, Bounds
//! - [`survey`]: SurveyPoint, SurveyNode, Wall, SurveyMap
//! - [`extraction`]: point runs and least-squares wall fitting
//! - [`hardware`]: Scanner / Driver capability traits and drive geometry
//! - [`navigation`]: pose primitives, wall follower, mission state machine
//! - [`io`]: XML persistence and SVG export
//! - [`config`]: TOML configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use vastu_survey::survey::SurveyNode;
//! use vastu_survey::core::{Angle, Point};
//!
//! let mut node = SurveyNode::new(Point::new(0.0, 0.0), Angle::default(), Point::default());
//! for i in 0..6 {
//!     node.add_point(Point::new(-20.0 + 8.0 * i as f32, 40.0), 0.0, 40.0);
//! }
//! node.compute_wall_data();
//! assert_eq!(node.walls().len(), 1);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod extraction;
pub mod hardware;
pub mod io;
pub mod navigation;
pub mod survey;

pub use config::SurveyConfig;
pub use core::{Angle, Bounds, FLAT_ANGLE, Point, RIGHT_ANGLE};
pub use error::{Result, SurveyError};
pub use hardware::{DriveGeometry, Driver, Scanner, WheelCommand};
pub use navigation::{
    Maneuver, MissionState, Pose, SurveyMission, Surveyor, TourReport, WallFollower,
};
pub use survey::{SurveyMap, SurveyNode, SurveyPoint, Wall, WallSide};
