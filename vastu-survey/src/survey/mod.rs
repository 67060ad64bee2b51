//! Survey data model.
//!
//! A [`SurveyMap`] is an append-only list of stations ([`SurveyNode`]). Each
//! station holds the points of one sensor sweep in scan order and the
//! [`Wall`]s fitted to them.

mod map;
mod node;
mod point;
mod wall;

pub use map::SurveyMap;
pub use node::SurveyNode;
pub use point::SurveyPoint;
pub use wall::{Wall, WallSide};

/// Neighbor distance (cm) below which two consecutive points confirm each
/// other and may belong to the same wall.
pub const THRESHOLD: f32 = 15.0;

/// Minimum number of points in a wall.
pub const MIN_WALL_POINTS: usize = 3;
