//! Wall extraction from a station's scan-ordered points.
//!
//! Two stages:
//! 1. [`segment_runs`] splits the sweep into runs of close, valid neighbors
//! 2. [`fit_line`] fits each run by least squares on its dominant axis

mod line_fitting;
mod segmentation;

pub use line_fitting::{LineFit, VARIANCE_EPSILON, fit_line, line_distance};
pub use segmentation::segment_runs;
