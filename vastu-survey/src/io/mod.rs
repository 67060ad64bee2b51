//! Map persistence and visualization.
//!
//! - [`xml_format`]: the `map.xml` document (save / load)
//! - [`svg`]: SVG rendering of stations, points and walls

pub mod svg;
pub mod xml_format;

pub use svg::{SvgColorScheme, SvgConfig, SvgVisualizer};
pub use xml_format::{load_map, read_map, save_map, write_map};
