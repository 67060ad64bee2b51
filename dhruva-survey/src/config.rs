//! Configuration loading for DhruvaSurvey

use crate::error::{DhruvaError, Result};
use serde::Deserialize;
use std::path::Path;
use vastu_survey::config::{NavigationConfig, RobotConfig, TourConfig};
use vastu_survey::{Angle, Point, Pose, SurveyConfig};

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DhruvaConfig {
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub robot: RobotConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub mission: MissionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Simulated robot and room
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    /// Noise seed, 0 for a random seed (default: 0)
    #[serde(default)]
    pub seed: u64,

    /// Range reported when nothing echoes back, cm (default: 255)
    #[serde(default = "default_max_range")]
    pub max_range: f32,

    /// Range noise standard deviation, cm (default: 0.5)
    #[serde(default = "default_range_stddev")]
    pub range_stddev: f32,

    /// Chance that a reading loses its echo and reports max_range (default: 0.02)
    #[serde(default = "default_echo_dropout")]
    pub echo_dropout: f32,

    /// Rotation noise standard deviation, degrees (default: 0.5)
    #[serde(default = "default_turn_stddev")]
    pub turn_stddev_deg: f32,

    /// Drive noise standard deviation per move, cm (default: 0.5)
    #[serde(default = "default_drive_stddev")]
    pub drive_stddev: f32,

    /// Start position x, cm (default: 120)
    #[serde(default = "default_start_x")]
    pub start_x: f32,

    /// Start position y, cm (default: 80)
    #[serde(default = "default_start_y")]
    pub start_y: f32,

    /// Start heading, degrees clockwise from north (default: 0)
    #[serde(default)]
    pub start_heading_deg: f32,

    /// Room walls (default: 400 x 300 cm room with a pillar)
    #[serde(default = "default_walls")]
    pub walls: Vec<WallSegment>,
}

/// One straight wall of the simulated room, cm
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct WallSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Mission limits
#[derive(Clone, Debug, Deserialize)]
pub struct MissionConfig {
    /// Number of tours before the mission stops, 0 for no limit (default: 20)
    #[serde(default = "default_max_tours")]
    pub max_tours: usize,
}

/// Output configuration
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Path of the map snapshot written after each tour
    #[serde(default = "default_map_path")]
    pub map_path: String,

    /// Path to save SVG visualization, empty to skip
    #[serde(default = "default_svg_path")]
    pub svg_path: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_range: default_max_range(),
            range_stddev: default_range_stddev(),
            echo_dropout: default_echo_dropout(),
            turn_stddev_deg: default_turn_stddev(),
            drive_stddev: default_drive_stddev(),
            start_x: default_start_x(),
            start_y: default_start_y(),
            start_heading_deg: 0.0,
            walls: default_walls(),
        }
    }
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            max_tours: default_max_tours(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            map_path: default_map_path(),
            svg_path: default_svg_path(),
        }
    }
}

// Default value functions
fn default_max_range() -> f32 {
    255.0
}
fn default_range_stddev() -> f32 {
    0.5
}
fn default_echo_dropout() -> f32 {
    0.02
}
fn default_turn_stddev() -> f32 {
    0.5
}
fn default_drive_stddev() -> f32 {
    0.5
}
fn default_start_x() -> f32 {
    120.0
}
fn default_start_y() -> f32 {
    80.0
}
fn default_max_tours() -> usize {
    20
}
fn default_map_path() -> String {
    "output/map.xml".to_string()
}
fn default_svg_path() -> Option<String> {
    Some("output/map.svg".to_string())
}

fn default_walls() -> Vec<WallSegment> {
    let rect = |x0: f32, y0: f32, x1: f32, y1: f32| {
        [
            WallSegment::new(x0, y0, x1, y0),
            WallSegment::new(x1, y0, x1, y1),
            WallSegment::new(x1, y1, x0, y1),
            WallSegment::new(x0, y1, x0, y0),
        ]
    };
    let mut walls = rect(0.0, 0.0, 400.0, 300.0).to_vec();
    walls.extend(rect(260.0, 160.0, 300.0, 200.0));
    walls
}

impl WallSegment {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

impl SimulationConfig {
    pub fn start_pose(&self) -> Pose {
        Pose::new(
            Point::new(self.start_x, self.start_y),
            Angle::from_degrees(self.start_heading_deg),
        )
    }
}

impl DhruvaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DhruvaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: DhruvaConfig = toml::from_str(&content)?;
        config.survey_config().validate()?;
        Ok(config)
    }

    /// The library part of the configuration
    pub fn survey_config(&self) -> SurveyConfig {
        SurveyConfig {
            tour: self.tour.clone(),
            navigation: self.navigation.clone(),
            robot: self.robot.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DhruvaConfig::default();
        assert_eq!(config.simulation.walls.len(), 8);
        assert_eq!(config.simulation.max_range, 255.0);
        assert_eq!(config.mission.max_tours, 20);
        assert_eq!(config.output.svg_path.as_deref(), Some("output/map.svg"));
        assert_eq!(config.survey_config().navigation.station_step, 50.0);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [mission]
            max_tours = 3

            [simulation]
            seed = 7
            walls = [
                {{ x1 = 0.0, y1 = 0.0, x2 = 100.0, y2 = 0.0 }},
            ]

            [output]
            map_path = "run/map.xml"
            "#
        )
        .unwrap();

        let config = DhruvaConfig::load(file.path()).unwrap();
        assert_eq!(config.mission.max_tours, 3);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.walls, vec![WallSegment::new(0.0, 0.0, 100.0, 0.0)]);
        assert_eq!(config.output.map_path, "run/map.xml");
        assert_eq!(config.tour.step_deg, 10);
    }

    #[test]
    fn test_invalid_survey_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tour]\nstep_deg = -5").unwrap();
        assert!(matches!(
            DhruvaConfig::load(file.path()),
            Err(DhruvaError::Survey(_))
        ));
    }
}
