//! Configuration for survey tours, wall following and robot geometry.
//!
//! Every field has a default, so an empty TOML document is a valid config.
//! The defaults describe the LEGO tracked robot the survey was built for
//! (1 LEGO unit = 0.8 cm).

use crate::core::Point;
use crate::error::{Result, SurveyError};
use crate::hardware::DriveGeometry;
use serde::Deserialize;
use std::iter::StepBy;
use std::ops::Range;
use std::path::Path;

/// Survey configuration
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SurveyConfig {
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

/// Sweep taken at each station
#[derive(Clone, Debug, Deserialize)]
pub struct TourConfig {
    /// First scan angle in degrees, inclusive (default: -180)
    #[serde(default = "default_start_deg")]
    pub start_deg: i32,

    /// Last scan angle in degrees, exclusive (default: 180)
    #[serde(default = "default_end_deg")]
    pub end_deg: i32,

    /// Angle between two readings in degrees (default: 10)
    #[serde(default = "default_step_deg")]
    pub step_deg: i32,
}

/// Wall-following parameters
#[derive(Clone, Debug, Deserialize)]
pub struct NavigationConfig {
    /// Distance between stations in cm (default: 50)
    #[serde(default = "default_station_step")]
    pub station_step: f32,
}

/// Robot physical parameters
#[derive(Clone, Debug, Deserialize)]
pub struct RobotConfig {
    /// Distance between the tracks in cm (default: 17.6)
    #[serde(default = "default_track_spacing")]
    pub track_spacing: f32,

    /// Drive sprocket radius in cm (default: 1.6)
    #[serde(default = "default_wheel_radius")]
    pub wheel_radius: f32,

    /// Sensor rotation axis offset, robot frame, x to the right (default: 0)
    #[serde(default)]
    pub sensor_offset_x: f32,

    /// Sensor rotation axis offset, robot frame, y forward (default: 9.6)
    #[serde(default = "default_sensor_offset_y")]
    pub sensor_offset_y: f32,

    /// Added to every range reading: the sensor face sits in front of its
    /// rotation axis (default: 3.2)
    #[serde(default = "default_range_bias")]
    pub range_bias: f32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            start_deg: default_start_deg(),
            end_deg: default_end_deg(),
            step_deg: default_step_deg(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            station_step: default_station_step(),
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            track_spacing: default_track_spacing(),
            wheel_radius: default_wheel_radius(),
            sensor_offset_x: 0.0,
            sensor_offset_y: default_sensor_offset_y(),
            range_bias: default_range_bias(),
        }
    }
}

// Default value functions
fn default_start_deg() -> i32 {
    -180
}
fn default_end_deg() -> i32 {
    180
}
fn default_step_deg() -> i32 {
    10
}
fn default_station_step() -> f32 {
    50.0
}
fn default_track_spacing() -> f32 {
    17.6
}
fn default_wheel_radius() -> f32 {
    1.6
}
fn default_sensor_offset_y() -> f32 {
    9.6
}
fn default_range_bias() -> f32 {
    3.2
}

impl TourConfig {
    /// Scan angles of one sweep, in scan order.
    pub fn angles(&self) -> StepBy<Range<i32>> {
        let step = self.step_deg.max(1) as usize;
        (self.start_deg..self.end_deg).step_by(step)
    }
}

impl RobotConfig {
    /// Sensor offset as a robot-frame vector.
    pub fn sensor_offset(&self) -> Point {
        Point::new(self.sensor_offset_x, self.sensor_offset_y)
    }

    pub fn drive_geometry(&self) -> DriveGeometry {
        DriveGeometry::new(self.track_spacing, self.wheel_radius)
    }
}

impl SurveyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SurveyError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SurveyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tour.step_deg <= 0 {
            return Err(SurveyError::Config(format!(
                "tour.step_deg must be positive, got {}",
                self.tour.step_deg
            )));
        }
        if self.tour.start_deg >= self.tour.end_deg {
            return Err(SurveyError::Config(format!(
                "tour.start_deg ({}) must be below tour.end_deg ({})",
                self.tour.start_deg, self.tour.end_deg
            )));
        }
        if self.navigation.station_step <= 0.0 {
            return Err(SurveyError::Config(
                "navigation.station_step must be positive".to_string(),
            ));
        }
        if self.robot.wheel_radius <= 0.0 || self.robot.track_spacing <= 0.0 {
            return Err(SurveyError::Config(
                "robot.wheel_radius and robot.track_spacing must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = SurveyConfig::from_toml("").unwrap();
        assert_eq!(config.tour.start_deg, -180);
        assert_eq!(config.tour.end_deg, 180);
        assert_eq!(config.navigation.station_step, 50.0);
        assert_eq!(config.robot.sensor_offset(), Point::new(0.0, 9.6));
    }

    #[test]
    fn test_tour_angles() {
        let tour = TourConfig::default();
        let angles: Vec<i32> = tour.angles().collect();
        assert_eq!(angles.len(), 36);
        assert_eq!(angles[0], -180);
        assert_eq!(*angles.last().unwrap(), 170);
    }

    #[test]
    fn test_partial_override() {
        let config = SurveyConfig::from_toml(
            r#"
            [tour]
            step_deg = 30

            [navigation]
            station_step = 40.0
            "#,
        )
        .unwrap();
        assert_eq!(config.tour.angles().count(), 12);
        assert_eq!(config.navigation.station_step, 40.0);
        assert_eq!(config.robot.track_spacing, 17.6);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            SurveyConfig::from_toml("[tour]\nstep_deg = 0"),
            Err(SurveyError::Config(_))
        ));
        assert!(matches!(
            SurveyConfig::from_toml("[tour]\nstart_deg = 90\nend_deg = 90"),
            Err(SurveyError::Config(_))
        ));
        assert!(matches!(
            SurveyConfig::from_toml("[navigation]\nstation_step = \"far\""),
            Err(SurveyError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SurveyConfig::load(Path::new("/nonexistent/survey.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
