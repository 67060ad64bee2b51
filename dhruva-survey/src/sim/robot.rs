//! Simulated tracked robot with a rotating range sensor.
//!
//! The survey code dead-reckons its own pose; the simulator keeps the true
//! pose, which drifts from the estimate by the configured motion noise.
//! Scanner and driver handles share the robot, both live on the survey
//! thread.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use vastu_survey::{Angle, DriveGeometry, Driver, Point, Pose, Result, Scanner};

use super::{Room, SensorNoise};
use crate::config::DhruvaConfig;

/// True state of the simulated robot.
pub struct SimulatedRobot {
    room: Room,
    pose: Pose,
    geometry: DriveGeometry,
    noise: SensorNoise,
    sensor_offset: Point,
    range_bias: f32,
    max_range: f32,
    commands: usize,
}

/// [`Scanner`] handle on a shared simulated robot.
pub struct SimScanner(Rc<RefCell<SimulatedRobot>>);

/// [`Driver`] handle on a shared simulated robot.
pub struct SimDriver(Rc<RefCell<SimulatedRobot>>);

impl SimulatedRobot {
    pub fn new(config: &DhruvaConfig) -> Self {
        let sim = &config.simulation;
        Self {
            room: Room::new(sim.walls.clone()),
            pose: sim.start_pose(),
            geometry: config.robot.drive_geometry(),
            noise: SensorNoise::new(sim),
            sensor_offset: config.robot.sensor_offset(),
            range_bias: config.robot.range_bias,
            max_range: sim.max_range,
            commands: 0,
        }
    }

    /// Split into scanner and driver handles plus a handle for inspection.
    pub fn into_handles(self) -> (SimScanner, SimDriver, Rc<RefCell<SimulatedRobot>>) {
        let shared = Rc::new(RefCell::new(self));
        (
            SimScanner(Rc::clone(&shared)),
            SimDriver(Rc::clone(&shared)),
            shared,
        )
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    /// True pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Number of motion commands executed.
    pub fn commands(&self) -> usize {
        self.commands
    }

    fn sensor_origin(&self) -> Point {
        let (sin, cos) = (self.pose.orientation.sin(), self.pose.orientation.cos());
        let o = self.sensor_offset;
        Point::new(
            self.pose.position.x + o.x * cos + o.y * sin,
            self.pose.position.y - o.x * sin + o.y * cos,
        )
    }

    fn measure(&mut self, angle: Angle) -> f32 {
        let bearing = self.pose.orientation + angle;
        let distance = self
            .room
            .ray_cast(self.sensor_origin(), bearing, self.max_range);
        if distance >= self.max_range {
            return self.max_range;
        }
        // the sensor face sits range_bias ahead of its rotation axis
        self.noise.range(distance - self.range_bias, self.max_range)
    }

    fn rotate(&mut self, angle: Angle) {
        let command = self.geometry.turn(angle);
        let actual = self.geometry.rotation_of(&command) + self.noise.turn_error();
        debug!(
            "[Sim] Turn: steering {} for {:.0}°, actual {}",
            command.steering, command.degrees, actual
        );
        self.pose.orientation += actual;
        self.commands += 1;
    }

    fn drive(&mut self, distance: f32) {
        let command = self.geometry.forward(distance);
        let actual = self.geometry.distance_of(&command) + self.noise.drive_error();
        debug!(
            "[Sim] Drive: {:.0}° of track, actual {:.1}cm",
            command.degrees, actual
        );
        let heading = self.pose.orientation;
        self.pose.position = Point::new(
            self.pose.position.x + actual * heading.sin(),
            self.pose.position.y + actual * heading.cos(),
        );
        self.commands += 1;
    }
}

impl Scanner for SimScanner {
    fn scan(&mut self, angle: Angle) -> Result<f32> {
        Ok(self.0.borrow_mut().measure(angle))
    }
}

impl Driver for SimDriver {
    fn rotate(&mut self, angle: Angle) -> Result<()> {
        self.0.borrow_mut().rotate(angle);
        Ok(())
    }

    fn drive_forward(&mut self, distance_cm: f32) -> Result<()> {
        self.0.borrow_mut().drive(distance_cm);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WallSegment;
    use approx::assert_relative_eq;

    fn quiet_config() -> DhruvaConfig {
        let mut config = DhruvaConfig::default();
        config.simulation.seed = 1;
        config.simulation.range_stddev = 0.0;
        config.simulation.turn_stddev_deg = 0.0;
        config.simulation.drive_stddev = 0.0;
        config.simulation.echo_dropout = 0.0;
        config.simulation.start_x = 50.0;
        config.simulation.start_y = 50.0;
        config.simulation.walls = vec![
            WallSegment::new(0.0, 0.0, 200.0, 0.0),
            WallSegment::new(200.0, 0.0, 200.0, 200.0),
            WallSegment::new(200.0, 200.0, 0.0, 200.0),
            WallSegment::new(0.0, 200.0, 0.0, 0.0),
        ];
        config
    }

    #[test]
    fn test_scan_accounts_for_offset_and_bias() {
        let config = quiet_config();
        let (mut scanner, _, _) = SimulatedRobot::new(&config).into_handles();
        // sensor axis 9.6 ahead, face 3.2 further: 200 - 50 - 9.6 - 3.2
        let ahead = scanner.scan(Angle::default()).unwrap();
        assert_relative_eq!(ahead, 137.2, epsilon = 1e-3);
        // the survey adds the bias back: axis to wall
        assert_relative_eq!(ahead + config.robot.range_bias, 140.4, epsilon = 1e-3);
    }

    #[test]
    fn test_no_echo_is_max_range() {
        let mut config = quiet_config();
        config.simulation.walls.truncate(1);
        let (mut scanner, _, _) = SimulatedRobot::new(&config).into_handles();
        assert_eq!(scanner.scan(Angle::default()).unwrap(), 255.0);
    }

    #[test]
    fn test_lost_echoes_read_max_range() {
        let mut config = quiet_config();
        config.simulation.echo_dropout = 1.0;
        let (mut scanner, _, _) = SimulatedRobot::new(&config).into_handles();
        for deg in [-90.0, 0.0, 90.0, 180.0] {
            assert_eq!(scanner.scan(Angle::from_degrees(deg)).unwrap(), 255.0);
        }
    }

    #[test]
    fn test_noise_free_motion_is_exact() {
        let config = quiet_config();
        let (_, mut driver, robot) = SimulatedRobot::new(&config).into_handles();
        driver.rotate(Angle::from_degrees(90.0)).unwrap();
        driver.drive_forward(30.0).unwrap();

        let pose = robot.borrow().pose();
        assert_relative_eq!(pose.orientation.degrees(), 90.0, epsilon = 1e-3);
        assert_relative_eq!(pose.position.x, 80.0, epsilon = 1e-3);
        assert_relative_eq!(pose.position.y, 50.0, epsilon = 1e-3);
        assert_eq!(robot.borrow().commands(), 2);
    }

    #[test]
    fn test_motion_noise_drifts_true_pose() {
        let mut config = quiet_config();
        config.simulation.drive_stddev = 2.0;
        let (_, mut driver, robot) = SimulatedRobot::new(&config).into_handles();
        for _ in 0..10 {
            driver.drive_forward(10.0).unwrap();
        }
        let y = robot.borrow().pose().position.y;
        assert!((y - 150.0).abs() > 1e-4);
    }
}
