//! Survey mission state machine.
//!
//! ```text
//! Idle → Scanning → Deciding → Moving → Scanning → ...
//! ```
//!
//! One call to [`SurveyMission::run_tour`] walks one full cycle. Stopping is
//! only possible between tours, so a station is never left half surveyed.

use log::{debug, error, info};

use crate::config::SurveyConfig;
use crate::error::{Result, SurveyError};
use crate::hardware::{Driver, Scanner};
use crate::survey::SurveyMap;

use super::{Maneuver, Pose, Surveyor, WallFollower};

/// Mission state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MissionState {
    /// Waiting for a start request
    #[default]
    Idle,
    /// Taking the sweep at the current station
    Scanning,
    /// Choosing the next maneuver
    Deciding,
    /// Driving to the next station
    Moving,
}

impl MissionState {
    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            MissionState::Idle => "Idle",
            MissionState::Scanning => "Scanning",
            MissionState::Deciding => "Deciding",
            MissionState::Moving => "Moving",
        }
    }

    /// Compact encoding for atomics.
    pub fn as_u8(&self) -> u8 {
        match self {
            MissionState::Idle => 0,
            MissionState::Scanning => 1,
            MissionState::Deciding => 2,
            MissionState::Moving => 3,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => MissionState::Scanning,
            2 => MissionState::Deciding,
            3 => MissionState::Moving,
            _ => MissionState::Idle,
        }
    }
}

/// Outcome of one tour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TourReport {
    /// Index of the new station in the map.
    pub station: usize,
    pub walls: usize,
    pub maneuver: Maneuver,
    /// Pose after the maneuver.
    pub pose: Pose,
}

/// Owns the robot, the map and the follower for a survey run.
pub struct SurveyMission<S: Scanner, D: Driver> {
    surveyor: Surveyor<S, D>,
    follower: WallFollower,
    map: SurveyMap,
    state: MissionState,
}

impl<S: Scanner, D: Driver> SurveyMission<S, D> {
    pub fn new(surveyor: Surveyor<S, D>, follower: WallFollower) -> Self {
        Self {
            surveyor,
            follower,
            map: SurveyMap::new(),
            state: MissionState::Idle,
        }
    }

    /// Build the robot and follower from a config.
    pub fn from_config(scanner: S, driver: D, config: &SurveyConfig) -> Self {
        let surveyor = Surveyor::new(
            scanner,
            driver,
            config.tour.clone(),
            config.robot.clone(),
        );
        Self::new(surveyor, WallFollower::new(config.navigation.station_step))
    }

    /// Continue an existing map instead of starting empty.
    pub fn with_map(mut self, map: SurveyMap) -> Self {
        self.map = map;
        self
    }

    pub fn state(&self) -> MissionState {
        self.state
    }

    pub fn map(&self) -> &SurveyMap {
        &self.map
    }

    pub fn pose(&self) -> Pose {
        self.surveyor.pose()
    }

    pub fn surveyor(&self) -> &Surveyor<S, D> {
        &self.surveyor
    }

    /// Run one Scanning → Deciding → Moving cycle.
    ///
    /// On error the mission drops back to Idle; the station surveyed so far
    /// stays in the map.
    pub fn run_tour(&mut self) -> Result<TourReport> {
        let result = self.cycle();
        if let Err(e) = &result {
            error!("[Mission] Tour failed in {}: {}", self.state.name(), e);
            self.state = MissionState::Idle;
        }
        result
    }

    /// Back to Idle. Only meaningful between tours.
    pub fn stop(&mut self) {
        if self.state != MissionState::Idle {
            info!("[Mission] Stopped after {} stations", self.map.len());
        }
        self.state = MissionState::Idle;
    }

    fn cycle(&mut self) -> Result<TourReport> {
        self.transition(MissionState::Scanning);
        let node = self.surveyor.survey_tour()?;
        let walls = node.walls().len();
        let station = self.map.add_node(node);

        self.transition(MissionState::Deciding);
        let pose = self.surveyor.pose();
        let maneuver = self
            .map
            .node(station)
            .ok_or_else(|| SurveyError::Planning(format!("station {} missing from map", station)))
            .and_then(|node| self.follower.plan(node, &pose))?;

        self.transition(MissionState::Moving);
        let pose = self.surveyor.execute(&maneuver)?;

        info!(
            "[Mission] Station {} done: {} walls, {} to ({:.1}, {:.1}) facing {}",
            station,
            walls,
            maneuver.name(),
            pose.position.x,
            pose.position.y,
            pose.orientation
        );

        Ok(TourReport {
            station,
            walls,
            maneuver,
            pose,
        })
    }

    fn transition(&mut self, next: MissionState) {
        debug!("[Mission] {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
