//! Survey thread: runs tours on the simulated robot.
//!
//! The robot and mission live entirely inside this thread. Commands are
//! checked between tours; a tour always runs to completion.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, error, info, warn};
use vastu_survey::{Driver, MissionState, Scanner, SurveyMission, Surveyor, WallFollower};

use crate::config::DhruvaConfig;
use crate::error::Result;
use crate::shared::{MapSnapshot, SharedStatus, SurveyCommand};
use crate::sim::SimulatedRobot;

/// Survey thread state and logic.
pub struct SurveyThread {
    config: DhruvaConfig,
    status: Arc<SharedStatus>,
    commands: Receiver<SurveyCommand>,
    snapshots: Sender<MapSnapshot>,
    running: bool,
    shutdown: bool,
}

impl SurveyThread {
    pub fn new(
        config: DhruvaConfig,
        status: Arc<SharedStatus>,
        commands: Receiver<SurveyCommand>,
        snapshots: Sender<MapSnapshot>,
    ) -> Self {
        Self {
            config,
            status,
            commands,
            snapshots,
            running: false,
            shutdown: false,
        }
    }

    /// Run the survey thread main loop.
    pub fn run(&mut self) -> Result<()> {
        let robot = SimulatedRobot::new(&self.config);
        let (scanner, driver, truth) = robot.into_handles();
        // dead reckoning starts from the simulator's start pose so estimate
        // and truth share one frame
        let survey = self.config.survey_config();
        let surveyor = Surveyor::new(scanner, driver, survey.tour, survey.robot)
            .with_pose(self.config.simulation.start_pose());
        let mut mission =
            SurveyMission::new(surveyor, WallFollower::new(survey.navigation.station_step));
        let max_tours = self.config.mission.max_tours;

        info!(
            "[Survey] Ready at ({:.1}, {:.1}) facing {}, room of {} walls",
            mission.pose().position.x,
            mission.pose().position.y,
            mission.pose().orientation,
            truth.borrow().room().walls().len()
        );

        loop {
            self.drain_commands(&mut mission);
            if self.shutdown || self.status.is_shutdown() {
                break;
            }

            if !self.running {
                // Idle: block until told what to do
                match self.commands.recv() {
                    Ok(cmd) => self.apply(cmd, &mut mission),
                    Err(_) => break,
                }
                continue;
            }

            if max_tours > 0 && self.status.tours() >= max_tours {
                info!("[Survey] Tour limit of {} reached", max_tours);
                mission.stop();
                self.status.set_state(MissionState::Idle);
                self.status.complete.store(true, Ordering::Relaxed);
                break;
            }

            match mission.run_tour() {
                Ok(report) => {
                    let tour = self.status.record_tour(report.pose);
                    self.status.set_state(mission.state());

                    let (actual, commands) = {
                        let robot = truth.borrow();
                        (robot.pose(), robot.commands())
                    };
                    debug!(
                        "[Survey] Tour {}: estimate ({:.1}, {:.1}), truth ({:.1}, {:.1}) after {} commands",
                        tour,
                        report.pose.position.x,
                        report.pose.position.y,
                        actual.position.x,
                        actual.position.y,
                        commands
                    );

                    let snapshot = MapSnapshot {
                        tour,
                        map: mission.map().clone(),
                    };
                    if self.snapshots.send(snapshot).is_err() {
                        warn!("[Survey] Writer gone, map snapshot dropped");
                    }
                }
                Err(e) => {
                    error!("[Survey] Mission halted: {}", e);
                    self.status.set_state(MissionState::Idle);
                    self.status
                        .halted
                        .store(true, Ordering::Relaxed);
                    // Keep whatever was surveyed before the failure
                    let snapshot = MapSnapshot {
                        tour: self.status.tours(),
                        map: mission.map().clone(),
                    };
                    let _ = self.snapshots.send(snapshot);
                    return Err(e.into());
                }
            }
        }

        info!(
            "[Survey] Exiting after {} tours, {} stations",
            self.status.tours(),
            mission.map().len()
        );
        Ok(())
    }

    fn drain_commands<S, D>(&mut self, mission: &mut SurveyMission<S, D>)
    where
        S: Scanner,
        D: Driver,
    {
        loop {
            match self.commands.try_recv() {
                Ok(cmd) => self.apply(cmd, mission),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.shutdown = true;
                    break;
                }
            }
        }
    }

    fn apply<S, D>(&mut self, cmd: SurveyCommand, mission: &mut SurveyMission<S, D>)
    where
        S: Scanner,
        D: Driver,
    {
        debug!("[Survey] Command {:?}", cmd);
        match cmd {
            SurveyCommand::Start => self.running = true,
            SurveyCommand::Stop => {
                self.running = false;
                mission.stop();
                self.status.set_state(MissionState::Idle);
            }
            SurveyCommand::Shutdown => {
                self.running = false;
                self.shutdown = true;
            }
        }
    }
}
