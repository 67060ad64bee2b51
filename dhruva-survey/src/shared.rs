//! Shared state and messages between threads.
//!
//! - Supervisor → survey thread: [`SurveyCommand`] over a channel
//! - Survey thread → writer thread: [`MapSnapshot`] over a bounded channel
//! - Survey thread → supervisor: [`SharedStatus`] atomics

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, AtomicUsize, Ordering};

use vastu_survey::{MissionState, Pose, SurveyMap};

/// Commands sent from the supervisor to the survey thread.
///
/// The survey thread only looks at commands between tours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyCommand {
    /// Start or resume touring.
    Start,
    /// Finish the current tour, then idle.
    Stop,
    /// Finish the current tour, then exit.
    Shutdown,
}

/// Copy of the map after a tour, for persistence.
#[derive(Clone, Debug)]
pub struct MapSnapshot {
    /// Number of tours completed when the snapshot was taken.
    pub tour: usize,
    pub map: SurveyMap,
}

/// Atomic wrapper for f32 values.
/// Uses AtomicU32 with bit reinterpretation.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(val: f32) -> Self {
        Self(AtomicU32::new(val.to_bits()))
    }

    pub fn load(&self, order: Ordering) -> f32 {
        f32::from_bits(self.0.load(order))
    }

    pub fn store(&self, val: f32, order: Ordering) {
        self.0.store(val.to_bits(), order);
    }
}

/// Mission status published by the survey thread.
#[derive(Debug)]
pub struct SharedStatus {
    /// Tours completed so far
    pub tours_completed: AtomicUsize,

    /// Current mission state (see [`MissionState::as_u8`])
    state: AtomicU8,

    /// Estimated pose after the last maneuver
    x: AtomicF32,
    y: AtomicF32,
    heading_deg: AtomicF32,

    /// Survey halted on an error
    pub halted: AtomicBool,

    /// Tour limit reached
    pub complete: AtomicBool,

    /// Shutdown requested (Ctrl-C)
    pub shutdown: AtomicBool,
}

impl SharedStatus {
    pub fn new(pose: Pose) -> Self {
        Self {
            tours_completed: AtomicUsize::new(0),
            state: AtomicU8::new(MissionState::Idle.as_u8()),
            x: AtomicF32::new(pose.position.x),
            y: AtomicF32::new(pose.position.y),
            heading_deg: AtomicF32::new(pose.orientation.degrees()),
            halted: AtomicBool::new(false),
            complete: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> MissionState {
        MissionState::from_u8(self.state.load(Ordering::Relaxed))
    }

    pub fn set_state(&self, state: MissionState) {
        self.state.store(state.as_u8(), Ordering::Relaxed);
    }

    /// Record a finished tour.
    pub fn record_tour(&self, pose: Pose) -> usize {
        self.x.store(pose.position.x, Ordering::Relaxed);
        self.y.store(pose.position.y, Ordering::Relaxed);
        self.heading_deg
            .store(pose.orientation.degrees(), Ordering::Relaxed);
        self.tours_completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn tours(&self) -> usize {
        self.tours_completed.load(Ordering::Relaxed)
    }

    /// Estimated (x, y, heading in degrees).
    pub fn pose(&self) -> (f32, f32, f32) {
        (
            self.x.load(Ordering::Relaxed),
            self.y.load(Ordering::Relaxed),
            self.heading_deg.load(Ordering::Relaxed),
        )
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Relaxed)
    }

    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Relaxed)
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
