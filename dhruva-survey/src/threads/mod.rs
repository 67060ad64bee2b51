//! Threads of DhruvaSurvey.
//!
//! - Survey thread: owns the robot and the map, runs tours on command
//! - Writer thread: persists map snapshots (XML, SVG)

mod survey;
mod writer;

pub use survey::SurveyThread;
pub use writer::WriterThread;

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, bounded, unbounded};
use log::error;

use crate::config::DhruvaConfig;
use crate::error::{DhruvaError, Result};
use crate::shared::{MapSnapshot, SharedStatus, SurveyCommand};

/// Snapshots waiting for the writer before the survey thread blocks.
const SNAPSHOT_QUEUE: usize = 4;

/// Thread handles for the running mission.
pub struct ThreadHandles {
    pub survey: JoinHandle<()>,
    pub writer: JoinHandle<()>,
    /// Command channel into the survey thread
    pub commands: Sender<SurveyCommand>,
}

impl ThreadHandles {
    /// Wait for both threads to exit.
    pub fn join(self) -> Result<()> {
        let ThreadHandles {
            survey,
            writer,
            commands,
        } = self;
        drop(commands);
        survey
            .join()
            .map_err(|_| DhruvaError::Thread("survey thread panicked".to_string()))?;
        writer
            .join()
            .map_err(|_| DhruvaError::Thread("writer thread panicked".to_string()))?;
        Ok(())
    }
}

/// Spawn all threads and return handles.
pub fn spawn_threads(config: DhruvaConfig, status: Arc<SharedStatus>) -> Result<ThreadHandles> {
    let (command_tx, command_rx) = unbounded::<SurveyCommand>();
    let (snapshot_tx, snapshot_rx) = bounded::<MapSnapshot>(SNAPSHOT_QUEUE);

    let writer_config = config.output.clone();
    let survey_status = Arc::clone(&status);

    let survey = thread::Builder::new()
        .name("survey".into())
        .spawn(move || {
            let mut survey_thread =
                SurveyThread::new(config, survey_status, command_rx, snapshot_tx);
            if let Err(e) = survey_thread.run() {
                error!("Survey thread error: {}", e);
            }
        })
        .map_err(|e| DhruvaError::Thread(format!("Failed to spawn survey thread: {}", e)))?;

    let writer = thread::Builder::new()
        .name("writer".into())
        .spawn(move || {
            let writer_thread = WriterThread::new(writer_config, snapshot_rx);
            writer_thread.run();
        })
        .map_err(|e| DhruvaError::Thread(format!("Failed to spawn writer thread: {}", e)))?;

    Ok(ThreadHandles {
        survey,
        writer,
        commands: command_tx,
    })
}
