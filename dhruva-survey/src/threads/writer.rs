//! Writer thread: persists map snapshots as they arrive.
//!
//! Each snapshot overwrites the previous files, so the newest map is always
//! on disk. Failures are logged and the thread keeps going.

use std::fs;
use std::path::Path;

use crossbeam_channel::Receiver;
use log::{debug, error, info};
use vastu_survey::io::{SvgConfig, SvgVisualizer, save_map};

use crate::config::OutputConfig;
use crate::error::Result;
use crate::shared::MapSnapshot;

/// Writer thread state and logic.
pub struct WriterThread {
    config: OutputConfig,
    snapshots: Receiver<MapSnapshot>,
}

impl WriterThread {
    pub fn new(config: OutputConfig, snapshots: Receiver<MapSnapshot>) -> Self {
        Self { config, snapshots }
    }

    /// Run until the survey thread drops its sender.
    pub fn run(&self) {
        let mut written = 0usize;
        for snapshot in self.snapshots.iter() {
            match self.write(&snapshot) {
                Ok(()) => written += 1,
                Err(e) => error!("[Writer] Failed to save tour {}: {}", snapshot.tour, e),
            }
        }
        info!("[Writer] Exiting after {} snapshots", written);
    }

    fn write(&self, snapshot: &MapSnapshot) -> Result<()> {
        let map_path = Path::new(&self.config.map_path);
        ensure_parent(map_path)?;
        save_map(&snapshot.map, map_path)?;
        debug!(
            "[Writer] Tour {}: {} stations to {}",
            snapshot.tour,
            snapshot.map.len(),
            map_path.display()
        );

        if let Some(svg_path) = self.config.svg_path.as_deref()
            && !svg_path.is_empty()
        {
            let svg_path = Path::new(svg_path);
            ensure_parent(svg_path)?;
            SvgVisualizer::new(&snapshot.map, SvgConfig::default())
                .with_title(format!("Survey after tour {}", snapshot.tour))
                .save(svg_path)?;
        }
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
