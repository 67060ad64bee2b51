//! DhruvaSurvey - Survey mission daemon for VacuumTiger
//!
//! Drives a robot with a single rotating range sensor around a room by
//! following walls. At every station it sweeps the sensor, fits walls to the
//! readings, and decides the next move from the walls it found.
//!
//! ## Threads
//!
//! - **Survey Thread**: owns the (simulated) robot and the mission, runs
//!   one tour at a time and publishes a map snapshot after each
//! - **Writer Thread**: saves each snapshot as XML (and optionally SVG)
//! - **Main Thread**: Ctrl-C handling and status supervision

mod config;
mod error;
mod shared;
mod sim;
mod threads;

use config::DhruvaConfig;
use error::{DhruvaError, Result};
use shared::{SharedStatus, SurveyCommand};
use threads::spawn_threads;

use clap::Parser;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Default config file looked up in the working directory
const DEFAULT_CONFIG: &str = "dhruva-survey.toml";

/// Survey a room by following its walls
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    config: Option<PathBuf>,

    /// Number of tours to run (0 for no limit)
    #[arg(short, long)]
    tours: Option<usize>,

    /// Output directory for map.xml and map.svg
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Simulation noise seed (0 for random)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    info!("DhruvaSurvey v{}", env!("CARGO_PKG_VERSION"));
    let start = config.simulation.start_pose();
    info!(
        "Start: ({:.1}, {:.1}) facing {}, {} room walls",
        start.position.x,
        start.position.y,
        start.orientation,
        config.simulation.walls.len()
    );
    info!(
        "Tour: {}°..{}° step {}°, station step {:.1} cm",
        config.tour.start_deg,
        config.tour.end_deg,
        config.tour.step_deg,
        config.navigation.station_step
    );
    match config.mission.max_tours {
        0 => info!("Tours: until stopped"),
        n => info!("Tours: {}", n),
    }
    info!("Map output: {}", config.output.map_path);

    let status = Arc::new(SharedStatus::new(start));
    let handles = spawn_threads(config, Arc::clone(&status))?;

    // Ctrl-C: let the current tour finish, then exit
    let ctrlc_status = Arc::clone(&status);
    let ctrlc_commands = handles.commands.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        ctrlc_status.shutdown.store(true, Ordering::Relaxed);
        let _ = ctrlc_commands.send(SurveyCommand::Shutdown);
    })
    .map_err(|e| DhruvaError::Thread(format!("Failed to set Ctrl-C handler: {}", e)))?;

    if handles.commands.send(SurveyCommand::Start).is_err() {
        warn!("Survey thread exited before start");
    }

    // Main thread: monitor and wait for completion
    let check_interval = Duration::from_millis(500);
    let mut last_reported = 0;

    loop {
        std::thread::sleep(check_interval);

        let tours = status.tours();
        if tours != last_reported {
            let (x, y, heading) = status.pose();
            info!(
                "Tour {} done: ({:.1}, {:.1}) facing {:.1}°, {}",
                tours,
                x,
                y,
                heading,
                status.state().name()
            );
            last_reported = tours;
        }

        if status.is_halted() {
            warn!("Survey halted after {} tours", tours);
            break;
        }

        if status.is_complete() {
            info!("Survey completed");
            break;
        }

        if status.is_shutdown() {
            break;
        }

        if handles.survey.is_finished() || handles.writer.is_finished() {
            warn!("A worker thread exited unexpectedly");
            break;
        }
    }

    let _ = handles.commands.send(SurveyCommand::Shutdown);
    info!("Waiting for threads to finish...");
    if let Err(e) = handles.join() {
        error!("{}", e);
    }

    info!("DhruvaSurvey finished after {} tours", status.tours());
    Ok(())
}

/// Config file from the command line, else `dhruva-survey.toml`, else defaults.
/// Command line flags override the file.
fn load_config(args: &Args) -> Result<DhruvaConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            DhruvaConfig::load(path)?
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG);
            DhruvaConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => {
            info!("Using default configuration");
            DhruvaConfig::default()
        }
    };

    if let Some(tours) = args.tours {
        config.mission.max_tours = tours;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(dir) = &args.output {
        config.output.map_path = dir.join("map.xml").to_string_lossy().into_owned();
        config.output.svg_path = Some(dir.join("map.svg").to_string_lossy().into_owned());
    }

    Ok(config)
}
