use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{
    error,
    info
};
use tracing_subscriber::EnvFilter;

use elmemu::configuration::Configuration;
use elmemu::preset::presetstore::PresetStore;
use elmemu::session::emulatorsession::EmulatorSession;
use elmemu::session::tickscheduler::TickScheduler;
use elmemu::vehicle::vehiclestate::VehicleSnapshot;

/// Ticks between two logged snapshots.
const LOG_EVERY: usize = 50;

/// Manual drive used when no preset is given: full throttle, then braking.
const MANUAL_TICKS: usize = 300;

fn log_snapshot(tick: usize, snapshot: &VehicleSnapshot) {
    if tick % LOG_EVERY == 0 {
        info!(
            tick,
            rpm = snapshot.rpm,
            speed = snapshot.speed,
            gear = snapshot.gear,
            position = %snapshot.gear_position,
            engine_temp = snapshot.engine_temp,
            fuel = snapshot.fuel_level,
            "snapshot"
        );
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless vehicle instrument emulator", long_about = None)]
struct Args {
    /// JSON configuration file (built-in defaults when omitted)
    config: Option<PathBuf>,

    /// Preset to play back; without one the car is driven manually
    preset: Option<String>,

    /// Playback speed: the run lasts curve duration / multiplier
    #[arg(default_value_t = 1.0)]
    speed_multiplier: f64
}

fn run(args: &Args) -> elmemu::Result<()> {
    let config = match &args.config {
        Some(path) => Configuration::from_reader(path)?,
        None => Configuration::default()
    };
    let scheduler = TickScheduler::new(config.tick_interval());
    let mut session = EmulatorSession::from_configuration(&config);

    let Some(preset) = &args.preset else {
        let mut tick = 0;
        session.set_inputs(1.0, 0.0);
        scheduler.run(&mut session, MANUAL_TICKS / 2, |s| {
            log_snapshot(tick, s);
            tick += 1;
        });
        session.set_inputs(0.0, 1.0);
        scheduler.run(&mut session, MANUAL_TICKS / 2, |s| {
            log_snapshot(tick, s);
            tick += 1;
        });
        return Ok(());
    };

    let store = PresetStore::open(config.preset_dir())?;
    info!(dir = %store.dir().display(), presets = ?store.names(), "available presets");
    let curve = store.load(preset, config.curve().time_range, config.curve().value_range)?;
    session.replace_curve(curve);

    session.start_playback(args.speed_multiplier, Utc::now())?;
    let mut tick = 0;
    scheduler.run_playback(&mut session, usize::MAX, |s| {
        log_snapshot(tick, s);
        tick += 1;
    });
    info!(snapshot = ?session.vehicle().snapshot(), "playback complete");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
