//! Headless constellation runner.
//!
//! Places units from a data file, applies selections, ticks a number of
//! frames on a simulated clock and prints a JSON summary.
//!
//! Examples:
//!   cargo run -p constellation-core -- --data data/data.json --select 0 --frames 60
//!   cargo run -p constellation-core -- --data data/data.json --output scene.json

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use constellation_core::{
    run_frames, Constellation, EngineConfig, EngineError, FrameClock, SceneSummary, StopFlag,
    UnitId,
};
use constellation_data::{FileSource, RecordSource};

/// Command line arguments for the headless runner
#[derive(Parser, Debug)]
#[command(name = "constellation")]
#[command(about = "Lay out units, reveal links, and report the resulting scene")]
struct Args {
    /// JSON document of the form { "users": [ ... ] }
    #[arg(long)]
    data: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Frames to simulate
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Milliseconds per simulated frame
    #[arg(long, default_value_t = 16)]
    frame_interval: u64,

    /// Unit index to select before ticking (repeatable)
    #[arg(long)]
    select: Vec<u32>,

    /// Write the summary here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        tracing::error!(error = %e, "Run failed");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), EngineError> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let source = FileSource::new(&args.data);
    tracing::info!(source = %source.describe(), seed = args.seed, "Starting headless run");
    let records = source.fetch()?;

    let mut world = Constellation::new(config, args.width, args.height, args.seed, 0);
    let report = world.load(records);

    for index in &args.select {
        let links = world.select(UnitId(*index));
        tracing::info!(unit = index, links = links.len(), "Selected unit");
    }

    let mut clock = FrameClock::new(0, args.frame_interval);
    let stop = StopFlag::new();
    let ran = run_frames(&mut world, args.frames, &mut clock, &stop, |_, _| {});
    tracing::info!(frames = ran, "Simulation finished");

    let summary = SceneSummary::capture(&world, report.failed);
    let json = summary.to_json()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = ?path, "Wrote scene summary");
        }
        None => println!("{}", json),
    }
    Ok(())
}
