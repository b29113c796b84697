//! Constellation viewer
//!
//! Run with: cargo run -p viz
//!
//! Examples:
//!   cargo run -p viz -- --data data/data.json --seed 7
//!   cargo run -p viz -- --config constellation.toml

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use viz::{ConstellationPlugin, VizSettings};

/// Constellation viewer
#[derive(Parser, Debug)]
#[command(name = "viz")]
#[command(about = "Interactive 3D view of records linked by shared attribute values")]
struct Args {
    /// JSON file with a top-level "users" array
    #[arg(long, default_value = "data/data.json")]
    data: PathBuf,

    /// TOML file with engine and render settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for unit placement
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    let mut settings = VizSettings {
        data: args.data,
        seed: args.seed,
        ..VizSettings::default()
    };
    if let Some(path) = args.config {
        settings = match settings.with_config_file(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };
    }

    App::new()
        .insert_resource(settings)
        .add_plugins(ConstellationPlugin)
        .run();
}
