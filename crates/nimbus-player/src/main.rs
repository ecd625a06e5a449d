//! Nimbus - animated cumulus sky
//!
//! Usage:
//!   nimbus play [--config sky.toml] [--width W] [--height H] [--seed N] [--fullscreen]
//!   nimbus render --output sky.png [--seconds S] [--fps F] [...]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{play, render};
use nimbus_player::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nimbus")]
#[command(about = "Soft particle cumulus clouds rising from ground thermals", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window and watch the sky
    Play {
        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,
    },

    /// Simulate offscreen and save one frame as PNG
    Render {
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Simulated seconds before the frame is captured
        #[arg(long, default_value = "20")]
        seconds: f32,

        /// Fixed simulation rate in steps per second
        #[arg(long, default_value = "60")]
        fps: f32,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            overrides,
            fullscreen,
        } => play::run(play::PlayArgs {
            overrides,
            fullscreen,
        }),
        Commands::Render {
            output,
            overrides,
            seconds,
            fps,
        } => render::run(render::RenderArgs {
            overrides,
            output,
            seconds,
            fps,
        }),
    }
}
