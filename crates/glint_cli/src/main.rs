//! Command-line front end: parse arguments, build the scene, render,
//! write the image.

mod output;
mod scene;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glint_renderer::{render, Camera, DVec3, RenderConfig, MAX_DEPTH};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments.
#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "A KD-tree accelerated path tracer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 675)]
    height: u32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 100)]
    samples: u32,

    /// Base seed for scene generation and the per-worker generators
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (.ppm for plain text, anything else goes through
    /// the image crate)
    #[arg(short, long, default_value = "render.png")]
    output: String,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.clone().into())
        .init();

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples,
        max_depth: MAX_DEPTH,
        seed: args.seed,
    };

    let mut scene_rng = StdRng::seed_from_u64(args.seed);
    let world = scene::random_scene(&mut scene_rng).context("failed to build scene")?;

    // The classic framing: looking down at the sphere field from (13, 2, 3)
    // with a narrow field of view and a whisper of defocus.
    let camera = Camera::new(
        DVec3::new(13.0, 2.0, 3.0),
        DVec3::ZERO,
        DVec3::Y,
        20.0,
        config.aspect(),
        0.1,
        10.0,
    );

    let film = render(&camera, &world, &config);

    output::write(&args.output, &film)
        .with_context(|| format!("failed to write {}", args.output))?;
    log::info!("wrote {}", args.output);

    Ok(())
}
