//! Bouncing Links main entry point.
//!
//! Built on:
//! - **bevy_ecs** for the ball entities, resources and the tick schedule
//! - **raylib** for the window, when built with the `window` feature
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing or invalid)
//! 2. Build the engine: world, resources, observers, one entity per ball
//! 3. Hand it a frame driver: a raylib window, or a headless driver printing
//!    JSON snapshots
//! 4. Each frame: apply resize/pointer/click input, tick, present
//! 5. Stop when the window closes or the frame budget runs out
//!
//! # Running
//!
//! ```sh
//! cargo run -- --headless --frames 120 --every 30
//! cargo run --release --features window
//! ```

// Do not create console on Windows
#![cfg_attr(
    all(target_os = "windows", feature = "window"),
    windows_subsystem = "windows"
)]

use std::io::{self, BufWriter};
use std::path::PathBuf;

use bouncinglinks::engine::Engine;
use bouncinglinks::frontend::headless::HeadlessDriver;
use bouncinglinks::resources::gameconfig::GameConfig;
use bouncinglinks::resources::rng::RandomSource;
use bouncinglinks::resources::viewport::Viewport;
use clap::Parser;

/// Bouncing Links
#[derive(Parser)]
#[command(
    version,
    about = "Labeled balls bouncing around the screen, fleeing the cursor, each linking out."
)]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Seed for spawn positions and drift; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window and print snapshots as JSON lines.
    #[arg(long)]
    headless: bool,

    /// Number of frames to run headless.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Print every Nth headless frame.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Viewport width; overrides the config file.
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height; overrides the config file.
    #[arg(long)]
    height: Option<u32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{e}; using defaults");
    }
    if let Some(width) = cli.width {
        config.window_width = width;
    }
    if let Some(height) = cli.height {
        config.window_height = height;
    }

    let rng = match cli.seed {
        Some(seed) => RandomSource::with_seed(seed),
        None => RandomSource::default(),
    };

    if cli.headless || !cfg!(feature = "window") {
        if !cli.headless {
            log::warn!("Built without the `window` feature; running headless");
        }
        run_headless(&cli, config, rng);
    } else {
        #[cfg(feature = "window")]
        run_window(config, rng);
    }
}

fn run_headless(cli: &Cli, config: GameConfig, rng: RandomSource) {
    let (w, h) = config.window_size();
    let mut engine = Engine::new(
        config,
        Viewport {
            w: w as f32,
            h: h as f32,
        },
        rng,
    );
    let mut driver =
        HeadlessDriver::new(cli.frames, BufWriter::new(io::stdout().lock())).with_every(cli.every);
    let ticks = engine.run(&mut driver);
    log::info!("Ran {} headless ticks", ticks);
}

#[cfg(feature = "window")]
fn run_window(config: GameConfig, rng: RandomSource) {
    use bouncinglinks::frontend::window::WindowDriver;

    let mut driver = WindowDriver::open(&config);
    let size = driver.viewport();
    let mut engine = Engine::new(
        config,
        Viewport {
            w: size.x,
            h: size.y,
        },
        rng,
    )
    .with_link_opening();
    engine.run(&mut driver);
}
