/// Command-line options and the settings derived from them.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{GameError, Result};

/// Logical pixels covered by one terminal cell.  Terminal cells are about
/// twice as tall as they are wide, so this keeps sprites roughly square.
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;
/// Terminal rows above the canvas reserved for the score line.
pub const HUD_ROWS: u16 = 1;

pub const APP_DIR: &str = "street_shooter";
pub const LOG_FILE: &str = "street_shooter.log";

#[derive(Parser, Debug, Clone)]
#[command(name = "street_shooter", about = "Hold the street: shoot everything that falls")]
pub struct Args {
    /// Frames per second of the game loop
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for enemy placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where the high score is kept (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding gunshot.wav and death.wav
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Log file (defaults to <data dir>/street_shooter.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable sound
    #[arg(long)]
    pub mute: bool,

    /// Override the canvas width in logical pixels
    #[arg(long)]
    pub canvas_width: Option<f32>,

    /// Override the canvas height in logical pixels
    #[arg(long)]
    pub canvas_height: Option<f32>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub fps: u32,
    pub seed: Option<u64>,
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub log_file: PathBuf,
    pub mute: bool,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Config {
    /// Combine the options with the terminal size measured at startup.
    pub fn resolve(args: Args, cols: u16, rows: u16) -> Result<Self> {
        if args.fps == 0 {
            return Err(GameError::Config("--fps must be at least 1".to_string()));
        }

        let canvas_width = args.canvas_width.unwrap_or(cols as f32 * CELL_WIDTH);
        let canvas_height = args
            .canvas_height
            .unwrap_or(rows.saturating_sub(HUD_ROWS) as f32 * CELL_HEIGHT);
        let usable = |side: f32| side.is_finite() && side > 0.0;
        if !usable(canvas_width) || !usable(canvas_height) {
            return Err(GameError::Config(format!(
                "canvas must have a finite positive size, got {}x{}",
                canvas_width, canvas_height
            )));
        }

        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        let log_file = args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));

        Ok(Config {
            fps: args.fps,
            seed: args.seed,
            data_dir,
            assets_dir: args.assets_dir,
            log_file,
            mute: args.mute,
            canvas_width,
            canvas_height,
        })
    }

    pub fn frame_ms(&self) -> u64 {
        (1000 / self.fps as u64).max(1)
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(crate::storage::STORAGE_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
