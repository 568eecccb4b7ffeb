//! Sprite Duel command line
//!
//! `scan` runs the frame extractor on a sheet and writes the frames out.
//! `demo` plays a scripted match headlessly and saves a screenshot.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use sprite_duel::audio::NullSink;
use sprite_duel::consts::SIM_DT;
use sprite_duel::sim::{MapId, MatchPhase, MatchState, PlayerInput, PlayerSlot};
use sprite_duel::{Game, KeyPress, Leaderboard, Settings, extract_frames};

/// Sprite Duel - two-player fighting game toolkit
#[derive(Parser)]
#[command(name = "sprite-duel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract frames from a single-row spritesheet
    Scan {
        /// Spritesheet image
        sheet: PathBuf,

        /// Keep only this many of the widest frames (0 keeps all)
        #[arg(short, long, default_value = "0")]
        expected: usize,

        /// Ignore this many rows at the bottom (captions, baselines)
        #[arg(long, default_value = "0")]
        crop_bottom: u32,

        /// Output directory for frame_NN.png files
        #[arg(short, long, default_value = "frames")]
        out: PathBuf,
    },

    /// Play a scripted match without a window
    Demo {
        /// Settings file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the asset directory
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Maximum ticks to simulate
        #[arg(short, long, default_value = "1800")]
        ticks: u32,

        /// Sprite scale
        #[arg(short, long)]
        scale: Option<f64>,

        /// Where to save the final frame
        #[arg(long, default_value = "demo.png")]
        screenshot: PathBuf,
    },
}

#[derive(Serialize)]
struct DemoSummary<'a> {
    ticks: u64,
    winner: Option<&'a str>,
    health: [i32; 2],
    scale: f64,
    leaderboard: &'a Leaderboard,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Scan {
            sheet,
            expected,
            crop_bottom,
            out,
        } => scan(sheet, expected, crop_bottom, out),
        Commands::Demo {
            config,
            assets,
            ticks,
            scale,
            screenshot,
        } => demo(config, assets, ticks, scale, screenshot),
    }
}

fn scan(sheet: PathBuf, expected: usize, crop_bottom: u32, out: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let image = image::open(&sheet)?.to_rgba8();
    let frames = extract_frames(&image, expected, crop_bottom);

    fs::create_dir_all(&out)?;
    for (i, frame) in frames.iter().enumerate() {
        let path = out.join(format!("frame_{:02}.png", i));
        frame.pixels().save(&path)?;
        let (x, y) = frame.origin();
        println!("{}: {}x{} at ({}, {})", path.display(), frame.width(), frame.height(), x, y);
    }
    log::info!("Extracted {} frames from {}", frames.len(), sheet.display());
    Ok(())
}

fn demo(
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    ticks: u32,
    scale: Option<f64>,
    screenshot: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::load_or_default(config.as_deref());
    if let Some(dir) = assets {
        settings.asset_dir = dir;
    }

    let mut sink = NullSink;
    let mut game = Game::load(settings);
    if let Some(scale) = scale {
        game.set_scale(scale);
    }
    game.start(&mut sink);

    game.press(KeyPress::SelectMap(MapId::Arena));
    game.press(KeyPress::Confirm);

    for _ in 0..ticks {
        let inputs = scripted_inputs(game.state());
        game.update(SIM_DT, inputs, &mut sink);
        if game.state().phase == MatchPhase::Finished {
            break;
        }
    }

    game.render_software().save(&screenshot)?;
    log::info!("Saved {}", screenshot.display());

    let state = game.state();
    let summary = DemoSummary {
        ticks: state.time_ticks,
        winner: state.winner.map(|slot| state.fighter(slot).name.as_str()),
        health: PlayerSlot::ALL.map(|slot| state.fighter(slot).health),
        scale: game.scale(),
        leaderboard: game.leaderboard(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Close in, swing when in reach; player one also fires every 40 ticks
fn scripted_inputs(state: &MatchState) -> [PlayerInput; 2] {
    PlayerSlot::ALL.map(|slot| {
        let me = state.fighter(slot);
        let foe = state.fighter(slot.opponent());
        let dx = foe.rect.centerx() - me.rect.centerx();
        PlayerInput {
            left: dx < -60,
            right: dx > 60,
            jump: slot == PlayerSlot::Two && state.time_ticks % 90 == 0,
            attack: dx.abs() <= 80,
            shoot: slot == PlayerSlot::One && state.time_ticks % 40 == 0,
        }
    })
}
