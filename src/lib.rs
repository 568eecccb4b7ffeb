//! Sprite Duel - a two-player local fighting game
//!
//! Core modules:
//! - `sheet`: Spritesheet ingestion (autoscan and grid slicing, rescaling)
//! - `assets`: Fighter sheets, fireball frames and map backdrops
//! - `sim`: Fixed-timestep match simulation (fighters, projectiles, hitboxes)
//! - `renderer`: Display list and software rasterizer
//! - `game`: Driver tying input, simulation, audio and scale together

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod renderer;
pub mod settings;
pub mod sheet;
pub mod sim;

pub use error::AssetError;
pub use game::{Game, KeyPress};
pub use leaderboard::Leaderboard;
pub use settings::Settings;
pub use sheet::{Animations, Frame, extract_frames};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;
    /// Feet rest a little above the bottom edge
    pub const GROUND_Y: i32 = SCREEN_HEIGHT - 20;

    /// Simulation rate; all per-tick speeds below assume it
    pub const TICK_RATE: u64 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Fighter movement (pixels per tick)
    pub const MOVE_SPEED: f32 = 5.0;
    pub const JUMP_POWER: f32 = 15.0;
    pub const GRAVITY: f32 = 0.8;
    /// Ticks each animation frame stays on screen
    pub const FRAME_DURATION: u32 = 6;
    /// Hitbox used when a fighter has no frames
    pub const FIGHTER_FALLBACK_SIZE: (u32, u32) = (50, 80);
    /// Spawn positions (foot x)
    pub const PLAYER_ONE_SPAWN_X: f32 = 150.0;
    pub const PLAYER_TWO_SPAWN_X: f32 = 650.0;

    /// Combat
    pub const MAX_HEALTH: i32 = 100;
    pub const MELEE_DAMAGE: i32 = 5;
    pub const MELEE_COOLDOWN_TICKS: u32 = 30;
    pub const PROJECTILE_SPEED: f32 = 14.0;
    pub const PROJECTILE_DAMAGE: i32 = 12;
    /// ~3 shots/sec at 60 ticks/sec
    pub const SHOOT_COOLDOWN_TICKS: u32 = 18;
    /// Hitbox used when no fireball frames are loaded
    pub const PROJECTILE_FALLBACK_SIZE: (u32, u32) = (16, 16);
    /// Projectiles are dropped this far past either screen edge
    pub const OFFSCREEN_MARGIN: f32 = 200.0;

    /// Runtime sprite scale
    pub const MIN_SCALE: f64 = 0.5;
    pub const MAX_SCALE: f64 = 4.0;
    pub const SCALE_STEP: f64 = 0.1;
}
