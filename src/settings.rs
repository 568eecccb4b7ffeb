//! Game settings
//!
//! Loaded from a JSON file; any missing field takes its default. Paths are
//! relative to `asset_dir` unless absolute.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sheet::{ResizeFilter, SheetConfig};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One combatant's name and spritesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterProfile {
    /// Display name (shown on the win screen and leaderboard)
    pub name: String,
    /// Spritesheet path
    pub sheet: PathBuf,
    /// How the sheet is cut into frames
    pub sheet_config: SheetConfig,
}

impl Default for FighterProfile {
    fn default() -> Self {
        Self {
            name: "Fighter".to_string(),
            sheet: PathBuf::from("sprites/sheet.png"),
            sheet_config: SheetConfig::default(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root for every relative asset path; maps live directly in it
    pub asset_dir: PathBuf,
    /// Player one, then player two
    pub fighters: [FighterProfile; 2],

    // === Fireball ===
    /// Directory holding image0.png, image1.png, ...
    pub fireball_dir: PathBuf,
    /// Number of numbered frames to look for
    pub fireball_frames: usize,

    // === Scaling ===
    /// Sprite scale at startup (0.5 - 4.0)
    pub initial_scale: f64,
    pub resize_filter: ResizeFilter,

    // === Audio ===
    pub sounds_dir: PathBuf,
    pub music_file: PathBuf,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Ambient loop volume (0.0 - 1.0)
    pub ambient_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("asset"),
            fighters: [
                FighterProfile {
                    name: "Naruto".to_string(),
                    sheet: PathBuf::from("sprites/sheet.png"),
                    sheet_config: SheetConfig::default(),
                },
                FighterProfile {
                    name: "Sasuke".to_string(),
                    sheet: PathBuf::from("sprites/sheet2.png"),
                    sheet_config: SheetConfig::default(),
                },
            ],

            fireball_dir: PathBuf::from("fireball"),
            fireball_frames: 77,

            initial_scale: 1.0,
            resize_filter: ResizeFilter::default(),

            sounds_dir: PathBuf::from("sounds"),
            music_file: PathBuf::from("game_music.mp3"),
            music_volume: 0.3,
            ambient_volume: 0.15,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given; unreadable or invalid files fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("{}", e),
            }
        }
        log::info!("Using default settings");
        Self::default()
    }

    /// Resolve a path against the asset directory
    pub fn resolve(&self, rel: &Path) -> PathBuf {
        self.asset_dir.join(rel)
    }
}
