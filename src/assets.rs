//! Asset bundle: fighter animations, fireball frames and map backdrops
//!
//! Every loader degrades instead of failing. A missing sheet yields an empty
//! animation set (the fighter draws as a colored box), missing fireball
//! frames fall back to a drawn circle, missing maps to a solid color.

use std::path::Path;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::AssetError;
use crate::settings::Settings;
use crate::sheet::{Animations, Frame, FrameSizes, ResizeFilter, load_sheet};
use crate::sim::MapId;

/// Sprites for both fighters plus the fireball sequence
#[derive(Debug, Clone, Default)]
pub struct SpriteAssets {
    /// Indexed by `PlayerSlot::index`
    pub fighters: [Animations; 2],
    pub fireball: Vec<Frame>,
}

impl SpriteAssets {
    /// Load original-resolution sprites
    pub fn load(settings: &Settings) -> Self {
        let fighters = settings.fighters.each_ref().map(|profile| {
            let path = settings.resolve(&profile.sheet);
            match load_sheet(&path, &profile.sheet_config) {
                Ok(anims) => anims,
                Err(e) => {
                    log::warn!("{}: {}; drawing as a box", profile.name, e);
                    Animations::new()
                }
            }
        });

        let fireball = load_fireball_frames(&settings.resolve(&settings.fireball_dir), settings.fireball_frames);
        if fireball.is_empty() {
            log::warn!("No fireball frames loaded; projectiles fall back to simple drawing");
        }

        Self { fighters, fireball }
    }

    /// Copy at `factor`, always derived from `self`
    pub fn rescaled(&self, factor: f64, filter: ResizeFilter) -> Self {
        Self {
            fighters: self.fighters.each_ref().map(|anims| anims.rescaled(factor, filter)),
            fireball: self.fireball.iter().map(|f| f.rescaled(factor, filter)).collect(),
        }
    }

    pub fn frame_sizes(&self) -> [FrameSizes; 2] {
        self.fighters.each_ref().map(Animations::frame_sizes)
    }

    pub fn fireball_sizes(&self) -> Vec<(u32, u32)> {
        self.fireball.iter().map(Frame::size).collect()
    }
}

fn open_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Read `image0.png` .. `image{count-1}.png`; missing files are skipped
pub fn load_fireball_frames(dir: &Path, count: usize) -> Vec<Frame> {
    if !dir.is_dir() {
        log::warn!("Fireball directory not found: {}", dir.display());
        return Vec::new();
    }

    let mut frames = Vec::new();
    for i in 0..count {
        let path = dir.join(format!("image{}.png", i));
        match open_rgba(&path) {
            Ok(img) => frames.push(Frame::new(img, (0, 0))),
            Err(AssetError::NotFound(_)) => {}
            Err(e) => log::warn!("Failed to load fireball frame: {}", e),
        }
    }
    log::debug!("Loaded {} fireball frames", frames.len());
    frames
}

/// Full-screen map images, one slot per map
#[derive(Debug, Clone, Default)]
pub struct Backdrops {
    maps: [Option<RgbaImage>; 3],
}

impl Backdrops {
    pub fn file_name(map: MapId) -> &'static str {
        match map {
            MapId::Forest => "forest.jpg",
            MapId::Village => "village.jpg",
            MapId::Arena => "arena.jpg",
        }
    }

    /// Load and stretch each map image in `dir` to the screen size
    pub fn load(dir: &Path) -> Self {
        let maps = MapId::ALL.map(|map| {
            let path = dir.join(Self::file_name(map));
            match open_rgba(&path) {
                Ok(img) => {
                    log::info!("Loaded map: {}", Self::file_name(map));
                    Some(imageops::resize(
                        &img,
                        SCREEN_WIDTH as u32,
                        SCREEN_HEIGHT as u32,
                        FilterType::Nearest,
                    ))
                }
                Err(AssetError::NotFound(_)) => None,
                Err(e) => {
                    log::warn!("Failed to load map: {}", e);
                    None
                }
            }
        });

        let backdrops = Self { maps };
        if backdrops.is_empty() {
            log::info!("No map images found; using color backgrounds");
        }
        backdrops
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, map: MapId) -> Option<&RgbaImage> {
        self.maps[map.index()].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(Option::is_none)
    }
}
