//! Sheet decoding and mode dispatch

use std::path::Path;

use image::RgbaImage;

use super::animation::Animations;
use super::autoscan::extract_frames;
use super::config::SheetConfig;
use super::grid::slice_grid;
use crate::error::AssetError;

/// Decode a sheet from disk and cut it per `config`
pub fn load_sheet(path: &Path, config: &SheetConfig) -> Result<Animations, AssetError> {
    config.validate()?;

    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let image = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    log::debug!(
        "Decoded sheet {} ({}x{}, {})",
        path.display(),
        image.width(),
        image.height(),
        config.mode_name()
    );

    Ok(animations_from_image(&image, config))
}

/// Cut an already-decoded sheet per `config`
pub fn animations_from_image(image: &RgbaImage, config: &SheetConfig) -> Animations {
    match *config {
        SheetConfig::AutoscanRow {
            expected,
            crop_bottom_px,
        } => {
            let frames = extract_frames(image, expected, crop_bottom_px);
            log::info!("Loaded {} frames via autoscan", frames.len());
            Animations::single("idle", frames)
        }
        SheetConfig::Grid { cols, rows } => slice_grid(image, cols, rows),
        SheetConfig::Unknown => {
            log::warn!("Unknown sheet mode, defaulting to grid 4x1");
            slice_grid(image, 4, 1)
        }
    }
}
