//! Fixed-grid sheet slicing
//!
//! Each row of the grid is one clip; cells are cropped verbatim.

use image::{RgbaImage, imageops};

use super::animation::{ANIM_NAMES, Animations, Frame};

/// Clip name for grid row `row`
pub fn clip_name(row: u32) -> String {
    ANIM_NAMES
        .get(row as usize)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("row{}", row))
}

/// Slice a sheet into `cols` x `rows` equal cells
pub fn slice_grid(image: &RgbaImage, cols: u32, rows: u32) -> Animations {
    let mut anims = Animations::new();
    if cols == 0 || rows == 0 {
        return anims;
    }

    let (width, height) = image.dimensions();
    let (cell_w, cell_h) = (width / cols, height / rows);

    for row in 0..rows {
        let frames: Vec<Frame> = (0..cols)
            .map(|col| {
                let origin = (col * cell_w, row * cell_h);
                let pixels = imageops::crop_imm(image, origin.0, origin.1, cell_w, cell_h).to_image();
                Frame::new(pixels, origin)
            })
            .collect();

        let name = clip_name(row);
        log::info!("Loaded {} frames for {} (grid)", frames.len(), name);
        anims.insert(name, frames);
    }

    anims
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_clip_names() {
        assert_eq!(clip_name(0), "idle");
        assert_eq!(clip_name(3), "jump");
        assert_eq!(clip_name(4), "row4");
    }

    #[test]
    fn test_slice_grid_cells() {
        let mut img = RgbaImage::new(40, 30);
        // Mark the top-left pixel of cell (col 2, row 1)
        img.put_pixel(20, 15, Rgba([9, 8, 7, 6]));

        let anims = slice_grid(&img, 4, 2);
        let walk = anims.get("walk").unwrap();
        assert_eq!(walk.len(), 4);
        assert_eq!(walk[2].origin(), (20, 15));
        assert_eq!(walk[2].size(), (10, 15));
        assert_eq!(walk[2].pixels().get_pixel(0, 0), &Rgba([9, 8, 7, 6]));
        assert_eq!(anims.get("idle").unwrap().len(), 4);
        assert!(anims.get("attack").is_none());
    }

    #[test]
    fn test_slice_grid_degenerate() {
        let img = RgbaImage::new(8, 8);
        assert!(slice_grid(&img, 0, 1).is_empty());
        assert!(slice_grid(&img, 1, 0).is_empty());
    }
}
