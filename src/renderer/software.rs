//! CPU rasterizer for display lists
//!
//! Draws into an `RgbaImage` the size of the screen. Everything is clipped
//! to the canvas and blended with straight alpha. Text is skipped; it needs
//! a font-capable backend.

use image::imageops;
use image::{Rgba, RgbaImage};

use super::{Color, DrawCommand, SpriteRef};
use crate::assets::{Backdrops, SpriteAssets};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sheet::Frame;
use crate::sim::{MapId, Rect};

pub struct SoftwareCanvas {
    image: RgbaImage,
}

impl Default for SoftwareCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareCanvas {
    pub fn new() -> Self {
        Self::with_size(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Rasterize `cmds` in order
    pub fn draw(&mut self, cmds: &[DrawCommand], sprites: &SpriteAssets, backdrops: &Backdrops) {
        for cmd in cmds {
            match cmd {
                DrawCommand::Fill(color) => self.fill(*color),
                DrawCommand::Backdrop(map) => self.backdrop(*map, backdrops),
                DrawCommand::Sprite { sprite, x, y, flip } => match resolve(sprite, sprites) {
                    Some(frame) => self.blit(frame, *x, *y, *flip),
                    None => log::debug!("No frame for {:?}", sprite),
                },
                DrawCommand::Rect { rect, color } => self.rect(rect, *color),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    width,
                } => self.circle(*center, *radius, *color, *width),
                DrawCommand::Overlay(color) => {
                    for px in self.image.pixels_mut() {
                        blend(px, *color);
                    }
                }
                DrawCommand::Text { text, .. } => log::trace!("Skipping text {:?}", text),
            }
        }
    }

    fn fill(&mut self, color: Color) {
        for px in self.image.pixels_mut() {
            *px = Rgba(color);
        }
    }

    fn backdrop(&mut self, map: MapId, backdrops: &Backdrops) {
        match backdrops.get(map) {
            Some(img) => imageops::replace(&mut self.image, img, 0, 0),
            None => {
                let [r, g, b] = map.fallback_color();
                self.fill([r, g, b, 255]);
            }
        }
    }

    fn blit(&mut self, frame: &Frame, x: i32, y: i32, flip: bool) {
        if flip {
            let mirrored = imageops::flip_horizontal(frame.pixels());
            imageops::overlay(&mut self.image, &mirrored, i64::from(x), i64::from(y));
        } else {
            imageops::overlay(&mut self.image, frame.pixels(), i64::from(x), i64::from(y));
        }
    }

    /// Visible pixel range of `rect`, or None if fully off-canvas
    fn clip(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.image.width() as i32);
        let y1 = rect.bottom().min(self.image.height() as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn rect(&mut self, rect: &Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                blend(self.image.get_pixel_mut(x, y), color);
            }
        }
    }

    fn circle(&mut self, (cx, cy): (i32, i32), radius: i32, color: Color, width: i32) {
        let bounds = Rect::new(cx - radius, cy - radius, radius * 2 + 1, radius * 2 + 1);
        let Some((x0, y0, x1, y1)) = self.clip(&bounds) else {
            return;
        };
        let outer = radius * radius;
        let inner = if width > 0 && width < radius {
            (radius - width) * (radius - width)
        } else {
            -1
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let (dx, dy) = (x as i32 - cx, y as i32 - cy);
                let d = dx * dx + dy * dy;
                if d <= outer && d > inner {
                    blend(self.image.get_pixel_mut(x, y), color);
                }
            }
        }
    }
}

fn resolve<'a>(sprite: &SpriteRef, sprites: &'a SpriteAssets) -> Option<&'a Frame> {
    match *sprite {
        SpriteRef::Fighter { slot, clip, index } => sprites.fighters[slot.index()].clip(clip)?.get(index),
        SpriteRef::Fireball { index } => sprites.fireball.get(index),
    }
}

/// Straight-alpha blend of `color` onto an opaque pixel
fn blend(px: &mut Rgba<u8>, color: Color) {
    let a = u32::from(color[3]);
    for c in 0..3 {
        let src = u32::from(color[c]);
        let dst = u32::from(px[c]);
        px[c] = ((src * a + dst * (255 - a) + 127) / 255) as u8;
    }
    px[3] = 255;
}
