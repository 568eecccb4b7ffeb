//! Projectiles (fireballs)

use glam::Vec2;

use super::collision::Rect;
use super::state::PlayerSlot;
use crate::consts::{OFFSCREEN_MARGIN, PROJECTILE_FALLBACK_SIZE, PROJECTILE_SPEED, SCREEN_WIDTH};

/// A horizontally travelling projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Center position
    pub pos: Vec2,
    /// Horizontal speed (pixels per tick, signed)
    pub vx: f32,
    /// Who fired it; never hits its owner
    pub owner: PlayerSlot,
    /// Current fireball animation frame
    pub frame_index: usize,
}

impl Projectile {
    pub fn new(pos: Vec2, facing_right: bool, owner: PlayerSlot) -> Self {
        Self {
            pos,
            vx: if facing_right { PROJECTILE_SPEED } else { -PROJECTILE_SPEED },
            owner,
            frame_index: 0,
        }
    }

    /// Move one tick and cycle through `frame_count` animation frames
    pub fn advance(&mut self, frame_count: usize) {
        self.pos.x += self.vx;
        self.frame_index = if frame_count > 0 {
            (self.frame_index + 1) % frame_count
        } else {
            0
        };
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -OFFSCREEN_MARGIN || self.pos.x > SCREEN_WIDTH as f32 + OFFSCREEN_MARGIN
    }

    /// Frames are drawn mirrored when travelling left
    pub fn moving_left(&self) -> bool {
        self.vx < 0.0
    }

    /// Integer center used for drawing and hitboxes
    pub fn center(&self) -> (i32, i32) {
        (self.pos.x as i32, self.pos.y as i32)
    }

    /// Size of the current frame, or the fallback box without frames
    pub fn size(&self, frame_sizes: &[(u32, u32)]) -> (u32, u32) {
        if frame_sizes.is_empty() {
            PROJECTILE_FALLBACK_SIZE
        } else {
            frame_sizes[self.frame_index % frame_sizes.len()]
        }
    }

    /// Hitbox centered on the projectile
    pub fn rect(&self, frame_sizes: &[(u32, u32)]) -> Rect {
        let (w, h) = self.size(frame_sizes);
        let (cx, cy) = self.center();
        Rect::from_center(cx, cy, w as i32, h as i32)
    }
}
