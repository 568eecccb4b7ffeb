//! Rendering module
//!
//! The match is turned into a flat display list each frame. Backends only
//! need to rasterize `DrawCommand`s; `SoftwareCanvas` does so into an image.

pub mod software;

pub use software::SoftwareCanvas;

use crate::assets::Backdrops;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::leaderboard::Leaderboard;
use crate::sim::{MapId, MatchPhase, MatchState, PlayerSlot, Rect};

/// RGBA color
pub type Color = [u8; 4];

pub const WHITE: Color = [255, 255, 255, 255];
pub const BLACK: Color = [0, 0, 0, 255];
pub const RED: Color = [255, 0, 0, 255];
pub const GREEN: Color = [0, 255, 0, 255];

/// Box colors for fighters without frames
const FIGHTER_COLORS: [Color; 2] = [[255, 165, 0, 255], [0, 0, 255, 255]];
const FIREBALL_COLOR: Color = [255, 140, 0, 255];
const FIREBALL_RADIUS: i32 = 8;
const OVERLAY_COLOR: Color = [0, 0, 0, 180];

const HEALTH_BAR_WIDTH: i32 = 100;
const HEALTH_BAR_HEIGHT: i32 = 10;

/// A frame in the currently scaled sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRef {
    /// Clip lookup falls back like `Animations::clip`
    Fighter {
        slot: PlayerSlot,
        clip: &'static str,
        index: usize,
    },
    Fireball {
        index: usize,
    },
}

/// One drawing step, applied in list order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Cover the whole screen
    Fill(Color),
    /// Full-screen map image
    Backdrop(MapId),
    /// Sprite with its top-left at (x, y), mirrored horizontally if `flip`
    Sprite {
        sprite: SpriteRef,
        x: i32,
        y: i32,
        flip: bool,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    /// Filled when `width` is 0, otherwise an outline `width` pixels thick
    Circle {
        center: (i32, i32),
        radius: i32,
        color: Color,
        width: i32,
    },
    /// Blend a translucent color over the screen
    Overlay(Color),
    Text {
        text: String,
        pos: (i32, i32),
        size: u32,
        color: Color,
    },
}

fn rgb(c: [u8; 3]) -> Color {
    [c[0], c[1], c[2], 255]
}

fn text(text: impl Into<String>, pos: (i32, i32), size: u32, color: Color) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        pos,
        size,
        color,
    }
}

/// Build the display list for the current frame
pub fn build_display_list(state: &MatchState, backdrops: &Backdrops, leaderboard: &Leaderboard) -> Vec<DrawCommand> {
    let mut cmds = Vec::new();
    match state.phase {
        MatchPhase::MapSelection => map_selection(state, &mut cmds),
        MatchPhase::Fighting => arena(state, backdrops, &mut cmds),
        MatchPhase::Finished => {
            arena(state, backdrops, &mut cmds);
            finish_overlay(state, leaderboard, &mut cmds);
        }
    }
    cmds
}

fn map_selection(state: &MatchState, cmds: &mut Vec<DrawCommand>) {
    let cx = SCREEN_WIDTH / 2;
    cmds.push(DrawCommand::Fill(BLACK));
    cmds.push(text("Select Map (1-3) then ENTER to Start", (cx - 260, 40), 36, WHITE));

    for (i, map) in MapId::ALL.into_iter().enumerate() {
        let color = if state.selected_map == Some(map) {
            GREEN
        } else {
            WHITE
        };
        cmds.push(text(
            format!("{}. {}", i + 1, map.name()),
            (cx - 100, 140 + i as i32 * 46),
            36,
            color,
        ));
    }

    let hint = format!(
        "Controls: {}=Arrows+RightCtrl shoot | {}=WASD+LeftCtrl shoot | +/- resize",
        state.fighter(PlayerSlot::One).name,
        state.fighter(PlayerSlot::Two).name
    );
    cmds.push(text(hint, (cx - 360, SCREEN_HEIGHT - 60), 36, WHITE));
}

fn arena(state: &MatchState, backdrops: &Backdrops, cmds: &mut Vec<DrawCommand>) {
    match state.selected_map {
        Some(map) if backdrops.get(map).is_some() => cmds.push(DrawCommand::Backdrop(map)),
        Some(map) => cmds.push(DrawCommand::Fill(rgb(map.fallback_color()))),
        None => cmds.push(DrawCommand::Fill(WHITE)),
    }

    for fighter in &state.fighters {
        match (fighter.frame_index(), fighter.current_frame_size()) {
            (Some(index), Some((w, h))) => {
                // Sprites sit on the hitbox's bottom-center
                let (cx, bottom) = fighter.rect.midbottom();
                let at = Rect::from_midbottom(cx, bottom, w as i32, h as i32);
                cmds.push(DrawCommand::Sprite {
                    sprite: SpriteRef::Fighter {
                        slot: fighter.slot,
                        clip: fighter.anim.clip_name(),
                        index,
                    },
                    x: at.x,
                    y: at.y,
                    flip: !fighter.facing_right,
                });
            }
            _ => cmds.push(DrawCommand::Rect {
                rect: fighter.rect,
                color: FIGHTER_COLORS[fighter.slot.index()],
            }),
        }
    }

    for shot in &state.projectiles {
        if state.projectile_sizes.is_empty() {
            cmds.push(DrawCommand::Circle {
                center: shot.center(),
                radius: FIREBALL_RADIUS,
                color: FIREBALL_COLOR,
                width: 0,
            });
            cmds.push(DrawCommand::Circle {
                center: shot.center(),
                radius: FIREBALL_RADIUS,
                color: BLACK,
                width: 1,
            });
        } else {
            let at = shot.rect(&state.projectile_sizes);
            cmds.push(DrawCommand::Sprite {
                sprite: SpriteRef::Fireball {
                    index: shot.frame_index % state.projectile_sizes.len(),
                },
                x: at.x,
                y: at.y,
                flip: shot.moving_left(),
            });
        }
    }

    health_bar(50, 20, state.fighter(PlayerSlot::One).health, cmds);
    health_bar(SCREEN_WIDTH - 150, 20, state.fighter(PlayerSlot::Two).health, cmds);
}

/// Red track with the remaining health in green, one pixel per point
fn health_bar(x: i32, y: i32, health: i32, cmds: &mut Vec<DrawCommand>) {
    cmds.push(DrawCommand::Rect {
        rect: Rect::new(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        color: RED,
    });
    cmds.push(DrawCommand::Rect {
        rect: Rect::new(x, y, health.max(0), HEALTH_BAR_HEIGHT),
        color: GREEN,
    });
}

fn finish_overlay(state: &MatchState, leaderboard: &Leaderboard, cmds: &mut Vec<DrawCommand>) {
    let cx = SCREEN_WIDTH / 2;
    cmds.push(DrawCommand::Overlay(OVERLAY_COLOR));

    let winner = state.winner.map(|slot| state.fighter(slot).name.as_str()).unwrap_or_default();
    cmds.push(text(
        format!("{} Wins! Press R to Restart", winner),
        (cx - 240, SCREEN_HEIGHT / 2 - 20),
        48,
        WHITE,
    ));

    cmds.push(text("Leaderboard", (cx - 100, 50), 32, WHITE));
    for (i, entry) in leaderboard.entries.iter().enumerate() {
        cmds.push(text(
            format!("{}. {} - {}s", i + 1, entry.name, entry.time_secs),
            (cx - 100, 100 + i as i32 * 28),
            32,
            WHITE,
        ));
    }
}
