//! Fighter state, movement and attacks
//!
//! Speeds are per tick. The continuous foot position is kept separately
//! from the integer hitbox so sub-pixel gravity accumulates correctly.

use glam::Vec2;

use super::collision::Rect;
use super::projectile::Projectile;
use super::state::{GameEvent, PlayerSlot};
use crate::consts::*;
use crate::sheet::FrameSizes;

/// Held buttons for one player during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub shoot: bool,
}

/// Animation state; each maps to a clip name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Attack,
    Jump,
}

impl AnimState {
    pub fn clip_name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Attack => "attack",
            AnimState::Jump => "jump",
        }
    }
}

/// One of the two combatants
#[derive(Debug, Clone)]
pub struct Fighter {
    pub slot: PlayerSlot,
    pub name: String,
    pub anim: AnimState,
    /// Ticks spent in the current animation state
    pub anim_tick: u32,
    pub facing_right: bool,
    /// Vertical velocity (pixels per tick, down is positive)
    pub vy: f32,
    pub health: i32,
    pub is_jumping: bool,
    pub is_attacking: bool,
    pub attack_cooldown: u32,
    pub shoot_cooldown: u32,
    /// Continuous bottom-center position
    pub foot: Vec2,
    /// Hitbox, sized to the current frame
    pub rect: Rect,
    sizes: FrameSizes,
}

impl Fighter {
    pub fn new(slot: PlayerSlot, name: impl Into<String>, sizes: FrameSizes) -> Self {
        let (w, h) = sizes.first().unwrap_or(FIGHTER_FALLBACK_SIZE);
        let foot = Vec2::new(slot.spawn_x(), GROUND_Y as f32);
        Self {
            slot,
            name: name.into(),
            anim: AnimState::Idle,
            anim_tick: 0,
            facing_right: slot.spawns_facing_right(),
            vy: 0.0,
            health: MAX_HEALTH,
            is_jumping: false,
            is_attacking: false,
            attack_cooldown: 0,
            shoot_cooldown: 0,
            foot,
            rect: Rect::from_midbottom(foot.x as i32, foot.y as i32, w as i32, h as i32),
            sizes,
        }
    }

    pub fn sizes(&self) -> &FrameSizes {
        &self.sizes
    }

    pub fn is_down(&self) -> bool {
        self.health <= 0
    }

    /// Index into the current clip, if the fighter has frames
    pub fn frame_index(&self) -> Option<usize> {
        let clip = self.sizes.clip(self.anim.clip_name())?;
        Some((self.anim_tick / FRAME_DURATION) as usize % clip.len())
    }

    pub fn current_frame_size(&self) -> Option<(u32, u32)> {
        let clip = self.sizes.clip(self.anim.clip_name())?;
        self.frame_index().map(|i| clip[i])
    }

    /// Swap in frame sizes from a rescaled animation set
    pub fn apply_frame_sizes(&mut self, sizes: FrameSizes) {
        self.sizes = sizes;
        if let Some((w, h)) = self.sizes.first() {
            self.rect.set_size(w as i32, h as i32);
            self.rect.set_midbottom(self.foot.x as i32, self.foot.y as i32);
        }
    }

    /// Back to spawn with full health; animation and facing are kept
    pub fn reset(&mut self) {
        self.health = MAX_HEALTH;
        self.foot = Vec2::new(self.slot.spawn_x(), GROUND_Y as f32);
        self.vy = 0.0;
        self.is_jumping = false;
        self.is_attacking = false;
        self.attack_cooldown = 0;
        self.shoot_cooldown = 0;
        self.rect.set_midbottom(self.foot.x as i32, self.foot.y as i32);
    }

    /// Advance one tick: movement, jump, melee, shooting, gravity, clamping
    ///
    /// Returns a projectile when the fighter fires this tick.
    pub fn step(
        &mut self,
        input: &PlayerInput,
        ground_y: i32,
        events: &mut Vec<GameEvent>,
    ) -> Option<Projectile> {
        let prev_anim = self.anim;
        self.anim = AnimState::Idle;
        let mut shot = None;

        if input.left {
            self.foot.x -= MOVE_SPEED;
            self.facing_right = false;
            self.anim = AnimState::Walk;
        }
        if input.right {
            self.foot.x += MOVE_SPEED;
            self.facing_right = true;
            self.anim = AnimState::Walk;
        }
        if input.jump && !self.is_jumping {
            self.vy = -JUMP_POWER;
            self.is_jumping = true;
        }
        if input.attack && self.attack_cooldown == 0 {
            self.is_attacking = true;
            self.attack_cooldown = MELEE_COOLDOWN_TICKS;
            events.push(GameEvent::Attack(self.slot));
        }
        if input.shoot && self.shoot_cooldown == 0 {
            let chest_y = self.rect.centery() as f32 - self.rect.h as f32 * 0.1;
            let muzzle_x = if self.facing_right {
                self.rect.right()
            } else {
                self.rect.x
            };
            shot = Some(Projectile::new(
                Vec2::new(muzzle_x as f32, chest_y),
                self.facing_right,
                self.slot,
            ));
            self.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
            events.push(GameEvent::Shoot(self.slot));
        }

        if self.is_attacking {
            self.anim = AnimState::Attack;
        }
        if self.anim != prev_anim {
            self.anim_tick = 0;
        } else {
            self.anim_tick += 1;
        }

        self.vy += GRAVITY;
        self.foot.y += self.vy;

        // Frame sizes vary, so the hitbox follows the current frame
        if let Some((w, h)) = self.current_frame_size() {
            self.rect.set_size(w as i32, h as i32);
        }
        self.rect.set_midbottom(self.foot.x as i32, self.foot.y as i32);

        if self.rect.bottom() > ground_y {
            self.rect.set_bottom(ground_y);
            self.foot.y = ground_y as f32;
            self.vy = 0.0;
            self.is_jumping = false;
        }

        self.rect.x = self.rect.x.min(SCREEN_WIDTH - self.rect.w).max(0);
        self.foot.x = self.rect.centerx() as f32;

        if self.attack_cooldown > 0 {
            self.attack_cooldown -= 1;
        } else {
            self.is_attacking = false;
        }
        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }

        shot
    }

    /// Melee hitbox in front of the fighter
    pub fn attack_rect(&self) -> Rect {
        let (rw, rh) = (f64::from(self.rect.w), f64::from(self.rect.h));
        let w = ((rw * 0.5) as i32).max(20);
        let h = ((rh * 0.3) as i32).max(20);
        let offset = if self.facing_right {
            (rw * 0.6) as i32
        } else {
            -((rw * 1.1) as i32)
        };
        Rect::new(self.rect.centerx() + offset, self.rect.centery() - h / 2, w, h)
    }
}
