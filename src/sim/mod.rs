//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable update order (player one, then player two, then projectiles)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod fighter;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use fighter::{AnimState, Fighter, PlayerInput};
pub use projectile::Projectile;
pub use state::{GameEvent, MapId, MatchPhase, MatchState, PlayerSlot};
pub use tick::{TickInput, tick};
