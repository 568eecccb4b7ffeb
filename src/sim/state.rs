//! Match state and core simulation types

use std::mem;

use super::fighter::Fighter;
use super::projectile::Projectile;
use crate::consts::*;
use crate::sheet::FrameSizes;

/// Which player a fighter or projectile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    pub fn spawn_x(self) -> f32 {
        match self {
            PlayerSlot::One => PLAYER_ONE_SPAWN_X,
            PlayerSlot::Two => PLAYER_TWO_SPAWN_X,
        }
    }

    pub fn spawns_facing_right(self) -> bool {
        self == PlayerSlot::One
    }
}

/// Selectable arenas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapId {
    Forest,
    Village,
    Arena,
}

impl MapId {
    pub const ALL: [MapId; 3] = [MapId::Forest, MapId::Village, MapId::Arena];

    pub fn from_index(index: usize) -> Option<MapId> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            MapId::Forest => 0,
            MapId::Village => 1,
            MapId::Arena => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MapId::Forest => "Forest",
            MapId::Village => "Village",
            MapId::Arena => "Arena",
        }
    }

    /// Solid background used when the map image is missing
    pub fn fallback_color(self) -> [u8; 3] {
        match self {
            MapId::Forest => [34, 139, 34],
            MapId::Village => [139, 69, 19],
            MapId::Arena => [128, 128, 128],
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Choosing an arena
    MapSelection,
    /// Both fighters active
    Fighting,
    /// Someone is down; waiting for restart
    Finished,
}

/// Things that happened during a tick, for audio and bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Melee swing started
    Attack(PlayerSlot),
    /// Projectile fired
    Shoot(PlayerSlot),
    /// Damage landed on `target`
    Hit { target: PlayerSlot, damage: i32 },
    /// Match ended
    MatchWon { winner: PlayerSlot },
    /// Fighters reset and map selection reopened
    Restarted,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub selected_map: Option<MapId>,
    /// Indexed by `PlayerSlot::index`
    pub fighters: [Fighter; 2],
    /// Live projectiles, in firing order
    pub projectiles: Vec<Projectile>,
    /// Fireball frame sizes at the current scale (empty without frames)
    pub projectile_sizes: Vec<(u32, u32)>,
    pub winner: Option<PlayerSlot>,
    /// Ticks since the state was created, in every phase
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl MatchState {
    pub fn new(names: [String; 2], sizes: [FrameSizes; 2], projectile_sizes: Vec<(u32, u32)>) -> Self {
        let [name_one, name_two] = names;
        let [sizes_one, sizes_two] = sizes;
        Self {
            phase: MatchPhase::MapSelection,
            selected_map: None,
            fighters: [
                Fighter::new(PlayerSlot::One, name_one, sizes_one),
                Fighter::new(PlayerSlot::Two, name_two, sizes_two),
            ],
            projectiles: Vec::new(),
            projectile_sizes,
            winner: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn fighter(&self, slot: PlayerSlot) -> &Fighter {
        &self.fighters[slot.index()]
    }

    pub fn fighter_mut(&mut self, slot: PlayerSlot) -> &mut Fighter {
        &mut self.fighters[slot.index()]
    }

    /// Whole seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.time_ticks / TICK_RATE
    }

    /// Install sprite sizes from a rescaled asset set
    pub fn apply_sprite_sizes(&mut self, sizes: [FrameSizes; 2], projectile_sizes: Vec<(u32, u32)>) {
        for (fighter, sizes) in self.fighters.iter_mut().zip(sizes) {
            fighter.apply_frame_sizes(sizes);
        }
        self.projectile_sizes = projectile_sizes;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Reset fighters and reopen map selection
    pub fn reset_round(&mut self) {
        for fighter in &mut self.fighters {
            fighter.reset();
        }
        self.projectiles.clear();
        self.phase = MatchPhase::MapSelection;
        self.selected_map = None;
        self.winner = None;
        self.events.push(GameEvent::Restarted);
    }
}
