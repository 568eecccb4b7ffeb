//! Fixed timestep simulation tick
//!
//! Advances the match by one 1/60 s step. Pure: no rendering, audio or
//! platform access; side effects surface as `GameEvent`s.

use super::fighter::PlayerInput;
use super::state::{GameEvent, MapId, MatchPhase, MatchState, PlayerSlot};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held buttons, indexed by `PlayerSlot::index`
    pub players: [PlayerInput; 2],
    /// Map chosen on the selection screen
    pub select_map: Option<MapId>,
    /// Start the match once a map is chosen
    pub confirm: bool,
    /// Restart after a knockout
    pub restart: bool,
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        MatchPhase::MapSelection => {
            if let Some(map) = input.select_map {
                state.selected_map = Some(map);
            }
            if input.confirm {
                if let Some(map) = state.selected_map {
                    state.phase = MatchPhase::Fighting;
                    log::info!("Match started on {}", map.name());
                }
            }
        }

        MatchPhase::Fighting => fight(state, input),

        MatchPhase::Finished => {
            if input.restart {
                state.reset_round();
            }
        }
    }
}

fn fight(state: &mut MatchState, input: &TickInput) {
    // Movement and actions, player one first
    for slot in PlayerSlot::ALL {
        let i = slot.index();
        if let Some(shot) = state.fighters[i].step(&input.players[i], GROUND_Y, &mut state.events) {
            state.projectiles.push(shot);
        }
    }

    // Melee: active for the whole attack cooldown
    for slot in PlayerSlot::ALL {
        let attacker = &state.fighters[slot.index()];
        let target = slot.opponent();
        if attacker.is_attacking && attacker.attack_rect().collides(&state.fighters[target.index()].rect) {
            state.fighters[target.index()].health -= MELEE_DAMAGE;
            state.events.push(GameEvent::Hit {
                target,
                damage: MELEE_DAMAGE,
            });
        }
    }

    // Projectiles only test against the non-owner
    let MatchState {
        fighters,
        projectiles,
        projectile_sizes,
        events,
        ..
    } = &mut *state;
    let sizes: &[(u32, u32)] = projectile_sizes;
    let frame_count = sizes.len();
    projectiles.retain_mut(|shot| {
        shot.advance(frame_count);
        let target = shot.owner.opponent();
        let fighter = &mut fighters[target.index()];
        if shot.rect(sizes).collides(&fighter.rect) {
            fighter.health -= PROJECTILE_DAMAGE;
            events.push(GameEvent::Hit {
                target,
                damage: PROJECTILE_DAMAGE,
            });
            return false;
        }
        !shot.is_offscreen()
    });

    let [one, two] = &state.fighters;
    if one.is_down() || two.is_down() {
        let winner = if one.is_down() {
            PlayerSlot::Two
        } else {
            PlayerSlot::One
        };
        log::info!("{} wins", state.fighter(winner).name);
        state.winner = Some(winner);
        state.phase = MatchPhase::Finished;
        state.events.push(GameEvent::MatchWon { winner });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::FrameSizes;
    use crate::sim::Projectile;
    use glam::Vec2;

    fn fighting_state() -> MatchState {
        let mut state = MatchState::new(
            ["One".to_string(), "Two".to_string()],
            [FrameSizes::new(), FrameSizes::new()],
            Vec::new(),
        );
        state.selected_map = Some(MapId::Arena);
        state.phase = MatchPhase::Fighting;
        state
    }

    fn held(slot: PlayerSlot, buttons: PlayerInput) -> TickInput {
        let mut input = TickInput::default();
        input.players[slot.index()] = buttons;
        input
    }

    /// Put player two right in front of player one
    fn close_quarters(state: &mut MatchState) {
        let two = state.fighter_mut(PlayerSlot::Two);
        two.foot = Vec2::new(200.0, GROUND_Y as f32);
        two.rect.set_midbottom(200, GROUND_Y);
    }

    #[test]
    fn test_map_selection_flow() {
        let mut state = fighting_state();
        state.phase = MatchPhase::MapSelection;
        state.selected_map = None;

        // Confirm without a map does nothing
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm);
        assert_eq!(state.phase, MatchPhase::MapSelection);

        let select = TickInput {
            select_map: Some(MapId::Village),
            ..Default::default()
        };
        tick(&mut state, &select);
        assert_eq!(state.selected_map, Some(MapId::Village));
        assert_eq!(state.phase, MatchPhase::MapSelection);

        tick(&mut state, &confirm);
        assert_eq!(state.phase, MatchPhase::Fighting);
        assert_eq!(state.time_ticks, 3);
    }

    #[test]
    fn test_melee_hits_each_tick_while_attacking() {
        let mut state = fighting_state();
        close_quarters(&mut state);

        let attack = held(
            PlayerSlot::One,
            PlayerInput {
                attack: true,
                ..Default::default()
            },
        );
        tick(&mut state, &attack);
        assert_eq!(state.fighter(PlayerSlot::Two).health, MAX_HEALTH - MELEE_DAMAGE);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.fighter(PlayerSlot::Two).health, MAX_HEALTH - 2 * MELEE_DAMAGE);
        assert_eq!(state.fighter(PlayerSlot::One).health, MAX_HEALTH);

        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::Attack(PlayerSlot::One));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Hit { target: PlayerSlot::Two, .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_melee_misses_at_range() {
        let mut state = fighting_state();
        let attack = held(
            PlayerSlot::One,
            PlayerInput {
                attack: true,
                ..Default::default()
            },
        );
        tick(&mut state, &attack);
        assert_eq!(state.fighter(PlayerSlot::Two).health, MAX_HEALTH);
    }

    #[test]
    fn test_projectile_hits_opponent_and_is_removed() {
        let mut state = fighting_state();
        let shoot = held(
            PlayerSlot::One,
            PlayerInput {
                shoot: true,
                ..Default::default()
            },
        );
        tick(&mut state, &shoot);
        assert_eq!(state.projectiles.len(), 1);

        let mut ticks = 0;
        while !state.projectiles.is_empty() && ticks < 100 {
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }
        assert!(state.projectiles.is_empty());
        assert_eq!(state.fighter(PlayerSlot::Two).health, MAX_HEALTH - PROJECTILE_DAMAGE);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Hit {
                    target: PlayerSlot::Two,
                    damage: PROJECTILE_DAMAGE
                })
        );
    }

    #[test]
    fn test_projectile_ignores_owner() {
        let mut state = fighting_state();
        let owner_rect = state.fighter(PlayerSlot::One).rect;
        let (cx, cy) = (owner_rect.centerx() as f32, owner_rect.centery() as f32);
        state
            .projectiles
            .push(Projectile::new(Vec2::new(cx, cy), true, PlayerSlot::One));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.fighter(PlayerSlot::One).health, MAX_HEALTH);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_projectile_removed_offscreen() {
        let mut state = fighting_state();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(-190.0, 100.0), false, PlayerSlot::Two));
        tick(&mut state, &TickInput::default());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.fighter(PlayerSlot::One).health, MAX_HEALTH);
    }

    #[test]
    fn test_knockout_and_restart() {
        let mut state = fighting_state();
        state.fighter_mut(PlayerSlot::One).health = 3;
        close_quarters(&mut state);
        state.fighter_mut(PlayerSlot::Two).facing_right = false;

        let attack = held(
            PlayerSlot::Two,
            PlayerInput {
                attack: true,
                ..Default::default()
            },
        );
        tick(&mut state, &attack);
        assert_eq!(state.phase, MatchPhase::Finished);
        assert_eq!(state.winner, Some(PlayerSlot::Two));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::MatchWon {
                    winner: PlayerSlot::Two
                })
        );

        // Finished matches don't simulate
        let health = state.fighter(PlayerSlot::Two).health;
        tick(&mut state, &attack);
        assert_eq!(state.fighter(PlayerSlot::Two).health, health);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, MatchPhase::MapSelection);
        assert_eq!(state.selected_map, None);
        assert_eq!(state.fighter(PlayerSlot::One).health, MAX_HEALTH);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_double_knockout_goes_to_player_two() {
        let mut state = fighting_state();
        state.fighter_mut(PlayerSlot::One).health = 0;
        state.fighter_mut(PlayerSlot::Two).health = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.winner, Some(PlayerSlot::Two));
    }

    #[test]
    fn test_determinism() {
        let mut a = fighting_state();
        let mut b = fighting_state();
        let inputs = [
            held(
                PlayerSlot::One,
                PlayerInput {
                    right: true,
                    shoot: true,
                    ..Default::default()
                },
            ),
            held(
                PlayerSlot::Two,
                PlayerInput {
                    left: true,
                    jump: true,
                    attack: true,
                    ..Default::default()
                },
            ),
            TickInput::default(),
        ];
        for _ in 0..40 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        for slot in PlayerSlot::ALL {
            assert_eq!(a.fighter(slot).rect, b.fighter(slot).rect);
            assert_eq!(a.fighter(slot).health, b.fighter(slot).health);
        }
        assert_eq!(a.projectiles, b.projectiles);
    }
}
