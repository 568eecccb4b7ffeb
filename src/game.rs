//! Game driver
//!
//! Owns everything a frontend needs: assets at the current scale, the match,
//! the leaderboard and the fixed-timestep accumulator. Frontends feed it key
//! presses, held buttons and frame time, and draw its display list.

use image::RgbaImage;

use crate::assets::{Backdrops, SpriteAssets};
use crate::audio::{AudioSink, SoundBank, SoundEffect};
use crate::consts::*;
use crate::leaderboard::Leaderboard;
use crate::renderer::{DrawCommand, SoftwareCanvas, build_display_list};
use crate::settings::Settings;
use crate::sheet::step_scale;
use crate::sim::{GameEvent, MapId, MatchState, PlayerInput, TickInput, tick};

/// Discrete key events; held movement keys go through `PlayerInput`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    SelectMap(MapId),
    Confirm,
    Restart,
    ScaleUp,
    ScaleDown,
}

pub struct Game {
    settings: Settings,
    /// Sprites as loaded; every rescale starts from these
    originals: SpriteAssets,
    /// Sprites at `scale`
    sprites: SpriteAssets,
    backdrops: Backdrops,
    sounds: SoundBank,
    state: MatchState,
    leaderboard: Leaderboard,
    scale: f64,
    accumulator: f32,
    /// One-shot inputs waiting for the next tick
    pending: TickInput,
}

impl Game {
    pub fn new(settings: Settings, originals: SpriteAssets, backdrops: Backdrops, sounds: SoundBank) -> Self {
        let scale = step_scale(settings.initial_scale, 0.0);
        let sprites = originals.rescaled(scale, settings.resize_filter);
        let names = settings.fighters.each_ref().map(|p| p.name.clone());
        let state = MatchState::new(names, sprites.frame_sizes(), sprites.fireball_sizes());

        Self {
            settings,
            originals,
            sprites,
            backdrops,
            sounds,
            state,
            leaderboard: Leaderboard::new(),
            scale,
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    /// Load every asset named by `settings`, degrading where files are missing
    pub fn load(settings: Settings) -> Self {
        let originals = SpriteAssets::load(&settings);
        let backdrops = Backdrops::load(&settings.asset_dir);
        let sounds = SoundBank::load(&settings.resolve(&settings.sounds_dir));
        Self::new(settings, originals, backdrops, sounds)
    }

    /// Start background music and the ambient loop
    pub fn start(&self, sink: &mut dyn AudioSink) {
        let music = self.settings.resolve(&self.settings.music_file);
        if music.is_file() {
            sink.play_music(&music, self.settings.music_volume);
            log::info!("Background music playing");
        } else {
            log::info!("No music file found at {}", music.display());
        }

        sink.play(
            SoundEffect::AmbientLoop,
            self.sounds.clip(SoundEffect::AmbientLoop),
            self.settings.ambient_volume,
            true,
        );
    }

    pub fn press(&mut self, key: KeyPress) {
        match key {
            KeyPress::ScaleUp => self.set_scale(step_scale(self.scale, SCALE_STEP)),
            KeyPress::ScaleDown => self.set_scale(step_scale(self.scale, -SCALE_STEP)),
            KeyPress::SelectMap(map) => self.pending.select_map = Some(map),
            KeyPress::Confirm => self.pending.confirm = true,
            KeyPress::Restart => self.pending.restart = true,
        }
    }

    /// Rescale sprites from the originals and resize hitboxes to match
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.sprites = self.originals.rescaled(self.scale, self.settings.resize_filter);
        self.state
            .apply_sprite_sizes(self.sprites.frame_sizes(), self.sprites.fireball_sizes());
        log::info!("Scale -> {:.2}", self.scale);
    }

    /// Run fixed simulation ticks for `dt` seconds of frame time
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, dt: f32, players: [PlayerInput; 2], sink: &mut dyn AudioSink) -> u32 {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                players,
                ..self.pending.clone()
            };
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending = TickInput::default();
        }

        self.dispatch_events(sink);
        substeps
    }

    fn dispatch_events(&mut self, sink: &mut dyn AudioSink) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Attack(_) => self.sounds.play(sink, SoundEffect::Attack),
                GameEvent::Shoot(_) => self.sounds.play(sink, SoundEffect::Shoot),
                GameEvent::Hit { .. } => self.sounds.play(sink, SoundEffect::Hit),
                GameEvent::MatchWon { winner } => {
                    let name = self.state.fighter(winner).name.clone();
                    let time = self.state.uptime_secs();
                    match self.leaderboard.record(name.as_str(), time) {
                        Some(rank) => log::info!("{} placed #{} at {}s", name, rank, time),
                        None => log::debug!("{} missed the leaderboard at {}s", name, time),
                    }
                }
                GameEvent::Restarted => log::debug!("Round reset"),
            }
        }
    }

    pub fn display_list(&self) -> Vec<DrawCommand> {
        build_display_list(&self.state, &self.backdrops, &self.leaderboard)
    }

    /// Rasterize the current frame (text omitted)
    pub fn render_software(&self) -> RgbaImage {
        let mut canvas = SoftwareCanvas::new();
        canvas.draw(&self.display_list(), &self.sprites, &self.backdrops);
        canvas.into_image()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn sprites(&self) -> &SpriteAssets {
        &self.sprites
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
