//! Audio system
//!
//! Sound effects come from WAV files in the sounds directory when present;
//! anything missing is replaced by a short synthesized tone. Playback itself
//! goes through an `AudioSink` so the game never depends on a device.

use std::fs;
use std::path::{Path, PathBuf};

/// Output sample rate for synthesized clips
pub const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Melee swing
    Attack,
    /// Damage landed (melee or projectile)
    Hit,
    /// Projectile fired
    Shoot,
    /// Background loop under the music
    AmbientLoop,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Attack,
        SoundEffect::Hit,
        SoundEffect::Shoot,
        SoundEffect::AmbientLoop,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Attack => "attack.wav",
            SoundEffect::Hit => "hit.wav",
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::AmbientLoop => "bg_loop.wav",
        }
    }

    /// Fallback tone as (frequency Hz, duration s, volume)
    pub fn fallback_tone(self) -> (f64, f64, f64) {
        match self {
            SoundEffect::Attack => (880.0, 0.08, 0.5),
            SoundEffect::Hit => (220.0, 0.12, 0.5),
            SoundEffect::Shoot => (1400.0, 0.05, 0.4),
            SoundEffect::AmbientLoop => (110.0, 1.0, 0.2),
        }
    }

    fn index(self) -> usize {
        match self {
            SoundEffect::Attack => 0,
            SoundEffect::Hit => 1,
            SoundEffect::Shoot => 2,
            SoundEffect::AmbientLoop => 3,
        }
    }
}

/// Playable clip data
#[derive(Debug, Clone, PartialEq)]
pub enum SoundClip {
    /// File contents, decoded by the sink
    Encoded { path: PathBuf, bytes: Vec<u8> },
    /// Stereo frames, left and right
    Pcm { sample_rate: u32, frames: Vec<[i16; 2]> },
}

impl SoundClip {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, SoundClip::Pcm { .. })
    }
}

/// Sine tone with a linear 1.0 -> 0.1 decay, as 16-bit stereo
pub fn synthesize_tone(freq: f64, duration: f64, volume: f64) -> SoundClip {
    let n = (f64::from(SAMPLE_RATE) * duration) as usize;

    let frames = (0..n)
        .map(|i| {
            let t = i as f64 * duration / n as f64;
            let decay = if n > 1 {
                1.0 - 0.9 * i as f64 / (n - 1) as f64
            } else {
                1.0
            };
            let wave = volume * (2.0 * std::f64::consts::PI * freq * t).sin() * decay;
            // Truncates toward zero
            let sample = (wave * 32767.0) as i16;
            [sample, sample]
        })
        .collect();

    SoundClip::Pcm {
        sample_rate: SAMPLE_RATE,
        frames,
    }
}

/// Something that can play sounds
pub trait AudioSink {
    /// Start a clip; `looping` repeats it until the sink stops
    fn play(&mut self, effect: SoundEffect, clip: &SoundClip, volume: f32, looping: bool);

    /// Stream a music file on loop
    fn play_music(&mut self, path: &Path, volume: f32);
}

/// Sink that only logs
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, effect: SoundEffect, _clip: &SoundClip, volume: f32, looping: bool) {
        log::debug!("play {:?} (volume {:.2}, looping {})", effect, volume, looping);
    }

    fn play_music(&mut self, path: &Path, volume: f32) {
        log::debug!("music {} (volume {:.2})", path.display(), volume);
    }
}

/// One clip per sound effect
#[derive(Debug, Clone)]
pub struct SoundBank {
    clips: [SoundClip; 4],
}

impl SoundBank {
    /// Load effects from `dir`, synthesizing any that are missing or unreadable
    pub fn load(dir: &Path) -> Self {
        let clips = SoundEffect::ALL.map(|effect| {
            let path = dir.join(effect.file_name());
            if !path.is_file() {
                return Self::fallback(effect);
            }
            match fs::read(&path) {
                Ok(bytes) => {
                    log::info!("Loaded sound {}", path.display());
                    SoundClip::Encoded { path, bytes }
                }
                Err(e) => {
                    log::warn!("Failed to load sound {}: {}", path.display(), e);
                    Self::fallback(effect)
                }
            }
        });
        Self { clips }
    }

    /// All effects synthesized
    pub fn synthesized() -> Self {
        Self {
            clips: SoundEffect::ALL.map(Self::fallback),
        }
    }

    fn fallback(effect: SoundEffect) -> SoundClip {
        let (freq, duration, volume) = effect.fallback_tone();
        synthesize_tone(freq, duration, volume)
    }

    pub fn clip(&self, effect: SoundEffect) -> &SoundClip {
        &self.clips[effect.index()]
    }

    /// Play a one-shot effect at full volume
    pub fn play(&self, sink: &mut dyn AudioSink, effect: SoundEffect) {
        sink.play(effect, self.clip(effect), 1.0, false);
    }
}
