//! Frames, animation clips and rescaling
//!
//! There is no global "current scale": every rescale takes the factor as a
//! parameter and derives from the original frames.

use std::collections::BTreeMap;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// Standard clip names, in fallback order. Grid rows past these are `row{r}`.
pub const ANIM_NAMES: [&str; 4] = ["idle", "walk", "attack", "jump"];

/// One cropped, alpha-masked pose
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: RgbaImage,
    /// Top-left corner of the crop in the source sheet
    origin: (u32, u32),
}

impl Frame {
    pub fn new(pixels: RgbaImage, origin: (u32, u32)) -> Self {
        Self { pixels, origin }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Resized copy; the origin still refers to the source sheet
    pub fn rescaled(&self, factor: f64, filter: ResizeFilter) -> Frame {
        let (w, h) = self.size();
        let pixels = imageops::resize(
            &self.pixels,
            scaled_dimension(w, factor),
            scaled_dimension(h, factor),
            filter.filter_type(),
        );
        Frame::new(pixels, self.origin)
    }
}

/// Interpolation used when rescaling frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    #[default]
    Smooth,
    Nearest,
}

impl ResizeFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Smooth => FilterType::Triangle,
            ResizeFilter::Nearest => FilterType::Nearest,
        }
    }
}

/// Scaled edge length: round half to even, never below 1
#[inline]
pub fn scaled_dimension(len: u32, factor: f64) -> u32 {
    let scaled = (f64::from(len) * factor).round_ties_even();
    if scaled < 1.0 { 1 } else { scaled as u32 }
}

/// Step the runtime scale by `delta`, rounded to 2 decimals and clamped
pub fn step_scale(scale: f64, delta: f64) -> f64 {
    let stepped = ((scale + delta) * 100.0).round_ties_even() / 100.0;
    stepped.clamp(MIN_SCALE, MAX_SCALE)
}

/// Clip lookup with fallback to the first non-empty standard clip
fn resolve_clip<'a, T>(clips: &'a BTreeMap<String, Vec<T>>, name: &str) -> Option<&'a [T]> {
    clips
        .get(name)
        .filter(|frames| !frames.is_empty())
        .or_else(|| {
            ANIM_NAMES
                .iter()
                .filter_map(|n| clips.get(*n))
                .find(|frames| !frames.is_empty())
        })
        .map(Vec::as_slice)
}

/// First frame of the first non-empty standard clip, else of any clip
fn peek_first<T>(clips: &BTreeMap<String, Vec<T>>) -> Option<&T> {
    ANIM_NAMES
        .iter()
        .filter_map(|n| clips.get(*n))
        .find_map(|frames| frames.first())
        .or_else(|| clips.values().find_map(|frames| frames.first()))
}

/// Named animation clips for one character
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animations {
    clips: BTreeMap<String, Vec<Frame>>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single clip
    pub fn single(name: impl Into<String>, frames: Vec<Frame>) -> Self {
        let mut anims = Self::new();
        anims.insert(name, frames);
        anims
    }

    pub fn insert(&mut self, name: impl Into<String>, frames: Vec<Frame>) {
        self.clips.insert(name.into(), frames);
    }

    /// Exact clip lookup
    pub fn get(&self, name: &str) -> Option<&[Frame]> {
        self.clips.get(name).map(Vec::as_slice)
    }

    /// Clip to play for `name`, falling back to idle/walk/attack/jump
    pub fn clip(&self, name: &str) -> Option<&[Frame]> {
        resolve_clip(&self.clips, name)
    }

    pub fn first_frame(&self) -> Option<&Frame> {
        peek_first(&self.clips)
    }

    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    /// Total frames across all clips
    pub fn frame_count(&self) -> usize {
        self.clips.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Every frame resized by `factor`
    pub fn rescaled(&self, factor: f64, filter: ResizeFilter) -> Animations {
        let clips = self
            .clips
            .iter()
            .map(|(name, frames)| {
                let scaled = frames.iter().map(|f| f.rescaled(factor, filter)).collect();
                (name.clone(), scaled)
            })
            .collect();
        Animations { clips }
    }

    pub fn frame_sizes(&self) -> FrameSizes {
        let clips = self
            .clips
            .iter()
            .map(|(name, frames)| (name.clone(), frames.iter().map(Frame::size).collect()))
            .collect();
        FrameSizes { clips }
    }
}

/// Per-clip frame dimensions, all the simulation needs from sprites
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSizes {
    clips: BTreeMap<String, Vec<(u32, u32)>>,
}

impl FrameSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, sizes: Vec<(u32, u32)>) {
        self.clips.insert(name.into(), sizes);
    }

    pub fn clip(&self, name: &str) -> Option<&[(u32, u32)]> {
        resolve_clip(&self.clips, name)
    }

    pub fn first(&self) -> Option<(u32, u32)> {
        peek_first(&self.clips).copied()
    }
}
