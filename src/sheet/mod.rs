//! Spritesheet ingestion
//!
//! Turns a decoded sheet into named animation clips, either by autoscanning
//! a packed row of poses or by slicing a fixed grid. Extraction always runs
//! on original-resolution sheets; scaled copies are derived afterwards.

pub mod animation;
pub mod autoscan;
pub mod config;
pub mod grid;
pub mod loader;

pub use animation::{ANIM_NAMES, Animations, Frame, FrameSizes, ResizeFilter, step_scale};
pub use autoscan::{ColumnRun, ForegroundMask, column_runs, extract_frames, select_runs};
pub use config::SheetConfig;
pub use grid::slice_grid;
pub use loader::{animations_from_image, load_sheet};
