//! Spritesheet autoscanning
//!
//! Splits a packed row of poses drawn on a near-black background into
//! frames. Every column that holds at least one bright pixel belongs to a
//! pose; maximal runs of such columns become frames, cropped vertically to
//! their foreground and padded.
//!
//! The luma formula and threshold must stay exactly as they are: hitboxes
//! downstream are derived from frame pixel dimensions.

use image::{Rgba, RgbaImage, imageops};

use super::animation::Frame;

/// A pixel is foreground when its luma is strictly above this
pub const LUMA_THRESHOLD: f64 = 8.0;
/// Runs this wide or narrower are treated as noise
pub const MAX_NOISE_WIDTH: u32 = 10;
/// Padding added on every side of a frame's bounding box
pub const FRAME_PADDING: u32 = 4;

/// BT.709 luma, alpha ignored
#[inline]
pub fn luma(px: &Rgba<u8>) -> f64 {
    let [r, g, b, _] = px.0;
    0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)
}

#[inline]
pub fn is_foreground(px: &Rgba<u8>) -> bool {
    luma(px) > LUMA_THRESHOLD
}

/// Row-major foreground flags for an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl ForegroundMask {
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let bits = image.pixels().map(is_foreground).collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Whether any pixel in column `x` is foreground
    pub fn column_has_foreground(&self, x: u32) -> bool {
        (0..self.height).any(|y| self.get(x, y))
    }

    /// Foreground row range `[top, bottom)` within columns `[x0, x1)`
    pub fn row_span(&self, x0: u32, x1: u32) -> Option<(u32, u32)> {
        let x1 = x1.min(self.width);
        let row_hit = |y: u32| (x0..x1).any(|x| self.get(x, y));
        let top = (0..self.height).find(|&y| row_hit(y))?;
        let bottom = (top..self.height).rev().find(|&y| row_hit(y))?;
        Some((top, bottom + 1))
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Half-open span of non-empty columns `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRun {
    pub start: u32,
    pub end: u32,
}

impl ColumnRun {
    #[inline]
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// Maximal runs of non-empty columns, left to right
pub fn column_runs(mask: &ForegroundMask) -> Vec<ColumnRun> {
    let mut runs = Vec::new();
    let mut run_start = None;

    for x in 0..mask.width() {
        match (mask.column_has_foreground(x), run_start) {
            (true, None) => run_start = Some(x),
            (false, Some(start)) => {
                runs.push(ColumnRun { start, end: x });
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        runs.push(ColumnRun {
            start,
            end: mask.width(),
        });
    }

    runs
}

/// Drop noise runs, then keep the `expected` widest (0 keeps all)
///
/// Equal widths keep sheet order. The result is always in ascending x.
pub fn select_runs(runs: Vec<ColumnRun>, expected: usize) -> Vec<ColumnRun> {
    let mut kept: Vec<ColumnRun> = runs
        .into_iter()
        .filter(|run| run.width() > MAX_NOISE_WIDTH)
        .collect();

    if expected > 0 && kept.len() > expected {
        // sort_by is stable
        kept.sort_by(|a, b| b.width().cmp(&a.width()));
        kept.truncate(expected);
        kept.sort_by_key(|run| run.start);
    }

    kept
}

/// Copy of `image` with alpha forced to 255 on foreground and 0 elsewhere
fn mask_alpha(mut image: RgbaImage, mask: &ForegroundMask) -> RgbaImage {
    for (px, &fg) in image.pixels_mut().zip(mask.bits.iter()) {
        px.0[3] = if fg { 255 } else { 0 };
    }
    image
}

/// Extract frames from a packed single-row spritesheet
///
/// `expected_count` of 0 accepts whatever is found; otherwise the widest
/// runs win and a count mismatch is logged. `crop_bottom_px` strips a
/// caption strip before analysis and is ignored when it covers the whole
/// sheet. Never fails: degenerate input yields an empty list.
pub fn extract_frames(image: &RgbaImage, expected_count: usize, crop_bottom_px: u32) -> Vec<Frame> {
    let (width, full_height) = image.dimensions();
    let height = if crop_bottom_px > 0 && crop_bottom_px < full_height {
        full_height - crop_bottom_px
    } else {
        full_height
    };

    if width == 0 || height == 0 {
        return Vec::new();
    }

    let cropped = imageops::crop_imm(image, 0, 0, width, height).to_image();
    let mask = ForegroundMask::from_image(&cropped);
    let cleaned = mask_alpha(cropped, &mask);
    let runs = select_runs(column_runs(&mask), expected_count);

    let mut frames = Vec::with_capacity(runs.len());
    for run in runs {
        let Some((top, bottom)) = mask.row_span(run.start, run.end) else {
            continue;
        };

        let x0 = run.start.saturating_sub(FRAME_PADDING);
        let x1 = (run.end + FRAME_PADDING).min(width);
        let y0 = top.saturating_sub(FRAME_PADDING);
        let y1 = (bottom + FRAME_PADDING).min(height);

        let pixels = imageops::crop_imm(&cleaned, x0, y0, x1 - x0, y1 - y0).to_image();
        frames.push(Frame::new(pixels, (x0, y0)));
    }

    if expected_count > 0 && frames.len() != expected_count {
        log::warn!(
            "Autoscan expected ~{} frames, got {}",
            expected_count,
            frames.len()
        );
    }
    log::debug!(
        "Autoscanned {}x{} sheet into {} frames",
        width,
        height,
        frames.len()
    );

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    /// Black sheet with white blocks given as (x0, x1, y0, y1)
    fn sheet(width: u32, height: u32, blocks: &[(u32, u32, u32, u32)]) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, BLACK);
        for &(x0, x1, y0, y1) in blocks {
            for y in y0..y1 {
                for x in x0..x1 {
                    img.put_pixel(x, y, WHITE);
                }
            }
        }
        img
    }

    fn two_block_sheet() -> RgbaImage {
        sheet(400, 100, &[(20, 70, 20, 80), (300, 350, 20, 80)])
    }

    #[test]
    fn test_two_blocks_expected_two() {
        let frames = extract_frames(&two_block_sheet(), 2, 0);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].origin(), (16, 16));
        assert_eq!(frames[1].origin(), (296, 16));
        assert_eq!(frames[0].size(), (58, 68));
        assert_eq!(frames[1].size(), (58, 68));
    }

    #[test]
    fn test_expected_more_than_found() {
        let frames = extract_frames(&two_block_sheet(), 5, 0);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].origin().0 < frames[1].origin().0);
    }

    #[test]
    fn test_empty_and_dark_images() {
        assert!(extract_frames(&RgbaImage::new(0, 0), 0, 0).is_empty());
        assert!(extract_frames(&RgbaImage::new(0, 10), 3, 0).is_empty());
        assert!(extract_frames(&sheet(120, 40, &[]), 0, 0).is_empty());
        assert!(extract_frames(&sheet(120, 40, &[]), 4, 0).is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        // Pure green: 11 * 0.7152 < 8 < 12 * 0.7152
        assert!(!is_foreground(&Rgba([0, 11, 0, 255])));
        assert!(is_foreground(&Rgba([0, 12, 0, 255])));
        // Alpha plays no part
        assert!(is_foreground(&Rgba([255, 255, 255, 0])));
    }

    #[test]
    fn test_noise_runs_dropped() {
        let img = sheet(100, 20, &[(5, 15, 2, 10), (30, 41, 2, 10)]);
        let frames = extract_frames(&img, 0, 0);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].origin().0, 26);
    }

    #[test]
    fn test_truncation_keeps_widest_in_sheet_order() {
        let runs = vec![
            ColumnRun { start: 0, end: 20 },
            ColumnRun { start: 30, end: 60 },
            ColumnRun { start: 70, end: 90 },
            ColumnRun { start: 100, end: 112 },
        ];
        let kept = select_runs(runs.clone(), 2);
        // Width tie between the 20px runs goes to the earlier one
        assert_eq!(kept, vec![runs[0], runs[1]]);

        let kept = select_runs(runs.clone(), 3);
        assert_eq!(kept, vec![runs[0], runs[1], runs[2]]);

        assert_eq!(select_runs(runs.clone(), 0), runs);
    }

    #[test]
    fn test_column_runs_touching_edges() {
        let img = sheet(50, 10, &[(0, 12, 0, 10), (38, 50, 3, 4)]);
        let runs = column_runs(&ForegroundMask::from_image(&img));
        assert_eq!(
            runs,
            vec![ColumnRun { start: 0, end: 12 }, ColumnRun { start: 38, end: 50 }]
        );

        // Padding is clamped to the sheet
        let frames = extract_frames(&img, 0, 0);
        assert_eq!(frames[0].origin(), (0, 0));
        assert_eq!(frames[0].size(), (16, 10));
        assert_eq!(frames[1].origin(), (34, 0));
        assert_eq!(frames[1].size(), (16, 8));
    }

    #[test]
    fn test_alpha_is_replaced_by_mask() {
        let mut img = sheet(40, 20, &[(10, 30, 5, 15)]);
        // Transparent but bright: becomes opaque
        img.put_pixel(15, 10, Rgba([255, 255, 255, 0]));
        // Opaque but dim: becomes transparent
        img.put_pixel(11, 5, Rgba([5, 5, 5, 255]));

        let frames = extract_frames(&img, 1, 0);
        let frame = &frames[0];
        let (ox, oy) = frame.origin();
        assert_eq!(frame.pixels().get_pixel(15 - ox, 10 - oy).0[3], 255);
        assert_eq!(frame.pixels().get_pixel(11 - ox, 5 - oy).0[3], 0);
        // Padding is background
        assert_eq!(frame.pixels().get_pixel(0, 0).0[3], 0);
        // Colors pass through
        assert_eq!(frame.pixels().get_pixel(11 - ox, 5 - oy).0[..3], [5, 5, 5]);
    }

    #[test]
    fn test_bottom_crop_excludes_caption() {
        // A pose plus a caption strip spanning the whole sheet width
        let img = sheet(200, 100, &[(20, 60, 10, 50), (0, 200, 80, 100)]);

        let uncropped = extract_frames(&img, 0, 0);
        assert_eq!(uncropped.len(), 1);
        assert_eq!(uncropped[0].width(), 200);

        let frames = extract_frames(&img, 0, 20);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].origin(), (16, 6));
        assert_eq!(frames[0].size(), (48, 48));
    }

    #[test]
    fn test_crop_larger_than_sheet_is_ignored() {
        let img = sheet(60, 30, &[(10, 40, 20, 30)]);
        let frames = extract_frames(&img, 0, 30);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].origin(), (6, 16));
        assert_eq!(frames[0].size(), (38, 14));
        assert_eq!(extract_frames(&img, 0, 500), frames);
    }

    #[test]
    fn test_row_span_uses_only_run_columns() {
        let img = sheet(100, 50, &[(10, 30, 5, 10), (50, 70, 30, 45)]);
        let mask = ForegroundMask::from_image(&img);
        assert_eq!(mask.row_span(10, 30), Some((5, 10)));
        assert_eq!(mask.row_span(50, 70), Some((30, 45)));
        assert_eq!(mask.row_span(30, 50), None);
        assert_eq!(mask.count(), 20 * 5 + 20 * 15);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        const HEIGHT: u32 = 24;

        /// (gap before, width, top, height) per block
        fn layout() -> impl Strategy<Value = Vec<(u32, u32, u32, u32)>> {
            prop::collection::vec((1u32..8, 11u32..30, 0u32..12, 1u32..12), 1..6)
        }

        /// Build a sheet; returns it with the column span of each block
        fn build(layout: &[(u32, u32, u32, u32)]) -> (RgbaImage, Vec<(u32, u32, u32, u32)>) {
            let mut blocks = Vec::new();
            let mut x = 0;
            for &(gap, w, top, h) in layout {
                x += gap;
                blocks.push((x, x + w, top, top + h));
                x += w;
            }
            let width = x + 3;
            (sheet(width, HEIGHT, &blocks), blocks)
        }

        proptest! {
            #[test]
            fn prop_dark_images_yield_nothing(
                w in 0u32..40,
                h in 0u32..20,
                seed in prop::collection::vec((0u8..8, 0u8..8, 0u8..8, any::<u8>()), 1..16),
                expected in 0usize..4,
            ) {
                let mut img = RgbaImage::new(w, h);
                for (i, px) in img.pixels_mut().enumerate() {
                    let (r, g, b, a) = seed[i % seed.len()];
                    *px = Rgba([r, g, b, a]);
                }
                prop_assert!(extract_frames(&img, expected, 0).is_empty());
            }

            #[test]
            fn prop_one_frame_per_run_in_order(layout in layout()) {
                let (img, blocks) = build(&layout);
                let frames = extract_frames(&img, 0, 0);
                prop_assert_eq!(frames.len(), blocks.len());
                for (frame, &(x0, x1, y0, y1)) in frames.iter().zip(&blocks) {
                    let px0 = x0.saturating_sub(FRAME_PADDING);
                    let py0 = y0.saturating_sub(FRAME_PADDING);
                    prop_assert_eq!(frame.origin(), (px0, py0));
                    // bbox plus at most 8, clamped to the sheet
                    prop_assert_eq!(frame.width(), (x1 + FRAME_PADDING).min(img.width()) - px0);
                    prop_assert_eq!(frame.height(), (y1 + FRAME_PADDING).min(HEIGHT) - py0);
                    prop_assert!(frame.width() <= x1 - x0 + 2 * FRAME_PADDING);
                    prop_assert!(frame.height() <= y1 - y0 + 2 * FRAME_PADDING);
                }
                prop_assert!(frames.windows(2).all(|w| w[0].origin().0 < w[1].origin().0));
            }

            #[test]
            fn prop_truncation_keeps_widest(layout in layout(), expected in 1usize..6) {
                let (img, blocks) = build(&layout);
                let frames = extract_frames(&img, expected, 0);
                prop_assert_eq!(frames.len(), expected.min(blocks.len()));

                let kept: Vec<usize> = frames
                    .iter()
                    .map(|f| {
                        blocks
                            .iter()
                            .position(|b| b.0.saturating_sub(FRAME_PADDING) == f.origin().0)
                            .unwrap()
                    })
                    .collect();
                prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));

                let width = |i: usize| blocks[i].1 - blocks[i].0;
                for dropped in (0..blocks.len()).filter(|i| !kept.contains(i)) {
                    for &k in &kept {
                        prop_assert!(width(k) >= width(dropped));
                    }
                }
            }

            #[test]
            fn prop_extraction_is_idempotent(layout in layout(), expected in 0usize..6, crop in 0u32..30) {
                let (img, _) = build(&layout);
                prop_assert_eq!(extract_frames(&img, expected, crop), extract_frames(&img, expected, crop));
            }

            #[test]
            fn prop_cropped_rows_never_appear(layout in layout(), crop in 1u32..HEIGHT) {
                let (img, _) = build(&layout);
                for frame in extract_frames(&img, 0, crop) {
                    prop_assert!(frame.origin().1 + frame.height() <= HEIGHT - crop);
                }
            }
        }
    }
}
