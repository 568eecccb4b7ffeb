//! Axis-aligned pixel rectangles and overlap tests
//!
//! Integer geometry with screen-style coordinates (y grows downward). Size
//! halving uses integer division so anchoring matches pixel placement.

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size whose bottom-center sits at (cx, bottom)
    pub fn from_midbottom(cx: i32, bottom: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, bottom - h, w, h)
    }

    /// Rect of the given size centered on (cx, cy)
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn midbottom(&self) -> (i32, i32) {
        (self.centerx(), self.bottom())
    }

    pub fn set_midbottom(&mut self, cx: i32, bottom: i32) {
        self.x = cx - self.w / 2;
        self.y = bottom - self.h;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    pub fn set_size(&mut self, w: i32, h: i32) {
        self.w = w;
        self.h = h;
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap; touching edges and empty rects never collide
    pub fn collides(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
