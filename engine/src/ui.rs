//! Pixel rectangles for hit regions and overlay layout.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// A `w` x `h` child resting on this rect's bottom edge, centred horizontally.
    ///
    /// The child is clamped to fit.
    pub fn bottom_center(&self, w: u32, h: u32) -> Self {
        let w = w.min(self.w);
        let h = h.min(self.h);
        Self {
            x: self.x + (self.w - w) / 2,
            y: self.y + (self.h - h),
            w,
            h,
        }
    }
}
