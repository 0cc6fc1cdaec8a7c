//! Axis-aligned rectangle primitive.
//!
//! [`Rect`] is the authoritative collision box of every entity. Coordinates
//! are integer pixels with `y` growing downward, so `top < bottom`.
//!
//! # Overlap Semantics
//!
//! Overlap is strict: two boxes that merely share an edge do not overlap, and
//! a box with zero width or height never overlaps anything. Landing on a
//! platform therefore leaves `bottom == platform.top` without the two being
//! "in collision", which is what makes the one-pixel probes in
//! [`crate::physics`] meaningful.
//!
//! # Example
//!
//! ```
//! use skyhop_core::geometry::Rect;
//!
//! let floor = Rect::new(0, 64, 128, 64);
//! let hero = Rect::new(10, 0, 64, 64);
//!
//! assert!(!hero.overlaps(&floor)); // touching, not overlapping
//! assert!(hero.translated(0, 1).overlaps(&floor));
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle of the given size centered on `center`.
    ///
    /// Odd sizes round the top-left corner down, so the center is stable
    /// under [`Rect::center`].
    #[must_use]
    pub const fn centered_on(center: IVec2, w: i32, h: i32) -> Self {
        Self::new(center.x - w / 2, center.y - h / 2, w, h)
    }

    /// Left edge (`x`).
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (`x + w`), exclusive.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Top edge (`y`).
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (`y + h`), exclusive.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Horizontal center.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Vertical center.
    #[must_use]
    pub const fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Center point.
    #[must_use]
    pub const fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    /// Top-left corner.
    #[must_use]
    pub const fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Moves the box so its left edge is at `left`.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Moves the box so its right edge is at `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Moves the box so its top edge is at `top`.
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Moves the box so its bottom edge is at `bottom`.
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Moves the box so its center is at `center`.
    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.w / 2;
        self.y = center.y - self.h / 2;
    }

    /// Returns true if the box has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap test.
    ///
    /// Shared edges do not count, and empty boxes never overlap.
    #[must_use]
    pub const fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns a copy shifted by `(dx, dy)`.
    #[must_use]
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Returns a copy widened by `left` pixels on the left and `right` on the right.
    #[must_use]
    pub const fn widened(&self, left: i32, right: i32) -> Self {
        Self::new(self.x - left, self.y, self.w + left + right, self.h)
    }
}
