//! Axis-aligned rectangle geometry for hit-boxes
//!
//! Screen convention: `pos` is the top-left corner and y grows downward, so
//! `bottom() > top()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (never negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink by `padding` on all four sides (collapses to zero size, never inverts)
    pub fn inset(&self, padding: f32) -> Self {
        let shrink = Vec2::splat(padding * 2.0).min(self.size);
        Self {
            pos: self.pos + shrink * 0.5,
            size: self.size - shrink,
        }
    }

    /// Grow the top edge upward by `amount`, keeping the bottom fixed
    pub fn extend_up(&self, amount: f32) -> Self {
        Self::new(self.pos.x, self.pos.y - amount, self.size.x, self.size.y + amount)
    }

    /// Strict overlap test: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Shift by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}
