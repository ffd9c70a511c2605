//! World-space geometry for entities and collision queries.
//!
//! Boxes are top-left anchored: `(x, y)` is the upper-left corner and the
//! extent grows rightward/downward, matching tile-space where row indices
//! increase toward the ground. Overlap tests use strict inequalities, so
//! boxes that merely share an edge do not collide.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle describing an entity's collision extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl AxisBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap test: touching edges do not count.
    pub fn overlaps(&self, other: &AxisBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// The shared sub-rectangle, or `None` when the boxes do not overlap.
    pub fn intersection(&self, other: &AxisBox) -> Option<AxisBox> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(AxisBox::new(x, y, right - x, bottom - y))
    }

    /// Shrink inward by `inset` on the left and right sides. Width never
    /// goes negative; an over-large inset collapses the box to a vertical
    /// line at its center.
    pub fn shrunk_x(&self, inset: f32) -> AxisBox {
        let width = (self.width - 2.0 * inset).max(0.0);
        let x = self.x + (self.width - width) * 0.5;
        AxisBox::new(x, self.y, width, self.height)
    }

    pub fn translated(&self, delta: Vec2) -> AxisBox {
        AxisBox::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}
