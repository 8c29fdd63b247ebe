//! Board-local ⇄ external coordinate conversion.
//!
//! The presenter places the board somewhere in its parent container, possibly
//! scaled. Drops arrive in parent coordinates and are mapped back here.

use crate::types::Point;

/// Uniform scale followed by a translation: `external = local * scale + origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardTransform {
    pub origin: Point,
    pub scale: f64,
}

impl Default for BoardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl BoardTransform {
    pub const IDENTITY: Self = Self {
        origin: Point::new(0.0, 0.0),
        scale: 1.0,
    };

    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Translation only
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            scale: 1.0,
        }
    }

    /// Map a parent-space point into board-local space.
    ///
    /// A degenerate scale (zero or non-finite) is treated as 1.
    pub fn to_local(&self, p: Point) -> Point {
        let s = self.effective_scale();
        Point::new((p.x - self.origin.x) / s, (p.y - self.origin.y) / s)
    }

    /// Map a board-local point into parent space
    pub fn to_external(&self, p: Point) -> Point {
        let s = self.effective_scale();
        Point::new(p.x * s + self.origin.x, p.y * s + self.origin.y)
    }

    fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale != 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}
