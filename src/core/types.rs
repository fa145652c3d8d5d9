use serde::{Deserialize, Serialize};

use crate::render::Rect;

/// Pixel size of a drawing surface (or of a virtual, oversized one).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Surface-sized rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Box described both by its corners and by its size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub origin: PixelPoint,
    pub terminus: PixelPoint,
    pub width: f64,
    pub height: f64,
}

impl PixelBox {
    #[must_use]
    pub fn new(origin: PixelPoint, width: f64, height: f64) -> Self {
        Self {
            origin,
            terminus: PixelPoint::new(origin.x + width, origin.y + height),
            width,
            height,
        }
    }

    #[must_use]
    pub fn rect(self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height)
    }
}

/// Offset of the first visible column (`x`) and row (`y`) into a `ValueRange`.
///
/// Negative values are accepted and treated as zero by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WindowIndex {
    pub x: i64,
    pub y: i64,
}

impl WindowIndex {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}
