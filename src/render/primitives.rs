use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::render::Color;

fn ensure_finite(values: &[f64], what: &str) -> BoardResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(BoardError::InvalidData(format!("{what} must be finite")))
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> BoardResult<()> {
        ensure_finite(&[self.x1, self.y1, self.x2, self.y2], "line coordinates")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(BoardError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Axis-aligned rectangle in pixel space. Used for fills, outlines and clips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn validate(self) -> BoardResult<()> {
        ensure_finite(
            &[self.x, self.y, self.width, self.height],
            "rectangle geometry",
        )?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(BoardError::InvalidData(
                "rectangle size must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Filled and/or outlined rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub fill_color: Option<Color>,
    pub border_width: f64,
    pub border_color: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(rect: Rect, fill_color: Color) -> Self {
        Self {
            rect,
            fill_color: Some(fill_color),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        }
    }

    #[must_use]
    pub const fn outlined(rect: Rect, border_width: f64, border_color: Color) -> Self {
        Self {
            rect,
            fill_color: None,
            border_width,
            border_color,
        }
    }

    pub fn validate(self) -> BoardResult<()> {
        self.rect.validate()?;
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(BoardError::InvalidData(
                "rectangle border width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill_color {
            fill.validate()?;
        }
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    /// `y` is the alphabetic baseline.
    Baseline,
    /// `y` is the vertical middle of the line box.
    Middle,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub font_family: String,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        font_family: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            font_family: font_family.into(),
            color,
            h_align: TextHAlign::Left,
            v_align: TextVAlign::Baseline,
        }
    }

    #[must_use]
    pub fn aligned(mut self, h_align: TextHAlign, v_align: TextVAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.text.is_empty() {
            return Err(BoardError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        ensure_finite(&[self.x, self.y], "text coordinates")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(BoardError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Filled disc, the shape of one action marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub fill_color: Color,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(center_x: f64, center_y: f64, radius: f64, fill_color: Color) -> Self {
        Self {
            center_x,
            center_y,
            radius,
            fill_color,
        }
    }

    pub fn validate(self) -> BoardResult<()> {
        ensure_finite(
            &[self.center_x, self.center_y, self.radius],
            "circle geometry",
        )?;
        if self.radius <= 0.0 {
            return Err(BoardError::InvalidData(
                "circle radius must be > 0".to_owned(),
            ));
        }
        self.fill_color.validate()
    }
}

/// Drop-shadow state applied to subsequent fills until replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub color: Color,
    pub blur_px: f64,
    pub offset_x_px: f64,
    pub offset_y_px: f64,
}

impl ShadowStyle {
    /// Fully transparent shadow; the neutral surface state.
    pub const NONE: Self = Self {
        color: Color::TRANSPARENT,
        blur_px: 0.0,
        offset_x_px: 0.0,
        offset_y_px: 0.0,
    };

    #[must_use]
    pub fn is_none(self) -> bool {
        self.color.is_transparent()
    }

    pub fn validate(self) -> BoardResult<()> {
        ensure_finite(
            &[self.blur_px, self.offset_x_px, self.offset_y_px],
            "shadow parameters",
        )?;
        if self.blur_px < 0.0 {
            return Err(BoardError::InvalidData(
                "shadow blur must be >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
