mod action_marker_painter;
mod axis_label_painter;
mod color;
mod grid_painter;
mod primitives;
mod recording_surface;

pub use action_marker_painter::{marker_offsets, plot_actions, plot_actions_by_date};
pub use axis_label_painter::{
    MonthSpan, XAxisTypography, label_axis_x, label_axis_y, month_spans,
};
pub use color::Color;
pub use grid_painter::draw_grid;
pub use primitives::{
    CirclePrimitive, LinePrimitive, Rect, RectPrimitive, ShadowStyle, TextHAlign, TextPrimitive,
    TextVAlign,
};
pub use recording_surface::{PaintCommand, RecordingSurface};

pub(crate) use action_marker_painter::plot_cell_actions;
pub(crate) use grid_painter::draw_grid_cell;

use crate::core::Viewport;
use crate::error::BoardResult;

/// Contract implemented by any 2D drawing backend.
///
/// The surface carries ambient state (transform, clip, shadow) that is pushed
/// by `save` and popped by `restore`. Shape commands carry their own colors
/// and stroke widths, so painters never depend on fill or stroke state left
/// behind by an earlier call. Restoring with an empty state stack is a no-op.
pub trait DrawingSurface {
    /// Current pixel size of the surface.
    fn size(&self) -> Viewport;

    fn save(&mut self) -> BoardResult<()>;

    fn restore(&mut self) -> BoardResult<()>;

    /// Replaces the current transform with the identity.
    fn reset_transform(&mut self) -> BoardResult<()>;

    fn translate(&mut self, dx: f64, dy: f64) -> BoardResult<()>;

    /// Intersects the current clip with `rect` (in current user space).
    fn clip_rect(&mut self, rect: Rect) -> BoardResult<()>;

    /// Resets every pixel inside `rect` to fully transparent.
    fn clear_rect(&mut self, rect: Rect) -> BoardResult<()>;

    fn set_shadow(&mut self, shadow: ShadowStyle) -> BoardResult<()>;

    fn draw_rect(&mut self, rect: &RectPrimitive) -> BoardResult<()>;

    fn draw_line(&mut self, line: &LinePrimitive) -> BoardResult<()>;

    fn draw_text(&mut self, text: &TextPrimitive) -> BoardResult<()>;

    fn draw_circle(&mut self, circle: &CirclePrimitive) -> BoardResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSurface};
