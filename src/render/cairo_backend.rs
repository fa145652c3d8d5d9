use std::f64::consts::TAU;
use std::io::Write;

use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{BoardError, BoardResult};
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, Rect, RectPrimitive, ShadowStyle,
    TextHAlign, TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub circles_drawn: usize,
}

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Works either offscreen on an owned image surface (`CairoSurface::offscreen`)
/// or in place on an external context such as a GTK `DrawingArea` callback
/// (`CairoSurface::for_context`).
///
/// Cairo has no shadow state, so marker shadows are approximated by an
/// unblurred disc in the shadow color painted at the shadow offset.
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    size: Viewport,
    shadow: ShadowStyle,
    saved_shadows: Vec<ShadowStyle>,
    stats: CairoRenderStats,
}

impl CairoSurface {
    pub fn offscreen(width: i32, height: i32) -> BoardResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(BoardError::InvalidViewport {
                width: f64::from(width),
                height: f64::from(height),
            });
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            image: Some(image),
            size: Viewport::new(f64::from(width), f64::from(height)),
            shadow: ShadowStyle::NONE,
            saved_shadows: Vec::new(),
            stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn for_context(context: Context, size: Viewport) -> Self {
        Self {
            context,
            image: None,
            size,
            shadow: ShadowStyle::NONE,
            saved_shadows: Vec::new(),
            stats: CairoRenderStats::default(),
        }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Owned image surface, for offscreen surfaces only.
    #[must_use]
    pub fn image(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CairoRenderStats::default();
    }

    /// Encodes the offscreen image as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> BoardResult<()> {
        let image = self.image.as_ref().ok_or_else(|| {
            BoardError::Backend("surface is bound to an external context".to_owned())
        })?;
        image
            .write_to_png(writer)
            .map_err(|err| BoardError::Backend(format!("failed to encode png: {err}")))
    }

    fn fill_disc(&self, x: f64, y: f64, radius: f64, color: Color) -> BoardResult<()> {
        self.context.new_path();
        self.context.arc(x, y, radius, 0.0, TAU);
        apply_color(&self.context, color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))
    }
}

impl DrawingSurface for CairoSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn save(&mut self) -> BoardResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        self.saved_shadows.push(self.shadow);
        Ok(())
    }

    fn restore(&mut self) -> BoardResult<()> {
        let Some(shadow) = self.saved_shadows.pop() else {
            return Ok(());
        };
        self.shadow = shadow;
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))
    }

    fn reset_transform(&mut self) -> BoardResult<()> {
        self.context.identity_matrix();
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) -> BoardResult<()> {
        self.context.translate(dx, dy);
        Ok(())
    }

    fn clip_rect(&mut self, rect: Rect) -> BoardResult<()> {
        rect.validate()?;
        self.context.new_path();
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.context.clip();
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) -> BoardResult<()> {
        rect.validate()?;
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        self.context.set_operator(Operator::Clear);
        self.context.new_path();
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        let filled = self
            .context
            .fill()
            .map_err(|err| map_backend_error("failed to clear rectangle", err));
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        filled
    }

    fn set_shadow(&mut self, shadow: ShadowStyle) -> BoardResult<()> {
        shadow.validate()?;
        self.shadow = shadow;
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> BoardResult<()> {
        rect.validate()?;
        let bounds = rect.rect;
        self.context.new_path();
        self.context
            .rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
        let stroke_border = rect.border_width > 0.0 && !rect.border_color.is_transparent();

        if let Some(fill) = rect.fill_color {
            apply_color(&self.context, fill);
            let filled = if stroke_border {
                self.context.fill_preserve()
            } else {
                self.context.fill()
            };
            filled.map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        }
        if stroke_border {
            apply_color(&self.context, rect.border_color);
            self.context.set_line_width(rect.border_width);
            self.context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
        }
        self.context.new_path();
        self.stats.rects_drawn += 1;
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> BoardResult<()> {
        line.validate()?;
        apply_color(&self.context, line.color);
        self.context.set_line_width(line.stroke_width);
        self.context.new_path();
        self.context.move_to(line.x1, line.y1);
        self.context.line_to(line.x2, line.y2);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> BoardResult<()> {
        text.validate()?;
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font_description = FontDescription::from_string(&text.font_family);
        font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        let y = match text.v_align {
            TextVAlign::Baseline => text.y - f64::from(layout.baseline()) / f64::from(pango::SCALE),
            TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
        };

        apply_color(&self.context, text.color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        self.stats.texts_drawn += 1;
        Ok(())
    }

    fn draw_circle(&mut self, circle: &CirclePrimitive) -> BoardResult<()> {
        circle.validate()?;
        if !self.shadow.is_none() {
            self.fill_disc(
                circle.center_x + self.shadow.offset_x_px,
                circle.center_y + self.shadow.offset_y_px,
                circle.radius,
                self.shadow.color,
            )?;
        }
        self.fill_disc(
            circle.center_x,
            circle.center_y,
            circle.radius,
            circle.fill_color,
        )?;
        self.stats.circles_drawn += 1;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> BoardError {
    BoardError::Backend(format!("{prefix}: {err}"))
}
