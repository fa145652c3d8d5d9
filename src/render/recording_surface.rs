use crate::core::Viewport;
use crate::error::{BoardError, BoardResult};
use crate::render::{
    CirclePrimitive, DrawingSurface, LinePrimitive, Rect, RectPrimitive, ShadowStyle,
    TextPrimitive,
};

/// One call received by a [`RecordingSurface`], in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Save,
    Restore,
    ResetTransform,
    Translate { dx: f64, dy: f64 },
    Clip(Rect),
    Clear(Rect),
    Shadow(ShadowStyle),
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
    Circle(CirclePrimitive),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SurfaceState {
    translate_x: f64,
    translate_y: f64,
    clip: Option<Rect>,
    shadow: ShadowStyle,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            clip: None,
            shadow: ShadowStyle::NONE,
        }
    }
}

/// Headless surface that validates and records every paint command.
///
/// Used by tests and by hosts that want to replay a frame onto another
/// backend. It tracks the save/restore stack so callers can assert that
/// painters leave the ambient state balanced.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Viewport,
    commands: Vec<PaintCommand>,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Viewport::new(width, height),
            commands: Vec::new(),
            state: SurfaceState::default(),
            stack: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Viewport::new(width, height);
    }

    #[must_use]
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Drops recorded commands but keeps the current ambient state.
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn translation(&self) -> (f64, f64) {
        (self.state.translate_x, self.state.translate_y)
    }

    #[must_use]
    pub fn clip(&self) -> Option<Rect> {
        self.state.clip
    }

    #[must_use]
    pub fn shadow(&self) -> ShadowStyle {
        self.state.shadow
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            PaintCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    fn to_device(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x + self.state.translate_x,
            rect.y + self.state.translate_y,
            rect.width,
            rect.height,
        )
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Viewport {
        self.size
    }

    fn save(&mut self) -> BoardResult<()> {
        self.stack.push(self.state);
        self.commands.push(PaintCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> BoardResult<()> {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        self.commands.push(PaintCommand::Restore);
        Ok(())
    }

    fn reset_transform(&mut self) -> BoardResult<()> {
        self.state.translate_x = 0.0;
        self.state.translate_y = 0.0;
        self.commands.push(PaintCommand::ResetTransform);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) -> BoardResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(BoardError::InvalidData(
                "translation must be finite".to_owned(),
            ));
        }
        self.state.translate_x += dx;
        self.state.translate_y += dy;
        self.commands.push(PaintCommand::Translate { dx, dy });
        Ok(())
    }

    fn clip_rect(&mut self, rect: Rect) -> BoardResult<()> {
        rect.validate()?;
        let device = self.to_device(rect);
        let clip = match self.state.clip {
            Some(current) => {
                let x = current.x.max(device.x);
                let y = current.y.max(device.y);
                let right = current.right().min(device.right());
                let bottom = current.bottom().min(device.bottom());
                Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
            }
            None => device,
        };
        self.state.clip = Some(clip);
        self.commands.push(PaintCommand::Clip(rect));
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) -> BoardResult<()> {
        rect.validate()?;
        self.commands.push(PaintCommand::Clear(rect));
        Ok(())
    }

    fn set_shadow(&mut self, shadow: ShadowStyle) -> BoardResult<()> {
        shadow.validate()?;
        self.state.shadow = shadow;
        self.commands.push(PaintCommand::Shadow(shadow));
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> BoardResult<()> {
        rect.validate()?;
        self.commands.push(PaintCommand::Rect(*rect));
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> BoardResult<()> {
        line.validate()?;
        self.commands.push(PaintCommand::Line(*line));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> BoardResult<()> {
        text.validate()?;
        self.commands.push(PaintCommand::Text(text.clone()));
        Ok(())
    }

    fn draw_circle(&mut self, circle: &CirclePrimitive) -> BoardResult<()> {
        circle.validate()?;
        self.commands.push(PaintCommand::Circle(*circle));
        Ok(())
    }
}
