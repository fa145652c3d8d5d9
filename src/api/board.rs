use chrono::NaiveDate;
use tracing::{trace, warn};

use crate::core::{
    Layout, Location, StyleOptions, TaskMatrix, ValueRange, WindowIndex, compute_layout,
};
use crate::error::{BoardError, BoardResult};
use crate::interaction::{CursorRepaint, HighlightCursor, InteractionMode};
use crate::render::DrawingSurface;

use super::board_renderer::draw_board;
use super::frame_scheduler::{FrameScheduler, TransitionHandle};
use super::transition_animator::{
    BoardTransition, DEFAULT_TRANSITION_DURATION_MS, TransitionOptions, TransitionStatus,
    animate_transition,
};
use super::validation::{validate_style, validate_value_range, validate_viewport};

/// Main facade consumed by host applications.
///
/// `Board` owns the drawing surface, the frame scheduler and the data, and
/// keeps the current window index, the last drawn layout, the highlight
/// cursor and at most one running transition.
pub struct Board<S: DrawingSurface, F: FrameScheduler> {
    surface: S,
    scheduler: F,
    range: ValueRange,
    records: TaskMatrix,
    style: StyleOptions,
    index: WindowIndex,
    layout: Option<Layout>,
    transition: Option<BoardTransition>,
    cursor: HighlightCursor,
}

impl<S: DrawingSurface, F: FrameScheduler> Board<S, F> {
    /// Creates a board with the default style. Nothing is drawn until
    /// [`Board::draw`].
    pub fn new(
        surface: S,
        scheduler: F,
        range: ValueRange,
        records: TaskMatrix,
    ) -> BoardResult<Self> {
        validate_viewport(surface.size())?;
        validate_value_range(&range)?;
        Ok(Self {
            surface,
            scheduler,
            range,
            records,
            style: StyleOptions::default(),
            index: WindowIndex::default(),
            layout: None,
            transition: None,
            cursor: HighlightCursor::new(),
        })
    }

    pub fn with_style(mut self, style: StyleOptions) -> BoardResult<Self> {
        self.set_style(style)?;
        Ok(self)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access, e.g. to resize it. Call [`Board::draw`]
    /// afterwards; the cached layout is not updated.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    #[must_use]
    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    #[must_use]
    pub fn records(&self) -> &TaskMatrix {
        &self.records
    }

    #[must_use]
    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    #[must_use]
    pub fn window_index(&self) -> WindowIndex {
        self.index
    }

    /// Layout of the last complete frame, if any.
    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn highlight(&self) -> HighlightCursor {
        self.cursor
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.is_transitioning() {
            InteractionMode::Transitioning
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (S, F) {
        (self.surface, self.scheduler)
    }

    /// Redraws the whole board at the current window index.
    pub fn draw(&mut self) -> BoardResult<&Layout> {
        self.ensure_idle()?;
        validate_viewport(self.surface.size())?;
        let layout = draw_board(
            &mut self.surface,
            &self.range,
            &self.records,
            self.index,
            &self.style,
        )?;
        self.cursor.reset();
        Ok(&*self.layout.insert(layout))
    }

    /// Jumps to `index` without animation and redraws.
    ///
    /// The index is clamped to the scrollable range; clamping never changes
    /// which values are shown.
    pub fn set_window_index(&mut self, index: WindowIndex) -> BoardResult<&Layout> {
        self.ensure_idle()?;
        self.index = self.clamp_index(index);
        self.draw()
    }

    /// Replaces the value range and records. The board is not redrawn.
    pub fn set_data(&mut self, range: ValueRange, records: TaskMatrix) -> BoardResult<()> {
        self.ensure_idle()?;
        validate_value_range(&range)?;
        self.range = range;
        self.records = records;
        self.index = self.clamp_index(self.index);
        self.invalidate();
        Ok(())
    }

    /// Replaces the style. The board is not redrawn.
    pub fn set_style(&mut self, style: StyleOptions) -> BoardResult<()> {
        self.ensure_idle()?;
        validate_style(&style.resolve())?;
        self.style = style;
        self.invalidate();
        Ok(())
    }

    /// Starts an animated move from the current index to `to`.
    pub fn start_transition(
        &mut self,
        to: WindowIndex,
        duration_ms: f64,
    ) -> BoardResult<TransitionHandle> {
        let options = TransitionOptions::new(self.index, to).with_duration_ms(duration_ms);
        self.start_transition_with(options)
    }

    /// Starts a transition with explicit `from`/`to` and hooks.
    ///
    /// Only one transition may run at a time; a second one is rejected with
    /// [`BoardError::TransitionInProgress`]. Both ends are clamped to the
    /// scrollable range.
    pub fn start_transition_with(
        &mut self,
        mut options: TransitionOptions,
    ) -> BoardResult<TransitionHandle> {
        if self.is_transitioning() {
            warn!(
                to_x = options.to.x,
                to_y = options.to.y,
                "rejected transition while another one is running"
            );
            return Err(BoardError::TransitionInProgress);
        }
        validate_viewport(self.surface.size())?;
        options.from = self.clamp_index(options.from);
        options.to = self.clamp_index(options.to);

        let from = options.from;
        let transition = animate_transition(
            &mut self.surface,
            &self.range,
            options,
            &self.style,
            &mut self.scheduler,
        )?;
        let handle = transition.handle();
        self.index = from;
        self.transition = Some(transition);
        Ok(handle)
    }

    /// Animates a move by whole cells, clamped to the scrollable range.
    pub fn pan_by(&mut self, columns: i64, rows: i64) -> BoardResult<TransitionHandle> {
        let to = self.clamp_index(self.index.offset(columns, rows));
        self.start_transition(to, DEFAULT_TRANSITION_DURATION_MS)
    }

    /// Forwards a display frame to the running transition.
    ///
    /// Returns `None` when no transition is running. When the transition
    /// finishes the window index becomes its `to`; when it is cancelled the
    /// index stays at `from` and the board is redrawn there. A frame that
    /// fails aborts the transition the same way before the error is returned.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> BoardResult<Option<TransitionStatus>> {
        let Some(transition) = self.transition.as_mut() else {
            return Ok(None);
        };
        let result = transition.on_frame(
            &mut self.surface,
            &self.range,
            &self.records,
            &mut self.scheduler,
            timestamp_ms,
        );

        let status = match result {
            Ok(status) => status,
            Err(err) => {
                self.transition = None;
                if let Err(redraw_err) = self.draw() {
                    warn!(error = %redraw_err, "redraw after a failed frame also failed");
                }
                return Err(err);
            }
        };
        match status {
            TransitionStatus::Running => {}
            TransitionStatus::Finished => {
                if let Some(mut transition) = self.transition.take() {
                    self.index = transition.to();
                    self.layout = transition.take_final_layout();
                }
                self.cursor.reset();
            }
            TransitionStatus::Cancelled => {
                self.transition = None;
                self.draw()?;
            }
        }
        Ok(Some(status))
    }

    /// Stops the running transition and redraws at its `from` index.
    /// Returns `false` when nothing was running.
    pub fn cancel_transition(&mut self) -> BoardResult<bool> {
        let Some(mut transition) = self.transition.take() else {
            return Ok(false);
        };
        transition.cancel(&mut self.scheduler);
        self.draw()?;
        Ok(true)
    }

    /// Moves the highlight to the cell under the pointer. Ignored while a
    /// transition runs.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> BoardResult<CursorRepaint> {
        if self.is_transitioning() {
            trace!(x, y, "pointer ignored during transition");
            return Ok(CursorRepaint::default());
        }
        if self.layout.is_none() {
            self.draw()?;
        }
        let Some(layout) = self.layout.as_ref() else {
            return Ok(CursorRepaint::default());
        };
        self.cursor
            .submit_position(&mut self.surface, layout, &self.records, x, y)
    }

    /// Removes the highlight.
    pub fn pointer_leave(&mut self) -> BoardResult<CursorRepaint> {
        let (false, Some(layout)) = (self.is_transitioning(), self.layout.as_ref()) else {
            return Ok(CursorRepaint::default());
        };
        self.cursor.clear(&mut self.surface, layout, &self.records)
    }

    /// Date and location under a pixel position of the last drawn frame.
    #[must_use]
    pub fn value_at(&self, x: f64, y: f64) -> Option<(NaiveDate, &Location)> {
        self.layout.as_ref()?.value_at(x, y)
    }

    fn ensure_idle(&self) -> BoardResult<()> {
        if self.is_transitioning() {
            Err(BoardError::TransitionInProgress)
        } else {
            Ok(())
        }
    }

    fn invalidate(&mut self) {
        self.layout = None;
        self.cursor.reset();
    }

    /// Clamps each axis to `0..=total - visible`.
    fn clamp_index(&self, index: WindowIndex) -> WindowIndex {
        let layout = compute_layout(
            self.surface.size(),
            &self.range,
            WindowIndex::default(),
            &self.style,
        );
        let max_x = self.range.x.len().saturating_sub(layout.grid.columns);
        let max_y = self.range.y.len().saturating_sub(layout.grid.rows);
        let clamp =
            |value: i64, max: usize| value.clamp(0, i64::try_from(max).unwrap_or(i64::MAX));
        WindowIndex::new(clamp(index.x, max_x), clamp(index.y, max_y))
    }
}
