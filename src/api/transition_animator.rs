//! Animated moves between two window indices.
//!
//! A transition renders one oversized virtual board covering both the `from`
//! and the `to` windows, then slides it under a clip of the visible grid on
//! every frame. The host drives the clock: each frame callback passes a
//! monotonic timestamp to [`BoardTransition::on_frame`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::api::board_renderer::draw_board_with;
use crate::api::frame_scheduler::{FrameRequestId, FrameScheduler, TransitionHandle};
use crate::core::{
    Layout, StyleOptions, StyleProperties, TaskMatrix, ValueRange, Viewport, WindowIndex,
    compute_layout_with,
};
use crate::error::{BoardError, BoardResult};
use crate::render::{
    DrawingSurface, Rect, RectPrimitive, draw_grid, label_axis_x, label_axis_y, plot_actions,
};

pub const DEFAULT_TRANSITION_DURATION_MS: f64 = 512.0;

/// Quadratic ease-in-out on `[0, 1]`; inputs outside are clamped.
#[must_use]
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Eased position along one axis, shifted so that the translation always
/// runs from the `from` window toward the `to` window.
fn axis_ease(delta: i64, eased: f64) -> f64 {
    let sign = if delta < 0 { -1.0 } else { 1.0 };
    (sign - 1.0) / 2.0 + eased
}

/// Signed distance between the `from` and `to` windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionDeltas {
    pub columns: i64,
    pub rows: i64,
    pub width_px: f64,
    pub height_px: f64,
}

impl TransitionDeltas {
    #[must_use]
    pub fn between(from: WindowIndex, to: WindowIndex, unit_px: f64) -> Self {
        let columns = to.x.saturating_sub(from.x);
        let rows = to.y.saturating_sub(from.y);
        Self {
            columns,
            rows,
            width_px: columns as f64 * unit_px,
            height_px: rows as f64 * unit_px,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.columns == 0 && self.rows == 0
    }
}

/// Timing and translation of one painted frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionFrame {
    pub timestamp_ms: f64,
    pub elapsed_ms: f64,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// `ease_in_out_quad(progress)`.
    pub easing: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

pub type TransitionHook = Box<dyn FnMut(&mut dyn DrawingSurface, &Layout, &TransitionDeltas)>;
pub type TransitionFrameHook =
    Box<dyn FnMut(&mut dyn DrawingSurface, &Layout, &TransitionDeltas, &TransitionFrame)>;

/// Optional callbacks around a transition. Every hook receives the virtual
/// layout.
#[derive(Default)]
pub struct TransitionHooks {
    pub before_all: Option<TransitionHook>,
    pub before_each: Option<TransitionFrameHook>,
    pub after_each: Option<TransitionFrameHook>,
    pub after_all: Option<TransitionHook>,
}

impl fmt::Debug for TransitionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHooks")
            .field("before_all", &self.before_all.is_some())
            .field("before_each", &self.before_each.is_some())
            .field("after_each", &self.after_each.is_some())
            .field("after_all", &self.after_all.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct TransitionOptions {
    pub from: WindowIndex,
    pub to: WindowIndex,
    pub duration_ms: f64,
    pub hooks: TransitionHooks,
}

impl TransitionOptions {
    #[must_use]
    pub fn new(from: WindowIndex, to: WindowIndex) -> Self {
        Self {
            from,
            to,
            duration_ms: DEFAULT_TRANSITION_DURATION_MS,
            hooks: TransitionHooks::default(),
        }
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: TransitionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn before_all(
        mut self,
        hook: impl FnMut(&mut dyn DrawingSurface, &Layout, &TransitionDeltas) + 'static,
    ) -> Self {
        self.hooks.before_all = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn before_each(
        mut self,
        hook: impl FnMut(&mut dyn DrawingSurface, &Layout, &TransitionDeltas, &TransitionFrame)
        + 'static,
    ) -> Self {
        self.hooks.before_each = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn after_each(
        mut self,
        hook: impl FnMut(&mut dyn DrawingSurface, &Layout, &TransitionDeltas, &TransitionFrame)
        + 'static,
    ) -> Self {
        self.hooks.after_each = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn after_all(
        mut self,
        hook: impl FnMut(&mut dyn DrawingSurface, &Layout, &TransitionDeltas) + 'static,
    ) -> Self {
        self.hooks.after_all = Some(Box::new(hook));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionStatus {
    Running,
    Finished,
    Cancelled,
}

impl TransitionStatus {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Starts a transition: computes both layouts, runs `before_all` and
/// requests the first frame. Nothing is painted until the first
/// [`BoardTransition::on_frame`].
pub fn animate_transition(
    surface: &mut dyn DrawingSurface,
    range: &ValueRange,
    options: TransitionOptions,
    style: &StyleOptions,
    scheduler: &mut dyn FrameScheduler,
) -> BoardResult<BoardTransition> {
    let TransitionOptions {
        from,
        to,
        duration_ms,
        mut hooks,
    } = options;
    if !duration_ms.is_finite() {
        return Err(BoardError::InvalidData(
            "transition duration must be finite".to_owned(),
        ));
    }

    let style = style.resolve();
    let viewport = surface.size();
    let from_layout = compute_layout_with(viewport, range, from, &style);
    let deltas = TransitionDeltas::between(from, to, style.unit_px);
    let virtual_viewport = Viewport::new(
        viewport.width + deltas.width_px.abs(),
        viewport.height + deltas.height_px.abs(),
    );
    let virtual_index = WindowIndex::new(from.x.min(to.x), from.y.min(to.y));
    let virtual_layout = compute_layout_with(virtual_viewport, range, virtual_index, &style);

    if let Some(hook) = hooks.before_all.as_mut() {
        hook(&mut *surface, &virtual_layout, &deltas);
    }

    debug!(
        from_x = from.x,
        from_y = from.y,
        to_x = to.x,
        to_y = to.y,
        duration_ms,
        "transition started"
    );

    Ok(BoardTransition {
        from,
        to,
        duration_ms,
        style,
        from_layout,
        virtual_layout,
        deltas,
        hooks,
        handle: TransitionHandle::new(),
        start_ms: None,
        pending_frame: Some(scheduler.request_frame()),
        status: TransitionStatus::Running,
        frames_painted: 0,
        final_layout: None,
    })
}

/// A running (or settled) transition.
#[derive(Debug)]
pub struct BoardTransition {
    from: WindowIndex,
    to: WindowIndex,
    duration_ms: f64,
    style: StyleProperties,
    from_layout: Layout,
    virtual_layout: Layout,
    deltas: TransitionDeltas,
    hooks: TransitionHooks,
    handle: TransitionHandle,
    start_ms: Option<f64>,
    pending_frame: Option<FrameRequestId>,
    status: TransitionStatus,
    frames_painted: usize,
    final_layout: Option<Layout>,
}

impl BoardTransition {
    #[must_use]
    pub fn from(&self) -> WindowIndex {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> WindowIndex {
        self.to
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn deltas(&self) -> TransitionDeltas {
        self.deltas
    }

    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Cancellation handle sharing this transition's flag.
    #[must_use]
    pub fn handle(&self) -> TransitionHandle {
        self.handle.clone()
    }

    #[must_use]
    pub fn from_layout(&self) -> &Layout {
        &self.from_layout
    }

    #[must_use]
    pub fn virtual_layout(&self) -> &Layout {
        &self.virtual_layout
    }

    /// Layout of the authoritative final frame, once finished.
    #[must_use]
    pub fn final_layout(&self) -> Option<&Layout> {
        self.final_layout.as_ref()
    }

    pub fn take_final_layout(&mut self) -> Option<Layout> {
        self.final_layout.take()
    }

    #[must_use]
    pub fn frames_painted(&self) -> usize {
        self.frames_painted
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending_frame
    }

    /// Paints one frame at `timestamp_ms` and either requests the next frame
    /// or, once progress reaches 1, draws the final board at `to`.
    ///
    /// Settled transitions ignore further calls and report their status.
    /// An error (bad timestamp or a failing surface) cancels the transition,
    /// so a failed frame never leaves it running with no frame requested.
    pub fn on_frame(
        &mut self,
        surface: &mut dyn DrawingSurface,
        range: &ValueRange,
        records: &TaskMatrix,
        scheduler: &mut dyn FrameScheduler,
        timestamp_ms: f64,
    ) -> BoardResult<TransitionStatus> {
        if !self.status.is_running() {
            return Ok(self.status);
        }
        let result = self.step(surface, range, records, &mut *scheduler, timestamp_ms);
        if let Err(err) = &result {
            warn!(error = %err, "transition frame failed");
            if self.status.is_running() {
                self.stop(scheduler);
            }
        }
        result
    }

    fn step(
        &mut self,
        surface: &mut dyn DrawingSurface,
        range: &ValueRange,
        records: &TaskMatrix,
        scheduler: &mut dyn FrameScheduler,
        timestamp_ms: f64,
    ) -> BoardResult<TransitionStatus> {
        if !timestamp_ms.is_finite() {
            return Err(BoardError::InvalidData(
                "frame timestamp must be finite".to_owned(),
            ));
        }
        self.pending_frame = None;
        if self.handle.is_cancelled() {
            return Ok(self.stop(scheduler));
        }

        let start_ms = *self.start_ms.get_or_insert(timestamp_ms);
        let elapsed_ms = (timestamp_ms - start_ms).max(0.0);
        let progress = if self.duration_ms > 0.0 {
            (elapsed_ms / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        let easing = ease_in_out_quad(progress);
        let translate = |delta: i64, pixels: f64| {
            if delta == 0 {
                0.0
            } else {
                -axis_ease(delta, easing) * pixels
            }
        };
        let frame = TransitionFrame {
            timestamp_ms,
            elapsed_ms,
            progress,
            easing,
            translate_x: translate(self.deltas.columns, self.deltas.width_px),
            translate_y: translate(self.deltas.rows, self.deltas.height_px),
        };

        self.paint_frame(surface, records, &frame)?;

        if progress < 1.0 {
            if let Some(hook) = self.hooks.after_each.as_mut() {
                hook(&mut *surface, &self.virtual_layout, &self.deltas, &frame);
            }
            if self.handle.is_cancelled() {
                return Ok(self.stop(scheduler));
            }
            self.pending_frame = Some(scheduler.request_frame());
            return Ok(TransitionStatus::Running);
        }

        self.finish(surface, range, records, scheduler)
    }

    /// Stops the transition without drawing the final frame. The surface is
    /// left showing the last painted frame.
    pub fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) -> TransitionStatus {
        if self.status.is_running() {
            self.stop(scheduler)
        } else {
            self.status
        }
    }

    /// Clip of the moving region: the `from` grid, widened over the label
    /// band of every axis that moves.
    fn clip_rect(&self) -> Rect {
        let grid = &self.from_layout.grid;
        let origin = grid.origin();
        let terminus = grid.terminus();
        let left = if self.deltas.rows != 0 { 0.0 } else { origin.x };
        let top = if self.deltas.columns != 0 { 0.0 } else { origin.y };
        Rect::new(left, top, terminus.x - left, terminus.y - top)
    }

    fn paint_frame(
        &mut self,
        surface: &mut dyn DrawingSurface,
        records: &TaskMatrix,
        frame: &TransitionFrame,
    ) -> BoardResult<()> {
        let clip = self.clip_rect();
        if let Some(hook) = self.hooks.before_each.as_mut() {
            hook(&mut *surface, &self.virtual_layout, &self.deltas, frame);
        }

        surface.draw_rect(&RectPrimitive::filled(clip, self.from_layout.fill))?;
        surface.save()?;
        surface.clip_rect(clip)?;
        surface.translate(frame.translate_x, frame.translate_y)?;

        let layout = &self.virtual_layout;
        if self.deltas.columns != 0 {
            label_axis_x(surface, &layout.grid, &layout.labels.x)?;
        }
        if self.deltas.rows != 0 {
            label_axis_y(surface, &layout.grid, &layout.labels.y)?;
        }
        draw_grid(surface, &layout.grid)?;
        plot_actions(surface, layout, records)?;

        surface.restore()?;
        surface.reset_transform()?;
        self.frames_painted += 1;
        Ok(())
    }

    fn finish(
        &mut self,
        surface: &mut dyn DrawingSurface,
        range: &ValueRange,
        records: &TaskMatrix,
        scheduler: &mut dyn FrameScheduler,
    ) -> BoardResult<TransitionStatus> {
        if let Some(id) = self.pending_frame.take() {
            scheduler.cancel_frame(id);
        }
        let layout = draw_board_with(surface, range, records, self.to, &self.style)?;
        self.status = TransitionStatus::Finished;
        if let Some(hook) = self.hooks.after_all.as_mut() {
            hook(&mut *surface, &self.virtual_layout, &self.deltas);
        }
        self.final_layout = Some(layout);

        debug!(
            to_x = self.to.x,
            to_y = self.to.y,
            frames = self.frames_painted,
            "transition finished"
        );
        Ok(TransitionStatus::Finished)
    }

    fn stop(&mut self, scheduler: &mut dyn FrameScheduler) -> TransitionStatus {
        self.handle.cancel();
        if let Some(id) = self.pending_frame.take() {
            scheduler.cancel_frame(id);
        }
        self.status = TransitionStatus::Cancelled;
        debug!(
            from_x = self.from.x,
            from_y = self.from.y,
            frames = self.frames_painted,
            "transition cancelled"
        );
        TransitionStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::{TransitionDeltas, axis_ease, ease_in_out_quad};
    use crate::core::WindowIndex;

    #[test]
    fn easing_hits_its_anchor_points() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(1.4), 1.0);
        assert_eq!(ease_in_out_quad(-0.2), 0.0);
    }

    #[test]
    fn translation_runs_from_the_old_window_to_the_new_one() {
        // Forward: 0 at the start, -delta at the end.
        let forward =
            TransitionDeltas::between(WindowIndex::new(0, 0), WindowIndex::new(3, 0), 40.0);
        assert_eq!(-axis_ease(forward.columns, 0.0) * forward.width_px, 0.0);
        assert_eq!(-axis_ease(forward.columns, 1.0) * forward.width_px, -120.0);

        // Backward: the virtual board anchors at `to`, so it starts shifted.
        let backward =
            TransitionDeltas::between(WindowIndex::new(3, 0), WindowIndex::new(0, 0), 40.0);
        assert_eq!(-axis_ease(backward.columns, 0.0) * backward.width_px, -120.0);
        assert_eq!(-axis_ease(backward.columns, 1.0) * backward.width_px, 0.0);
    }
}
