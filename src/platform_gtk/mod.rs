//! GTK4 glue: frame requests through a `DrawingArea` and presentation of an
//! offscreen cairo board inside its draw callback.

use gtk4 as gtk;
use gtk::prelude::*;

use crate::api::{FrameRequestId, FrameScheduler};
use crate::error::{BoardError, BoardResult};
use crate::render::CairoSurface;

/// Requests frames by queueing redraws of a `DrawingArea`.
///
/// The area's draw callback is expected to pop the pending request with
/// [`GtkFrameScheduler::take_pending`] and forward
/// [`GtkFrameScheduler::frame_time_ms`] to `Board::on_frame`.
#[derive(Debug)]
pub struct GtkFrameScheduler {
    area: gtk::DrawingArea,
    next_id: u64,
    pending: Vec<FrameRequestId>,
}

impl GtkFrameScheduler {
    #[must_use]
    pub fn new(area: gtk::DrawingArea) -> Self {
        Self {
            area,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn area(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take_pending(&mut self) -> Option<FrameRequestId> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }

    /// Frame clock time of the area in milliseconds, once it is realized.
    #[must_use]
    pub fn frame_time_ms(&self) -> Option<f64> {
        self.area
            .frame_clock()
            .map(|clock| clock.frame_time() as f64 / 1000.0)
    }
}

impl FrameScheduler for GtkFrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.pending.push(id);
        self.area.queue_draw();
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.pending.retain(|pending| *pending != id);
    }
}

/// Copies an offscreen board surface onto the context of a draw callback.
pub fn paint_offscreen(context: &cairo::Context, surface: &CairoSurface) -> BoardResult<()> {
    let image = surface.image().ok_or_else(|| {
        BoardError::Backend("board surface is not an offscreen image".to_owned())
    })?;
    context
        .set_source_surface(image, 0.0, 0.0)
        .map_err(|err| BoardError::Backend(format!("failed to set source surface: {err}")))?;
    context
        .paint()
        .map_err(|err| BoardError::Backend(format!("failed to paint board: {err}")))
}
