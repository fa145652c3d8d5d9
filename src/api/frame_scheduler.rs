use std::cell::Cell;
use std::rc::Rc;

/// Opaque id of one requested display frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Host hook that delivers display-synced frame callbacks.
///
/// The board never owns a clock. It asks the host for the next frame and the
/// host answers by calling `Board::on_frame` (or `BoardTransition::on_frame`)
/// with a monotonic timestamp in milliseconds.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;

    /// Drops a pending request. Unknown or already fired ids are ignored.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Deterministic scheduler for headless hosts and tests.
///
/// Requests are queued and only "fire" when the host pops them with
/// [`ManualFrameScheduler::take_pending`].
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    pending: Vec<FrameRequestId>,
    requested_total: usize,
    cancelled_total: usize,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Pops the oldest pending request, as if the display had refreshed.
    pub fn take_pending(&mut self) -> Option<FrameRequestId> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }

    #[must_use]
    pub fn requested_total(&self) -> usize {
        self.requested_total
    }

    #[must_use]
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.requested_total += 1;
        self.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != id);
        if self.pending.len() != before {
            self.cancelled_total += 1;
        }
    }
}

/// Shared cancellation flag of a running transition.
///
/// Clones observe the same flag, so a handle can be moved into a hook or
/// kept by the host and cancelled from either place.
#[derive(Debug, Clone, Default)]
pub struct TransitionHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TransitionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the transition at its next frame. No further frames are
    /// requested once the animator observes the flag.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
