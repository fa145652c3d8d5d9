mod highlight_cursor;

pub use highlight_cursor::{CursorRepaint, HighlightCursor};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// A window transition is running; pointer input is ignored.
    Transitioning,
}
