mod board;
mod board_renderer;
mod frame_scheduler;
mod transition_animator;
mod validation;

pub use board::Board;
pub use board_renderer::{draw_board, draw_board_with};
pub use frame_scheduler::{FrameRequestId, FrameScheduler, ManualFrameScheduler, TransitionHandle};
pub use transition_animator::{
    BoardTransition, DEFAULT_TRANSITION_DURATION_MS, TransitionDeltas, TransitionFrame,
    TransitionFrameHook, TransitionHook, TransitionHooks, TransitionOptions, TransitionStatus,
    animate_transition, ease_in_out_quad,
};
