//! fieldwork-board: a scrollable date-by-location activity board.
//!
//! Columns are calendar days, rows are locations, and each cell shows one
//! marker per operation recorded there. The crate computes the layout,
//! paints it through a backend-neutral [`render::DrawingSurface`], animates
//! moves between windows and highlights the row and column under the pointer.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{Board, ManualFrameScheduler};
pub use error::{BoardError, BoardResult};
