pub mod calendar;
pub mod layout;
pub mod range;
pub mod style;
pub mod tasks;
pub mod types;

pub use calendar::{date_sequence, same_day};
pub use layout::{
    AxisLabels, BoardLabels, GridGeometry, GridStyle, Layout, MarkerStyle, VisibleWindow,
    compute_layout, compute_layout_with, fit_to_grid,
};
pub use range::{Location, LocationId, ValueRange};
pub use style::{StyleOptions, StyleProperties};
pub use tasks::{CellOperations, DatedOperations, Operation, TaskMatrix, TaskRecord};
pub use types::{PixelBox, PixelPoint, Viewport, WindowIndex};
