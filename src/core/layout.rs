//! Board geometry: which dates and locations fit, and where they go.
//!
//! Everything here is pure. A [`Layout`] is recomputed for every frame from
//! the viewport, the value range, the window index and the style, and is
//! never mutated afterwards.

use std::ops::Range;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::trace;

use crate::core::style::{MARKER_GAP_RATIO, MARKER_RADIUS_RATIO};
use crate::core::{
    Location, PixelBox, PixelPoint, StyleOptions, StyleProperties, ValueRange, Viewport,
    WindowIndex,
};
use crate::error::{BoardError, BoardResult};
use crate::render::{Color, Rect, ShadowStyle};

/// Returns the contiguous slice of `total` values that fits along one axis.
///
/// `axis_length - offset` is the room left after the label band. As many
/// whole cells as fit are taken starting at `index` (negative means 0). When
/// that window would reach or pass the end of the values, it is re-anchored
/// so the last value sits in the last visible cell. A non-positive room or
/// unit yields an empty window.
#[must_use]
pub fn fit_to_grid(
    axis_length: f64,
    offset: f64,
    total: usize,
    unit: f64,
    index: i64,
) -> Range<usize> {
    let room = axis_length - offset;
    if total == 0 || !room.is_finite() || !unit.is_finite() || room <= 0.0 || unit <= 0.0 {
        return 0..0;
    }

    let cells = (room / unit).floor();
    if cells < 1.0 {
        return 0..0;
    }
    let cells = if cells >= total as f64 {
        total
    } else {
        cells as usize
    };

    let start = usize::try_from(index.max(0)).unwrap_or(usize::MAX);
    let stop = start.saturating_add(cells);
    if stop >= total {
        total.saturating_sub(cells)..total
    } else {
        start..stop
    }
}

/// Fill, stroke and line width of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStyle {
    pub fill: Color,
    pub stroke: Color,
    pub line_width_px: f64,
}

/// Marker appearance derived from the grid unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub default_color: Color,
    pub shadow: ShadowStyle,
    pub radius_px: f64,
    pub gap_px: f64,
}

impl MarkerStyle {
    /// Center-to-center distance between neighbouring markers in one cell.
    #[must_use]
    pub fn pitch_px(self) -> f64 {
        2.0 * self.radius_px + self.gap_px
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridGeometry {
    pub bounds: PixelBox,
    pub unit_px: f64,
    pub rows: usize,
    pub columns: usize,
    pub style: GridStyle,
    pub marker: MarkerStyle,
}

impl GridGeometry {
    #[must_use]
    pub fn origin(&self) -> PixelPoint {
        self.bounds.origin
    }

    #[must_use]
    pub fn terminus(&self) -> PixelPoint {
        self.bounds.terminus
    }

    /// Pixel box of the cell at (`column`, `row`), relative to this grid.
    #[must_use]
    pub fn cell_rect(&self, column: usize, row: usize) -> Rect {
        Rect::new(
            self.bounds.origin.x + column as f64 * self.unit_px,
            self.bounds.origin.y + row as f64 * self.unit_px,
            self.unit_px,
            self.unit_px,
        )
    }

    #[must_use]
    pub fn cell_center(&self, column: usize, row: usize) -> PixelPoint {
        PixelPoint::new(
            self.bounds.origin.x + (column as f64 + 0.5) * self.unit_px,
            self.bounds.origin.y + (row as f64 + 0.5) * self.unit_px,
        )
    }

    /// Whole columns a group of `count` markers reaches past its own cell
    /// on each side.
    #[must_use]
    pub fn marker_spill_columns(&self, count: usize) -> usize {
        if count == 0 || self.unit_px <= 0.0 {
            return 0;
        }
        let half_width =
            (count - 1) as f64 * self.marker.pitch_px() * 0.5 + self.marker.radius_px;
        let overhang = half_width - self.unit_px * 0.5;
        if overhang <= 0.0 {
            0
        } else {
            (overhang / self.unit_px).ceil() as usize
        }
    }

    #[must_use]
    pub fn contains_cell(&self, column: i64, row: i64) -> bool {
        column >= 0
            && row >= 0
            && (column as u64) < self.columns as u64
            && (row as u64) < self.rows as u64
    }
}

/// One axis label band and the values shown in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabels<V> {
    pub bounds: PixelBox,
    pub values: Vec<V>,
    pub color: Color,
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardLabels {
    pub x: AxisLabels<NaiveDate>,
    pub y: AxisLabels<Location>,
}

/// Index ranges into `ValueRange::x` / `ValueRange::y` that are on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleWindow {
    pub columns: Range<usize>,
    pub rows: Range<usize>,
}

/// Fully resolved geometry for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    /// Window index the layout was requested for.
    pub index: WindowIndex,
    /// Window actually shown after clamping and re-anchoring.
    pub window: VisibleWindow,
    pub grid: GridGeometry,
    pub labels: BoardLabels,
    pub highlight: GridStyle,
    pub fill: Color,
    pub stroke: Color,
}

impl Layout {
    /// Column and row under a pixel position. Values may be negative or past
    /// the last column/row when the point lies outside the grid.
    #[must_use]
    pub fn cell_index(&self, x: f64, y: f64) -> (i64, i64) {
        let unit = self.grid.unit_px;
        if !unit.is_finite() || unit <= 0.0 || !x.is_finite() || !y.is_finite() {
            return (-1, -1);
        }
        let origin = self.grid.origin();
        (
            ((x - origin.x) / unit).floor() as i64,
            ((y - origin.y) / unit).floor() as i64,
        )
    }

    /// Visible (column, row) under a pixel position, if it lies on the grid.
    #[must_use]
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (column, row) = self.cell_index(x, y);
        self.grid
            .contains_cell(column, row)
            .then(|| (column as usize, row as usize))
    }

    /// Date and location under a pixel position, if it lies on the grid.
    #[must_use]
    pub fn value_at(&self, x: f64, y: f64) -> Option<(NaiveDate, &Location)> {
        let (column, row) = self.cell_at(x, y)?;
        Some((
            *self.labels.x.values.get(column)?,
            self.labels.y.values.get(row)?,
        ))
    }

    /// Area covered by labels and grid together.
    #[must_use]
    pub fn board_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Serializes the layout to pretty JSON for debugging and snapshots.
    pub fn to_json_pretty(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BoardError::InvalidData(format!("failed to serialize layout: {e}")))
    }
}

/// Computes the layout for a surface of size `viewport` showing `range` from
/// `index`, resolving `style` against the defaults.
#[must_use]
pub fn compute_layout(
    viewport: Viewport,
    range: &ValueRange,
    index: WindowIndex,
    style: &StyleOptions,
) -> Layout {
    compute_layout_with(viewport, range, index, &style.resolve())
}

/// Same as [`compute_layout`] with an already resolved style.
#[must_use]
pub fn compute_layout_with(
    viewport: Viewport,
    range: &ValueRange,
    index: WindowIndex,
    style: &StyleProperties,
) -> Layout {
    let y_axis_width = style.y_axis_width_px;
    let x_axis_height = style.x_axis_height_px;
    let unit = style.unit_px;

    let columns_window = fit_to_grid(viewport.width, y_axis_width, range.x.len(), unit, index.x);
    let rows_window = fit_to_grid(viewport.height, x_axis_height, range.y.len(), unit, index.y);
    let dates = range.x[columns_window.clone()].to_vec();
    let locations = range.y[rows_window.clone()].to_vec();

    let columns = dates.len();
    let rows = locations.len();
    let grid_width = columns as f64 * unit;
    let grid_height = rows as f64 * unit;
    let board_width = y_axis_width + grid_width;
    let board_height = x_axis_height + grid_height;

    trace!(
        viewport_width = viewport.width,
        viewport_height = viewport.height,
        index_x = index.x,
        index_y = index.y,
        columns,
        rows,
        first_column = columns_window.start,
        first_row = rows_window.start,
        "computed board layout"
    );

    let labels = BoardLabels {
        x: AxisLabels {
            bounds: PixelBox::new(PixelPoint::new(y_axis_width, 0.0), grid_width, x_axis_height),
            values: dates,
            color: style.font_color,
            font_family: style.font_family.clone(),
        },
        y: AxisLabels {
            bounds: PixelBox::new(PixelPoint::new(0.0, x_axis_height), y_axis_width, grid_height),
            values: locations,
            color: style.font_color,
            font_family: style.font_family.clone(),
        },
    };

    Layout {
        width: board_width,
        height: board_height,
        index,
        window: VisibleWindow {
            columns: columns_window,
            rows: rows_window,
        },
        grid: GridGeometry {
            bounds: PixelBox::new(
                PixelPoint::new(y_axis_width, x_axis_height),
                grid_width,
                grid_height,
            ),
            unit_px: unit,
            rows,
            columns,
            style: GridStyle {
                fill: style.grid_fill,
                stroke: style.grid_stroke,
                line_width_px: style.line_width_px,
            },
            marker: MarkerStyle {
                default_color: style.marker_color,
                shadow: style.marker_shadow,
                radius_px: unit * MARKER_RADIUS_RATIO,
                gap_px: unit * MARKER_GAP_RATIO,
            },
        },
        labels,
        highlight: GridStyle {
            fill: style.highlight_fill,
            stroke: style.highlight_stroke,
            line_width_px: style.line_width_px,
        },
        fill: style.fill,
        stroke: style.stroke,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{compute_layout, fit_to_grid};
    use crate::core::{Location, StyleOptions, ValueRange, Viewport, WindowIndex};

    #[test]
    fn window_starts_at_index_when_enough_values_remain() {
        assert_eq!(fit_to_grid(640.0, 240.0, 100, 40.0, 5), 5..15);
    }

    #[test]
    fn window_reanchors_to_trailing_edge() {
        assert_eq!(fit_to_grid(640.0, 240.0, 100, 40.0, 95), 90..100);
        assert_eq!(fit_to_grid(640.0, 240.0, 100, 40.0, 90), 90..100);
    }

    #[test]
    fn negative_index_is_treated_as_zero() {
        assert_eq!(fit_to_grid(640.0, 240.0, 100, 40.0, -3), 0..10);
    }

    #[test]
    fn short_ranges_are_shown_whole() {
        assert_eq!(fit_to_grid(300.0, 60.0, 3, 40.0, 2), 0..3);
    }

    #[test]
    fn degenerate_inputs_yield_an_empty_window() {
        assert_eq!(fit_to_grid(200.0, 240.0, 10, 40.0, 0), 0..0);
        assert_eq!(fit_to_grid(260.0, 240.0, 10, 40.0, 0), 0..0);
        assert_eq!(fit_to_grid(640.0, 240.0, 0, 40.0, 0), 0..0);
        assert_eq!(fit_to_grid(640.0, 240.0, 10, 0.0, 0), 0..0);
        assert_eq!(fit_to_grid(f64::NAN, 240.0, 10, 40.0, 0), 0..0);
    }

    #[test]
    fn marker_groups_of_four_spill_two_columns() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        let range = ValueRange::new(vec![day], vec![Location::new("a", "North")]);
        let layout = compute_layout(
            Viewport::new(640.0, 300.0),
            &range,
            WindowIndex::default(),
            &StyleOptions::default(),
        );
        let grid = &layout.grid;
        assert_eq!(grid.marker_spill_columns(0), 0);
        assert_eq!(grid.marker_spill_columns(1), 0);
        assert_eq!(grid.marker_spill_columns(2), 1);
        assert_eq!(grid.marker_spill_columns(3), 1);
        // Right edge at 1.77 units from the center.
        assert_eq!(grid.marker_spill_columns(4), 2);
    }
}
