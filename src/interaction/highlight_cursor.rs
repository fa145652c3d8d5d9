use std::collections::BTreeSet;

use tracing::trace;

use crate::core::{GridStyle, Layout, TaskMatrix};
use crate::error::BoardResult;
use crate::render::{DrawingSurface, ShadowStyle, draw_grid_cell, plot_cell_actions};

const NO_CELL: i64 = -1;

/// What a pointer update repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorRepaint {
    pub column_changed: bool,
    pub row_changed: bool,
    /// Cells whose background was repainted, counting overlaps once per strip.
    pub cells_repainted: usize,
    /// Cells whose markers were re-plotted as shadow-less neighbours.
    pub neighbour_cells: usize,
}

impl CursorRepaint {
    #[must_use]
    pub fn is_noop(self) -> bool {
        !self.column_changed && !self.row_changed
    }
}

/// Highlights the column and row under the pointer.
///
/// Only strips that actually change are repainted: the previous column/row
/// back to the base style and the current ones with the highlight style.
/// Marker groups wider than their cell can spill into nearby columns, so
/// every column within reach of the widest visible group gets its markers
/// re-plotted (without shadow) after the strips are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightCursor {
    column: i64,
    row: i64,
}

impl Default for HighlightCursor {
    fn default() -> Self {
        Self {
            column: NO_CELL,
            row: NO_CELL,
        }
    }
}

impl HighlightCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighted column, if the pointer is over one.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        usize::try_from(self.column).ok()
    }

    /// Highlighted row, if the pointer is over one.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        usize::try_from(self.row).ok()
    }

    /// Forgets the last position without painting. Used after the board was
    /// redrawn from scratch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Moves the highlight to the cell under (`x`, `y`).
    ///
    /// Each axis is tracked on its own: a pointer over the date band keeps
    /// its column highlighted with no row, and positions outside the grid on
    /// both axes clear the highlight.
    pub fn submit_position<S>(
        &mut self,
        surface: &mut S,
        layout: &Layout,
        records: &TaskMatrix,
        x: f64,
        y: f64,
    ) -> BoardResult<CursorRepaint>
    where
        S: DrawingSurface + ?Sized,
    {
        let (column, row) = layout.cell_index(x, y);
        let column = if (0..layout.grid.columns as i64).contains(&column) {
            column
        } else {
            NO_CELL
        };
        let row = if (0..layout.grid.rows as i64).contains(&row) {
            row
        } else {
            NO_CELL
        };
        self.move_to(surface, layout, records, column, row)
    }

    /// Repaints the highlighted strips with the base style and resets to the
    /// initial state.
    pub fn clear<S>(
        &mut self,
        surface: &mut S,
        layout: &Layout,
        records: &TaskMatrix,
    ) -> BoardResult<CursorRepaint>
    where
        S: DrawingSurface + ?Sized,
    {
        self.move_to(surface, layout, records, NO_CELL, NO_CELL)
    }

    fn move_to<S>(
        &mut self,
        surface: &mut S,
        layout: &Layout,
        records: &TaskMatrix,
        column: i64,
        row: i64,
    ) -> BoardResult<CursorRepaint>
    where
        S: DrawingSurface + ?Sized,
    {
        let previous = *self;
        let mut repaint = CursorRepaint {
            column_changed: column != previous.column,
            row_changed: row != previous.row,
            ..CursorRepaint::default()
        };
        if repaint.is_noop() {
            return Ok(repaint);
        }
        self.column = column;
        self.row = row;

        let columns = layout.grid.columns;
        let rows = layout.grid.rows;
        let mut repainted_columns = BTreeSet::new();

        // Previous strips first so the new highlight is never painted over.
        if repaint.column_changed {
            if let Some(previous_column) = previous.column() {
                repaint.cells_repainted +=
                    self.paint_column(surface, layout, records, previous_column)?;
                repainted_columns.insert(previous_column);
            }
        }
        if repaint.row_changed {
            if let Some(previous_row) = previous.row() {
                repaint.cells_repainted += self.paint_row(surface, layout, records, previous_row)?;
            }
        }
        if repaint.column_changed {
            if let Some(current_column) = self.column() {
                repaint.cells_repainted +=
                    self.paint_column(surface, layout, records, current_column)?;
                repainted_columns.insert(current_column);
            }
        }
        if repaint.row_changed {
            if let Some(current_row) = self.row() {
                repaint.cells_repainted += self.paint_row(surface, layout, records, current_row)?;
            }
        }

        let reach = layout
            .grid
            .marker_spill_columns(widest_marker_group(layout, records));
        let neighbours: BTreeSet<usize> = repainted_columns
            .iter()
            .flat_map(|&column| column.saturating_sub(reach)..=column + reach)
            .filter(|column| *column < columns && !repainted_columns.contains(column))
            .collect();
        for &column in &neighbours {
            for row in 0..rows {
                plot_cell_actions(surface, layout, records, column, row, ShadowStyle::NONE)?;
            }
            repaint.neighbour_cells += rows;
        }

        trace!(
            column = self.column,
            row = self.row,
            previous_column = previous.column,
            previous_row = previous.row,
            cells = repaint.cells_repainted,
            "highlight moved"
        );
        Ok(repaint)
    }

    fn style_for(&self, layout: &Layout, column: usize, row: usize) -> GridStyle {
        if self.column() == Some(column) || self.row() == Some(row) {
            layout.highlight
        } else {
            layout.grid.style
        }
    }

    fn paint_column<S>(
        &self,
        surface: &mut S,
        layout: &Layout,
        records: &TaskMatrix,
        column: usize,
    ) -> BoardResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        let cells: Vec<(usize, usize)> = (0..layout.grid.rows).map(|row| (column, row)).collect();
        self.paint_cells(surface, layout, records, &cells)
    }

    fn paint_row<S>(
        &self,
        surface: &mut S,
        layout: &Layout,
        records: &TaskMatrix,
        row: usize,
    ) -> BoardResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        let cells: Vec<(usize, usize)> =
            (0..layout.grid.columns).map(|column| (column, row)).collect();
        self.paint_cells(surface, layout, records, &cells)
    }

    /// Backgrounds of the whole strip first, then its markers, so a marker
    /// group spilling into the next cell is not covered by that cell's fill.
    fn paint_cells<S>(
        &self,
        surface: &mut S,
        layout: &Layout,
        records: &TaskMatrix,
        cells: &[(usize, usize)],
    ) -> BoardResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        for &(column, row) in cells {
            let style = self.style_for(layout, column, row);
            draw_grid_cell(surface, &layout.grid, column, row, layout.fill, style)?;
        }
        for &(column, row) in cells {
            plot_cell_actions(surface, layout, records, column, row, layout.grid.marker.shadow)?;
        }
        Ok(cells.len())
    }
}

/// Largest number of markers in any visible cell.
fn widest_marker_group(layout: &Layout, records: &TaskMatrix) -> usize {
    layout
        .labels
        .y
        .values
        .iter()
        .flat_map(|location| {
            layout
                .labels
                .x
                .values
                .iter()
                .filter_map(move |date| records.operations_on(&location.id, *date))
        })
        .map(|operations| operations.len())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::HighlightCursor;
    use crate::core::{
        Location, StyleOptions, TaskMatrix, ValueRange, Viewport, WindowIndex, compute_layout,
        date_sequence,
    };
    use crate::render::RecordingSurface;

    fn fixture() -> (crate::core::Layout, TaskMatrix) {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).expect("date");
        let end = NaiveDate::from_ymd_opt(2024, 4, 10).expect("date");
        let range = ValueRange::new(
            date_sequence(start, end),
            vec![
                Location::new("a", "North"),
                Location::new("b", "South"),
                Location::new("c", "East"),
            ],
        );
        let layout = compute_layout(
            Viewport::new(640.0, 300.0),
            &range,
            WindowIndex::default(),
            &StyleOptions::default(),
        );
        (layout, TaskMatrix::new())
    }

    #[test]
    fn first_position_on_the_grid_always_repaints() {
        let (layout, records) = fixture();
        let mut surface = RecordingSurface::new(640.0, 300.0);
        let mut cursor = HighlightCursor::new();

        let repaint = cursor
            .submit_position(&mut surface, &layout, &records, 250.0, 70.0)
            .expect("submit");
        assert!(repaint.column_changed && repaint.row_changed);
        assert_eq!(cursor.column(), Some(0));
        assert_eq!(cursor.row(), Some(0));
        // Column 0 has 3 rows, row 0 has 10 columns.
        assert_eq!(repaint.cells_repainted, 13);
    }

    #[test]
    fn moving_within_a_row_only_touches_columns() {
        let (layout, records) = fixture();
        let mut surface = RecordingSurface::new(640.0, 300.0);
        let mut cursor = HighlightCursor::new();
        cursor
            .submit_position(&mut surface, &layout, &records, 250.0, 70.0)
            .expect("submit");

        let repaint = cursor
            .submit_position(&mut surface, &layout, &records, 290.0, 75.0)
            .expect("submit");
        assert!(repaint.column_changed);
        assert!(!repaint.row_changed);
        assert_eq!(repaint.cells_repainted, 6);
        // No markers anywhere, so nothing spills into other columns.
        assert_eq!(repaint.neighbour_cells, 0);
    }

    #[test]
    fn outside_the_grid_maps_to_no_cell() {
        let (layout, records) = fixture();
        let mut surface = RecordingSurface::new(640.0, 300.0);
        let mut cursor = HighlightCursor::new();

        let repaint = cursor
            .submit_position(&mut surface, &layout, &records, 10.0, 10.0)
            .expect("submit");
        assert!(repaint.is_noop());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn clear_returns_to_the_initial_state() {
        let (layout, records) = fixture();
        let mut surface = RecordingSurface::new(640.0, 300.0);
        let mut cursor = HighlightCursor::new();
        cursor
            .submit_position(&mut surface, &layout, &records, 300.0, 110.0)
            .expect("submit");

        let repaint = cursor.clear(&mut surface, &layout, &records).expect("clear");
        assert!(!repaint.is_noop());
        assert_eq!(cursor, HighlightCursor::new());
        assert_eq!(surface.save_depth(), 0);
    }
}
