use tracing::debug;

use crate::core::{
    Layout, StyleOptions, StyleProperties, TaskMatrix, ValueRange, WindowIndex,
    compute_layout_with,
};
use crate::error::BoardResult;
use crate::render::{
    DrawingSurface, RectPrimitive, draw_grid, label_axis_x, label_axis_y, plot_actions,
};

/// Draws one static frame of the board and returns its layout.
///
/// The whole surface is cleared and filled with the board background, then
/// the grid, the date labels, the location labels and the action markers are
/// painted in that order. The returned layout can be cached for hit-testing.
pub fn draw_board<S>(
    surface: &mut S,
    range: &ValueRange,
    records: &TaskMatrix,
    index: WindowIndex,
    style: &StyleOptions,
) -> BoardResult<Layout>
where
    S: DrawingSurface + ?Sized,
{
    draw_board_with(surface, range, records, index, &style.resolve())
}

/// Same as [`draw_board`] with an already resolved style.
pub fn draw_board_with<S>(
    surface: &mut S,
    range: &ValueRange,
    records: &TaskMatrix,
    index: WindowIndex,
    style: &StyleProperties,
) -> BoardResult<Layout>
where
    S: DrawingSurface + ?Sized,
{
    let viewport = surface.size();
    let layout = compute_layout_with(viewport, range, index, style);
    let bounds = viewport.bounds();

    surface.clear_rect(bounds)?;
    surface.draw_rect(&RectPrimitive::filled(bounds, layout.fill))?;
    draw_grid(surface, &layout.grid)?;
    label_axis_x(surface, &layout.grid, &layout.labels.x)?;
    label_axis_y(surface, &layout.grid, &layout.labels.y)?;
    plot_actions(surface, &layout, records)?;

    debug!(
        index_x = index.x,
        index_y = index.y,
        columns = layout.grid.columns,
        rows = layout.grid.rows,
        "drew board"
    );
    Ok(layout)
}
