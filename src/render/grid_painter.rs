use crate::core::{GridGeometry, GridStyle};
use crate::error::BoardResult;
use crate::render::{Color, DrawingSurface, LinePrimitive, RectPrimitive};

/// Paints the grid background and the interior grid lines.
///
/// Lines are spaced exactly one unit apart and only drawn strictly between
/// the grid's origin and terminus; the outer border is left to the caller.
pub fn draw_grid<S>(surface: &mut S, grid: &GridGeometry) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let origin = grid.origin();
    let terminus = grid.terminus();
    let style = grid.style;

    surface.save()?;
    surface.draw_rect(&RectPrimitive::filled(grid.bounds.rect(), style.fill))?;

    for row in 1..grid.rows {
        let y = origin.y + row as f64 * grid.unit_px;
        surface.draw_line(&LinePrimitive::new(
            origin.x,
            y,
            terminus.x,
            y,
            style.line_width_px,
            style.stroke,
        ))?;
    }

    for column in 1..grid.columns {
        let x = origin.x + column as f64 * grid.unit_px;
        surface.draw_line(&LinePrimitive::new(
            x,
            origin.y,
            x,
            terminus.y,
            style.line_width_px,
            style.stroke,
        ))?;
    }

    surface.restore()
}

/// Repaints a single cell the way [`draw_grid`] paints it, using `style`.
///
/// The cell is cleared and re-filled with `background` first so translucent
/// fills do not accumulate. Only edges that are interior grid lines are
/// stroked.
pub(crate) fn draw_grid_cell<S>(
    surface: &mut S,
    grid: &GridGeometry,
    column: usize,
    row: usize,
    background: Color,
    style: GridStyle,
) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    if column >= grid.columns || row >= grid.rows {
        return Ok(());
    }
    let cell = grid.cell_rect(column, row);

    surface.save()?;
    surface.clear_rect(cell)?;
    surface.draw_rect(&RectPrimitive::filled(cell, background))?;
    surface.draw_rect(&RectPrimitive::filled(cell, style.fill))?;

    let edge =
        |x1, y1, x2, y2| LinePrimitive::new(x1, y1, x2, y2, style.line_width_px, style.stroke);
    if row > 0 {
        surface.draw_line(&edge(cell.x, cell.y, cell.right(), cell.y))?;
    }
    if row + 1 < grid.rows {
        surface.draw_line(&edge(cell.x, cell.bottom(), cell.right(), cell.bottom()))?;
    }
    if column > 0 {
        surface.draw_line(&edge(cell.x, cell.y, cell.x, cell.bottom()))?;
    }
    if column + 1 < grid.columns {
        surface.draw_line(&edge(cell.right(), cell.y, cell.right(), cell.bottom()))?;
    }

    surface.restore()
}
