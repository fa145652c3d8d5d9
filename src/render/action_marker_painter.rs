use crate::core::{GridGeometry, Layout, Operation, TaskMatrix};
use crate::error::BoardResult;
use crate::render::{CirclePrimitive, DrawingSurface, ShadowStyle};

/// Horizontal offsets from the cell center for `count` markers spaced
/// `pitch` apart, centered as a group.
pub fn marker_offsets(count: usize, pitch: f64) -> impl Iterator<Item = f64> {
    (0..count).map(move |index| (2.0 * index as f64 + 1.0 - count as f64) * pitch * 0.5)
}

/// Draws one disc per operation in the cell at (`column`, `row`) with the
/// grid's marker shadow. The shadow is reset before returning.
pub fn plot_actions_by_date<S>(
    surface: &mut S,
    grid: &GridGeometry,
    operations: &[Operation],
    column: usize,
    row: usize,
) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    plot_cell_markers(surface, grid, operations, column, row, grid.marker.shadow)
}

pub(crate) fn plot_cell_markers<S>(
    surface: &mut S,
    grid: &GridGeometry,
    operations: &[Operation],
    column: usize,
    row: usize,
    shadow: ShadowStyle,
) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let marker = grid.marker;
    if operations.is_empty() || marker.radius_px <= 0.0 {
        return Ok(());
    }

    let center = grid.cell_center(column, row);
    surface.save()?;
    surface.set_shadow(shadow)?;
    for (operation, offset) in operations
        .iter()
        .zip(marker_offsets(operations.len(), marker.pitch_px()))
    {
        surface.draw_circle(&CirclePrimitive::new(
            center.x + offset,
            center.y,
            marker.radius_px,
            operation.color.unwrap_or(marker.default_color),
        ))?;
    }
    surface.set_shadow(ShadowStyle::NONE)?;
    surface.restore()
}

/// Plots the markers of one visible cell, looking its operations up in
/// `records`. Out-of-range cells and empty cells draw nothing.
pub(crate) fn plot_cell_actions<S>(
    surface: &mut S,
    layout: &Layout,
    records: &TaskMatrix,
    column: usize,
    row: usize,
    shadow: ShadowStyle,
) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let (Some(date), Some(location)) = (
        layout.labels.x.values.get(column),
        layout.labels.y.values.get(row),
    ) else {
        return Ok(());
    };
    match records.operations_on(&location.id, *date) {
        Some(operations) => {
            plot_cell_markers(surface, &layout.grid, operations, column, row, shadow)
        }
        None => Ok(()),
    }
}

/// Plots every visible cell that has recorded operations.
pub fn plot_actions<S>(surface: &mut S, layout: &Layout, records: &TaskMatrix) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let grid = &layout.grid;
    for (row, location) in layout.labels.y.values.iter().enumerate() {
        if records.entries(&location.id).is_empty() {
            continue;
        }
        for (column, date) in layout.labels.x.values.iter().enumerate() {
            if let Some(operations) = records.operations_on(&location.id, *date) {
                plot_actions_by_date(surface, grid, operations, column, row)?;
            }
        }
    }
    Ok(())
}
