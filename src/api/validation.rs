use std::collections::HashSet;

use crate::core::{StyleProperties, ValueRange, Viewport};
use crate::error::{BoardError, BoardResult};

pub(super) fn validate_viewport(viewport: Viewport) -> BoardResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(BoardError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

pub(super) fn validate_style(style: &StyleProperties) -> BoardResult<()> {
    if !style.unit_px.is_finite() || style.unit_px <= 0.0 {
        return Err(BoardError::InvalidData(
            "grid unit must be finite and > 0".to_owned(),
        ));
    }
    if !style.line_width_px.is_finite() || style.line_width_px <= 0.0 {
        return Err(BoardError::InvalidData(
            "line width must be finite and > 0".to_owned(),
        ));
    }
    for (value, name) in [
        (style.y_axis_width_px, "y-axis label width"),
        (style.x_axis_height_px, "x-axis label height"),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(BoardError::InvalidData(format!(
                "{name} must be finite and >= 0"
            )));
        }
    }
    for color in [
        style.fill,
        style.stroke,
        style.font_color,
        style.grid_fill,
        style.grid_stroke,
        style.highlight_fill,
        style.highlight_stroke,
        style.marker_color,
    ] {
        color.validate()?;
    }
    style.marker_shadow.validate()
}

pub(super) fn validate_value_range(range: &ValueRange) -> BoardResult<()> {
    if range.x.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(BoardError::InvalidData(
            "dates must be strictly increasing".to_owned(),
        ));
    }
    let mut seen = HashSet::with_capacity(range.y.len());
    if let Some(duplicate) = range.y.iter().find(|location| !seen.insert(&location.id)) {
        return Err(BoardError::InvalidData(format!(
            "duplicate location id `{}`",
            duplicate.id
        )));
    }
    Ok(())
}
