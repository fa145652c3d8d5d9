use chrono::{Datelike, NaiveDate};

use crate::core::style::{Y_LABEL_FONT_RATIO, Y_LABEL_PADDING_PX};
use crate::core::{AxisLabels, GridGeometry, Location};
use crate::error::BoardResult;
use crate::render::{
    DrawingSurface, LinePrimitive, Rect, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};

/// Consecutive visible columns that share a month name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpan {
    pub name: String,
    /// First column of the span.
    pub start_column: usize,
    /// One past the last column of the span.
    pub end_column: usize,
}

impl MonthSpan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end_column - self.start_column
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run-length groups `dates` by month name; a new span starts whenever the
/// formatted name differs from the previous date's.
#[must_use]
pub fn month_spans(dates: &[NaiveDate]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::new();
    for (column, date) in dates.iter().enumerate() {
        let name = date.format("%B").to_string();
        match spans.last_mut() {
            Some(span) if span.name == name => span.end_column = column + 1,
            _ => spans.push(MonthSpan {
                name,
                start_column: column,
                end_column: column + 1,
            }),
        }
    }
    spans
}

/// Font metrics of the date band, all derived from its height.
///
/// The band is split into a month line on top and a day-number line below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XAxisTypography {
    pub day_line_height_px: f64,
    pub day_font_px: f64,
    pub day_baseline_px: f64,
    pub month_line_height_px: f64,
    pub month_font_px: f64,
    pub month_baseline_px: f64,
}

impl XAxisTypography {
    #[must_use]
    pub fn for_band_height(height: f64) -> Self {
        let day_line_height_px = (height * 5.0 / 9.0).floor();
        let month_line_height_px = (height * 3.0 / 9.0).floor();
        Self {
            day_line_height_px,
            day_font_px: (day_line_height_px * 5.0 / 9.0).floor(),
            day_baseline_px: height - (day_line_height_px / 3.0).floor(),
            month_line_height_px,
            month_font_px: (month_line_height_px * 2.0 / 3.0).floor(),
            month_baseline_px: month_line_height_px - (month_line_height_px / 5.0).floor(),
        }
    }
}

/// Labels the date band: a day number over each column, month names
/// centered over their spans, and the rules separating them.
pub fn label_axis_x<S>(
    surface: &mut S,
    grid: &GridGeometry,
    label: &AxisLabels<NaiveDate>,
) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let dates = &label.values;
    if dates.is_empty() {
        return Ok(());
    }

    let origin = label.bounds.origin;
    let height = label.bounds.height;
    let unit = grid.unit_px;
    let band_width = dates.len() as f64 * unit;
    let typography = XAxisTypography::for_band_height(height);
    let stroke = grid.style.stroke;
    let line_width = grid.style.line_width_px;

    surface.save()?;

    if typography.day_font_px > 0.0 {
        for (column, date) in dates.iter().enumerate() {
            let x = origin.x + column as f64 * unit + unit * 0.5;
            surface.draw_text(
                &TextPrimitive::new(
                    date.day().to_string(),
                    x,
                    origin.y + typography.day_baseline_px,
                    typography.day_font_px,
                    label.font_family.as_str(),
                    label.color,
                )
                .aligned(TextHAlign::Center, TextVAlign::Baseline),
            )?;
        }
    }

    surface.draw_rect(&RectPrimitive::outlined(
        Rect::new(origin.x, origin.y, band_width, height),
        line_width,
        stroke,
    ))?;

    let rule_y = origin.y + typography.month_line_height_px;
    surface.draw_line(&LinePrimitive::new(
        origin.x,
        rule_y,
        origin.x + band_width,
        rule_y,
        line_width,
        stroke,
    ))?;

    for (index, span) in month_spans(dates).iter().enumerate() {
        let span_x = origin.x + span.start_column as f64 * unit;
        let span_width = span.len() as f64 * unit;
        if index != 0 {
            surface.draw_line(&LinePrimitive::new(
                span_x,
                origin.y,
                span_x,
                origin.y + height,
                line_width,
                stroke,
            ))?;
        }
        if typography.month_font_px > 0.0 {
            surface.draw_text(
                &TextPrimitive::new(
                    span.name.as_str(),
                    span_x + span_width * 0.5,
                    origin.y + typography.month_baseline_px,
                    typography.month_font_px,
                    label.font_family.as_str(),
                    label.color,
                )
                .aligned(TextHAlign::Center, TextVAlign::Baseline),
            )?;
        }
    }

    surface.restore()
}

/// Labels the location band: one right-aligned name per row, vertically
/// centered in the row.
pub fn label_axis_y<S>(
    surface: &mut S,
    grid: &GridGeometry,
    label: &AxisLabels<Location>,
) -> BoardResult<()>
where
    S: DrawingSurface + ?Sized,
{
    let font_px = grid.unit_px * Y_LABEL_FONT_RATIO;
    if label.values.is_empty() || font_px <= 0.0 {
        return Ok(());
    }

    let origin = label.bounds.origin;
    let x = origin.x + label.bounds.width - Y_LABEL_PADDING_PX;

    surface.save()?;
    for (row, location) in label.values.iter().enumerate() {
        if location.name.is_empty() {
            continue;
        }
        let y = origin.y + (row as f64 + 0.5) * grid.unit_px;
        surface.draw_text(
            &TextPrimitive::new(
                location.name.as_str(),
                x,
                y,
                font_px,
                label.font_family.as_str(),
                label.color,
            )
            .aligned(TextHAlign::Right, TextVAlign::Middle),
        )?;
    }
    surface.restore()
}

#[cfg(test)]
mod tests {
    use super::XAxisTypography;

    #[test]
    fn typography_follows_band_height_ratios() {
        let typography = XAxisTypography::for_band_height(60.0);
        assert_eq!(typography.day_line_height_px, 33.0);
        assert_eq!(typography.day_font_px, 18.0);
        assert_eq!(typography.day_baseline_px, 49.0);
        assert_eq!(typography.month_line_height_px, 20.0);
        assert_eq!(typography.month_font_px, 13.0);
        assert_eq!(typography.month_baseline_px, 16.0);
    }
}
