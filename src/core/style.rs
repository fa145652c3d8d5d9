use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::render::{Color, ShadowStyle};

/// Marker radius as a fraction of the grid unit.
pub const MARKER_RADIUS_RATIO: f64 = 11.0 / 30.0;
/// Gap between neighbouring marker edges as a fraction of the grid unit.
pub const MARKER_GAP_RATIO: f64 = 0.2;
/// Location-name font size as a fraction of the grid unit.
pub const Y_LABEL_FONT_RATIO: f64 = 0.65;
/// Space between a location name and the grid's left edge.
pub const Y_LABEL_PADDING_PX: f64 = 6.0;

const DEFAULT_FONT_FAMILY: &str = "system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif";

/// Sparse, caller-supplied style overrides.
///
/// Every field is optional; [`StyleOptions::resolve`] fills the gaps from the
/// baked-in defaults. Colors use CSS notation when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub font_color: Option<Color>,
    pub font_family: Option<String>,
    pub y_axis_width_px: Option<f64>,
    pub x_axis_height_px: Option<f64>,
    pub unit_px: Option<f64>,
    pub line_width_px: Option<f64>,
    pub grid_fill: Option<Color>,
    pub grid_stroke: Option<Color>,
    pub highlight_fill: Option<Color>,
    pub highlight_stroke: Option<Color>,
    pub marker_color: Option<Color>,
    pub marker_shadow_color: Option<Color>,
    pub marker_shadow_blur_px: Option<f64>,
    pub marker_shadow_offset_x_px: Option<f64>,
    pub marker_shadow_offset_y_px: Option<f64>,
}

/// Fully populated style used by layout and painters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProperties {
    pub fill: Color,
    pub stroke: Color,
    pub font_color: Color,
    pub font_family: String,
    pub y_axis_width_px: f64,
    pub x_axis_height_px: f64,
    pub unit_px: f64,
    pub line_width_px: f64,
    pub grid_fill: Color,
    pub grid_stroke: Color,
    pub highlight_fill: Color,
    pub highlight_stroke: Color,
    pub marker_color: Color,
    pub marker_shadow: ShadowStyle,
}

impl Default for StyleProperties {
    fn default() -> Self {
        Self {
            fill: Color::from_rgba8(0x18, 0x18, 0x18, 1.0),
            stroke: Color::from_rgba8(0, 189, 126, 0.3),
            font_color: Color::from_rgba8(235, 235, 235, 0.64),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            y_axis_width_px: 240.0,
            x_axis_height_px: 60.0,
            unit_px: 40.0,
            line_width_px: 1.5,
            grid_fill: Color::from_rgba8(0x28, 0x28, 0x28, 1.0),
            grid_stroke: Color::from_rgba8(0, 189, 126, 0.3),
            highlight_fill: Color::from_rgba8(0x30, 0x3a, 0x36, 1.0),
            highlight_stroke: Color::from_rgba8(0, 189, 126, 0.6),
            marker_color: Color::from_rgba8(255, 99, 71, 1.0),
            marker_shadow: ShadowStyle {
                color: Color::from_rgba8(0x18, 0x18, 0x18, 1.0),
                blur_px: 6.0,
                offset_x_px: -3.0,
                offset_y_px: 3.0,
            },
        }
    }
}

impl StyleOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays the set fields onto the defaults.
    #[must_use]
    pub fn resolve(&self) -> StyleProperties {
        let defaults = StyleProperties::default();
        let shadow = defaults.marker_shadow;
        StyleProperties {
            fill: self.fill.unwrap_or(defaults.fill),
            stroke: self.stroke.unwrap_or(defaults.stroke),
            font_color: self.font_color.unwrap_or(defaults.font_color),
            font_family: self
                .font_family
                .clone()
                .unwrap_or(defaults.font_family),
            y_axis_width_px: self.y_axis_width_px.unwrap_or(defaults.y_axis_width_px),
            x_axis_height_px: self.x_axis_height_px.unwrap_or(defaults.x_axis_height_px),
            unit_px: self.unit_px.unwrap_or(defaults.unit_px),
            line_width_px: self.line_width_px.unwrap_or(defaults.line_width_px),
            grid_fill: self.grid_fill.unwrap_or(defaults.grid_fill),
            grid_stroke: self.grid_stroke.unwrap_or(defaults.grid_stroke),
            highlight_fill: self.highlight_fill.unwrap_or(defaults.highlight_fill),
            highlight_stroke: self.highlight_stroke.unwrap_or(defaults.highlight_stroke),
            marker_color: self.marker_color.unwrap_or(defaults.marker_color),
            marker_shadow: ShadowStyle {
                color: self.marker_shadow_color.unwrap_or(shadow.color),
                blur_px: self.marker_shadow_blur_px.unwrap_or(shadow.blur_px),
                offset_x_px: self.marker_shadow_offset_x_px.unwrap_or(shadow.offset_x_px),
                offset_y_px: self.marker_shadow_offset_y_px.unwrap_or(shadow.offset_y_px),
            },
        }
    }

    /// Sets the pixel size of one grid cell.
    #[must_use]
    pub fn with_unit_px(mut self, unit_px: f64) -> Self {
        self.unit_px = Some(unit_px);
        self
    }

    /// Sets the widths of the location-name band and the date band.
    #[must_use]
    pub fn with_axis_bands_px(mut self, y_axis_width_px: f64, x_axis_height_px: f64) -> Self {
        self.y_axis_width_px = Some(y_axis_width_px);
        self.x_axis_height_px = Some(x_axis_height_px);
        self
    }

    #[must_use]
    pub fn with_line_width_px(mut self, line_width_px: f64) -> Self {
        self.line_width_px = Some(line_width_px);
        self
    }

    /// Sets the board background and outline colors.
    #[must_use]
    pub fn with_board_colors(mut self, fill: Color, stroke: Color) -> Self {
        self.fill = Some(fill);
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_grid_colors(mut self, fill: Color, stroke: Color) -> Self {
        self.grid_fill = Some(fill);
        self.grid_stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_highlight_colors(mut self, fill: Color, stroke: Color) -> Self {
        self.highlight_fill = Some(fill);
        self.highlight_stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn with_font(mut self, color: Color, family: impl Into<String>) -> Self {
        self.font_color = Some(color);
        self.font_family = Some(family.into());
        self
    }

    /// Sets the marker color used for operations without their own color.
    #[must_use]
    pub fn with_marker_color(mut self, color: Color) -> Self {
        self.marker_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_marker_shadow(mut self, shadow: ShadowStyle) -> Self {
        self.marker_shadow_color = Some(shadow.color);
        self.marker_shadow_blur_px = Some(shadow.blur_px);
        self.marker_shadow_offset_x_px = Some(shadow.offset_x_px);
        self.marker_shadow_offset_y_px = Some(shadow.offset_y_px);
        self
    }

    /// Serializes the overrides to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BoardError::InvalidData(format!("failed to serialize style: {e}")))
    }

    /// Deserializes overrides from JSON. Missing keys stay unset.
    pub fn from_json_str(input: &str) -> BoardResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| BoardError::InvalidData(format!("failed to parse style: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{StyleOptions, StyleProperties};
    use crate::render::Color;

    #[test]
    fn empty_options_resolve_to_defaults() {
        assert_eq!(StyleOptions::new().resolve(), StyleProperties::default());
    }

    #[test]
    fn set_fields_override_only_themselves() {
        let resolved = StyleOptions::new()
            .with_unit_px(32.0)
            .with_marker_color(Color::rgb(0.0, 0.0, 1.0))
            .resolve();
        let defaults = StyleProperties::default();

        assert_eq!(resolved.unit_px, 32.0);
        assert_eq!(resolved.marker_color, Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(resolved.y_axis_width_px, defaults.y_axis_width_px);
        assert_eq!(resolved.grid_fill, defaults.grid_fill);
        assert_eq!(resolved.marker_shadow, defaults.marker_shadow);
    }

    #[test]
    fn json_overrides_accept_css_colors_and_partial_keys() {
        let options = StyleOptions::from_json_str(
            r##"{ "unit_px": 24, "grid_fill": "#101010", "marker_shadow_blur_px": 0 }"##,
        )
        .expect("parse style");
        let resolved = options.resolve();

        assert_eq!(resolved.unit_px, 24.0);
        assert_eq!(resolved.grid_fill, Color::from_rgba8(0x10, 0x10, 0x10, 1.0));
        assert_eq!(resolved.marker_shadow.blur_px, 0.0);
        assert_eq!(resolved.x_axis_height_px, 60.0);

        let json = options.to_json_pretty().expect("serialize style");
        assert_eq!(StyleOptions::from_json_str(&json).expect("reparse"), options);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(StyleOptions::from_json_str(r#"{ "grid_fill": "not-a-color" }"#).is_err());
    }
}
