use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serializes as a CSS color string so style files can use the same
/// notation the board's default theme is written in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a normalized alpha.
    #[must_use]
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)`
    /// and the named colors used by the board's palettes.
    pub fn parse_css(input: &str) -> BoardResult<Self> {
        let value = input.trim().to_ascii_lowercase();
        let parsed = if let Some(hex) = value.strip_prefix('#') {
            parse_hex(hex)
        } else if let Some(args) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
        {
            args.strip_suffix(')').and_then(parse_rgb_args)
        } else {
            named_color(&value)
        };

        let color = parsed
            .ok_or_else(|| BoardError::InvalidData(format!("unrecognized CSS color `{input}`")))?;
        color.validate()?;
        Ok(color)
    }

    pub fn validate(self) -> BoardResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(BoardError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css(s)
    }
}

impl TryFrom<String> for Color {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Channels closer than this to a whole 8-bit value are written as integers.
const CHANNEL_EPSILON: f64 = 1e-9;

impl fmt::Display for Color {
    /// Writes `rgba(r, g, b, a)`. Channels that are not whole 8-bit values
    /// keep their fraction so parsing the string gives the color back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rgba(")?;
        for channel in [self.red, self.green, self.blue] {
            let scaled = channel.clamp(0.0, 1.0) * 255.0;
            let rounded = scaled.round();
            if (scaled - rounded).abs() < CHANNEL_EPSILON {
                write!(f, "{rounded}, ")?;
            } else {
                write!(f, "{scaled}, ")?;
            }
        }
        write!(f, "{})", self.alpha)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |index: usize| u8::from_str_radix(hex.get(index..=index)?, 16).ok();
    let byte = |index: usize| u8::from_str_radix(hex.get(index..index + 2)?, 16).ok();

    match hex.len() {
        3 | 4 => {
            let alpha = if hex.len() == 4 {
                f64::from(nibble(3)? * 17) / 255.0
            } else {
                1.0
            };
            Some(Color::from_rgba8(
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
                alpha,
            ))
        }
        6 | 8 => {
            let alpha = if hex.len() == 8 {
                f64::from(byte(6)?) / 255.0
            } else {
                1.0
            };
            Some(Color::from_rgba8(byte(0)?, byte(2)?, byte(4)?, alpha))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }

    let channel = |raw: &str| -> Option<f64> {
        let value: f64 = raw.parse().ok()?;
        (0.0..=255.0).contains(&value).then_some(value / 255.0)
    };
    let alpha = match parts.get(3) {
        Some(raw) => match raw.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? / 100.0,
            None => raw.parse().ok()?,
        },
        None => 1.0,
    };

    Some(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn named_color(name: &str) -> Option<Color> {
    let (red, green, blue) = match name {
        "transparent" => return Some(Color::TRANSPARENT),
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "brown" => (165, 42, 42),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "navy" => (0, 0, 128),
        "olive" => (128, 128, 0),
        "teal" => (0, 128, 128),
        "tomato" => (255, 99, 71),
        "royalblue" => (65, 105, 225),
        "lightgreen" => (144, 238, 144),
        "crimson" => (220, 20, 60),
        "orchid" => (218, 112, 214),
        "gold" => (255, 215, 0),
        "orangered" => (255, 69, 0),
        "blueviolet" => (138, 43, 226),
        "rosybrown" => (188, 143, 143),
        "seagreen" => (46, 139, 87),
        "steelblue" => (70, 130, 180),
        "goldenrod" => (218, 165, 32),
        "darkgreen" => (0, 100, 0),
        "khaki" => (240, 230, 140),
        "sienna" => (160, 82, 45),
        "salmon" => (250, 128, 114),
        _ => return None,
    };
    Some(Color::from_rgba8(red, green, blue, 1.0))
}
