//! Color utility functions shared across the crate.
//!
//! This module provides color parsing, conversion and generation utilities
//! used by the label mapping constructors and file formats.

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// An RGB color with channels in 0-255.
pub type Rgb = [u8; 3];

/// Color of the implicit background class.
pub const BACKGROUND: Rgb = [0, 0, 0];

/// Golden angle in degrees, used to rotate the starting hue between attempts.
const GOLDEN_ANGLE: f32 = 137.5;

/// Basic CSS color keywords accepted by [`parse_color`].
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("black", [0, 0, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("white", [255, 255, 255]),
    ("maroon", [128, 0, 0]),
    ("red", [255, 0, 0]),
    ("purple", [128, 0, 128]),
    ("fuchsia", [255, 0, 255]),
    ("magenta", [255, 0, 255]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("olive", [128, 128, 0]),
    ("yellow", [255, 255, 0]),
    ("navy", [0, 0, 128]),
    ("blue", [0, 0, 255]),
    ("teal", [0, 128, 128]),
    ("aqua", [0, 255, 255]),
    ("cyan", [0, 255, 255]),
    ("orange", [255, 165, 0]),
];

/// A color as written in configs and label files.
///
/// Either a string (`"#RGB"`, `"#RRGGBB"`, `"RRGGBB"` or a basic CSS color
/// name) or three numeric channels, integers in 0-255 or fractions in 0-1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex code or color name
    Text(String),
    /// Numeric channels
    Channels([f32; 3]),
}

impl From<&str> for ColorSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Rgb> for ColorSpec {
    fn from(color: Rgb) -> Self {
        Self::Channels(color.map(f32::from))
    }
}

impl From<[f32; 3]> for ColorSpec {
    fn from(channels: [f32; 3]) -> Self {
        Self::Channels(channels)
    }
}

/// Parse and validate a color specification into an RGB triple.
pub fn parse_color(spec: &ColorSpec) -> Result<Rgb, LabelError> {
    match spec {
        ColorSpec::Text(text) => parse_color_str(text),
        ColorSpec::Channels(channels) => parse_channels(channels),
    }
}

fn parse_color_str(text: &str) -> Result<Rgb, LabelError> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| invalid_color(text));
    }

    let lowered = trimmed.to_ascii_lowercase();
    if let Some((_, color)) = NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
        return Ok(*color);
    }

    // Bare hex without the leading '#'
    if trimmed.len() == 6 {
        return parse_hex(trimmed).ok_or_else(|| invalid_color(text));
    }

    Err(invalid_color(text))
}

/// Parse `RGB` or `RRGGBB` hex digits.
fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut color = BACKGROUND;
            for (channel, digit) in color.iter_mut().zip(hex.chars()) {
                let nibble = u8::try_from(digit.to_digit(16)?).ok()?;
                *channel = nibble * 17;
            }
            Some(color)
        }
        6 => {
            let mut color = BACKGROUND;
            for (index, channel) in color.iter_mut().enumerate() {
                *channel = u8::from_str_radix(&hex[index * 2..index * 2 + 2], 16).ok()?;
            }
            Some(color)
        }
        _ => None,
    }
}

fn parse_channels(channels: &[f32; 3]) -> Result<Rgb, LabelError> {
    if channels.iter().any(|value| !value.is_finite()) {
        return Err(LabelError::validation(format!(
            "Color channels must be finite numbers, got {:?}",
            channels
        )));
    }

    if is_integral(channels) {
        if channels.iter().any(|value| !(0.0..=255.0).contains(value)) {
            return Err(LabelError::validation(format!(
                "Integer color channels must be between 0 and 255, got {:?}",
                channels
            )));
        }
        Ok(channels.map(|value| value as u8))
    } else {
        if channels.iter().any(|value| !(0.0..=1.0).contains(value)) {
            return Err(LabelError::validation(format!(
                "Fractional color channels must be between 0 and 1, got {:?}",
                channels
            )));
        }
        Ok(channels.map(unit_to_channel))
    }
}

fn invalid_color(text: &str) -> LabelError {
    LabelError::validation(format!("Could not parse '{}' as a color", text))
}

/// Whether every value is a whole number.
pub fn is_integral(values: &[f32]) -> bool {
    values
        .iter()
        .all(|value| value.is_finite() && value.fract() == 0.0)
}

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

fn unit_to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Generate `count` visually distinct colors.
///
/// Hues are spaced evenly around the color wheel with alternating
/// brightness. `attempt` rotates the starting hue by the golden angle, so
/// callers can ask for a different palette of the same size.
pub fn distinct_colors(count: usize, attempt: u32) -> Vec<Rgb> {
    let offset = (attempt as f32 * GOLDEN_ANGLE) % 360.0;
    let step = 360.0 / count.max(1) as f32;

    (0..count)
        .map(|index| {
            let hue = (offset + index as f32 * step) % 360.0;
            let value = if index % 2 == 0 { 0.95 } else { 0.75 };
            let (r, g, b) = hsv_to_rgb(hue, 0.8, value);
            [unit_to_channel(r), unit_to_channel(g), unit_to_channel(b)]
        })
        .collect()
}
