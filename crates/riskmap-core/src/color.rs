//! Color representation and sequential color scales.

use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a hex color string (e.g., "#dd6b20" or "dd6b20").
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength);
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or(ColorParseError::InvalidHex)
        };
        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Perceived lightness proxy (Rec. 709 luma of the gamma-encoded channels).
    #[must_use]
    pub fn luma(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Invalid hex characters
    InvalidHex,
    /// Invalid string length
    InvalidLength,
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex => write!(f, "invalid hex characters"),
            Self::InvalidLength => write!(f, "invalid hex string length (expected 6)"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// A piecewise-linear color ramp over a numeric domain.
///
/// Sampling is a pure function of the input, so identical inputs always map
/// to identical colors.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialScale {
    stops: Vec<Color>,
    domain: (f64, f64),
}

/// ColorBrewer "Oranges", light to dark.
const ORANGES: [(u8, u8, u8); 9] = [
    (0xff, 0xf5, 0xeb),
    (0xfe, 0xe6, 0xce),
    (0xfd, 0xd0, 0xa2),
    (0xfd, 0xae, 0x6b),
    (0xfd, 0x8d, 0x3c),
    (0xf1, 0x69, 0x13),
    (0xd9, 0x48, 0x01),
    (0xa6, 0x36, 0x03),
    (0x7f, 0x27, 0x04),
];

impl SequentialScale {
    /// Create a scale from color stops spread evenly over `domain`.
    #[must_use]
    pub fn new(stops: Vec<Color>, domain: (f64, f64)) -> Self {
        Self { stops, domain }
    }

    /// The light-to-dark orange ramp.
    #[must_use]
    pub fn oranges(domain: (f64, f64)) -> Self {
        let stops = ORANGES
            .iter()
            .map(|&(r, g, b)| Color::from_rgb8(r, g, b))
            .collect();
        Self::new(stops, domain)
    }

    /// Sample the scale; values outside the domain clamp to the end stops.
    #[must_use]
    pub fn sample(&self, value: f64) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::WHITE;
        };
        if self.stops.len() == 1 {
            return *first;
        }
        let (lo, hi) = self.domain;
        let span = hi - lo;
        let t = if span == 0.0 {
            0.0
        } else {
            ((value - lo) / span).clamp(0.0, 1.0)
        };

        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let segment = (scaled.floor() as usize).min(segments - 1);
        let local = (scaled - segment as f64) as f32;
        self.stops[segment].lerp(&self.stops[segment + 1], local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_clamps_values() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#dd6b20").unwrap();
        assert_eq!(c.to_hex(), "#dd6b20");
        assert!(Color::from_hex("zz0000").is_err());
        assert_eq!(
            Color::from_hex("#fff").unwrap_err(),
            ColorParseError::InvalidLength
        );
    }

    #[test]
    fn test_color_parse_error_display() {
        assert_eq!(
            ColorParseError::InvalidHex.to_string(),
            "invalid hex characters"
        );
    }

    #[test]
    fn test_color_lerp_endpoints() {
        let mid = Color::BLACK.lerp(&Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert_eq!(Color::BLACK.lerp(&Color::WHITE, 2.0), Color::WHITE);
    }

    #[test]
    fn test_oranges_endpoints() {
        let scale = SequentialScale::oranges((0.0, 9.0));
        assert_eq!(scale.sample(0.0).to_hex(), "#fff5eb");
        assert_eq!(scale.sample(9.0).to_hex(), "#7f2704");
        assert_eq!(scale.sample(-3.0), scale.sample(0.0));
        assert_eq!(scale.sample(42.0), scale.sample(9.0));
    }

    #[test]
    fn test_oranges_darkens_monotonically() {
        let scale = SequentialScale::oranges((0.0, 9.0));
        let lumas: Vec<f32> = (0..=9).map(|h| scale.sample(f64::from(h)).luma()).collect();
        for pair in lumas.windows(2) {
            assert!(pair[1] < pair[0], "luma must decrease: {lumas:?}");
        }
    }

    #[test]
    fn test_scale_degenerate_inputs() {
        assert_eq!(
            SequentialScale::new(Vec::new(), (0.0, 1.0)).sample(0.5),
            Color::WHITE
        );
        let single = SequentialScale::new(vec![Color::BLACK], (0.0, 1.0));
        assert_eq!(single.sample(0.7), Color::BLACK);
        let flat = SequentialScale::oranges((3.0, 3.0));
        assert_eq!(flat.sample(3.0).to_hex(), "#fff5eb");
    }
}
