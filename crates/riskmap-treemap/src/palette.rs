//! Colours for the map and its chrome.

use riskmap_core::{Color, SequentialScale};

/// Upper end of the height domain; taller subtrees clamp to the darkest
/// stop.
pub const HEIGHT_DOMAIN_MAX: f64 = 9.0;

/// Fill colours keyed by node height.
///
/// Leaves (height 0) get the lightest orange and colour deepens towards the
/// root. The mapping is a pure function of height, so identical trees paint
/// identically.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthPalette {
    scale: SequentialScale,
}

impl Default for DepthPalette {
    fn default() -> Self {
        Self {
            scale: SequentialScale::oranges((0.0, HEIGHT_DOMAIN_MAX)),
        }
    }
}

impl DepthPalette {
    /// Fill for a node of the given height.
    #[must_use]
    pub fn fill(&self, height: usize) -> Color {
        self.scale.sample(height as f64)
    }

    /// Readable text colour on top of `fill`.
    #[must_use]
    pub fn text_on(fill: Color) -> Color {
        if fill.luma() < 0.45 {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }
}

/// Title colour (`#DD6B20`).
#[must_use]
pub fn title_color() -> Color {
    Color::from_rgb8(0xDD, 0x6B, 0x20)
}

/// Hint and separator colour (`#666666`).
#[must_use]
pub fn muted_color() -> Color {
    Color::from_rgb8(0x66, 0x66, 0x66)
}
