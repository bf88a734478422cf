//! Draw commands.
//!
//! Everything the treemap paints reduces to these primitives; a render
//! adapter replays them onto its own surface.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Regular (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f64,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Italic flag
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            italic: false,
        }
    }
}

impl TextStyle {
    /// Style with the given size and color.
    #[must_use]
    pub fn sized(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            ..Self::default()
        }
    }

    /// Switch to bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Switch to italic.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Drop shadow beneath a rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color
    pub color: Color,
    /// Blur radius (standard deviation)
    pub blur: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::new(0.0, 0.0, 0.0, 0.3),
            blur: 3.0,
        }
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Fill color
        fill: Color,
        /// Optional drop shadow
        shadow: Option<Shadow>,
    },

    /// Draw a single line of text, positioned at its baseline start
    Text {
        /// Text content
        content: String,
        /// Baseline start
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Restrict following commands to `bounds`
    PushClip {
        /// Clip bounds
        bounds: Rect,
    },

    /// Drop the most recent clip
    PopClip,
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, fill: Color) -> Self {
        Self::Rect {
            bounds,
            fill,
            shadow: None,
        }
    }

    /// Create a text command.
    #[must_use]
    pub fn text(content: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self::Text {
            content: content.into(),
            position,
            style,
        }
    }

    /// Text content, if this is a text command.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}
