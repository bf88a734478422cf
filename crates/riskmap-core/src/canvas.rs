//! The draw-call sink consumed by render adapters.

use crate::draw::{DrawCommand, Shadow, TextStyle};
use crate::{Color, Point, Rect};

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a filled rectangle with a drop shadow.
    fn fill_rect_shadowed(&mut self, rect: Rect, color: Color, shadow: &Shadow) {
        let _ = shadow;
        self.fill_rect(rect, color);
    }

    /// Draw a line of text at a baseline position.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Push a clip region.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (hand the command list to another process)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of clips pushed and not yet popped.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// All recorded text, in paint order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::as_text).collect()
    }

    /// Number of rectangles recorded.
    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::filled_rect(rect, color));
    }

    fn fill_rect_shadowed(&mut self, rect: Rect, color: Color, shadow: &Shadow) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            fill: color,
            shadow: Some(shadow.clone()),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands
            .push(DrawCommand::text(text, position, style.clone()));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip { bounds: rect });
    }

    fn pop_clip(&mut self) {
        // Unbalanced pops are ignored rather than recorded.
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.commands.push(DrawCommand::PopClip);
        }
    }
}
