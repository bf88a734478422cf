//! Core types for the riskmap treemap.
//!
//! This crate provides the primitives shared by the layout engine and any
//! render adapter:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] and the [`SequentialScale`] ramp
//! - Draw calls: [`DrawCommand`], consumed through the [`Canvas`] trait

mod canvas;
mod color;
mod draw;
mod geometry;

pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError, SequentialScale};
pub use draw::{DrawCommand, FontWeight, Shadow, TextStyle};
pub use geometry::{Point, Rect, Size};
