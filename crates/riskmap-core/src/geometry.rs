//! Geometric primitives: Point, Size, Rect.
//!
//! Rectangles are stored by their edges (`x0`, `y0`, `x1`, `y1`) because the
//! treemap tiler subdivides edges directly and rounds them to the raster grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grow each axis to at least `min`.
    #[must_use]
    pub fn at_least(&self, min: f64) -> Self {
        Self::new(self.width.max(min), self.height.max(min))
    }
}

/// An axis-aligned rectangle described by its edges.
///
/// `x0 <= x1` and `y0 <= y1` hold for every rectangle produced by
/// [`Rect::new`] and the shrinking helpers; a rectangle whose edges meet is
/// degenerate and has zero area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl Rect {
    /// Create a rectangle from its edges.
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Create from size at origin.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::from_origin_size(Point::ORIGIN, size)
    }

    /// Width (may be negative for an inverted rectangle).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height (may be negative for an inverted rectangle).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Area, clamped at zero for inverted rectangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// True when either side is not strictly positive.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside the rectangle (half-open on the far edges).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x0 && point.x < self.x1 && point.y >= self.y0 && point.y < self.y1
    }

    /// Check if `other` lies entirely inside this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }

    /// Shrink each edge independently.
    ///
    /// When the insets cross over on an axis, that axis collapses to the
    /// midpoint of the crossed edges instead of inverting.
    #[must_use]
    pub fn shrink(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let (x0, x1) = collapse(self.x0 + left, self.x1 - right);
        let (y0, y1) = collapse(self.y0 + top, self.y1 - bottom);
        Self::new(x0, y0, x1, y1)
    }

    /// Shrink all edges by the same amount.
    #[must_use]
    pub fn inset(&self, amount: f64) -> Self {
        self.shrink(amount, amount, amount, amount)
    }

    /// Snap every edge to the nearest integer.
    #[must_use]
    pub fn round(&self) -> Self {
        Self::new(
            self.x0.round(),
            self.y0.round(),
            self.x1.round(),
            self.y1.round(),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

fn collapse(lo: f64, hi: f64) -> (f64, f64) {
    if hi < lo {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_default() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_point_ops() {
        let p = Point::new(1.0, 2.0) + Point::new(3.0, 4.0);
        assert_eq!(p, Point::new(4.0, 6.0));
        assert_eq!(p - Point::new(4.0, 6.0), Point::ORIGIN);
    }

    #[test]
    fn test_size_at_least() {
        let s = Size::new(40.0, 300.0).at_least(100.0);
        assert_eq!(s, Size::new(100.0, 300.0));
    }

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(2.0, 3.0, 12.0, 8.0);
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 5.0);
        assert_eq!(r.area(), 50.0);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn test_rect_from_size() {
        let r = Rect::from_size(Size::new(800.0, 600.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_rect_shrink_collapses_to_midpoint() {
        let r = Rect::new(0.0, 0.0, 4.0, 40.0).shrink(3.0, 19.0, 3.0, 3.0);
        assert_eq!(r.x0, 2.0);
        assert_eq!(r.x1, 2.0);
        assert_eq!(r.y0, 19.0);
        assert_eq!(r.y1, 37.0);
        assert!(r.is_degenerate());
        assert_eq!(r.area(), 0.0);
    }

    #[test]
    fn test_rect_inset() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(1.0);
        assert_eq!(r, Rect::new(1.0, 1.0, 9.0, 9.0));
    }

    #[test]
    fn test_rect_round() {
        let r = Rect::new(0.4, 0.5, 10.49, 10.51).round();
        assert_eq!(r, Rect::new(0.0, 1.0, 10.0, 11.0));
    }

    #[test]
    fn test_rect_contains_point_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(&Point::new(0.0, 0.0)));
        assert!(r.contains_point(&Point::new(9.9, 9.9)));
        assert!(!r.contains_point(&Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(outer.contains_rect(&Rect::new(1.0, 1.0, 9.0, 9.0)));
        assert!(!outer.contains_rect(&Rect::new(1.0, 1.0, 11.0, 9.0)));
    }
}
