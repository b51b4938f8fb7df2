//! Stroke definitions for lines and outlines.
//!
//! A [`StrokeDefinition`] pairs a [`Paint`] with a stroke width and maps to
//! the SVG `stroke` and `stroke-width` attributes.

use crate::color::Paint;

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use quiver_core::color::Paint;
/// use quiver_core::draw::StrokeDefinition;
///
/// // Default stroke (black, 1px)
/// let stroke = StrokeDefinition::default();
/// assert_eq!(stroke.paint().to_string(), "black");
///
/// let mut stroke = StrokeDefinition::new(Paint::named("navy"), 3.0);
/// stroke.set_width(2.0);
/// assert_eq!(stroke.width(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    paint: Paint,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given paint and width.
    pub fn new(paint: Paint, width: f32) -> Self {
        Self { paint, width }
    }

    /// A stroke that paints nothing (`stroke="none"`), 1px wide.
    pub fn none() -> Self {
        Self::new(Paint::None, 1.0)
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = paint;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Returns a copy of this stroke with a different paint.
    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Paint::named("black"), 1.0)
    }
}
