//! Fill and outline definition for closed shapes.

use crate::{color::Paint, draw::StrokeDefinition};

/// Visual definition of a closed shape: interior fill plus outline stroke.
///
/// Used for rectangles, polygon paths, circles and ellipses. The default
/// matches SVG's own behavior: black fill, no outline.
///
/// # Examples
///
/// ```
/// use quiver_core::color::Paint;
/// use quiver_core::draw::{ShapeDefinition, StrokeDefinition};
///
/// let shape = ShapeDefinition::new(
///     Paint::named("whitesmoke"),
///     StrokeDefinition::new(Paint::named("black"), 3.0),
/// );
/// assert_eq!(shape.fill().to_string(), "whitesmoke");
/// assert_eq!(shape.stroke().width(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDefinition {
    fill: Paint,
    stroke: StrokeDefinition,
}

impl ShapeDefinition {
    pub fn new(fill: Paint, stroke: StrokeDefinition) -> Self {
        Self { fill, stroke }
    }

    pub fn fill(&self) -> &Paint {
        &self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn set_fill(&mut self, fill: Paint) {
        self.fill = fill;
    }

    pub fn set_stroke(&mut self, stroke: StrokeDefinition) {
        self.stroke = stroke;
    }
}

impl Default for ShapeDefinition {
    fn default() -> Self {
        Self::new(Paint::named("black"), StrokeDefinition::none())
    }
}
