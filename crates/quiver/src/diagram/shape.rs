//! Shape kinds and their derived geometry.
//!
//! Every shape owns a caller-supplied bounding [`Rect`]. Anchors (the four
//! candidate connector endpoints) and outline corners are derived from the
//! kind and the bounds on demand and never stored.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use quiver_core::{
    draw::ParseEnumError,
    geometry::{Point, Rect, Size},
};

/// The closed set of shapes a diagram can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Rhombus,
    Parallelogram,
    Ellipse,
    Circle,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Rhombus => "rhombus",
            Self::Parallelogram => "parallelogram",
            Self::Ellipse => "ellipse",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "rhombus" => Ok(Self::Rhombus),
            "parallelogram" => Ok(Self::Parallelogram),
            "ellipse" => Ok(Self::Ellipse),
            "circle" => Ok(Self::Circle),
            _ => Err(ParseEnumError::new(
                "shape kind",
                s,
                "rectangle, rhombus, parallelogram, ellipse, circle",
            )),
        }
    }
}

/// A labelled shape placed at fixed bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    bounds: Rect,
    label: String,
}

impl Shape {
    pub fn new(kind: ShapeKind, bounds: Rect, label: impl Into<String>) -> Self {
        Self {
            kind,
            bounds,
            label: label.into(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the four connector anchors in left, top, right, bottom order.
    ///
    /// Rectangles, rhombi and ellipses use the midpoints of the bounding box
    /// edges. Parallelograms use the midpoints of their slanted outline.
    /// Circles use the circle inscribed in the bounds, whose diameter is the
    /// lesser of width and height.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quiver::diagram::{Shape, ShapeKind};
    /// # use quiver::geometry::{Point, Rect};
    /// let shape = Shape::new(ShapeKind::Rectangle, Rect::new(0.0, 0.0, 100.0, 50.0), "A");
    /// let [left, top, right, bottom] = shape.anchors();
    /// assert_eq!(left, Point::new(0.0, 25.0));
    /// assert_eq!(top, Point::new(50.0, 0.0));
    /// assert_eq!(right, Point::new(100.0, 25.0));
    /// assert_eq!(bottom, Point::new(50.0, 50.0));
    /// ```
    pub fn anchors(&self) -> [Point; 4] {
        match self.kind {
            ShapeKind::Rectangle | ShapeKind::Rhombus | ShapeKind::Ellipse => {
                edge_midpoints(self.bounds)
            }
            ShapeKind::Parallelogram => {
                let [top_left, top_right, bottom_right, bottom_left] =
                    parallelogram_corners(self.bounds);
                [
                    bottom_left.midpoint(top_left),
                    top_left.midpoint(top_right),
                    top_right.midpoint(bottom_right),
                    bottom_right.midpoint(bottom_left),
                ]
            }
            ShapeKind::Circle => {
                let center = self.bounds.center();
                let radius = circle_radius(self.bounds);
                [
                    Point::new(center.x() - radius, center.y()),
                    Point::new(center.x(), center.y() - radius),
                    Point::new(center.x() + radius, center.y()),
                    Point::new(center.x(), center.y() + radius),
                ]
            }
        }
    }

    /// Outline of the polygonal kinds, in drawing order.
    ///
    /// Returns `None` for ellipses and circles, which are drawn from a center
    /// and radii instead.
    pub fn corners(&self) -> Option<[Point; 4]> {
        match self.kind {
            ShapeKind::Rectangle => Some([
                self.bounds.min_point(),
                Point::new(self.bounds.max_x(), self.bounds.y()),
                self.bounds.max_point(),
                Point::new(self.bounds.x(), self.bounds.max_y()),
            ]),
            // The diamond's corners are the bounding box edge midpoints.
            ShapeKind::Rhombus => Some(edge_midpoints(self.bounds)),
            ShapeKind::Parallelogram => Some(parallelogram_corners(self.bounds)),
            ShapeKind::Ellipse | ShapeKind::Circle => None,
        }
    }

    /// Radii of the round kinds: the half extents for an ellipse, the
    /// inscribed radius on both axes for a circle.
    pub fn radii(&self) -> Option<Size> {
        match self.kind {
            ShapeKind::Ellipse => Some(Size::new(
                self.bounds.width() / 2.0,
                self.bounds.height() / 2.0,
            )),
            ShapeKind::Circle => {
                let radius = circle_radius(self.bounds);
                Some(Size::new(radius, radius))
            }
            ShapeKind::Rectangle | ShapeKind::Rhombus | ShapeKind::Parallelogram => None,
        }
    }
}

/// Left, top, right and bottom edge midpoints of `bounds`.
fn edge_midpoints(bounds: Rect) -> [Point; 4] {
    let center = bounds.center();
    [
        Point::new(bounds.x(), center.y()),
        Point::new(center.x(), bounds.y()),
        Point::new(bounds.max_x(), center.y()),
        Point::new(center.x(), bounds.max_y()),
    ]
}

/// Horizontal offset of a parallelogram's top edge relative to its bottom edge.
///
/// Half the height, capped at the width so the top edge never flips.
pub fn parallelogram_shear(bounds: Rect) -> f32 {
    (bounds.height() / 2.0).min(bounds.width())
}

/// Corners in top-left, top-right, bottom-right, bottom-left order.
fn parallelogram_corners(bounds: Rect) -> [Point; 4] {
    let shear = parallelogram_shear(bounds);
    [
        Point::new(bounds.x() + shear, bounds.y()),
        Point::new(bounds.max_x(), bounds.y()),
        Point::new(bounds.max_x() - shear, bounds.max_y()),
        Point::new(bounds.x(), bounds.max_y()),
    ]
}

fn circle_radius(bounds: Rect) -> f32 {
    bounds.width().min(bounds.height()) / 2.0
}
