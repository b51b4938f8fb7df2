//! Path data construction for polygon outlines.

use std::fmt::Write;

use crate::{geometry::Point, markup::format_number};

/// Builder for the `d` attribute of an SVG `path`.
///
/// Only straight segments are supported: a move to the first point, a line
/// to each following point, and an optional closing command.
///
/// # Examples
///
/// ```
/// # use quiver_core::{geometry::Point, svg::PathData};
/// let d = PathData::polygon(&[
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(10.0, 5.0),
/// ]);
/// assert_eq!(d.as_str(), "M 0 0 L 10 0 L 10 5 Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathData {
    data: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a closed path through all points in order.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::new();
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                path.move_to(*point);
            } else {
                path.line_to(*point);
            }
        }
        if !points.is_empty() {
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.command('M', Some(point))
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.command('L', Some(point))
    }

    pub fn close(&mut self) -> &mut Self {
        self.command('Z', None)
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn command(&mut self, command: char, point: Option<Point>) -> &mut Self {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(command);
        if let Some(point) = point {
            // Writing to a String cannot fail.
            let _ = write!(
                self.data,
                " {} {}",
                format_number(point.x()),
                format_number(point.y())
            );
        }
        self
    }
}
