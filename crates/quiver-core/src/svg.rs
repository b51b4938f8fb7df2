//! SVG element vocabulary.
//!
//! Stateless emitters layered on the [`markup`](crate::markup) writer. Each
//! function opens one child scope (or a few, for the grid and the marker
//! definitions) on a parent [`Element`] and writes that element's attributes
//! in a fixed order. Attribute order is part of the output contract: two
//! renders of the same model are byte-identical.

mod path;

pub use path::PathData;

use std::io::Write;

use log::trace;

use crate::{
    color::Paint,
    draw::{ShapeDefinition, StrokeDefinition, TextDefinition},
    geometry::{Point, Rect, Size},
    markup::{Element, MarkupWriter, format_number},
};

/// SVG namespace written on the root element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Id of the shared arrowhead marker referenced by every arrow.
pub const ARROWHEAD_ID: &str = "arrowhead";

/// Offset of the diagram title from the top-left corner.
pub const TITLE_OFFSET: Point = Point::new(10.0, 10.0);

/// Below this source→target distance an arrow is drawn without shortening.
pub const MIN_ARROW_LENGTH: f32 = 0.001;

/// Opens the `svg` root element sized to the canvas.
pub fn open_document<W: Write>(writer: &mut MarkupWriter<W>, size: Size) -> Element<'_, W> {
    let mut root = writer.root("svg");
    root.write_attribute("width", size.width());
    root.write_attribute("height", size.height());
    root.write_attribute("version", "1.1");
    root.write_attribute("baseProfile", "full");
    root.write_attribute("xmlns", SVG_NAMESPACE);
    root
}

/// Writes the `defs` section holding the arrowhead marker.
///
/// The marker is an isosceles triangle `length` wide and `length` high,
/// referenced by [`write_arrow`] through `url(#arrowhead)`.
pub fn write_arrowhead_definitions<W: Write>(
    parent: &mut Element<'_, W>,
    length: f32,
    fill: &Paint,
) {
    let mut defs = parent.child("defs");

    let mut marker = defs.child("marker");
    marker.write_attribute("id", ARROWHEAD_ID);
    marker.write_attribute("markerWidth", length);
    marker.write_attribute("markerHeight", length);
    marker.write_attribute("refX", 0);
    marker.write_attribute("refY", length / 2.0);
    marker.write_attribute("orient", "auto");
    marker.write_attribute("markerUnits", "userSpaceOnUse");

    let points = format!(
        "0 0, {} {}, 0 {}",
        format_number(length),
        format_number(length / 2.0),
        format_number(length)
    );
    let mut polygon = marker.child("polygon");
    polygon.write_attribute("points", points);
    polygon.write_attribute("fill", fill);
}

/// Writes a full-canvas background rectangle.
pub fn write_background<W: Write>(parent: &mut Element<'_, W>, fill: &Paint) {
    let mut rect = parent.child("rect");
    rect.write_attribute("width", "100%");
    rect.write_attribute("height", "100%");
    rect.write_attribute("fill", fill);
}

/// Writes grid lines every `spacing` units, vertical lines first.
///
/// A non-positive or non-finite spacing writes no lines.
pub fn write_grid<W: Write>(
    parent: &mut Element<'_, W>,
    size: Size,
    spacing: f32,
    stroke: &StrokeDefinition,
) {
    if !(spacing.is_finite() && spacing > 0.0) {
        trace!(spacing; "Skipping grid with invalid spacing");
        return;
    }

    for x in grid_positions(size.width(), spacing) {
        write_line(
            parent,
            Point::new(x, 0.0),
            Point::new(x, size.height()),
            stroke,
        );
    }
    for y in grid_positions(size.height(), spacing) {
        write_line(
            parent,
            Point::new(0.0, y),
            Point::new(size.width(), y),
            stroke,
        );
    }
}

fn grid_positions(limit: f32, spacing: f32) -> impl Iterator<Item = f32> {
    (1..)
        .map(move |step| step as f32 * spacing)
        .take_while(move |position| *position <= limit)
}

/// Writes a full-canvas outline.
pub fn write_border<W: Write>(parent: &mut Element<'_, W>, size: Size, stroke: &StrokeDefinition) {
    let outline = ShapeDefinition::new(Paint::None, stroke.clone());
    write_rect(parent, Rect::from_top_left(Point::default(), size), &outline);
}

/// Writes a straight line between two points.
pub fn write_line<W: Write>(
    parent: &mut Element<'_, W>,
    start: Point,
    end: Point,
    stroke: &StrokeDefinition,
) {
    let mut line = parent.child("line");
    line.write_attribute("x1", start.x());
    line.write_attribute("y1", start.y());
    line.write_attribute("x2", end.x());
    line.write_attribute("y2", end.y());
    line.write_attribute("stroke", stroke.paint());
    line.write_attribute("stroke-width", stroke.width());
}

/// Writes a line ending in the shared arrowhead marker.
///
/// The end point is pulled back by `arrowhead_length` along the
/// start→end direction so the arrowhead tip lands on `end`.
pub fn write_arrow<W: Write>(
    parent: &mut Element<'_, W>,
    start: Point,
    end: Point,
    stroke: &StrokeDefinition,
    arrowhead_length: f32,
) {
    let end = shorten_end(start, end, arrowhead_length);

    let mut line = parent.child("line");
    line.write_attribute("x1", start.x());
    line.write_attribute("y1", start.y());
    line.write_attribute("x2", end.x());
    line.write_attribute("y2", end.y());
    line.write_attribute("stroke", stroke.paint());
    line.write_attribute("stroke-width", stroke.width());
    line.write_attribute("marker-end", format!("url(#{ARROWHEAD_ID})"));
}

/// Moves `end` towards `start` by `length`.
///
/// When the two points are closer than [`MIN_ARROW_LENGTH`] the direction is
/// undefined and `end` is returned unchanged.
pub fn shorten_end(start: Point, end: Point, length: f32) -> Point {
    let delta = end.sub_point(start);
    let distance = delta.hypot();
    if distance < MIN_ARROW_LENGTH {
        return end;
    }
    end.sub_point(delta.scale(length / distance))
}

/// Writes an axis-aligned rectangle.
pub fn write_rect<W: Write>(parent: &mut Element<'_, W>, rect: Rect, shape: &ShapeDefinition) {
    let mut element = parent.child("rect");
    element.write_attribute("x", rect.x());
    element.write_attribute("y", rect.y());
    element.write_attribute("width", rect.width());
    element.write_attribute("height", rect.height());
    element.write_attribute("stroke", shape.stroke().paint());
    element.write_attribute("fill", shape.fill());
    element.write_attribute("stroke-width", shape.stroke().width());
}

/// Writes a closed polygon as a `path` through the given corners.
pub fn write_polygon<W: Write>(
    parent: &mut Element<'_, W>,
    corners: &[Point],
    shape: &ShapeDefinition,
) {
    let data = PathData::polygon(corners);

    let mut element = parent.child("path");
    element.write_attribute("d", data.as_str());
    element.write_attribute("stroke", shape.stroke().paint());
    element.write_attribute("fill", shape.fill());
    element.write_attribute("stroke-width", shape.stroke().width());
}

pub fn write_circle<W: Write>(
    parent: &mut Element<'_, W>,
    center: Point,
    radius: f32,
    shape: &ShapeDefinition,
) {
    let mut element = parent.child("circle");
    element.write_attribute("cx", center.x());
    element.write_attribute("cy", center.y());
    element.write_attribute("r", radius);
    element.write_attribute("fill", shape.fill());
    element.write_attribute("stroke", shape.stroke().paint());
    element.write_attribute("stroke-width", shape.stroke().width());
}

pub fn write_ellipse<W: Write>(
    parent: &mut Element<'_, W>,
    center: Point,
    radii: Size,
    shape: &ShapeDefinition,
) {
    let mut element = parent.child("ellipse");
    element.write_attribute("cx", center.x());
    element.write_attribute("cy", center.y());
    element.write_attribute("rx", radii.width());
    element.write_attribute("ry", radii.height());
    element.write_attribute("fill", shape.fill());
    element.write_attribute("stroke", shape.stroke().paint());
    element.write_attribute("stroke-width", shape.stroke().width());
}

/// Writes a text element. The content is escaped.
pub fn write_text<W: Write>(
    parent: &mut Element<'_, W>,
    position: Point,
    definition: &TextDefinition,
    content: &str,
) {
    let mut text = parent.child("text");
    text.write_attribute("x", position.x());
    text.write_attribute("y", position.y());
    text.write_attribute("font-size", definition.font_size().to_string());
    text.write_attribute("font-family", definition.font_family());
    text.write_attribute("font-weight", definition.font_weight().as_str());
    text.write_attribute("text-anchor", definition.anchor().as_str());
    text.write_attribute("dominant-baseline", definition.baseline().as_str());
    text.write_attribute("fill", definition.fill());
    text.write_attribute("stroke", definition.stroke());
    text.write_text(content);
}

/// Writes the diagram title at [`TITLE_OFFSET`].
///
/// Nothing is written when `title` is empty.
pub fn write_title<W: Write>(parent: &mut Element<'_, W>, title: &str, definition: &TextDefinition) {
    if title.is_empty() {
        return;
    }
    write_text(parent, TITLE_OFFSET, definition, title);
}
