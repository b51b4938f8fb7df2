//! Diagram source documents.
//!
//! A diagram is described in TOML. Shapes are declared with a unique name
//! and connectors refer to shapes by that name:
//!
//! ```toml
//! title = "Checkout"
//!
//! [[shapes]]
//! name = "cart"
//! kind = "rectangle"
//! x = 0
//! y = 0
//! width = 100
//! height = 50
//! label = "Cart"
//!
//! [[shapes]]
//! name = "pay"
//! kind = "rhombus"
//! x = 200
//! y = 0
//! width = 100
//! height = 50
//!
//! [[connectors]]
//! from = "cart"
//! to = "pay"
//! ```
//!
//! `width` and `height` at the top level set the initial canvas extent.
//! A shape without `label` is labelled with its name. A connector without
//! `kind` is an arrow.

use std::collections::HashMap;

use log::{debug, trace};
use serde::Deserialize;
use toml::Spanned;

use quiver_core::geometry::{Rect, Size};

use crate::{
    diagram::{ConnectorKind, Diagram, ShapeId, ShapeKind},
    error::{DiagramError, SourceError},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceDocument {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    width: Option<Spanned<f32>>,
    #[serde(default)]
    height: Option<Spanned<f32>>,
    #[serde(default)]
    shapes: Vec<ShapeEntry>,
    #[serde(default)]
    connectors: Vec<ConnectorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeEntry {
    name: Spanned<String>,
    kind: ShapeKind,
    x: Spanned<f32>,
    y: Spanned<f32>,
    width: Spanned<f32>,
    height: Spanned<f32>,
    #[serde(default)]
    label: Option<String>,
}

impl ShapeEntry {
    fn bounds(&self) -> Rect {
        Rect::new(
            *self.x.get_ref(),
            *self.y.get_ref(),
            *self.width.get_ref(),
            *self.height.get_ref(),
        )
    }

    /// Points at the first value that makes the bounds malformed.
    ///
    /// Falls back to `width` when every value is fine on its own but the far
    /// edge overflows.
    fn invalid_bounds(&self) -> SourceError {
        let fields = [
            ("x", &self.x, false),
            ("y", &self.y, false),
            ("width", &self.width, true),
            ("height", &self.height, true),
        ];
        let (field, span) = fields
            .into_iter()
            .find(|(_, value, is_size)| {
                let value = *value.get_ref();
                !value.is_finite() || (*is_size && value < 0.0)
            })
            .map_or(("width", self.width.span()), |(field, value, _)| {
                (field, value.span())
            });

        SourceError::InvalidBounds {
            name: self.name.get_ref().clone(),
            field,
            span,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectorEntry {
    from: Spanned<String>,
    to: Spanned<String>,
    #[serde(default)]
    kind: ConnectorKind,
}

/// Parses a TOML diagram source into a [`Diagram`].
///
/// Shapes are added in declaration order, so the first shape gets id 1.
/// `margin` is the canvas margin applied as shapes are added.
///
/// # Errors
///
/// Returns [`SourceError`] for malformed TOML, duplicate shape names,
/// invalid shape bounds and connectors naming undeclared shapes. Every
/// variant except some syntax errors carries the byte span of the offending
/// value.
///
/// # Examples
///
/// ```
/// # use quiver::source::parse;
/// let diagram = parse(
///     r#"
///     [[shapes]]
///     name = "a"
///     kind = "circle"
///     x = 0
///     y = 0
///     width = 40
///     height = 40
///     "#,
///     50.0,
/// )
/// .unwrap();
/// assert_eq!(diagram.shapes().len(), 1);
/// ```
pub fn parse(source: &str, margin: f32) -> Result<Diagram, SourceError> {
    let document: SourceDocument = toml::from_str(source)?;
    debug!(
        shapes_count = document.shapes.len(),
        connectors_count = document.connectors.len();
        "Diagram source read"
    );

    let extent = Size::new(
        canvas_dimension("width", document.width.as_ref())?,
        canvas_dimension("height", document.height.as_ref())?,
    );
    let mut diagram = Diagram::with_extent(extent).with_margin(margin);
    if let Some(title) = document.title {
        diagram.set_title(title);
    }

    let mut ids: HashMap<String, ShapeId> = HashMap::with_capacity(document.shapes.len());
    for entry in &document.shapes {
        let name = entry.name.get_ref();
        if ids.contains_key(name) {
            return Err(SourceError::DuplicateShape {
                name: name.clone(),
                span: entry.name.span(),
            });
        }

        let label = entry.label.as_deref().unwrap_or(name);
        let id = diagram
            .add_shape(entry.kind, entry.bounds(), label)
            .map_err(|err| {
                debug!(err:err, name; "Rejected shape");
                entry.invalid_bounds()
            })?;
        ids.insert(name.clone(), id);
    }

    for entry in &document.connectors {
        let source = resolve(&ids, &entry.from)?;
        let target = resolve(&ids, &entry.to)?;
        trace!(from = entry.from.get_ref(), to = entry.to.get_ref(); "Resolved connector");

        diagram
            .add_connector(source, target, entry.kind)
            .map_err(|err| match err {
                DiagramError::UnknownShape(id) if id == target => unknown_shape(&entry.to),
                _ => unknown_shape(&entry.from),
            })?;
    }

    Ok(diagram)
}

fn canvas_dimension(field: &'static str, value: Option<&Spanned<f32>>) -> Result<f32, SourceError> {
    let Some(value) = value else {
        return Ok(0.0);
    };
    let number = *value.get_ref();
    if number.is_finite() && number >= 0.0 {
        Ok(number)
    } else {
        Err(SourceError::InvalidCanvas {
            field,
            span: value.span(),
        })
    }
}

fn resolve(ids: &HashMap<String, ShapeId>, name: &Spanned<String>) -> Result<ShapeId, SourceError> {
    ids.get(name.get_ref())
        .copied()
        .ok_or_else(|| unknown_shape(name))
}

fn unknown_shape(name: &Spanned<String>) -> SourceError {
    SourceError::UnknownShape {
        name: name.get_ref().clone(),
        span: name.span(),
    }
}

#[cfg(test)]
mod tests {
    use quiver_core::geometry::Point;

    use super::*;

    const TWO_BOXES: &str = r#"
title = "Pipeline"

[[shapes]]
name = "a"
kind = "rectangle"
x = 0
y = 0
width = 100
height = 50
label = "Start"

[[shapes]]
name = "b"
kind = "parallelogram"
x = 200
y = 0
width = 100
height = 50

[[connectors]]
from = "a"
to = "b"
"#;

    #[test]
    fn test_parse_shapes_and_connectors() {
        let diagram = parse(TWO_BOXES, 50.0).unwrap();
        assert_eq!(diagram.title(), "Pipeline");

        let shapes: Vec<_> = diagram.shapes().collect();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].0.get(), 1);
        assert_eq!(shapes[0].1.label(), "Start");
        assert_eq!(shapes[1].1.kind(), ShapeKind::Parallelogram);
        assert_eq!(shapes[1].1.label(), "b");

        let connector = diagram.connectors()[0];
        assert_eq!(connector.source(), shapes[0].0);
        assert_eq!(connector.target(), shapes[1].0);
        assert_eq!(connector.kind(), ConnectorKind::Arrow);
        assert_eq!(diagram.extent(), Size::new(350.0, 100.0));
    }

    #[test]
    fn test_parse_extent_and_margin() {
        let source = r#"
width = 1024
height = 768

[[shapes]]
name = "a"
kind = "ellipse"
x = 1000
y = 0
width = 100
height = 50
"#;
        let diagram = parse(source, 10.0).unwrap();
        assert_eq!(diagram.extent(), Size::new(1110.0, 768.0));
    }

    #[test]
    fn test_line_connector_kind() {
        let source = format!("{TWO_BOXES}kind = \"line\"\n");
        let diagram = parse(&source, 50.0).unwrap();
        assert_eq!(diagram.connectors()[0].kind(), ConnectorKind::Line);
    }

    #[test]
    fn test_unknown_shape_reports_span() {
        let source = TWO_BOXES.replace("to = \"b\"", "to = \"c\"");
        let err = parse(&source, 50.0).unwrap_err();

        let SourceError::UnknownShape { name, span } = &err else {
            panic!("expected unknown shape error, got {err:?}");
        };
        assert_eq!(name, "c");
        assert_eq!(source[span.clone()].trim_matches('"'), "c");
    }

    #[test]
    fn test_duplicate_shape_rejected() {
        let source = TWO_BOXES.replace("name = \"b\"", "name = \"a\"");
        let err = parse(&source, 50.0).unwrap_err();
        assert!(matches!(err, SourceError::DuplicateShape { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_negative_size_points_at_value() {
        let source = TWO_BOXES.replace(
            "width = 100\nheight = 50\nlabel",
            "width = -1\nheight = 50\nlabel",
        );
        let err = parse(&source, 50.0).unwrap_err();

        let SourceError::InvalidBounds { name, field, span } = &err else {
            panic!("expected invalid bounds error, got {err:?}");
        };
        assert_eq!(name, "a");
        assert_eq!(*field, "width");
        assert_eq!(source[span.clone()].trim(), "-1");
    }

    #[test]
    fn test_non_finite_coordinate_points_at_value() {
        let source = TWO_BOXES.replace("x = 200", "x = nan");
        let err = parse(&source, 50.0).unwrap_err();

        let SourceError::InvalidBounds { name, field, span } = &err else {
            panic!("expected invalid bounds error, got {err:?}");
        };
        assert_eq!(name, "b");
        assert_eq!(*field, "x");
        assert_eq!(source[span.clone()].trim(), "nan");
    }

    #[test]
    fn test_invalid_canvas_size_rejected() {
        for (source, field, value) in [
            ("width = -10\nheight = 20", "width", "-10"),
            ("width = 10\nheight = inf", "height", "inf"),
            ("width = nan", "width", "nan"),
        ] {
            let err = parse(source, 50.0).unwrap_err();
            let SourceError::InvalidCanvas { field: actual, span } = &err else {
                panic!("expected invalid canvas error, got {err:?}");
            };
            assert_eq!(*actual, field);
            assert_eq!(source[span.clone()].trim(), value);
        }
    }

    #[test]
    fn test_unknown_kind_is_syntax_error() {
        let source = TWO_BOXES.replace("\"parallelogram\"", "\"hexagon\"");
        let err = parse(&source, 50.0).unwrap_err();
        assert!(matches!(err, SourceError::Syntax { .. }));
        assert!(err.span().is_some());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse("colour = \"red\"", 50.0).unwrap_err();
        assert!(matches!(err, SourceError::Syntax { .. }));
    }

    #[test]
    fn test_empty_source() {
        let diagram = parse("", 50.0).unwrap();
        assert!(diagram.is_empty());
        assert_eq!(diagram.extent(), Size::default());
    }

    #[test]
    fn test_parsed_shape_anchors() {
        let diagram = parse(TWO_BOXES, 50.0).unwrap();
        let (_, first) = diagram.shapes().next().unwrap();
        assert_eq!(first.anchors()[2], Point::new(100.0, 25.0));
    }
}
