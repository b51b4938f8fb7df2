//! SVG rendering for Quiver diagrams.
//!
//! This module turns a [`Diagram`] into one SVG document. It is the final
//! stage in the Quiver processing pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Source Text
//!     ↓ parse (source module)
//! Diagram (shapes, connectors, extent)
//!     ↓ route (routing module)
//! Anchor pairs
//!     ↓ render (this module)
//! SVG document
//! ```
//!
//! # Document Order
//!
//! Elements are written in a fixed order so the same diagram always renders
//! to the same bytes: the root element, the arrowhead definitions, the
//! background, the grid, each shape (outline, label, anchor markers), each
//! connector, the title and finally the border.

use std::io::{self, Write};

use log::{debug, error, info, trace};

use quiver_core::{
    color::Paint,
    draw::{
        DominantBaseline, FontSize, FontWeight, ShapeDefinition, StrokeDefinition, TextAnchor,
        TextDefinition,
    },
    markup::{Element, MarkupWriter},
    svg,
};

use crate::{
    config::{AppConfig, CanvasConfig},
    diagram::{ConnectorKind, Diagram, Shape, ShapeKind},
    error::{ConfigError, QuiverError},
    routing,
};

/// Radius of the circles marking shape anchors.
pub const ANCHOR_MARKER_RADIUS: f32 = 3.0;

/// Font size of the diagram title.
pub const TITLE_FONT_SIZE: f32 = 20.0;

/// Resolved paints and fonts used by the [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
struct Theme {
    background: Paint,
    grid: StrokeDefinition,
    border: StrokeDefinition,
    shape: ShapeDefinition,
    connector: StrokeDefinition,
    anchor: ShapeDefinition,
    label: TextDefinition,
    title: TextDefinition,
}

impl Default for Theme {
    fn default() -> Self {
        let mut label = TextDefinition::new();
        label.set_anchor(TextAnchor::Middle);
        label.set_baseline(DominantBaseline::Middle);

        let mut title = TextDefinition::new();
        title.set_font_size(FontSize::Absolute(TITLE_FONT_SIZE));
        title.set_font_weight(FontWeight::Bold);
        title.set_anchor(TextAnchor::Start);
        title.set_baseline(DominantBaseline::Hanging);

        Self {
            background: Paint::named("white"),
            grid: StrokeDefinition::new(Paint::named("whitesmoke"), 1.0),
            border: StrokeDefinition::default(),
            shape: ShapeDefinition::new(
                Paint::named("whitesmoke"),
                StrokeDefinition::new(Paint::named("black"), 3.0),
            ),
            connector: StrokeDefinition::default(),
            anchor: ShapeDefinition::default(),
            label,
            title,
        }
    }
}

impl Theme {
    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let style = config.style();
        let mut theme = Self::default();

        if let Some(paint) = style.background_color()? {
            theme.background = paint;
        }
        if let Some(paint) = style.grid_color()? {
            theme.grid.set_paint(paint);
        }
        if let Some(paint) = style.border_color()? {
            theme.border.set_paint(paint);
        }

        let mut shape_stroke = theme.shape.stroke().clone();
        if let Some(paint) = style.shape_stroke()? {
            shape_stroke.set_paint(paint);
        }
        if let Some(width) = style.shape_stroke_width()? {
            shape_stroke.set_width(width);
        }
        theme.shape.set_stroke(shape_stroke);
        if let Some(paint) = style.shape_fill()? {
            theme.shape.set_fill(paint);
        }

        if let Some(paint) = style.connector_color()? {
            theme.connector.set_paint(paint);
        }
        if let Some(width) = style.connector_stroke_width()? {
            theme.connector.set_width(width);
        }

        if let Some(paint) = style.anchor_color()? {
            theme.anchor.set_fill(paint);
        }

        if let Some(paint) = style.label_color()? {
            theme.label.set_fill(paint.clone());
            theme.title.set_fill(paint);
        }
        if let Some(size) = style.label_font_size()? {
            theme.label.set_font_size(FontSize::Absolute(size));
        }
        if let Some(family) = style.label_font_family() {
            theme.label.set_font_family(family);
            theme.title.set_font_family(family);
        }
        if let Some(weight) = style.label_font_weight()? {
            theme.label.set_font_weight(weight);
        }
        if let Some(size) = style.title_font_size()? {
            theme.title.set_font_size(FontSize::Absolute(size));
        }

        Ok(theme)
    }
}

/// Writes diagrams as SVG documents.
///
/// A renderer holds validated canvas settings and styling; it does not keep
/// any per-document state, so one renderer can write any number of
/// diagrams.
///
/// # Examples
///
/// ```
/// use quiver::diagram::{ConnectorKind, Diagram, ShapeKind};
/// use quiver::geometry::Rect;
/// use quiver::render::Renderer;
///
/// let mut diagram = Diagram::new();
/// let a = diagram.add_shape(ShapeKind::Rectangle, Rect::new(0.0, 0.0, 100.0, 50.0), "A").unwrap();
/// let b = diagram.add_shape(ShapeKind::Circle, Rect::new(200.0, 0.0, 50.0, 50.0), "B").unwrap();
/// diagram.add_connector(a, b, ConnectorKind::Arrow).unwrap();
///
/// let svg = Renderer::default().render_to_string(&diagram).unwrap();
/// assert!(svg.starts_with("<svg "));
/// assert!(svg.contains("marker-end=\"url(#arrowhead)\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    canvas: CanvasConfig,
    theme: Theme,
}

impl Renderer {
    /// Builds a renderer from configuration, validating every value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for invalid colors, font weights or
    /// non-positive sizes.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.canvas().validate()?;
        let theme = Theme::from_config(config)?;
        debug!("Renderer configured");

        Ok(Self {
            canvas: config.canvas().clone(),
            theme,
        })
    }

    /// Writes `diagram` to `sink` and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError::Io`] if writing fails and
    /// [`QuiverError::Diagram`] if a connector does not resolve.
    pub fn render<W: Write>(&self, diagram: &Diagram, sink: W) -> Result<W, QuiverError> {
        info!(
            shapes_count = diagram.shapes().len(),
            connectors_count = diagram.connectors().len();
            "Rendering diagram"
        );

        let mut writer = MarkupWriter::new(sink);
        self.write_document(&mut writer, diagram)?;

        let sink = match writer.finish() {
            Ok(sink) => sink,
            Err(err) => {
                error!(err:err; "Failed to write SVG document");
                return Err(QuiverError::Io(err));
            }
        };

        debug!("SVG document rendered");
        Ok(sink)
    }

    /// Renders `diagram` into a string.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError::Diagram`] if a connector does not resolve.
    pub fn render_to_string(&self, diagram: &Diagram) -> Result<String, QuiverError> {
        let bytes = self.render(diagram, Vec::new())?;
        // The markup writer only emits UTF-8 text.
        String::from_utf8(bytes)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
    }

    fn write_document<W: Write>(
        &self,
        writer: &mut MarkupWriter<W>,
        diagram: &Diagram,
    ) -> Result<(), QuiverError> {
        let extent = diagram.extent();
        let mut root = svg::open_document(writer, extent);

        svg::write_arrowhead_definitions(
            &mut root,
            self.canvas.arrowhead_length(),
            self.theme.connector.paint(),
        );
        svg::write_background(&mut root, &self.theme.background);
        svg::write_grid(
            &mut root,
            extent,
            self.canvas.grid_spacing(),
            &self.theme.grid,
        );

        for (id, shape) in diagram.shapes() {
            trace!(id:% = id, kind:% = shape.kind(); "Writing shape");
            self.write_shape(&mut root, shape);
        }

        for connector in diagram.connectors() {
            let route = routing::route(diagram, connector)?;
            match connector.kind() {
                ConnectorKind::Arrow => svg::write_arrow(
                    &mut root,
                    route.start(),
                    route.end(),
                    &self.theme.connector,
                    self.canvas.arrowhead_length(),
                ),
                ConnectorKind::Line => {
                    svg::write_line(&mut root, route.start(), route.end(), &self.theme.connector)
                }
            }
        }

        svg::write_title(&mut root, diagram.title(), &self.theme.title);
        svg::write_border(&mut root, extent, &self.theme.border);

        Ok(())
    }

    fn write_shape<W: Write>(&self, parent: &mut Element<'_, W>, shape: &Shape) {
        let bounds = shape.bounds();
        match shape.kind() {
            ShapeKind::Rectangle | ShapeKind::Rhombus | ShapeKind::Parallelogram => {
                if let Some(corners) = shape.corners() {
                    svg::write_polygon(parent, &corners, &self.theme.shape);
                }
            }
            ShapeKind::Ellipse => {
                if let Some(radii) = shape.radii() {
                    svg::write_ellipse(parent, bounds.center(), radii, &self.theme.shape);
                }
            }
            ShapeKind::Circle => {
                if let Some(radii) = shape.radii() {
                    svg::write_circle(parent, bounds.center(), radii.width(), &self.theme.shape);
                }
            }
        }

        if !shape.label().is_empty() {
            svg::write_text(parent, bounds.center(), &self.theme.label, shape.label());
        }

        if self.canvas.show_anchors() {
            for anchor in shape.anchors() {
                svg::write_circle(parent, anchor, ANCHOR_MARKER_RADIUS, &self.theme.anchor);
            }
        }
    }
}
