//! Example: Building a diagram through the registry API
//!
//! This example demonstrates how to place shapes and connectors directly,
//! without a TOML source, and print the rendered SVG to stdout.

use std::io;

use quiver::{
    Diagram, DiagramBuilder,
    diagram::{ConnectorKind, ShapeKind},
    geometry::{Rect, Size},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut diagram = Diagram::with_extent(Size::new(1024.0, 768.0));
    diagram.set_title("Request handling");

    let client = diagram.add_shape(
        ShapeKind::Rectangle,
        Rect::new(50.0, 50.0, 300.0, 50.0),
        "Client",
    )?;
    let check = diagram.add_shape(
        ShapeKind::Rhombus,
        Rect::new(450.0, 150.0, 150.0, 100.0),
        "Cached?",
    )?;
    let cache = diagram.add_shape(
        ShapeKind::Circle,
        Rect::new(750.0, 150.0, 100.0, 100.0),
        "Cache",
    )?;
    let backend = diagram.add_shape(
        ShapeKind::Parallelogram,
        Rect::new(400.0, 350.0, 250.0, 80.0),
        "Backend",
    )?;
    let store = diagram.add_shape(
        ShapeKind::Ellipse,
        Rect::new(425.0, 520.0, 200.0, 80.0),
        "Store",
    )?;

    diagram.add_connector(client, check, ConnectorKind::Arrow)?;
    diagram.add_connector(check, cache, ConnectorKind::Arrow)?;
    diagram.add_connector(check, backend, ConnectorKind::Arrow)?;
    diagram.add_connector(backend, store, ConnectorKind::Line)?;

    let stdout = io::stdout().lock();
    DiagramBuilder::default().render_to(&diagram, stdout)?;

    Ok(())
}
