//! The shape registry.
//!
//! A [`Diagram`] owns every shape and connector of one drawing. Shapes get a
//! [`ShapeId`] on insertion and the canvas extent grows so that every shape
//! fits with a margin to spare. Nothing is ever removed.

mod shape;

pub use shape::{Shape, ShapeKind, parallelogram_shear};

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use serde::Deserialize;

use quiver_core::geometry::{Rect, Size};

use crate::error::DiagramError;

/// Space kept between the furthest shape edge and the canvas edge.
pub const DEFAULT_MARGIN: f32 = 50.0;

/// Identity of a shape within one [`Diagram`].
///
/// Ids start at 1 and increase with each insertion. They are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

impl ShapeId {
    pub(crate) fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a connector is drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// A line ending in the shared arrowhead marker.
    #[default]
    Arrow,
    /// A plain line without a marker.
    Line,
}

/// A directed connection from one shape to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    source: ShapeId,
    target: ShapeId,
    kind: ConnectorKind,
}

impl Connector {
    pub fn source(&self) -> ShapeId {
        self.source
    }

    pub fn target(&self) -> ShapeId {
        self.target
    }

    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }
}

/// Registry of shapes and connectors with an auto-growing canvas extent.
///
/// # Examples
///
/// ```
/// use quiver::diagram::{ConnectorKind, Diagram, ShapeKind};
/// use quiver::geometry::{Rect, Size};
///
/// let mut diagram = Diagram::new();
/// let a = diagram.add_shape(ShapeKind::Rectangle, Rect::new(0.0, 0.0, 100.0, 50.0), "A")?;
/// let b = diagram.add_shape(ShapeKind::Rectangle, Rect::new(200.0, 0.0, 100.0, 50.0), "B")?;
/// diagram.add_connector(a, b, ConnectorKind::Arrow)?;
///
/// assert_eq!(a.get(), 1);
/// assert_eq!(diagram.extent(), Size::new(350.0, 100.0));
/// # Ok::<(), quiver::DiagramError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Diagram {
    shapes: IndexMap<ShapeId, Shape>,
    connectors: Vec<Connector>,
    extent: Size,
    margin: f32,
    title: String,
    last_id: u32,
}

impl Diagram {
    /// Creates an empty diagram with a zero extent.
    pub fn new() -> Self {
        Self::with_extent(Size::default())
    }

    /// Creates an empty diagram whose extent starts at `extent`.
    ///
    /// The extent still grows as shapes are added; it never shrinks below
    /// the initial value.
    pub fn with_extent(extent: Size) -> Self {
        Self {
            shapes: IndexMap::new(),
            connectors: Vec::new(),
            extent,
            margin: DEFAULT_MARGIN,
            title: String::new(),
            last_id: 0,
        }
    }

    /// Replaces the margin used by subsequent insertions.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Adds a shape and returns its id, growing the extent to fit it.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::InvalidBounds`] if a coordinate is not finite
    /// or the size is negative. No id is consumed and the extent is left
    /// unchanged.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        bounds: Rect,
        label: impl Into<String>,
    ) -> Result<ShapeId, DiagramError> {
        if !bounds.is_well_formed() {
            return Err(DiagramError::InvalidBounds(bounds));
        }

        self.last_id += 1;
        let id = ShapeId::new(self.last_id);
        let shape = Shape::new(kind, bounds, label);

        self.grow_extent(bounds);
        trace!(id:% = id, kind:% = kind, label = shape.label(); "Added shape");

        self.shapes.insert(id, shape);
        Ok(id)
    }

    /// Adds a connector between two existing shapes.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::UnknownShape`] if either id does not belong to
    /// a shape of this diagram. The diagram is left unchanged.
    pub fn add_connector(
        &mut self,
        source: ShapeId,
        target: ShapeId,
        kind: ConnectorKind,
    ) -> Result<(), DiagramError> {
        for id in [source, target] {
            if !self.shapes.contains_key(&id) {
                return Err(DiagramError::UnknownShape(id));
            }
        }

        trace!(source:% = source, target:% = target; "Added connector");
        self.connectors.push(Connector {
            source,
            target,
            kind,
        });
        Ok(())
    }

    /// Sets the title drawn in the top-left corner. An empty title is not
    /// drawn.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Iterates shapes in insertion order.
    pub fn shapes(&self) -> impl ExactSizeIterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    /// Connectors in insertion order.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn extent(&self) -> Size {
        self.extent
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Grows the extent when `bounds` reaches into the margin.
    ///
    /// Compared as `edge + margin > extent` rather than
    /// `edge > extent - margin` so rounding can never shrink the extent.
    fn grow_extent(&mut self, bounds: Rect) {
        let required_width = bounds.max_x() + self.margin;
        let required_height = bounds.max_y() + self.margin;

        let mut extent = self.extent;
        if required_width > extent.width() {
            extent = Size::new(required_width, extent.height());
        }
        if required_height > extent.height() {
            extent = Size::new(extent.width(), required_height);
        }
        self.extent = extent;
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect::new(x, y, width, height)
    }

    #[test]
    fn test_empty_diagram() {
        let diagram = Diagram::new();
        assert!(diagram.is_empty());
        assert_eq!(diagram.extent(), Size::default());
        assert_eq!(diagram.connectors().len(), 0);
        assert_eq!(diagram.title(), "");
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut diagram = Diagram::new();
        let ids: Vec<u32> = (0..4)
            .map(|i| {
                diagram
                    .add_shape(ShapeKind::Circle, rect(i as f32, 0.0, 10.0, 10.0), "")
                    .unwrap()
                    .get()
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ids_are_scoped_to_diagram() {
        let mut first = Diagram::new();
        let mut second = Diagram::new();
        first.add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 1.0, 1.0), "").unwrap();
        let id = second.add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 1.0, 1.0), "").unwrap();
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn test_shapes_in_insertion_order() {
        let mut diagram = Diagram::new();
        let b = diagram.add_shape(ShapeKind::Rectangle, rect(100.0, 0.0, 10.0, 10.0), "B").unwrap();
        let a = diagram.add_shape(ShapeKind::Ellipse, rect(0.0, 0.0, 10.0, 10.0), "A").unwrap();

        let labels: Vec<&str> = diagram.shapes().map(|(_, shape)| shape.label()).collect();
        assert_eq!(labels, vec!["B", "A"]);
        assert_eq!(diagram.shape(a).map(Shape::kind), Some(ShapeKind::Ellipse));
        assert_eq!(diagram.shape(b).map(Shape::label), Some("B"));
    }

    #[test]
    fn test_extent_grows_with_margin() {
        let mut diagram = Diagram::new();
        diagram.add_shape(ShapeKind::Rectangle, rect(50.0, 50.0, 300.0, 50.0), "").unwrap();
        assert_eq!(diagram.extent(), Size::new(400.0, 150.0));

        diagram.add_shape(ShapeKind::Rectangle, rect(100.0, 200.0, 50.0, 50.0), "").unwrap();
        assert_eq!(diagram.extent(), Size::new(400.0, 300.0));
    }

    #[test]
    fn test_extent_is_idempotent() {
        let mut diagram = Diagram::new();
        let bounds = rect(10.0, 20.0, 30.0, 40.0);
        diagram.add_shape(ShapeKind::Rhombus, bounds, "").unwrap();
        let extent = diagram.extent();
        diagram.add_shape(ShapeKind::Rhombus, bounds, "").unwrap();
        assert_eq!(diagram.extent(), extent);
    }

    #[test]
    fn test_initial_extent_is_kept() {
        let mut diagram = Diagram::with_extent(Size::new(1024.0, 768.0));
        diagram.add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 100.0, 100.0), "").unwrap();
        assert_eq!(diagram.extent(), Size::new(1024.0, 768.0));

        diagram.add_shape(ShapeKind::Rectangle, rect(1000.0, 0.0, 100.0, 100.0), "").unwrap();
        assert_approx_eq!(f32, diagram.extent().width(), 1150.0);
        assert_approx_eq!(f32, diagram.extent().height(), 768.0);
    }

    #[test]
    fn test_custom_margin() {
        let mut diagram = Diagram::new().with_margin(10.0);
        diagram.add_shape(ShapeKind::Circle, rect(0.0, 0.0, 20.0, 20.0), "").unwrap();
        assert_eq!(diagram.extent(), Size::new(30.0, 30.0));
        assert_approx_eq!(f32, diagram.margin(), 10.0);
    }

    #[test]
    fn test_add_connector() {
        let mut diagram = Diagram::new();
        let a = diagram.add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 10.0, 10.0), "").unwrap();
        let b = diagram.add_shape(ShapeKind::Rectangle, rect(50.0, 0.0, 10.0, 10.0), "").unwrap();

        diagram.add_connector(a, b, ConnectorKind::Arrow).unwrap();
        diagram.add_connector(b, a, ConnectorKind::Line).unwrap();

        let connectors = diagram.connectors();
        assert_eq!(connectors.len(), 2);
        assert_eq!(connectors[0].source(), a);
        assert_eq!(connectors[0].target(), b);
        assert_eq!(connectors[1].kind(), ConnectorKind::Line);
    }

    #[test]
    fn test_add_connector_rejects_unknown_id() {
        let mut diagram = Diagram::new();
        let a = diagram.add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 10.0, 10.0), "").unwrap();

        let err = diagram
            .add_connector(a, ShapeId::new(42), ConnectorKind::Arrow)
            .unwrap_err();
        assert_eq!(err, DiagramError::UnknownShape(ShapeId::new(42)));

        let err = diagram
            .add_connector(ShapeId::new(0), a, ConnectorKind::Arrow)
            .unwrap_err();
        assert_eq!(err, DiagramError::UnknownShape(ShapeId::new(0)));
        assert!(diagram.connectors().is_empty());
    }

    #[test]
    fn test_self_connector_is_allowed() {
        let mut diagram = Diagram::new();
        let a = diagram.add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 10.0, 10.0), "").unwrap();
        assert!(diagram.add_connector(a, a, ConnectorKind::Arrow).is_ok());
    }

    #[test]
    fn test_add_shape_rejects_malformed_bounds() {
        let mut diagram = Diagram::new();
        for bounds in [
            rect(f32::NAN, 0.0, 100.0, 50.0),
            rect(0.0, f32::INFINITY, 100.0, 50.0),
            rect(300.0, 0.0, -200.0, 50.0),
            rect(0.0, 0.0, 10.0, f32::NAN),
        ] {
            let err = diagram
                .add_shape(ShapeKind::Rectangle, bounds, "")
                .unwrap_err();
            assert!(matches!(err, DiagramError::InvalidBounds(_)));
        }

        assert!(diagram.is_empty());
        assert_eq!(diagram.extent(), Size::default());

        let id = diagram
            .add_shape(ShapeKind::Rectangle, rect(0.0, 0.0, 10.0, 10.0), "")
            .unwrap();
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn test_zero_sized_shape_is_accepted() {
        let mut diagram = Diagram::new();
        assert!(
            diagram
                .add_shape(ShapeKind::Circle, rect(-10.0, -10.0, 0.0, 0.0), "")
                .is_ok()
        );
    }

    #[test]
    fn test_shape_id_display() {
        assert_eq!(ShapeId::new(3).to_string(), "3");
    }
}
