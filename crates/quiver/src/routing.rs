//! Connector routing.
//!
//! A connector runs between the closest pair of anchors of its two shapes.
//! Each shape has four anchors, so routing compares sixteen candidate pairs.

use log::trace;

use quiver_core::geometry::Point;

use crate::{
    diagram::{Connector, Diagram, Shape},
    error::DiagramError,
};

/// Endpoints chosen for one connector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    start: Point,
    end: Point,
}

impl Route {
    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Picks the anchor pair with the smallest Euclidean distance.
///
/// Source anchors form the outer loop and target anchors the inner loop,
/// both in left, top, right, bottom order. On ties the first pair found
/// wins.
///
/// # Examples
///
/// ```
/// # use quiver::diagram::{Shape, ShapeKind};
/// # use quiver::geometry::{Point, Rect};
/// # use quiver::routing::nearest_anchors;
/// let a = Shape::new(ShapeKind::Rectangle, Rect::new(0.0, 0.0, 100.0, 50.0), "A");
/// let b = Shape::new(ShapeKind::Rectangle, Rect::new(200.0, 0.0, 100.0, 50.0), "B");
/// let route = nearest_anchors(&a, &b);
/// assert_eq!(route.start(), Point::new(100.0, 25.0));
/// assert_eq!(route.end(), Point::new(200.0, 25.0));
/// ```
pub fn nearest_anchors(source: &Shape, target: &Shape) -> Route {
    let source_anchors = source.anchors();
    let target_anchors = target.anchors();

    let mut best = Route {
        start: source_anchors[0],
        end: target_anchors[0],
    };
    let mut best_distance = f32::INFINITY;

    for start in source_anchors {
        for end in target_anchors {
            let distance = start.distance(end);
            if distance < best_distance {
                best_distance = distance;
                best = Route { start, end };
            }
        }
    }

    best
}

/// Routes a connector of `diagram`.
///
/// # Errors
///
/// Returns [`DiagramError::UnknownShape`] if an endpoint id is not part of
/// `diagram`. Connectors added through [`Diagram::add_connector`] always
/// resolve.
pub fn route(diagram: &Diagram, connector: &Connector) -> Result<Route, DiagramError> {
    let source = diagram
        .shape(connector.source())
        .ok_or(DiagramError::UnknownShape(connector.source()))?;
    let target = diagram
        .shape(connector.target())
        .ok_or(DiagramError::UnknownShape(connector.target()))?;

    let route = nearest_anchors(source, target);
    trace!(
        source:% = connector.source(),
        target:% = connector.target(),
        start:? = route.start(),
        end:? = route.end();
        "Routed connector"
    );
    Ok(route)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::diagram::ShapeKind;
    use quiver_core::geometry::Rect;

    // =========================================================================
    // Strategies
    // =========================================================================

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        let kind = prop_oneof![
            Just(ShapeKind::Rectangle),
            Just(ShapeKind::Rhombus),
            Just(ShapeKind::Parallelogram),
            Just(ShapeKind::Ellipse),
            Just(ShapeKind::Circle),
        ];
        (
            kind,
            -500.0f32..500.0,
            -500.0f32..500.0,
            1.0f32..200.0,
            1.0f32..200.0,
        )
            .prop_map(|(kind, x, y, width, height)| {
                Shape::new(kind, Rect::new(x, y, width, height), "")
            })
    }

    // =========================================================================
    // Checks
    // =========================================================================

    fn check_route_is_minimal(source: &Shape, target: &Shape) -> Result<(), TestCaseError> {
        let route = nearest_anchors(source, target);
        let chosen = route.length();

        for start in source.anchors() {
            for end in target.anchors() {
                prop_assert!(chosen <= start.distance(end));
            }
        }
        Ok(())
    }

    fn check_route_endpoints_are_anchors(
        source: &Shape,
        target: &Shape,
    ) -> Result<(), TestCaseError> {
        let route = nearest_anchors(source, target);
        prop_assert!(source.anchors().contains(&route.start()));
        prop_assert!(target.anchors().contains(&route.end()));
        Ok(())
    }

    fn check_route_is_symmetric_in_length(
        source: &Shape,
        target: &Shape,
    ) -> Result<(), TestCaseError> {
        let forward = nearest_anchors(source, target);
        let backward = nearest_anchors(target, source);
        prop_assert!((forward.length() - backward.length()).abs() < 1e-3);
        Ok(())
    }

    // =========================================================================
    // Tests
    // =========================================================================

    proptest! {
        #[test]
        fn route_is_minimal(source in shape_strategy(), target in shape_strategy()) {
            check_route_is_minimal(&source, &target)?;
        }

        #[test]
        fn route_endpoints_are_anchors(source in shape_strategy(), target in shape_strategy()) {
            check_route_endpoints_are_anchors(&source, &target)?;
        }

        #[test]
        fn route_is_symmetric_in_length(source in shape_strategy(), target in shape_strategy()) {
            check_route_is_symmetric_in_length(&source, &target)?;
        }
    }
}
