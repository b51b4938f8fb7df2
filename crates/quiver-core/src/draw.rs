//! Visual definitions for diagram elements.
//!
//! These types carry the paint and font attribute sets written by the
//! [`svg`](crate::svg) element emitters. They hold no geometry.
//!
//! - [`StrokeDefinition`] - stroke paint and width for lines and outlines
//! - [`ShapeDefinition`] - fill plus stroke for closed shapes
//! - [`TextDefinition`] - font, paint and alignment for text

mod shape;
mod stroke;
mod text;

pub use shape::ShapeDefinition;
pub use stroke::StrokeDefinition;
pub use text::{DominantBaseline, FontSize, FontWeight, ParseEnumError, TextAnchor, TextDefinition};
