//! Quiver Core Types and Writers
//!
//! This crate provides the foundational pieces for Quiver box-and-arrow
//! diagrams. It includes:
//!
//! - **Markup**: A streaming, scope-based XML writer ([`markup::MarkupWriter`])
//! - **SVG**: Element emitters built on the markup writer ([`svg`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Visual definitions for diagram elements ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod markup;
pub mod svg;
