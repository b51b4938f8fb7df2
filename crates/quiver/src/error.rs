//! Error types for Quiver operations.
//!
//! This module provides the main error type [`QuiverError`] which wraps
//! the error conditions that can occur while loading, building and
//! rendering a diagram.

use std::{io, ops::Range};

use thiserror::Error;

use quiver_core::{color::ColorError, draw::ParseEnumError, geometry::Rect};

use crate::diagram::ShapeId;

/// The main error type for Quiver operations.
///
/// # Diagnostic Variants
///
/// The `Source` variant carries the diagram source text alongside the
/// structured error so callers can render the offending span.
#[derive(Debug, Error)]
pub enum QuiverError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Source { err: SourceError, src: String },

    #[error("Diagram error: {0}")]
    Diagram(#[from] DiagramError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl QuiverError {
    /// Create a new `Source` error with the associated source text.
    pub fn new_source_error(err: SourceError, src: impl Into<String>) -> Self {
        Self::Source {
            err,
            src: src.into(),
        }
    }
}

/// Errors raised while mutating a [`Diagram`](crate::Diagram).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramError {
    #[error("connector references unknown shape {0}")]
    UnknownShape(ShapeId),

    #[error("shape bounds need finite coordinates and a non-negative size, got {0:?}")]
    InvalidBounds(Rect),
}

/// Errors raised while reading a diagram source document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("invalid diagram source: {message}")]
    Syntax {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("unknown shape `{name}`")]
    UnknownShape { name: String, span: Range<usize> },

    #[error("shape `{name}` is declared more than once")]
    DuplicateShape { name: String, span: Range<usize> },

    #[error("shape `{name}` has an invalid `{field}`: coordinates must be finite and sizes non-negative")]
    InvalidBounds {
        name: String,
        field: &'static str,
        span: Range<usize>,
    },

    #[error("canvas `{field}` must be a finite, non-negative number")]
    InvalidCanvas {
        field: &'static str,
        span: Range<usize>,
    },
}

impl SourceError {
    /// Byte range of the source text the error points at, if known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Syntax { span, .. } => span.clone(),
            Self::UnknownShape { span, .. }
            | Self::DuplicateShape { span, .. }
            | Self::InvalidBounds { span, .. }
            | Self::InvalidCanvas { span, .. } => Some(span.clone()),
        }
    }

    /// Short label for the span, suitable for a diagnostic annotation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "here",
            Self::UnknownShape { .. } => "not a declared shape",
            Self::DuplicateShape { .. } => "declared again here",
            Self::InvalidBounds { .. } | Self::InvalidCanvas { .. } => "invalid value",
        }
    }
}

impl From<toml::de::Error> for SourceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Syntax {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

/// Invalid values found while building a renderer from configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {source}")]
    Color {
        field: &'static str,
        #[source]
        source: ColorError,
    },

    #[error("invalid `{field}`: {source}")]
    Enum {
        field: &'static str,
        #[source]
        source: ParseEnumError,
    },

    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f32 },
}
