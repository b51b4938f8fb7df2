//! Quiver - Box-and-arrow diagrams rendered to SVG.
//!
//! Shapes are placed at caller-supplied bounds, connectors are routed between
//! the closest pair of shape anchors, and the result is written as a single
//! self-contained SVG document.

pub mod config;
pub mod diagram;
pub mod render;
pub mod routing;
pub mod source;

mod error;

pub use quiver_core::{color, draw, geometry, markup, svg};

pub use diagram::Diagram;
pub use error::{ConfigError, DiagramError, QuiverError, SourceError};

use std::io::Write;

use log::{debug, info, trace};

use config::AppConfig;
use render::Renderer;

/// Builder for parsing and rendering Quiver diagrams.
///
/// This provides an API for processing Quiver diagrams through parsing and
/// rendering stages.
///
/// # Examples
///
/// ```rust
/// use quiver::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"
/// [[shapes]]
/// name = "app"
/// kind = "rectangle"
/// x = 0
/// y = 0
/// width = 100
/// height = 50
/// "#;
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Parse source to a diagram
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render the diagram to SVG
/// let svg = builder.render_svg(&diagram)
///     .expect("Failed to render");
/// assert!(svg.contains(">app</text>"));
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including canvas and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a TOML diagram source into a [`Diagram`].
    ///
    /// The configured canvas margin is applied while shapes are added.
    ///
    /// # Arguments
    ///
    /// * `source` - Diagram source as described in [`source`]
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError::Config`] if the canvas configuration is
    /// invalid, and [`QuiverError::Source`] carrying the source text for
    /// malformed TOML, duplicate or unknown shape names and invalid bounds.
    pub fn parse(&self, source: &str) -> Result<Diagram, QuiverError> {
        info!("Parsing diagram");

        let canvas = self.config.canvas();
        canvas.validate()?;

        let diagram = source::parse(source, canvas.margin())
            .map_err(|err| QuiverError::new_source_error(err, source))?;

        debug!("Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Render a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError::Config`] if the configuration holds invalid
    /// values and [`QuiverError::Diagram`] if a connector does not resolve.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quiver::{Diagram, DiagramBuilder};
    ///
    /// let builder = DiagramBuilder::default();
    /// let svg = builder.render_svg(&Diagram::new())
    ///     .expect("Failed to render diagram");
    ///
    /// assert!(svg.starts_with("<svg "));
    /// ```
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, QuiverError> {
        let renderer = Renderer::from_config(&self.config)?;
        let svg = renderer.render_to_string(diagram)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a diagram as SVG into `sink`, returning the sink.
    ///
    /// # Errors
    ///
    /// Returns [`QuiverError::Io`] if writing fails, plus the errors of
    /// [`render_svg`](Self::render_svg).
    pub fn render_to<W: Write>(&self, diagram: &Diagram, sink: W) -> Result<W, QuiverError> {
        let renderer = Renderer::from_config(&self.config)?;
        let sink = renderer.render(diagram, sink)?;

        info!("SVG rendered successfully");
        Ok(sink)
    }
}
