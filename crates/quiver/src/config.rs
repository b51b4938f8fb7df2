//! Configuration types for Quiver diagram rendering.
//!
//! This module provides configuration structures that control the canvas and
//! the look of rendered diagrams. All types implement [`serde::Deserialize`]
//! for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining canvas and style settings.
//! - [`CanvasConfig`] - Margin, grid spacing, arrowhead size and anchor markers.
//! - [`StyleConfig`] - Optional overrides of the renderer's default colors and fonts.
//!
//! # Example
//!
//! ```
//! # use quiver::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.canvas().grid_spacing(), 50.0);
//! assert!(config.style().background_color().unwrap().is_none());
//! ```

use serde::Deserialize;

use quiver_core::{color::Paint, draw::FontWeight};

use crate::{diagram::DEFAULT_MARGIN, error::ConfigError};

/// Top-level application configuration combining canvas and style settings.
///
/// Groups [`CanvasConfig`] and [`StyleConfig`] into a single configuration
/// root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified canvas and style configurations.
    ///
    /// # Arguments
    ///
    /// * `canvas` - Canvas geometry settings.
    /// * `style` - Visual styling overrides.
    pub fn new(canvas: CanvasConfig, style: StyleConfig) -> Self {
        Self { canvas, style }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Canvas geometry settings.
///
/// Values are checked when a [`Renderer`](crate::render::Renderer) is built
/// from the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Space kept between the furthest shape edge and the canvas edge.
    margin: f32,

    /// Distance between grid lines.
    grid_spacing: f32,

    /// Width and height of the arrowhead marker.
    arrowhead_length: f32,

    /// Whether the four anchors of each shape are marked with small circles.
    show_anchors: bool,
}

impl CanvasConfig {
    /// Creates a new [`CanvasConfig`].
    ///
    /// # Arguments
    ///
    /// * `margin` - Space kept around the shapes when the canvas grows.
    /// * `grid_spacing` - Distance between grid lines, must be positive.
    /// * `arrowhead_length` - Size of the arrowhead marker.
    /// * `show_anchors` - Whether anchor markers are drawn.
    pub fn new(margin: f32, grid_spacing: f32, arrowhead_length: f32, show_anchors: bool) -> Self {
        Self {
            margin,
            grid_spacing,
            arrowhead_length,
            show_anchors,
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn grid_spacing(&self) -> f32 {
        self.grid_spacing
    }

    pub fn arrowhead_length(&self) -> f32 {
        self.arrowhead_length
    }

    pub fn show_anchors(&self) -> bool {
        self.show_anchors
    }

    /// Checks that every value is usable for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-positive grid spacing or a negative
    /// margin or arrowhead length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "canvas.grid_spacing",
                value: self.grid_spacing,
            });
        }
        for (field, value) in [
            ("canvas.margin", self.margin),
            ("canvas.arrowhead_length", self.arrowhead_length),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            grid_spacing: 50.0,
            arrowhead_length: 20.0,
            show_anchors: true,
        }
    }
}

/// Visual styling overrides for rendered diagrams.
///
/// Every field is optional. Fields that are not set fall back to renderer
/// defaults. Colors are kept as strings and parsed on access.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    grid_color: Option<String>,
    border_color: Option<String>,
    shape_fill: Option<String>,
    shape_stroke: Option<String>,
    shape_stroke_width: Option<f32>,
    connector_color: Option<String>,
    connector_stroke_width: Option<f32>,
    anchor_color: Option<String>,
    label_color: Option<String>,
    label_font_size: Option<f32>,
    label_font_family: Option<String>,
    label_font_weight: Option<String>,
    title_font_size: Option<f32>,
}

impl StyleConfig {
    /// Returns the parsed background paint, or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.background_color", self.background_color.as_deref())
    }

    pub fn grid_color(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.grid_color", self.grid_color.as_deref())
    }

    pub fn border_color(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.border_color", self.border_color.as_deref())
    }

    pub fn shape_fill(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.shape_fill", self.shape_fill.as_deref())
    }

    pub fn shape_stroke(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.shape_stroke", self.shape_stroke.as_deref())
    }

    /// Returns the configured shape outline width.
    ///
    /// # Errors
    ///
    /// Returns an error if the width is negative or not finite.
    pub fn shape_stroke_width(&self) -> Result<Option<f32>, ConfigError> {
        check_non_negative("style.shape_stroke_width", self.shape_stroke_width)
    }

    pub fn connector_color(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.connector_color", self.connector_color.as_deref())
    }

    pub fn connector_stroke_width(&self) -> Result<Option<f32>, ConfigError> {
        check_non_negative("style.connector_stroke_width", self.connector_stroke_width)
    }

    pub fn anchor_color(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.anchor_color", self.anchor_color.as_deref())
    }

    pub fn label_color(&self) -> Result<Option<Paint>, ConfigError> {
        parse_paint("style.label_color", self.label_color.as_deref())
    }

    pub fn label_font_size(&self) -> Result<Option<f32>, ConfigError> {
        check_positive("style.label_font_size", self.label_font_size)
    }

    pub fn label_font_family(&self) -> Option<&str> {
        self.label_font_family.as_deref()
    }

    /// Returns the parsed label font weight, or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error unless the value is `normal` or `bold`.
    pub fn label_font_weight(&self) -> Result<Option<FontWeight>, ConfigError> {
        self.label_font_weight
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|source| ConfigError::Enum {
                field: "style.label_font_weight",
                source,
            })
    }

    pub fn title_font_size(&self) -> Result<Option<f32>, ConfigError> {
        check_positive("style.title_font_size", self.title_font_size)
    }
}

fn parse_paint(field: &'static str, value: Option<&str>) -> Result<Option<Paint>, ConfigError> {
    value
        .map(Paint::new)
        .transpose()
        .map_err(|source| ConfigError::Color { field, source })
}

fn check_positive(field: &'static str, value: Option<f32>) -> Result<Option<f32>, ConfigError> {
    match value {
        Some(value) if !(value.is_finite() && value > 0.0) => {
            Err(ConfigError::NotPositive { field, value })
        }
        _ => Ok(value),
    }
}

fn check_non_negative(
    field: &'static str,
    value: Option<f32>,
) -> Result<Option<f32>, ConfigError> {
    match value {
        Some(value) if !(value.is_finite() && value >= 0.0) => {
            Err(ConfigError::Negative { field, value })
        }
        _ => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_canvas_defaults() {
        let canvas = CanvasConfig::default();
        assert_approx_eq!(f32, canvas.margin(), 50.0);
        assert_approx_eq!(f32, canvas.grid_spacing(), 50.0);
        assert_approx_eq!(f32, canvas.arrowhead_length(), 20.0);
        assert!(canvas.show_anchors());
        assert!(canvas.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [canvas]
            grid_spacing = 25.0

            [style]
            background_color = "ivory"
            "#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.canvas().grid_spacing(), 25.0);
        assert_approx_eq!(f32, config.canvas().margin(), 50.0);
        assert_eq!(
            config.style().background_color().unwrap(),
            Some(Paint::new("ivory").unwrap())
        );
        assert_eq!(config.style().grid_color().unwrap(), None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.canvas(), &CanvasConfig::default());
        assert_eq!(config.style().label_font_family(), None);
    }

    #[test]
    fn test_zero_grid_spacing_rejected() {
        let canvas = CanvasConfig::new(50.0, 0.0, 20.0, true);
        assert!(matches!(
            canvas.validate(),
            Err(ConfigError::NotPositive {
                field: "canvas.grid_spacing",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_margin_rejected() {
        let canvas = CanvasConfig::new(-1.0, 50.0, 20.0, true);
        assert!(matches!(
            canvas.validate(),
            Err(ConfigError::Negative {
                field: "canvas.margin",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_color_reports_field() {
        let style: StyleConfig = toml::from_str(r#"shape_fill = "blurple""#).unwrap();
        let err = style.shape_fill().unwrap_err();
        assert!(err.to_string().starts_with("invalid `style.shape_fill`"));
    }

    #[test]
    fn test_none_paint_is_accepted() {
        let style: StyleConfig = toml::from_str(r#"shape_stroke = "none""#).unwrap();
        assert_eq!(style.shape_stroke().unwrap(), Some(Paint::None));
    }

    #[test]
    fn test_font_weight_parsing() {
        let style: StyleConfig = toml::from_str(r#"label_font_weight = "bold""#).unwrap();
        assert_eq!(style.label_font_weight().unwrap(), Some(FontWeight::Bold));

        let style: StyleConfig = toml::from_str(r#"label_font_weight = "heavy""#).unwrap();
        assert!(matches!(
            style.label_font_weight(),
            Err(ConfigError::Enum { .. })
        ));
    }

    #[test]
    fn test_font_size_must_be_positive() {
        let style: StyleConfig = toml::from_str("title_font_size = -3.0").unwrap();
        assert!(style.title_font_size().is_err());
    }
}
