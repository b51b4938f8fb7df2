//! Text style definitions for labels and titles.
//!
//! This module provides [`TextDefinition`] and the closed sets of values the
//! SVG text attributes accept: [`TextAnchor`], [`DominantBaseline`],
//! [`FontWeight`] and [`FontSize`].
//!
//! # Quick Start
//!
//! ```
//! # use quiver_core::draw::{FontSize, FontWeight, TextAnchor, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(FontSize::Absolute(25.0));
//! style.set_font_weight(FontWeight::Bold);
//! style.set_anchor(TextAnchor::Middle);
//! assert_eq!(style.font_size().to_string(), "25");
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::{color::Paint, markup::format_number};

/// Error returned when parsing a text attribute keyword fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} `{value}`, valid values: {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseEnumError {
    /// Creates an error for `value`, which is not one of the `expected`
    /// keywords of `kind`.
    pub fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// Horizontal alignment of text relative to its anchor point.
///
/// Maps to the SVG `text-anchor` attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG text-anchor value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl FromStr for TextAnchor {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            _ => Err(ParseEnumError::new("text anchor", s, "start, middle, end")),
        }
    }
}

/// Vertical alignment of text relative to its anchor point.
///
/// Maps to the SVG `dominant-baseline` attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DominantBaseline {
    Baseline,
    #[default]
    Middle,
    Hanging,
}

impl DominantBaseline {
    /// Returns the SVG dominant-baseline value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Middle => "middle",
            Self::Hanging => "hanging",
        }
    }
}

impl FromStr for DominantBaseline {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Self::Baseline),
            "middle" => Ok(Self::Middle),
            "hanging" => Ok(Self::Hanging),
            _ => Err(ParseEnumError::new(
                "dominant baseline",
                s,
                "baseline, middle, hanging",
            )),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Returns the SVG font-weight value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

impl FromStr for FontWeight {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            _ => Err(ParseEnumError::new("font weight", s, "normal, bold")),
        }
    }
}

/// Font size: the `medium` keyword or an absolute size in user units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum FontSize {
    #[default]
    Medium,
    Absolute(f32),
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medium => f.write_str("medium"),
            Self::Absolute(size) => f.write_str(&format_number(*size)),
        }
    }
}

/// Defines the visual style for text elements.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font size | `medium` |
/// | Font family | `sans-serif` |
/// | Font weight | `normal` |
/// | Fill | `black` |
/// | Stroke | `none` |
/// | Anchor | `start` |
/// | Baseline | `middle` |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_size: FontSize,
    font_family: String,
    font_weight: FontWeight,
    fill: Paint,
    stroke: Paint,
    anchor: TextAnchor,
    baseline: DominantBaseline,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, size: FontSize) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    ///
    /// # Arguments
    ///
    /// * `family` - The font family name (e.g., "Arial", "monospace")
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    /// Sets the paint used to fill glyphs.
    pub fn set_fill(&mut self, fill: Paint) {
        self.fill = fill;
    }

    /// Sets the paint used to outline glyphs.
    pub fn set_stroke(&mut self, stroke: Paint) {
        self.stroke = stroke;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    pub fn set_baseline(&mut self, baseline: DominantBaseline) {
        self.baseline = baseline;
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn fill(&self) -> &Paint {
        &self.fill
    }

    pub fn stroke(&self) -> &Paint {
        &self.stroke
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn baseline(&self) -> DominantBaseline {
        self.baseline
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_size: FontSize::Medium,
            font_family: String::from("sans-serif"),
            font_weight: FontWeight::Normal,
            fill: Paint::named("black"),
            stroke: Paint::None,
            anchor: TextAnchor::Start,
            baseline: DominantBaseline::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let text = TextDefinition::default();
        assert_eq!(text.font_size(), FontSize::Medium);
        assert_eq!(text.font_family(), "sans-serif");
        assert_eq!(text.font_weight(), FontWeight::Normal);
        assert_eq!(text.fill().to_string(), "black");
        assert!(text.stroke().is_none());
        assert_eq!(text.anchor(), TextAnchor::Start);
        assert_eq!(text.baseline(), DominantBaseline::Middle);
    }

    #[test]
    fn test_text_definition_setters() {
        let mut text = TextDefinition::new();
        text.set_font_size(FontSize::Absolute(25.0));
        text.set_font_family("monospace");
        text.set_font_weight(FontWeight::Bold);
        text.set_fill(Paint::named("navy"));
        text.set_stroke(Paint::named("white"));
        text.set_anchor(TextAnchor::End);
        text.set_baseline(DominantBaseline::Hanging);

        assert_eq!(text.font_size().to_string(), "25");
        assert_eq!(text.font_family(), "monospace");
        assert_eq!(text.font_weight().as_str(), "bold");
        assert_eq!(text.fill().to_string(), "navy");
        assert_eq!(text.stroke().to_string(), "white");
        assert_eq!(text.anchor().as_str(), "end");
        assert_eq!(text.baseline().as_str(), "hanging");
    }

    #[test]
    fn test_font_size_display() {
        assert_eq!(FontSize::Medium.to_string(), "medium");
        assert_eq!(FontSize::Absolute(12.5).to_string(), "12.5");
    }

    #[test]
    fn test_text_anchor_from_str() {
        assert_eq!("start".parse::<TextAnchor>(), Ok(TextAnchor::Start));
        assert_eq!("middle".parse::<TextAnchor>(), Ok(TextAnchor::Middle));
        assert_eq!("end".parse::<TextAnchor>(), Ok(TextAnchor::End));
        let err = "centre".parse::<TextAnchor>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid text anchor `centre`, valid values: start, middle, end"
        );
    }

    #[test]
    fn test_dominant_baseline_from_str() {
        assert_eq!("baseline".parse(), Ok(DominantBaseline::Baseline));
        assert_eq!("middle".parse(), Ok(DominantBaseline::Middle));
        assert_eq!("hanging".parse(), Ok(DominantBaseline::Hanging));
        assert!("top".parse::<DominantBaseline>().is_err());
    }

    #[test]
    fn test_font_weight_from_str() {
        assert_eq!("bold".parse(), Ok(FontWeight::Bold));
        assert!("heavy".parse::<FontWeight>().is_err());
    }
}
