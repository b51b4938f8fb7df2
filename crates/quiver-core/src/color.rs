//! Color handling for Quiver diagrams
//!
//! This module provides the [`Color`] type, which validates CSS color strings
//! through the `color` crate, and [`Paint`], the value written to `fill` and
//! `stroke` attributes.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use thiserror::Error;

/// Error returned when a string is not a valid CSS color.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct ColorError {
    input: String,
    reason: String,
}

/// A validated CSS color.
///
/// The color is parsed with the `color` crate so that typos are caught when a
/// style is built, but the caller's spelling is kept for output: `whitesmoke`
/// stays `whitesmoke` in the emitted document instead of being serialized as
/// an `rgb()` triple.
#[derive(Clone, Debug)]
pub struct Color {
    text: String,
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiver_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let smoke = Color::new("whitesmoke").unwrap();
    /// assert_eq!(smoke.to_string(), "whitesmoke");
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        let text = color_str.trim();
        match DynamicColor::from_str(text) {
            Ok(color) => Ok(Self {
                text: text.to_string(),
                color,
            }),
            Err(err) => Err(ColorError {
                input: color_str.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Returns the color as spelled by the caller.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Paint for `fill` and `stroke` attributes.
///
/// Either the SVG `none` keyword or a [`Color`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Paint {
    #[default]
    None,
    Color(Color),
}

impl Paint {
    /// Creates a paint from a named or CSS color string.
    ///
    /// The string `none` maps to [`Paint::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use quiver_core::color::Paint;
    ///
    /// assert_eq!(Paint::new("none").unwrap(), Paint::None);
    /// assert_eq!(Paint::new("white").unwrap().to_string(), "white");
    /// ```
    pub fn new(paint_str: &str) -> Result<Self, ColorError> {
        if paint_str.trim().eq_ignore_ascii_case("none") {
            Ok(Self::None)
        } else {
            Color::new(paint_str).map(Self::Color)
        }
    }

    /// Shorthand for a paint that is known to be a valid CSS color.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not a valid color. Intended for built-in defaults.
    pub fn named(name: &str) -> Self {
        Self::new(name).unwrap_or_else(|err| panic!("built-in paint must be valid: {err}"))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Color(color) => fmt::Display::fmt(color, f),
        }
    }
}

impl FromStr for Paint {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
