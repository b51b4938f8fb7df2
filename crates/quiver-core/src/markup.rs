//! Scoped markup writer.
//!
//! [`MarkupWriter`] streams a nested element tree to any [`io::Write`] sink.
//! Each open element is an [`Element`] scope; dropping the scope closes the
//! element, so every element is closed exactly once and in reverse order of
//! opening. A child scope mutably borrows its parent, which makes closing a
//! parent before its children a compile error rather than corrupt output.
//!
//! # Closing forms
//!
//! An element that never received children or text closes as ` />`. Once the
//! first child or text is written the start tag is terminated with `>` and
//! the element closes with `</name>`. Each close is followed by a newline
//! unless the element was opened inline.
//!
//! # Example
//!
//! ```
//! use quiver_core::markup::MarkupWriter;
//!
//! let mut writer = MarkupWriter::new(Vec::new());
//! {
//!     let mut root = writer.root("svg");
//!     root.write_attribute("width", 100);
//!     let mut rect = root.child("rect");
//!     rect.write_attribute("fill", "white");
//! }
//! let bytes = writer.finish().unwrap();
//! assert_eq!(
//!     String::from_utf8(bytes).unwrap(),
//!     "<svg width=\"100\">\n<rect fill=\"white\" />\n</svg>\n"
//! );
//! ```

use std::{
    borrow::Cow,
    io::{self, Write},
};

use log::{trace, warn};

use crate::color::{Color, Paint};

/// Streams nested markup to an output sink.
///
/// The writer owns the sink and tracks the current nesting depth. I/O errors
/// are sticky: the first failure is kept, later output is skipped, and
/// [`MarkupWriter::finish`] reports it. This is needed because scopes close
/// in `Drop`, which cannot return an error.
#[derive(Debug)]
pub struct MarkupWriter<W: Write> {
    sink: W,
    depth: usize,
    error: Option<io::Error>,
}

impl<W: Write> MarkupWriter<W> {
    /// Creates a writer over the given sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            depth: 0,
            error: None,
        }
    }

    /// Opens the top-level element.
    pub fn root(&mut self, name: &str) -> Element<'_, W> {
        trace!(name; "Opening root element");
        Element::open(self, name, ElementKind::Tag, false)
    }

    /// Returns the number of currently open element scopes.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Flushes the sink and hands it back.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error raised while writing, or the error raised
    /// by the final flush.
    pub fn finish(mut self) -> io::Result<W> {
        debug_assert_eq!(self.depth, 0, "markup scopes still open at finish");
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_all(text.as_bytes()) {
            warn!(err:err; "Markup output failed, dropping remaining output");
            self.error = Some(err);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Tag,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementState {
    /// Start tag is still open; attributes may be written.
    Opened,
    /// Start tag terminated; children or text were written.
    HasContent,
}

/// One open element scope.
///
/// Created by [`MarkupWriter::root`] or by [`Element::child`] on a parent
/// scope. Dropping it writes the closing form.
#[derive(Debug)]
pub struct Element<'a, W: Write> {
    writer: &'a mut MarkupWriter<W>,
    name: String,
    kind: ElementKind,
    state: ElementState,
    inline: bool,
    trailing_hyphen: bool,
}

impl<'a, W: Write> Element<'a, W> {
    fn open(writer: &'a mut MarkupWriter<W>, name: &str, kind: ElementKind, inline: bool) -> Self {
        match kind {
            ElementKind::Tag => {
                writer.emit("<");
                writer.emit(name);
            }
            ElementKind::Comment => writer.emit("<!-- "),
        }
        writer.depth += 1;
        Self {
            writer,
            name: name.to_string(),
            kind,
            state: ElementState::Opened,
            inline,
            trailing_hyphen: false,
        }
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens a child element on its own line.
    pub fn child(&mut self, name: &str) -> Element<'_, W> {
        self.begin_content(false);
        Element::open(self.writer, name, ElementKind::Tag, false)
    }

    /// Opens a child element that stays on the current line.
    ///
    /// Used for runs inside text, such as `tspan` elements within a label.
    pub fn child_inline(&mut self, name: &str) -> Element<'_, W> {
        self.begin_content(true);
        Element::open(self.writer, name, ElementKind::Tag, true)
    }

    /// Opens a comment scope as a child of this element.
    ///
    /// Text written to the returned scope becomes the comment body. A `-`
    /// that would follow another `-` is preceded by a space, even across
    /// writes, since `--` cannot appear inside a comment.
    pub fn comment(&mut self) -> Element<'_, W> {
        self.begin_content(false);
        Element::open(self.writer, "", ElementKind::Comment, false)
    }

    /// Writes a complete comment node as a child of this element.
    pub fn write_comment(&mut self, text: &str) {
        self.comment().write_raw(text);
    }

    /// Appends ` name="value"` to the start tag.
    ///
    /// Must be called before any child or text is written; the start tag is
    /// already terminated at that point.
    pub fn write_attribute(&mut self, name: &str, value: impl AttributeValue) {
        debug_assert_eq!(
            self.kind,
            ElementKind::Tag,
            "attributes cannot be written to a comment"
        );
        debug_assert_eq!(
            self.state,
            ElementState::Opened,
            "attribute `{name}` written after content of `{}`",
            self.name
        );
        let value = value.to_attribute_value();
        self.writer.emit(" ");
        self.writer.emit(name);
        self.writer.emit("=\"");
        self.writer.emit(&escape_attribute(&value));
        self.writer.emit("\"");
    }

    /// Appends text content, escaping markup-special characters.
    pub fn write_text(&mut self, text: &str) {
        let escaped = escape_text(text);
        self.write_raw(&escaped);
    }

    /// Appends text content verbatim.
    ///
    /// The caller is responsible for the text being valid markup. Inside a
    /// comment scope, runs of `-` are still split.
    pub fn write_raw(&mut self, text: &str) {
        if self.kind == ElementKind::Comment {
            self.state = ElementState::HasContent;
            let body = self.split_hyphens(text);
            self.writer.emit(&body);
            return;
        }
        if self.state == ElementState::Opened {
            self.writer.emit(">");
        }
        self.state = ElementState::HasContent;
        self.writer.emit(text);
    }

    fn split_hyphens<'t>(&mut self, text: &'t str) -> Cow<'t, str> {
        let starts_run = self.trailing_hyphen && text.starts_with('-');
        if let Some(last) = text.chars().last() {
            self.trailing_hyphen = last == '-';
        }
        if !starts_run && !text.contains("--") {
            return Cow::Borrowed(text);
        }

        let mut body = String::with_capacity(text.len() + 4);
        let mut previous_hyphen = starts_run;
        for c in text.chars() {
            if c == '-' && previous_hyphen {
                body.push(' ');
            }
            previous_hyphen = c == '-';
            body.push(c);
        }
        Cow::Owned(body)
    }

    fn begin_content(&mut self, inline: bool) {
        debug_assert_eq!(
            self.kind,
            ElementKind::Tag,
            "comments cannot contain elements"
        );
        if self.state == ElementState::Opened {
            self.state = ElementState::HasContent;
            self.writer.emit(if inline { ">" } else { ">\n" });
        }
    }
}

impl<W: Write> Drop for Element<'_, W> {
    fn drop(&mut self) {
        match (self.kind, self.state) {
            (ElementKind::Comment, _) => self.writer.emit(" -->"),
            (ElementKind::Tag, ElementState::HasContent) => {
                self.writer.emit("</");
                self.writer.emit(&self.name);
                self.writer.emit(">");
            }
            (ElementKind::Tag, ElementState::Opened) => self.writer.emit(" />"),
        }
        if !self.inline {
            self.writer.emit("\n");
        }
        self.writer.depth -= 1;
    }
}

/// A value that can be written as an attribute.
///
/// Strings are written as-is (then escaped); numbers use [`format_number`]
/// semantics so output never depends on locale or float noise.
pub trait AttributeValue {
    fn to_attribute_value(&self) -> Cow<'_, str>;
}

impl AttributeValue for str {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AttributeValue for String {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: AttributeValue + ?Sized> AttributeValue for &T {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        (**self).to_attribute_value()
    }
}

impl AttributeValue for Color {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl AttributeValue for Paint {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        match self {
            Paint::None => Cow::Borrowed("none"),
            Paint::Color(color) => color.to_attribute_value(),
        }
    }
}

macro_rules! integer_attribute_value {
    ($($ty:ty),*) => {
        $(
            impl AttributeValue for $ty {
                fn to_attribute_value(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

integer_attribute_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl AttributeValue for f32 {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        Cow::Owned(format_number(*self))
    }
}

impl AttributeValue for f64 {
    fn to_attribute_value(&self) -> Cow<'_, str> {
        debug_assert!(self.is_finite(), "non-finite attribute value {self}");
        if *self == 0.0 {
            Cow::Borrowed("0")
        } else {
            Cow::Owned(self.to_string())
        }
    }
}

/// Formats a coordinate or length for output.
///
/// Integral values print without a fractional part, other values print as
/// the shortest decimal that round-trips, and negative zero prints as `0`.
///
/// # Examples
///
/// ```
/// use quiver_core::markup::format_number;
///
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(82.5), "82.5");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f32) -> String {
    debug_assert!(value.is_finite(), "non-finite coordinate {value}");
    if value == 0.0 {
        return String::from("0");
    }
    value.to_string()
}

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

fn needs_escape(text: &str, specials: &[char]) -> bool {
    text.chars()
        .any(|c| specials.contains(&c) || !is_valid_xml_char(c))
}

/// Escapes `&`, `<` and `>` in text content and drops characters XML cannot
/// represent.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape(text, &['&', '<', '>'])
}

/// Escapes `&`, `<` and `"` in an attribute value and drops characters XML
/// cannot represent.
pub fn escape_attribute(text: &str) -> Cow<'_, str> {
    escape(text, &['&', '<', '"'])
}

fn escape<'t>(text: &'t str, specials: &[char]) -> Cow<'t, str> {
    if !needs_escape(text, specials) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' if specials.contains(&'>') => escaped.push_str("&gt;"),
            '"' if specials.contains(&'"') => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    #[derive(Debug, Clone)]
    struct TreeNode {
        name: String,
        attributes: Vec<i32>,
        text: Option<String>,
        children: Vec<TreeNode>,
    }

    fn tree_strategy() -> impl Strategy<Value = TreeNode> {
        let leaf = (
            "[a-z]{1,6}",
            prop::collection::vec(any::<i32>(), 0..4),
            prop::option::of("[a-zA-Z0-9 <>&\"]{0,12}"),
        )
            .prop_map(|(name, attributes, text)| TreeNode {
                name,
                attributes,
                text,
                children: Vec::new(),
            });

        leaf.prop_recursive(4, 32, 4, |inner| {
            (
                "[a-z]{1,6}",
                prop::collection::vec(any::<i32>(), 0..4),
                prop::option::of("[a-zA-Z0-9 <>&\"]{0,12}"),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(name, attributes, text, children)| TreeNode {
                    name,
                    attributes,
                    text,
                    children,
                })
        })
    }

    fn write_node<W: Write>(parent: &mut Element<'_, W>, node: &TreeNode) {
        let mut element = parent.child(&node.name);
        write_body(&mut element, node);
    }

    fn write_body<W: Write>(element: &mut Element<'_, W>, node: &TreeNode) {
        for (index, value) in node.attributes.iter().enumerate() {
            element.write_attribute(&format!("a{index}"), *value);
        }
        if let Some(text) = &node.text {
            element.write_text(text);
        }
        for child in &node.children {
            write_node(element, child);
        }
    }

    fn assert_same_structure(
        parsed: roxmltree::Node<'_, '_>,
        node: &TreeNode,
    ) -> Result<(), TestCaseError> {
        prop_assert_eq!(parsed.tag_name().name(), node.name.as_str());
        for (index, value) in node.attributes.iter().enumerate() {
            let expected = value.to_string();
            prop_assert_eq!(parsed.attribute(format!("a{index}").as_str()), Some(expected.as_str()));
        }

        let parsed_children: Vec<_> = parsed.children().filter(|n| n.is_element()).collect();
        prop_assert_eq!(parsed_children.len(), node.children.len());
        for (parsed_child, child) in parsed_children.into_iter().zip(&node.children) {
            assert_same_structure(parsed_child, child)?;
        }
        Ok(())
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Any sequence of scopes yields a well-formed document mirroring the tree.
    fn check_output_is_well_formed(tree: TreeNode) -> Result<(), TestCaseError> {
        let mut writer = MarkupWriter::new(Vec::new());
        {
            let mut root = writer.root(&tree.name);
            write_body(&mut root, &tree);
        }
        prop_assert_eq!(writer.depth(), 0);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        let document = roxmltree::Document::parse(&output)
            .map_err(|err| TestCaseError::fail(format!("{err}: {output}")))?;

        assert_same_structure(document.root_element(), &tree)
    }

    /// Every opened tag is closed exactly once.
    fn check_open_and_close_counts_match(tree: TreeNode) -> Result<(), TestCaseError> {
        fn count(node: &TreeNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }

        let mut writer = MarkupWriter::new(Vec::new());
        {
            let mut root = writer.root(&tree.name);
            write_body(&mut root, &tree);
        }
        let output = String::from_utf8(writer.finish().unwrap()).unwrap();

        let opens = output.matches('<').count() - output.matches("</").count();
        let closes = output.matches("</").count() + output.matches(" />").count();
        prop_assert_eq!(opens, count(&tree));
        prop_assert_eq!(closes, count(&tree));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn output_is_well_formed(tree in tree_strategy()) {
            check_output_is_well_formed(tree)?;
        }

        #[test]
        fn open_and_close_counts_match(tree in tree_strategy()) {
            check_open_and_close_counts_match(tree)?;
        }
    }
}
