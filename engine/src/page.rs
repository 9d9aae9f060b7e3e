//! Document collaborator: the only way the engine observes or touches the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The engine reads selectors, text, computed style and geometry, and
//! dispatches synthetic events. It never mutates attributes or theme state
//! itself; any change to the page happens because the page reacted to an event.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use crate::event::SyntheticEvent;

/// Error raised by the document collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// The selector was rejected by the document.
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    /// Computed style could not be read for an element.
    #[error("computed style unavailable: {0}")]
    Style(String),
    /// An event could not be constructed or dispatched.
    #[error("failed to dispatch `{event}`: {reason}")]
    Dispatch { event: &'static str, reason: String },
    /// The host environment is missing something the engine needs.
    #[error("host unavailable: {0}")]
    Host(String),
}

/// Where a lookup starts, or where an event is dispatched.
#[derive(Debug)]
pub enum Scope<'a, N> {
    /// The whole document (the `document` object for dispatch).
    Document,
    /// A specific element and its descendants.
    Node(&'a N),
}

impl<N> Clone for Scope<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Scope<'_, N> {}

/// A point in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An element's bounding client rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether the rectangle covers any area.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// The subset of an element's computed style the engine inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub background_color: String,
    pub background_image: String,
    pub display: String,
    pub visibility: String,
    pub opacity: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(0, 0, 0, 0)".into(),
            background_image: "none".into(),
            display: "block".into(),
            visibility: "visible".into(),
            opacity: "1".into(),
        }
    }
}

impl ComputedStyle {
    /// Whether style alone allows the element to be seen.
    ///
    /// An empty opacity counts as zero, matching numeric coercion of the
    /// computed value; an unparseable one does not hide the element.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        if self.display.trim() == "none" || self.visibility.trim() == "hidden" {
            return false;
        }
        let opacity = self.opacity.trim();
        if opacity.is_empty() {
            return false;
        }
        opacity.parse::<f64>().map_or(true, |o| o != 0.0)
    }

    /// Whether the element paints no background image.
    #[must_use]
    pub fn has_no_background_image(&self) -> bool {
        self.background_image.trim() == "none"
    }
}

/// A queryable, event-dispatchable document.
///
/// `Node` is a cheap handle (a `web_sys::Element` in the browser). Equality is
/// identity: two handles are equal when they refer to the same element.
pub trait Page {
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// The root `<html>` element.
    fn document_element(&self) -> Option<Self::Node>;

    /// First element matching `selector` within `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Selector`] when the document rejects the selector.
    fn query(&self, scope: Scope<'_, Self::Node>, selector: &str) -> Result<Option<Self::Node>, PageError>;

    /// All elements matching `selector` within `scope`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Selector`] when the document rejects the selector.
    fn query_all(&self, scope: Scope<'_, Self::Node>, selector: &str) -> Result<Vec<Self::Node>, PageError>;

    /// Nearest inclusive ancestor of `node` matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Selector`] when the document rejects the selector.
    fn closest(&self, node: &Self::Node, selector: &str) -> Result<Option<Self::Node>, PageError>;

    /// Parent element, if any.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Raw text content, untrimmed.
    fn text(&self, node: &Self::Node) -> String;

    /// Computed style of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Style`] when the style cannot be computed.
    fn style(&self, node: &Self::Node) -> Result<ComputedStyle, PageError>;

    /// Bounding client rectangle of `node`.
    fn rect(&self, node: &Self::Node) -> Rect;

    /// Dispatch a synthetic event at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Dispatch`] when the event cannot be built or sent.
    fn dispatch(&self, target: Scope<'_, Self::Node>, event: &SyntheticEvent) -> Result<(), PageError>;
}

/// Whether `node` is rendered: visible by style and occupying area.
pub fn is_shown<P: Page>(page: &P, node: &P::Node) -> bool {
    match page.style(node) {
        Ok(style) => style.is_visible() && page.rect(node).has_area(),
        Err(_) => false,
    }
}

/// Trimmed text content of `node`.
pub fn trimmed_text<P: Page>(page: &P, node: &P::Node) -> String {
    page.text(node).trim().to_string()
}
