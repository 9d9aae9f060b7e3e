//! Synthetic event descriptors.
//!
//! A [`SyntheticEvent`] is a plain value the host turns into a real
//! `PointerEvent`, `MouseEvent` or `KeyboardEvent`. Sequences are fixed tables
//! so the driver and the close sequence emit identical orderings.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use crate::page::Point;

/// Hover: enter-family events followed by a move at the anchor point.
pub const HOVER_SEQUENCE: &[&str] = &["pointerover", "mouseover", "mouseenter", "mousemove"];

/// Click: full press / release / click cycle.
pub const CLICK_SEQUENCE: &[&str] = &["pointerdown", "mousedown", "pointerup", "mouseup", "click"];

/// Leave-family events that collapse hover-opened panels.
pub const LEAVE_SEQUENCE: &[&str] = &["pointerleave", "mouseleave", "mouseout"];

/// Key name and code sent to dismiss menus.
pub const ESCAPE_KEY: &str = "Escape";

/// Which DOM event interface the host should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Pointer,
    Mouse,
    Keyboard,
}

impl EventKind {
    /// Infer the interface from the event type name.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        if name.starts_with("pointer") {
            Self::Pointer
        } else if name.starts_with("key") {
            Self::Keyboard
        } else {
            Self::Mouse
        }
    }
}

/// One event to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticEvent {
    pub name: &'static str,
    pub kind: EventKind,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Client coordinates; ignored for keyboard events.
    pub at: Point,
    /// `key` and `code` for keyboard events.
    pub key: Option<&'static str>,
}

impl SyntheticEvent {
    /// A bubbling, non-cancelable pointer/mouse event at `at`.
    #[must_use]
    pub fn pointer(name: &'static str, at: Point) -> Self {
        Self {
            name,
            kind: EventKind::for_name(name),
            bubbles: true,
            cancelable: false,
            at,
            key: None,
        }
    }

    /// A bubbling, cancelable pointer/mouse event at `at`.
    #[must_use]
    pub fn press(name: &'static str, at: Point) -> Self {
        Self { cancelable: true, ..Self::pointer(name, at) }
    }

    /// A bubbling keyboard event for `key`.
    #[must_use]
    pub fn key(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            kind: EventKind::Keyboard,
            bubbles: true,
            cancelable: false,
            at: Point::new(0.0, 0.0),
            key: Some(key),
        }
    }
}
