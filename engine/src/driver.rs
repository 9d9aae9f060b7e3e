//! Synthetic input driver.
//!
//! Every call emits a complete event sequence at a single point so delegated
//! listeners on ancestors see the same gesture a real pointer would produce.

#[cfg(test)]
#[path = "driver_test.rs"]
mod driver_test;

use crate::consts::{OUTSIDE_CLICK_INSET_PX, POINTER_INSET_PX};
use crate::event::{CLICK_SEQUENCE, ESCAPE_KEY, HOVER_SEQUENCE, LEAVE_SEQUENCE, SyntheticEvent};
use crate::page::{Page, PageError, Point, Rect, Scope};

/// Point near the top-left interior of `rect`.
///
/// The inset is capped at half of each dimension so thin elements are still hit.
#[must_use]
pub fn anchor_point(rect: Rect) -> Point {
    Point {
        x: rect.left + POINTER_INSET_PX.min(rect.width / 2.0),
        y: rect.top + POINTER_INSET_PX.min(rect.height / 2.0),
    }
}

/// Move the synthetic pointer onto `node`.
///
/// # Errors
///
/// Propagates the first dispatch failure; later events are not sent.
pub fn hover<P: Page>(page: &P, node: &P::Node) -> Result<(), PageError> {
    let at = anchor_point(page.rect(node));
    for &name in HOVER_SEQUENCE {
        page.dispatch(Scope::Node(node), &SyntheticEvent::pointer(name, at))?;
    }
    Ok(())
}

/// Press, release and click on `node`.
///
/// # Errors
///
/// Propagates the first dispatch failure; later events are not sent.
pub fn click<P: Page>(page: &P, node: &P::Node) -> Result<(), PageError> {
    let at = anchor_point(page.rect(node));
    press_at(page, Scope::Node(node), at)
}

/// Send leave-family events to `target` at the viewport origin.
///
/// # Errors
///
/// Propagates the first dispatch failure.
pub fn leave<P: Page>(page: &P, target: Scope<'_, P::Node>) -> Result<(), PageError> {
    let origin = Point::new(0.0, 0.0);
    for &name in LEAVE_SEQUENCE {
        page.dispatch(target, &SyntheticEvent::pointer(name, origin))?;
    }
    Ok(())
}

/// Click just inside the document element's top-left corner.
///
/// # Errors
///
/// Returns [`PageError::Host`] when there is no document element, otherwise
/// propagates the first dispatch failure.
pub fn outside_click<P: Page>(page: &P) -> Result<(), PageError> {
    let root = page
        .document_element()
        .ok_or_else(|| PageError::Host("no document element".into()))?;
    let rect = page.rect(&root);
    let at = Point::new(rect.left + OUTSIDE_CLICK_INSET_PX, rect.top + OUTSIDE_CLICK_INSET_PX);
    press_at(page, Scope::Node(&root), at)
}

/// Escape key-down then key-up on the document.
///
/// # Errors
///
/// Propagates the first dispatch failure.
pub fn press_escape<P: Page>(page: &P) -> Result<(), PageError> {
    page.dispatch(Scope::Document, &SyntheticEvent::key("keydown", ESCAPE_KEY))?;
    page.dispatch(Scope::Document, &SyntheticEvent::key("keyup", ESCAPE_KEY))
}

fn press_at<P: Page>(page: &P, target: Scope<'_, P::Node>, at: Point) -> Result<(), PageError> {
    for &name in CLICK_SEQUENCE {
        page.dispatch(target, &SyntheticEvent::press(name, at))?;
    }
    Ok(())
}
