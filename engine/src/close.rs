//! Menu close sequence.
//!
//! Hover menus close on different triggers (pointer leave, outside click,
//! Escape) depending on the implementation, and the one in use is not known.
//! All four mechanisms are fired, each independently: a failing step is
//! logged and the next one still runs.

#[cfg(test)]
#[path = "close_test.rs"]
mod close_test;

use crate::driver;
use crate::page::{Page, PageError, Scope, is_shown};

/// Collapse whatever menus `trigger` left open.
pub fn close_menus<P: Page>(page: &P, trigger: &P::Node, popover_selector: &str) {
    match page.query_all(Scope::Document, popover_selector) {
        Ok(popovers) => {
            for popover in popovers.iter().filter(|p| is_shown(page, p)) {
                report("popover leave", driver::leave(page, Scope::Node(popover)));
            }
        }
        Err(err) => report("popover lookup", Err(err)),
    }
    report("trigger leave", driver::leave(page, Scope::Node(trigger)));
    report("outside click", driver::outside_click(page));
    report("escape", driver::press_escape(page));
}

fn report(step: &str, result: Result<(), PageError>) {
    if let Err(err) = result {
        log::debug!("close sequence: {step} failed: {err}");
    }
}
