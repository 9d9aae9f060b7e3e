//! Poll-until-timeout helper.
//!
//! Menu panels are inserted asynchronously after a hover, so every lookup that
//! follows an interaction re-evaluates its probe on a short interval. Between
//! evaluations the engine yields to the host so rendering can proceed.

#[cfg(test)]
#[path = "wait_test.rs"]
mod wait_test;

use std::time::Duration;

use crate::clock::Clock;
use crate::consts::{DEFAULT_WAIT_MS, POLL_INTERVAL_MS};
use crate::page::{Page, PageError, Scope};

/// A wait budget and the interval between probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_MS),
            interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

impl Wait {
    /// A wait of `timeout` at the default interval.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, ..Self::default() }
    }

    #[must_use]
    pub fn with_interval(self, interval: Duration) -> Self {
        Self { interval, ..self }
    }

    /// Evaluate `probe` until it yields a value or the budget runs out.
    ///
    /// Probe errors are treated as "not yet": the page may be mid-update.
    /// A zero timeout returns `None` without evaluating the probe.
    pub async fn until<C, T, F>(self, clock: &C, mut probe: F) -> Option<T>
    where
        C: Clock,
        F: FnMut() -> Result<Option<T>, PageError>,
    {
        let started = clock.now();
        while clock.now().saturating_sub(started) < self.timeout {
            match probe() {
                Ok(Some(found)) => return Some(found),
                Ok(None) => {}
                Err(err) => log::trace!("wait probe failed: {err}"),
            }
            clock.sleep(self.interval).await;
        }
        None
    }
}

/// Wait for the first element matching `selector` anywhere in the document.
pub async fn wait_for_selector<P: Page, C: Clock>(page: &P, clock: &C, wait: Wait, selector: &str) -> Option<P::Node> {
    wait.until(clock, || page.query(Scope::Document, selector)).await
}

/// Wait for the first selector in `selectors`, checked in priority order on
/// every poll, that matches an element. A selector the page rejects is skipped.
pub async fn wait_for_any<P: Page, C: Clock>(page: &P, clock: &C, wait: Wait, selectors: &[String]) -> Option<P::Node> {
    wait.until(clock, || Ok(first_match(page, selectors))).await
}

fn first_match<P: Page>(page: &P, selectors: &[String]) -> Option<P::Node> {
    for selector in selectors {
        match page.query(Scope::Document, selector) {
            Ok(Some(node)) => return Some(node),
            Ok(None) => {}
            Err(err) => log::trace!("skipping selector: {err}"),
        }
    }
    None
}
