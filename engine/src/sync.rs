//! Top-level theme synchronization.
//!
//! DESIGN
//! ======
//! `ThemeSync::sync` is the only entry point hosts call. It never fails:
//! every error is absorbed into a [`SyncOutcome`] and logged. The busy guard
//! is held for the whole attempt and released on every return path.
//!
//! There is no confirmation from the page that a click took effect. Repeated
//! calls stay cheap instead: once the background matches, sampling
//! short-circuits before any menu is touched.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use crate::busy::BusyFlag;
use crate::clock::Clock;
use crate::config::{ConfigError, SyncConfig};
use crate::page::Page;
use crate::sampler::Sampler;
use crate::strategy::{Navigation, Navigator};
use crate::theme::{SampledTheme, Theme};
use crate::vocab::Lexicon;

/// What a sync call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Another attempt was in flight; this one was dropped.
    Busy,
    /// The sampled background already matched; no events were sent.
    Unchanged,
    /// A layout succeeded.
    Navigated(Navigation),
    /// Every layout failed in every round.
    GaveUp,
}

/// Owns the page and clock collaborators and the busy slot.
pub struct ThemeSync<P: Page, C: Clock> {
    page: P,
    clock: C,
    config: SyncConfig,
    lexicon: Lexicon,
    busy: BusyFlag,
}

impl<P: Page, C: Clock> ThemeSync<P, C> {
    /// Validate `config` and compile its vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation or pattern compilation fails.
    pub fn new(page: P, clock: C, config: SyncConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let lexicon = config.vocabulary.compile()?;
        Ok(Self { page, clock, config, lexicon, busy: BusyFlag::new() })
    }

    #[must_use]
    pub fn page(&self) -> &P {
        &self.page
    }

    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Whether an attempt is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    /// Classify the page's current background.
    pub fn sample(&self) -> SampledTheme {
        Sampler {
            roots: &self.config.sample_roots,
            depth: self.config.sample_depth,
            threshold: self.config.dark_threshold,
        }
        .sample(&self.page)
    }

    /// Bring the page to `desired`, or give up quietly.
    pub async fn sync(&self, desired: Theme) -> SyncOutcome {
        let Some(_guard) = self.busy.try_acquire() else {
            log::debug!("sync to {desired} dropped: attempt in flight");
            return SyncOutcome::Busy;
        };

        let sampled = self.sample();
        if sampled.matches(desired) {
            log::debug!("page already {desired}");
            return SyncOutcome::Unchanged;
        }

        log::info!("page sampled {sampled:?}, switching to {desired}");
        match self.navigate(desired).await {
            Some(navigation) => SyncOutcome::Navigated(navigation),
            None => {
                log::info!("could not switch to {desired} after {} rounds", self.config.max_rounds);
                SyncOutcome::GaveUp
            }
        }
    }

    async fn navigate(&self, desired: Theme) -> Option<Navigation> {
        let navigator = Navigator {
            page: &self.page,
            clock: &self.clock,
            lexicon: &self.lexicon,
            timings: &self.config.timings,
            popover_selector: &self.config.popover_selector,
        };
        for round in 1..=self.config.max_rounds {
            for layout in &self.config.layouts {
                match navigator.run(layout, desired).await {
                    Ok(navigation) => {
                        log::info!("{}: {navigation:?} (round {round})", layout.name);
                        return Some(navigation);
                    }
                    Err(err) => log::debug!("{}: round {round} failed at {err}", layout.name),
                }
            }
        }
        None
    }
}
