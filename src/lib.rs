//! Browser binding for the theme-follow engine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loaded as a WASM module into bilibili pages. On start it reads the system
//! color-scheme preference, runs one sync, then re-syncs on every preference
//! change. All page access goes through [`engine`]'s `Page` and `Clock` traits;
//! this crate only supplies their `web_sys` implementations and the wiring.
//!
//! Everything that touches the browser is gated behind the `hydrate` feature so
//! the pure parts ([`boot`], [`preference`] fallbacks) build and test natively.

pub mod boot;
pub mod preference;

#[cfg(feature = "hydrate")]
pub mod dom;
#[cfg(feature = "hydrate")]
pub mod timer;

#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use engine::sync::{SyncOutcome, ThemeSync};
#[cfg(feature = "hydrate")]
use engine::theme::Theme;
#[cfg(feature = "hydrate")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(feature = "hydrate")]
type BrowserSync = ThemeSync<dom::BrowserPage, timer::BrowserClock>;

/// Module entry point: install logging, then start following the preference.
#[cfg(feature = "hydrate")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Trace).is_err() {
        // Another module on the page already owns the logger.
        log::debug!("console logger already installed");
    }

    let config = boot::load_config(boot::read_override().as_deref());
    log::set_max_level(config.level_filter());

    let host = boot::current_host().unwrap_or_default();
    if !config.allows_host(&host) {
        log::debug!("not enabled on {host}");
        return;
    }

    let Some(page) = dom::BrowserPage::new() else {
        log::warn!("no document to drive");
        return;
    };
    let sync = match ThemeSync::new(page, timer::BrowserClock, config) {
        Ok(sync) => Rc::new(sync),
        Err(err) => {
            log::error!("theme sync disabled: {err}");
            return;
        }
    };

    spawn_sync(&sync, preference::desired_theme());

    let listener = Rc::clone(&sync);
    if !preference::subscribe(move |theme| spawn_sync(&listener, theme)) {
        log::warn!("color-scheme changes will not be followed");
    }
}

#[cfg(feature = "hydrate")]
fn spawn_sync(sync: &Rc<BrowserSync>, desired: Theme) {
    let sync = Rc::clone(sync);
    wasm_bindgen_futures::spawn_local(async move {
        match sync.sync(desired).await {
            SyncOutcome::Navigated(navigation) => log::info!("theme {desired}: {navigation:?}"),
            SyncOutcome::GaveUp => log::info!("theme {desired}: no menu layout matched"),
            outcome => log::debug!("theme {desired}: {outcome:?}"),
        }
    });
}
