//! System color-scheme preference.
//!
//! Reads `prefers-color-scheme: dark` and subscribes to its changes. Older
//! engines expose only the legacy `MediaQueryList.addListener`; it is used when
//! `addEventListener` is unavailable.

#[cfg(test)]
#[path = "preference_test.rs"]
mod preference_test;

use engine::theme::Theme;

#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;
#[cfg(feature = "hydrate")]
use wasm_bindgen::closure::Closure;

pub const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

#[cfg(feature = "hydrate")]
fn media_query() -> Option<web_sys::MediaQueryList> {
    web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

/// Whether the system currently prefers dark. `false` outside a browser.
#[must_use]
pub fn prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        media_query().is_some_and(|query| query.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// The theme the page should show right now.
#[must_use]
pub fn desired_theme() -> Theme {
    Theme::from_prefers_dark(prefers_dark())
}

/// Call `on_change` with the new theme whenever the preference flips.
///
/// The listener lives for the rest of the page. Returns `false` when no
/// subscription could be made.
pub fn subscribe(on_change: impl Fn(Theme) + 'static) -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(query) = media_query() else {
            return false;
        };
        let closure = Closure::wrap(Box::new(move |event: web_sys::MediaQueryListEvent| {
            on_change(Theme::from_prefers_dark(event.matches()));
        }) as Box<dyn FnMut(_)>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();

        let attached = if query.add_event_listener_with_callback("change", callback).is_ok() {
            true
        } else {
            log::debug!("addEventListener unsupported on MediaQueryList; using addListener");
            query.add_listener_with_opt_callback(Some(callback)).is_ok()
        };
        closure.forget();
        attached
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = on_change;
        false
    }
}
