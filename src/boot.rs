//! Startup inputs: the config override and the current host.
//!
//! The override lives in `localStorage` so it can be changed from the devtools
//! console without rebuilding. A bad override never disables the binding; it
//! is reported and the defaults are used instead.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use engine::config::{ConfigError, SyncConfig};

/// `localStorage` key holding a partial JSON [`SyncConfig`].
pub const STORAGE_KEY: &str = "theme_follow_config";

/// Resolve the effective config from an optional raw override.
#[must_use]
pub fn load_config(raw: Option<&str>) -> SyncConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return SyncConfig::default();
    };
    match parse_override(raw) {
        Ok(config) => {
            log::debug!("using config override from `{STORAGE_KEY}`");
            config
        }
        Err(err) => {
            log::warn!("ignoring `{STORAGE_KEY}`: {err}");
            SyncConfig::default()
        }
    }
}

/// Parse, validate and trial-compile the vocabulary so that every failure
/// surfaces here rather than when the engine is built.
fn parse_override(raw: &str) -> Result<SyncConfig, ConfigError> {
    let config = SyncConfig::from_json(raw)?;
    config.vocabulary.compile()?;
    Ok(config)
}

/// The raw override, if one is stored.
#[must_use]
pub fn read_override() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        storage.get_item(STORAGE_KEY).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Hostname of the current page.
#[must_use]
pub fn current_host() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()?.location().hostname().ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
