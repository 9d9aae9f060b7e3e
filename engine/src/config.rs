//! Engine configuration.
//!
//! Every field has a default matching the tuned values for the two known
//! bilibili header layouts, so a host can start from `SyncConfig::default()`
//! and override only what it needs through a partial JSON document.
//!
//! TRADE-OFFS
//! ==========
//! The settle and poll delays are heuristics against a page whose render
//! timing is unspecified. They are exposed as tunables rather than replaced
//! with a layout-stability probe; the defaults keep the field-tested values.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DARK_LUMINANCE_THRESHOLD, DEFAULT_WAIT_MS, HOSTS, HOVER_SETTLE_MS, MAX_ROUNDS, POLL_INTERVAL_MS,
    POPOVER_SELECTOR, PRE_CLICK_MS, SAMPLE_DEPTH, SAMPLE_ROOTS,
};
use crate::strategy::Layout;
use crate::vocab::Vocabulary;
use crate::wait::Wait;

/// Error building or validating a [`SyncConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid pattern for `{field}`: {source}")]
    Pattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fixed pauses and the default wait budget, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub hover_settle_ms: u64,
    pub pre_click_ms: u64,
    pub poll_interval_ms: u64,
    pub default_wait_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            hover_settle_ms: HOVER_SETTLE_MS,
            pre_click_ms: PRE_CLICK_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            default_wait_ms: DEFAULT_WAIT_MS,
        }
    }
}

impl Timings {
    #[must_use]
    pub fn hover_settle(&self) -> Duration {
        Duration::from_millis(self.hover_settle_ms)
    }

    #[must_use]
    pub fn pre_click(&self) -> Duration {
        Duration::from_millis(self.pre_click_ms)
    }

    /// A wait of `budget_ms`, or the default budget when unset.
    #[must_use]
    pub fn wait(&self, budget_ms: Option<u64>) -> Wait {
        Wait::new(Duration::from_millis(budget_ms.unwrap_or(self.default_wait_ms)))
            .with_interval(Duration::from_millis(self.poll_interval_ms))
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub timings: Timings,
    /// Full passes over `layouts` before giving up.
    pub max_rounds: u32,
    /// Luminance below which the sampled background counts as dark.
    pub dark_threshold: f64,
    /// Ancestor levels inspected per sample root.
    pub sample_depth: usize,
    /// Sample roots in priority order.
    pub sample_roots: Vec<String>,
    /// Selector for every popover the close sequence should collapse.
    pub popover_selector: String,
    pub vocabulary: Vocabulary,
    /// Menu layouts, tried in order each round.
    pub layouts: Vec<Layout>,
    /// Hostnames the binding activates on; empty allows all.
    pub hosts: Vec<String>,
    /// `log` level name for the host's logger.
    pub log_level: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            max_rounds: MAX_ROUNDS,
            dark_threshold: DARK_LUMINANCE_THRESHOLD,
            sample_depth: SAMPLE_DEPTH,
            sample_roots: SAMPLE_ROOTS.iter().map(ToString::to_string).collect(),
            popover_selector: POPOVER_SELECTOR.to_string(),
            vocabulary: Vocabulary::zh_cn(),
            layouts: vec![Layout::header_avatar(), Layout::generic()],
            hosts: HOSTS.iter().map(ToString::to_string).collect(),
            log_level: "info".to_string(),
        }
    }
}

impl SyncConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when [`SyncConfig::validate`] rejects it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the engine spin or never act.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::Invalid("max_rounds must be at least 1".into()));
        }
        if self.timings.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }
        if !(self.dark_threshold > 0.0 && self.dark_threshold < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "dark_threshold must be within (0, 1), got {}",
                self.dark_threshold
            )));
        }
        if self.sample_depth == 0 {
            return Err(ConfigError::Invalid("sample_depth must be at least 1".into()));
        }
        if self.layouts.is_empty() {
            return Err(ConfigError::Invalid("at least one layout is required".into()));
        }
        if let Some(layout) = self.layouts.iter().find(|l| l.triggers.is_empty()) {
            return Err(ConfigError::Invalid(format!("layout `{}` has no trigger selectors", layout.name)));
        }
        Ok(())
    }

    /// Whether the binding should run on `host`.
    #[must_use]
    pub fn allows_host(&self, host: &str) -> bool {
        self.hosts.is_empty() || self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }

    /// The configured log level, `Info` when unrecognized.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
