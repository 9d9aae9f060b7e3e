#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

/// The theme the page should show, derived from the system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Map the `prefers-color-scheme: dark` media query state to a theme.
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme the page currently appears to render, inferred from its background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampledTheme {
    Light,
    Dark,
    /// No candidate element had a usable opaque background.
    Unknown,
}

impl SampledTheme {
    /// Whether the sample positively confirms `desired`. `Unknown` never does.
    #[must_use]
    pub fn matches(self, desired: Theme) -> bool {
        matches!(
            (self, desired),
            (Self::Light, Theme::Light) | (Self::Dark, Theme::Dark)
        )
    }
}

impl From<Theme> for SampledTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
        }
    }
}
