//! Locale vocabulary: how menu labels name the theme setting and its values.
//!
//! Menu items carry no stable identifiers, so entries and options are found by
//! their visible text. The patterns live in a serializable table; [`Lexicon`]
//! is the compiled form the navigator queries.

#[cfg(test)]
#[path = "vocab_test.rs"]
mod vocab_test;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::theme::Theme;

/// Regex sources for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Matches the trimmed text of the theme menu entry.
    pub theme_label: String,
    /// The entry text shows the light theme as current.
    pub current_light: String,
    /// The entry text shows the dark theme as current.
    pub current_dark: String,
    /// Text of the submenu option selecting light.
    pub option_light: String,
    /// Text of the submenu option selecting dark.
    pub option_dark: String,
    /// Any theme word; identifies a submenu by its content.
    pub submenu_hint: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::zh_cn()
    }
}

impl Vocabulary {
    /// Simplified Chinese labels with English fallbacks for options.
    #[must_use]
    pub fn zh_cn() -> Self {
        Self {
            theme_label: r"^\s*主题\s*：".into(),
            current_light: "浅色".into(),
            current_dark: "深色|暗色|夜间".into(),
            option_light: "(?i)(浅色|亮色|日间|Light)".into(),
            option_dark: "(?i)(深色|暗色|夜间|Dark)".into(),
            submenu_hint: "深色|浅色|Dark|Light".into(),
        }
    }

    /// Compile every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] naming the first field that fails.
    pub fn compile(&self) -> Result<Lexicon, ConfigError> {
        Ok(Lexicon {
            theme_label: compile("theme_label", &self.theme_label)?,
            current_light: compile("current_light", &self.current_light)?,
            current_dark: compile("current_dark", &self.current_dark)?,
            option_light: compile("option_light", &self.option_light)?,
            option_dark: compile("option_dark", &self.option_dark)?,
            submenu_hint: compile("submenu_hint", &self.submenu_hint)?,
        })
    }
}

fn compile(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Pattern { field, source })
}

/// Compiled [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    theme_label: Regex,
    current_light: Regex,
    current_dark: Regex,
    option_light: Regex,
    option_dark: Regex,
    submenu_hint: Regex,
}

impl Lexicon {
    /// Whether `text` is the theme entry label.
    #[must_use]
    pub fn is_theme_entry(&self, text: &str) -> bool {
        self.theme_label.is_match(text)
    }

    /// Whether the theme entry text already shows `theme` as current.
    #[must_use]
    pub fn shows(&self, text: &str, theme: Theme) -> bool {
        match theme {
            Theme::Light => self.current_light.is_match(text),
            Theme::Dark => self.current_dark.is_match(text),
        }
    }

    /// Whether an option labelled `text` selects `theme`.
    #[must_use]
    pub fn names_option(&self, text: &str, theme: Theme) -> bool {
        match theme {
            Theme::Light => self.option_light.is_match(text),
            Theme::Dark => self.option_dark.is_match(text),
        }
    }

    /// Whether `text` mentions any theme value.
    #[must_use]
    pub fn hints_submenu(&self, text: &str) -> bool {
        self.submenu_hint.is_match(text)
    }
}
