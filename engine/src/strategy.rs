//! Menu navigation: one state machine, parameterized per header layout.
//!
//! ARCHITECTURE
//! ============
//! An attempt walks the stages in [`Stage`] order:
//!
//! ```text
//! LocateTrigger -> OpenMenu -> LocateThemeEntry -> CheckAlreadyCorrect
//!   -> OpenSubmenu -> LocateOption -> Commit -> (frame) -> close sequence
//! ```
//!
//! Any stage can fail, either because its lookup found nothing within its wait
//! budget or because the page raised an error. Failure ends the attempt where
//! it stands; nothing is rolled back, and the close sequence of a later
//! successful attempt collapses whatever was left open.
//!
//! A [`Layout`] carries everything that differs between page variants:
//! trigger selectors, how the menu panel and submenu are recognized, which
//! items are candidates, and the wait budgets. Vocabulary and event mechanics
//! are shared.

#[cfg(test)]
#[path = "strategy_test.rs"]
mod strategy_test;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::close::close_menus;
use crate::config::Timings;
use crate::consts::{ENTRY_CONTAINER_SELECTOR, POPOVER_SELECTOR, SUBMENU_PANEL_SELECTOR};
use crate::driver;
use crate::page::{Page, PageError, Scope, is_shown, trimmed_text};
use crate::theme::Theme;
use crate::vocab::Lexicon;
use crate::wait::wait_for_any;

// =============================================================================
// LAYOUT
// =============================================================================

/// How the menu panel holding the theme entry is found once the trigger is hovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuLocator {
    /// A popover nested inside the trigger; once it is shown, its content panel.
    Nested { popover: String, panel: String },
    /// The first shown popover anywhere in the document.
    AnyVisible { popover: String },
}

/// Candidate items under a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub selector: String,
    /// Skip candidates that are not rendered.
    #[serde(default)]
    pub visible_only: bool,
}

impl ItemQuery {
    fn new(selector: &str, visible_only: bool) -> Self {
        Self { selector: selector.to_string(), visible_only }
    }
}

/// How the theme submenu is recognized after hovering the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuLocator {
    /// Structural selector for the submenu panel; accepted when shown.
    pub panel: String,
    /// Otherwise, any shown popover matching this selector whose text
    /// mentions a theme value.
    #[serde(default)]
    pub fallback_popover: Option<String>,
}

/// Wait budgets per stage in milliseconds; `None` uses the default budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageBudgets {
    pub trigger_ms: Option<u64>,
    pub menu_ms: Option<u64>,
    pub submenu_ms: Option<u64>,
}

/// One page variant the navigator knows how to drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    /// Trigger selectors in priority order.
    pub triggers: Vec<String>,
    pub menu: MenuLocator,
    pub entry: ItemQuery,
    /// Ancestor of the entry that owns its submenu; the entry itself when absent.
    #[serde(default = "default_entry_container")]
    pub entry_container: String,
    pub submenu: SubmenuLocator,
    pub option: ItemQuery,
    #[serde(default)]
    pub budgets: StageBudgets,
}

fn default_entry_container() -> String {
    ENTRY_CONTAINER_SELECTOR.to_string()
}

impl Layout {
    /// The main-site header: avatar `li` with a nested popover and a
    /// right-hand theme submenu.
    #[must_use]
    pub fn header_avatar() -> Self {
        Self {
            name: "header-avatar".into(),
            triggers: vec!["li.v-popover-wrap.header-avatar-wrap".into()],
            menu: MenuLocator::Nested {
                popover: "div.v-popover".into(),
                panel: ".v-popover-content.avatar-popover".into(),
            },
            entry: ItemQuery::new(".links-item .v-popover-wrap > a.single-link-item .link-title span", false),
            entry_container: default_entry_container(),
            submenu: SubmenuLocator { panel: SUBMENU_PANEL_SELECTOR.into(), fallback_popover: None },
            option: ItemQuery::new("a.single-link-item.sub-link-item", true),
            budgets: StageBudgets { trigger_ms: Some(2500), menu_ms: Some(800), submenu_ms: Some(800) },
        }
    }

    /// Other sub-sites: common avatar placements, any visible popover, and a
    /// content-based submenu fallback.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            name: "generic".into(),
            triggers: [
                ".header-avatar-wrap",
                ".right-entry .header-avatar",
                ".header-entry-mini .avatar",
                ".nav-header .avatar",
                ".side-header .avatar",
                ".bili-dyn-header__avatar",
                "#i_cecream .header-login-entry .avatar",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            menu: MenuLocator::AnyVisible { popover: POPOVER_SELECTOR.into() },
            entry: ItemQuery::new(r#"a, button, div, li, [role="menuitem"], [role="menuitemradio"]"#, true),
            entry_container: default_entry_container(),
            submenu: SubmenuLocator {
                panel: SUBMENU_PANEL_SELECTOR.into(),
                fallback_popover: Some(POPOVER_SELECTOR.into()),
            },
            option: ItemQuery::new(
                r#"a.single-link-item.sub-link-item, a, [role="menuitem"], [role="menuitemradio"]"#,
                true,
            ),
            budgets: StageBudgets { trigger_ms: Some(2000), menu_ms: Some(600), submenu_ms: Some(800) },
        }
    }
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Stages of one navigation attempt, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LocateTrigger,
    OpenMenu,
    LocateThemeEntry,
    CheckAlreadyCorrect,
    OpenSubmenu,
    LocateOption,
    Commit,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LocateTrigger => "locate trigger",
            Self::OpenMenu => "open menu",
            Self::LocateThemeEntry => "locate theme entry",
            Self::CheckAlreadyCorrect => "check current theme",
            Self::OpenSubmenu => "open submenu",
            Self::LocateOption => "locate option",
            Self::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Why an attempt stopped short.
#[derive(Debug, thiserror::Error)]
pub enum NavigateError {
    #[error("{0}: not found")]
    NotFound(Stage),
    #[error("{stage}: {source}")]
    Page {
        stage: Stage,
        #[source]
        source: PageError,
    },
}

impl NavigateError {
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::NotFound(stage) | Self::Page { stage, .. } => *stage,
        }
    }
}

fn at(stage: Stage) -> impl Fn(PageError) -> NavigateError {
    move |source| NavigateError::Page { stage, source }
}

/// How a successful attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The theme entry already showed the desired value; nothing was clicked.
    AlreadyCorrect,
    /// The matching option was clicked and the menus were closed.
    Committed,
}

/// Drives one layout against a page.
pub struct Navigator<'a, P: Page, C: Clock> {
    pub page: &'a P,
    pub clock: &'a C,
    pub lexicon: &'a Lexicon,
    pub timings: &'a Timings,
    /// Popovers the close sequence collapses.
    pub popover_selector: &'a str,
}

impl<P: Page, C: Clock> Navigator<'_, P, C> {
    /// Run one attempt of `layout` towards `desired`.
    ///
    /// # Errors
    ///
    /// Returns the stage that failed and why. The page may be left with a
    /// menu open.
    pub async fn run(&self, layout: &Layout, desired: Theme) -> Result<Navigation, NavigateError> {
        let page = self.page;

        let trigger = wait_for_any(page, self.clock, self.timings.wait(layout.budgets.trigger_ms), &layout.triggers)
            .await
            .ok_or(NavigateError::NotFound(Stage::LocateTrigger))?;

        driver::hover(page, &trigger).map_err(at(Stage::OpenMenu))?;
        self.clock.sleep(self.timings.hover_settle()).await;

        let entry = self
            .timings
            .wait(layout.budgets.menu_ms)
            .until(self.clock, || self.find_entry(layout, &trigger))
            .await
            .ok_or(NavigateError::NotFound(Stage::LocateThemeEntry))?;

        let current = trimmed_text(page, &entry);
        if self.lexicon.shows(&current, desired) {
            log::debug!("{}: menu already shows {desired}", layout.name);
            return Ok(Navigation::AlreadyCorrect);
        }

        let container = page
            .closest(&entry, &layout.entry_container)
            .map_err(at(Stage::OpenSubmenu))?
            .unwrap_or_else(|| entry.clone());
        driver::hover(page, &container).map_err(at(Stage::OpenSubmenu))?;
        self.clock.sleep(self.timings.hover_settle()).await;

        let submenu = self
            .timings
            .wait(layout.budgets.submenu_ms)
            .until(self.clock, || self.find_submenu(layout))
            .await
            .ok_or(NavigateError::NotFound(Stage::OpenSubmenu))?;

        let option = self
            .find_labelled(&submenu, &layout.option, |text| self.lexicon.names_option(text, desired))
            .map_err(at(Stage::LocateOption))?
            .ok_or(NavigateError::NotFound(Stage::LocateOption))?;

        driver::hover(page, &option).map_err(at(Stage::Commit))?;
        self.clock.sleep(self.timings.pre_click()).await;
        driver::click(page, &option).map_err(at(Stage::Commit))?;

        self.clock.next_frame().await;
        close_menus(page, &trigger, self.popover_selector);
        Ok(Navigation::Committed)
    }

    /// The theme entry inside the open menu panel, once both exist.
    fn find_entry(&self, layout: &Layout, trigger: &P::Node) -> Result<Option<P::Node>, PageError> {
        let Some(panel) = self.open_panel(&layout.menu, trigger)? else {
            return Ok(None);
        };
        self.find_labelled(&panel, &layout.entry, |text| self.lexicon.is_theme_entry(text))
    }

    fn open_panel(&self, menu: &MenuLocator, trigger: &P::Node) -> Result<Option<P::Node>, PageError> {
        let page = self.page;
        match menu {
            MenuLocator::Nested { popover, panel } => {
                let Some(popover) = page.query(Scope::Node(trigger), popover)? else {
                    return Ok(None);
                };
                if !is_shown(page, &popover) {
                    return Ok(None);
                }
                page.query(Scope::Node(&popover), panel)
            }
            MenuLocator::AnyVisible { popover } => Ok(page
                .query_all(Scope::Document, popover)?
                .into_iter()
                .find(|p| is_shown(page, p))),
        }
    }

    fn find_submenu(&self, layout: &Layout) -> Result<Option<P::Node>, PageError> {
        let page = self.page;
        if let Some(panel) = page.query(Scope::Document, &layout.submenu.panel)? {
            if is_shown(page, &panel) {
                return Ok(Some(panel));
            }
        }
        let Some(fallback) = &layout.submenu.fallback_popover else {
            return Ok(None);
        };
        Ok(page
            .query_all(Scope::Document, fallback)?
            .into_iter()
            .find(|p| is_shown(page, p) && self.lexicon.hints_submenu(&page.text(p))))
    }

    /// First candidate under `root` whose trimmed text satisfies `wanted`.
    fn find_labelled(
        &self,
        root: &P::Node,
        query: &ItemQuery,
        wanted: impl Fn(&str) -> bool,
    ) -> Result<Option<P::Node>, PageError> {
        let page = self.page;
        Ok(page
            .query_all(Scope::Node(root), &query.selector)?
            .into_iter()
            .filter(|n| !query.visible_only || is_shown(page, n))
            .find(|n| wanted(&trimmed_text(page, n))))
    }
}
