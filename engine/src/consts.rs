//! Shared default constants for the engine crate.

// ── Timing ──────────────────────────────────────────────────────

/// Pause after a hover so the hover-triggered panel can start mounting.
pub const HOVER_SETTLE_MS: u64 = 120;

/// Pause between hovering an option and clicking it.
pub const PRE_CLICK_MS: u64 = 20;

/// Interval between probe evaluations while waiting.
pub const POLL_INTERVAL_MS: u64 = 40;

/// Wait budget used when a caller does not supply one.
pub const DEFAULT_WAIT_MS: u64 = 1000;

/// Full strategy rounds (every strategy once per round) before giving up.
pub const MAX_ROUNDS: u32 = 2;

// ── Sampling ────────────────────────────────────────────────────

/// Relative luminance below which a background counts as dark.
pub const DARK_LUMINANCE_THRESHOLD: f64 = 0.45;

/// Ancestor levels inspected per candidate root, the root included.
pub const SAMPLE_DEPTH: usize = 6;

/// Candidate roots for background sampling, in priority order.
pub const SAMPLE_ROOTS: &[&str] = &[
    ":root",
    "body",
    "#i_cecream",
    "#app",
    ".bili-layout",
    ".bili-header",
    ".bili-dyn-home--container",
];

// ── Input ───────────────────────────────────────────────────────

/// Maximum inset of the synthetic pointer from an element's top-left corner.
pub const POINTER_INSET_PX: f64 = 10.0;

/// Inset of the outside click from the document element's top-left corner.
pub const OUTSIDE_CLICK_INSET_PX: f64 = 1.0;

// ── Menus ───────────────────────────────────────────────────────

/// Any hover popover, open or closed.
pub const POPOVER_SELECTOR: &str = ".v-popover";

/// Wrapper that owns a menu entry's hover submenu.
pub const ENTRY_CONTAINER_SELECTOR: &str = ".v-popover-wrap";

/// Right-hand submenu panel holding the theme options.
pub const SUBMENU_PANEL_SELECTOR: &str = ".v-popover.is-right .v-popover-content.sub-links-item";

// ── Hosts ───────────────────────────────────────────────────────

/// Hosts the binding activates on.
pub const HOSTS: &[&str] = &["www.bilibili.com", "search.bilibili.com"];
