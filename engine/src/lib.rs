//! Menu automation engine that keeps a page's theme in step with the system.
//!
//! The engine never touches the browser directly. It reads the page through the
//! [`page::Page`] trait, waits through the [`clock::Clock`] trait, and expresses
//! every interaction as a [`event::SyntheticEvent`] dispatched back into the page.
//! The host crate supplies `web_sys` implementations of both traits; tests supply
//! a scripted in-memory page with virtual time.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sync`] | Top-level [`sync::ThemeSync`]: busy guard, sampling, retry rounds |
//! | [`busy`] | Single-slot re-entrancy guard |
//! | [`strategy`] | Parameterized menu navigation state machine |
//! | [`close`] | Best-effort menu close sequence |
//! | [`driver`] | Hover / click / leave / Escape event sequences |
//! | [`wait`] | Poll-until-timeout helper |
//! | [`sampler`] | Background luminance sampling |
//! | [`color`] | CSS color parsing and relative luminance |
//! | [`vocab`] | Locale vocabulary tables and their compiled patterns |
//! | [`page`] | Document collaborator trait and geometry/style types |
//! | [`event`] | Synthetic event descriptors |
//! | [`clock`] | Timer collaborator trait |
//! | [`config`] | Serde-backed tunables and strategy layouts |
//! | [`theme`] | Desired and sampled theme values |
//! | [`consts`] | Default numeric and selector constants |

pub mod busy;
pub mod clock;
pub mod close;
pub mod color;
pub mod config;
pub mod consts;
pub mod driver;
pub mod event;
pub mod page;
pub mod sampler;
pub mod strategy;
pub mod sync;
pub mod theme;
pub mod vocab;
pub mod wait;

#[cfg(test)]
mod fake;
