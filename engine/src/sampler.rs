//! Background luminance sampling.
//!
//! Answers "does the page already look right?" without opening any menu, so an
//! already-matching page never flashes a popover.

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;

use crate::color::{Rgba, parse_css_color};
use crate::page::{Page, Scope};
use crate::theme::{SampledTheme, Theme};

/// Sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampler<'a> {
    /// Candidate roots, in priority order.
    pub roots: &'a [String],
    /// Ancestor levels inspected per root, the root included.
    pub depth: usize,
    /// Luminance below which the page counts as dark.
    pub threshold: f64,
}

impl Sampler<'_> {
    /// Classify the page by the first usable background found.
    pub fn sample<P: Page>(&self, page: &P) -> SampledTheme {
        for selector in self.roots {
            let root = match page.query(Scope::Document, selector) {
                Ok(Some(root)) => root,
                Ok(None) => continue,
                Err(err) => {
                    log::trace!("sample root skipped: {err}");
                    continue;
                }
            };
            if let Some(color) = effective_background(page, root, self.depth) {
                let luminance = color.luminance();
                log::trace!("sampled {selector}: luminance {luminance:.3}");
                return classify(luminance, self.threshold).into();
            }
        }
        SampledTheme::Unknown
    }
}

/// Dark below `threshold`, light at or above it.
#[must_use]
pub fn classify(luminance: f64, threshold: f64) -> Theme {
    if luminance < threshold { Theme::Dark } else { Theme::Light }
}

/// First ancestor-or-self background that is painted, solid-colored and parseable.
fn effective_background<P: Page>(page: &P, start: P::Node, depth: usize) -> Option<Rgba> {
    let mut seen: Vec<P::Node> = Vec::with_capacity(depth);
    let mut current = Some(start);
    while let Some(node) = current {
        if seen.len() >= depth || seen.contains(&node) {
            break;
        }
        if let Ok(style) = page.style(&node) {
            if style.has_no_background_image() {
                if let Some(color) = parse_css_color(&style.background_color) {
                    if !color.is_transparent() {
                        return Some(color);
                    }
                }
            }
        }
        current = page.parent(&node);
        seen.push(node);
    }
    None
}
