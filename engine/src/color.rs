//! CSS color parsing and relative luminance.
//!
//! Computed styles report colors as `rgb(r, g, b)` / `rgba(r, g, b, a)`, or in
//! the space-separated `rgb(r g b / a)` form on newer engines. Hex literals are
//! accepted as well so configuration and tests can use them.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// An sRGB color with 0-255 channels and 0-1 alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Fully transparent colors carry no background information.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Relative luminance with BT.709 weights over linearized channels.
    #[must_use]
    pub fn luminance(&self) -> f64 {
        let r = linearize(self.r / 255.0);
        let g = linearize(self.g / 255.0);
        let b = linearize(self.b / 255.0);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

fn linearize(v: f64) -> f64 {
    if v <= 0.039_28 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
}

/// Parse a computed CSS color value.
///
/// Returns `None` for keywords other than `transparent` and for color
/// functions the sampler does not understand.
#[must_use]
pub fn parse_css_color(raw: &str) -> Option<Rgba> {
    let value = raw.trim().to_ascii_lowercase();
    if value == "transparent" {
        return Some(Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 });
    }
    if value.starts_with('#') {
        return parse_hex_rgb(&value).map(|(r, g, b)| Rgba::opaque(f64::from(r), f64::from(g), f64::from(b)));
    }

    let body = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<&str> = body
        .split([',', '/', ' '])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    let a = match parts.get(3) {
        Some(raw_alpha) => parse_alpha(raw_alpha)?,
        None => 1.0,
    };
    Some(Rgba { r, g, b, a })
}

fn parse_channel(raw: &str) -> Option<f64> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? * 2.55,
        None => raw.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value.clamp(0.0, 255.0))
}

fn parse_alpha(raw: &str) -> Option<f64> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok()? / 100.0,
        None => raw.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value.clamp(0.0, 1.0))
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}
