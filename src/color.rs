use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let c: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

/// Cold-to-hot scale for prices: `t = 0` is deep blue, `t = 1` is red.
pub fn price_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let hsl = Hsl::new(240.0 * (1.0 - t), 0.85, 0.5);
    let rgb: Srgb = hsl.into_color();
    to_color32(rgb)
}

/// Diverging blue–white–red scale for correlation coefficients in `[-1, 1]`.
pub fn correlation_color(r: f64) -> Color32 {
    let r = r.clamp(-1.0, 1.0) as f32;
    let white = LinSrgb::new(1.0, 1.0, 1.0);
    let end = if r < 0.0 {
        LinSrgb::new(0.05, 0.15, 0.6)
    } else {
        LinSrgb::new(0.6, 0.02, 0.03)
    };
    to_color32(Srgb::from_linear(white.mix(end, r.abs())))
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

// ---------------------------------------------------------------------------
// Color mapping: listing type → Color32
// ---------------------------------------------------------------------------

/// Maps each listing type to a distinct colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the distinct listing types.
    pub fn new(types: &BTreeSet<String>) -> Self {
        let palette = generate_palette(types.len());
        let mapping = types.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given listing type.
    pub fn color_for(&self, kind: &str) -> Color32 {
        self.mapping
            .get(kind)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        let unique: BTreeSet<[u8; 4]> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_type_gets_default_colour() {
        let types: BTreeSet<String> = ["condos", "single_family"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&types);
        assert_ne!(map.color_for("condos"), map.color_for("single_family"));
        assert_eq!(map.color_for("castle"), Color32::GRAY);
    }

    #[test]
    fn correlation_scale_is_white_at_zero() {
        assert_eq!(correlation_color(0.0), Color32::from_rgb(255, 255, 255));
        let strong = correlation_color(1.0);
        assert!(strong.r() > strong.b());
        let negative = correlation_color(-1.0);
        assert!(negative.b() > negative.r());
    }

    #[test]
    fn channels_are_rounded_not_truncated() {
        assert_eq!(to_color32(Srgb::new(0.999, 0.5, 0.0)), Color32::from_rgb(255, 128, 0));
    }

    #[test]
    fn price_scale_runs_blue_to_red() {
        let low = price_color(0.0);
        let high = price_color(1.0);
        assert!(low.b() > low.r());
        assert!(high.r() > high.b());
    }
}
