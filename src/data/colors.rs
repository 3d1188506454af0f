//! Deterministic trace colors and color (de)serialization helpers.

use egui::Color32;

use crate::color_scheme::Palette;
use crate::data::experiment::ExperimentRegistry;

/// Running trace index of cycle `cycle` of `experiment`.
///
/// Counts the valid cycles of every experiment registered before `experiment`
/// and adds `cycle`. `None` if the experiment is not registered.
pub fn color_index(registry: &ExperimentRegistry, experiment: &str, cycle: usize) -> Option<usize> {
    let mut offset = 0;
    for (name, exp) in registry.iter() {
        if name == experiment {
            return Some(offset + cycle);
        }
        offset += exp.valid_cycle_count();
    }
    None
}

/// Color for cycle `cycle` of `experiment`, picked from `palette`.
pub fn trace_color(
    registry: &ExperimentRegistry,
    palette: Palette,
    experiment: &str,
    cycle: usize,
) -> Option<Color32> {
    color_index(registry, experiment, cycle).map(|i| palette.color(i))
}

/// Same hue with full alpha, from the unmultiplied channels.
pub fn opaque(c: Color32) -> Color32 {
    let [r, g, b, _] = c.to_srgba_unmultiplied();
    Color32::from_rgb(r, g, b)
}

/// Format as `#rrggbb` (alpha is dropped; trace colors are opaque).
pub fn to_hex(c: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

/// Parse `#rrggbb` or `rrggbb`.
pub fn from_hex(s: &str) -> Option<Color32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Color32::from_rgb(0x63, 0x6e, 0xfa);
        assert_eq!(to_hex(c), "#636efa");
        assert_eq!(from_hex("#636EFA"), Some(c));
    }

    #[test]
    fn opaque_drops_alpha_keeps_hue() {
        let c = Color32::from_rgba_unmultiplied(100, 50, 25, 128);
        let o = opaque(c);
        assert_eq!(o.a(), 255);
        for (got, want) in [o.r(), o.g(), o.b()].into_iter().zip([100u8, 50, 25]) {
            assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
        }
        assert_eq!(opaque(o), o);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert_eq!(from_hex("#12345"), None);
        assert_eq!(from_hex("zzzzzz"), None);
    }
}
