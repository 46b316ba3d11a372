use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use opsdesk::Value;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Status badge colours: status value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the status column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(values: &BTreeSet<Value>) -> Self {
        let labels: BTreeSet<String> = values
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| v.text().into_owned())
            .collect();
        let palette = generate_palette(labels.len());
        let mapping = labels.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, status: &str) -> Color32 {
        self.mapping
            .get(status)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn unknown_status_uses_default() {
        let values: BTreeSet<Value> =
            ["paid", "failed"].into_iter().map(Value::from).chain([Value::Null]).collect();
        let map = ColorMap::new(&values);
        assert_ne!(map.color_for("paid"), map.color_for("failed"));
        assert_eq!(map.color_for("refunded"), Color32::GRAY);
    }
}
