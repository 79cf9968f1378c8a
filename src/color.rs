use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{Table, Value};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.55);
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
// Color mapping: cell value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of one column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<Value, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the values present in `column`.
    /// Returns `None` when the table has no such column.
    pub fn for_column(table: &Table, column: &str) -> Option<Self> {
        let mut values: Vec<&Value> = table.column(column)?.collect();
        values.sort();
        values.dedup();

        // Start at a green hue so `false` (harmless) reads green and `true` red.
        let palette = generate_palette(values.len(), 120.0);
        let mapping = values
            .into_iter()
            .cloned()
            .zip(palette)
            .collect();

        Some(ColorMap {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        })
    }

    /// Look up the colour for a given cell value.
    pub fn color_for(&self, value: &Value) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0, 0.0).is_empty());
        let p = generate_palette(5, 30.0);
        assert_eq!(p.len(), 5);
        let distinct: std::collections::BTreeSet<[u8; 4]> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn maps_each_distinct_value() {
        let t = Table::from_records(
            &["Hazardous"],
            vec![
                vec![Value::Bool(true)],
                vec![Value::Bool(false)],
                vec![Value::Bool(true)],
            ],
        )
        .unwrap();
        let cm = ColorMap::for_column(&t, "Hazardous").unwrap();
        assert_eq!(cm.legend_entries().len(), 2);
        assert_ne!(cm.color_for(&Value::Bool(true)), cm.color_for(&Value::Bool(false)));
        assert_eq!(cm.color_for(&Value::Null), Color32::GRAY);
        assert!(ColorMap::for_column(&t, "Orbit ID").is_none());
    }
}
