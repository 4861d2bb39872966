use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use rusty_realty::data::model::{Column, RawValue};

// ---------------------------------------------------------------------------
// Dashboard accents
// ---------------------------------------------------------------------------

pub const ACCENT: Color32 = Color32::from_rgb(0xa0, 0x78, 0x30);
pub const ACCENT2: Color32 = Color32::from_rgb(0x4a, 0x90, 0x80);
pub const DANGER: Color32 = Color32::from_rgb(0xb0, 0x5a, 0x38);
pub const MUTED: Color32 = Color32::from_rgb(0x8a, 0x80, 0x78);

/// Bar colour of a column's histogram.
pub fn column_color(column: Column) -> Color32 {
    match column {
        Column::PriceUsd => ACCENT,
        Column::AreaM2 => ACCENT2,
        Column::PricePerM2 => DANGER,
    }
}

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
            let hsl = Hsl::new(hue, 0.55, 0.45);
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
// Color mapping: room label → Color32
// ---------------------------------------------------------------------------

/// Maps room labels to distinct colours for the scatter plot.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<RawValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(room_options: &BTreeSet<RawValue>) -> Self {
        let palette = generate_palette(room_options.len());
        let mapping = room_options.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: MUTED,
        }
    }

    /// Colour for a listing's room label; unlabelled listings get the muted tone.
    pub fn color_for(&self, rooms: Option<&RawValue>) -> Color32 {
        rooms
            .and_then(|v| self.mapping.get(v))
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        let unique: BTreeSet<[u8; 4]> = colours.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_rooms_get_default_colour() {
        let rooms: BTreeSet<RawValue> = [RawValue::Integer(1), RawValue::Integer(2)].into();
        let map = ColorMap::new(&rooms);
        assert_ne!(
            map.color_for(Some(&RawValue::Integer(1))),
            map.color_for(Some(&RawValue::Integer(2)))
        );
        assert_eq!(map.color_for(None), MUTED);
        assert_eq!(map.color_for(Some(&RawValue::Integer(9))), MUTED);
        assert_ne!(map.color_for(Some(&RawValue::Integer(1))), MUTED);
    }
}
