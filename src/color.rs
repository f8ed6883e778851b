use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::HeatLevel;

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
            let hsl = Hsl::new(hue, 0.65, 0.45);
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
// Classification badges
// ---------------------------------------------------------------------------

/// Maps classification labels to distinct badge colours.
#[derive(Debug, Clone, Default)]
pub struct ClassColors {
    mapping: BTreeMap<String, Color32>,
}

impl ClassColors {
    /// One colour per label, assigned in the given order.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(label, color)| (label.to_string(), color))
            .collect();
        ClassColors { mapping }
    }

    /// Unknown and empty labels are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Coverage heat map
// ---------------------------------------------------------------------------

/// Text colour for a coverage-days cell.
pub fn heat_color(level: HeatLevel) -> Color32 {
    match level {
        HeatLevel::Low => Color32::from_rgb(220, 70, 60),
        HeatLevel::Mid => Color32::from_rgb(230, 165, 40),
        HeatLevel::High => Color32::from_rgb(70, 170, 90),
    }
}
