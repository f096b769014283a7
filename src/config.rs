use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::ExportOptions;
use crate::marker::{MarkerStyle, PaletteTemplate};

pub const MARKER_DIAMETER: f32 = 50.0;
pub const MARKER_STROKE_WIDTH: f32 = 3.0;
pub const GHOST_OPACITY: f32 = 0.6;
pub const DRAG_THRESHOLD: f32 = 5.0;

/// Exports are always rendered at one pixel per logical point.
pub const EXPORT_DPI: f32 = 96.0;
pub const JPEG_QUALITY: u8 = 95;

/// User settings, persisted between runs through eframe's storage.
///
/// Markers and the background image are never part of this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorSettings {
    pub ghost_opacity: f32,
    /// Pointer travel (in points) before a press turns into a drag
    pub drag_threshold: f32,
    /// Color painted beneath the background image, on screen and in exports
    pub canvas_fill: Color32,
    pub palette: Vec<PaletteTemplate>,
    pub last_open_dir: Option<PathBuf>,
    pub last_save_dir: Option<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            ghost_opacity: GHOST_OPACITY,
            drag_threshold: DRAG_THRESHOLD,
            canvas_fill: Color32::WHITE,
            palette: default_palette(),
            last_open_dir: None,
            last_save_dir: None,
        }
    }
}

impl EditorSettings {
    /// Clamp values restored from storage back into their valid ranges
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.ghost_opacity) {
            log::warn!("Ghost opacity {} out of range, resetting", self.ghost_opacity);
            self.ghost_opacity = GHOST_OPACITY;
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            self.drag_threshold = DRAG_THRESHOLD;
        }
        self.palette.retain(|template| template.diameter > 0.0);
        if self.palette.is_empty() {
            self.palette = default_palette();
        }
        self
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            dpi: EXPORT_DPI,
            jpeg_quality: JPEG_QUALITY,
            canvas_fill: self.canvas_fill,
        }
    }
}

pub fn default_palette() -> Vec<PaletteTemplate> {
    let swatch = |name: &str, fill: Color32, stroke: Color32| {
        PaletteTemplate::new(
            name,
            MARKER_DIAMETER,
            MarkerStyle::new(fill, stroke, MARKER_STROKE_WIDTH),
        )
    };

    vec![
        swatch("Red", Color32::from_rgb(230, 57, 70), Color32::from_rgb(140, 20, 30)),
        swatch("Blue", Color32::from_rgb(29, 110, 230), Color32::from_rgb(10, 50, 130)),
        swatch("Green", Color32::from_rgb(46, 184, 92), Color32::from_rgb(20, 100, 45)),
        swatch("Yellow", Color32::from_rgb(250, 204, 21), Color32::from_rgb(160, 120, 0)),
    ]
}
