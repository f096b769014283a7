use egui::{Pos2, Vec2};

use crate::marker::{Marker, MarkerStyle};

/// Translucent stand-in for a marker while it is being dragged.
///
/// Lives in overlay-local coordinates and never takes part in hit testing.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    size: Vec2,
    style: MarkerStyle,
    opacity: f32,
    position: Pos2,
}

impl Ghost {
    pub fn from_marker(marker: &Marker, overlay_position: Pos2, opacity: f32) -> Self {
        Self {
            size: marker.size(),
            style: marker.style(),
            opacity: opacity.clamp(0.0, 1.0),
            position: overlay_position,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Top-left corner, overlay-local
    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn center(&self) -> Pos2 {
        self.position + self.size / 2.0
    }

    pub fn set_center(&mut self, center: Pos2) {
        self.position = center - self.size / 2.0;
    }
}
