use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod factory;

pub use factory::create_marker;

/// Stable identity of a marker placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(Uuid);

impl MarkerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fill and outline of a circular marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub fill: Color32,
    pub stroke: Color32,
    pub stroke_width: f32,
}

impl MarkerStyle {
    pub fn new(fill: Color32, stroke: Color32, stroke_width: f32) -> Self {
        Self {
            fill,
            stroke,
            stroke_width,
        }
    }

    /// Same style with both colors faded by `opacity` (0..=1)
    pub fn faded(self, opacity: f32) -> Self {
        Self {
            fill: self.fill.gamma_multiply(opacity),
            stroke: self.stroke.gamma_multiply(opacity),
            stroke_width: self.stroke_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Style and size source for new markers. Never placed itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteTemplate {
    pub name: String,
    pub diameter: f32,
    pub style: MarkerStyle,
}

impl PaletteTemplate {
    pub fn new(name: &str, diameter: f32, style: MarkerStyle) -> Self {
        Self {
            name: name.to_owned(),
            diameter,
            style,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(self.diameter)
    }
}

/// A circle placed on the canvas.
///
/// `position` is the top-left corner of the bounding box in canvas-local
/// coordinates, so the center is `position + size / 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    size: Vec2,
    style: MarkerStyle,
    position: Pos2,
    visibility: Visibility,
    draggable: bool,
}

impl Marker {
    pub fn new(size: Vec2, style: MarkerStyle, position: Pos2) -> Self {
        Self {
            id: MarkerId::new(),
            size,
            style,
            position,
            visibility: Visibility::Visible,
            draggable: false,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn radius(&self) -> f32 {
        self.size.x.min(self.size.y) / 2.0
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn center(&self) -> Pos2 {
        self.position + self.size / 2.0
    }

    /// Move the marker so that its center lands on `center`
    pub fn set_center(&mut self, center: Pos2) {
        self.position = center - self.size / 2.0;
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Make this marker eligible to start drag gestures
    pub fn register_drag_source(&mut self) {
        self.draggable = true;
    }

    /// Whether `pos` (canvas-local) falls inside the circle
    pub fn hit_test(&self, pos: Pos2) -> bool {
        crate::geometry::hit_testing::circle_contains(self.center(), self.radius(), pos)
    }
}
