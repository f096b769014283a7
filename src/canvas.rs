use egui::{Pos2, Rect, Vec2};

use crate::background::BackgroundImage;
use crate::geometry::hit_testing;
use crate::marker::{Marker, MarkerId};

/// The composable surface: an optional background photo with markers on
/// top, painted in insertion order.
#[derive(Debug, Default)]
pub struct Canvas {
    size: Vec2,
    markers: Vec<Marker>,
    background: Option<BackgroundImage>,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            markers: Vec::new(),
            background: None,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Follow the size of the layout region the canvas occupies
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
    }

    /// Canvas bounds in canvas-local coordinates
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|marker| marker.is_visible())
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id() == id)
    }

    pub fn marker_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().find(|marker| marker.id() == id)
    }

    pub fn contains_marker(&self, id: MarkerId) -> bool {
        self.marker(id).is_some()
    }

    pub(crate) fn push_marker(&mut self, marker: Marker) -> &Marker {
        let index = self.markers.len();
        self.markers.push(marker);
        &self.markers[index]
    }

    /// Remove a marker for good. Removing an absent marker is a no-op.
    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| marker.id() == id)?;
        Some(self.markers.remove(index))
    }

    /// Topmost visible drag source under `pos` (canvas-local)
    pub fn draggable_marker_at(&self, pos: Pos2) -> Option<MarkerId> {
        hit_testing::topmost_hit(
            self.markers
                .iter()
                .filter(|marker| marker.is_visible() && marker.is_draggable()),
            pos,
        )
        .map(Marker::id)
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Swap in a new background, handing back the previous one
    pub fn set_background(&mut self, background: BackgroundImage) -> Option<BackgroundImage> {
        self.background.replace(background)
    }
}
