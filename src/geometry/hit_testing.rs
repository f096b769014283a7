use egui::{Pos2, Rect};

use crate::marker::Marker;

/// Inclusive point-in-circle test
pub fn circle_contains(center: Pos2, radius: f32, pos: Pos2) -> bool {
    center.distance_sq(pos) <= radius * radius
}

/// Last marker in paint order whose circle contains `pos`
pub fn topmost_hit<'a, I>(markers: I, pos: Pos2) -> Option<&'a Marker>
where
    I: DoubleEndedIterator<Item = &'a Marker>,
{
    markers.rev().find(|marker| marker.hit_test(pos))
}

/// Index of the first slot containing `pos`
pub fn slot_at(slots: &[Rect], pos: Pos2) -> Option<usize> {
    slots.iter().position(|slot| slot.contains(pos))
}
