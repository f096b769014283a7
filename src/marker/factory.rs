use egui::Pos2;

use super::{Marker, PaletteTemplate};
use crate::canvas::Canvas;

/// Place a new marker styled after `template`, centered on `position`
/// (canvas-local), and register it as a drag source.
///
/// The style is copied by value, so later edits to the template never reach
/// markers already on the canvas.
pub fn create_marker<'a>(
    canvas: &'a mut Canvas,
    template: &PaletteTemplate,
    position: Pos2,
) -> &'a Marker {
    let size = template.size();
    let mut marker = Marker::new(size, template.style, position - size / 2.0);
    marker.register_drag_source();

    log::debug!(
        "Placing {} marker {} at ({:.1}, {:.1})",
        template.name,
        marker.id(),
        position.x,
        position.y
    );

    canvas.push_marker(marker)
}
