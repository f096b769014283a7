use egui::{Color32, Rect, Sense};

use crate::geometry::FrameLayout;
use crate::renderer::Renderer;
use crate::state::EditorState;

/// Lay out and paint the canvas. The canvas takes all remaining space; the
/// layout is synced into `state` before painting so the canvas is drawn at
/// this frame's size.
pub fn central_panel(
    ctx: &egui::Context,
    state: &mut EditorState,
    renderer: &mut Renderer,
    trash: Rect,
    fill: Color32,
) -> Rect {
    egui::CentralPanel::default()
        .show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
            state.sync_layout(FrameLayout {
                canvas: rect,
                overlay: ctx.screen_rect(),
                trash,
            });

            let painter = ui.painter_at(rect);
            renderer.paint_canvas(ctx, &painter, state.canvas(), rect, fill);
            rect
        })
        .inner
}
