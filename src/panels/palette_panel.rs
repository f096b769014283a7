use egui::{Rect, Sense, vec2};

use crate::event::ActivityLog;
use crate::renderer::Renderer;
use crate::state::EditorState;

const TRASH_HEIGHT: f32 = 80.0;
const SWATCH_PADDING: f32 = 8.0;

/// Buttons in the palette panel that need the app to act
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    SelectBackground,
    SaveImage,
}

/// Where things ended up this frame, in window coordinates
#[derive(Debug, Clone)]
pub struct PalettePanelOutput {
    pub slots: Vec<Rect>,
    pub trash: Rect,
    pub action: Option<PanelAction>,
}

pub fn palette_panel(
    ctx: &egui::Context,
    state: &EditorState,
    renderer: &Renderer,
    activity: &ActivityLog,
    trash_armed: bool,
) -> PalettePanelOutput {
    // A trash that never got laid out must not catch drops
    let mut output = PalettePanelOutput {
        slots: Vec::new(),
        trash: Rect::NOTHING,
        action: None,
    };

    egui::SidePanel::left("palette_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Photo Decorator");
            ui.separator();

            if ui.button("🖼 Select background…").clicked() {
                output.action = Some(PanelAction::SelectBackground);
            }
            let save = ui
                .add_enabled(state.can_export(), egui::Button::new("💾 Save image…"))
                .on_disabled_hover_text("Select a background image first");
            if save.clicked() {
                output.action = Some(PanelAction::SaveImage);
            }

            ui.separator();
            ui.label("Drag a marker onto the photo:");

            for template in state.palette() {
                let size = vec2(ui.available_width(), template.diameter + SWATCH_PADDING);
                let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
                renderer.paint_swatch(ui.painter(), rect, template, response.hovered());
                output.slots.push(rect);
            }

            ui.separator();
            let (trash, _) =
                ui.allocate_exact_size(vec2(ui.available_width(), TRASH_HEIGHT), Sense::hover());
            renderer.paint_trash(ui.painter(), trash, trash_armed);
            output.trash = trash;

            ui.separator();
            ui.label(format!("Markers: {}", state.canvas().markers().len()));
            for line in activity.recent() {
                ui.small(line);
            }
        });

    output
}
