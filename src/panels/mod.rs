mod central_panel;
mod palette_panel;

pub use central_panel::central_panel;
pub use palette_panel::{PalettePanelOutput, PanelAction, palette_panel};
