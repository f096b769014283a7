use egui::{Pos2, Rect};
use std::path::Path;

use crate::background::{self, BackgroundImage};
use crate::canvas::Canvas;
use crate::config::EditorSettings;
use crate::drag::{DragCoordinator, DragOutcome, DragPayload, DragSignal};
use crate::error::Result;
use crate::event::{EditorEvent, EventBus};
use crate::export::{CanvasExporter, ExportFormat, ExportOptions};
use crate::geometry::{Frame, FrameLayout, hit_testing};
use crate::marker::{MarkerId, PaletteTemplate, create_marker};

/// Everything the editor knows, independent of the UI toolkit.
///
/// The app feeds it layout and drag signals each frame; it mutates the
/// canvas and announces what happened on its event bus.
#[derive(Debug)]
pub struct EditorState {
    canvas: Canvas,
    coordinator: DragCoordinator,
    palette: Vec<PaletteTemplate>,
    /// Window-space rects of the palette swatches, in palette order
    palette_slots: Vec<Rect>,
    layout: FrameLayout,
    events: EventBus,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl EditorState {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            canvas: Canvas::default(),
            coordinator: DragCoordinator::new(settings.ghost_opacity),
            palette: settings.palette.clone(),
            palette_slots: Vec::new(),
            layout: FrameLayout::default(),
            events: EventBus::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn coordinator(&self) -> &DragCoordinator {
        &self.coordinator
    }

    pub fn palette(&self) -> &[PaletteTemplate] {
        &self.palette
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Take in this frame's geometry. The canvas follows its layout region.
    pub fn sync_layout(&mut self, layout: FrameLayout) {
        self.layout = layout;
        self.canvas.set_size(layout.canvas.size());
    }

    pub fn set_palette_slots(&mut self, slots: Vec<Rect>) {
        self.palette_slots = slots;
    }

    /// Drag source under a window-space position: palette swatches first,
    /// then the topmost marker on the canvas.
    pub fn drag_source_at(&self, window_pos: Pos2) -> Option<DragPayload> {
        if let Some(index) = hit_testing::slot_at(&self.palette_slots, window_pos) {
            return Some(DragPayload::Template(index));
        }
        if !self.layout.is_in_canvas(window_pos) {
            return None;
        }
        let canvas_pos = self.layout.transform(window_pos, Frame::Window, Frame::Canvas);
        self.canvas
            .draggable_marker_at(canvas_pos)
            .map(DragPayload::Marker)
    }

    /// Route a drag signal: marker drags go through the coordinator,
    /// palette drops place a new marker.
    pub fn dispatch(&mut self, signal: DragSignal) -> Option<DragOutcome> {
        if let DragSignal::Dropped {
            payload: DragPayload::Template(index),
            position,
        } = signal
        {
            self.drop_template(index, position);
            return None;
        }

        let outcome = self
            .coordinator
            .handle(&signal, &mut self.canvas, &self.layout);
        if let Some(outcome) = outcome {
            self.events.emit(outcome.into());
        }
        outcome
    }

    fn drop_template(&mut self, index: usize, window_pos: Pos2) {
        if !self.layout.is_in_canvas(window_pos) {
            log::debug!("Palette drop outside the canvas ignored");
            return;
        }
        let canvas_pos = self.layout.transform(window_pos, Frame::Window, Frame::Canvas);
        self.place_marker(index, canvas_pos);
    }

    /// Create a marker from palette entry `index`, centered on `canvas_pos`
    pub fn place_marker(&mut self, index: usize, canvas_pos: Pos2) -> Option<MarkerId> {
        let Some(template) = self.palette.get(index) else {
            log::warn!("No palette entry {}", index);
            return None;
        };
        let marker = create_marker(&mut self.canvas, template, canvas_pos);
        let event = EditorEvent::MarkerPlaced {
            id: marker.id(),
            template: template.name.clone(),
            center: marker.center(),
        };
        let id = marker.id();
        self.events.emit(event);
        Some(id)
    }

    pub fn set_background(&mut self, background: BackgroundImage) {
        let event = EditorEvent::BackgroundLoaded {
            source: background.source().map(Path::to_path_buf),
            width: background.width(),
            height: background.height(),
        };
        self.canvas.set_background(background);
        self.events.emit(event);
    }

    /// Decode `path` and make it the background. On failure the previous
    /// background stays in place.
    pub fn load_background(&mut self, path: &Path) -> Result<()> {
        let background = background::load_background(path)?;
        self.set_background(background);
        Ok(())
    }

    /// Export is only offered once there is a background to decorate
    pub fn can_export(&self) -> bool {
        self.canvas.has_background()
    }

    pub fn export(&self, path: &Path, options: ExportOptions) -> Result<ExportFormat> {
        let format = CanvasExporter::new(options).export_to_path(&self.canvas, path)?;
        self.events.emit(EditorEvent::CanvasExported {
            path: path.to_path_buf(),
            format,
        });
        Ok(format)
    }
}
