use egui::{Align2, CursorIcon, Key};
use std::path::Path;

use crate::config::EditorSettings;
use crate::drag::{DragPayload, DragRecognizer};
use crate::error::DecoratorError;
use crate::event::{ActivityLog, LogEventHandler};
use crate::file_handler::FileHandler;
use crate::input::{InputEvent, InputHandler};
use crate::panels::{self, PanelAction};
use crate::renderer::Renderer;
use crate::state::EditorState;
use crate::util::time;

/// Modal message shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info { title: String, message: String },
    Error { title: String, message: String },
}

impl Notice {
    fn error(title: &str, err: &DecoratorError) -> Self {
        Self::Error {
            title: title.to_owned(),
            message: err.to_string(),
        }
    }
}

pub struct DecoratorApp {
    settings: EditorSettings,
    state: EditorState,
    renderer: Renderer,
    input: InputHandler,
    recognizer: DragRecognizer,
    file_handler: FileHandler,
    activity: ActivityLog,
    notice: Option<Notice>,
}

impl Default for DecoratorApp {
    fn default() -> Self {
        Self::with_settings(EditorSettings::default())
    }
}

impl DecoratorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: EditorSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings.sanitized())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let state = EditorState::new(&settings);
        let activity = ActivityLog::default();
        state.events().subscribe(Box::new(LogEventHandler));
        state.events().subscribe(Box::new(activity.clone()));

        Self {
            recognizer: DragRecognizer::new(settings.drag_threshold),
            settings,
            state,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            file_handler: FileHandler::new(),
            activity,
            notice: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    fn select_background(&mut self) {
        let Some(path) = self
            .file_handler
            .pick_background(self.settings.last_open_dir.as_deref())
        else {
            return;
        };
        self.settings.last_open_dir = path.parent().map(Path::to_path_buf);

        self.notice = Some(match self.state.load_background(&path) {
            Ok(()) => Notice::Info {
                title: "Background loaded".to_owned(),
                message: format!("Loaded {}", path.display()),
            },
            Err(err) => {
                log::error!("{}", err);
                Notice::error("Could not load image", &err)
            }
        });
    }

    fn save_image(&mut self) {
        if !self.state.can_export() {
            return;
        }
        let Some(path) = self.file_handler.pick_export_destination(
            self.settings.last_save_dir.as_deref(),
            &time::default_export_file_name(),
        ) else {
            return;
        };
        self.settings.last_save_dir = path.parent().map(Path::to_path_buf);

        self.notice = Some(match self.state.export(&path, self.settings.export_options()) {
            Ok(_) => Notice::Info {
                title: "Image saved".to_owned(),
                message: format!("Saved {}", path.display()),
            },
            Err(err) => {
                log::error!("{}", err);
                Notice::error("Could not save image", &err)
            }
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        match self.file_handler.take_dropped_background(ctx) {
            Some(Ok(background)) => {
                let message = match background.source() {
                    Some(path) => format!("Loaded {}", path.display()),
                    None => "Loaded dropped image".to_owned(),
                };
                self.state.set_background(background);
                self.notice = Some(Notice::Info {
                    title: "Background loaded".to_owned(),
                    message,
                });
            }
            Some(Err(err)) => {
                log::error!("{}", err);
                self.notice = Some(Notice::error("Could not load image", &err));
            }
            None => {}
        }
    }

    /// Turn pointer input into drag signals and feed them to the editor
    fn handle_input(&mut self, ctx: &egui::Context) {
        for event in self.input.process_input(ctx) {
            let signal = match event {
                InputEvent::PointerDown { position } => {
                    let source = self.state.drag_source_at(position);
                    self.recognizer.pointer_down(position, source);
                    None
                }
                InputEvent::PointerMove { position } => self.recognizer.pointer_move(position),
                InputEvent::PointerUp { position } => {
                    let over_target = self.state.layout().is_drop_target(position);
                    self.recognizer.pointer_up(position, over_target)
                }
                InputEvent::PointerLeave { .. } | InputEvent::KeyDown { key: Key::Escape } => {
                    self.recognizer.cancel()
                }
                InputEvent::KeyDown { .. } => None,
            };
            if let Some(signal) = signal {
                log::debug!("Drag signal {:?}", signal);
                self.state.dispatch(signal);
            }
        }
    }

    fn paint_overlay(&self, ctx: &egui::Context) {
        if let Some(ghost) = self.state.coordinator().ghost() {
            self.renderer.paint_ghost(ctx, ghost, self.state.layout());
        }
        if let Some(DragPayload::Template(index)) = self.recognizer.dragging_payload() {
            let template = self.state.palette().get(index);
            if let (Some(template), Some(pointer)) = (template, self.input.last_pointer_pos()) {
                self.renderer.paint_template_preview(
                    ctx,
                    template,
                    pointer,
                    self.settings.ghost_opacity,
                );
            }
        }
    }

    fn update_cursor(&self, ctx: &egui::Context) {
        if self.recognizer.is_dragging() {
            ctx.set_cursor_icon(CursorIcon::Grabbing);
        } else if let Some(pointer) = self.input.last_pointer_pos() {
            if self.state.drag_source_at(pointer).is_some() {
                ctx.set_cursor_icon(CursorIcon::Grab);
            }
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = &self.notice else {
            return;
        };
        let (title, message, is_error) = match notice {
            Notice::Info { title, message } => (title, message, false),
            Notice::Error { title, message } => (title, message, true),
        };

        let mut dismissed = false;
        egui::Window::new(title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if is_error {
                    ui.colored_label(ui.visuals().error_fg_color, message.as_str());
                } else {
                    ui.label(message.as_str());
                }
                if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(Key::Enter)) {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }
}

impl eframe::App for DecoratorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let trash_armed = self.recognizer.is_dragging()
            && self
                .input
                .last_pointer_pos()
                .is_some_and(|pos| self.state.layout().is_in_trash(pos));
        let palette = panels::palette_panel(
            ctx,
            &self.state,
            &self.renderer,
            &self.activity,
            trash_armed,
        );
        self.state.set_palette_slots(palette.slots);

        panels::central_panel(
            ctx,
            &mut self.state,
            &mut self.renderer,
            palette.trash,
            self.settings.canvas_fill,
        );

        // Input is ignored while a notice is up
        if self.notice.is_none() {
            self.handle_input(ctx);
        }
        self.paint_overlay(ctx);
        self.update_cursor(ctx);

        match palette.action {
            Some(PanelAction::SelectBackground) => self.select_background(),
            Some(PanelAction::SaveImage) => self.save_image(),
            None => {}
        }

        self.show_notice(ctx);
        self.file_handler.preview_files_being_dropped(ctx);

        if self.recognizer.is_dragging() {
            ctx.request_repaint();
        }
    }
}
