use egui::{Align2, Color32, Context, Id, LayerId, Order, TextStyle};
use std::path::{Path, PathBuf};

use crate::background::{self, BackgroundImage, IMAGE_EXTENSIONS};
use crate::error::Result;

/// Native file dialogs plus files dropped onto the window from the OS
#[derive(Debug, Default)]
pub struct FileHandler {
    /// Last dropped file we already handled, so a drop is processed once
    last_dropped: Option<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the user for a background image
    pub fn pick_background(&self, start_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select background image")
            .add_filter("Image files", IMAGE_EXTENSIONS);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    }

    /// Ask the user where to export the canvas
    pub fn pick_export_destination(
        &self,
        start_dir: Option<&Path>,
        file_name: &str,
    ) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save image")
            .add_filter("PNG image", &["png"])
            .add_filter("JPEG image", &["jpg", "jpeg"])
            .add_filter("BMP image", &["bmp"])
            .set_file_name(file_name);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    }

    /// Decode the first image dropped onto the window this frame, if any.
    ///
    /// Returns `None` when nothing (new) was dropped, otherwise the outcome
    /// of decoding it.
    pub fn take_dropped_background(&mut self, ctx: &Context) -> Option<Result<BackgroundImage>> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            self.last_dropped = None;
            return None;
        }

        for file in &dropped {
            let name = match &file.path {
                Some(path) => path.display().to_string(),
                None if !file.name.is_empty() => file.name.clone(),
                None => "unknown".to_owned(),
            };
            if self.last_dropped.as_deref() == Some(name.as_str()) {
                return None;
            }

            let is_image = if !file.mime.is_empty() {
                file.mime.starts_with("image/")
            } else {
                file.path.as_deref().is_some_and(background::is_image_path)
            };
            if !is_image {
                log::warn!("Dropped file is not a supported image: {}", name);
                continue;
            }

            self.last_dropped = Some(name.clone());
            if let Some(path) = &file.path {
                log::info!("Loading dropped image from {}", path.display());
                return Some(background::load_background(path));
            }
            if let Some(bytes) = &file.bytes {
                log::info!("Loading dropped image {} ({} bytes)", name, bytes.len());
                return Some(background::load_background_from_bytes(&name, bytes));
            }
            log::warn!("Dropped file has no accessible data: {}", name);
        }
        None
    }

    /// Dim the window and list the files while they hover over it
    pub fn preview_files_being_dropped(&self, ctx: &Context) {
        let text = ctx.input(|i| {
            if i.raw.hovered_files.is_empty() {
                return None;
            }
            let mut text = "Drop to use as background:\n".to_owned();
            for file in &i.raw.hovered_files {
                match &file.path {
                    Some(path) => text += &format!("\n{}", path.display()),
                    None => text += "\n(Path not available)",
                }
            }
            Some(text)
        });
        let Some(text) = text else {
            return;
        };

        let layer = LayerId::new(Order::Foreground, Id::new("file_drop_target"));
        let painter = ctx.layer_painter(layer);
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}
