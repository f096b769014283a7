#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod canvas;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod marker;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod util;

pub use app::DecoratorApp;
pub use background::{BackgroundImage, load_background};
pub use canvas::Canvas;
pub use config::EditorSettings;
pub use drag::{DragCoordinator, DragOutcome, DragPayload, DragRecognizer, DragSignal, Ghost};
pub use error::{DecoratorError, ErrorKind, Result};
pub use export::{CanvasExporter, ExportFormat, ExportOptions, export_canvas};
pub use geometry::{Frame, FrameLayout};
pub use marker::{Marker, MarkerId, MarkerStyle, PaletteTemplate, Visibility, create_marker};
pub use renderer::Renderer;
pub use state::EditorState;
