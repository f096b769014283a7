use egui::Pos2;
use std::fmt;
use std::path::PathBuf;

use crate::drag::DragOutcome;
use crate::export::ExportFormat;
use crate::marker::MarkerId;

/// Things that happened to the canvas, broadcast after the fact
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    MarkerPlaced {
        id: MarkerId,
        template: String,
        center: Pos2,
    },
    MarkerMoved {
        id: MarkerId,
        from: Pos2,
        to: Pos2,
    },
    MarkerDeleted {
        id: MarkerId,
    },
    DragCancelled {
        id: MarkerId,
    },
    BackgroundLoaded {
        source: Option<PathBuf>,
        width: u32,
        height: u32,
    },
    CanvasExported {
        path: PathBuf,
        format: ExportFormat,
    },
}

impl From<DragOutcome> for EditorEvent {
    fn from(outcome: DragOutcome) -> Self {
        match outcome {
            DragOutcome::Moved { id, from, to } => Self::MarkerMoved { id, from, to },
            DragOutcome::Deleted { id } => Self::MarkerDeleted { id },
            DragOutcome::Cancelled { id } => Self::DragCancelled { id },
        }
    }
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerPlaced { template, center, .. } => {
                write!(f, "Placed {} marker at ({:.0}, {:.0})", template, center.x, center.y)
            }
            Self::MarkerMoved { to, .. } => write!(f, "Moved marker to ({:.0}, {:.0})", to.x, to.y),
            Self::MarkerDeleted { .. } => write!(f, "Deleted marker"),
            Self::DragCancelled { .. } => write!(f, "Drag cancelled"),
            Self::BackgroundLoaded {
                source,
                width,
                height,
            } => match source {
                Some(path) => write!(f, "Loaded {} ({}x{})", path.display(), width, height),
                None => write!(f, "Loaded background ({}x{})", width, height),
            },
            Self::CanvasExported { path, format } => {
                write!(f, "Exported {:?} to {}", format, path.display())
            }
        }
    }
}
