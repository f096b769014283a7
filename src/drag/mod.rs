//! Drag-and-drop for markers.
//!
//! [`DragRecognizer`] turns raw pointer input into [`DragSignal`]s, and
//! [`DragCoordinator`] consumes them to drive the ghost and resolve drops.

use egui::Pos2;

use crate::marker::MarkerId;

pub mod coordinator;
pub mod ghost;
pub mod recognizer;

pub use coordinator::{DragCoordinator, DragOutcome};
pub use ghost::Ghost;
pub use recognizer::DragRecognizer;

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    /// A marker already on the canvas
    Marker(MarkerId),
    /// A palette template, by index into the palette
    Template(usize),
}

/// Drag lifecycle signals. All positions are in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSignal {
    Started { payload: DragPayload, pointer: Pos2 },
    Moved { pointer: Pos2 },
    Dropped { payload: DragPayload, position: Pos2 },
    Cancelled { payload: DragPayload },
}

impl DragSignal {
    pub fn payload(&self) -> Option<DragPayload> {
        match self {
            Self::Started { payload, .. }
            | Self::Dropped { payload, .. }
            | Self::Cancelled { payload } => Some(*payload),
            Self::Moved { .. } => None,
        }
    }
}
