use egui::Pos2;
use log::{debug, info, warn};

use super::{DragPayload, DragSignal, Ghost};
use crate::canvas::Canvas;
use crate::geometry::{Frame, FrameLayout};
use crate::marker::{MarkerId, Visibility};

/// How a drag session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Dropped on the canvas; positions are canvas-local centers
    Moved { id: MarkerId, from: Pos2, to: Pos2 },
    /// Dropped on the trash
    Deleted { id: MarkerId },
    /// Aborted; the marker is back where it started
    Cancelled { id: MarkerId },
}

#[derive(Debug)]
struct DragSession {
    marker: MarkerId,
    /// Marker top-left when the drag began, canvas-local
    origin: Pos2,
    ghost: Ghost,
}

/// Owns the single in-flight drag and its ghost.
///
/// Idle → Dragging on a start signal, back to Idle on drop or cancel.
/// The ghost lives inside the session, so "dragging" and "a ghost exists"
/// can never disagree.
#[derive(Debug)]
pub struct DragCoordinator {
    session: Option<DragSession>,
    ghost_opacity: f32,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new(crate::config::GHOST_OPACITY)
    }
}

impl DragCoordinator {
    pub fn new(ghost_opacity: f32) -> Self {
        Self {
            session: None,
            ghost_opacity,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn ghost(&self) -> Option<&Ghost> {
        self.session.as_ref().map(|session| &session.ghost)
    }

    /// Marker currently being dragged, if any
    pub fn active_marker(&self) -> Option<MarkerId> {
        self.session.as_ref().map(|session| session.marker)
    }

    /// Feed one signal through the state machine.
    ///
    /// Geometry is read from `layout` at the moment of each signal, never
    /// from what it was when the drag began.
    pub fn handle(
        &mut self,
        signal: &DragSignal,
        canvas: &mut Canvas,
        layout: &FrameLayout,
    ) -> Option<DragOutcome> {
        match *signal {
            DragSignal::Started {
                payload: DragPayload::Marker(id),
                ..
            } => {
                self.begin(id, canvas, layout);
                None
            }
            DragSignal::Moved { pointer } => {
                self.track(pointer, layout);
                None
            }
            DragSignal::Dropped {
                payload: DragPayload::Marker(id),
                position,
            } => self.drop_marker(id, position, canvas, layout),
            DragSignal::Cancelled {
                payload: DragPayload::Marker(id),
            } => self.cancel(id, canvas),
            _ => {
                debug!("Coordinator ignoring non-marker signal {:?}", signal);
                None
            }
        }
    }

    /// Hide the marker and put a ghost over it. Returns false if ignored.
    pub fn begin(&mut self, id: MarkerId, canvas: &mut Canvas, layout: &FrameLayout) -> bool {
        if let Some(active) = self.active_marker() {
            warn!("Drag of {} requested while {} is still in flight", id, active);
            return false;
        }
        let Some(marker) = canvas.marker_mut(id) else {
            warn!("Drag start for unknown marker {}", id);
            return false;
        };

        let origin = marker.position();
        marker.set_visibility(Visibility::Hidden);

        let overlay_position = layout.transform(origin, Frame::Canvas, Frame::Overlay);
        let ghost = Ghost::from_marker(marker, overlay_position, self.ghost_opacity);

        info!("Drag started for marker {}", id);
        self.session = Some(DragSession {
            marker: id,
            origin,
            ghost,
        });
        true
    }

    /// Center the ghost on the pointer. No-op while idle.
    pub fn track(&mut self, pointer: Pos2, layout: &FrameLayout) {
        if let Some(session) = &mut self.session {
            let overlay_pointer = layout.transform(pointer, Frame::Window, Frame::Overlay);
            session.ghost.set_center(overlay_pointer);
        }
    }

    /// Resolve a drop at `position` (window coordinates)
    pub fn drop_marker(
        &mut self,
        id: MarkerId,
        position: Pos2,
        canvas: &mut Canvas,
        layout: &FrameLayout,
    ) -> Option<DragOutcome> {
        if self.is_foreign(id, "Drop") {
            return None;
        }
        self.end_session();

        if layout.is_in_trash(position) {
            return match canvas.remove_marker(id) {
                Some(_) => {
                    info!("Marker {} dropped on trash", id);
                    Some(DragOutcome::Deleted { id })
                }
                None => {
                    debug!("Marker {} already gone", id);
                    None
                }
            };
        }

        let Some(marker) = canvas.marker_mut(id) else {
            warn!("Drop for unknown marker {}", id);
            return None;
        };
        let from = marker.center();
        let to = layout.transform(position, Frame::Window, Frame::Canvas);
        marker.set_center(to);
        marker.set_visibility(Visibility::Visible);

        info!("Marker {} moved to ({:.1}, {:.1})", id, to.x, to.y);
        Some(DragOutcome::Moved { id, from, to })
    }

    /// Abort the drag, leaving the marker where it was before
    pub fn cancel(&mut self, id: MarkerId, canvas: &mut Canvas) -> Option<DragOutcome> {
        if self.is_foreign(id, "Cancel") {
            return None;
        }
        self.end_session();

        let marker = canvas.marker_mut(id)?;
        marker.set_visibility(Visibility::Visible);
        info!("Drag of marker {} cancelled", id);
        Some(DragOutcome::Cancelled { id })
    }

    /// A signal for another marker than the one in flight leaves the session alone
    fn is_foreign(&self, id: MarkerId, what: &str) -> bool {
        match self.active_marker() {
            Some(active) if active != id => {
                warn!("{} for {} ignored while dragging {}", what, id, active);
                true
            }
            _ => false,
        }
    }

    /// Drop the ghost and return to idle
    fn end_session(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            debug!(
                "Ghost for {} removed (drag began at {:?})",
                session.marker, session.origin
            );
        }
        session
    }
}
