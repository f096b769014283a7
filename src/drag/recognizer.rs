use egui::Pos2;

use super::{DragPayload, DragSignal};

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    /// Button is down on a drag source but has not travelled far enough yet
    Pressed { payload: DragPayload, origin: Pos2 },
    Dragging { payload: DragPayload },
}

/// Recognizes drag gestures from primary-button pointer input.
///
/// A press on a drag source arms the recognizer; travelling past the
/// threshold starts the drag. Releasing over a drop target drops, anywhere
/// else cancels. Presses that never pass the threshold are plain clicks and
/// produce no signals.
#[derive(Debug, Clone)]
pub struct DragRecognizer {
    state: GestureState,
    threshold: f32,
}

impl Default for DragRecognizer {
    fn default() -> Self {
        Self::new(crate::config::DRAG_THRESHOLD)
    }
}

impl DragRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: GestureState::Idle,
            threshold,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    /// Payload of the drag in progress (after the threshold was crossed)
    pub fn dragging_payload(&self) -> Option<DragPayload> {
        match self.state {
            GestureState::Dragging { payload } => Some(payload),
            _ => None,
        }
    }

    /// Button pressed at `position`; `source` is whatever drag source lies under it
    pub fn pointer_down(&mut self, position: Pos2, source: Option<DragPayload>) {
        if self.is_dragging() {
            return;
        }
        self.state = match source {
            Some(payload) => GestureState::Pressed {
                payload,
                origin: position,
            },
            None => GestureState::Idle,
        };
    }

    pub fn pointer_move(&mut self, position: Pos2) -> Option<DragSignal> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Pressed { payload, origin } => {
                if origin.distance(position) < self.threshold {
                    return None;
                }
                log::debug!("Drag threshold crossed for {:?}", payload);
                self.state = GestureState::Dragging { payload };
                Some(DragSignal::Started {
                    payload,
                    pointer: position,
                })
            }
            GestureState::Dragging { .. } => Some(DragSignal::Moved { pointer: position }),
        }
    }

    /// Button released; `over_target` tells whether `position` is a valid drop target
    pub fn pointer_up(&mut self, position: Pos2, over_target: bool) -> Option<DragSignal> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Dragging { payload } if over_target => Some(DragSignal::Dropped {
                payload,
                position,
            }),
            GestureState::Dragging { payload } => Some(DragSignal::Cancelled { payload }),
            GestureState::Idle | GestureState::Pressed { .. } => None,
        }
    }

    /// Abort whatever is going on (Escape, pointer left the window)
    pub fn cancel(&mut self) -> Option<DragSignal> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Dragging { payload } => Some(DragSignal::Cancelled { payload }),
            GestureState::Idle | GestureState::Pressed { .. } => None,
        }
    }
}
