use egui::{Context, Key, Pos2};

/// Pointer and keyboard input the editor reacts to, in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
    /// Pointer moved (with or without the button held)
    PointerMove { position: Pos2 },
    /// Pointer left the application window
    PointerLeave { last_known_position: Pos2 },
    KeyDown { key: Key },
}

/// Converts raw egui input into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_pointer_pos(&self) -> Option<Pos2> {
        self.last_pointer_pos
    }

    /// Collect this frame's events, in the order moves, presses, releases, keys
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            match (hover, self.last_pointer_pos) {
                (Some(pos), last) if Some(pos) != last => {
                    events.push(InputEvent::PointerMove { position: pos });
                }
                (None, Some(last)) if !input.pointer.primary_down() => {
                    events.push(InputEvent::PointerLeave {
                        last_known_position: last,
                    });
                }
                _ => {}
            }
            if hover.is_some() {
                self.last_pointer_pos = hover;
            } else if !input.pointer.primary_down() {
                self.last_pointer_pos = None;
            }

            // Releases can happen outside the window; fall back to the last known spot
            let position = input.pointer.interact_pos().or(self.last_pointer_pos);
            if let Some(position) = position {
                if input.pointer.primary_pressed() {
                    events.push(InputEvent::PointerDown { position });
                }
                if input.pointer.primary_released() {
                    events.push(InputEvent::PointerUp { position });
                }
            }

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key, pressed: true, ..
                } = event
                {
                    events.push(InputEvent::KeyDown { key: *key });
                }
            }
        });

        events
    }
}
