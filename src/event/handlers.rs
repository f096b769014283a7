use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::event::{EditorEvent, EventHandler};

/// Writes every event to the log
#[derive(Debug, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        log::info!("{}", event);
    }
}

/// Bounded list of recent activity, shared with the UI that displays it
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(8)
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Most recent entry first
    pub fn recent(&self) -> Vec<String> {
        self.entries.lock().iter().rev().cloned().collect()
    }
}

impl EventHandler for ActivityLog {
    fn handle_event(&mut self, event: &EditorEvent) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(event.to_string());
    }
}

/// Keeps a copy of every event; handy for asserting on what was emitted
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    events: Arc<Mutex<Vec<EditorEvent>>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().clone()
    }
}

impl EventHandler for RecordingHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}
