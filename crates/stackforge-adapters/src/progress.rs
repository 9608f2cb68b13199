//! Progress sinks that do not need a terminal.

use std::sync::{Arc, Mutex};

use stackforge_core::application::ports::ProgressSink;
use tracing::debug;

/// Drops every message except into the debug log.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn status(&self, message: &str) {
        debug!(progress = message);
    }

    fn finish(&self, message: &str) {
        debug!(progress = message, "finished");
    }
}

/// Keeps every message; clones share the log. Used by tests and by the JSON
/// output mode, which reports steps after the run.
#[derive(Debug, Clone, Default)]
pub struct RecordingProgress {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl ProgressSink for RecordingProgress {
    fn status(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }

    fn finish(&self, message: &str) {
        self.status(message);
    }
}
