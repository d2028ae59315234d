//! Payload logger that keeps every entry for inspection

use std::sync::{Arc, Mutex};

use cielo_client::{Direction, PayloadLogger};

/// Records redacted payloads handed to the logger
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(Direction, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// All entries in the order they were logged
    pub fn entries(&self) -> Vec<(Direction, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Payloads logged for one direction
    pub fn payloads(&self, direction: Direction) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(d, _)| *d == direction)
            .map(|(_, payload)| payload)
            .collect()
    }
}

impl PayloadLogger for RecordingLogger {
    fn log(&self, direction: Direction, payload: &str) {
        self.entries.lock().unwrap().push((direction, payload.to_owned()));
    }
}
