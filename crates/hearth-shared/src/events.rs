use std::sync::Mutex;

use tracing::warn;

/// Event names (emitted as the `event` field of log records)
pub const EVENT_UNKNOWN_FIELD: &str = "unknown-field";
pub const EVENT_FOREIGN_KEY_MISMATCH: &str = "foreign-key-mismatch";

/// Non-fatal findings made while decoding a server payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// The payload carried a field this client does not know.
    UnknownField { record: &'static str, path: String },

    /// An embedded child points at a different parent than the record it came in.
    ForeignKeyMismatch {
        record: &'static str,
        path: String,
        expected: String,
        found: String,
    },
}

impl DecodeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DecodeEvent::UnknownField { .. } => EVENT_UNKNOWN_FIELD,
            DecodeEvent::ForeignKeyMismatch { .. } => EVENT_FOREIGN_KEY_MISMATCH,
        }
    }
}

/// Sink for [`DecodeEvent`]s. Implementations must not block.
pub trait DecodeObserver: Send + Sync {
    fn observe(&self, event: DecodeEvent);
}

/// Default observer: logs every event as a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DecodeObserver for TracingObserver {
    fn observe(&self, event: DecodeEvent) {
        let name = event.name();
        match event {
            DecodeEvent::UnknownField { record, path } => {
                warn!(
                    event = name,
                    record,
                    path = %path,
                    "Ignoring unknown field in server payload"
                );
            }
            DecodeEvent::ForeignKeyMismatch {
                record,
                path,
                expected,
                found,
            } => {
                warn!(
                    event = name,
                    record,
                    path = %path,
                    expected = %expected,
                    found = %found,
                    "Embedded record points at a different parent"
                );
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DecodeEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<DecodeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DecodeObserver for RecordingObserver {
    fn observe(&self, event: DecodeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
