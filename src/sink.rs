//! The record hand-off boundary.
//!
//! Storage and export of records is the embedder's business; this crate
//! only pushes completed [`EventRecord`]s through the [`EventSink`] trait.

use crate::error::Error;
use crate::record::EventRecord;
use std::sync::{Mutex, OnceLock};

/// Consumer of completed event records.
///
/// `consume` runs on the capturing context, which may be interrupt-like:
/// implementations must not block, sleep or allocate unboundedly. Push to a
/// preallocated ring, hand off to another core, or drop.
pub trait EventSink: Send + Sync {
    fn consume(&self, record: EventRecord);
}

static SINK: OnceLock<&'static dyn EventSink> = OnceLock::new();

/// Install the process-wide sink. One sink per process, installed at
/// startup before tracing is enabled.
pub fn install(sink: &'static dyn EventSink) -> Result<(), Error> {
    SINK.set(sink).map_err(|_| Error::SinkAlreadyInstalled)
}

/// Hand a completed record to the installed sink. Records captured before a
/// sink is installed are dropped.
#[inline]
pub(crate) fn submit(record: EventRecord) {
    if let Some(sink) = SINK.get() {
        sink.consume(record);
    }
}

/// Buffering sink for tests and interactive debugging.
///
/// Takes a mutex per record, so it is not suitable for interrupt-context
/// production capture.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<EventRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything captured so far.
    pub fn drain(&self) -> Vec<EventRecord> {
        std::mem::take(&mut *self.records.lock().expect("memory sink lock poisoned"))
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("memory sink lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn consume(&self, record: EventRecord) {
        self.records
            .lock()
            .expect("memory sink lock poisoned")
            .push(record);
    }
}
