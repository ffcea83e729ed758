//! Append-only event log: every learner event with the wall-clock time it was recorded.

use std::collections::BTreeMap;
use std::io::Write;

use pavlov_core::constants::MAX_EVENT_LOG_ENTRIES;
use pavlov_core::errors::PavlovResult;
use pavlov_core::models::{Event, EventKind};
use pavlov_core::traits::IEventSink;
use serde::{Deserialize, Serialize};

/// A single event log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    #[serde(flatten)]
    pub event: Event,
    pub recorded_at_epoch_ms: i64,
}

impl EventLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(event: Event) -> Self {
        Self {
            event,
            recorded_at_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Append-only event log. Oldest entries are dropped past `max_entries`.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: Vec<EventLogEntry>,
    max_entries: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_EVENT_LOG_ENTRIES)
    }

    /// Create with a custom capacity.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Record an event.
    pub fn record(&mut self, event: Event) {
        tracing::trace!(
            event = "event_logged",
            kind = %event.kind,
            time = event.time,
            "event logged"
        );

        self.entries.push(EventLogEntry::new(event));
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[EventLogEntry] {
        &self.entries
    }

    /// Retained events of one kind, oldest first.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &Event> + '_ {
        self.entries
            .iter()
            .map(|e| &e.event)
            .filter(move |e| e.kind == kind)
    }

    /// Number of retained events per kind. Kinds never seen are absent.
    pub fn counts(&self) -> BTreeMap<EventKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.event.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write every retained entry as one JSON object per line.
    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> PavlovResult<()> {
        for entry in &self.entries {
            serde_json::to_writer(&mut writer, entry)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl IEventSink for EventLog {
    fn log_event(&mut self, event: Event) {
        self.record(event);
    }
}
