//! Observational events emitted by the learners. Never read back by them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Notable internal occurrences worth recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ReinforcerAcquired,
    PredictorCreated,
    PredictorDeleted,
    ActionChosen,
    GraphRebuilt,
    CycleDetected,
    EdgeVerified,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        Self::ReinforcerAcquired,
        Self::PredictorCreated,
        Self::PredictorDeleted,
        Self::ActionChosen,
        Self::GraphRebuilt,
        Self::CycleDetected,
        Self::EdgeVerified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReinforcerAcquired => "reinforcer_acquired",
            Self::PredictorCreated => "predictor_created",
            Self::PredictorDeleted => "predictor_deleted",
            Self::ActionChosen => "action_chosen",
            Self::GraphRebuilt => "graph_rebuilt",
            Self::CycleDetected => "cycle_detected",
            Self::EdgeVerified => "edge_verified",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(time, kind, fields)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: u64,
    pub kind: EventKind,
    pub fields: BTreeMap<String, String>,
}

impl Event {
    pub fn new(time: u64, kind: EventKind) -> Self {
        Self {
            time,
            kind,
            fields: BTreeMap::new(),
        }
    }

    /// Attach a field. Later writes to the same key win.
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.insert(key.to_string(), value.to_string());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}
