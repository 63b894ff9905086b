//! Event record sent to the ingestion endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value of `sourceApp` for every event produced by these hooks
pub const SOURCE_APP: &str = "claude-code";

/// Status reported when the hook has no better outcome to report
pub const STATUS_COMPLETED: &str = "completed";

/// Categorical tag for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// A Claude Code session was opened
    SessionStart,
    /// A tool-like unit of work (tests, fixes, file edits)
    ToolUse,
    /// Work handed to an agent (implementation and everything else)
    AgentSpawn,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::SessionStart => write!(f, "SessionStart"),
            EventType::ToolUse => write!(f, "ToolUse"),
            EventType::AgentSpawn => write!(f, "AgentSpawn"),
        }
    }
}

/// Agent group an event is attributed to on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Squadron {
    Data,
    Knowledge,
    Validation,
}

/// One lifecycle occurrence, serialized as a camelCase JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub session_id: String,
    pub source_app: String,
    pub event_type: EventType,
    /// Human-readable description of what happened
    pub action: String,
    pub status: String,
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squadron: Option<Squadron>,
    /// Milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Event {
    /// Create a completed event from this tool with empty metadata
    pub fn new(
        session_id: impl Into<String>,
        event_type: EventType,
        action: impl Into<String>,
        agent_name: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            source_app: SOURCE_APP.to_string(),
            event_type,
            action: action.into(),
            status: STATUS_COMPLETED.to_string(),
            agent_name: agent_name.into(),
            squadron: None,
            duration: None,
            payload: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Add a payload entry, creating the payload on first use
    pub fn with_payload(mut self, key: &str, value: impl Into<String>) -> Self {
        self.payload
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}
