//! Connector status and config types
//!
//! These mirror the JSON documents served by the Kafka Connect REST API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime state of a connector or task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectorState {
    /// Running normally
    Running,
    /// Paused by an operator
    Paused,
    /// Failed; the task trace explains why
    Failed,
    /// Not yet assigned to a worker
    Unassigned,
    /// A state this client does not know about (kept verbatim)
    Unknown(String),
}

impl ConnectorState {
    /// Wire name of the state
    pub fn as_str(&self) -> &str {
        match self {
            ConnectorState::Running => "RUNNING",
            ConnectorState::Paused => "PAUSED",
            ConnectorState::Failed => "FAILED",
            ConnectorState::Unassigned => "UNASSIGNED",
            ConnectorState::Unknown(s) => s,
        }
    }
}

impl From<String> for ConnectorState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "RUNNING" => ConnectorState::Running,
            "PAUSED" => ConnectorState::Paused,
            "FAILED" => ConnectorState::Failed,
            "UNASSIGNED" => ConnectorState::Unassigned,
            _ => ConnectorState::Unknown(s),
        }
    }
}

impl From<ConnectorState> for String {
    fn from(state: ConnectorState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ConnectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /connectors/{name}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorStatus {
    /// Connector name
    pub name: String,

    /// Connector-level state
    pub connector: WorkerState,

    /// Per-task states, ordered by task id
    #[serde(default)]
    pub tasks: Vec<TaskStatus>,
}

/// State of the connector instance itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerState {
    /// Current state
    pub state: ConnectorState,

    /// Worker hosting the connector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,
}

/// State of a single task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Task id within the connector
    pub id: u32,

    /// Current state
    pub state: ConnectorState,

    /// Worker hosting the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,

    /// Stack trace for failed tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl ConnectorStatus {
    /// Connector and every task are RUNNING
    pub fn is_healthy(&self) -> bool {
        self.connector.state == ConnectorState::Running
            && self
                .tasks
                .iter()
                .all(|t| t.state == ConnectorState::Running)
    }

    /// Connector-level state is PAUSED
    pub fn is_paused(&self) -> bool {
        self.connector.state == ConnectorState::Paused
    }
}

/// Connector properties, kept in the order the server returned them.
///
/// The document is never inspected; it is passed through unchanged
/// between `get_config` and `create`.
pub type ConnectorConfig = serde_json::Map<String, serde_json::Value>;

/// Body of `POST /connectors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConnector {
    /// Connector name
    pub name: String,

    /// Connector properties
    pub config: ConnectorConfig,
}
