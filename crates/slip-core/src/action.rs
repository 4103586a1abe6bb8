//! Manager actions and their run log.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The four mutating backend operations a manager can trigger.
///
/// The string form of each variant is both the run-log endpoint name and the
/// backend path segment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ActionKind {
    CreateAggregatedEmployeeData,
    SendAggregatedEmployeeData,
    CreatePdfForEmployees,
    SendPdfToEmployees,
}

impl ActionKind {
    /// Endpoint name as recorded in the run log.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Backend path, relative to the base URL.
    pub fn path(&self) -> String {
        format!("/{}", self.name())
    }

    /// Label of the triggering control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateAggregatedEmployeeData => "Create CSV",
            Self::SendAggregatedEmployeeData => "Send CSV",
            Self::CreatePdfForEmployees => "Create PDFs",
            Self::SendPdfToEmployees => "Send PDFs",
        }
    }

    /// Label shown while this action is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::CreateAggregatedEmployeeData => "Working…",
            Self::SendAggregatedEmployeeData | Self::SendPdfToEmployees => "Sending…",
            Self::CreatePdfForEmployees => "Generating…",
        }
    }
}

/// One outcome in the manager's run log.
///
/// Serializes as `{endpoint, ok, payload}` on success and
/// `{endpoint, ok, error}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub endpoint: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunLogEntry {
    pub fn success(endpoint: impl Into<String>, payload: Value) -> Self {
        Self {
            endpoint: endpoint.into(),
            ok: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(endpoint: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ok: false,
            payload: None,
            error: Some(error.into()),
        }
    }
}

/// Append-only run log, most recent entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunLog {
    entries: Vec<RunLogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome as the newest entry.
    pub fn prepend(&mut self, entry: RunLogEntry) {
        self.entries.insert(0, entry);
    }

    pub fn entries(&self) -> &[RunLogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&RunLogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
