use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One reconstructed conversational exchange, the unit of an exported row.
///
/// `system` is set for prompt and rag sessions, `rag` only for rag sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Timestamp of the user message opening the turn
    pub timestamp: DateTime<FixedOffset>,
    /// `timestamp` as rendered in the exported table
    pub timestamp_text: String,
    pub system: Option<String>,
    pub user: String,
    pub rag: Option<String>,
    pub assistant: String,
}
