use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;

/// Snapshot of a chat session as returned by the session directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub created_user_name: Option<String>,
    /// Id of the agent that served the session
    pub agent_id: String,
    /// `state.feedback` as received; its shape is owned by the API
    pub feedback: Option<Value>,
    pub messages: Vec<Message>,
}

impl Session {
    /// Feedback rendered for a table cell: strings verbatim, other values as compact JSON.
    pub fn feedback_text(&self) -> Option<String> {
        match self.feedback.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
