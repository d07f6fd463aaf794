use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a session message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single session message, already reduced to the text of its first content element.
///
/// Position in the session's message list is authoritative for ordering;
/// timestamps are carried as received and are not guaranteed monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub timestamp: DateTime<FixedOffset>,
    pub text: String,
    /// Timestamp text as the API sent it
    #[serde(skip)]
    pub source_timestamp: Option<String>,
}

impl Message {
    pub fn new(role: Role, timestamp: DateTime<FixedOffset>, text: impl Into<String>) -> Self {
        Self {
            role,
            timestamp,
            text: text.into(),
            source_timestamp: None,
        }
    }

    pub fn with_source_timestamp(mut self, raw: impl Into<String>) -> Self {
        self.source_timestamp = Some(raw.into());
        self
    }

    /// Timestamp for display: the received text when known, otherwise RFC 3339.
    pub fn timestamp_text(&self) -> String {
        self.source_timestamp
            .clone()
            .unwrap_or_else(|| self.timestamp.to_rfc3339())
    }
}
