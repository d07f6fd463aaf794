use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::message::Role;
use crate::Error;

/// Message-sequence shape an agent declares for its sessions.
///
/// - `General`: `[user, assistant]*`
/// - `Prompt`: `system, [user, assistant]*`
/// - `Rag`: `system, [user, rag, assistant]*` (the RAG message carries the system role)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Prompt,
    Rag,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::General, Category::Prompt, Category::Rag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Prompt => "prompt",
            Category::Rag => "rag",
        }
    }

    /// Number of consecutive messages forming one turn.
    pub fn turn_len(&self) -> usize {
        self.expected_roles().len()
    }

    /// Whether `messages[0]` is a session-wide system message shared by every turn.
    pub fn reserves_system_message(&self) -> bool {
        matches!(self, Category::Prompt | Category::Rag)
    }

    /// Roles a well-formed turn group carries, in order.
    pub fn expected_roles(&self) -> &'static [Role] {
        match self {
            Category::General | Category::Prompt => &[Role::User, Role::Assistant],
            Category::Rag => &[Role::User, Role::System, Role::Assistant],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Category::General),
            "prompt" => Ok(Category::Prompt),
            "rag" => Ok(Category::Rag),
            other => Err(Error::UnsupportedCategory(other.to_string())),
        }
    }
}
