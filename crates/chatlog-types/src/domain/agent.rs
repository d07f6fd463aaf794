use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::{Error, Result};

/// Agent-level configuration consulted when flattening its sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentContext {
    /// Raw category string as configured on the agent; parsed lazily so that
    /// unknown values surface per session instead of failing the fetch
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_text: Option<String>,
    #[serde(default)]
    pub rag_dataset_id: Option<String>,
}

impl AgentContext {
    pub fn category(&self) -> Result<Category> {
        match self.category.as_deref() {
            Some(raw) => raw.parse(),
            None => Err(Error::MissingCategory),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    #[serde(default)]
    pub context: AgentContext,
}

/// Payload for registering a new agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAgent {
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    pub context: AgentContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(category: Option<&str>) -> AgentContext {
        AgentContext {
            category: category.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_context_category_parses() {
        assert_eq!(context(Some("rag")).category(), Ok(Category::Rag));
    }

    #[test]
    fn test_context_category_unknown() {
        assert_eq!(
            context(Some("unknown")).category(),
            Err(Error::UnsupportedCategory("unknown".to_string()))
        );
    }

    #[test]
    fn test_context_category_missing() {
        assert_eq!(context(None).category(), Err(Error::MissingCategory));
    }
}
