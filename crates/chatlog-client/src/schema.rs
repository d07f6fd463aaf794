use chatlog_types::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct RawAgent {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
    #[serde(default)]
    pub context: Option<RawAgentContext>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub(crate) struct RawAgentContext {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_text: Option<String>,
    #[serde(default)]
    pub rag_dataset_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct RawSession {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub created_user_name: Option<String>,
    pub agent: String,
    #[serde(default)]
    pub state: Option<RawSessionState>,
    #[serde(default)]
    pub messages: Option<Vec<RawMessage>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub(crate) struct RawSessionState {
    #[serde(default)]
    pub feedback: Option<Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct RawMessage {
    pub role: Role,
    pub timestamp: String,
    #[serde(default)]
    pub content: Vec<RawContent>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub(crate) struct RawContent {
    #[serde(default)]
    pub text: Option<String>,
}
