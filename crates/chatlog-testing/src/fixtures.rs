//! Wire-format payload builders.
//!
//! Fixtures produce the JSON the API returns, so tests exercise the same
//! parsing path as production.

use chrono::{DateTime, Duration, FixedOffset};
use serde_json::{Value, json};

pub const DEFAULT_CREATED_AT: &str = "2024-11-25T09:00:00+09:00";

#[derive(Debug, Clone)]
pub struct AgentFixture {
    id: String,
    name: String,
    agent_type: String,
    category: Option<String>,
    description: Option<String>,
    source_text: Option<String>,
    rag_dataset_id: Option<String>,
}

impl AgentFixture {
    pub fn new(id: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("{} agent", category),
            agent_type: "chat".to_string(),
            category: Some(category.to_string()),
            description: None,
            source_text: None,
            rag_dataset_id: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn source_text(mut self, source_text: &str) -> Self {
        self.source_text = Some(source_text.to_string());
        self
    }

    pub fn rag_dataset(mut self, dataset_id: &str) -> Self {
        self.rag_dataset_id = Some(dataset_id.to_string());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "type": self.agent_type,
            "context": {
                "category": self.category,
                "description": self.description,
                "source_text": self.source_text,
                "rag_dataset_id": self.rag_dataset_id,
            }
        })
    }
}

/// Session payload; messages are stamped one second apart from `created_at`.
#[derive(Debug, Clone)]
pub struct SessionFixture {
    id: String,
    agent_id: String,
    name: Option<String>,
    created_at: DateTime<FixedOffset>,
    created_user_name: Option<String>,
    feedback: Value,
    messages: Vec<(&'static str, String)>,
}

impl SessionFixture {
    pub fn new(id: &str, agent_id: &str) -> Self {
        Self {
            id: id.to_string(),
            agent_id: agent_id.to_string(),
            name: Some(format!("session {}", id)),
            created_at: DateTime::parse_from_rfc3339(DEFAULT_CREATED_AT)
                .expect("default timestamp is valid"),
            created_user_name: Some("alice".to_string()),
            feedback: Value::Null,
            messages: Vec::new(),
        }
    }

    pub fn created_at(mut self, rfc3339: &str) -> Self {
        self.created_at = DateTime::parse_from_rfc3339(rfc3339).expect("valid RFC 3339 timestamp");
        self
    }

    pub fn created_by(mut self, user: &str) -> Self {
        self.created_user_name = Some(user.to_string());
        self
    }

    pub fn feedback(mut self, feedback: Value) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn system(mut self, text: &str) -> Self {
        self.messages.push(("system", text.to_string()));
        self
    }

    pub fn user(mut self, text: &str) -> Self {
        self.messages.push(("user", text.to_string()));
        self
    }

    pub fn assistant(mut self, text: &str) -> Self {
        self.messages.push(("assistant", text.to_string()));
        self
    }

    /// Append `n` numbered `[user, assistant]` pairs.
    pub fn pairs(self, n: usize) -> Self {
        (1..=n).fold(self, |s, i| {
            s.user(&format!("user{}", i))
                .assistant(&format!("assistant{}", i))
        })
    }

    /// Append `n` numbered `[user, rag, assistant]` triplets.
    pub fn triplets(self, n: usize) -> Self {
        (1..=n).fold(self, |s, i| {
            s.user(&format!("user{}", i))
                .system(&format!("rag{}", i))
                .assistant(&format!("assistant{}", i))
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages_json(&self) -> Value {
        let messages: Vec<Value> = self
            .messages
            .iter()
            .enumerate()
            .map(|(i, (role, text))| {
                let timestamp = self.created_at + Duration::seconds(i as i64 + 1);
                json!({
                    "role": role,
                    "timestamp": timestamp.to_rfc3339(),
                    "content": [{"text": text}],
                })
            })
            .collect();
        Value::Array(messages)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "created_at": self.created_at.to_rfc3339(),
            "created_user_name": self.created_user_name,
            "agent": self.agent_id,
            "state": {"feedback": self.feedback},
            "messages": self.messages_json(),
        })
    }
}
