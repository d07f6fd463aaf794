//! Agents API.

use chatlog_types::{Agent, NewAgent};

use crate::client::ApiClient;
use crate::error::Result;
use crate::mapper::map_agent;
use crate::schema::RawAgent;

/// Agents API client.
pub struct AgentsApi {
    client: ApiClient,
}

impl AgentsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List all agents of the project.
    pub fn list(&self) -> Result<Vec<Agent>> {
        let raw: Vec<RawAgent> = self.client.get(&["agents"])?;
        Ok(raw.into_iter().map(map_agent).collect())
    }

    /// Get an agent by ID.
    pub fn get(&self, id: &str) -> Result<Agent> {
        let raw: RawAgent = self.client.get(&["agents", id])?;
        Ok(map_agent(raw))
    }

    /// Register a new agent.
    pub fn create(&self, agent: &NewAgent) -> Result<Agent> {
        let raw: RawAgent = self.client.post(&["agents"], agent)?;
        Ok(map_agent(raw))
    }

    /// Delete an agent.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&["agents", id])
    }
}
