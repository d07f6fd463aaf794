use chatlog_types::{Agent, Session};

use crate::client::ApiClient;
use crate::error::Result;
use crate::filter::SessionFilter;

/// Agent lookup by id
///
/// Responsibilities:
/// - Resolve the agent that served a session
/// - Surface transport and parse failures as errors
pub trait AgentDirectory {
    fn get_agent(&self, agent_id: &str) -> Result<Agent>;
}

/// Session enumeration
///
/// Responsibilities:
/// - List every session of the project in directory order
/// - Narrow the listing by creation window and creator name
pub trait SessionDirectory {
    fn get_sessions(&self) -> Result<Vec<Session>>;

    fn get_filtered_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        Ok(filter.apply(self.get_sessions()?))
    }
}

impl AgentDirectory for ApiClient {
    fn get_agent(&self, agent_id: &str) -> Result<Agent> {
        self.agents().get(agent_id)
    }
}

impl SessionDirectory for ApiClient {
    fn get_sessions(&self) -> Result<Vec<Session>> {
        self.sessions().list()
    }
}
