//! Sessions API.

use chatlog_types::{Message, Session};

use crate::client::ApiClient;
use crate::error::Result;
use crate::filter::SessionFilter;
use crate::mapper::{map_message, map_session};
use crate::schema::{RawMessage, RawSession};

/// Sessions API client.
pub struct SessionsApi {
    client: ApiClient,
}

impl SessionsApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List all sessions in directory order.
    pub fn list(&self) -> Result<Vec<Session>> {
        let raw: Vec<RawSession> = self.client.get(&["sessions"])?;
        let sessions = raw
            .into_iter()
            .map(map_session)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = sessions.len(), "Fetched sessions");
        Ok(sessions)
    }

    /// List sessions ordered by creation time (stable for equal timestamps).
    pub fn list_sorted(&self) -> Result<Vec<Session>> {
        let mut sessions = self.list()?;
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }

    /// List sessions passing `filter`, in directory order.
    pub fn list_filtered(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        Ok(filter.apply(self.list()?))
    }

    /// Get a session by ID.
    pub fn get(&self, id: &str) -> Result<Session> {
        let raw: RawSession = self.client.get(&["sessions", id])?;
        map_session(raw)
    }

    /// Get the messages of a session.
    pub fn messages(&self, id: &str) -> Result<Vec<Message>> {
        let raw: Vec<RawMessage> = self.client.get(&["sessions", id, "messages"])?;
        raw.into_iter()
            .enumerate()
            .map(|(index, message)| map_message(message, id, index))
            .collect()
    }

    /// Create an empty session.
    pub fn create(&self) -> Result<Session> {
        let raw: RawSession = self.client.post_empty(&["sessions"])?;
        map_session(raw)
    }

    /// Delete a session.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&["sessions", id])
    }
}
