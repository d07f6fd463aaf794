use chatlog_types::{Agent, Category, Session, Turn};
use serde::Serialize;

use crate::table::{Cell, FULL_COLUMNS, MINIMAL_COLUMNS, Table};
use crate::turn::Turns;
use crate::Result;

/// Field set of the exported table, fixed for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    #[default]
    Minimal,
    Full,
}

impl Verbosity {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Verbosity::Minimal => &MINIMAL_COLUMNS,
            Verbosity::Full => &FULL_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimalRow {
    pub agent_name: String,
    #[serde(rename = "agent_content_rag_dataset_id")]
    pub rag_dataset_id: Option<String>,
    pub session_id: String,
    #[serde(rename = "session_created_user_name")]
    pub created_user_name: Option<String>,
    #[serde(rename = "session_state_feedback")]
    pub feedback: Option<String>,
    #[serde(rename = "session_message_timestamp")]
    pub timestamp: String,
    #[serde(rename = "session_message_system_content_text")]
    pub system_text: Option<String>,
    #[serde(rename = "session_message_user_content_text")]
    pub user_text: String,
    #[serde(rename = "session_message_rag_content_text")]
    pub rag_text: Option<String>,
    #[serde(rename = "session_message_assistant_content_text")]
    pub assistant_text: String,
}

impl MinimalRow {
    /// Cells in [`MINIMAL_COLUMNS`] order.
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Some(self.agent_name.clone()),
            self.rag_dataset_id.clone(),
            Some(self.session_id.clone()),
            self.created_user_name.clone(),
            self.feedback.clone(),
            Some(self.timestamp.clone()),
            self.system_text.clone(),
            Some(self.user_text.clone()),
            self.rag_text.clone(),
            Some(self.assistant_text.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullRow {
    pub agent_name: String,
    pub agent_type: String,
    #[serde(rename = "agent_content_category")]
    pub agent_category: String,
    #[serde(rename = "agent_content_description")]
    pub agent_description: Option<String>,
    #[serde(rename = "agent_content_source_text")]
    pub agent_source_text: Option<String>,
    #[serde(rename = "agent_content_rag_dataset_id")]
    pub rag_dataset_id: Option<String>,
    pub session_id: String,
    pub session_name: Option<String>,
    #[serde(rename = "session_created_user_name")]
    pub created_user_name: Option<String>,
    #[serde(rename = "session_state_feedback")]
    pub feedback: Option<String>,
    #[serde(rename = "session_message_timestamp")]
    pub timestamp: String,
    #[serde(rename = "session_message_system_content_text")]
    pub system_text: Option<String>,
    #[serde(rename = "session_message_user_content_text")]
    pub user_text: String,
    #[serde(rename = "session_message_rag_content_text")]
    pub rag_text: Option<String>,
    #[serde(rename = "session_message_assistant_content_text")]
    pub assistant_text: String,
}

impl FullRow {
    /// Cells in [`FULL_COLUMNS`] order.
    pub fn cells(&self) -> Vec<Cell> {
        vec![
            Some(self.agent_name.clone()),
            Some(self.agent_type.clone()),
            Some(self.agent_category.clone()),
            self.agent_description.clone(),
            self.agent_source_text.clone(),
            self.rag_dataset_id.clone(),
            Some(self.session_id.clone()),
            self.session_name.clone(),
            self.created_user_name.clone(),
            self.feedback.clone(),
            Some(self.timestamp.clone()),
            self.system_text.clone(),
            Some(self.user_text.clone()),
            self.rag_text.clone(),
            Some(self.assistant_text.clone()),
        ]
    }
}

/// One turn joined with its session and agent metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportRow {
    Minimal(MinimalRow),
    Full(FullRow),
}

impl ExportRow {
    pub fn new(
        verbosity: Verbosity,
        agent: &Agent,
        category: Category,
        session: &Session,
        turn: Turn,
    ) -> Self {
        match verbosity {
            Verbosity::Minimal => ExportRow::Minimal(MinimalRow {
                agent_name: agent.name.clone(),
                rag_dataset_id: agent.context.rag_dataset_id.clone(),
                session_id: session.id.clone(),
                created_user_name: session.created_user_name.clone(),
                feedback: session.feedback_text(),
                timestamp: turn.timestamp_text,
                system_text: turn.system,
                user_text: turn.user,
                rag_text: turn.rag,
                assistant_text: turn.assistant,
            }),
            Verbosity::Full => ExportRow::Full(FullRow {
                agent_name: agent.name.clone(),
                agent_type: agent.agent_type.clone(),
                agent_category: category.to_string(),
                agent_description: agent.context.description.clone(),
                agent_source_text: agent.context.source_text.clone(),
                rag_dataset_id: agent.context.rag_dataset_id.clone(),
                session_id: session.id.clone(),
                session_name: session.name.clone(),
                created_user_name: session.created_user_name.clone(),
                feedback: session.feedback_text(),
                timestamp: turn.timestamp_text,
                system_text: turn.system,
                user_text: turn.user,
                rag_text: turn.rag,
                assistant_text: turn.assistant,
            }),
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        match self {
            ExportRow::Minimal(row) => row.cells(),
            ExportRow::Full(row) => row.cells(),
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            ExportRow::Minimal(row) => &row.session_id,
            ExportRow::Full(row) => &row.session_id,
        }
    }
}

/// Counters collected while aggregating a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub sessions: usize,
    pub sessions_skipped: usize,
    pub rows: usize,
    pub messages_dropped: usize,
}

/// Accumulates rows across sessions in arrival order.
pub struct RowAggregator {
    verbosity: Verbosity,
    rows: Vec<ExportRow>,
    summary: ExportSummary,
}

impl RowAggregator {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            rows: Vec::new(),
            summary: ExportSummary::default(),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn summary(&self) -> ExportSummary {
        self.summary
    }

    /// Append one row per reconstructed turn of `session`.
    ///
    /// On an unsupported category nothing is appended, the session is counted as
    /// skipped and the error is returned for the caller to report.
    pub fn push_session(&mut self, session: &Session, agent: &Agent) -> Result<usize> {
        self.summary.sessions += 1;

        let category = match agent.context.category() {
            Ok(category) => category,
            Err(err) => {
                self.summary.sessions_skipped += 1;
                return Err(err.into());
            }
        };

        let turns = Turns::new(category, &session.messages);
        let dropped = turns.dropped();
        if dropped > 0 {
            tracing::warn!(
                session_id = %session.id,
                %category,
                messages = session.messages.len(),
                dropped,
                "Session does not end on a complete turn; trailing messages dropped"
            );
            self.summary.messages_dropped += dropped;
        }

        let verbosity = self.verbosity;
        let before = self.rows.len();
        self.rows
            .extend(turns.map(|turn| ExportRow::new(verbosity, agent, category, session, turn)));
        let added = self.rows.len() - before;

        self.summary.rows += added;
        Ok(added)
    }

    pub fn finish(self) -> (Table, ExportSummary) {
        (Table::new(self.verbosity, self.rows), self.summary)
    }
}
