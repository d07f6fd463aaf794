use serde::Serialize;

use crate::export::{ExportRow, Verbosity};

/// A single table cell; `None` renders as an empty cell.
pub type Cell = Option<String>;

pub const FULL_COLUMNS: [&str; 15] = [
    "agent_name",
    "agent_type",
    "agent_content_category",
    "agent_content_description",
    "agent_content_source_text",
    "agent_content_rag_dataset_id",
    "session_id",
    "session_name",
    "session_created_user_name",
    "session_state_feedback",
    "session_message_timestamp",
    "session_message_system_content_text",
    "session_message_user_content_text",
    "session_message_rag_content_text",
    "session_message_assistant_content_text",
];

pub const MINIMAL_COLUMNS: [&str; 10] = [
    "agent_name",
    "agent_content_rag_dataset_id",
    "session_id",
    "session_created_user_name",
    "session_state_feedback",
    "session_message_timestamp",
    "session_message_system_content_text",
    "session_message_user_content_text",
    "session_message_rag_content_text",
    "session_message_assistant_content_text",
];

/// Finished export table: a fixed header plus rows in session-then-turn order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    verbosity: Verbosity,
    rows: Vec<ExportRow>,
}

impl Table {
    pub(crate) fn new(verbosity: Verbosity, rows: Vec<ExportRow>) -> Self {
        Self { verbosity, rows }
    }

    pub fn empty(verbosity: Verbosity) -> Self {
        Self::new(verbosity, Vec::new())
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn header(&self) -> &'static [&'static str] {
        self.verbosity.columns()
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row cells in header order.
    pub fn records(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        self.rows.iter().map(ExportRow::cells)
    }
}
