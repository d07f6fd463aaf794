use chatlog_client::{AgentDirectory, SessionDirectory, SessionFilter};
use chatlog_engine::{ExportSummary, RowAggregator, Table, Verbosity};

use crate::Result;
use crate::exporter::{ExportTarget, write_table};

/// What to pull from the directory and how wide the rows are.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    pub filter: SessionFilter,
    pub verbosity: Verbosity,
}

/// Fetch sessions, flatten them into rows and write the table.
pub struct ExportService<'a, S, A> {
    sessions: &'a S,
    agents: &'a A,
}

impl<'a, S, A> ExportService<'a, S, A>
where
    S: SessionDirectory,
    A: AgentDirectory,
{
    pub fn new(sessions: &'a S, agents: &'a A) -> Self {
        Self { sessions, agents }
    }

    /// Build the table in memory.
    ///
    /// Sessions whose agent declares an unsupported category are logged and
    /// skipped. Client failures abort the whole run.
    pub fn collect(&self, request: &ExportRequest) -> Result<(Table, ExportSummary)> {
        let sessions = self
            .sessions
            .get_filtered_sessions(&request.filter)
            .inspect_err(|err| tracing::error!(error = %err, "Failed to list sessions"))?;
        tracing::info!(count = sessions.len(), "Sessions selected for export");

        let mut aggregator = RowAggregator::new(request.verbosity);
        for session in &sessions {
            let span = tracing::info_span!(
                "session",
                session_id = %session.id,
                agent_id = %session.agent_id
            );
            let _enter = span.enter();

            let agent = self
                .agents
                .get_agent(&session.agent_id)
                .inspect_err(|err| tracing::error!(error = %err, "Failed to fetch agent"))?;

            match aggregator.push_session(session, &agent) {
                Ok(rows) => tracing::debug!(rows, "Session flattened"),
                Err(err) => tracing::error!(error = %err, "Skipping session"),
            }
        }

        Ok(aggregator.finish())
    }

    /// Collect, then write. Nothing is written when collection fails.
    pub fn export(&self, request: &ExportRequest, target: &ExportTarget) -> Result<ExportSummary> {
        let (table, summary) = self.collect(request)?;
        write_table(&table, target)?;
        tracing::info!(
            sessions = summary.sessions,
            skipped = summary.sessions_skipped,
            rows = summary.rows,
            dropped_messages = summary.messages_dropped,
            "Export finished"
        );
        Ok(summary)
    }
}
