use std::collections::HashMap;
use std::path::Path;

use chatlog_client::{AgentDirectory, SessionDirectory, SessionFilter};
use chatlog_engine::{FULL_COLUMNS, MINIMAL_COLUMNS, Verbosity};
use chatlog_runtime::{Error, ExportRequest, ExportService, ExportTarget};
use chatlog_types::{Agent, AgentContext, Message, Role, Session};
use calamine::{Reader, Xlsx, open_workbook};
use chrono::{DateTime, Duration, FixedOffset};
use tempfile::TempDir;

/// In-memory directory standing in for the HTTP API.
#[derive(Default)]
struct FakeDirectory {
    agents: HashMap<String, Agent>,
    sessions: Vec<Session>,
}

impl FakeDirectory {
    fn with_agent(mut self, id: &str, category: &str) -> Self {
        self.agents.insert(
            id.to_string(),
            Agent {
                id: id.to_string(),
                name: format!("{} bot", category),
                agent_type: "chat".to_string(),
                context: AgentContext {
                    category: Some(category.to_string()),
                    rag_dataset_id: (category == "rag").then(|| "ds-1".to_string()),
                    ..Default::default()
                },
            },
        );
        self
    }

    fn with_source_text(mut self, agent_id: &str, text: &str) -> Self {
        if let Some(agent) = self.agents.get_mut(agent_id) {
            agent.context.source_text = Some(text.to_string());
        }
        self
    }

    fn with_session(mut self, id: &str, agent_id: &str, roles: &[(Role, &str)]) -> Self {
        let base = created_at();
        self.sessions.push(Session {
            id: id.to_string(),
            name: Some(format!("session {}", id)),
            created_at: base,
            created_user_name: Some("alice".to_string()),
            agent_id: agent_id.to_string(),
            feedback: Some(serde_json::json!({"rating": 5})),
            messages: roles
                .iter()
                .enumerate()
                .map(|(i, (role, text))| {
                    Message::new(*role, base + Duration::seconds(i as i64), *text)
                })
                .collect(),
        });
        self
    }
}

impl SessionDirectory for FakeDirectory {
    fn get_sessions(&self) -> chatlog_client::Result<Vec<Session>> {
        Ok(self.sessions.clone())
    }
}

impl AgentDirectory for FakeDirectory {
    fn get_agent(&self, agent_id: &str) -> chatlog_client::Result<Agent> {
        self.agents
            .get(agent_id)
            .cloned()
            .ok_or_else(|| chatlog_client::Error::Api {
                status: 404,
                body: format!("agent {} not found", agent_id),
            })
    }
}

fn created_at() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-11-25T09:00:00+09:00").unwrap()
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

/// Sheet name plus header and rows of the only worksheet, blanks as `""`.
fn read_xlsx(path: &Path) -> (String, Vec<String>, Vec<Vec<String>>) {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let names = workbook.sheet_names();
    assert_eq!(names.len(), 1, "{names:?}");
    let range = workbook.worksheet_range(&names[0]).unwrap();
    let mut rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    let header = rows.remove(0);
    (names[0].clone(), header, rows)
}

fn sample_directory() -> FakeDirectory {
    FakeDirectory::default()
        .with_agent("g", "general")
        .with_agent("r", "rag")
        .with_session(
            "s-1",
            "g",
            &[
                (Role::User, "hello, \"world\""),
                (Role::Assistant, "line one\nline two"),
            ],
        )
        .with_session(
            "s-2",
            "r",
            &[
                (Role::System, "system"),
                (Role::User, "user1"),
                (Role::System, "rag1"),
                (Role::Assistant, "assistant1"),
            ],
        )
}

#[test]
fn test_csv_round_trip() {
    let dir = TempDir::new().unwrap();
    let directory = sample_directory();
    let service = ExportService::new(&directory, &directory);
    let request = ExportRequest::default();

    let (table, _) = service.collect(&request).unwrap();
    let target = ExportTarget::new(dir.path().join("out.csv")).unwrap();
    let summary = service.export(&request, &target).unwrap();

    let (header, rows) = read_csv(target.path());
    assert_eq!(header, MINIMAL_COLUMNS);
    assert_eq!(rows.len(), table.len());
    for (row, record) in rows.iter().zip(table.records()) {
        let expected: Vec<String> = record.into_iter().map(Option::unwrap_or_default).collect();
        assert_eq!(row, &expected);
    }
    assert_eq!(rows[0][7], "hello, \"world\"");
    assert_eq!(rows[0][9], "line one\nline two");
    assert_eq!(rows[0][4], r#"{"rating":5}"#);
    assert_eq!(rows[1][1], "ds-1");
    assert_eq!(rows[1][8], "rag1");
    assert_eq!(summary.rows, 2);
}

#[test]
fn test_full_verbosity_header() {
    let dir = TempDir::new().unwrap();
    let directory = sample_directory();
    let request = ExportRequest {
        verbosity: Verbosity::Full,
        ..Default::default()
    };
    let target = ExportTarget::new(dir.path().join("full.csv")).unwrap();

    ExportService::new(&directory, &directory)
        .export(&request, &target)
        .unwrap();

    let (header, rows) = read_csv(target.path());
    assert_eq!(header, FULL_COLUMNS);
    assert!(rows.iter().all(|r| r.len() == FULL_COLUMNS.len()));
    assert_eq!(rows[1][2], "rag");
}

#[test]
fn test_no_sessions_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let directory = FakeDirectory::default();
    let target = ExportTarget::new(dir.path().join("empty.csv")).unwrap();

    let summary = ExportService::new(&directory, &directory)
        .export(&ExportRequest::default(), &target)
        .unwrap();

    let (header, rows) = read_csv(target.path());
    assert_eq!(header, MINIMAL_COLUMNS);
    assert!(rows.is_empty());
    assert_eq!(summary.sessions, 0);
}

#[test]
fn test_unknown_category_session_is_skipped() {
    let dir = TempDir::new().unwrap();
    let directory = FakeDirectory::default()
        .with_agent("g", "general")
        .with_agent("u", "unknown")
        .with_session("s-1", "u", &[(Role::User, "q"), (Role::Assistant, "a")])
        .with_session("s-2", "g", &[(Role::User, "q"), (Role::Assistant, "a")]);
    let target = ExportTarget::new(dir.path().join("out.csv")).unwrap();

    let summary = ExportService::new(&directory, &directory)
        .export(&ExportRequest::default(), &target)
        .unwrap();

    let (_, rows) = read_csv(target.path());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "s-2");
    assert_eq!(summary.sessions_skipped, 1);
}

#[test]
fn test_client_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let directory = FakeDirectory::default()
        .with_agent("g", "general")
        .with_session("s-1", "g", &[(Role::User, "q"), (Role::Assistant, "a")])
        .with_session("s-2", "missing", &[(Role::User, "q"), (Role::Assistant, "a")]);
    let target = ExportTarget::new(dir.path().join("out.csv")).unwrap();

    let err = ExportService::new(&directory, &directory)
        .export(&ExportRequest::default(), &target)
        .unwrap_err();

    assert!(matches!(err, Error::Client(ref e) if e.is_not_found()));
    assert!(!target.path().exists());
}

#[test]
fn test_filter_is_applied() {
    let dir = TempDir::new().unwrap();
    let directory = sample_directory();
    let request = ExportRequest {
        filter: SessionFilter::new().exclude_user("ali").unwrap(),
        ..Default::default()
    };
    let target = ExportTarget::new(dir.path().join("out.csv")).unwrap();

    let summary = ExportService::new(&directory, &directory)
        .export(&request, &target)
        .unwrap();

    assert_eq!(summary.sessions, 0);
    assert!(read_csv(target.path()).1.is_empty());
}

#[test]
fn test_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let directory = sample_directory();
    let nested = dir.path().join("a").join("b").join("out.csv");
    let target = ExportTarget::new(&nested).unwrap();

    let service = ExportService::new(&directory, &directory);
    service.export(&ExportRequest::default(), &target).unwrap();
    // second run into the now-existing directory
    service.export(&ExportRequest::default(), &target).unwrap();

    assert_eq!(read_csv(&nested).1.len(), 2);
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    let directory = sample_directory();
    let service = ExportService::new(&directory, &directory);
    let first = ExportTarget::new(dir.path().join("first.csv")).unwrap();
    let second = ExportTarget::new(dir.path().join("second.csv")).unwrap();

    service.export(&ExportRequest::default(), &first).unwrap();
    service.export(&ExportRequest::default(), &second).unwrap();

    assert_eq!(
        std::fs::read(first.path()).unwrap(),
        std::fs::read(second.path()).unwrap()
    );
}

#[test]
fn test_xlsx_matches_csv() {
    let dir = TempDir::new().unwrap();
    let directory = sample_directory();
    let service = ExportService::new(&directory, &directory);
    let request = ExportRequest {
        verbosity: Verbosity::Full,
        ..Default::default()
    };
    let csv_target = ExportTarget::new(dir.path().join("report.csv")).unwrap();
    let xlsx_target = ExportTarget::new(dir.path().join("report.xlsx"))
        .unwrap()
        .with_sheet_name("2024-11-25")
        .unwrap();

    service.export(&request, &csv_target).unwrap();
    service.export(&request, &xlsx_target).unwrap();

    let (sheet, header, rows) = read_xlsx(xlsx_target.path());
    assert_eq!(sheet, "2024-11-25");
    assert_eq!(header, FULL_COLUMNS);
    assert_eq!((header, rows.clone()), read_csv(csv_target.path()));
    assert_eq!(rows[0][14], "line one\nline two");
    // agent description is absent for both agents
    assert!(rows.iter().all(|row| row[3].is_empty()));
}

#[test]
fn test_xlsx_header_only_when_no_sessions() {
    let dir = TempDir::new().unwrap();
    let directory = FakeDirectory::default();
    let target = ExportTarget::new(dir.path().join("empty.xlsx")).unwrap();

    ExportService::new(&directory, &directory)
        .export(&ExportRequest::default(), &target)
        .unwrap();

    let (_, header, rows) = read_xlsx(target.path());
    assert_eq!(header, MINIMAL_COLUMNS);
    assert!(rows.is_empty());
}

#[test]
fn test_xlsx_truncates_oversized_cells() {
    let dir = TempDir::new().unwrap();
    let long_prompt = "x".repeat(40_000);
    let directory = sample_directory().with_source_text("g", &long_prompt);
    let service = ExportService::new(&directory, &directory);
    let request = ExportRequest {
        verbosity: Verbosity::Full,
        ..Default::default()
    };
    let csv_target = ExportTarget::new(dir.path().join("long.csv")).unwrap();
    let xlsx_target = ExportTarget::new(dir.path().join("long.xlsx")).unwrap();

    service.export(&request, &csv_target).unwrap();
    service.export(&request, &xlsx_target).unwrap();

    let column = FULL_COLUMNS
        .iter()
        .position(|c| *c == "agent_content_source_text")
        .unwrap();
    let (_, _, xlsx_rows) = read_xlsx(xlsx_target.path());
    assert_eq!(xlsx_rows[0][column].len(), 32_767);
    assert!(xlsx_rows[1][column].is_empty());
    let (_, csv_rows) = read_csv(csv_target.path());
    assert_eq!(csv_rows[0][column], long_prompt);
}
