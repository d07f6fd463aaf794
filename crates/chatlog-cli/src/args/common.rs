use chatlog_client::SessionFilter;
use chrono::{DateTime, FixedOffset};
use clap::Args;

/// Session selection shared by `export` and `sessions list`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(
        long,
        value_parser = parse_timestamp,
        help = "Only sessions created after this RFC 3339 time (exclusive)"
    )]
    pub start: Option<DateTime<FixedOffset>>,

    #[arg(
        long,
        value_parser = parse_timestamp,
        help = "Only sessions created before this RFC 3339 time (exclusive)"
    )]
    pub end: Option<DateTime<FixedOffset>>,

    #[arg(
        long = "exclude-user",
        value_name = "REGEX",
        help = "Drop sessions whose creator name matches (repeatable)"
    )]
    pub exclude_users: Vec<String>,
}

impl FilterArgs {
    pub fn resolve(&self) -> chatlog_client::Result<SessionFilter> {
        let mut filter = SessionFilter::new().exclude_users(&self.exclude_users)?;
        if let Some(start) = self.start {
            filter = filter.created_after(start);
        }
        if let Some(end) = self.end {
            filter = filter.created_before(end);
        }
        Ok(filter)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        format!(
            "{} (expected RFC 3339, e.g. 2024-11-24T00:00:00+09:00)",
            e
        )
    })
}
