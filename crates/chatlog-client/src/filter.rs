use chatlog_types::Session;
use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::error::{Error, Result};

/// Client-side session selection.
///
/// Both time bounds are exclusive. A session is dropped when its creator name
/// matches any exclusion pattern (unanchored search); sessions without a creator
/// name are never excluded by pattern.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    excluded_users: Vec<Regex>,
    created_after: Option<DateTime<FixedOffset>>,
    created_before: Option<DateTime<FixedOffset>>,
}

impl SessionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_user(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.excluded_users.push(regex);
        Ok(self)
    }

    pub fn exclude_users<I, S>(self, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .try_fold(self, |filter, pattern| filter.exclude_user(pattern.as_ref()))
    }

    pub fn created_after(mut self, start: DateTime<FixedOffset>) -> Self {
        self.created_after = Some(start);
        self
    }

    pub fn created_before(mut self, end: DateTime<FixedOffset>) -> Self {
        self.created_before = Some(end);
        self
    }

    pub fn matches(&self, session: &Session) -> bool {
        if let Some(start) = self.created_after
            && session.created_at <= start
        {
            return false;
        }

        if let Some(end) = self.created_before
            && session.created_at >= end
        {
            return false;
        }

        match session.created_user_name.as_deref() {
            Some(user) => !self.excluded_users.iter().any(|re| re.is_match(user)),
            None => true,
        }
    }

    /// Keep matching sessions, preserving directory order.
    pub fn apply(&self, sessions: Vec<Session>) -> Vec<Session> {
        sessions.into_iter().filter(|s| self.matches(s)).collect()
    }
}
