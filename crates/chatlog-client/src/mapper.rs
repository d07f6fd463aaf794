use chatlog_types::{Agent, AgentContext, Message, Session};
use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::error::{Error, Result};
use crate::schema::{RawAgent, RawMessage, RawSession};

pub(crate) fn map_agent(raw: RawAgent) -> Agent {
    let context = raw.context.unwrap_or_default();
    Agent {
        id: raw.id,
        name: raw.name,
        agent_type: raw.agent_type,
        context: AgentContext {
            category: context.category,
            description: context.description,
            source_text: context.source_text,
            rag_dataset_id: context.rag_dataset_id,
        },
    }
}

pub(crate) fn map_session(raw: RawSession) -> Result<Session> {
    let created_at = parse_timestamp(&raw.created_at)
        .map_err(|e| Error::Schema(format!("session {}: created_at: {}", raw.id, e)))?;

    let messages = raw
        .messages
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, message)| map_message(message, &raw.id, index))
        .collect::<Result<Vec<_>>>()?;

    Ok(Session {
        id: raw.id,
        name: raw.name,
        created_at,
        created_user_name: raw.created_user_name,
        agent_id: raw.agent,
        feedback: raw.state.and_then(|state| state.feedback),
        messages,
    })
}

/// Reduce a wire message to its first content element's text.
///
/// An empty `content` array is a schema error. A first element without `text`
/// (an attachment, say) becomes an empty text so one message cannot sink a run.
pub(crate) fn map_message(raw: RawMessage, session_id: &str, index: usize) -> Result<Message> {
    let schema_error =
        |reason: String| Error::Schema(format!("session {}: message {}: {}", session_id, index, reason));

    let timestamp = parse_timestamp(&raw.timestamp).map_err(schema_error)?;
    let first = raw
        .content
        .into_iter()
        .next()
        .ok_or_else(|| schema_error("content is empty".to_string()))?;
    let text = first.text.unwrap_or_else(|| {
        tracing::warn!(
            session_id,
            index,
            role = %raw.role,
            "First content element has no text; exporting an empty cell"
        );
        String::new()
    });

    Ok(Message::new(raw.role, timestamp, text).with_source_timestamp(raw.timestamp))
}

/// Parse an API timestamp. RFC 3339 is expected; offset-less values are taken as UTC.
pub(crate) fn parse_timestamp(value: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc().fixed_offset())
        .map_err(|e| format!("invalid timestamp {:?}: {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlog_types::Role;
    use serde_json::json;

    fn raw_session(value: serde_json::Value) -> RawSession {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_session_takes_first_content_text() {
        let session = map_session(raw_session(json!({
            "id": "s-1",
            "name": "demo",
            "created_at": "2024-11-25T09:00:00.000000+09:00",
            "created_user_name": "alice",
            "agent": "a-1",
            "state": {"feedback": "good"},
            "messages": [
                {
                    "role": "user",
                    "timestamp": "2024-11-25T09:00:01+09:00",
                    "content": [{"text": "hello"}, {"text": "ignored"}]
                }
            ]
        })))
        .unwrap();

        assert_eq!(session.agent_id, "a-1");
        assert_eq!(session.feedback, Some(json!("good")));
        assert_eq!(session.messages.len(), 1);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[0].text, "hello");
    }

    #[test]
    fn test_map_session_defaults_missing_optional_fields() {
        let session = map_session(raw_session(json!({
            "id": "s-2",
            "created_at": "2024-11-25T00:00:00Z",
            "agent": "a-1"
        })))
        .unwrap();

        assert_eq!(session.name, None);
        assert_eq!(session.feedback, None);
        assert!(session.messages.is_empty());
    }

    #[test]
    fn test_map_session_rejects_empty_content() {
        let err = map_session(raw_session(json!({
            "id": "s-3",
            "created_at": "2024-11-25T00:00:00Z",
            "agent": "a-1",
            "messages": [{"role": "user", "timestamp": "2024-11-25T00:00:00Z", "content": []}]
        })))
        .unwrap_err();

        assert!(matches!(err, Error::Schema(ref msg) if msg.contains("message 0")));
    }

    #[test]
    fn test_map_session_missing_text_is_empty() {
        let session = map_session(raw_session(json!({
            "id": "s-4",
            "created_at": "2024-11-25T00:00:00Z",
            "agent": "a-1",
            "messages": [
                {"role": "user", "timestamp": "2024-11-25T00:00:01Z", "content": [{"image": "x.png"}]},
                {"role": "assistant", "timestamp": "2024-11-25T00:00:02Z", "content": [{"text": "nice"}]}
            ]
        })))
        .unwrap();

        assert_eq!(session.messages[0].text, "");
        assert_eq!(session.messages[1].text, "nice");
    }

    #[test]
    fn test_map_session_keeps_received_timestamp_text() {
        let session = map_session(raw_session(json!({
            "id": "s-5",
            "created_at": "2024-11-25T00:00:00Z",
            "agent": "a-1",
            "messages": [
                {"role": "user", "timestamp": "2024-11-25T09:00:00.000000+09:00", "content": [{"text": "a"}]},
                {"role": "assistant", "timestamp": "2024-11-25T09:00:01.5", "content": [{"text": "b"}]}
            ]
        })))
        .unwrap();

        assert_eq!(session.messages[0].timestamp_text(), "2024-11-25T09:00:00.000000+09:00");
        assert_eq!(session.messages[1].timestamp_text(), "2024-11-25T09:00:01.5");
        assert_eq!(session.messages[1].timestamp.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let ts = parse_timestamp("2024-11-25T09:00:00.123456").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
        assert_eq!(ts.to_rfc3339(), "2024-11-25T09:00:00.123456+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_map_agent_without_context() {
        let raw: RawAgent = serde_json::from_value(json!({
            "id": "a-1",
            "name": "Helper",
            "type": "chat",
            "context": null
        }))
        .unwrap();

        let agent = map_agent(raw);
        assert_eq!(agent.context, AgentContext::default());
    }
}
