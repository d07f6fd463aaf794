use chatlog_types::{Category, Message, Turn};
use std::slice::ChunksExact;

/// Iterator over the turns of one session.
///
/// Messages are grouped purely by position:
/// - `general`: `[user, assistant]` pairs from index 0
/// - `prompt`: `messages[0]` is the session system text, then `[user, assistant]` pairs
/// - `rag`: `messages[0]` is the session system text, then `[user, rag, assistant]` triplets
///
/// Only complete groups are yielded. A trailing partial group is left in
/// [`Turns::dropped`] rather than indexed past the end.
pub struct Turns<'a> {
    category: Category,
    system: Option<&'a Message>,
    groups: ChunksExact<'a, Message>,
}

impl<'a> Turns<'a> {
    pub fn new(category: Category, messages: &'a [Message]) -> Self {
        let (system, body) = if category.reserves_system_message() {
            match messages.split_first() {
                Some((first, rest)) => (Some(first), rest),
                None => (None, messages),
            }
        } else {
            (None, messages)
        };

        Self {
            category,
            system,
            groups: body.chunks_exact(category.turn_len()),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of trailing messages that do not form a complete turn.
    pub fn dropped(&self) -> usize {
        self.groups.remainder().len()
    }

    fn build(&self, group: &[Message]) -> Turn {
        let expected = self.category.expected_roles();
        if !group.iter().map(|m| m.role).eq(expected.iter().copied()) {
            tracing::debug!(
                category = %self.category,
                roles = ?group.iter().map(|m| m.role).collect::<Vec<_>>(),
                "Turn roles differ from the category pattern; grouping by position"
            );
        }

        let user = &group[0];
        let assistant = &group[group.len() - 1];
        let rag = match self.category {
            Category::Rag => Some(group[1].text.clone()),
            Category::General | Category::Prompt => None,
        };

        Turn {
            timestamp: user.timestamp,
            timestamp_text: user.timestamp_text(),
            system: self.system.map(|m| m.text.clone()),
            user: user.text.clone(),
            rag,
            assistant: assistant.text.clone(),
        }
    }
}

impl Iterator for Turns<'_> {
    type Item = Turn;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.groups.next()?;
        Some(self.build(group))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}

impl ExactSizeIterator for Turns<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlog_types::Role;
    use chrono::{DateTime, Duration, FixedOffset};

    fn base_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-11-25T09:00:00+09:00").unwrap()
    }

    fn msg(role: Role, text: &str, offset_secs: i64) -> Message {
        Message::new(role, base_time() + Duration::seconds(offset_secs), text)
    }

    /// `[user, assistant]*n`, optionally led by a system message
    fn conversation(system: Option<&str>, n: usize) -> Vec<Message> {
        let mut messages = Vec::new();
        if let Some(text) = system {
            messages.push(msg(Role::System, text, 0));
        }
        for i in 0..n {
            let t = (i as i64 + 1) * 10;
            messages.push(msg(Role::User, &format!("user{}", i), t));
            messages.push(msg(Role::Assistant, &format!("assistant{}", i), t + 1));
        }
        messages
    }

    fn rag_conversation(n: usize) -> Vec<Message> {
        let mut messages = vec![msg(Role::System, "system", 0)];
        for i in 0..n {
            let t = (i as i64 + 1) * 10;
            messages.push(msg(Role::User, &format!("user{}", i), t));
            messages.push(msg(Role::System, &format!("rag{}", i), t + 1));
            messages.push(msg(Role::Assistant, &format!("assistant{}", i), t + 2));
        }
        messages
    }

    #[test]
    fn test_general_pairs() {
        let messages = conversation(None, 2);
        let turns: Vec<_> = Turns::new(Category::General, &messages).collect();

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].user, "user0");
        assert_eq!(turns[0].assistant, "assistant0");
        assert_eq!(turns[1].user, "user1");
        assert_eq!(turns[1].assistant, "assistant1");
        for turn in &turns {
            assert_eq!(turn.system, None);
            assert_eq!(turn.rag, None);
        }
    }

    #[test]
    fn test_general_turn_count_matches_pairs() {
        for n in 0..6 {
            let messages = conversation(None, n);
            let turns = Turns::new(Category::General, &messages);
            assert_eq!(turns.len(), n);
            assert_eq!(turns.count(), n);
        }
    }

    #[test]
    fn test_prompt_shares_system_text() {
        let messages = conversation(Some("You are terse."), 2);
        let turns: Vec<_> = Turns::new(Category::Prompt, &messages).collect();

        assert_eq!(turns.len(), 2);
        for turn in &turns {
            assert_eq!(turn.system.as_deref(), Some("You are terse."));
            assert_eq!(turn.rag, None);
        }
        assert_eq!(turns[1].user, "user1");
        assert_eq!(turns[1].assistant, "assistant1");
    }

    #[test]
    fn test_prompt_turn_count_matches_pairs() {
        for n in 0..6 {
            let messages = conversation(Some("sys"), n);
            assert_eq!(Turns::new(Category::Prompt, &messages).count(), n);
        }
    }

    #[test]
    fn test_rag_triplets() {
        let messages = rag_conversation(1);
        let turns: Vec<_> = Turns::new(Category::Rag, &messages).collect();

        assert_eq!(turns.len(), 1);
        let turn = &turns[0];
        assert_eq!(turn.system.as_deref(), Some("system"));
        assert_eq!(turn.user, "user0");
        assert_eq!(turn.rag.as_deref(), Some("rag0"));
        assert_eq!(turn.assistant, "assistant0");
    }

    #[test]
    fn test_rag_text_is_second_of_triplet() {
        for n in 0..5 {
            let messages = rag_conversation(n);
            let turns: Vec<_> = Turns::new(Category::Rag, &messages).collect();
            assert_eq!(turns.len(), n);
            for (i, turn) in turns.iter().enumerate() {
                assert_eq!(turn.rag.as_deref(), Some(messages[2 + 3 * i].text.as_str()));
                assert!(turn.system.is_some());
            }
        }
    }

    #[test]
    fn test_timestamp_is_user_message_timestamp() {
        let messages = conversation(Some("sys"), 1);
        let turn = Turns::new(Category::Prompt, &messages).next().unwrap();

        assert_eq!(turn.timestamp, messages[1].timestamp);
        assert_ne!(turn.timestamp, messages[2].timestamp);
    }

    #[test]
    fn test_trailing_partial_group_is_dropped() {
        let mut messages = conversation(None, 2);
        messages.push(msg(Role::User, "unanswered", 99));

        let turns = Turns::new(Category::General, &messages);
        assert_eq!(turns.dropped(), 1);
        assert_eq!(turns.count(), 2);

        let mut rag = rag_conversation(1);
        rag.push(msg(Role::User, "user1", 50));
        rag.push(msg(Role::System, "rag1", 51));
        let turns = Turns::new(Category::Rag, &rag);
        assert_eq!(turns.dropped(), 2);
        assert_eq!(turns.count(), 1);
    }

    #[test]
    fn test_empty_and_system_only_sessions() {
        assert_eq!(Turns::new(Category::Prompt, &[]).count(), 0);
        assert_eq!(Turns::new(Category::Rag, &[]).count(), 0);
        assert_eq!(Turns::new(Category::General, &[]).count(), 0);

        let only_system = vec![msg(Role::System, "sys", 0)];
        let turns = Turns::new(Category::Prompt, &only_system);
        assert_eq!(turns.dropped(), 0);
        assert_eq!(turns.count(), 0);
    }

    #[test]
    fn test_roles_are_not_enforced() {
        // Positional grouping wins even when roles are swapped
        let messages = vec![msg(Role::Assistant, "first", 0), msg(Role::User, "second", 1)];
        let turn = Turns::new(Category::General, &messages).next().unwrap();

        assert_eq!(turn.user, "first");
        assert_eq!(turn.assistant, "second");
    }
}
