//! Conversation history windowing.
//!
//! Turns the UI transcript into the bounded `{role, content}` list sent with
//! each chat request. A turn is one user message plus the assistant replies
//! that follow it; truncation drops whole turns from the oldest end, so a
//! windowed history always opens on a user message.

use crate::types::{ChatHistoryItem, Message, Role};

/// Build the history payload for a chat request.
///
/// Placeholders are dropped first. With `max_turns` of `None` or `Some(0)`
/// the whole filtered transcript is returned; otherwise only the newest
/// `max_turns` user turns and everything after them.
pub fn build_conversation_history(
    messages: &[Message],
    max_turns: Option<usize>,
) -> Vec<ChatHistoryItem> {
    let history = messages
        .iter()
        .filter(|m| !m.is_placeholder())
        .map(|m| ChatHistoryItem {
            role: Role::from(m.sender),
            content: m.content.clone(),
        })
        .collect::<Vec<_>>();

    let max_turns = match max_turns {
        Some(n) if n > 0 => n,
        _ => return history,
    };

    let start = window_start(&history, max_turns);
    history[start..].to_vec()
}

/// Index of the oldest item kept when retaining `max_turns` user turns.
fn window_start(history: &[ChatHistoryItem], max_turns: usize) -> usize {
    let mut turns = 0;
    for (idx, item) in history.iter().enumerate().rev() {
        if item.role == Role::User {
            turns += 1;
            if turns >= max_turns {
                return idx;
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;
    use pretty_assertions::assert_eq;

    fn msg(sender: Sender, content: &str) -> Message {
        Message {
            id: None,
            sender,
            content: content.to_string(),
            timestamp: None,
            is_loading: false,
        }
    }

    fn transcript() -> Vec<Message> {
        vec![
            msg(Sender::User, "Q1"),
            msg(Sender::Bot, "A1"),
            msg(Sender::User, "Q2"),
            msg(Sender::Bot, "A2"),
            msg(Sender::User, "Q3"),
        ]
    }

    #[test]
    fn limit_two_keeps_last_two_user_turns_and_what_follows_the_cutoff() {
        let history = build_conversation_history(&transcript(), Some(2));
        assert_eq!(
            history,
            vec![
                ChatHistoryItem::user("Q2"),
                ChatHistoryItem::assistant("A2"),
                ChatHistoryItem::user("Q3"),
            ]
        );
    }

    #[test]
    fn no_limit_returns_everything_in_order() {
        let expected = vec![
            ChatHistoryItem::user("Q1"),
            ChatHistoryItem::assistant("A1"),
            ChatHistoryItem::user("Q2"),
            ChatHistoryItem::assistant("A2"),
            ChatHistoryItem::user("Q3"),
        ];
        assert_eq!(build_conversation_history(&transcript(), None), expected);
        assert_eq!(build_conversation_history(&transcript(), Some(0)), expected);
    }

    #[test]
    fn placeholder_is_excluded() {
        let mut loading = msg(Sender::Bot, "<i class=\"fas fa-spinner fa-spin\"></i> thinking");
        loading.is_loading = true;
        let history = build_conversation_history(&[msg(Sender::User, "A"), loading], None);
        assert_eq!(history, vec![ChatHistoryItem::user("A")]);
    }

    #[test]
    fn marker_alone_excludes_message() {
        let history = build_conversation_history(
            &[msg(Sender::User, "A"), msg(Sender::Bot, "fa-spinner")],
            Some(3),
        );
        assert_eq!(history, vec![ChatHistoryItem::user("A")]);
    }

    #[test]
    fn fewer_turns_than_limit_keeps_everything() {
        let messages = vec![
            msg(Sender::Bot, "greeting"),
            msg(Sender::User, "Q1"),
            msg(Sender::Bot, "A1"),
        ];
        let history = build_conversation_history(&messages, Some(5));
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], ChatHistoryItem::assistant("greeting"));
    }

    #[test]
    fn truncated_window_opens_on_user_and_respects_limit() {
        let mut messages = vec![msg(Sender::Bot, "greeting")];
        for i in 0..10 {
            messages.push(msg(Sender::User, &format!("Q{i}")));
            messages.push(msg(Sender::Bot, &format!("A{i}a")));
            messages.push(msg(Sender::Bot, &format!("A{i}b")));
        }

        for limit in 1..=10 {
            let history = build_conversation_history(&messages, Some(limit));
            let users = history.iter().filter(|h| h.role == Role::User).count();
            assert_eq!(users, limit);
            assert_eq!(history[0].role, Role::User);
            assert_eq!(history.last().unwrap().content, "A9b");
        }
    }

    #[test]
    fn empty_input_yields_empty_history() {
        assert!(build_conversation_history(&[], Some(2)).is_empty());
        assert!(build_conversation_history(&[], None).is_empty());
    }
}
