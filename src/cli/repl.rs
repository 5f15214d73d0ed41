//! Prompt line commands and incremental rendering of replies.

use crate::app::ChatSnapshot;
use crate::models::{MessageId, Sender};

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Send the line as a user message
    Send(String),
    /// Stop the reply in progress
    Cancel,
    /// Show usage
    Help,
    /// Exit
    Quit,
    /// Blank line
    Empty,
}

/// Classify one line of input.
pub fn parse_line(line: &str) -> LineCommand {
    let trimmed = line.trim();
    match trimmed {
        "" => LineCommand::Empty,
        "/quit" | "/exit" => LineCommand::Quit,
        "/cancel" => LineCommand::Cancel,
        "/help" => LineCommand::Help,
        _ => LineCommand::Send(trimmed.to_string()),
    }
}

/// Turns successive snapshots into the text to print for the latest reply.
///
/// Only new text is returned, so a reply appears as it streams. If the reply
/// text stops being an extension of what was printed (it was replaced by the
/// error text), the full new text is printed on a fresh line.
#[derive(Debug, Default)]
pub struct ReplyRenderer {
    target: Option<MessageId>,
    shown: String,
}

impl ReplyRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output for the latest assistant message, if anything changed.
    pub fn update(&mut self, snapshot: &ChatSnapshot) -> Option<String> {
        let reply = snapshot
            .messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::Assistant)?;

        if self.target != Some(reply.id) {
            self.target = Some(reply.id);
            self.shown.clear();
        }

        if reply.text == self.shown {
            return None;
        }

        let output = match reply.text.strip_prefix(self.shown.as_str()) {
            Some(suffix) => suffix.to_string(),
            None => format!("\n{}", reply.text),
        };
        self.shown = reply.text.clone();
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Conversation;

    fn snapshot_of(conversation: &Conversation) -> ChatSnapshot {
        ChatSnapshot {
            messages: conversation.messages().to_vec(),
            busy: true,
        }
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  "), LineCommand::Empty);
        assert_eq!(parse_line("/quit"), LineCommand::Quit);
        assert_eq!(parse_line(" /cancel "), LineCommand::Cancel);
        assert_eq!(parse_line("/help"), LineCommand::Help);
        assert_eq!(parse_line(" Hi there "), LineCommand::Send("Hi there".to_string()));
    }

    #[test]
    fn test_renderer_prints_increments() {
        let mut conversation = Conversation::new();
        let (_, reply) = conversation.push_exchange("Hi");
        let mut renderer = ReplyRenderer::new();

        assert_eq!(renderer.update(&snapshot_of(&conversation)), None);

        conversation.append_delta(reply, "Hel");
        assert_eq!(
            renderer.update(&snapshot_of(&conversation)),
            Some("Hel".to_string())
        );
        conversation.append_delta(reply, "lo");
        assert_eq!(
            renderer.update(&snapshot_of(&conversation)),
            Some("lo".to_string())
        );
        assert_eq!(renderer.update(&snapshot_of(&conversation)), None);
    }

    #[test]
    fn test_renderer_replaced_text_on_new_line() {
        let mut conversation = Conversation::new();
        let (_, reply) = conversation.push_exchange("Hi");
        let mut renderer = ReplyRenderer::new();

        conversation.append_delta(reply, "par");
        renderer.update(&snapshot_of(&conversation));
        conversation.replace_text(reply, "Sorry, an error occurred.");
        assert_eq!(
            renderer.update(&snapshot_of(&conversation)),
            Some("\nSorry, an error occurred.".to_string())
        );
    }

    #[test]
    fn test_renderer_follows_new_reply() {
        let mut conversation = Conversation::new();
        let (_, first) = conversation.push_exchange("one");
        let mut renderer = ReplyRenderer::new();
        conversation.append_delta(first, "abc");
        renderer.update(&snapshot_of(&conversation));

        let (_, second) = conversation.push_exchange("two");
        conversation.append_delta(second, "ab");
        assert_eq!(
            renderer.update(&snapshot_of(&conversation)),
            Some("ab".to_string())
        );
    }
}
