//! The append-only message sequence and the reply accumulator.

use super::message::{Message, MessageId, Sender};

/// Ordered, append-only list of messages.
///
/// Messages are never removed or reordered. User text is fixed once pushed;
/// only assistant messages accept deltas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.id == id)
    }

    /// Append a user message and an empty assistant placeholder together.
    ///
    /// Returns `(user_id, assistant_id)`.
    pub fn push_exchange(&mut self, user_text: impl Into<String>) -> (MessageId, MessageId) {
        let user = Message::user(user_text);
        let assistant = Message::assistant_placeholder();
        let ids = (user.id, assistant.id);
        self.messages.reserve(2);
        self.messages.push(user);
        self.messages.push(assistant);
        ids
    }

    /// Append a reply fragment to the target assistant message.
    ///
    /// Returns `false` and changes nothing when the fragment is empty or the
    /// target is not an assistant message in this conversation.
    pub fn append_delta(&mut self, target: MessageId, fragment: &str) -> bool {
        if fragment.is_empty() {
            return false;
        }
        match self.assistant_mut(target) {
            Some(message) => {
                message.text.push_str(fragment);
                true
            }
            None => false,
        }
    }

    /// Overwrite the target assistant message's text.
    pub fn replace_text(&mut self, target: MessageId, text: &str) -> bool {
        match self.assistant_mut(target) {
            Some(message) => {
                message.text.clear();
                message.text.push_str(text);
                true
            }
            None => false,
        }
    }

    /// The most recent assistant message, if any.
    pub fn last_assistant(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_assistant())
    }

    fn assistant_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages
            .iter_mut()
            .rev()
            .find(|m| m.id == id && m.sender == Sender::Assistant)
    }
}
