mod conversation;
mod message;
mod request;

pub use conversation::Conversation;
pub use message::{Message, MessageId, Sender};
pub use request::ChatRequest;
