//! Stream session types and the events pipeline tasks report.

use std::fmt;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::TransportError;
use crate::models::MessageId;

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a session. Every state but `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Completed,
    Cancelled,
    Errored,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Active)
    }
}

/// One request/response exchange producing one assistant message.
#[derive(Debug, Clone)]
pub struct StreamSession {
    pub id: SessionId,
    /// Assistant message the reply is streamed into
    pub target: MessageId,
    cancel: CancellationToken,
    state: SessionState,
}

impl StreamSession {
    pub fn new(target: MessageId) -> Self {
        Self {
            id: SessionId::new(),
            target,
            cancel: CancellationToken::new(),
            state: SessionState::Active,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Token handed to the pipeline task
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Move to a terminal state. Returns `false` if the session had already
    /// ended, in which case nothing changes.
    pub fn finish(&mut self, state: SessionState) -> bool {
        if self.state.is_terminal() || !state.is_terminal() {
            return false;
        }
        if state == SessionState::Cancelled {
            self.cancel.cancel();
        }
        self.state = state;
        true
    }
}

/// Why a session completed normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// `[DONE]` was received
    Sentinel,
    /// The server closed the stream
    EndOfStream,
    /// The response had no body; treated as an empty reply
    NoBody,
}

/// How a pipeline task ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(Completion),
    Cancelled,
    Failed(TransportError),
}

/// Messages sent from a session's pipeline task to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A non-empty reply fragment, in stream order
    Delta {
        session_id: SessionId,
        fragment: String,
    },
    /// The pipeline stopped and released its transport
    Finished {
        session_id: SessionId,
        outcome: SessionOutcome,
    },
}

impl SessionEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            SessionEvent::Delta { session_id, .. } => *session_id,
            SessionEvent::Finished { session_id, .. } => *session_id,
        }
    }
}
