//! Chat session control.
//!
//! This module contains the [`ChatController`], the single owner of the
//! conversation, and the session types its pipeline tasks report through:
//! - [`StreamSession`] / [`SessionState`] - Lifecycle of one reply
//! - [`SessionEvent`] - Messages from a spawned pipeline task
//! - [`ChatSnapshot`] - What a view renders

mod cancel;
mod session;
mod stream;

pub use session::{
    Completion, SessionEvent, SessionId, SessionOutcome, SessionState, StreamSession,
};

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::ChatConfig;
use crate::models::{Conversation, Message};
use crate::traits::HttpClient;

/// Number of finished sessions whose state stays queryable.
pub const SESSION_HISTORY_LIMIT: usize = 64;

/// Messages and busy flag, published after every change for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSnapshot {
    pub messages: Vec<Message>,
    /// True while a reply is streaming (the typing indicator)
    pub busy: bool,
}

/// Owns the conversation and the lifecycle of reply sessions.
///
/// All mutations of the message sequence happen here. Pipeline tasks only
/// send [`SessionEvent`]s, which are applied in arrival order by
/// [`handle_event`](Self::handle_event) after checking that they come from
/// the current session.
pub struct ChatController {
    client: Arc<dyn HttpClient>,
    config: ChatConfig,
    conversation: Conversation,
    /// The active session, if a reply is streaming
    current: Option<StreamSession>,
    /// The most recent sessions that reached a terminal state, oldest first
    history: VecDeque<StreamSession>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    snapshot_tx: watch::Sender<ChatSnapshot>,
}

impl ChatController {
    pub fn new(client: Arc<dyn HttpClient>, config: ChatConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(ChatSnapshot::default());
        Self {
            client,
            config,
            conversation: Conversation::new(),
            current: None,
            history: VecDeque::with_capacity(SESSION_HISTORY_LIMIT),
            event_tx,
            event_rx,
            snapshot_tx,
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    /// Whether a reply is streaming
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// The active session, if any
    pub fn current_session(&self) -> Option<&StreamSession> {
        self.current.as_ref()
    }

    /// State of a session started by this controller.
    ///
    /// Returns `None` for ids this controller never issued and for finished
    /// sessions older than the last [`SESSION_HISTORY_LIMIT`].
    pub fn session_state(&self, id: SessionId) -> Option<SessionState> {
        self.current
            .iter()
            .chain(self.history.iter().rev())
            .find(|s| s.id == id)
            .map(|s| s.state())
    }

    /// Receive published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current view of the conversation.
    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.conversation.messages().to_vec(),
            busy: self.is_busy(),
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    /// Wait for the next event from any pipeline task.
    ///
    /// The controller keeps a sender of its own, so this only returns `None`
    /// if the channel is closed, which does not happen while `self` lives.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.recv().await
    }

    /// Apply an event from a pipeline task.
    ///
    /// Events from any session other than the current one are discarded, so a
    /// superseded stream can never write into a newer message. Returns whether
    /// the event changed anything.
    pub fn handle_event(&mut self, event: SessionEvent) -> bool {
        let session_id = event.session_id();
        let Some(target) = self
            .current
            .as_ref()
            .filter(|s| s.id == session_id)
            .map(|s| s.target)
        else {
            debug!(session = %session_id, "Discarding event from stale session");
            return false;
        };

        match event {
            SessionEvent::Delta { fragment, .. } => {
                if self.conversation.append_delta(target, &fragment) {
                    self.publish();
                    true
                } else {
                    false
                }
            }
            SessionEvent::Finished { outcome, .. } => {
                self.finish_current(outcome);
                true
            }
        }
    }

    /// Apply every event already queued, without waiting.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            if self.handle_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Process events until no session is active.
    pub async fn run_until_idle(&mut self) {
        while self.is_busy() {
            match self.event_rx.recv().await {
                Some(event) => {
                    self.handle_event(event);
                }
                None => break,
            }
        }
    }

    fn finish_current(&mut self, outcome: SessionOutcome) {
        let Some(mut session) = self.current.take() else {
            return;
        };

        let state = match outcome {
            SessionOutcome::Completed(completion) => {
                info!(session = %session.id, ?completion, "Reply completed");
                SessionState::Completed
            }
            SessionOutcome::Cancelled => {
                info!(session = %session.id, "Reply cancelled");
                SessionState::Cancelled
            }
            SessionOutcome::Failed(err) => {
                warn!(
                    session = %session.id,
                    code = err.error_code(),
                    hint = %err.user_message(),
                    "Reply stream failed: {}",
                    err
                );
                self.conversation
                    .replace_text(session.target, &self.config.error_text);
                SessionState::Errored
            }
        };

        session.finish(state);
        self.retire(session);
        self.publish();
    }

    /// Move a finished session into the bounded history.
    fn retire(&mut self, session: StreamSession) {
        if self.history.len() == SESSION_HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(session);
    }
}
