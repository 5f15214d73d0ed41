//! Cancelling the active reply.

use tracing::info;

use super::{ChatController, SessionId, SessionState};

impl ChatController {
    /// Cancel the reply in progress, if any.
    ///
    /// The assistant message keeps whatever text it had. The session's
    /// transport is released by its task once the token is observed, and any
    /// events it still sends are discarded.
    pub fn cancel_active(&mut self) -> Option<SessionId> {
        let cancelled = self.cancel_current();
        if cancelled.is_some() {
            self.publish();
        }
        cancelled
    }

    /// Cancel without publishing. Used when a new session is about to
    /// publish anyway.
    pub(super) fn cancel_current(&mut self) -> Option<SessionId> {
        let mut session = self.current.take()?;
        let id = session.id;
        if session.finish(SessionState::Cancelled) {
            info!(session = %id, "Cancelled reply stream");
        }
        self.retire(session);
        Some(id)
    }

    /// Cancel any active reply before the controller goes away.
    pub fn shutdown(&mut self) {
        if let Some(id) = self.cancel_active() {
            info!(session = %id, "Cancelled reply stream on shutdown");
        }
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        if let Some(session) = self.current.as_mut() {
            session.finish(SessionState::Cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::app::{ChatController, SessionState};
    use crate::config::ChatConfig;

    const ENDPOINT: &str = "http://localhost:8000/api/chat/";

    fn pending_controller() -> ChatController {
        let mock = MockHttpClient::new();
        mock.set_response(ENDPOINT, MockResponse::Pending(vec![]));
        ChatController::new(Arc::new(mock), ChatConfig::default())
    }

    #[tokio::test]
    async fn test_cancel_active_when_idle() {
        let mut controller = pending_controller();
        assert_eq!(controller.cancel_active(), None);
    }

    #[tokio::test]
    async fn test_cancel_active_keeps_text_and_clears_busy() {
        let mut controller = pending_controller();
        let id = controller.begin("Hi").unwrap();
        let token = controller.current_session().unwrap().cancellation();

        assert_eq!(controller.cancel_active(), Some(id));
        assert!(token.is_cancelled());
        assert!(!controller.is_busy());
        assert_eq!(controller.session_state(id), Some(SessionState::Cancelled));
        assert_eq!(controller.messages()[1].text, "");
        assert!(!controller.subscribe().borrow().busy);
    }

    #[tokio::test]
    async fn test_cancelled_task_finish_is_discarded() {
        let mut controller = pending_controller();
        let id = controller.begin("Hi").unwrap();
        controller.cancel_active();

        let event = tokio::time::timeout(Duration::from_secs(5), controller.next_event())
            .await
            .expect("cancelled task should report")
            .unwrap();
        assert_eq!(event.session_id(), id);
        assert!(!controller.handle_event(event));
        assert_eq!(controller.session_state(id), Some(SessionState::Cancelled));
    }

    #[tokio::test]
    async fn test_drop_cancels_token() {
        let mut controller = pending_controller();
        controller.begin("Hi").unwrap();
        let token = controller.current_session().unwrap().cancellation();

        drop(controller);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_shutdown() {
        let mut controller = pending_controller();
        let id = controller.begin("Hi").unwrap();
        controller.shutdown();
        assert!(!controller.is_busy());
        assert_eq!(controller.session_state(id), Some(SessionState::Cancelled));
    }
}
