//! Starting reply sessions and the pipeline task each one runs.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{ChatController, Completion, SessionEvent, SessionId, SessionOutcome, StreamSession};
use crate::error::{ChatError, TransportError};
use crate::models::ChatRequest;
use crate::stream::{pump, StreamEnd, TransportReader};
use crate::traits::{Headers, HttpClient};

impl ChatController {
    /// Send a user message and start streaming the reply.
    ///
    /// The input is trimmed. Empty input is rejected, as is any input while
    /// another reply is still streaming. On success the user message and an
    /// empty assistant placeholder are appended together and the snapshot is
    /// published once.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn begin(&mut self, input: &str) -> Result<SessionId, ChatError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.is_busy() {
            return Err(ChatError::Busy);
        }
        Ok(self.start_session(text))
    }

    /// Send a user message, cancelling the reply in progress if there is one.
    ///
    /// The cancelled reply keeps the text it had accumulated; anything its
    /// task still delivers is discarded.
    pub fn supersede(&mut self, input: &str) -> Result<SessionId, ChatError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        Ok(self.start_session(text))
    }

    fn start_session(&mut self, text: &str) -> SessionId {
        let (_, assistant_id) = self.conversation.push_exchange(text);
        self.cancel_current();

        let session = StreamSession::new(assistant_id);
        let session_id = session.id;
        let cancel = session.cancellation();
        self.current = Some(session);
        self.publish();

        info!(session = %session_id, "Starting reply stream");

        tokio::spawn(run_session(
            Arc::clone(&self.client),
            self.config.endpoint.clone(),
            ChatRequest::user(text),
            session_id,
            cancel,
            self.event_tx.clone(),
        ));

        session_id
    }
}

/// Pipeline task for one session.
///
/// Sends a `Delta` per fragment and always ends with exactly one `Finished`.
async fn run_session(
    client: Arc<dyn HttpClient>,
    endpoint: String,
    request: ChatRequest,
    session_id: SessionId,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let outcome = stream_reply(
        client.as_ref(),
        &endpoint,
        &request,
        session_id,
        &cancel,
        &events,
    )
    .await
    .unwrap_or_else(SessionOutcome::Failed);

    debug!(session = %session_id, ?outcome, "Reply pipeline finished");
    // The controller may already be gone
    let _ = events.send(SessionEvent::Finished {
        session_id,
        outcome,
    });
}

async fn stream_reply(
    client: &dyn HttpClient,
    endpoint: &str,
    request: &ChatRequest,
    session_id: SessionId,
    cancel: &CancellationToken,
    events: &mpsc::UnboundedSender<SessionEvent>,
) -> Result<SessionOutcome, TransportError> {
    if cancel.is_cancelled() {
        return Ok(SessionOutcome::Cancelled);
    }

    let body = serde_json::to_string(request).map_err(|e| TransportError::InvalidRequest {
        message: e.to_string(),
    })?;

    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Accept".to_string(), "text/event-stream".to_string());

    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(SessionOutcome::Cancelled),
        response = client.post_stream(endpoint, &body, &headers) => response?,
    };

    let Some(body) = response.body else {
        debug!(session = %session_id, status = response.status, "Response has no body");
        return Ok(SessionOutcome::Completed(Completion::NoBody));
    };

    let mut reader = TransportReader::new(body, cancel.clone());
    let end = pump(&mut reader, |fragment| {
        let _ = events.send(SessionEvent::Delta {
            session_id,
            fragment,
        });
    })
    .await?;

    Ok(match end {
        StreamEnd::Sentinel => SessionOutcome::Completed(Completion::Sentinel),
        StreamEnd::EndOfStream => SessionOutcome::Completed(Completion::EndOfStream),
        StreamEnd::Cancelled => SessionOutcome::Cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::app::SessionState;
    use crate::config::ChatConfig;
    use crate::models::Sender;
    use bytes::Bytes;

    const ENDPOINT: &str = "http://localhost:8000/api/chat/";

    fn chunk(content: &str) -> Bytes {
        Bytes::from(format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n\n",
            content
        ))
    }

    fn controller_with(mock: MockHttpClient) -> ChatController {
        ChatController::new(Arc::new(mock), ChatConfig::default())
    }

    #[tokio::test]
    async fn test_begin_rejects_empty_input() {
        let mut controller = controller_with(MockHttpClient::new());
        assert_eq!(controller.begin("   \n"), Err(ChatError::EmptyInput));
        assert!(controller.messages().is_empty());
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_begin_appends_exchange_and_publishes_once() {
        let mock = MockHttpClient::new();
        mock.set_response(ENDPOINT, MockResponse::Pending(vec![]));
        let mut controller = controller_with(mock);
        let mut updates = controller.subscribe();

        controller.begin("  Hi  ").unwrap();

        assert!(updates.has_changed().unwrap());
        let snapshot = updates.borrow_and_update().clone();
        assert!(snapshot.busy);
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].text, "Hi");
        assert_eq!(snapshot.messages[0].sender, Sender::User);
        assert_eq!(snapshot.messages[1].text, "");
        assert_eq!(snapshot.messages[1].sender, Sender::Assistant);
    }

    #[tokio::test]
    async fn test_begin_while_busy_is_rejected() {
        let mock = MockHttpClient::new();
        mock.set_response(ENDPOINT, MockResponse::Pending(vec![]));
        let mut controller = controller_with(mock);

        controller.begin("first").unwrap();
        assert_eq!(controller.begin("second"), Err(ChatError::Busy));
        assert_eq!(controller.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_begin_streams_reply() {
        let mock = MockHttpClient::new();
        mock.set_response(
            ENDPOINT,
            MockResponse::Stream(vec![
                chunk("Hel"),
                chunk("lo"),
                Bytes::from_static(b"data: [DONE]\n\n"),
            ]),
        );
        let mut controller = controller_with(mock.clone());

        let id = controller.begin("Hi").unwrap();
        controller.run_until_idle().await;

        assert_eq!(controller.messages()[1].text, "Hello");
        assert_eq!(controller.session_state(id), Some(SessionState::Completed));

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(sent, serde_json::json!({"content": "Hi", "sender_type": "user"}));
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
    }

    #[tokio::test]
    async fn test_request_error_fails_session() {
        let mock = MockHttpClient::new();
        mock.set_response(
            ENDPOINT,
            MockResponse::Error(TransportError::ConnectionFailed {
                url: ENDPOINT.to_string(),
                message: "refused".to_string(),
            }),
        );
        let mut controller = controller_with(mock);

        let id = controller.begin("Hi").unwrap();
        controller.run_until_idle().await;

        assert_eq!(controller.messages()[1].text, "Sorry, an error occurred.");
        assert_eq!(controller.session_state(id), Some(SessionState::Errored));
    }

    #[tokio::test]
    async fn test_supersede_when_idle_behaves_like_begin() {
        let mock = MockHttpClient::new();
        mock.set_response(ENDPOINT, MockResponse::NoBody);
        let mut controller = controller_with(mock);

        let id = controller.supersede("Hi").unwrap();
        controller.run_until_idle().await;

        assert_eq!(controller.session_state(id), Some(SessionState::Completed));
        assert_eq!(controller.messages()[1].text, "");
    }
}
