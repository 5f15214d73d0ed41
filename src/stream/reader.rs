//! Transport reader: pulls raw chunks from an open response body.
//!
//! The reader is the only owner of the body. It drops the body, and with it
//! the underlying connection, on every exit path: end of stream, read error
//! and cancellation.

use bytes::Bytes;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::TransportError;
use crate::traits::ByteStream;

/// Outcome of one pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull {
    /// The next chunk of the body
    Chunk(Bytes),
    /// The server closed the stream
    End,
    /// The cancellation token fired; no chunk was read
    Cancelled,
}

/// Lazy, finite, non-restartable source of body chunks.
pub struct TransportReader {
    body: Option<ByteStream>,
    cancel: CancellationToken,
}

impl TransportReader {
    pub fn new(body: ByteStream, cancel: CancellationToken) -> Self {
        Self {
            body: Some(body),
            cancel,
        }
    }

    /// Pull the next chunk.
    ///
    /// Cancellation is checked before the pull and raced against it, so a
    /// pull that is waiting on the network resolves as soon as the token
    /// fires.
    pub async fn pull(&mut self) -> Result<Pull, TransportError> {
        if self.cancel.is_cancelled() {
            self.release();
            return Ok(Pull::Cancelled);
        }

        let next = {
            let Some(body) = self.body.as_mut() else {
                return Ok(Pull::End);
            };
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                item = body.next() => Some(item),
            }
        };

        match next {
            None => {
                self.release();
                Ok(Pull::Cancelled)
            }
            Some(Some(Ok(chunk))) => Ok(Pull::Chunk(chunk)),
            Some(Some(Err(e))) => {
                self.release();
                Err(e)
            }
            Some(None) => {
                self.release();
                Ok(Pull::End)
            }
        }
    }

    /// Drop the body and the connection behind it.
    pub fn release(&mut self) {
        if self.body.take().is_some() {
            debug!("Released response body");
        }
    }

    /// Whether the body has been dropped.
    pub fn is_released(&self) -> bool {
        self.body.is_none()
    }
}

impl std::fmt::Debug for TransportReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportReader")
            .field("released", &self.is_released())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
