//! Server-sent-event framing and the push loop that feeds one consumer.

use bytes::Bytes;
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::DispatchError;
use super::Watcher;

pub const START_EVENT: &str = "start";
pub const MESSAGE_EVENT: &str = "message";
pub const ERROR_EVENT: &str = "error";

/// One `event: <name>\ndata: <json>\n\n` frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    event: String,
    data: String,
}

impl SseFrame {
    pub fn new(event: impl Into<String>, payload: &impl Serialize) -> Result<Self, DispatchError> {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }

    pub fn message(payload: &impl Serialize) -> Result<Self, DispatchError> {
        Self::new(MESSAGE_EVENT, payload)
    }

    /// Greeting sent before the first batch, carrying the server's wall clock.
    pub fn start() -> Result<Self, DispatchError> {
        Self::new(START_EVENT, &json!({ "server_time": Local::now().format("%I:%M:%S").to_string() }))
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn encode(&self) -> Bytes {
        Bytes::from(format!("event: {}\ndata: {}\n\n", self.event, self.data))
    }
}

/// Pushes frames into the channel backing one streaming response.
pub struct SseDispatcher {
    tx: mpsc::Sender<Bytes>,
}

impl SseDispatcher {
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx }
    }

    /// A dispatcher plus the receiving end to hand to the transport.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Bytes>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub async fn dispatch(&self, frame: &SseFrame) -> Result<(), DispatchError> {
        self.tx
            .send(frame.encode())
            .await
            .map_err(|_| DispatchError::Disconnected)
    }

    /// Drive `watcher` until it stops or the consumer goes away.
    ///
    /// Sends a start frame, then one `message` frame per batch. A read
    /// failure is reported as a single `error` frame and ends the session.
    /// When the receiver is dropped the watcher is cancelled and
    /// [`DispatchError::Disconnected`] is returned.
    pub async fn run(self, mut watcher: Watcher) -> Result<(), DispatchError> {
        let cancel = watcher.cancel_token();
        let result = self.pump(&mut watcher).await;

        match &result {
            Err(DispatchError::Disconnected) => {
                info!("stream consumer disconnected");
                cancel.cancel();
            }
            Err(e) => {
                warn!(error = %e, "stream dispatch failed");
                cancel.cancel();
            }
            Ok(()) => debug!("stream finished"),
        }
        result
    }

    async fn pump(&self, watcher: &mut Watcher) -> Result<(), DispatchError> {
        self.dispatch(&SseFrame::start()?).await?;

        loop {
            let next = tokio::select! {
                biased;
                _ = self.tx.closed() => return Err(DispatchError::Disconnected),
                next = watcher.next_batch() => next,
            };

            match next {
                Some(Ok(batch)) => {
                    self.dispatch(&SseFrame::message(&batch)?).await?;
                }
                Some(Err(e)) => {
                    warn!(error = %e, "watch session failed");
                    let frame = SseFrame::new(ERROR_EVENT, &json!({ "message": e.to_string() }))?;
                    self.dispatch(&frame).await?;
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
    }
}
