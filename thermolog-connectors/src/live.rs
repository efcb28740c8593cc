//! Live channel transport adapter
//!
//! Wraps any byte sink (a socket write half, usually) as an [`Observer`]
//! the core publisher can push text frames into. Delivery stays
//! fire-and-forget: a transport failure is logged, reported as a plain
//! [`SendError`], and never reaches the controller.
//!
//! Incoming observer messages go through [`handle_message`]; the only
//! recognized command is the optional `get_temperature` pull, answered
//! from the publisher's cache without touching the sensor.

use std::io::Write;

use thermolog_core::publish::{LivePublisher, Observer, SendError};
use thiserror::Error;

/// Transport-level delivery failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Peer closed the connection.
    #[error("socket closed")]
    Closed,

    /// Underlying I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text-frame observer over a byte sink.
pub struct TextSocket<W: Write> {
    id: u32,
    sink: W,
}

impl<W: Write> TextSocket<W> {
    /// Adopt a freshly connected client.
    pub fn new(id: u32, sink: W) -> Self {
        log::info!("live client #{} connected", id);
        Self { id, sink }
    }

    fn try_send(&mut self, text: &str) -> Result<(), TransportError> {
        self.sink.write_all(text.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }

    /// Consume the adapter, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> Observer for TextSocket<W> {
    fn id(&self) -> u32 {
        self.id
    }

    fn send_text(&mut self, text: &str) -> Result<(), SendError> {
        self.try_send(text).map_err(|e| {
            log::warn!("live client #{} dropped frame: {}", self.id, e);
            SendError::Disconnected
        })
    }
}

/// Handle an incoming observer message, returning the reply if any.
///
/// `get_temperature` answers with the latest cached value; anything else
/// is ignored (the live channel defines no other commands). A pull before
/// the first reading returns `None` and the transport sends nothing.
pub fn handle_message<O: Observer, const N: usize>(
    publisher: &LivePublisher<O, N>,
    payload: &str,
) -> Option<String> {
    match payload.trim() {
        "get_temperature" => publisher.latest_text().map(|t| t.as_str().into()),
        other => {
            log::debug!("ignoring unknown live command: {:?}", other);
            None
        }
    }
}
