//! In-memory transport over bounded tokio channels.
//!
//! [`ChannelTransport::pair`] returns two connected ends; either end can play
//! the server. Closing or dropping one end makes the other's `recv` return
//! `None`.

use bytes::Bytes;
use tokio::sync::mpsc;

use super::Transport;
use crate::error::{Result, SessionError};

/// Default per-direction channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// One end of an in-memory connection.
#[derive(Debug)]
pub struct ChannelTransport {
    tx: Option<mpsc::Sender<Bytes>>,
    rx: mpsc::Receiver<Bytes>,
}

impl ChannelTransport {
    /// Two connected ends with the default capacity.
    pub fn pair() -> (Self, Self) {
        Self::pair_with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Two connected ends with `capacity` messages buffered per direction.
    pub fn pair_with_capacity(capacity: usize) -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::channel(capacity);
        let (b_tx, a_rx) = mpsc::channel(capacity);
        (
            Self {
                tx: Some(a_tx),
                rx: a_rx,
            },
            Self {
                tx: Some(b_tx),
                rx: b_rx,
            },
        )
    }
}

impl Transport for ChannelTransport {
    async fn send(&mut self, message: Bytes) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(SessionError::ConnectionClosed)?;
        tx.send(message)
            .await
            .map_err(|_| SessionError::ConnectionClosed)
    }

    async fn recv(&mut self) -> Option<Result<Bytes>> {
        self.rx.recv().await.map(Ok)
    }

    async fn close(&mut self) -> Result<()> {
        self.tx = None;
        self.rx.close();
        Ok(())
    }
}
