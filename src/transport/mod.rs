//! Transport module - message-oriented connections.
//!
//! A [`Transport`] delivers whole messages in order; each message is one
//! frame. Provides:
//! - [`WsTransport`] - WebSocket client over `tokio-tungstenite`
//! - [`ChannelTransport`] - in-memory pair over tokio channels

mod channel;
mod endpoint;
mod websocket;

use bytes::Bytes;

pub use channel::{ChannelTransport, DEFAULT_CHANNEL_CAPACITY};
pub use endpoint::{Endpoint, SOCKET_PATH, SUBPROTOCOL};
pub use websocket::WsTransport;

use crate::error::Result;

/// An open, ordered, message-oriented connection.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Send one message.
    async fn send(&mut self, message: Bytes) -> Result<()>;

    /// Next message; `None` once the peer closed.
    ///
    /// Must be cancel-safe: the client polls it inside `tokio::select!`.
    async fn recv(&mut self) -> Option<Result<Bytes>>;

    /// Close the connection.
    async fn close(&mut self) -> Result<()>;
}
