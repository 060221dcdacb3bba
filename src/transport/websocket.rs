//! WebSocket transport over `tokio-tungstenite`.
//!
//! Binary messages carry frames. Text messages are not part of the protocol
//! and are skipped; ping/pong is answered by tungstenite itself.

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::{Endpoint, Transport};
use crate::error::Result;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connected WebSocket.
#[derive(Debug)]
pub struct WsTransport {
    stream: WsStream,
}

impl WsTransport {
    /// Open the socket and complete the WebSocket handshake.
    pub async fn connect(endpoint: &Endpoint) -> Result<Self> {
        let request = endpoint.request()?;
        tracing::debug!("Connecting to {}", endpoint.url());
        let (stream, _response) = tokio_tungstenite::connect_async(request).await?;
        Ok(Self { stream })
    }

    /// Wrap an already negotiated stream.
    pub fn from_stream(stream: WsStream) -> Self {
        Self { stream }
    }
}

impl Transport for WsTransport {
    async fn send(&mut self, message: Bytes) -> Result<()> {
        self.stream.send(Message::binary(message.to_vec())).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<Bytes>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Binary(data)) => return Some(Ok(Bytes::from(data))),
                Ok(Message::Close(frame)) => {
                    tracing::debug!("WebSocket close frame: {:?}", frame);
                    return None;
                }
                Ok(Message::Text(_)) => tracing::warn!("Skipping text message"),
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
