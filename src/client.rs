//! Client builder and runtime loop.
//!
//! The [`ClientBuilder`] collects the token, the view and the optional
//! limits. The [`Client`] drives one [`Session`] over one [`Transport`]:
//! 1. Send the handshake
//! 2. Read messages and hand each to the session, one at a time
//! 3. Write back keepalive replies
//! 4. Stop on transport close, server disconnect, send failure or shutdown
//!
//! No reconnect is attempted; the returned [`CloseReason`] is for the host
//! to act on.
//!
//! # Example
//!
//! ```ignore
//! use editor_session::{ClientBuilder, SessionToken};
//! use editor_session::transport::Endpoint;
//! use editor_session::view::JsonView;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = "https://example.com/editor#DO-NOT-SHARE_abc123";
//!     let mut client = ClientBuilder::new()
//!         .token(SessionToken::from_page_url(page).ok_or("no session code")?)
//!         .view(JsonView::new())
//!         .build()?;
//!
//!     let reason = client.connect(&Endpoint::from_page_url(page)?).await?;
//!     println!("{reason}");
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

use crate::error::{Result, SessionError};
use crate::session::{Action, CloseReason, Session, SessionToken};
use crate::transport::{Endpoint, Transport, WsTransport};
use crate::view::{NullView, ViewBinder};

/// Default maximum accepted message size (16 MiB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Builder for configuring and creating a client.
pub struct ClientBuilder<V = NullView> {
    token: Option<SessionToken>,
    view: V,
    keepalive_timeout: Option<Duration>,
    max_frame_size: usize,
}

impl ClientBuilder<NullView> {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self {
            token: None,
            view: NullView,
            keepalive_timeout: None,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl Default for ClientBuilder<NullView> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ViewBinder> ClientBuilder<V> {
    /// Set the session token sent in the handshake. Required.
    pub fn token(mut self, token: SessionToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the view that receives snapshots and the close event.
    pub fn view<W: ViewBinder>(self, view: W) -> ClientBuilder<W> {
        ClientBuilder {
            token: self.token,
            view,
            keepalive_timeout: self.keepalive_timeout,
            max_frame_size: self.max_frame_size,
        }
    }

    /// Close the session when no server keepalive follows a reply within
    /// `timeout`.
    ///
    /// Off by default: the protocol itself only detects dead connections
    /// through the transport's close event.
    pub fn keepalive_timeout(mut self, timeout: Duration) -> Self {
        self.keepalive_timeout = Some(timeout);
        self
    }

    /// Drop inbound messages larger than `limit` bytes without decoding.
    ///
    /// Default: 16 MiB
    pub fn max_frame_size(mut self, limit: usize) -> Self {
        self.max_frame_size = limit;
        self
    }

    /// Build the client. Fails if no token was set.
    pub fn build(self) -> Result<Client<V>> {
        let token = self.token.ok_or(SessionError::MissingToken)?;
        Ok(Client {
            session: Session::new(token, self.view),
            keepalive_timeout: self.keepalive_timeout,
            max_frame_size: self.max_frame_size,
            shutdown: Arc::new(Notify::new()),
        })
    }
}

/// Handle for stopping a running client from another task.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Ask the client to close. Takes effect even if called before `run`.
    pub fn shutdown(&self) {
        self.notify.notify_one();
    }
}

/// Events the run loop reacts to.
enum Event {
    Shutdown,
    KeepaliveTimeout,
    Inbound(Option<Result<bytes::Bytes>>),
}

/// A client bound to one session.
pub struct Client<V> {
    session: Session<V>,
    keepalive_timeout: Option<Duration>,
    max_frame_size: usize,
    shutdown: Arc<Notify>,
}

impl Client<NullView> {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder<NullView> {
        ClientBuilder::new()
    }
}

impl<V: ViewBinder> Client<V> {
    /// The underlying session (state, snapshot, view).
    pub fn session(&self) -> &Session<V> {
        &self.session
    }

    /// Consume the client and return its session.
    pub fn into_session(self) -> Session<V> {
        self.session
    }

    /// Handle that stops [`run`](Self::run) with [`CloseReason::LocalClose`].
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            notify: self.shutdown.clone(),
        }
    }

    /// Open a WebSocket to `endpoint` and run the session over it.
    pub async fn connect(&mut self, endpoint: &Endpoint) -> Result<CloseReason> {
        let transport = WsTransport::connect(endpoint).await?;
        self.run(transport).await
    }

    /// Run the session over an already open transport until it ends.
    ///
    /// Returns `Err(ConnectionClosed)` if this client's session has already
    /// run.
    pub async fn run<T: Transport>(&mut self, mut transport: T) -> Result<CloseReason> {
        let handshake = self
            .session
            .on_open()
            .ok_or(SessionError::ConnectionClosed)?;
        if let Err(e) = transport.send(handshake).await {
            tracing::warn!("Handshake send failed: {}", e);
            return Ok(self.finish(CloseReason::SendFailed));
        }

        let mut deadline: Option<Instant> = None;

        loop {
            let event = tokio::select! {
                biased;
                _ = self.shutdown.notified() => Event::Shutdown,
                _ = keepalive_deadline(deadline) => Event::KeepaliveTimeout,
                next = transport.recv() => Event::Inbound(next),
            };

            let raw = match event {
                Event::Shutdown => {
                    let _ = transport.close().await;
                    return Ok(self.finish(CloseReason::LocalClose));
                }
                Event::KeepaliveTimeout => {
                    tracing::warn!("No keepalive from server, closing");
                    let _ = transport.close().await;
                    return Ok(self.finish(CloseReason::KeepaliveTimeout));
                }
                Event::Inbound(None) => return Ok(self.finish(CloseReason::TransportClosed)),
                Event::Inbound(Some(Err(e))) => {
                    tracing::error!("Transport error: {}", e);
                    return Ok(self.finish(CloseReason::TransportError(e.to_string())));
                }
                Event::Inbound(Some(Ok(raw))) => raw,
            };

            if raw.len() > self.max_frame_size {
                tracing::warn!(
                    "Dropping {} byte message (limit {})",
                    raw.len(),
                    self.max_frame_size
                );
                continue;
            }

            match self.session.on_message(raw) {
                Some(Action::Reply(reply)) => {
                    if let Err(e) = transport.send(reply).await {
                        tracing::warn!("Send failed: {}", e);
                        return Ok(self.finish(CloseReason::SendFailed));
                    }
                    deadline = self.keepalive_timeout.map(|t| Instant::now() + t);
                }
                Some(Action::Close(reason)) => {
                    let _ = transport.close().await;
                    return Ok(reason);
                }
                Some(Action::Snapshot) | None => {}
            }
        }
    }

    fn finish(&mut self, reason: CloseReason) -> CloseReason {
        self.session.on_close(reason.clone());
        reason
    }
}

async fn keepalive_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
