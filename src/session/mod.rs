//! Protocol session - the sans-IO core of the client.
//!
//! [`Session`] owns the connection state, the keepalive counter and the
//! latest snapshot. It performs no I/O: the transport driver calls
//! [`Session::on_open`], [`Session::on_message`] and [`Session::on_close`]
//! and writes out whatever frames they return.
//!
//! # Example
//!
//! ```
//! use editor_session::codec::ServerMessage;
//! use editor_session::session::{Action, Session, SessionToken};
//! use editor_session::view::NullView;
//!
//! let mut session = Session::new(SessionToken::new("abc123"), NullView);
//! let handshake = session.on_open().unwrap();
//! assert_eq!(&handshake[..], b"\x00abc123");
//!
//! let reply = session.on_message(ServerMessage::Keepalive.encode().unwrap());
//! assert!(matches!(reply, Some(Action::Reply(_))));
//! ```

mod keepalive;
mod state;
mod token;

use std::fmt;

use bytes::Bytes;

pub use keepalive::KeepaliveCounter;
pub use state::SessionState;
pub use token::{SessionToken, DO_NOT_SHARE_PREFIX};

use crate::codec::{ClientMessage, InitialState, ServerMessage, SessionMetadata};
use crate::error::{Result, SessionError};
use crate::protocol::Frame;
use crate::tree::{build_tree, FileTree};
use crate::view::ViewBinder;

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The transport reported a close.
    TransportClosed,
    /// The transport failed while reading.
    TransportError(String),
    /// An outbound send failed.
    SendFailed,
    /// The server sent a disconnect message.
    ServerDisconnect(String),
    /// No server keepalive within the configured window.
    KeepaliveTimeout,
    /// The host asked the client to stop.
    LocalClose,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::TransportClosed => write!(f, "server disconnected"),
            CloseReason::TransportError(e) => write!(f, "connection error: {e}"),
            CloseReason::SendFailed => write!(f, "send failed"),
            CloseReason::ServerDisconnect(reason) => write!(f, "server disconnected: {reason}"),
            CloseReason::KeepaliveTimeout => write!(f, "timed out"),
            CloseReason::LocalClose => write!(f, "closed"),
        }
    }
}

/// What the driver must do after a frame was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send this encoded frame.
    Reply(Bytes),
    /// A new snapshot replaced the previous one.
    Snapshot,
    /// The session is now closed.
    Close(CloseReason),
}

/// Metadata and tree from one initial-state frame, replaced as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub metadata: SessionMetadata,
    pub tree: FileTree,
}

/// Client side of one connection.
pub struct Session<V> {
    token: SessionToken,
    state: SessionState,
    /// Present only while the transport is open.
    keepalive: Option<KeepaliveCounter>,
    snapshot: Option<Snapshot>,
    view: V,
}

impl<V: ViewBinder> Session<V> {
    /// Create a session in `Connecting`.
    pub fn new(token: SessionToken, view: V) -> Self {
        Self {
            token,
            state: SessionState::Connecting,
            keepalive: None,
            snapshot: None,
            view,
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Latest applied snapshot, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    #[inline]
    pub fn metadata(&self) -> Option<&SessionMetadata> {
        self.snapshot.as_ref().map(|s| &s.metadata)
    }

    #[inline]
    pub fn tree(&self) -> Option<&FileTree> {
        self.snapshot.as_ref().map(|s| &s.tree)
    }

    /// Value the next keepalive reply will carry; `None` unless open.
    pub fn keepalive_counter(&self) -> Option<u32> {
        self.keepalive.map(|k| k.peek())
    }

    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    #[inline]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Transport opened: move to `Handshaking` and return the handshake frame.
    ///
    /// Returns `None` (and changes nothing) unless the session is `Connecting`.
    pub fn on_open(&mut self) -> Option<Bytes> {
        if self.state != SessionState::Connecting {
            tracing::warn!("Ignoring transport open while {:?}", self.state);
            return None;
        }

        self.transition(SessionState::Handshaking);
        self.keepalive = Some(KeepaliveCounter::new());
        tracing::debug!("Sending handshake");
        Some(
            ClientMessage::Handshake {
                token: self.token.as_bytes().clone(),
            }
            .encode(),
        )
    }

    /// Handle one raw inbound message.
    ///
    /// Frame-level errors are logged and the frame dropped; they never close
    /// the session. Anything else (a frame arriving after close) is rejected
    /// without touching the session.
    pub fn on_message(&mut self, raw: Bytes) -> Option<Action> {
        match self.handle_frame(raw) {
            Ok(action) => Some(action),
            Err(e) if e.is_frame_local() => {
                tracing::warn!("Dropping frame: {}", e);
                None
            }
            Err(e) => {
                tracing::debug!("Frame rejected while {:?}: {}", self.state, e);
                None
            }
        }
    }

    /// Handle one raw inbound message, surfacing errors.
    ///
    /// On error the session is unchanged.
    pub fn handle_frame(&mut self, raw: Bytes) -> Result<Action> {
        if self.state.is_closed() {
            return Err(SessionError::ConnectionClosed);
        }

        let frame = Frame::decode(raw)?;
        if self.state == SessionState::Connecting {
            return Err(SessionError::UnexpectedTag {
                tag: frame.tag,
                state: self.state,
            });
        }

        match ServerMessage::decode(&frame, self.state)? {
            ServerMessage::InitialState(initial) => {
                self.apply_snapshot(initial)?;
                Ok(Action::Snapshot)
            }
            ServerMessage::Keepalive => {
                let counter = self
                    .keepalive
                    .as_mut()
                    .ok_or(SessionError::ConnectionClosed)?
                    .advance();
                tracing::trace!("Keepalive reply {}", counter);
                Ok(Action::Reply(ClientMessage::Keepalive { counter }.encode()))
            }
            ServerMessage::Disconnect { reason } => {
                tracing::info!("Server disconnected: {}", reason);
                let reason = CloseReason::ServerDisconnect(reason);
                self.close(reason.clone());
                Ok(Action::Close(reason))
            }
        }
    }

    /// Transport closed. Returns `false` if the session was already closed.
    pub fn on_close(&mut self, reason: CloseReason) -> bool {
        if self.state.is_closed() {
            return false;
        }
        tracing::info!("Session closed: {}", reason);
        self.close(reason);
        true
    }

    /// Build the new tree first so a bad snapshot leaves everything as it was.
    fn apply_snapshot(&mut self, initial: InitialState) -> Result<()> {
        let tree = build_tree(&initial.entries)?;
        tracing::info!(
            "Applied snapshot for session {} ({} entries)",
            initial.metadata.id,
            initial.entries.len()
        );

        let snapshot = self.snapshot.insert(Snapshot {
            metadata: initial.metadata,
            tree,
        });
        self.view.render_metadata(&snapshot.metadata);
        self.view.render_tree(&snapshot.tree);

        if self.state != SessionState::Ready {
            self.transition(SessionState::Ready);
        }
        Ok(())
    }

    fn close(&mut self, reason: CloseReason) {
        self.transition(SessionState::Closed);
        self.keepalive = None;
        self.view.closed(&reason);
    }

    fn transition(&mut self, to: SessionState) {
        tracing::debug!("Session state {:?} -> {:?}", self.state, to);
        self.state = to;
    }
}

impl<V> fmt::Debug for Session<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token)
            .field("state", &self.state)
            .field("keepalive", &self.keepalive)
            .field("snapshot", &self.snapshot.as_ref().map(|s| s.metadata.id))
            .finish()
    }
}
