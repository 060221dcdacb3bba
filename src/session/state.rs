//! Session lifecycle states.

/// Connection lifecycle.
///
/// ```text
/// Connecting ──open──► Handshaking ──initial state──► Ready ◄─┐
///      │                    │                           │      │ initial state
///      └────────close───────┴───────────close───────────┴──────┘
///                                  ▼
///                               Closed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Transport not open yet.
    Connecting,
    /// Handshake sent, waiting for the first snapshot.
    Handshaking,
    /// At least one snapshot applied.
    Ready,
    /// Terminal.
    Closed,
}

impl SessionState {
    #[inline]
    pub fn is_closed(self) -> bool {
        self == SessionState::Closed
    }

    #[inline]
    pub fn is_ready(self) -> bool {
        self == SessionState::Ready
    }

    /// Whether the transport is open (handshake sent, not closed).
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, SessionState::Handshaking | SessionState::Ready)
    }
}
