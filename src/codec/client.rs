//! Client-to-server messages.
//!
//! ```text
//! Handshake (tag 0): raw UTF-8 session token, no length prefix
//! Keepalive (tag 1): u32 BE counter
//! ```

use bytes::Bytes;

use crate::error::{Result, SessionError};
use crate::protocol::{c2s, encode_frame, encode_u32_be, Frame};

/// Outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Handshake { token: Bytes },
    Keepalive { counter: u32 },
}

impl ClientMessage {
    /// Encode as a complete frame.
    pub fn encode(&self) -> Bytes {
        match self {
            Self::Handshake { token } => encode_frame(c2s::HANDSHAKE, token),
            Self::Keepalive { counter } => encode_frame(c2s::KEEPALIVE, &encode_u32_be(*counter)),
        }
    }

    /// Decode a client frame (server side; used by tests and tools).
    pub fn decode(frame: &Frame) -> Result<Self> {
        match frame.tag {
            c2s::HANDSHAKE => Ok(Self::Handshake {
                token: frame.payload.clone(),
            }),
            c2s::KEEPALIVE => Ok(Self::Keepalive {
                counter: frame.cursor().read_u32_be()?,
            }),
            tag => Err(SessionError::UnexpectedTag {
                tag,
                state: crate::session::SessionState::Ready,
            }),
        }
    }
}
