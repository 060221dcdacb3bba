//! Wire format encoding and decoding.
//!
//! One frame per transport message:
//! ```text
//! ┌───────┬──────────────────────────┐
//! │ Tag   │ Payload                  │
//! │ 1 byte│ rest of the message      │
//! └───────┴──────────────────────────┘
//! ```
//!
//! There is no length field: the transport's message boundary is the frame
//! boundary. All multi-byte integers inside payloads are Big Endian.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, SessionError};

/// Size of the tag prefix in bytes.
pub const TAG_SIZE: usize = 1;

/// Size of an encoded `u32` in bytes.
pub const U32_SIZE: usize = 4;

/// Client-to-server tags.
pub mod c2s {
    /// Handshake: payload is the raw UTF-8 session token.
    pub const HANDSHAKE: u8 = 0;
    /// Keepalive reply: payload is the 4-byte BE counter.
    pub const KEEPALIVE: u8 = 1;
}

/// Server-to-client tags.
///
/// Independent of [`c2s`]; the numeric values overlap on purpose.
pub mod s2c {
    /// Full snapshot of session metadata and file entries.
    pub const INITIAL_STATE: u8 = 0;
    /// Keepalive request: payload ignored.
    pub const KEEPALIVE: u8 = 1;
    /// Server-initiated disconnect with a reason string.
    pub const DISCONNECT: u8 = 2;
}

/// Encode a frame as `[tag] ++ payload`.
///
/// The returned buffer is exactly `1 + payload.len()` bytes.
///
/// # Example
///
/// ```
/// use editor_session::protocol::{encode_frame, c2s};
///
/// let bytes = encode_frame(c2s::HANDSHAKE, b"abc123");
/// assert_eq!(bytes.len(), 7);
/// assert_eq!(bytes[0], 0);
/// ```
pub fn encode_frame(tag: u8, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(TAG_SIZE + payload.len());
    buf.put_u8(tag);
    buf.put_slice(payload);
    buf.freeze()
}

/// Split a raw transport message into tag and payload.
///
/// The payload may be empty. Zero-copy: the payload shares `raw`'s memory.
pub fn decode_frame(raw: &Bytes) -> Result<(u8, Bytes)> {
    match raw.first() {
        Some(&tag) => Ok((tag, raw.slice(TAG_SIZE..))),
        None => Err(SessionError::MalformedFrame("empty message")),
    }
}

/// Encode a `u32` as 4 Big Endian bytes.
#[inline]
pub fn encode_u32_be(value: u32) -> [u8; U32_SIZE] {
    value.to_be_bytes()
}
