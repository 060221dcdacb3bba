//! Frame struct with typed accessors.
//!
//! Represents one tagged message as delivered by the transport.
//! Uses `bytes::Bytes` for zero-copy payload sharing.
//!
//! # Example
//!
//! ```
//! use editor_session::protocol::Frame;
//! use bytes::Bytes;
//!
//! let frame = Frame::new(1, Bytes::from_static(b"hello"));
//! let raw = frame.encode();
//!
//! let parsed = Frame::decode(raw).unwrap();
//! assert_eq!(parsed.tag(), 1);
//! assert_eq!(parsed.payload(), b"hello");
//! ```

use bytes::Bytes;

use super::cursor::Cursor;
use super::wire_format::{decode_frame, encode_frame, TAG_SIZE};
use crate::error::Result;

/// A complete protocol frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Direction-scoped discriminator.
    pub tag: u8,
    /// Payload bytes (zero-copy via `bytes::Bytes`).
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from tag and payload.
    pub fn new(tag: u8, payload: Bytes) -> Self {
        Self { tag, payload }
    }

    /// Create a frame from tag and raw bytes (copies data).
    pub fn from_parts(tag: u8, payload: &[u8]) -> Self {
        Self {
            tag,
            payload: Bytes::copy_from_slice(payload),
        }
    }

    /// Decode a raw transport message.
    pub fn decode(raw: Bytes) -> Result<Self> {
        let (tag, payload) = decode_frame(&raw)?;
        Ok(Self { tag, payload })
    }

    /// Encode into a single contiguous transport message.
    pub fn encode(&self) -> Bytes {
        encode_frame(self.tag, &self.payload)
    }

    /// Get the tag.
    #[inline]
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of the encoded frame (tag + payload).
    #[inline]
    pub fn size(&self) -> usize {
        TAG_SIZE + self.payload.len()
    }

    /// Sequential reader over the payload.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.payload.clone())
    }
}
