//! Sequential read cursor over a received payload.
//!
//! Every read advances the position by exactly what it consumed and fails
//! with `TruncatedPayload` when fewer bytes remain than requested. A failed
//! read leaves the position untouched.
//!
//! # Example
//!
//! ```
//! use editor_session::protocol::Cursor;
//! use bytes::Bytes;
//!
//! let mut cursor = Cursor::new(Bytes::from_static(&[0, 0, 0, 2, b'h', b'i']));
//! assert_eq!(cursor.read_string().unwrap(), "hi");
//! assert!(cursor.is_exhausted());
//! ```

use bytes::Bytes;

use super::wire_format::U32_SIZE;
use crate::error::{Result, SessionError};

/// Read position over an immutable payload buffer.
///
/// Invariant: `0 <= position <= buffer.len()`.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Bytes,
    position: usize,
}

impl Cursor {
    /// Create a cursor at position 0.
    pub fn new(buffer: Bytes) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current offset into the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Check whether every byte has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Read the next `n` bytes (zero-copy).
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(SessionError::TruncatedPayload {
                needed: n,
                remaining,
            });
        }
        let out = self.buffer.slice(self.position..self.position + n);
        self.position += n;
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a one-byte flag; any nonzero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a Big Endian `u32`.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(U32_SIZE)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a `u32` BE length prefix followed by that many UTF-8 bytes.
    ///
    /// On a truncated body the length prefix stays consumed; callers discard
    /// the whole payload on any error so this is never observable.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32_be()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Unread remainder of the buffer.
    pub fn rest(&self) -> &[u8] {
        &self.buffer[self.position..]
    }
}

impl From<Bytes> for Cursor {
    fn from(buffer: Bytes) -> Self {
        Self::new(buffer)
    }
}
