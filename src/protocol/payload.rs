//! Payload builder, the write-side counterpart of [`Cursor`](super::Cursor).
//!
//! Uses `bytes::BytesMut` so the finished payload freezes into `Bytes`
//! without a copy.

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{encode_frame, U32_SIZE};
use crate::error::{Result, SessionError};

/// Growable payload buffer with the wire's field encodings.
#[derive(Debug, Default)]
pub struct PayloadWriter {
    buffer: BytesMut,
}

impl PayloadWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Append a single byte.
    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.put_u8(value);
        self
    }

    /// Append a one-byte flag (1 or 0).
    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.put_u8(u8::from(value))
    }

    /// Append a Big Endian `u32`.
    pub fn put_u32_be(&mut self, value: u32) -> &mut Self {
        self.buffer.put_u32(value);
        self
    }

    /// Append raw bytes with no prefix.
    pub fn put_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.put_slice(data);
        self
    }

    /// Append a `u32` BE length prefix followed by the UTF-8 bytes.
    ///
    /// Fails with `FieldTooLong` if the string does not fit the prefix.
    pub fn put_string(&mut self, value: &str) -> Result<&mut Self> {
        let len = field_len(value.len())?;
        self.buffer.reserve(U32_SIZE + value.len());
        self.put_u32_be(len);
        Ok(self.put_bytes(value.as_bytes()))
    }

    /// Append an element count as a `u32` BE prefix.
    pub fn put_count(&mut self, count: usize) -> Result<&mut Self> {
        let count = field_len(count)?;
        Ok(self.put_u32_be(count))
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Finish and return the payload.
    pub fn finish(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Finish and wrap the payload into a frame with `tag`.
    pub fn into_frame(self, tag: u8) -> Bytes {
        encode_frame(tag, &self.buffer)
    }
}

fn field_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| SessionError::FieldTooLong(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Cursor;

    #[test]
    fn test_put_fields_read_back() {
        let mut writer = PayloadWriter::new();
        writer
            .put_u32_be(7)
            .put_string("proj")
            .unwrap()
            .put_bool(true)
            .put_u8(0xAB);

        let mut cursor = Cursor::new(writer.finish());
        assert_eq!(cursor.read_u32_be().unwrap(), 7);
        assert_eq!(cursor.read_string().unwrap(), "proj");
        assert!(cursor.read_bool().unwrap());
        assert_eq!(cursor.read_u8().unwrap(), 0xAB);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_string_layout() {
        let mut writer = PayloadWriter::with_capacity(8);
        writer.put_string("hi").unwrap();
        assert_eq!(&writer.finish()[..], &[0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn test_count_prefix() {
        let mut writer = PayloadWriter::new();
        writer.put_count(3).unwrap();
        assert_eq!(&writer.finish()[..], &[0, 0, 0, 3]);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_length_rejected() {
        let too_long = u32::MAX as usize + 1;
        assert!(matches!(
            field_len(too_long),
            Err(SessionError::FieldTooLong(n)) if n == too_long
        ));
        assert_eq!(field_len(u32::MAX as usize).unwrap(), u32::MAX);

        let mut writer = PayloadWriter::new();
        assert!(writer.put_count(too_long).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn test_into_frame_prefixes_tag() {
        let mut writer = PayloadWriter::new();
        writer.put_u32_be(1);
        assert_eq!(&writer.into_frame(1)[..], &[1, 0, 0, 0, 1]);
    }
}
