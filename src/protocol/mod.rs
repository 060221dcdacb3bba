//! Protocol module - wire format, framing, and payload cursors.
//!
//! This module implements the binary message format:
//! - 1-byte tag prefix, payload up to the transport message boundary
//! - Frame struct with typed accessors
//! - Sequential read cursor and matching payload writer

mod cursor;
mod frame;
mod payload;
mod wire_format;

pub use cursor::Cursor;
pub use frame::Frame;
pub use payload::PayloadWriter;
pub use wire_format::{c2s, decode_frame, encode_frame, encode_u32_be, s2c, TAG_SIZE, U32_SIZE};
