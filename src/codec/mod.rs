//! Codec module - typed messages on top of the wire format.
//!
//! - [`ClientMessage`] - handshake and keepalive replies sent by this client
//! - [`ServerMessage`] - initial state, keepalive and disconnect from the server
//!
//! # Design
//!
//! Tags are direction-scoped, so each direction has its own enum and its own
//! decode entry point. Both directions can also be encoded, which lets tests
//! and tools play the server.
//!
//! # Example
//!
//! ```
//! use editor_session::codec::{ClientMessage, ServerMessage};
//! use editor_session::protocol::Frame;
//! use editor_session::session::SessionState;
//!
//! let raw = ClientMessage::Keepalive { counter: 3 }.encode();
//! assert_eq!(&raw[..], &[1, 0, 0, 0, 3]);
//!
//! let frame = Frame::decode(ServerMessage::Keepalive.encode().unwrap()).unwrap();
//! let message = ServerMessage::decode(&frame, SessionState::Ready).unwrap();
//! assert_eq!(message, ServerMessage::Keepalive);
//! ```

mod client;
mod server;

pub use client::ClientMessage;
pub use server::{FileEntry, InitialState, ServerMessage, SessionMetadata};
