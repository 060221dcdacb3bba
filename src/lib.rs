//! # editor-session
//!
//! Client side of the remote editor session protocol.
//!
//! A browser-hosted editor opens one WebSocket to the server, identifies
//! itself with an opaque session token and then receives full snapshots of
//! the session (metadata plus a flat list of files) and periodic keepalives.
//!
//! ## Architecture
//!
//! - **Protocol** (`protocol`): 1-byte tag + payload frames, read cursor
//! - **Codec** (`codec`): typed client and server messages
//! - **Tree** (`tree`): flat path list to an ordered, linked file tree
//! - **Session** (`session`): sans-IO state machine and keepalive counter
//! - **Client** (`ClientBuilder`): tokio loop driving a session over a
//!   `transport::Transport`
//!
//! ## Example
//!
//! ```ignore
//! use editor_session::{ClientBuilder, SessionToken};
//! use editor_session::transport::Endpoint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ClientBuilder::new()
//!         .token(SessionToken::new("abc123"))
//!         .build()?;
//!
//!     let endpoint = Endpoint::from_page_url("http://localhost:8080/editor")?;
//!     let reason = client.connect(&endpoint).await?;
//!     println!("session ended: {reason}");
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod tree;
pub mod view;

mod client;

pub use client::{Client, ClientBuilder, ShutdownHandle, DEFAULT_MAX_FRAME_SIZE};
pub use error::SessionError;
pub use session::{CloseReason, Session, SessionState, SessionToken};
