//! Server-to-client messages.
//!
//! ```text
//! InitialState (tag 0):
//!   u32 id | string name | string description | string owner_name
//!   u32 N  | N × (u32 id | u8 is_directory | string path)
//! Keepalive    (tag 1): payload ignored
//! Disconnect   (tag 2): string reason
//! ```
//!
//! Strings are `u32` BE length + UTF-8 bytes.

use bytes::Bytes;
use serde::Serialize;

use crate::error::{Result, SessionError};
use crate::protocol::{s2c, Cursor, Frame, PayloadWriter};
use crate::session::SessionState;

/// Minimum encoded size of one file entry (id + flag + empty path).
const MIN_ENTRY_SIZE: usize = 4 + 1 + 4;

/// Session metadata carried by the initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionMetadata {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub owner_name: String,
}

/// One flat entry of the remote file tree, as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub id: u32,
    pub is_directory: bool,
    /// `/`-delimited, relative, no leading slash.
    pub path: String,
}

impl FileEntry {
    /// Create a file entry.
    pub fn file(id: u32, path: impl Into<String>) -> Self {
        Self {
            id,
            is_directory: false,
            path: path.into(),
        }
    }

    /// Create a directory entry.
    pub fn directory(id: u32, path: impl Into<String>) -> Self {
        Self {
            id,
            is_directory: true,
            path: path.into(),
        }
    }
}

/// Full snapshot pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialState {
    pub metadata: SessionMetadata,
    pub entries: Vec<FileEntry>,
}

impl InitialState {
    /// Parse the payload of an initial-state frame.
    ///
    /// All-or-nothing: nothing is returned unless every field parsed.
    /// Bytes after the last entry are ignored.
    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let metadata = SessionMetadata {
            id: cursor.read_u32_be()?,
            name: cursor.read_string()?,
            description: cursor.read_string()?,
            owner_name: cursor.read_string()?,
        };

        let count = cursor.read_u32_be()? as usize;
        // Cap the preallocation by what the payload could possibly hold
        let mut entries = Vec::with_capacity(count.min(cursor.remaining() / MIN_ENTRY_SIZE));
        for _ in 0..count {
            entries.push(FileEntry {
                id: cursor.read_u32_be()?,
                is_directory: cursor.read_bool()?,
                path: cursor.read_string()?,
            });
        }

        Ok(Self { metadata, entries })
    }

    /// Encode as a complete frame (server side; used by tests and tools).
    pub fn encode(&self) -> Result<Bytes> {
        let mut writer = PayloadWriter::new();
        writer
            .put_u32_be(self.metadata.id)
            .put_string(&self.metadata.name)?
            .put_string(&self.metadata.description)?
            .put_string(&self.metadata.owner_name)?
            .put_count(self.entries.len())?;
        for entry in &self.entries {
            writer
                .put_u32_be(entry.id)
                .put_bool(entry.is_directory)
                .put_string(&entry.path)?;
        }
        Ok(writer.into_frame(s2c::INITIAL_STATE))
    }
}

/// Decoded server-to-client message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    InitialState(InitialState),
    Keepalive,
    Disconnect { reason: String },
}

impl ServerMessage {
    /// Decode a frame by tag.
    ///
    /// `state` is only used to report unknown tags.
    pub fn decode(frame: &Frame, state: SessionState) -> Result<Self> {
        let mut cursor = frame.cursor();
        match frame.tag {
            s2c::INITIAL_STATE => Ok(Self::InitialState(InitialState::decode(&mut cursor)?)),
            s2c::KEEPALIVE => Ok(Self::Keepalive),
            s2c::DISCONNECT => Ok(Self::Disconnect {
                reason: cursor.read_string()?,
            }),
            tag => Err(SessionError::UnexpectedTag { tag, state }),
        }
    }

    /// Encode as a complete frame (server side; used by tests and tools).
    ///
    /// Fails with `FieldTooLong` if a string or the entry list does not fit a
    /// `u32` prefix.
    pub fn encode(&self) -> Result<Bytes> {
        match self {
            Self::InitialState(state) => state.encode(),
            Self::Keepalive => Ok(PayloadWriter::new().into_frame(s2c::KEEPALIVE)),
            Self::Disconnect { reason } => {
                let mut writer = PayloadWriter::new();
                writer.put_string(reason)?;
                Ok(writer.into_frame(s2c::DISCONNECT))
            }
        }
    }
}
