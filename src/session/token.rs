//! Opaque session token supplied once before connect.

use std::fmt;

use bytes::Bytes;

/// Prefix the share link puts in front of the token to discourage copying.
pub const DO_NOT_SHARE_PREFIX: &str = "DO-NOT-SHARE_";

/// Session token sent verbatim in the handshake.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Bytes);

impl SessionToken {
    pub fn new(token: impl Into<Bytes>) -> Self {
        Self(token.into())
    }

    /// Extract the token from a page fragment (`#DO-NOT-SHARE_abc` or `abc`).
    ///
    /// Returns `None` when nothing is left, so the host can fall back to a
    /// stored token.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let token = fragment.strip_prefix(DO_NOT_SHARE_PREFIX).unwrap_or(fragment);
        if token.is_empty() {
            None
        } else {
            Some(Self(Bytes::copy_from_slice(token.as_bytes())))
        }
    }

    /// Extract the token from the fragment of a full page URL.
    pub fn from_page_url(url: &str) -> Option<Self> {
        url.split_once('#')
            .and_then(|(_, fragment)| Self::from_fragment(fragment))
    }

    #[inline]
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} bytes>)", self.0.len())
    }
}
