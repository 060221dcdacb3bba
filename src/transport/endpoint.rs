//! Socket endpoint derived from the hosting page.

use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::{header, HeaderValue, Uri};

use crate::error::{Result, SessionError};

/// Default sub-protocol requested on connect.
pub const SUBPROTOCOL: &str = "editor-session";

/// Path segment appended to the page path.
pub const SOCKET_PATH: &str = "/ws";

/// Where to open the session socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `wss` when true, `ws` otherwise.
    pub secure: bool,
    pub host: String,
    pub port: Option<u16>,
    /// Full socket path, starting with `/`.
    pub path: String,
    /// Sent as `Sec-WebSocket-Protocol`; the server must echo it back.
    pub subprotocol: String,
}

impl Endpoint {
    pub fn new(secure: bool, host: impl Into<String>, port: Option<u16>, path: impl Into<String>) -> Self {
        Self {
            secure,
            host: host.into(),
            port,
            path: path.into(),
            subprotocol: SUBPROTOCOL.to_string(),
        }
    }

    /// Request `subprotocol` instead of [`SUBPROTOCOL`].
    ///
    /// ```
    /// use editor_session::transport::Endpoint;
    ///
    /// let endpoint = Endpoint::from_page_url("http://localhost:8080/")
    ///     .unwrap()
    ///     .with_subprotocol("voxidian-editor");
    /// assert_eq!(endpoint.subprotocol, "voxidian-editor");
    /// ```
    pub fn with_subprotocol(mut self, subprotocol: impl Into<String>) -> Self {
        self.subprotocol = subprotocol.into();
        self
    }

    /// Derive the socket endpoint from the page URL.
    ///
    /// The scheme mirrors the page (`http` → `ws`, `https` → `wss`); host and
    /// port are kept; the path is the page path without trailing `/` plus
    /// `/ws`. Query and fragment are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use editor_session::transport::Endpoint;
    ///
    /// let endpoint = Endpoint::from_page_url("https://example.com:8443/editor/#tok").unwrap();
    /// assert_eq!(endpoint.url(), "wss://example.com:8443/editor/ws");
    /// ```
    pub fn from_page_url(page_url: &str) -> Result<Self> {
        let without_fragment = page_url.split_once('#').map_or(page_url, |(url, _)| url);
        let uri: Uri = without_fragment
            .parse()
            .map_err(|e| SessionError::InvalidEndpoint(format!("{page_url}: {e}")))?;

        let secure = match uri.scheme_str() {
            Some("http") => false,
            Some("https") => true,
            Some(other) => {
                return Err(SessionError::InvalidEndpoint(format!(
                    "unsupported page scheme {other:?}"
                )))
            }
            None => return Err(SessionError::InvalidEndpoint(format!("{page_url}: missing scheme"))),
        };
        let host = uri
            .host()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| SessionError::InvalidEndpoint(format!("{page_url}: missing host")))?;

        let path = format!("{}{}", uri.path().trim_end_matches('/'), SOCKET_PATH);
        Ok(Self::new(secure, host, uri.port_u16(), path))
    }

    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "wss"
        } else {
            "ws"
        }
    }

    /// Socket URL.
    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}{}", self.scheme(), self.host, port, self.path),
            None => format!("{}://{}{}", self.scheme(), self.host, self.path),
        }
    }

    /// Handshake request carrying the sub-protocol header.
    ///
    /// Fails with `InvalidEndpoint` if the sub-protocol is not a valid header
    /// value.
    pub fn request(&self) -> Result<Request> {
        let protocol = HeaderValue::from_str(&self.subprotocol).map_err(|e| {
            SessionError::InvalidEndpoint(format!("sub-protocol {:?}: {e}", self.subprotocol))
        })?;
        let mut request = self.url().into_client_request()?;
        request
            .headers_mut()
            .insert(header::SEC_WEBSOCKET_PROTOCOL, protocol);
        Ok(request)
    }
}
