//! Connect to an editor session and print what it receives.
//!
//! Pass the editor page URL, including the session code in the fragment:
//!
//! ```text
//! cargo run --example connect -- "http://localhost:8080/editor#DO-NOT-SHARE_abc123"
//! ```
//!
//! The socket endpoint and the token are both derived from that URL, exactly
//! as the browser client does. An optional second argument overrides the
//! requested sub-protocol. The rendered JSON document is printed when the
//! session ends.

use std::time::Duration;

use editor_session::transport::Endpoint;
use editor_session::view::JsonView;
use editor_session::{ClientBuilder, SessionToken};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let page_url = args
        .next()
        .ok_or("usage: connect <editor page url> [sub-protocol]")?;

    let token = SessionToken::from_page_url(&page_url).ok_or("No session code")?;
    let mut endpoint = Endpoint::from_page_url(&page_url)?;
    if let Some(subprotocol) = args.next() {
        endpoint = endpoint.with_subprotocol(subprotocol);
    }

    let mut client = ClientBuilder::new()
        .token(token)
        .view(JsonView::new())
        .keepalive_timeout(Duration::from_secs(5))
        .build()?;

    let shutdown = client.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    eprintln!("Connecting to {}", endpoint.url());
    let reason = client.connect(&endpoint).await?;
    eprintln!("Session ended: {reason}");

    println!("{}", client.session().view().to_json_string()?);
    Ok(())
}
