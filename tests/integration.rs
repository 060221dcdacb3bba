//! Integration tests for editor-session.
//!
//! These tests run a full client over the in-memory transport while the test
//! plays the server on the other end.

use std::time::Duration;

use bytes::Bytes;
use editor_session::codec::{ClientMessage, FileEntry, InitialState, ServerMessage, SessionMetadata};
use editor_session::protocol::{encode_frame, Frame};
use editor_session::transport::{ChannelTransport, Transport};
use editor_session::view::JsonView;
use editor_session::{ClientBuilder, CloseReason, SessionState, SessionToken};

fn initial_state(id: u32, name: &str, entries: Vec<FileEntry>) -> Bytes {
    ServerMessage::InitialState(InitialState {
        metadata: SessionMetadata {
            id,
            name: name.into(),
            description: "d".into(),
            owner_name: "o".into(),
        },
        entries,
    })
    .encode()
    .unwrap()
}

async fn recv_client(server: &mut ChannelTransport) -> ClientMessage {
    let raw = server.recv().await.expect("client hung up").unwrap();
    ClientMessage::decode(&Frame::decode(raw).unwrap()).unwrap()
}

async fn expect_keepalive(server: &mut ChannelTransport, expected: u32) {
    server
        .send(ServerMessage::Keepalive.encode().unwrap())
        .await
        .unwrap();
    assert_eq!(
        recv_client(server).await,
        ClientMessage::Keepalive { counter: expected }
    );
}

/// Handshake, snapshot, then two keepalives answered with 0 and 1.
#[tokio::test]
async fn test_end_to_end_session() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("abc123"))
        .view(JsonView::new())
        .build()
        .unwrap();

    let server_script = async {
        assert_eq!(
            recv_client(&mut server).await,
            ClientMessage::Handshake {
                token: Bytes::from_static(b"abc123")
            }
        );

        server
            .send(initial_state(7, "proj", vec![FileEntry::file(1, "main.go")]))
            .await
            .unwrap();

        expect_keepalive(&mut server, 0).await;
        expect_keepalive(&mut server, 1).await;

        server.close().await.unwrap();
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(reason.unwrap(), CloseReason::TransportClosed);

    let session = client.session();
    assert_eq!(session.state(), SessionState::Closed);

    let metadata = session.metadata().unwrap();
    assert_eq!(metadata.id, 7);
    assert_eq!(metadata.name, "proj");
    assert_eq!(metadata.description, "d");
    assert_eq!(metadata.owner_name, "o");

    let tree = session.tree().unwrap();
    let children: Vec<_> = tree.children(tree.root_id()).collect();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].path(), "main.go");
    assert!(!children[0].is_directory());

    let doc = session.view().document();
    assert_eq!(doc["tree"]["children"][0]["name"], "main.go");
    assert_eq!(doc["closed"], "server disconnected");
}

/// A second snapshot fully replaces the first.
#[tokio::test]
async fn test_resnapshot_over_the_wire() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .build()
        .unwrap();

    let server_script = async {
        recv_client(&mut server).await;
        server
            .send(initial_state(
                1,
                "first",
                vec![
                    FileEntry::directory(1, "old"),
                    FileEntry::file(2, "old/a.txt"),
                ],
            ))
            .await
            .unwrap();
        server
            .send(initial_state(
                2,
                "second",
                vec![
                    FileEntry::file(3, "b.txt"),
                    FileEntry::file(4, "A/y.txt"),
                    FileEntry::file(5, "a/z.txt"),
                    FileEntry::directory(6, "a"),
                ],
            ))
            .await
            .unwrap();
        // Barrier: the reply proves both snapshots were handled
        expect_keepalive(&mut server, 0).await;
        server.close().await.unwrap();
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(reason.unwrap(), CloseReason::TransportClosed);

    let session = client.session();
    assert_eq!(session.metadata().unwrap().name, "second");

    let tree = session.tree().unwrap();
    assert!(tree.find("old").is_none());
    assert!(tree.find("old/a.txt").is_none());

    let paths: Vec<_> = tree.walk().map(|(_, n)| n.path().to_string()).collect();
    assert_eq!(paths, ["", "a", "A/y.txt", "a/z.txt", "b.txt"]);
}

/// Bad frames are logged and dropped; the session keeps going.
#[tokio::test]
async fn test_bad_frames_do_not_end_session() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .max_frame_size(64)
        .build()
        .unwrap();

    let server_script = async {
        recv_client(&mut server).await;

        // Empty message
        server.send(Bytes::new()).await.unwrap();
        // Unknown tag
        server.send(encode_frame(9, b"??")).await.unwrap();
        // Truncated snapshot
        let raw = initial_state(1, "p", vec![FileEntry::file(1, "f")]);
        server.send(raw.slice(..raw.len() - 2)).await.unwrap();
        // Orphan entry
        server
            .send(initial_state(2, "p", vec![FileEntry::file(1, "x/y.txt")]))
            .await
            .unwrap();
        // Oversized
        server
            .send(initial_state(3, &"n".repeat(100), Vec::new()))
            .await
            .unwrap();

        expect_keepalive(&mut server, 0).await;
        server.close().await.unwrap();
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(reason.unwrap(), CloseReason::TransportClosed);
    assert!(client.session().snapshot().is_none());
}

/// Server disconnect ends the run with its reason.
#[tokio::test]
async fn test_server_disconnect() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .view(JsonView::new())
        .build()
        .unwrap();

    let server_script = async {
        recv_client(&mut server).await;
        server
            .send(
                ServerMessage::Disconnect {
                    reason: "plot unloaded".into(),
                }
                .encode()
                .unwrap(),
            )
            .await
            .unwrap();
        // Client closes its end after a disconnect
        assert!(server.recv().await.is_none());
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(
        reason.unwrap(),
        CloseReason::ServerDisconnect("plot unloaded".into())
    );
    assert_eq!(client.session().state(), SessionState::Closed);
    assert_eq!(
        client.session().view().document()["closed"],
        "server disconnected: plot unloaded"
    );
}

/// Shutdown handle stops the loop with `LocalClose`.
#[tokio::test]
async fn test_shutdown_handle() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .build()
        .unwrap();
    let handle = client.shutdown_handle();

    let server_script = async {
        recv_client(&mut server).await;
        expect_keepalive(&mut server, 0).await;
        handle.shutdown();
        assert!(server.recv().await.is_none());
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(reason.unwrap(), CloseReason::LocalClose);
}

/// A client cannot be run twice.
#[tokio::test]
async fn test_run_after_close_fails() {
    let (client_end, server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .build()
        .unwrap();

    drop(server);
    let reason = client.run(client_end).await.unwrap();
    assert_eq!(reason, CloseReason::SendFailed);

    let (client_end, _server) = ChannelTransport::pair();
    assert!(client.run(client_end).await.is_err());
}

/// Opt-in keepalive timeout closes a silent connection.
#[tokio::test(start_paused = true)]
async fn test_keepalive_timeout() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .keepalive_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let server_script = async {
        recv_client(&mut server).await;
        expect_keepalive(&mut server, 0).await;
        // Go silent; the client gives up and hangs up
        assert!(server.recv().await.is_none());
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(reason.unwrap(), CloseReason::KeepaliveTimeout);
}

/// Without the opt-in, silence never closes the session.
#[tokio::test(start_paused = true)]
async fn test_no_timeout_by_default() {
    let (client_end, mut server) = ChannelTransport::pair();
    let mut client = ClientBuilder::new()
        .token(SessionToken::new("t"))
        .build()
        .unwrap();

    let server_script = async {
        recv_client(&mut server).await;
        expect_keepalive(&mut server, 0).await;
        tokio::time::sleep(Duration::from_secs(3600)).await;
        expect_keepalive(&mut server, 1).await;
        server.close().await.unwrap();
    };

    let (reason, ()) = tokio::join!(client.run(client_end), server_script);
    assert_eq!(reason.unwrap(), CloseReason::TransportClosed);
}
