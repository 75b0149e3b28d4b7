use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

use trustlink_core::{ApiError, AuthToken, Operation};
use trustlink_shared::InboundFrame;

use super::socket::decode_frame;
use super::ChatEvent;
use crate::config::ClientConfig;
use crate::http::HttpBackendClient;
use crate::logging::{ChatObservation, InMemoryChatObserver, InMemoryErrorLogger};

const TIMEOUT: Duration = Duration::from_secs(5);

fn client_for(base: &str, logger: Arc<InMemoryErrorLogger>) -> HttpBackendClient {
    let config = ClientConfig::new(base).unwrap();
    HttpBackendClient::new(config, logger).unwrap()
}

#[tokio::test]
async fn test_chat_round_trip_with_open_hook() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (uri_tx, uri_rx) = oneshot::channel::<String>();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_hdr_async(stream, move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let _ = uri_tx.send(req.uri().to_string());
            Ok(resp)
        })
        .await
        .unwrap();

        let push = json!({
            "type": "new_message",
            "data": {
                "id": 1,
                "content": "hello",
                "sender_id": 9,
                "sent_at": "2024-05-01T10:00:00",
                "is_read": false
            }
        });
        ws.send(Message::Text(push.to_string().into())).await.unwrap();

        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return text.as_str().to_string(),
                Some(Ok(_)) => continue,
                other => panic!("unexpected server read: {:?}", other),
            }
        }
    });

    let logger = Arc::new(InMemoryErrorLogger::new());
    let client = client_for(&format!("http://{}/api", addr), logger.clone());
    let observer = Arc::new(InMemoryChatObserver::new());

    let mut socket = client
        .connect_to_chat_with(42, &AuthToken::from("tok"), observer.clone())
        .unwrap();

    assert!(socket.url().as_str().contains("ws/chat/42"));
    assert_eq!(socket.url().query(), Some("token=tok"));

    // Queued until the handshake completes.
    socket.send_message("hi").unwrap();

    let event = timeout(TIMEOUT, socket.recv()).await.unwrap().unwrap();
    match event {
        ChatEvent::Frame(InboundFrame::NewMessage(msg)) => {
            assert_eq!(msg.content, "hello");
            assert_eq!(msg.sender_id, 9);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    let received = timeout(TIMEOUT, server).await.unwrap().unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&received).unwrap(),
        json!({"type": "message", "content": "hi"})
    );
    assert_eq!(uri_rx.await.unwrap(), "/api/ws/chat/42?token=tok");
    assert_eq!(observer.events(), vec![ChatObservation::Opened(42)]);
    assert!(logger.is_empty());
}

#[tokio::test]
async fn test_server_close_is_delivered() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.close(Some(CloseFrame {
            code: CloseCode::Policy,
            reason: "not allowed".into(),
        }))
        .await
        .unwrap();
        // The client's reply completes the handshake; a dropped stream would be an error.
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) | None => return true,
                Some(Ok(_)) => continue,
                Some(Err(_)) => return false,
            }
        }
    });

    let client = client_for(
        &format!("http://{}/api", addr),
        Arc::new(InMemoryErrorLogger::new()),
    );
    let mut socket = client.connect_to_chat(3, &AuthToken::from("tok")).unwrap();

    let event = timeout(TIMEOUT, socket.recv()).await.unwrap().unwrap();
    match event {
        ChatEvent::Closed { code, reason } => {
            assert_eq!(code, 1008);
            assert_eq!(reason, "not allowed");
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert!(timeout(TIMEOUT, server).await.unwrap().unwrap());
}

/// Accept one connection and report whether a close frame arrives.
async fn spawn_close_watcher() -> (String, tokio::task::JoinHandle<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        loop {
            match ws.next().await {
                Some(Ok(Message::Close(_))) => return true,
                Some(Ok(_)) => continue,
                _ => return false,
            }
        }
    });

    (format!("http://{}/api", addr), server)
}

#[tokio::test]
async fn test_close_sends_close_frame() {
    let (base, server) = spawn_close_watcher().await;
    let observer = Arc::new(InMemoryChatObserver::new());
    let client = client_for(&base, Arc::new(InMemoryErrorLogger::new()));

    let socket = client
        .connect_to_chat_with(5, &AuthToken::from("tok"), observer.clone())
        .unwrap();
    socket.send_message("bye").unwrap();
    socket.close();

    assert!(timeout(TIMEOUT, server).await.unwrap().unwrap());
    assert_eq!(observer.events(), vec![ChatObservation::Opened(5)]);
}

#[tokio::test]
async fn test_dropping_handle_sends_close_frame() {
    let (base, server) = spawn_close_watcher().await;
    let client = client_for(&base, Arc::new(InMemoryErrorLogger::new()));

    let socket = client.connect_to_chat(6, &AuthToken::from("tok")).unwrap();
    drop(socket);

    assert!(timeout(TIMEOUT, server).await.unwrap().unwrap());
}

#[tokio::test]
async fn test_handshake_failure_reaches_error_hook() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let logger = Arc::new(InMemoryErrorLogger::new());
    let client = client_for(&format!("http://{}/api", addr), logger.clone());
    let observer = Arc::new(InMemoryChatObserver::new());

    // The handle comes back before the connection attempt fails.
    let mut socket = client
        .connect_to_chat_with(7, &AuthToken::from("tok"), observer.clone())
        .unwrap();

    let event = timeout(TIMEOUT, socket.recv()).await.unwrap().unwrap();
    assert!(matches!(
        event,
        ChatEvent::Error(ApiError::Socket {
            operation: Operation::ConnectChat,
            ..
        })
    ));
    assert!(timeout(TIMEOUT, socket.recv()).await.unwrap().is_none());

    let events = observer.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ChatObservation::Failed(7, _)));
    assert!(logger.is_empty());
}

#[test]
fn test_connect_outside_runtime_fails_and_is_logged() {
    let logger = Arc::new(InMemoryErrorLogger::new());
    let client = client_for("http://127.0.0.1:9/api", logger.clone());

    let result = client.connect_to_chat(1, &AuthToken::from("tok"));

    assert!(matches!(result, Err(ApiError::Socket { .. })));
    assert_eq!(logger.operations(), vec![Operation::ConnectChat]);
}

#[test]
fn test_unknown_frames_are_delivered_verbatim() {
    let raw = r#"{"type":"presence","data":{"user_id":1}}"#;
    match decode_frame(raw) {
        ChatEvent::Text(text) => assert_eq!(text, raw),
        other => panic!("unexpected event: {:?}", other),
    }

    assert!(matches!(decode_frame("not json"), ChatEvent::Text(_)));
}
