//! WebSocket connection to `/ws/chat/{incident_id}`.
//!
//! [`HttpBackendClient::connect_to_chat`] hands back a [`ChatSocket`] before
//! the handshake finishes. A driver task owns the connection: it performs the
//! handshake, reports open/error to the [`ChatObserver`], forwards outbound
//! frames and delivers inbound ones as [`ChatEvent`]s. There is no reconnect
//! and no heartbeat beyond the ping/pong tungstenite answers itself.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use url::Url;

use trustlink_core::ports::ChatObserver;
use trustlink_core::{ApiError, AuthToken, IncidentId, Operation};
use trustlink_shared::{InboundFrame, OutboundFrame};

use crate::http::HttpBackendClient;
use crate::logging::LoggingChatObserver;

/// Close code reported for a close frame without a status.
const NO_STATUS: u16 = 1005;
/// Close code reported when the stream ends without a close frame.
const ABNORMAL_CLOSURE: u16 = 1006;

/// Something that happened on the chat socket.
#[derive(Debug)]
pub enum ChatEvent {
    /// A recognised backend frame.
    Frame(InboundFrame),
    /// A text payload that is not a known frame, delivered verbatim.
    Text(String),
    /// The connection closed.
    Closed { code: u16, reason: String },
    /// The handshake or the transport failed. No further events follow.
    Error(ApiError),
}

/// Caller-owned handle to a chat connection.
///
/// Frames sent before the handshake completes are queued and flushed once it
/// does. Dropping the handle closes the connection.
pub struct ChatSocket {
    incident_id: IncidentId,
    url: Url,
    outbound: mpsc::UnboundedSender<Message>,
    events: mpsc::UnboundedReceiver<ChatEvent>,
}

impl ChatSocket {
    pub fn incident_id(&self) -> IncidentId {
        self.incident_id
    }

    /// Target URL, token query parameter included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn send(&self, frame: &OutboundFrame) -> Result<(), ApiError> {
        let text = serde_json::to_string(frame).map_err(|e| socket_error(e.to_string()))?;
        self.send_text(text)
    }

    /// Send a chat message frame.
    pub fn send_message(&self, content: impl Into<String>) -> Result<(), ApiError> {
        self.send(&OutboundFrame::Message {
            content: content.into(),
        })
    }

    pub fn send_typing(&self, is_typing: bool) -> Result<(), ApiError> {
        self.send(&OutboundFrame::Typing { is_typing })
    }

    pub fn send_text(&self, text: impl Into<String>) -> Result<(), ApiError> {
        let text: String = text.into();
        self.outbound
            .send(Message::Text(text.into()))
            .map_err(|_| socket_error("socket is closed".to_string()))
    }

    /// Next event, or `None` once the driver has stopped.
    pub async fn recv(&mut self) -> Option<ChatEvent> {
        self.events.recv().await
    }

    /// Send a normal close frame and release the handle.
    pub fn close(self) {
        let _ = self.outbound.send(Message::Close(None));
    }
}

impl std::fmt::Debug for ChatSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL carries the token.
        f.debug_struct("ChatSocket")
            .field("incident_id", &self.incident_id)
            .finish_non_exhaustive()
    }
}

impl HttpBackendClient {
    /// Open the chat socket for `incident_id`, logging open and error events.
    pub fn connect_to_chat(
        &self,
        incident_id: IncidentId,
        token: &AuthToken,
    ) -> Result<ChatSocket, ApiError> {
        self.connect_to_chat_with(incident_id, token, Arc::new(LoggingChatObserver))
    }

    /// Open the chat socket for `incident_id` with custom open/error hooks.
    ///
    /// Returns immediately; the handshake runs on a task spawned onto the
    /// current Tokio runtime. Only URL and runtime problems fail here.
    pub fn connect_to_chat_with(
        &self,
        incident_id: IncidentId,
        token: &AuthToken,
        observer: Arc<dyn ChatObserver>,
    ) -> Result<ChatSocket, ApiError> {
        let result = self.spawn_chat(incident_id, token, observer);
        if let Err(err) = &result {
            self.logger().log_error(Operation::ConnectChat, err);
        }
        result
    }

    fn spawn_chat(
        &self,
        incident_id: IncidentId,
        token: &AuthToken,
        observer: Arc<dyn ChatObserver>,
    ) -> Result<ChatSocket, ApiError> {
        let url = self.config().chat_endpoint(incident_id, token)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| socket_error(format!("no async runtime: {}", e)))?;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        runtime.spawn(drive(
            url.clone(),
            incident_id,
            observer,
            outbound_rx,
            events_tx,
        ));

        Ok(ChatSocket {
            incident_id,
            url,
            outbound: outbound_tx,
            events: events_rx,
        })
    }
}

async fn drive(
    url: Url,
    incident_id: IncidentId,
    observer: Arc<dyn ChatObserver>,
    mut outbound: mpsc::UnboundedReceiver<Message>,
    events: mpsc::UnboundedSender<ChatEvent>,
) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            fail(incident_id, &observer, &events, e);
            return;
        }
    };

    observer.on_open(incident_id);
    let (mut writer, mut reader) = stream.split();

    loop {
        tokio::select! {
            outgoing = outbound.recv() => match outgoing {
                Some(message) => {
                    if let Err(e) = writer.send(message).await {
                        fail(incident_id, &observer, &events, e);
                        break;
                    }
                }
                None => {
                    // Handle dropped.
                    let _ = writer.send(Message::Close(None)).await;
                    break;
                }
            },
            incoming = reader.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    let _ = events.send(decode_frame(text.as_str()));
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (u16::from(f.code), f.reason.as_str().to_string()))
                        .unwrap_or((NO_STATUS, String::new()));
                    tracing::debug!(incident_id, code, "Chat socket closed by server");
                    // Flush the close reply tungstenite queued before dropping the stream.
                    let _ = writer.close().await;
                    let _ = events.send(ChatEvent::Closed { code, reason });
                    break;
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_) | Message::Frame(_))) => {}
                Some(Err(e)) => {
                    fail(incident_id, &observer, &events, e);
                    break;
                }
                None => {
                    let _ = events.send(ChatEvent::Closed {
                        code: ABNORMAL_CLOSURE,
                        reason: String::new(),
                    });
                    break;
                }
            },
        }
    }
}

fn fail(
    incident_id: IncidentId,
    observer: &Arc<dyn ChatObserver>,
    events: &mpsc::UnboundedSender<ChatEvent>,
    error: tungstenite::Error,
) {
    let err = socket_error(error.to_string());
    observer.on_error(incident_id, &err);
    let _ = events.send(ChatEvent::Error(err));
}

pub(crate) fn decode_frame(text: &str) -> ChatEvent {
    match serde_json::from_str::<InboundFrame>(text) {
        Ok(frame) => ChatEvent::Frame(frame),
        Err(_) => ChatEvent::Text(text.to_string()),
    }
}

fn socket_error(message: String) -> ApiError {
    ApiError::Socket {
        operation: Operation::ConnectChat,
        message,
    }
}
