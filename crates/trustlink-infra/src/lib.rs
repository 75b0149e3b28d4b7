//! # TrustLink Infrastructure
//!
//! Concrete implementations of the ports defined in `trustlink-core`:
//! the reqwest-backed [`HttpBackendClient`], the per-incident chat socket
//! and the error loggers.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - HTTP operations only
//! - `chat` - Chat WebSocket via tokio-tungstenite

pub mod config;
pub mod http;
pub mod logging;

#[cfg(feature = "chat")]
pub mod chat;

pub use config::ClientConfig;
pub use http::HttpBackendClient;
pub use logging::{InMemoryChatObserver, InMemoryErrorLogger, LoggingChatObserver, TracingErrorLogger};

#[cfg(feature = "chat")]
pub use chat::{ChatEvent, ChatSocket};
