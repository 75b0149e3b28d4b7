//! Error loggers and chat observers - tracing-backed and in-memory.

mod memory;
mod tracing_logger;

pub use memory::{ChatObservation, InMemoryChatObserver, InMemoryErrorLogger, LoggedError};
pub use tracing_logger::{LoggingChatObserver, TracingErrorLogger};
