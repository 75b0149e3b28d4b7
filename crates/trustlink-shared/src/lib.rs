//! # TrustLink Shared
//!
//! Wire types exchanged with the TrustLink backend: request bodies, the
//! backend error convention and the chat WebSocket frames.

pub mod chat;
pub mod dto;
pub mod response;

pub use chat::{InboundFrame, OutboundFrame};
pub use response::{ErrorBody, HealthResponse};
