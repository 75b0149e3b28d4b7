//! # TrustLink Core
//!
//! The domain layer of the TrustLink client.
//! This crate names the client operations, defines the error taxonomy and
//! declares the ports that infrastructure implements. It performs no I/O.

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{AuthToken, IncidentId, MessageId, Operation, UserId};
pub use error::ApiError;
