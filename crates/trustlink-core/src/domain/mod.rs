//! Domain values shared by every client operation.

mod operation;
mod token;

pub use operation::Operation;
pub use token::AuthToken;

/// Backend identifier of an incident.
pub type IncidentId = i64;

/// Backend identifier of a chat message.
pub type MessageId = i64;

/// Backend identifier of a user account.
pub type UserId = i64;
