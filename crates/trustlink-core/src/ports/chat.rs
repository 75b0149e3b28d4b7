use crate::domain::IncidentId;
use crate::error::ApiError;

/// Observation hooks for a chat socket.
///
/// Both hooks are diagnostic only: they run on the socket's driver task and
/// must not block. Messages and closure reach the caller through the socket
/// handle itself.
pub trait ChatObserver: Send + Sync {
    /// The handshake completed.
    fn on_open(&self, incident_id: IncidentId);

    /// The handshake or the transport failed.
    fn on_error(&self, incident_id: IncidentId, error: &ApiError);
}
