//! Loggers that emit structured `tracing` events.

use trustlink_core::ports::{ChatObserver, ErrorLogger};
use trustlink_core::{ApiError, IncidentId, Operation};

/// Default error logger. Backend rejections are warnings, everything else is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorLogger;

impl ErrorLogger for TracingErrorLogger {
    fn log_error(&self, operation: Operation, error: &ApiError) {
        match error {
            ApiError::Rejected { status, .. } => {
                tracing::warn!(
                    operation = operation.as_str(),
                    status = *status,
                    error = %error,
                    "Backend rejected request"
                );
            }
            _ => {
                tracing::error!(operation = operation.as_str(), error = %error, "Request failed");
            }
        }
    }
}

/// Default chat observer: logs the open and error hooks and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingChatObserver;

impl ChatObserver for LoggingChatObserver {
    fn on_open(&self, incident_id: IncidentId) {
        tracing::info!(incident_id, "Chat socket connected");
    }

    fn on_error(&self, incident_id: IncidentId, error: &ApiError) {
        tracing::warn!(incident_id, error = %error, "Chat socket error");
    }
}
