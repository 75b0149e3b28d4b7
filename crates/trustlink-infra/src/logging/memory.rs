//! In-memory logger and observer.
//!
//! Recorded entries can be inspected afterwards, which makes these the
//! test doubles for the logging ports.

use std::sync::{Mutex, MutexGuard, PoisonError};

use trustlink_core::ports::{ChatObserver, ErrorLogger};
use trustlink_core::{ApiError, IncidentId, Operation};

/// A failure reported to [`InMemoryErrorLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedError {
    pub operation: Operation,
    pub message: String,
}

/// Error logger that keeps every reported failure.
#[derive(Debug, Default)]
pub struct InMemoryErrorLogger {
    entries: Mutex<Vec<LoggedError>>,
}

impl InMemoryErrorLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LoggedError> {
        lock(&self.entries).clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        lock(&self.entries).iter().map(|e| e.operation).collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl ErrorLogger for InMemoryErrorLogger {
    fn log_error(&self, operation: Operation, error: &ApiError) {
        lock(&self.entries).push(LoggedError {
            operation,
            message: error.to_string(),
        });
    }
}

/// A hook invocation seen by [`InMemoryChatObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatObservation {
    Opened(IncidentId),
    Failed(IncidentId, String),
}

/// Chat observer that keeps every hook invocation.
#[derive(Debug, Default)]
pub struct InMemoryChatObserver {
    events: Mutex<Vec<ChatObservation>>,
}

impl InMemoryChatObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ChatObservation> {
        lock(&self.events).clone()
    }
}

impl ChatObserver for InMemoryChatObserver {
    fn on_open(&self, incident_id: IncidentId) {
        lock(&self.events).push(ChatObservation::Opened(incident_id));
    }

    fn on_error(&self, incident_id: IncidentId, error: &ApiError) {
        lock(&self.events).push(ChatObservation::Failed(incident_id, error.to_string()));
    }
}

// Entries are append-only, so a poisoned lock still holds consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_operation_and_message() {
        let logger = InMemoryErrorLogger::new();
        let err = ApiError::Rejected {
            operation: Operation::SendReport,
            status: 400,
            detail: "Bad report".to_string(),
        };

        logger.log_error(Operation::SendReport, &err);

        assert_eq!(logger.len(), 1);
        assert_eq!(
            logger.entries()[0],
            LoggedError {
                operation: Operation::SendReport,
                message: "Report failed: Bad report".to_string(),
            }
        );
    }

    #[test]
    fn test_observer_records_hooks_in_order() {
        let observer = InMemoryChatObserver::new();
        observer.on_open(5);
        observer.on_error(
            5,
            &ApiError::Socket {
                operation: Operation::ConnectChat,
                message: "reset".to_string(),
            },
        );

        let events = observer.events();
        assert_eq!(events[0], ChatObservation::Opened(5));
        assert!(matches!(&events[1], ChatObservation::Failed(5, msg) if msg.contains("reset")));
    }
}
