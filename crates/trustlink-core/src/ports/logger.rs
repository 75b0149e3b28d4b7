use crate::domain::Operation;
use crate::error::ApiError;

/// Sink for client failures. Every error is reported here, tagged with its
/// operation, before it is returned to the caller.
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, operation: Operation, error: &ApiError);
}
