//! Response handling - status checks and `detail` extraction.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use trustlink_core::{ApiError, Operation};
use trustlink_shared::ErrorBody;

/// Whether a non-success status fails the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusPolicy {
    /// Non-2xx becomes [`ApiError::Rejected`].
    Checked,
    /// The body is parsed and returned whatever the status.
    Unchecked,
}

/// Turn a response into `T` according to `policy`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    operation: Operation,
    response: Response,
    policy: StatusPolicy,
) -> Result<T, ApiError> {
    let status = response.status();

    if policy == StatusPolicy::Checked && !status.is_success() {
        return Err(rejection(operation, status, response).await);
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::network(operation, e))?;

    // Empty bodies decode as JSON null so `Value` callers still get a result.
    let parsed = if bytes.is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(&bytes)
    };

    parsed.map_err(|e| ApiError::Decode {
        operation,
        message: e.to_string(),
    })
}

/// Build the rejection for a non-success response.
///
/// Uses the backend's `detail` when the body is JSON carrying one, otherwise
/// the status text. A malformed error body never masks the rejection.
async fn rejection(operation: Operation, status: StatusCode, response: Response) -> ApiError {
    let detail = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
        .and_then(|body| body.detail_message())
        .unwrap_or_else(|| status_text(status));

    ApiError::Rejected {
        operation,
        status: status.as_u16(),
        detail,
    }
}

pub(crate) fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
