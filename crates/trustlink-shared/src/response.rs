//! Backend response conventions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the backend on non-success statuses.
///
/// `detail` is usually a string, but validation failures carry a list of objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the backend supplied a non-empty one.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_detail() {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "Email already registered"})).unwrap();
        assert_eq!(body.detail_message().as_deref(), Some("Email already registered"));
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let body: ErrorBody = serde_json::from_value(json!({
            "detail": [{"loc": ["body", "email"], "msg": "field required"}]
        }))
        .unwrap();

        let message = body.detail_message().unwrap();
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_missing_or_empty_detail() {
        let missing: ErrorBody = serde_json::from_value(json!({"error": "nope"})).unwrap();
        assert_eq!(missing.detail_message(), None);

        let empty: ErrorBody = serde_json::from_value(json!({"detail": ""})).unwrap();
        assert_eq!(empty.detail_message(), None);
    }
}
