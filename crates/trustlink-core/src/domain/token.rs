use std::fmt;

/// Opaque bearer credential supplied by the caller on every authorized call.
///
/// The client never stores, caches or refreshes it. `Debug` output is
/// redacted so tokens do not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_value() {
        let token = AuthToken::from("abc.def");
        assert_eq!(token.bearer(), "Bearer abc.def");
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = AuthToken::new("secret-token");
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("secret-token"));
    }
}
