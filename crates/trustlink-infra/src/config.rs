//! Client configuration - backend origins and request behaviour.

use std::env;
use std::time::Duration;

use url::Url;

use trustlink_core::{ApiError, AuthToken, IncidentId};

/// Backend API origin used when `TRUSTLINK_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration injected into [`crate::HttpBackendClient`] at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP origin including the `/api` prefix.
    pub api_base: Url,
    /// WebSocket origin including the `/api` prefix.
    pub ws_base: Url,
    /// Per-request timeout. `None` waits for the transport.
    pub request_timeout: Option<Duration>,
    /// Check the status of incident listing and creation like every other call.
    /// Off by default, matching the mobile client.
    pub uniform_status_checks: bool,
    /// Set once `ws_base` was given explicitly rather than derived.
    ws_base_explicit: bool,
}

impl ClientConfig {
    /// Build a config for `api_base`, deriving the WebSocket origin from it
    /// (`http` becomes `ws`, `https` becomes `wss`).
    pub fn new(api_base: &str) -> Result<Self, ApiError> {
        let api_base = parse_base(api_base)?;
        let ws_base = derive_ws_base(&api_base)?;

        Ok(Self {
            api_base,
            ws_base,
            request_timeout: None,
            uniform_status_checks: false,
            ws_base_explicit: false,
        })
    }

    /// Replace the API origin. A derived WebSocket origin follows it; an
    /// explicit one is kept.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ApiError> {
        let api_base = parse_base(api_base)?;
        let derived = derive_ws_base(&api_base)?;
        if !self.ws_base_explicit {
            self.ws_base = derived;
        }
        self.api_base = api_base;
        Ok(self)
    }

    pub fn with_ws_base(mut self, ws_base: &str) -> Result<Self, ApiError> {
        let ws_base = parse_base(ws_base)?;
        if !matches!(ws_base.scheme(), "ws" | "wss") {
            return Err(ApiError::InvalidUrl(format!(
                "WebSocket origin must use ws or wss: {}",
                ws_base
            )));
        }
        self.ws_base = ws_base;
        self.ws_base_explicit = true;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_uniform_status_checks(mut self, enabled: bool) -> Self {
        self.uniform_status_checks = enabled;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_url = env::var("TRUSTLINK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&api_url)?;

        if let Ok(ws_url) = env::var("TRUSTLINK_WS_URL") {
            config = config.with_ws_base(&ws_url)?;
        }

        config.request_timeout = env::var("TRUSTLINK_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        config.uniform_status_checks = env::var("TRUSTLINK_STRICT_STATUS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(config)
    }

    /// Absolute URL of an HTTP endpoint, e.g. `endpoint("/auth/login")`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        join(&self.api_base, path)
    }

    /// Chat socket target: `<ws_base>/ws/chat/{incident_id}?token={token}`.
    ///
    /// The token travels as a query parameter because the handshake cannot
    /// carry arbitrary headers on the mobile client.
    pub fn chat_endpoint(&self, incident_id: IncidentId, token: &AuthToken) -> Result<Url, ApiError> {
        let mut url = join(&self.ws_base, &format!("/ws/chat/{}", incident_id))?;
        url.query_pairs_mut().append_pair("token", token.as_str());
        Ok(url)
    }
}

fn parse_base(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
}

fn derive_ws_base(api_base: &Url) -> Result<Url, ApiError> {
    let scheme = match api_base.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => {
            return Err(ApiError::InvalidUrl(format!(
                "API origin must use http or https, got {}",
                other
            )));
        }
    };

    let mut ws_base = api_base.clone();
    ws_base
        .set_scheme(scheme)
        .map_err(|_| ApiError::InvalidUrl(format!("cannot derive WebSocket origin from {}", api_base)))?;
    Ok(ws_base)
}

fn join(base: &Url, path: &str) -> Result<Url, ApiError> {
    let raw = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
}
