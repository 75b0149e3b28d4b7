//! Data Transfer Objects - request/response types for the backend API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Form body of `POST /auth/login`. The backend expects the email as `username`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginForm<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            username: &credentials.email,
            password: &credentials.password,
        }
    }
}

/// Response of a successful login.
///
/// Fields beyond the token are kept in `extra`, so the body round-trips unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Account roles known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Citizen,
    Police,
    Admin,
}

/// Loosely shaped registration input.
///
/// Accepts `fullName` and `full_name` (likewise `phoneNumber` and
/// `phone_number`), possibly both at once; a non-empty camelCase value wins.
/// Any `role` the caller supplies is read but never sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name_camel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, rename = "phoneNumber", skip_serializing_if = "Option::is_none")]
    pub phone_number_camel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RegistrationInput {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }
}

/// Canonical body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
    pub role: UserRole,
}

impl From<RegistrationInput> for RegistrationRequest {
    /// Missing name and phone become empty strings; the role is always citizen.
    fn from(input: RegistrationInput) -> Self {
        Self {
            email: input.email,
            password: input.password,
            full_name: first_non_empty(input.full_name_camel, input.full_name),
            phone_number: first_non_empty(input.phone_number_camel, input.phone_number),
            role: UserRole::Citizen,
        }
    }
}

fn first_non_empty(preferred: Option<String>, fallback: Option<String>) -> String {
    preferred
        .filter(|value| !value.is_empty())
        .or(fallback)
        .unwrap_or_default()
}

/// Incident categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Theft,
    Violence,
    Vandalism,
    Traffic,
    Noise,
    Other,
}

/// Incident lifecycle states, managed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Reported,
    InProgress,
    Resolved,
    Closed,
}

impl IncidentStatus {
    /// Wire value, as used in bodies and the `status` query filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Reported => "reported",
            IncidentStatus::InProgress => "in_progress",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Closed => "closed",
        }
    }
}

/// Typed builder for the incident payload. The client itself sends incidents as opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncident {
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
}

/// Partial incident update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncidentUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<IncidentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
}

/// `skip`/`limit` paging for list endpoints. Unset fields are left to the
/// backend defaults (0 and 100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self { skip, limit }
    }

    pub fn is_empty(&self) -> bool {
        self.skip.is_none() && self.limit.is_none()
    }

    /// Query-string pairs for the fields that are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Query of `GET /incidents`: paging plus an optional status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncidentQuery {
    pub page: PageParams,
    pub status: Option<IncidentStatus>,
}

impl IncidentQuery {
    pub fn is_empty(&self) -> bool {
        self.page.is_empty() && self.status.is_none()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.page.query_pairs();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

/// Body of `POST /chat/messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub content: String,
    pub incident_id: i64,
}

/// Body of `POST /chat/emergency`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyChat {
    pub content: String,
    pub is_emergency: bool,
}

impl EmergencyChat {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_emergency: true,
        }
    }
}

/// Body of `PUT /chat/messages/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReadUpdate {
    pub is_read: bool,
}
