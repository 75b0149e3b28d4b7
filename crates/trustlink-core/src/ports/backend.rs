use async_trait::async_trait;
use serde_json::Value;

use trustlink_shared::HealthResponse;
use trustlink_shared::dto::{Credentials, IncidentQuery, PageParams, RegistrationInput, TokenResponse};

use crate::domain::{AuthToken, IncidentId, MessageId, UserId};
use crate::error::ApiError;

/// The TrustLink backend as seen by the client.
///
/// Each method performs exactly one HTTP request. Incident, report, message
/// and profile payloads are opaque JSON passed through unchanged.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /auth/login` with form-encoded credentials.
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError>;

    /// `POST /auth/register`. The submitted role is always citizen.
    async fn register(&self, input: RegistrationInput) -> Result<Value, ApiError>;

    /// `GET /incidents`.
    async fn get_incidents(&self, token: &AuthToken) -> Result<Value, ApiError>;

    /// `GET /incidents?skip=&limit=&status=`. Unlike [`Self::get_incidents`]
    /// this always checks the status.
    async fn get_incidents_filtered(
        &self,
        token: &AuthToken,
        query: &IncidentQuery,
    ) -> Result<Value, ApiError>;

    /// `POST /incidents`.
    async fn create_incident(&self, token: &AuthToken, incident: &Value)
    -> Result<Value, ApiError>;

    /// `GET /incidents/{id}`.
    async fn get_incident(&self, token: &AuthToken, id: IncidentId) -> Result<Value, ApiError>;

    /// `PUT /incidents/{id}`.
    async fn update_incident(
        &self,
        token: &AuthToken,
        id: IncidentId,
        update: &Value,
    ) -> Result<Value, ApiError>;

    /// `DELETE /incidents/{id}`.
    async fn delete_incident(&self, token: &AuthToken, id: IncidentId) -> Result<Value, ApiError>;

    /// `POST /incidents/emergency`.
    async fn send_emergency(&self, token: &AuthToken, emergency: &Value)
    -> Result<Value, ApiError>;

    /// `POST /incidents/report`.
    async fn send_report(&self, token: &AuthToken, report: &Value) -> Result<Value, ApiError>;

    /// `GET /chat/incidents/{id}/messages`.
    async fn get_incident_messages(
        &self,
        token: &AuthToken,
        incident_id: IncidentId,
    ) -> Result<Value, ApiError>;

    /// `GET /chat/incidents/{id}/messages?skip=&limit=`.
    async fn get_incident_messages_page(
        &self,
        token: &AuthToken,
        incident_id: IncidentId,
        page: &PageParams,
    ) -> Result<Value, ApiError>;

    /// `POST /chat/messages`.
    async fn send_chat_message(
        &self,
        token: &AuthToken,
        incident_id: IncidentId,
        message: &str,
    ) -> Result<Value, ApiError>;

    /// `POST /chat/emergency`.
    async fn send_emergency_chat(&self, token: &AuthToken, content: &str)
    -> Result<Value, ApiError>;

    /// `PUT /chat/messages/{id}`, marking the message read.
    async fn mark_message_read(
        &self,
        token: &AuthToken,
        message_id: MessageId,
    ) -> Result<Value, ApiError>;

    /// `GET /users/me`.
    async fn current_user(&self, token: &AuthToken) -> Result<Value, ApiError>;

    /// `PUT /users/me`.
    async fn update_current_user(
        &self,
        token: &AuthToken,
        update: &Value,
    ) -> Result<Value, ApiError>;

    /// `GET /users`. Admin only.
    async fn list_users(&self, token: &AuthToken, page: &PageParams) -> Result<Value, ApiError>;

    /// `GET /users/{id}`. Admin only.
    async fn get_user(&self, token: &AuthToken, id: UserId) -> Result<Value, ApiError>;

    /// `PUT /users/{id}`. Admin only.
    async fn update_user(
        &self,
        token: &AuthToken,
        id: UserId,
        update: &Value,
    ) -> Result<Value, ApiError>;

    /// `DELETE /users/{id}`. Admin only.
    async fn delete_user(&self, token: &AuthToken, id: UserId) -> Result<Value, ApiError>;

    /// `GET /health`.
    async fn health(&self) -> Result<HealthResponse, ApiError>;
}
