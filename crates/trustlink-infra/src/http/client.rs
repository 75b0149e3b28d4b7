//! reqwest implementation of [`BackendApi`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use trustlink_core::ports::{BackendApi, ErrorLogger};
use trustlink_core::{ApiError, AuthToken, IncidentId, MessageId, Operation, UserId};
use trustlink_shared::HealthResponse;
use trustlink_shared::dto::{
    Credentials, EmergencyChat, IncidentQuery, LoginForm, MessageReadUpdate, NewChatMessage,
    PageParams, RegistrationInput, RegistrationRequest, TokenResponse,
};

use super::response::{StatusPolicy, read_json};
use crate::config::ClientConfig;
use crate::logging::TracingErrorLogger;

/// Header carrying a per-request correlation id.
pub static REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Query-string pairs appended to an endpoint.
type Query = [(&'static str, String)];

const NO_QUERY: &Query = &[];

/// Request body encodings used by the backend.
enum Payload<'a, B: ?Sized> {
    Empty,
    Json(&'a B),
    Form(&'a B),
}

/// Stateless client for the TrustLink backend.
///
/// Holds only the injected configuration, a pooled HTTP client and the error
/// logger; every call is independent and takes its token explicitly.
#[derive(Clone)]
pub struct HttpBackendClient {
    config: ClientConfig,
    http: reqwest::Client,
    logger: Arc<dyn ErrorLogger>,
}

impl HttpBackendClient {
    pub fn new(config: ClientConfig, logger: Arc<dyn ErrorLogger>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http,
            logger,
        })
    }

    /// Client that reports failures through `tracing`.
    pub fn with_tracing(config: ClientConfig) -> Result<Self, ApiError> {
        Self::new(config, Arc::new(TracingErrorLogger))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn logger(&self) -> &Arc<dyn ErrorLogger> {
        &self.logger
    }

    /// Policy for incident listing and creation, which historically skip the status check.
    fn lenient_policy(&self) -> StatusPolicy {
        if self.config.uniform_status_checks {
            StatusPolicy::Checked
        } else {
            StatusPolicy::Unchecked
        }
    }

    /// Perform one request and report any failure to the logger before returning it.
    #[allow(clippy::too_many_arguments)]
    async fn call<B, T>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        query: &Query,
        token: Option<&AuthToken>,
        payload: Payload<'_, B>,
        policy: StatusPolicy,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "api_request",
            operation = operation.as_str(),
            method = %method,
            path = %path,
            request_id = %request_id,
        );

        let result = self
            .dispatch(operation, method, path, query, token, payload, policy, &request_id)
            .instrument(span)
            .await;

        if let Err(err) = &result {
            self.logger.log_error(operation, err);
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    async fn dispatch<B, T>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        query: &Query,
        token: Option<&AuthToken>,
        payload: Payload<'_, B>,
        policy: StatusPolicy,
        request_id: &str,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        let mut request: RequestBuilder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = token {
            request = request.header(reqwest::header::AUTHORIZATION, token.bearer());
        }

        request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::Form(body) => request.form(body),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(operation, e))?;

        tracing::debug!(status = response.status().as_u16(), "Response received");

        read_json(operation, response, policy).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        token: Option<&AuthToken>,
        policy: StatusPolicy,
    ) -> Result<T, ApiError> {
        self.get_with_query(operation, path, NO_QUERY, token, policy)
            .await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        query: &Query,
        token: Option<&AuthToken>,
        policy: StatusPolicy,
    ) -> Result<T, ApiError> {
        self.call::<Value, T>(
            operation,
            Method::GET,
            path,
            query,
            token,
            Payload::Empty,
            policy,
        )
        .await
    }

    async fn delete(
        &self,
        operation: Operation,
        path: &str,
        token: &AuthToken,
    ) -> Result<Value, ApiError> {
        self.call::<Value, Value>(
            operation,
            Method::DELETE,
            path,
            NO_QUERY,
            Some(token),
            Payload::Empty,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn send_json<B, T>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        token: &AuthToken,
        body: &B,
        policy: StatusPolicy,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(
            operation,
            method,
            path,
            NO_QUERY,
            Some(token),
            Payload::Json(body),
            policy,
        )
        .await
    }
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let form = LoginForm::from(credentials);
        self.call(
            Operation::Login,
            Method::POST,
            "/auth/login",
            NO_QUERY,
            None,
            Payload::Form(&form),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn register(&self, input: RegistrationInput) -> Result<Value, ApiError> {
        let body = RegistrationRequest::from(input);
        self.call(
            Operation::Register,
            Method::POST,
            "/auth/register",
            NO_QUERY,
            None,
            Payload::Json(&body),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn get_incidents(&self, token: &AuthToken) -> Result<Value, ApiError> {
        self.get(
            Operation::ListIncidents,
            "/incidents",
            Some(token),
            self.lenient_policy(),
        )
        .await
    }

    async fn get_incidents_filtered(
        &self,
        token: &AuthToken,
        query: &IncidentQuery,
    ) -> Result<Value, ApiError> {
        self.get_with_query(
            Operation::ListIncidents,
            "/incidents",
            &query.query_pairs(),
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn create_incident(
        &self,
        token: &AuthToken,
        incident: &Value,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::CreateIncident,
            Method::POST,
            "/incidents",
            token,
            incident,
            self.lenient_policy(),
        )
        .await
    }

    async fn get_incident(&self, token: &AuthToken, id: IncidentId) -> Result<Value, ApiError> {
        self.get(
            Operation::GetIncident,
            &format!("/incidents/{}", id),
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn update_incident(
        &self,
        token: &AuthToken,
        id: IncidentId,
        update: &Value,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::UpdateIncident,
            Method::PUT,
            &format!("/incidents/{}", id),
            token,
            update,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn delete_incident(&self, token: &AuthToken, id: IncidentId) -> Result<Value, ApiError> {
        self.delete(Operation::DeleteIncident, &format!("/incidents/{}", id), token)
            .await
    }

    async fn send_emergency(
        &self,
        token: &AuthToken,
        emergency: &Value,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::SendEmergency,
            Method::POST,
            "/incidents/emergency",
            token,
            emergency,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn send_report(&self, token: &AuthToken, report: &Value) -> Result<Value, ApiError> {
        self.send_json(
            Operation::SendReport,
            Method::POST,
            "/incidents/report",
            token,
            report,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn get_incident_messages(
        &self,
        token: &AuthToken,
        incident_id: IncidentId,
    ) -> Result<Value, ApiError> {
        self.get(
            Operation::FetchMessages,
            &format!("/chat/incidents/{}/messages", incident_id),
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn get_incident_messages_page(
        &self,
        token: &AuthToken,
        incident_id: IncidentId,
        page: &PageParams,
    ) -> Result<Value, ApiError> {
        self.get_with_query(
            Operation::FetchMessages,
            &format!("/chat/incidents/{}/messages", incident_id),
            &page.query_pairs(),
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn send_chat_message(
        &self,
        token: &AuthToken,
        incident_id: IncidentId,
        message: &str,
    ) -> Result<Value, ApiError> {
        let body = NewChatMessage {
            content: message.to_string(),
            incident_id,
        };
        self.send_json(
            Operation::SendMessage,
            Method::POST,
            "/chat/messages",
            token,
            &body,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn send_emergency_chat(
        &self,
        token: &AuthToken,
        content: &str,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::SendEmergencyChat,
            Method::POST,
            "/chat/emergency",
            token,
            &EmergencyChat::new(content),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn mark_message_read(
        &self,
        token: &AuthToken,
        message_id: MessageId,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::MarkMessageRead,
            Method::PUT,
            &format!("/chat/messages/{}", message_id),
            token,
            &MessageReadUpdate { is_read: true },
            StatusPolicy::Checked,
        )
        .await
    }

    async fn current_user(&self, token: &AuthToken) -> Result<Value, ApiError> {
        self.get(
            Operation::CurrentUser,
            "/users/me",
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn update_current_user(
        &self,
        token: &AuthToken,
        update: &Value,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::UpdateCurrentUser,
            Method::PUT,
            "/users/me",
            token,
            update,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn list_users(&self, token: &AuthToken, page: &PageParams) -> Result<Value, ApiError> {
        self.get_with_query(
            Operation::ListUsers,
            "/users",
            &page.query_pairs(),
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn get_user(&self, token: &AuthToken, id: UserId) -> Result<Value, ApiError> {
        self.get(
            Operation::GetUser,
            &format!("/users/{}", id),
            Some(token),
            StatusPolicy::Checked,
        )
        .await
    }

    async fn update_user(
        &self,
        token: &AuthToken,
        id: UserId,
        update: &Value,
    ) -> Result<Value, ApiError> {
        self.send_json(
            Operation::UpdateUser,
            Method::PUT,
            &format!("/users/{}", id),
            token,
            update,
            StatusPolicy::Checked,
        )
        .await
    }

    async fn delete_user(&self, token: &AuthToken, id: UserId) -> Result<Value, ApiError> {
        self.delete(Operation::DeleteUser, &format!("/users/{}", id), token)
            .await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get(Operation::Health, "/health", None, StatusPolicy::Checked)
            .await
    }
}
