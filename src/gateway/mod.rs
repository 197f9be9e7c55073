//! The single path to the backend. Every call goes through
//! [`RequestGateway::send`], which reads the current token from the
//! [`SessionStore`], shapes the request with [`OutgoingRequest::build`] and
//! normalizes the outcome. The gateway never mutates the session.

pub mod request;
pub mod response;

use crate::{
    APP_USER_AGENT,
    config::{AppConfig, build_url},
    errors::{AppError, NormalizedResult},
    session::SessionStore,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

pub use request::{Body, FilePart, Method, MultipartForm, OutgoingRequest, Payload};

#[derive(Clone, Debug)]
pub struct RequestGateway {
    client: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl RequestGateway {
    /// Builds a gateway with the configured base URL and timeout.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Describes the request `send` would dispatch, using the current session.
    #[must_use]
    pub fn prepare(&self, endpoint: &str, method: Method, payload: Payload) -> OutgoingRequest {
        let session = self.session.current();
        OutgoingRequest::build(endpoint, method, payload, session.token())
    }

    /// Sends one call and returns the backend body verbatim on success.
    ///
    /// # Errors
    /// Returns `AppError::Transport`/`Timeout` when no response arrives and
    /// `AppError::Backend` for non-2xx responses.
    pub async fn send(
        &self,
        endpoint: &str,
        method: Method,
        payload: Payload,
    ) -> NormalizedResult<Value> {
        let request = self.prepare(endpoint, method, payload);
        let span = info_span!(
            "api.request",
            http.method = %method,
            path = %request.endpoint
        );

        async {
            let result = self.dispatch(request).await;
            match &result {
                Ok(_) => debug!("request succeeded"),
                Err(err) => warn!(status = ?err.status_code(), "request failed: {}", err.message()),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Sends one call and decodes the success body into `T`.
    ///
    /// # Errors
    /// Same as [`RequestGateway::send`], plus `AppError::Parse` when the body
    /// does not match `T`.
    pub async fn send_as<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        method: Method,
        payload: Payload,
    ) -> NormalizedResult<T> {
        let body = self.send(endpoint, method, payload).await?;
        decode(body)
    }

    async fn dispatch(&self, request: OutgoingRequest) -> NormalizedResult<Value> {
        let url = build_url(&self.base_url, &request.endpoint);
        let mut builder = self.client.request(request.method.into(), &url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            Body::None => builder,
            Body::Json(value) => {
                let encoded = serde_json::to_vec(&value).map_err(|err| {
                    AppError::Serialization(format!("Failed to encode request: {err}"))
                })?;
                builder.body(encoded)
            }
            Body::Multipart(form) => {
                let form = form.into_reqwest().map_err(|err| {
                    AppError::Serialization(format!("Failed to build multipart form: {err}"))
                })?;
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|err| response::transport_failure(&err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| response::transport_failure(&err))?;

        if status.is_success() {
            Ok(response::success_body(&body))
        } else {
            Err(response::backend_failure(status.as_u16(), &body))
        }
    }
}

/// Decodes a success payload into a typed value.
///
/// # Errors
/// Returns `AppError::Parse` when the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(body: Value) -> NormalizedResult<T> {
    serde_json::from_value(body)
        .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Rejects a 2xx body that reports `success: false`, keeping its message.
///
/// # Errors
/// Returns `AppError::Backend` with the given status when the body reports failure.
pub fn ensure_success(body: Value, status: u16, fallback: &str) -> NormalizedResult<Value> {
    if response::reports_failure(&body) {
        let message = response::error_message(&body).unwrap_or_else(|| fallback.to_string());
        return Err(AppError::Backend { status, message });
    }
    Ok(body)
}
