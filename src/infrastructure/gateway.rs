use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// One model descriptor as reported by the backend. Only `name` is
/// guaranteed; the remaining fields are whatever the backend chooses to
/// attach.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl ModelInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            modified_at: None,
        }
    }
}

/// Successful reply to a chat request. The responding model may differ from
/// the one requested; the backend has the final say.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub model: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend returned status {status}")]
    Backend {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl GatewayError {
    /// Human-readable explanation supplied by the backend, when it sent one.
    /// Transport failures carry no detail; the caller substitutes its own
    /// fallback text.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Backend {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// The two remote operations this client performs, behind a trait so the
/// event loop can be driven by a stub in tests.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError>;
    async fn send_chat(&self, message: &str, model: &str) -> Result<ChatReply, GatewayError>;
}

/// HTTP gateway against the backend's fixed base address. Single-shot
/// semantics throughout: no retry, no timeout beyond the transport default,
/// no cancellation of in-flight calls.
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let trimmed = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{trimmed}/{path}")
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_models(&self) -> Result<Vec<ModelInfo>, GatewayError> {
        let url = self.endpoint("/models");
        debug!(url = %url, "Fetching model list from backend");
        let response: ModelsResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!(count = response.models.len(), "Received model list");
        Ok(response.models)
    }

    async fn send_chat(&self, message: &str, model: &str) -> Result<ChatReply, GatewayError> {
        let url = self.endpoint("/chat");
        let payload = ChatPayload { message, model };
        info!(model, url = %url, "Sending chat message to backend");

        let response = self.http.post(url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .bytes()
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
                .and_then(|body| body.detail);
            debug!(status = status.as_u16(), detail = ?detail, "Backend rejected chat request");
            return Err(GatewayError::Backend { status, detail });
        }

        let reply: ChatReply = response.json().await?;
        debug!(model = reply.model.as_str(), "Received chat reply");
        Ok(reply)
    }
}

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

/// Error body shape used by the backend on failures: `{ "detail": "..." }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}
