//! HTTP client for the tarefas backend.
//!
//! One method per REST endpoint. The only status the UI distinguishes is
//! 409 on create/update (duplicate task); everything else collapses into
//! the generic variants of [`ApiError`].

use std::fmt;

use log::debug;
use reqwest::StatusCode;

use super::types::{Tarefa, TarefaPayload};

/// Errors from talking to the backend.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// HTTP 409 on create/update: a task with colliding identity exists.
    Conflict,
    /// Any other non-success status.
    Api { status: u16, message: String },
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Conflict => write!(f, "conflict: tarefa already exists"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub struct TarefaClient {
    http: reqwest::Client,
    base_url: String,
}

impl TarefaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/tarefas", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/api/tarefas/{id}", self.base_url)
    }

    /// `GET /api/tarefas` — the full task collection, in server order.
    pub async fn list(&self) -> Result<Vec<Tarefa>, ApiError> {
        debug!("GET {}", self.collection_url());
        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = Self::check_status(response, false).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `POST /api/tarefas` — create a task; the server assigns `id` and `ordem`.
    pub async fn create(&self, payload: &TarefaPayload) -> Result<Tarefa, ApiError> {
        debug!("POST {} nome={:?}", self.collection_url(), payload.nome);
        let response = self
            .http
            .post(self.collection_url())
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = Self::check_status(response, true).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `PUT /api/tarefas/{id}` — update a task; returns the full updated record.
    pub async fn update(&self, id: i64, payload: &TarefaPayload) -> Result<Tarefa, ApiError> {
        debug!("PUT {} nome={:?}", self.item_url(id), payload.nome);
        let response = self
            .http
            .put(self.item_url(id))
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = Self::check_status(response, true).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `DELETE /api/tarefas/{id}` — no body expected on success.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!("DELETE {}", self.item_url(id));
        let response = self
            .http
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check_status(response, false).await?;
        Ok(())
    }

    /// Maps non-success statuses to `ApiError`. 409 only means "duplicate"
    /// on the save endpoints, so the caller says whether it applies.
    async fn check_status(
        response: reqwest::Response,
        conflict_is_duplicate: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if conflict_is_duplicate && status == StatusCode::CONFLICT {
            return Err(ApiError::Conflict);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TarefaClient::new("http://localhost:8080/");
        assert_eq!(client.collection_url(), "http://localhost:8080/api/tarefas");
        assert_eq!(client.item_url(4), "http://localhost:8080/api/tarefas/4");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 500): boom");
        assert!(ApiError::Conflict.to_string().contains("conflict"));
    }
}
