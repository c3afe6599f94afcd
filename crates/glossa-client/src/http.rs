//! JSON-over-HTTP client for the annotation backend.
//!
//! The backend owns persistence, AI inference, and validation; this
//! client is a thin typed consumer of four endpoints: fetch content,
//! list labels, create annotation, delete annotation. Failures surface
//! as [`ApiError`] — callers decide what to show the user; nothing is
//! swallowed here.

use glossa_core::{ContentPayload, Label, NewAnnotation, Span, SpanId};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the annotation backend's content and annotation endpoints.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given backend base URL.
    ///
    /// `base_url` should be like `http://localhost:4000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a content unit's text and its existing spans.
    pub async fn fetch_content(&self, content_id: &str) -> Result<ContentPayload, ApiError> {
        let url = format!("{}/api/contents/{}", self.base_url, content_id);

        info!(url = %url, "fetching content");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ContentPayload = resp.json().await?;
        info!(
            chars = payload.content.chars().count(),
            spans = payload.spans.len(),
            "fetched content"
        );
        Ok(payload)
    }

    /// Fetch the label set for a content unit.
    ///
    /// Labels are fetched once per session and never mutated locally.
    pub async fn list_labels(&self, content_id: &str) -> Result<Vec<Label>, ApiError> {
        let url = format!("{}/api/contents/{}/labels", self.base_url, content_id);

        info!(url = %url, "listing labels");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let labels: Vec<Label> = resp.json().await?;
        info!(count = labels.len(), "listed labels");
        Ok(labels)
    }

    /// Create an annotation; returns the span with its backend-assigned id.
    ///
    /// Callers render the new highlight only after this returns.
    pub async fn create_annotation(
        &self,
        content_id: &str,
        request: &NewAnnotation,
    ) -> Result<Span, ApiError> {
        let url = format!("{}/api/contents/{}/annotations", self.base_url, content_id);

        info!(url = %url, start = request.start, end = request.end, "creating annotation");
        let resp = self.client.post(&url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let span: Span = resp.json().await?;
        info!(id = %span.id, "annotation created");
        Ok(span)
    }

    /// Delete an annotation by id.
    ///
    /// Callers drop the span from local state only on success.
    pub async fn delete_annotation(&self, span_id: &SpanId) -> Result<(), ApiError> {
        let url = format!("{}/api/annotations/{}", self.base_url, span_id);

        info!(url = %url, "deleting annotation");
        let resp = self.client.delete(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        info!(id = %span_id, "annotation deleted");
        Ok(())
    }
}
