use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;

/// A local file sent as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Request/response exchange with the Bot API — the single seam every call
/// funnels through.
///
/// Implementations hold no state beyond a reusable connection resource and
/// never retry. Results are the decoded JSON body, returned as-is.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `{base}{token}/{method}` with `params` as the query string.
    async fn fetch(&self, method: &str, params: Option<&Value>) -> Result<Value, TransportError>;

    /// POST `{base}{token}/{method}` with `payload` as a JSON body.
    async fn send(&self, method: &str, payload: &Value) -> Result<Value, TransportError>;

    /// POST `{base}{token}/{method}` as a multipart form: text `fields` plus
    /// `file` under `file_field`.
    async fn upload(
        &self,
        method: &str,
        fields: &[(String, String)],
        file_field: &str,
        file: MediaUpload,
    ) -> Result<Value, TransportError>;

    /// Establish the connection resource. Idempotent.
    async fn open(&self) {}

    /// Release the connection resource. Returns `true` only if something was
    /// actually released.
    async fn close(&self) -> bool {
        false
    }
}
