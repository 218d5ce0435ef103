//! HTTP transport: every Bot API call goes through one reusable `reqwest` session.

use async_trait::async_trait;
use bale_core::{
    config::BotConfig,
    error::TransportError,
    sanitize::{mask_token, redact},
    traits::{MediaUpload, Transport},
};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The reusable connection resource. Opened lazily, closed at most once per open.
pub struct Session {
    client: Option<reqwest::Client>,
    timeout: Duration,
    opened: u64,
}

impl Session {
    /// A session that is not yet open; `timeout` applies to every request.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: None,
            timeout,
            opened: 0,
        }
    }

    /// Return the live client, creating it if the session is not open.
    ///
    /// `reqwest::Client` is a handle over a shared pool, so the clone is the
    /// same connection resource.
    pub fn ensure_open(&mut self) -> Result<reqwest::Client, TransportError> {
        if let Some(ref client) = self.client {
            return Ok(client.clone());
        }
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to open session: {e}")))?;
        self.opened += 1;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Drop the client. Returns `false` if the session was already closed.
    pub fn close(&mut self) -> bool {
        self.client.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// How many clients this session has created over its lifetime.
    pub fn opened_count(&self) -> u64 {
        self.opened
    }
}

/// `Transport` over HTTPS to `{base_url}{token}/{method}`.
pub struct HttpTransport {
    base_url: String,
    token: String,
    session: Mutex<Session>,
}

impl HttpTransport {
    /// Build a transport from the bot config. No connection is made yet.
    pub fn new(config: &BotConfig) -> Self {
        Self::with_endpoint(
            &config.base_url,
            &config.token,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_endpoint(base_url: &str, token: &str, request_timeout: Duration) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
            session: Mutex::new(Session::new(request_timeout)),
        }
    }

    pub async fn is_open(&self) -> bool {
        self.session.lock().await.is_open()
    }

    pub async fn opened_count(&self) -> u64 {
        self.session.lock().await.opened_count()
    }

    fn url(&self, method: &str) -> String {
        format!("{}{}/{}", self.base_url, self.token, method)
    }

    async fn client(&self) -> Result<reqwest::Client, TransportError> {
        self.session.lock().await.ensure_open()
    }

    /// reqwest puts the URL (and with it the token) into its error text.
    fn network_error(&self, method: &str, e: reqwest::Error) -> TransportError {
        let e = e.without_url();
        TransportError::Network(redact(&format!("{method}: {e}"), &self.token))
    }

    async fn decode(&self, method: &str, resp: reqwest::Response) -> Result<Value, TransportError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| self.network_error(method, e))?;
        debug!("bale {method} -> {status} ({} bytes)", body.len());

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: redact(&body, &self.token),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportError::Decode(format!("{method}: body is not JSON: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, method: &str, params: Option<&Value>) -> Result<Value, TransportError> {
        let client = self.client().await?;
        let mut request = client.get(self.url(method));
        if let Some(params) = params {
            request = request.query(params);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| self.network_error(method, e))?;
        self.decode(method, resp).await
    }

    async fn send(&self, method: &str, payload: &Value) -> Result<Value, TransportError> {
        let client = self.client().await?;
        let resp = client
            .post(self.url(method))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.network_error(method, e))?;
        self.decode(method, resp).await
    }

    async fn upload(
        &self,
        method: &str,
        fields: &[(String, String)],
        file_field: &str,
        file: MediaUpload,
    ) -> Result<Value, TransportError> {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)
            .map_err(|e| TransportError::Decode(format!("{method}: bad mime type: {e}")))?;

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        let form = form.part(file_field.to_string(), part);

        let client = self.client().await?;
        let resp = client
            .post(self.url(method))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.network_error(method, e))?;
        self.decode(method, resp).await
    }

    async fn open(&self) {
        let mut session = self.session.lock().await;
        if session.is_open() {
            return;
        }
        match session.ensure_open() {
            Ok(_) => info!("bale session opened (token {})", mask_token(&self.token)),
            Err(e) => warn!("{e}; will retry on first call"),
        }
    }

    async fn close(&self) -> bool {
        let closed = self.session.lock().await.close();
        if closed {
            info!("bale session closed");
        }
        closed
    }
}
