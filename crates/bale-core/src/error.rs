use thiserror::Error;

/// Top-level error type for setup and one-shot calls.
#[derive(Debug, Error)]
pub enum BaleError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Error from the Bot API transport.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure of a single request/response exchange with the Bot API.
///
/// Never retried by the transport itself; the polling loop decides what to do.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connect, timeout, or body read failure. The request URL is stripped.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx HTTP status.
    #[error("http status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not JSON, or not the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The API answered `"ok": false`.
    #[error("api error {}: {description}", .code.unwrap_or_default())]
    Api {
        code: Option<i64>,
        description: String,
    },
}

/// Failure raised by an update handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A reply or other API call made by the handler failed.
    #[error("reply failed: {0}")]
    Transport(#[from] TransportError),

    /// Application-level failure.
    #[error("{0}")]
    Failed(String),
}

/// Failure of one polling iteration. Always recovered by the loop.
#[derive(Debug, Error)]
pub enum CycleError {
    /// `getUpdates` failed.
    #[error("fetch failed: {0}")]
    Transport(#[from] TransportError),

    /// The handler failed and the batch was aborted.
    #[error("handler failed on update {update_id}: {source}")]
    Handler {
        update_id: i64,
        #[source]
        source: HandlerError,
    },
}
