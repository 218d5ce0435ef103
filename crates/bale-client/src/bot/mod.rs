//! Bale Bot API client.
//!
//! `Bot` is the typed API surface; `Poller` drives long polling via
//! `getUpdates` and hands each update to a `Handler`.

pub mod polling;
mod send;


use crate::transport::HttpTransport;
use bale_core::{config::BotConfig, traits::Transport};
use std::sync::Arc;

/// Cloneable handle over one transport. Clones share the same session.
#[derive(Clone)]
pub struct Bot {
    transport: Arc<dyn Transport>,
}

impl Bot {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Create a bot talking HTTP to the configured endpoint.
    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(Arc::new(HttpTransport::new(config)))
    }

    /// Open the session ahead of the first call. Calls open it lazily anyway.
    pub async fn open(&self) {
        self.transport.open().await;
    }

    /// Release the session. Safe to call repeatedly; only the first call
    /// after an open releases anything.
    pub async fn close(&self) -> bool {
        self.transport.close().await
    }
}

/// The five media verbs that share the `(chat_id, <media>[, caption])` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Document,
    Audio,
    Voice,
    Video,
}

impl MediaKind {
    /// API method name, e.g. `sendPhoto`.
    pub fn method(self) -> &'static str {
        match self {
            Self::Photo => "sendPhoto",
            Self::Document => "sendDocument",
            Self::Audio => "sendAudio",
            Self::Voice => "sendVoice",
            Self::Video => "sendVideo",
        }
    }

    /// Payload field carrying the file reference or upload.
    pub fn field(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Voice => "voice",
            Self::Video => "video",
        }
    }
}
