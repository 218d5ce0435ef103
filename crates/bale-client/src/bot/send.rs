//! API surface: one method per Bot API verb.
//!
//! Each builds the minimal payload and delegates to the transport. The
//! decoded response is returned as-is, including `"ok": false` payloads.

use super::{Bot, MediaKind};
use bale_core::{
    error::TransportError,
    message::{Message, Update},
    traits::MediaUpload,
};
use serde_json::{json, Map, Value};
use tracing::warn;

impl Bot {
    /// Long-poll for updates at or after `offset`.
    ///
    /// A missing `result` is an empty batch. `"ok": false` becomes
    /// `TransportError::Api`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TransportError> {
        let params = json!({ "offset": offset, "timeout": timeout_secs });
        let body = self.transport.fetch("getUpdates", Some(&params)).await?;
        parse_updates(body)
    }

    pub async fn get_me(&self) -> Result<Value, TransportError> {
        self.transport.fetch("getMe", None).await
    }

    pub async fn get_chat(&self, chat_id: i64) -> Result<Value, TransportError> {
        self.transport
            .fetch("getChat", Some(&json!({ "chat_id": chat_id })))
            .await
    }

    /// Send a text message, optionally with a keyboard from [`crate::keyboard`].
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.transport
            .send("sendMessage", &message_payload(chat_id, text, reply_markup))
            .await
    }

    pub async fn forward_message(
        &self,
        chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<Value, TransportError> {
        let payload = json!({
            "chat_id": chat_id,
            "from_chat_id": from_chat_id,
            "message_id": message_id,
        });
        self.transport.send("forwardMessage", &payload).await
    }

    pub async fn delete_message(
        &self,
        chat_id: i64,
        message_id: i64,
    ) -> Result<Value, TransportError> {
        let payload = json!({ "chat_id": chat_id, "message_id": message_id });
        self.transport.send("deleteMessage", &payload).await
    }

    /// Send media by reference: a `file_id` the server already has, or a URL.
    pub async fn send_media(
        &self,
        kind: MediaKind,
        chat_id: i64,
        media: &str,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.transport
            .send(kind.method(), &media_payload(kind, chat_id, media, caption))
            .await
    }

    /// Send a local file as `multipart/form-data`.
    pub async fn upload_media(
        &self,
        kind: MediaKind,
        chat_id: i64,
        file: MediaUpload,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        let mut fields = vec![("chat_id".to_string(), chat_id.to_string())];
        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            fields.push(("caption".to_string(), caption.to_string()));
        }
        self.transport
            .upload(kind.method(), &fields, kind.field(), file)
            .await
    }

    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: &str,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.send_media(MediaKind::Photo, chat_id, photo, caption).await
    }

    pub async fn send_document(
        &self,
        chat_id: i64,
        document: &str,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.send_media(MediaKind::Document, chat_id, document, caption)
            .await
    }

    pub async fn send_audio(
        &self,
        chat_id: i64,
        audio: &str,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.send_media(MediaKind::Audio, chat_id, audio, caption).await
    }

    pub async fn send_voice(
        &self,
        chat_id: i64,
        voice: &str,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.send_media(MediaKind::Voice, chat_id, voice, caption).await
    }

    pub async fn send_video(
        &self,
        chat_id: i64,
        video: &str,
        caption: Option<&str>,
    ) -> Result<Value, TransportError> {
        self.send_media(MediaKind::Video, chat_id, video, caption).await
    }

    pub async fn send_location(
        &self,
        chat_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<Value, TransportError> {
        let payload = json!({
            "chat_id": chat_id,
            "latitude": latitude,
            "longitude": longitude,
        });
        self.transport.send("sendLocation", &payload).await
    }
}

/// `reply_markup` is left out entirely when absent, null, or empty.
pub(crate) fn message_payload(chat_id: i64, text: &str, reply_markup: Option<Value>) -> Value {
    let mut payload = Map::new();
    payload.insert("chat_id".into(), json!(chat_id));
    payload.insert("text".into(), json!(text));
    if let Some(markup) = reply_markup.filter(|m| !is_empty_value(m)) {
        payload.insert("reply_markup".into(), markup);
    }
    Value::Object(payload)
}

pub(crate) fn media_payload(
    kind: MediaKind,
    chat_id: i64,
    media: &str,
    caption: Option<&str>,
) -> Value {
    let mut payload = Map::new();
    payload.insert("chat_id".into(), json!(chat_id));
    payload.insert(kind.field().into(), json!(media));
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        payload.insert("caption".into(), json!(caption));
    }
    Value::Object(payload)
}

pub(crate) fn parse_updates(body: Value) -> Result<Vec<Update>, TransportError> {
    if body.get("ok").and_then(Value::as_bool) == Some(false) {
        return Err(TransportError::Api {
            code: body.get("error_code").and_then(Value::as_i64),
            description: body
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("no description")
                .to_string(),
        });
    }

    let items = match body.get("result") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(TransportError::Decode(format!(
                "getUpdates: result is not a list: {other}"
            )))
        }
    };

    Ok(items.iter().filter_map(decode_update).collect())
}

/// Only `update_id` is required. An off-schema message still yields an
/// update (with `message: None`) so the cursor can move past it.
fn decode_update(item: &Value) -> Option<Update> {
    let Some(update_id) = item.get("update_id").and_then(Value::as_i64) else {
        warn!("getUpdates: dropping item without an integer update_id: {item}");
        return None;
    };

    let message = match item.get("message") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<Message>(raw.clone()) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!("update {update_id}: undecodable message, passing it on without one: {e}");
                None
            }
        },
    };

    Some(Update { update_id, message })
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
