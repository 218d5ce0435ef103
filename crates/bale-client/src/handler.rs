//! Update handlers.

use crate::bot::Bot;
use crate::keyboard::{make_inline_keyboard, InlineKeyboardButton};
use async_trait::async_trait;
use bale_core::{config::EchoConfig, error::HandlerError, message::Update};
use tracing::{debug, info};

/// Consumes one update at a time, in the order the server returned them.
///
/// There is no timeout around `handle`: a handler that never returns stalls
/// the polling loop. The handler never sees or moves the offset cursor.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, bot: &Bot, update: &Update) -> Result<(), HandlerError>;
}

/// Acknowledges every text it receives, quoting it back with a link button.
pub struct EchoHandler {
    button_text: String,
    button_url: String,
}

impl EchoHandler {
    pub fn new(config: &EchoConfig) -> Self {
        Self {
            button_text: config.button_text.clone(),
            button_url: config.button_url.clone(),
        }
    }

    /// Reply text for an incoming message body.
    pub fn reply_text(text: &str) -> String {
        format!("پیامت رسید ✅\nمتنت: {text}")
    }
}

impl Default for EchoHandler {
    fn default() -> Self {
        Self::new(&EchoConfig::default())
    }
}

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, bot: &Bot, update: &Update) -> Result<(), HandlerError> {
        let Some(ref msg) = update.message else {
            debug!("update {} has no message, skipping", update.update_id);
            return Ok(());
        };

        let chat_id = msg.chat.id;
        let text = msg.text.as_deref().unwrap_or_default();
        info!("received {text:?} from {chat_id}");

        let keyboard = make_inline_keyboard(vec![vec![InlineKeyboardButton::url(
            self.button_text.as_str(),
            self.button_url.as_str(),
        )]]);
        bot.send_message(chat_id, &Self::reply_text(text), Some(keyboard))
            .await?;
        Ok(())
    }
}
