//! Long-polling update loop.

use super::Bot;
use crate::cursor::UpdateCursor;
use crate::handler::Handler;
use bale_core::{
    config::{BotConfig, HandlerErrorPolicy},
    error::CycleError,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info};

/// Polling knobs, usually taken from [`BotConfig`].
#[derive(Debug, Clone)]
pub struct PollingConfig {
    /// Server-side wait passed to `getUpdates`.
    pub poll_timeout_secs: u64,
    /// Pause after a failed cycle.
    pub retry_delay: Duration,
    pub on_handler_error: HandlerErrorPolicy,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::from(&BotConfig::default())
    }
}

impl From<&BotConfig> for PollingConfig {
    fn from(config: &BotConfig) -> Self {
        Self {
            poll_timeout_secs: config.poll_timeout_secs,
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            on_handler_error: config.on_handler_error,
        }
    }
}

/// What one successful cycle did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Updates returned by `getUpdates`.
    pub received: usize,
    /// Updates the handler accepted.
    pub handled: usize,
    /// Updates the handler failed on (only under `HandlerErrorPolicy::Continue`).
    pub failed: usize,
}

/// Drives `getUpdates` → cursor → handler for one bot.
///
/// The poller owns the cursor; handlers only get the `Bot`.
pub struct Poller<H> {
    bot: Bot,
    handler: H,
    cursor: UpdateCursor,
    config: PollingConfig,
}

impl<H: Handler> Poller<H> {
    pub fn new(bot: Bot, handler: H, config: PollingConfig) -> Self {
        Self {
            bot,
            handler,
            cursor: UpdateCursor::new(),
            config,
        }
    }

    pub fn cursor(&self) -> UpdateCursor {
        self.cursor
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Fetch one batch and dispatch it in order.
    ///
    /// The cursor moves past each update before its handler runs, so a
    /// failing update is never redelivered.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let updates = self
            .bot
            .get_updates(self.cursor.offset(), self.config.poll_timeout_secs)
            .await?;

        let mut outcome = CycleOutcome {
            received: updates.len(),
            ..Default::default()
        };

        for update in &updates {
            self.cursor.advance(update.update_id);

            match self.handler.handle(&self.bot, update).await {
                Ok(()) => outcome.handled += 1,
                Err(e) => match self.config.on_handler_error {
                    HandlerErrorPolicy::Continue => {
                        error!("❌ handler failed on update {}: {e}", update.update_id);
                        outcome.failed += 1;
                    }
                    HandlerErrorPolicy::AbortBatch => {
                        return Err(CycleError::Handler {
                            update_id: update.update_id,
                            source: e,
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Failed cycles are logged and followed by a fixed `retry_delay`; they
    /// never end the loop. `shutdown` is observed at every suspension point
    /// (fetch, handler, retry delay). The session is closed before returning.
    pub async fn long_polling<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.bot.open().await;
        info!("🤖 bale polling started at offset {}", self.cursor.offset());

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                result = self.poll_once() => match result {
                    Ok(outcome) => {
                        if outcome.received > 0 {
                            debug!(
                                "cycle done: {} received, {} handled, {} failed, offset {}",
                                outcome.received,
                                outcome.handled,
                                outcome.failed,
                                self.cursor.offset()
                            );
                        }
                    }
                    Err(e) => {
                        error!(
                            "❌ polling error (retry in {}s): {e}",
                            self.config.retry_delay.as_secs()
                        );
                        tokio::select! {
                            biased;
                            _ = &mut shutdown => break,
                            _ = tokio::time::sleep(self.config.retry_delay) => {}
                        }
                    }
                },
            }
        }

        self.bot.close().await;
        info!("bale polling stopped at offset {}", self.cursor.offset());
    }
}
