//! # bale-client
//!
//! Bale Bot API client: an HTTP transport over one reusable session, a
//! long-polling loop with offset tracking, and typed send helpers.
//! The Bot API is Telegram-compatible: <https://docs.bale.ai>

pub mod bot;
pub mod cursor;
pub mod handler;
pub mod keyboard;
pub mod transport;

pub use bot::{Bot, MediaKind};
pub use bot::polling::{CycleOutcome, Poller, PollingConfig};
pub use cursor::UpdateCursor;
pub use handler::{EchoHandler, Handler};
pub use transport::{HttpTransport, Session};
