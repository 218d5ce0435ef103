//! Default value functions used by serde for config deserialization.

use super::HandlerErrorPolicy;

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_base_url() -> String {
    "https://tapi.bale.ai/bot".to_string()
}

pub fn default_poll_timeout_secs() -> u64 {
    30
}

pub fn default_retry_delay_secs() -> u64 {
    3
}

pub fn default_request_timeout_secs() -> u64 {
    45
}

pub fn default_on_handler_error() -> HandlerErrorPolicy {
    HandlerErrorPolicy::Continue
}

pub fn default_echo_button_text() -> String {
    "پگاه".to_string()
}

pub fn default_echo_button_url() -> String {
    "https://pegah.ir".to_string()
}
