//! Reply-markup builders.
//!
//! Both are pure wrappers: the button rows pass through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One inline button. Set exactly one of `url` or `callback_data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    /// A button that opens `url`.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
        }
    }

    /// A button that sends `data` back to the bot as a callback query.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
        }
    }
}

/// `{"inline_keyboard": rows}`.
pub fn make_inline_keyboard(rows: Vec<Vec<InlineKeyboardButton>>) -> Value {
    json!({ "inline_keyboard": rows })
}

/// `{"keyboard": rows, "resize_keyboard": resize, "one_time_keyboard": one_time}`.
pub fn make_reply_keyboard(rows: Vec<Vec<String>>, resize: bool, one_time: bool) -> Value {
    json!({
        "keyboard": rows,
        "resize_keyboard": resize,
        "one_time_keyboard": one_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_keyboard_passthrough() {
        let kb = make_inline_keyboard(vec![vec![InlineKeyboardButton::url("A", "http://x")]]);
        assert_eq!(
            kb,
            json!({"inline_keyboard": [[{"text": "A", "url": "http://x"}]]})
        );
    }

    #[test]
    fn test_inline_keyboard_rows_and_callbacks() {
        let kb = make_inline_keyboard(vec![
            vec![InlineKeyboardButton::url("site", "https://pegah.ir")],
            vec![
                InlineKeyboardButton::callback("contact", "contact"),
                InlineKeyboardButton::callback("help", "help"),
            ],
        ]);
        let rows = kb["inline_keyboard"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], json!({"text": "contact", "callback_data": "contact"}));
        assert!(rows[1][1].get("url").is_none());
    }

    #[test]
    fn test_inline_button_decodes_from_json() {
        let button: InlineKeyboardButton =
            serde_json::from_str(r#"{"text": "A", "callback_data": "a"}"#).unwrap();
        assert_eq!(button, InlineKeyboardButton::callback("A", "a"));
    }

    #[test]
    fn test_reply_keyboard_shape() {
        let kb = make_reply_keyboard(
            vec![
                vec!["option 1".into(), "option 2".into()],
                vec!["cancel".into()],
            ],
            true,
            false,
        );
        assert_eq!(
            kb,
            json!({
                "keyboard": [["option 1", "option 2"], ["cancel"]],
                "resize_keyboard": true,
                "one_time_keyboard": false,
            })
        );
    }
}
