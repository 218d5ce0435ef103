//! Keeping the bot token out of logs and error messages.

/// Mask a secret for logging: first 7 chars + `***` + last 4.
///
/// Secrets of 11 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{head}***{tail}")
}

/// Replace every occurrence of `token` in `text` with its mask.
pub fn redact(text: &str, token: &str) -> String {
    if token.is_empty() || !text.contains(token) {
        return text.to_string();
    }
    text.replace(token, &mask_token(token))
}
