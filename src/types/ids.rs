use std::fmt;

use serde::{Deserialize, Serialize};

/// Bot authentication token issued by @BotFather (`<bot_id>:<secret>`)
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BotToken(String);

impl BotToken {
    pub fn new(token: impl Into<String>) -> Result<Self, String> {
        let token = token.into();
        let (id, secret) = token
            .split_once(':')
            .ok_or_else(|| "BotToken must have the form <bot_id>:<secret>".to_string())?;
        if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
            return Err("BotToken bot id must be numeric".to_string());
        }
        if secret.is_empty() {
            return Err("BotToken secret must not be empty".to_string());
        }
        if token
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#')
        {
            return Err("BotToken contains characters not allowed in a URL path".to_string());
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric id of the bot, taken from the token prefix.
    pub fn bot_id(&self) -> Option<i64> {
        self.0.split_once(':').and_then(|(id, _)| id.parse().ok())
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bot_id() {
            Some(id) => write!(f, "BotToken({id}:[REDACTED])"),
            None => f.write_str("BotToken([REDACTED])"),
        }
    }
}

/// Target chat: a numeric id or a `@channelusername`.
///
/// Textual identifiers are sent verbatim, so `"123"` encodes as the JSON
/// string `"123"` while `123` encodes as a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<i32> for ChatId {
    fn from(id: i32) -> Self {
        ChatId::Id(i64::from(id))
    }
}

impl From<&str> for ChatId {
    fn from(username: &str) -> Self {
        ChatId::Username(username.to_string())
    }
}

impl From<String> for ChatId {
    fn from(username: String) -> Self {
        ChatId::Username(username)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(username) => f.write_str(username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_token_valid() {
        let token = BotToken::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11").unwrap();
        assert_eq!(token.as_str(), "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11");
        assert_eq!(token.bot_id(), Some(123456));
    }

    #[test]
    fn test_bot_token_missing_separator() {
        let result = BotToken::new("123456ABC");
        assert!(result.unwrap_err().contains("<bot_id>:<secret>"));
    }

    #[test]
    fn test_bot_token_non_numeric_id() {
        assert!(BotToken::new("abc:secret").is_err());
        assert!(BotToken::new(":secret").is_err());
    }

    #[test]
    fn test_bot_token_empty_secret() {
        assert!(BotToken::new("123456:").is_err());
    }

    #[test]
    fn test_bot_token_rejects_path_characters() {
        assert!(BotToken::new("123456:abc/def").is_err());
        assert!(BotToken::new("123456:abc def").is_err());
    }

    #[test]
    fn test_bot_token_debug_redacts_secret() {
        let token = BotToken::new("123456:super-secret").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("123456"));
    }

    #[test]
    fn test_chat_id_serialization() {
        assert_eq!(serde_json::to_value(ChatId::from(-1001234)).unwrap(), -1001234);
        assert_eq!(serde_json::to_value(ChatId::from("123")).unwrap(), "123");
        assert_eq!(
            serde_json::to_value(ChatId::from("@channel")).unwrap(),
            "@channel"
        );
    }

    #[test]
    fn test_chat_id_display() {
        assert_eq!(ChatId::from(42).to_string(), "42");
        assert_eq!(ChatId::from("@channel").to_string(), "@channel");
    }
}
