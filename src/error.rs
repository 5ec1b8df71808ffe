use std::sync::Arc;

use thiserror::Error;

use crate::types::ResponseParameters;

/// Transport-level failures, kept apart from API-reported errors.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Network, TLS, timeout or request-building failure reported by reqwest.
    #[error("request failed: {0}")]
    Reqwest(Arc<reqwest::Error>),

    /// Non-2xx status whose body was not a Telegram envelope.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16, body: String },
}

/// Telegram SDK error types
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(HttpError),

    #[error("failed to decode response: {message}")]
    Decode { message: String, body: String },

    #[error("Telegram API error (code={code}): {description}")]
    Api {
        code: i32,
        description: String,
        parameters: Option<ResponseParameters>,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

// The request URL carries the bot token, so it is stripped before the error
// can reach a log line.
impl From<reqwest::Error> for TelegramError {
    fn from(error: reqwest::Error) -> Self {
        TelegramError::Http(HttpError::Reqwest(Arc::new(error.without_url())))
    }
}

impl From<HttpError> for TelegramError {
    fn from(error: HttpError) -> Self {
        TelegramError::Http(error)
    }
}

impl TelegramError {
    pub(crate) fn decode(message: impl Into<String>, body: impl Into<String>) -> Self {
        TelegramError::Decode {
            message: message.into(),
            body: body.into(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TelegramError::Validation(message.into())
    }

    /// The remote `error_code`, if this is an API-reported failure.
    pub fn error_code(&self) -> Option<i32> {
        match self {
            TelegramError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Seconds to wait before repeating the request, as hinted by a 429 response.
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            TelegramError::Api {
                parameters: Some(parameters),
                ..
            } => parameters.retry_after,
            _ => None,
        }
    }

    /// The supergroup id a migrated group moved to.
    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        match self {
            TelegramError::Api {
                parameters: Some(parameters),
                ..
            } => parameters.migrate_to_chat_id,
            _ => None,
        }
    }

    /// Whether repeating the same request later may succeed.
    ///
    /// Transport failures, 5xx statuses, flood control (429) and Telegram's
    /// internal 5xx error codes are transient. A request reqwest could not
    /// build fails the same way every time. Nothing in this crate retries on
    /// its own; the classification is for callers that do.
    pub fn is_transient(&self) -> bool {
        match self {
            TelegramError::Http(HttpError::Reqwest(error)) => !error.is_builder(),
            TelegramError::Http(HttpError::Status { status, .. }) => *status >= 500,
            TelegramError::Api { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
