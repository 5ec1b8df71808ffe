//! Response envelope
//!
//! Every Bot API method answers with the same wrapper:
//!
//! ```json
//! { "ok": true, "result": ... }
//! { "ok": false, "error_code": 429, "description": "...", "parameters": { "retry_after": 5 } }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TelegramError;

/// Hints attached to some failed requests.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseParameters {
    /// The group has been migrated to a supergroup with this identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds left to wait before the request can be repeated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u32>,
}

/// Raw response envelope.
///
/// `ok` is required; everything else is optional on the wire and checked by
/// [`ApiResponse::into_result`].
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.ok
    }

    /// Split the envelope into the typed result or a structured failure.
    ///
    /// A success without `result`, or a failure without `error_code`, violates
    /// the envelope contract and is reported as [`TelegramError::Decode`].
    pub fn into_result(self) -> Result<T, TelegramError> {
        if self.ok {
            return self
                .result
                .ok_or_else(|| TelegramError::decode("missing `result` in successful response", ""));
        }

        let code = self.error_code.ok_or_else(|| {
            TelegramError::decode("missing `error_code` in failed response", "")
        })?;

        Err(TelegramError::Api {
            code,
            description: self
                .description
                .unwrap_or_else(|| "unknown error".to_string()),
            parameters: self.parameters,
        })
    }
}

/// Decode a raw response body into the operation's result type.
///
/// Unknown fields are ignored at every level. Malformed bodies are returned
/// as [`TelegramError::Decode`] carrying the raw payload.
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, TelegramError> {
    let envelope: ApiResponse<T> =
        serde_json::from_str(body).map_err(|e| TelegramError::decode(e.to_string(), body))?;

    envelope.into_result().map_err(|error| match error {
        TelegramError::Decode { message, .. } => TelegramError::decode(message, body),
        other => other,
    })
}
