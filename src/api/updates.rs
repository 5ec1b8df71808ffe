use std::sync::Arc;

use serde::Serialize;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{AllowedUpdate, Field, InputFile, Update, WebhookInfo};
use crate::utils::{check_len, check_opt_range};

/// Parameters of getUpdates
///
/// `allowed_updates` distinguishes "not sent" (keep the previous setting)
/// from an explicit empty list (all update kinds except a few opt-in ones).
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetUpdatesRequest {
    /// Identifier of the first update to return; pass `last update_id + 1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// 1-100, defaults to 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Long polling timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub allowed_updates: Field<Vec<AllowedUpdate>>,
}

impl GetUpdatesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn timeout(mut self, timeout: u32) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn allowed_updates(mut self, allowed_updates: Vec<AllowedUpdate>) -> Self {
        self.allowed_updates = Field::Value(allowed_updates);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_range("limit", self.limit, 1, 100)
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SetWebhookRequest {
    /// HTTPS URL to send updates to; an empty string removes the webhook
    pub url: String,
    /// Public key certificate for self-signed setups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// 1-100, defaults to 40
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub allowed_updates: Field<Vec<AllowedUpdate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
    /// Sent back in the `X-Telegram-Bot-Api-Secret-Token` header of every webhook call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
}

impl SetWebhookRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            certificate: None,
            ip_address: None,
            max_connections: None,
            allowed_updates: Field::Absent,
            drop_pending_updates: None,
            secret_token: None,
        }
    }

    pub fn secret_token(mut self, secret_token: impl Into<String>) -> Self {
        self.secret_token = Some(secret_token.into());
        self
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = Some(max_connections);
        self
    }

    pub fn drop_pending_updates(mut self) -> Self {
        self.drop_pending_updates = Some(true);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_range("max_connections", self.max_connections, 1, 100)?;
        if let Some(secret_token) = &self.secret_token {
            check_len("secret_token", secret_token, 1, 256)?;
            if !secret_token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(TelegramError::validation(
                    "secret_token may only contain A-Z, a-z, 0-9, _ and -",
                ));
            }
        }
        Ok(())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteWebhookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}

impl DeleteWebhookRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drop_pending_updates(mut self) -> Self {
        self.drop_pending_updates = Some(true);
        self
    }
}

/// Update retrieval and webhook management
pub struct UpdatesApi {
    context: Arc<BotContext>,
}

impl UpdatesApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// Receive incoming updates using long polling.
    ///
    /// POST getUpdates
    pub async fn get_updates(
        &self,
        request: &GetUpdatesRequest,
    ) -> Result<Vec<Update>, TelegramError> {
        request.validate()?;
        self.context.client.post("getUpdates", request).await
    }

    /// Specify a URL to receive updates via an outgoing webhook.
    ///
    /// POST setWebhook
    pub async fn set_webhook(&self, request: &SetWebhookRequest) -> Result<bool, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = request.certificate.iter().collect();
        self.context
            .client
            .post_with_files("setWebhook", request, &files)
            .await
    }

    /// Remove the webhook integration.
    ///
    /// POST deleteWebhook
    pub async fn delete_webhook(
        &self,
        request: &DeleteWebhookRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("deleteWebhook", request).await
    }

    /// Get the current webhook status.
    ///
    /// GET getWebhookInfo
    pub async fn get_webhook_info(&self) -> Result<WebhookInfo, TelegramError> {
        self.context.client.get("getWebhookInfo").await
    }
}

impl BotApi for UpdatesApi {
    fn api_name(&self) -> &'static str {
        "updates"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
