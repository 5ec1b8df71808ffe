use std::sync::Arc;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::User;

/// Bot identity and session API
pub struct AccountApi {
    context: Arc<BotContext>,
}

impl AccountApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// Basic information about the bot. Useful for testing the token.
    ///
    /// GET getMe
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.context.client.get("getMe").await
    }

    /// Log out from the cloud Bot API server before moving to a local one.
    ///
    /// GET logOut
    pub async fn log_out(&self) -> Result<bool, TelegramError> {
        self.context.client.get("logOut").await
    }

    /// Close the bot instance before moving it between local servers.
    ///
    /// GET close
    pub async fn close(&self) -> Result<bool, TelegramError> {
        self.context.client.get("close").await
    }
}

impl BotApi for AccountApi {
    fn api_name(&self) -> &'static str {
        "account"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
