//! Bot API trait and context
//!
//! Provides the base trait and context for all Bot API categories.

use std::sync::Arc;

use crate::client::TelegramClient;

/// Context holding shared resources for Bot API implementations.
#[derive(Clone)]
pub struct BotContext {
    /// The HTTP client bound to the bot token
    pub(crate) client: Arc<TelegramClient>,
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("client", &"TelegramClient { .. }")
            .finish()
    }
}

impl BotContext {
    /// Create a new BotContext
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the Telegram HTTP client.
    pub fn client(&self) -> &TelegramClient {
        &self.client
    }
}

/// Trait for Bot API categories.
///
/// All API modules implement this trait to provide access to the shared
/// context.
pub trait BotApi: Send + Sync {
    /// Get a reference to the bot context
    fn context(&self) -> &BotContext;

    /// Get the name of this API for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }
}
