//! Telegram HTTP Client module
//!
//! This module contains the TelegramClient, the unified Bot facade and their
//! builders.

mod telegram_client;
pub use telegram_client::{TelegramClient, TelegramClientBuilder};

pub(crate) mod request;

mod bot;
pub use bot::{Bot, API_URL_ENV, TOKEN_ENV};

mod builder;
pub use builder::BotBuilder;
