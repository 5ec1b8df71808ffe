//! Telegram Bot API SDK for Rust
//!
//! An async client for the Telegram Bot API covering updates, messaging,
//! media uploads, chat administration, forums, inline mode, stickers,
//! payments and games.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telegram_bot_sdk::api::messages::SendMessageRequest;
//! use telegram_bot_sdk::api::updates::GetUpdatesRequest;
//! use telegram_bot_sdk::Bot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bot = Bot::from_env()?;
//!
//!     let me = bot.get_me().await?;
//!     println!("Running as @{}", me.username.unwrap_or_default());
//!
//!     let mut offset = None;
//!     loop {
//!         let mut request = GetUpdatesRequest::new().timeout(30);
//!         request.offset = offset;
//!         for update in bot.get_updates(&request).await? {
//!             offset = Some(update.update_id + 1);
//!             if let Some(message) = update.message() {
//!                 if let Some(text) = &message.text {
//!                     bot.send_message(&SendMessageRequest::new(message.chat.id, text.as_str()))
//!                         .await?;
//!                 }
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Remote methods grouped by category
//! - [`client`] - HTTP client, [`Bot`] facade and builders
//! - [`error`] - Error types
//! - [`middleware`] - Tower middleware for the HTTP layer
//! - [`types`] - Bot API objects, identifiers and request helpers
//!
//! ## Error Handling
//!
//! Every operation returns [`TelegramError`]:
//!
//! ```rust,ignore
//! use telegram_bot_sdk::TelegramError;
//!
//! match result {
//!     Ok(message) => { /* handle success */ }
//!     Err(error) if error.retry_after().is_some() => {
//!         // flood control: wait before retrying
//!     }
//!     Err(TelegramError::Api { code, description, .. }) => {
//!         eprintln!("API error: {} - {}", code, description);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod types;
mod utils;

pub use client::{Bot, BotBuilder, TelegramClient, TelegramClientBuilder};
pub use error::{HttpError, TelegramError};
pub use types::decode_response;
