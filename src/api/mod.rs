//! Bot API categories
//!
//! Each submodule groups related remote methods behind one API struct that
//! shares the [`BotContext`]:
//!
//! - [`updates`] - getUpdates and webhook management
//! - [`account`] - Bot identity and session (getMe, logOut, close)
//! - [`settings`] - Commands, name, descriptions, menu button, default rights
//! - [`messages`] - Sending text, locations, contacts, polls, dice, reactions
//! - [`media`] - Sending photos, audio, documents, video; files and profile photos
//! - [`editing`] - Editing, stopping and deleting messages
//! - [`chats`] - Chat information, title, photo, pinned messages
//! - [`members`] - Bans, restrictions, promotions, join requests
//! - [`invite_links`] - Invite link management
//! - [`forum`] - Forum topics
//! - [`queries`] - Callback, inline and Web App query answers
//! - [`stickers`] - Stickers and sticker sets
//! - [`payments`] - Invoices, shipping and pre-checkout queries
//! - [`games`] - Games and high scores
//!
//! ## Usage
//!
//! ```rust,no_run
//! use telegram_bot_sdk::api::messages::SendMessageRequest;
//! use telegram_bot_sdk::Bot;
//!
//! # async fn run() -> Result<(), telegram_bot_sdk::TelegramError> {
//! let bot = Bot::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")?;
//! let message = bot
//!     .send_message(&SendMessageRequest::new(42, "Hello"))
//!     .await?;
//! println!("sent #{}", message.message_id);
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod chats;
pub mod editing;
pub mod forum;
pub mod games;
pub mod invite_links;
pub mod media;
pub mod members;
pub mod messages;
pub mod payments;
pub mod queries;
pub mod settings;
pub mod stickers;
pub mod r#trait;
pub mod updates;

pub use account::AccountApi;
pub use chats::ChatsApi;
pub use editing::EditingApi;
pub use forum::ForumApi;
pub use games::GamesApi;
pub use invite_links::InviteLinksApi;
pub use media::MediaApi;
pub use members::MembersApi;
pub use messages::MessagesApi;
pub use payments::PaymentsApi;
pub use queries::QueriesApi;
pub use r#trait::{BotApi, BotContext};
pub use settings::SettingsApi;
pub use stickers::StickersApi;
pub use updates::UpdatesApi;
