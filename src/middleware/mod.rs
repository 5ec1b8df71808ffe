//! Middleware components for the Telegram client.
//!
//! Middleware are tower layers wrapped around [`TelegramClient`] and plugged
//! in with [`BotBuilder::with_middleware`]. Every HTTP request the bot sends,
//! file downloads included, passes through them.
//!
//! ## Usage
//!
//! ```ignore
//! use telegram_bot_sdk::Bot;
//! use telegram_bot_sdk::middleware::LoggingMiddleware;
//!
//! let bot = Bot::builder()
//!     .token(token)
//!     .with_middleware(LoggingMiddleware::new())
//!     .build()?;
//! ```
//!
//! [`TelegramClient`]: crate::client::TelegramClient
//! [`BotBuilder::with_middleware`]: crate::client::BotBuilder::with_middleware

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
