//! Basic usage example for telegram-bot-sdk
//!
//! Run with: TELEGRAM_BOT_TOKEN=... cargo run --example basic_usage

use std::time::Duration;

use telegram_bot_sdk::{middleware::LoggingMiddleware, types::BotToken, Bot};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("TELEGRAM_BOT_TOKEN")?;

    let bot = Bot::builder()
        .token(BotToken::new(token)?)
        .timeout(Duration::from_secs(40))
        .with_middleware(LoggingMiddleware::new())
        .build()?;

    let me = bot.get_me().await?;
    println!("Client created successfully!");
    println!("Bot: {} (id {})", me.first_name, me.id);

    let webhook = bot.get_webhook_info().await?;
    if webhook.url.is_empty() {
        println!("No webhook set, long polling is available");
    } else {
        println!("Webhook: {}", webhook.url);
    }

    Ok(())
}
