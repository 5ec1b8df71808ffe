//! Echo bot example
//!
//! Long-polls for updates and answers every text message with the same text.
//!
//! Run with: TELEGRAM_BOT_TOKEN=... cargo run --example message_send

use telegram_bot_sdk::{
    api::{
        messages::{SendMessageRequest, SendOptions},
        updates::GetUpdatesRequest,
    },
    types::AllowedUpdate,
    Bot,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bot = Bot::from_env()?;
    let mut offset = None;

    loop {
        let mut request = GetUpdatesRequest::new()
            .timeout(30)
            .allowed_updates(vec![AllowedUpdate::Message]);
        request.offset = offset;

        let updates = match bot.get_updates(&request).await {
            Ok(updates) => updates,
            Err(e) => {
                let wait = e.retry_after().unwrap_or(1);
                eprintln!("Polling failed: {}, retrying in {}s", e, wait);
                tokio::time::sleep(std::time::Duration::from_secs(u64::from(wait))).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message() else {
                continue;
            };
            let Some(text) = &message.text else {
                continue;
            };

            let reply = SendMessageRequest::new(message.chat.id, text.as_str())
                .options(SendOptions::new().reply_to(message.message_id));
            match bot.send_message(&reply).await {
                Ok(sent) => println!("Echoed message #{}", sent.message_id),
                Err(e) => eprintln!("Failed to send: {}", e),
            }
        }
    }
}
