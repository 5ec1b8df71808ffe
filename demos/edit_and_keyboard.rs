//! Inline keyboard example
//!
//! Sends a message with buttons, then edits it when a button is pressed.
//!
//! Run with: TELEGRAM_BOT_TOKEN=... CHAT_ID=... cargo run --example edit_and_keyboard

use telegram_bot_sdk::{
    api::{
        editing::EditMessageTextRequest, messages::SendMessageRequest,
        queries::AnswerCallbackQueryRequest, updates::GetUpdatesRequest,
    },
    types::{
        AllowedUpdate, InlineKeyboardButton, InlineKeyboardMarkup, MessageTarget, ParseMode,
        UpdateKind,
    },
    Bot,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bot = Bot::from_env()?;
    let chat_id: i64 = std::env::var("CHAT_ID")?.parse()?;

    let keyboard = InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Rust", "lang:rust"),
        InlineKeyboardButton::callback("Zig", "lang:zig"),
    ]]);
    let prompt = bot
        .send_message(&SendMessageRequest::new(chat_id, "Favourite language?").reply_markup(keyboard))
        .await?;
    println!("Sent prompt #{}", prompt.message_id);

    let mut offset = None;
    loop {
        let mut request = GetUpdatesRequest::new()
            .timeout(30)
            .allowed_updates(vec![AllowedUpdate::CallbackQuery]);
        request.offset = offset;

        for update in bot.get_updates(&request).await? {
            offset = Some(update.update_id + 1);

            let UpdateKind::CallbackQuery(query) = update.kind else {
                continue;
            };
            let choice = query.data.as_deref().unwrap_or_default();
            let language = choice.trim_start_matches("lang:");

            bot.answer_callback_query(&AnswerCallbackQueryRequest::new(&query.id).text("Noted!"))
                .await?;

            let target = match (&query.message, &query.inline_message_id) {
                (Some(message), _) => MessageTarget::chat(message.chat.id, message.message_id),
                (None, Some(inline_id)) => MessageTarget::inline(inline_id.as_str()),
                (None, None) => continue,
            };
            let edit = EditMessageTextRequest::new(target, format!("You picked <b>{language}</b>"))
                .parse_mode(ParseMode::Html);

            match bot.edit_message_text(&edit).await?.message() {
                Some(edited) => println!("Edited message #{}", edited.message_id),
                None => println!("Edited inline message"),
            }
            return Ok(());
        }
    }
}
