use std::sync::Arc;

use serde::Serialize;

use crate::api::messages::validate_coordinates;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{
    ChatId, EditResult, Field, InlineKeyboardMarkup, InputFile, InputMedia, LinkPreviewOptions,
    MessageEntity, MessageTarget, ParseMode, Poll,
};
use crate::utils::{check_count, check_formatted_len, check_opt_formatted_len, check_opt_range};

/// POST editMessageText
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageTextRequest {
    #[serde(flatten)]
    pub target: MessageTarget,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageTextRequest {
    pub fn new(target: MessageTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            parse_mode: None,
            entities: None,
            link_preview_options: None,
            reply_markup: None,
        }
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    pub fn reply_markup(mut self, reply_markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(reply_markup);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        self.target.validate()?;
        check_formatted_len("text", &self.text, 1, 4096, self.parse_mode)?;
        validate_markup(self.reply_markup.as_ref())
    }
}

/// POST editMessageCaption
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageCaptionRequest {
    #[serde(flatten)]
    pub target: MessageTarget,
    /// Unset removes the caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageCaptionRequest {
    pub fn new(target: MessageTarget) -> Self {
        Self {
            target,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            reply_markup: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        self.target.validate()?;
        check_opt_formatted_len("caption", self.caption.as_deref(), 0, 1024, self.parse_mode)?;
        validate_markup(self.reply_markup.as_ref())
    }
}

/// POST editMessageMedia
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageMediaRequest {
    #[serde(flatten)]
    pub target: MessageTarget,
    pub media: InputMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageMediaRequest {
    pub fn new(target: MessageTarget, media: impl Into<InputMedia>) -> Self {
        Self {
            target,
            media: media.into(),
            reply_markup: None,
        }
    }

    /// Inline messages cannot receive new uploads; reuse a file_id or URL.
    pub fn validate(&self) -> Result<(), TelegramError> {
        self.target.validate()?;
        if self.target.is_inline() && self.media.files().iter().any(|file| file.is_upload()) {
            return Err(TelegramError::validation(
                "inline messages cannot be edited with an uploaded file",
            ));
        }
        check_opt_formatted_len(
            "caption",
            self.media.caption(),
            0,
            1024,
            self.media.parse_mode(),
        )?;
        validate_markup(self.reply_markup.as_ref())
    }
}

/// POST editMessageLiveLocation
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageLiveLocationRequest {
    #[serde(flatten)]
    pub target: MessageTarget,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_alert_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageLiveLocationRequest {
    pub fn new(target: MessageTarget, latitude: f64, longitude: f64) -> Self {
        Self {
            target,
            latitude,
            longitude,
            horizontal_accuracy: None,
            heading: None,
            proximity_alert_radius: None,
            reply_markup: None,
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        self.target.validate()?;
        validate_coordinates(self.latitude, self.longitude)?;
        check_opt_range("horizontal_accuracy", self.horizontal_accuracy, 0.0, 1500.0)?;
        check_opt_range("heading", self.heading, 1, 360)?;
        check_opt_range("proximity_alert_radius", self.proximity_alert_radius, 1, 100_000)?;
        validate_markup(self.reply_markup.as_ref())
    }
}

/// POST stopMessageLiveLocation
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct StopMessageLiveLocationRequest {
    #[serde(flatten)]
    pub target: MessageTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl StopMessageLiveLocationRequest {
    pub fn new(target: MessageTarget) -> Self {
        Self {
            target,
            reply_markup: None,
        }
    }
}

/// `reply_markup` left absent or set to null both remove the keyboard, while
/// a value replaces it.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageReplyMarkupRequest {
    #[serde(flatten)]
    pub target: MessageTarget,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub reply_markup: Field<InlineKeyboardMarkup>,
}

impl EditMessageReplyMarkupRequest {
    pub fn new(target: MessageTarget, reply_markup: InlineKeyboardMarkup) -> Self {
        Self {
            target,
            reply_markup: Field::Value(reply_markup),
        }
    }

    pub fn remove(target: MessageTarget) -> Self {
        Self {
            target,
            reply_markup: Field::Absent,
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        self.target.validate()?;
        validate_markup(self.reply_markup.as_value())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct StopPollRequest {
    pub chat_id: ChatId,
    pub message_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl StopPollRequest {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_id,
            reply_markup: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessageRequest {
    pub chat_id: ChatId,
    pub message_id: i32,
}

impl DeleteMessageRequest {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteMessagesRequest {
    pub chat_id: ChatId,
    pub message_ids: Vec<i32>,
}

impl DeleteMessagesRequest {
    pub fn new(chat_id: impl Into<ChatId>, message_ids: Vec<i32>) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_ids,
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_count("message_ids", self.message_ids.len(), 1, 100)
    }
}

fn validate_markup(markup: Option<&InlineKeyboardMarkup>) -> Result<(), TelegramError> {
    match markup {
        Some(markup) => markup.validate(),
        None => Ok(()),
    }
}

/// Editing and deleting sent messages
///
/// Edits addressed with [`MessageTarget::Chat`] return the edited message,
/// edits of inline messages return `true`; both arrive as [`EditResult`].
pub struct EditingApi {
    context: Arc<BotContext>,
}

impl EditingApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST editMessageText
    pub async fn edit_message_text(
        &self,
        request: &EditMessageTextRequest,
    ) -> Result<EditResult, TelegramError> {
        request.validate()?;
        self.context.client.post("editMessageText", request).await
    }

    /// POST editMessageCaption
    pub async fn edit_message_caption(
        &self,
        request: &EditMessageCaptionRequest,
    ) -> Result<EditResult, TelegramError> {
        request.validate()?;
        self.context.client.post("editMessageCaption", request).await
    }

    /// POST editMessageMedia
    pub async fn edit_message_media(
        &self,
        request: &EditMessageMediaRequest,
    ) -> Result<EditResult, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = request.media.files();
        self.context
            .client
            .post_with_files("editMessageMedia", request, &files)
            .await
    }

    /// POST editMessageLiveLocation
    pub async fn edit_message_live_location(
        &self,
        request: &EditMessageLiveLocationRequest,
    ) -> Result<EditResult, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post("editMessageLiveLocation", request)
            .await
    }

    /// POST stopMessageLiveLocation
    pub async fn stop_message_live_location(
        &self,
        request: &StopMessageLiveLocationRequest,
    ) -> Result<EditResult, TelegramError> {
        request.target.validate()?;
        self.context
            .client
            .post("stopMessageLiveLocation", request)
            .await
    }

    /// POST editMessageReplyMarkup
    pub async fn edit_message_reply_markup(
        &self,
        request: &EditMessageReplyMarkupRequest,
    ) -> Result<EditResult, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post("editMessageReplyMarkup", request)
            .await
    }

    /// POST stopPoll
    pub async fn stop_poll(&self, request: &StopPollRequest) -> Result<Poll, TelegramError> {
        self.context.client.post("stopPoll", request).await
    }

    /// Messages older than 48 hours can only be deleted in some chats.
    ///
    /// POST deleteMessage
    pub async fn delete_message(
        &self,
        request: &DeleteMessageRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("deleteMessage", request).await
    }

    /// POST deleteMessages
    pub async fn delete_messages(
        &self,
        request: &DeleteMessagesRequest,
    ) -> Result<bool, TelegramError> {
        request.validate()?;
        self.context.client.post("deleteMessages", request).await
    }
}

impl BotApi for EditingApi {
    fn api_name(&self) -> &'static str {
        "editing"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
