//! Inline mode results

use serde::{Deserialize, Serialize};

use super::markup::{InlineKeyboardMarkup, WebAppInfo};
use super::message::{LinkPreviewOptions, MessageEntity, ParseMode};

/// Content of the message sent when an inline result is chosen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputMessageContent {
    Text {
        message_text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parse_mode: Option<ParseMode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        entities: Option<Vec<MessageEntity>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link_preview_options: Option<LinkPreviewOptions>,
    },
    Location {
        latitude: f64,
        longitude: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        live_period: Option<u32>,
    },
    Venue {
        latitude: f64,
        longitude: f64,
        title: String,
        address: String,
    },
    Contact {
        phone_number: String,
        first_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        last_name: Option<String>,
    },
}

impl InputMessageContent {
    pub fn text(message_text: impl Into<String>) -> Self {
        InputMessageContent::Text {
            message_text: message_text.into(),
            parse_mode: None,
            entities: None,
            link_preview_options: None,
        }
    }
}

/// Link to an article or web page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineQueryResultArticle {
    pub id: String,
    pub title: String,
    pub input_message_content: InputMessageContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl InlineQueryResultArticle {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        input_message_content: InputMessageContent,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            input_message_content,
            reply_markup: None,
            url: None,
            description: None,
            thumbnail_url: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Photo by URL or by `file_id` of a photo already on Telegram's servers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineQueryResultPhoto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_message_content: Option<InputMessageContent>,
}

impl InlineQueryResultPhoto {
    pub fn from_url(
        id: impl Into<String>,
        photo_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            photo_url: Some(photo_url.into()),
            photo_file_id: None,
            thumbnail_url: Some(thumbnail_url.into()),
            title: None,
            caption: None,
            parse_mode: None,
            reply_markup: None,
            input_message_content: None,
        }
    }

    pub fn cached(id: impl Into<String>, photo_file_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            photo_url: None,
            photo_file_id: Some(photo_file_id.into()),
            thumbnail_url: None,
            title: None,
            caption: None,
            parse_mode: None,
            reply_markup: None,
            input_message_content: None,
        }
    }
}

/// Document, audio, video or GIF result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineQueryResultFile {
    pub id: String,
    pub title: String,
    /// URL of the file; mutually exclusive with `file_id`
    #[serde(flatten)]
    pub source: InlineFileSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Where a file result comes from; field names vary by result kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineFileSource {
    DocumentUrl(String),
    DocumentFileId(String),
    AudioUrl(String),
    AudioFileId(String),
    VideoUrl(String),
    VideoFileId(String),
    GifUrl(String),
    GifFileId(String),
}

/// One result of an inline query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineQueryResult {
    Article(InlineQueryResultArticle),
    Photo(InlineQueryResultPhoto),
    Document(InlineQueryResultFile),
    Audio(InlineQueryResultFile),
    Video(InlineQueryResultFile),
    Gif(InlineQueryResultFile),
    Location {
        id: String,
        latitude: f64,
        longitude: f64,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
    Venue {
        id: String,
        latitude: f64,
        longitude: f64,
        title: String,
        address: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
    Contact {
        id: String,
        phone_number: String,
        first_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        last_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
    /// Cached sticker
    Sticker {
        id: String,
        sticker_file_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
    Game {
        id: String,
        game_short_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
}

impl InlineQueryResult {
    pub fn id(&self) -> &str {
        match self {
            InlineQueryResult::Article(result) => &result.id,
            InlineQueryResult::Photo(result) => &result.id,
            InlineQueryResult::Document(result)
            | InlineQueryResult::Audio(result)
            | InlineQueryResult::Video(result)
            | InlineQueryResult::Gif(result) => &result.id,
            InlineQueryResult::Location { id, .. }
            | InlineQueryResult::Venue { id, .. }
            | InlineQueryResult::Contact { id, .. }
            | InlineQueryResult::Sticker { id, .. }
            | InlineQueryResult::Game { id, .. } => id,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), crate::error::TelegramError> {
        crate::utils::check_len("inline result id", self.id(), 1, 64)?;
        if let InlineQueryResult::Photo(photo) = self {
            if photo.photo_url.is_some() == photo.photo_file_id.is_some() {
                return Err(crate::error::TelegramError::validation(
                    "photo result needs exactly one of photo_url or photo_file_id",
                ));
            }
        }
        Ok(())
    }
}

impl From<InlineQueryResultArticle> for InlineQueryResult {
    fn from(result: InlineQueryResultArticle) -> Self {
        InlineQueryResult::Article(result)
    }
}

impl From<InlineQueryResultPhoto> for InlineQueryResult {
    fn from(result: InlineQueryResultPhoto) -> Self {
        InlineQueryResult::Photo(result)
    }
}

/// Button shown above inline query results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineQueryResultsButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
    /// Deep-linking parameter for the /start message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_parameter: Option<String>,
}

/// Returned by answerWebAppQuery
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SentWebAppMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
}
