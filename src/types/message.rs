use serde::{Deserialize, Serialize};

use super::chat::Chat;
use super::games::Game;
use super::ids::ChatId;
use super::markup::InlineKeyboardMarkup;
use super::media::{
    Animation, Audio, Contact, Dice, Document, Location, PhotoSize, Poll, Venue, Video, VideoNote,
    Voice,
};
use super::payments::{Invoice, SuccessfulPayment};
use super::sticker::Sticker;
use super::user::User;

/// A message
///
/// Only commonly used fields are modelled; anything else Telegram sends is
/// ignored on decode.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    /// Unix time; 0 for inaccessible messages
    pub date: i64,
    pub chat: Chat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_topic_message: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_automatic_forward: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_bot: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_protected_content: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_note: Option<VideoNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_media_spoiler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice: Option<Dice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game: Option<Game>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_members: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_chat_member: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_chat_photo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_chat_created: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_from_chat_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_payment: Option<SuccessfulPayment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Message {
    /// Text or caption, whichever the message carries.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Messages older than the bot can see arrive with `date == 0`.
    pub fn is_accessible(&self) -> bool {
        self.date != 0
    }

    /// Bot command at the start of the text, without the leading `/` or `@botname`.
    pub fn command(&self) -> Option<&str> {
        let text = self.text.as_deref()?;
        let entity = self.entities.as_ref()?.iter().find(|entity| {
            entity.kind == MessageEntityKind::BotCommand && entity.offset == 0
        })?;
        // entity length counts UTF-16 code units
        let mut units = 0usize;
        let end = text
            .char_indices()
            .find(|(_, c)| {
                let done = units >= entity.length as usize;
                units += c.len_utf16();
                done
            })
            .map(|(index, _)| index)
            .unwrap_or(text.len());
        let command = text[..end].trim_start_matches('/');
        Some(command.split('@').next().unwrap_or(command))
    }
}

/// Identifier of a sent message, as returned by copy/forward batches
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct MessageId {
    pub message_id: i32,
}

/// Kind of a special entity in a text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityKind {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Blockquote,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
    #[serde(other)]
    Unknown,
}

/// A special entity in a text (hashtag, link, formatting, ...)
///
/// `offset` and `length` are measured in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: MessageEntityKind,
    pub offset: u32,
    pub length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Box<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<String>,
}

impl MessageEntity {
    pub fn new(kind: MessageEntityKind, offset: u32, length: u32) -> Self {
        Self {
            kind,
            offset,
            length,
            url: None,
            user: None,
            language: None,
            custom_emoji_id: None,
        }
    }

    pub fn text_link(offset: u32, length: u32, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::new(MessageEntityKind::TextLink, offset, length)
        }
    }
}

/// Text formatting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ParseMode {
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
    /// Legacy mode kept for backward compatibility
    Markdown,
}

/// Link preview generation options
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkPreviewOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_small_media: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_large_media: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_above_text: Option<bool>,
}

impl LinkPreviewOptions {
    pub fn disabled() -> Self {
        Self {
            is_disabled: Some(true),
            ..Default::default()
        }
    }
}

/// Description of the message to reply to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyParameters {
    pub message_id: i32,
    /// Required when replying to a message in another chat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sending_without_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_position: Option<u32>,
}

impl ReplyParameters {
    pub fn new(message_id: i32) -> Self {
        Self {
            message_id,
            chat_id: None,
            allow_sending_without_reply: None,
            quote: None,
            quote_parse_mode: None,
            quote_position: None,
        }
    }

    pub fn in_chat(mut self, chat_id: impl Into<ChatId>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    pub fn allow_sending_without_reply(mut self) -> Self {
        self.allow_sending_without_reply = Some(true);
        self
    }
}

/// Which message an edit-style operation applies to.
///
/// A message is addressed either by chat and message id, or by the id of an
/// inline message sent via the bot; never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageTarget {
    Chat { chat_id: ChatId, message_id: i32 },
    Inline { inline_message_id: String },
}

impl MessageTarget {
    pub fn chat(chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        MessageTarget::Chat {
            chat_id: chat_id.into(),
            message_id,
        }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        MessageTarget::Inline {
            inline_message_id: inline_message_id.into(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, MessageTarget::Inline { .. })
    }

    pub(crate) fn validate(&self) -> Result<(), crate::error::TelegramError> {
        match self {
            MessageTarget::Inline { inline_message_id } if inline_message_id.is_empty() => Err(
                crate::error::TelegramError::validation("inline_message_id must not be empty"),
            ),
            _ => Ok(()),
        }
    }
}

/// Result of operations that return the edited message for chat messages
/// and `true` for inline messages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EditResult {
    Message(Box<Message>),
    Inline(bool),
}

impl EditResult {
    pub fn message(&self) -> Option<&Message> {
        match self {
            EditResult::Message(message) => Some(message),
            EditResult::Inline(_) => None,
        }
    }

    pub fn into_message(self) -> Option<Message> {
        match self {
            EditResult::Message(message) => Some(*message),
            EditResult::Inline(_) => None,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, EditResult::Inline(_))
    }
}

/// Status shown in the chat header while the bot prepares a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

/// Reaction on a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactionType {
    Emoji { emoji: String },
    CustomEmoji { custom_emoji_id: String },
}

impl ReactionType {
    pub fn emoji(emoji: impl Into<String>) -> Self {
        ReactionType::Emoji {
            emoji: emoji.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(text: &str, entities: serde_json::Value) -> Message {
        serde_json::from_value(serde_json::json!({
            "message_id": 7,
            "date": 1700000000,
            "chat": {"id": 42, "type": "private", "first_name": "Ada"},
            "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
            "text": text,
            "entities": entities
        }))
        .unwrap()
    }

    #[test]
    fn test_message_deserialize_minimal() {
        let message = text_message("hi", serde_json::json!([]));
        assert_eq!(message.message_id, 7);
        assert_eq!(message.text_or_caption(), Some("hi"));
        assert!(message.is_accessible());
        assert!(message.command().is_none());
    }

    #[test]
    fn test_message_command() {
        let message = text_message(
            "/start@my_bot payload",
            serde_json::json!([{"type": "bot_command", "offset": 0, "length": 13}]),
        );
        assert_eq!(message.command(), Some("start"));
    }

    #[test]
    fn test_unknown_entity_kind() {
        let entity: MessageEntity =
            serde_json::from_str(r#"{"type":"expandable_blockquote","offset":0,"length":3}"#)
                .unwrap();
        assert_eq!(entity.kind, MessageEntityKind::Unknown);
    }

    #[test]
    fn test_parse_mode_wire_names() {
        assert_eq!(serde_json::to_value(ParseMode::Html).unwrap(), "HTML");
        assert_eq!(
            serde_json::to_value(ParseMode::MarkdownV2).unwrap(),
            "MarkdownV2"
        );
    }

    #[test]
    fn test_message_target_chat_fields() {
        let json = serde_json::to_value(MessageTarget::chat(42, 7)).unwrap();
        assert_eq!(json, serde_json::json!({"chat_id": 42, "message_id": 7}));
    }

    #[test]
    fn test_message_target_inline_fields() {
        let json = serde_json::to_value(MessageTarget::inline("AAQ")).unwrap();
        assert_eq!(json, serde_json::json!({"inline_message_id": "AAQ"}));
        assert!(MessageTarget::inline("").validate().is_err());
    }

    #[test]
    fn test_edit_result_variants() {
        let inline: EditResult = serde_json::from_str("true").unwrap();
        assert!(inline.is_inline());
        assert!(inline.message().is_none());

        let message: EditResult = serde_json::from_value(serde_json::json!({
            "message_id": 9,
            "date": 1700000000,
            "chat": {"id": 1, "type": "private"},
            "text": "edited"
        }))
        .unwrap();
        assert_eq!(message.into_message().unwrap().text.as_deref(), Some("edited"));
    }

    #[test]
    fn test_chat_action_wire_name() {
        assert_eq!(
            serde_json::to_value(ChatAction::UploadDocument).unwrap(),
            "upload_document"
        );
    }

    #[test]
    fn test_reaction_type_tagging() {
        let json = serde_json::to_value(ReactionType::emoji("👍")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "emoji", "emoji": "👍"}));
    }
}
