//! Incoming updates and webhook state

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::chat::{Chat, ChatJoinRequest, ChatMemberUpdated};
use super::media::{Location, Poll, PollAnswer};
use super::message::Message;
use super::payments::{PreCheckoutQuery, ShippingQuery};
use super::user::User;

/// An incoming update
///
/// At most one payload is present per update. Payload kinds this crate does
/// not model decode as [`UpdateKind::Unknown`] instead of failing the whole
/// batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Monotonically increasing; use `last + 1` as the next polling offset
    pub update_id: i64,
    pub kind: UpdateKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    CallbackQuery(CallbackQuery),
    ShippingQuery(ShippingQuery),
    PreCheckoutQuery(PreCheckoutQuery),
    Poll(Poll),
    PollAnswer(PollAnswer),
    MyChatMember(ChatMemberUpdated),
    ChatMember(ChatMemberUpdated),
    ChatJoinRequest(ChatJoinRequest),
    Unknown { kind: String, payload: Value },
}

impl UpdateKind {
    fn from_entry(kind: String, payload: Value) -> Result<Self, serde_json::Error> {
        fn decode<T: DeserializeOwned>(payload: Value) -> Result<T, serde_json::Error> {
            serde_json::from_value(payload)
        }

        let kind = match kind.as_str() {
            "message" => UpdateKind::Message(decode(payload)?),
            "edited_message" => UpdateKind::EditedMessage(decode(payload)?),
            "channel_post" => UpdateKind::ChannelPost(decode(payload)?),
            "edited_channel_post" => UpdateKind::EditedChannelPost(decode(payload)?),
            "inline_query" => UpdateKind::InlineQuery(decode(payload)?),
            "chosen_inline_result" => UpdateKind::ChosenInlineResult(decode(payload)?),
            "callback_query" => UpdateKind::CallbackQuery(decode(payload)?),
            "shipping_query" => UpdateKind::ShippingQuery(decode(payload)?),
            "pre_checkout_query" => UpdateKind::PreCheckoutQuery(decode(payload)?),
            "poll" => UpdateKind::Poll(decode(payload)?),
            "poll_answer" => UpdateKind::PollAnswer(decode(payload)?),
            "my_chat_member" => UpdateKind::MyChatMember(decode(payload)?),
            "chat_member" => UpdateKind::ChatMember(decode(payload)?),
            "chat_join_request" => UpdateKind::ChatJoinRequest(decode(payload)?),
            _ => UpdateKind::Unknown { kind, payload },
        };
        Ok(kind)
    }
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let update_id = fields
            .remove("update_id")
            .ok_or_else(|| de::Error::missing_field("update_id"))?;
        let update_id = serde_json::from_value(update_id).map_err(de::Error::custom)?;

        let kind = match fields.into_iter().next() {
            Some((kind, payload)) => {
                UpdateKind::from_entry(kind, payload).map_err(de::Error::custom)?
            }
            None => UpdateKind::Unknown {
                kind: String::new(),
                payload: Value::Null,
            },
        };

        Ok(Update { update_id, kind })
    }
}

impl Update {
    /// The message carried by message-like updates.
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::Message(message)
            | UpdateKind::EditedMessage(message)
            | UpdateKind::ChannelPost(message)
            | UpdateKind::EditedChannelPost(message) => Some(message),
            UpdateKind::CallbackQuery(query) => query.message.as_deref(),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&Chat> {
        match &self.kind {
            UpdateKind::MyChatMember(updated) | UpdateKind::ChatMember(updated) => {
                Some(&updated.chat)
            }
            UpdateKind::ChatJoinRequest(request) => Some(&request.chat),
            _ => self.message().map(|message| &message.chat),
        }
    }

    /// The user who caused the update, when known.
    pub fn sender(&self) -> Option<&User> {
        match &self.kind {
            UpdateKind::Message(message)
            | UpdateKind::EditedMessage(message)
            | UpdateKind::ChannelPost(message)
            | UpdateKind::EditedChannelPost(message) => message.from.as_ref(),
            UpdateKind::InlineQuery(query) => Some(&query.from),
            UpdateKind::ChosenInlineResult(result) => Some(&result.from),
            UpdateKind::CallbackQuery(query) => Some(&query.from),
            UpdateKind::ShippingQuery(query) => Some(&query.from),
            UpdateKind::PreCheckoutQuery(query) => Some(&query.from),
            UpdateKind::PollAnswer(answer) => answer.user.as_ref(),
            UpdateKind::MyChatMember(updated) | UpdateKind::ChatMember(updated) => {
                Some(&updated.from)
            }
            UpdateKind::ChatJoinRequest(request) => Some(&request.from),
            UpdateKind::Poll(_) | UpdateKind::Unknown { .. } => None,
        }
    }
}

/// Update kinds that can be requested from getUpdates and setWebhook
///
/// Kinds without a dedicated variant travel as [`AllowedUpdate::Other`] and
/// keep their wire name verbatim in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllowedUpdate {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
    Other(String),
}

impl AllowedUpdate {
    pub fn as_str(&self) -> &str {
        match self {
            AllowedUpdate::Message => "message",
            AllowedUpdate::EditedMessage => "edited_message",
            AllowedUpdate::ChannelPost => "channel_post",
            AllowedUpdate::EditedChannelPost => "edited_channel_post",
            AllowedUpdate::InlineQuery => "inline_query",
            AllowedUpdate::ChosenInlineResult => "chosen_inline_result",
            AllowedUpdate::CallbackQuery => "callback_query",
            AllowedUpdate::ShippingQuery => "shipping_query",
            AllowedUpdate::PreCheckoutQuery => "pre_checkout_query",
            AllowedUpdate::Poll => "poll",
            AllowedUpdate::PollAnswer => "poll_answer",
            AllowedUpdate::MyChatMember => "my_chat_member",
            AllowedUpdate::ChatMember => "chat_member",
            AllowedUpdate::ChatJoinRequest => "chat_join_request",
            AllowedUpdate::Other(name) => name,
        }
    }
}

impl From<&str> for AllowedUpdate {
    fn from(name: &str) -> Self {
        match name {
            "message" => AllowedUpdate::Message,
            "edited_message" => AllowedUpdate::EditedMessage,
            "channel_post" => AllowedUpdate::ChannelPost,
            "edited_channel_post" => AllowedUpdate::EditedChannelPost,
            "inline_query" => AllowedUpdate::InlineQuery,
            "chosen_inline_result" => AllowedUpdate::ChosenInlineResult,
            "callback_query" => AllowedUpdate::CallbackQuery,
            "shipping_query" => AllowedUpdate::ShippingQuery,
            "pre_checkout_query" => AllowedUpdate::PreCheckoutQuery,
            "poll" => AllowedUpdate::Poll,
            "poll_answer" => AllowedUpdate::PollAnswer,
            "my_chat_member" => AllowedUpdate::MyChatMember,
            "chat_member" => AllowedUpdate::ChatMember,
            "chat_join_request" => AllowedUpdate::ChatJoinRequest,
            other => AllowedUpdate::Other(other.to_string()),
        }
    }
}

impl Serialize for AllowedUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AllowedUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(AllowedUpdate::from(name.as_str()))
    }
}

/// Current webhook status
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebhookInfo {
    /// Empty if the bot uses getUpdates
    pub url: String,
    pub has_custom_certificate: bool,
    pub pending_update_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_synchronization_error_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<AllowedUpdate>>,
}

impl WebhookInfo {
    pub fn is_set(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Press of an inline keyboard button
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Absent when the button was attached to an inline message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub chat_instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<String>,
}

/// Incoming inline query
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
    /// Pagination offset controlled by the bot
    pub offset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Inline result chosen by a user and sent to their chat partner
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub query: String,
}
