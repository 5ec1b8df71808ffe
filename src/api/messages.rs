use std::sync::Arc;

use serde::Serialize;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{
    ChatAction, ChatId, LinkPreviewOptions, Message, MessageEntity, MessageId, ParseMode,
    PollType, ReactionType, ReplyMarkup, ReplyParameters,
};
use crate::utils::{
    check_count, check_formatted_len, check_len, check_opt_formatted_len, check_opt_range,
    check_range,
};

/// Options shared by every operation that sends a new message
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendOptions {
    /// Forum topic to send to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    /// Deliver without sound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    /// Disallow forwarding and saving
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread(mut self, message_thread_id: i32) -> Self {
        self.message_thread_id = Some(message_thread_id);
        self
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }

    pub fn protect_content(mut self) -> Self {
        self.protect_content = Some(true);
        self
    }

    pub fn reply_to(mut self, message_id: i32) -> Self {
        self.reply_parameters = Some(ReplyParameters::new(message_id));
        self
    }

    pub fn reply_parameters(mut self, reply_parameters: ReplyParameters) -> Self {
        self.reply_parameters = Some(reply_parameters);
        self
    }

    pub fn reply_markup(mut self, reply_markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(reply_markup.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        match &self.reply_markup {
            Some(markup) => markup.validate(),
            None => Ok(()),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    /// 1-4096 characters after entity parsing
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendMessageRequest {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            entities: None,
            link_preview_options: None,
            options: SendOptions::default(),
        }
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    pub fn entities(mut self, entities: Vec<MessageEntity>) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn link_preview_options(mut self, link_preview_options: LinkPreviewOptions) -> Self {
        self.link_preview_options = Some(link_preview_options);
        self
    }

    pub fn reply_markup(mut self, reply_markup: impl Into<ReplyMarkup>) -> Self {
        self.options.reply_markup = Some(reply_markup.into());
        self
    }

    pub fn options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_formatted_len("text", &self.text, 1, 4096, self.parse_mode)?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessageRequest {
    pub chat_id: ChatId,
    pub from_chat_id: ChatId,
    pub message_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
}

impl ForwardMessageRequest {
    pub fn new(chat_id: impl Into<ChatId>, from_chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            message_thread_id: None,
            disable_notification: None,
            protect_content: None,
        }
    }
}

/// Batch forward or copy of up to 100 messages
///
/// Message ids must be in strictly increasing order.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessagesRequest {
    pub chat_id: ChatId,
    pub from_chat_id: ChatId,
    pub message_ids: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
    /// copyMessages only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_caption: Option<bool>,
}

impl ForwardMessagesRequest {
    pub fn new(
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_ids: Vec<i32>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_ids,
            message_thread_id: None,
            disable_notification: None,
            protect_content: None,
            remove_caption: None,
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_count("message_ids", self.message_ids.len(), 1, 100)?;
        if self.message_ids.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TelegramError::validation(
                "message_ids must be strictly increasing",
            ));
        }
        Ok(())
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct CopyMessageRequest {
    pub chat_id: ChatId,
    pub from_chat_id: ChatId,
    pub message_id: i32,
    /// Replaces the original caption; 0-1024 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl CopyMessageRequest {
    pub fn new(chat_id: impl Into<ChatId>, from_chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            options: SendOptions::default(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len("caption", self.caption.as_deref(), 0, 1024, self.parse_mode)?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendLocationRequest {
    pub chat_id: ChatId,
    pub latitude: f64,
    pub longitude: f64,
    /// Radius of uncertainty in meters, 0-1500
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_accuracy: Option<f64>,
    /// Seconds the live location can be updated, 60-86400
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_period: Option<u32>,
    /// Direction of movement in degrees, 1-360
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<u16>,
    /// Proximity alert distance in meters, 1-100000
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_alert_radius: Option<u32>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendLocationRequest {
    pub fn new(chat_id: impl Into<ChatId>, latitude: f64, longitude: f64) -> Self {
        Self {
            chat_id: chat_id.into(),
            latitude,
            longitude,
            horizontal_accuracy: None,
            live_period: None,
            heading: None,
            proximity_alert_radius: None,
            options: SendOptions::default(),
        }
    }

    pub fn live_period(mut self, live_period: u32) -> Self {
        self.live_period = Some(live_period);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        validate_coordinates(self.latitude, self.longitude)?;
        check_opt_range("horizontal_accuracy", self.horizontal_accuracy, 0.0, 1500.0)?;
        check_opt_range("live_period", self.live_period, 60, 86400)?;
        check_opt_range("heading", self.heading, 1, 360)?;
        check_opt_range("proximity_alert_radius", self.proximity_alert_radius, 1, 100_000)?;
        self.options.validate()
    }
}

pub(crate) fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), TelegramError> {
    check_range("latitude", latitude, -90.0, 90.0)?;
    check_range("longitude", longitude, -180.0, 180.0)
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendVenueRequest {
    pub chat_id: ChatId,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_place_type: Option<String>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendVenueRequest {
    pub fn new(
        chat_id: impl Into<ChatId>,
        latitude: f64,
        longitude: f64,
        title: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            latitude,
            longitude,
            title: title.into(),
            address: address.into(),
            foursquare_id: None,
            foursquare_type: None,
            google_place_id: None,
            google_place_type: None,
            options: SendOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        validate_coordinates(self.latitude, self.longitude)?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendContactRequest {
    pub chat_id: ChatId,
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// vCard data, 0-2048 bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcard: Option<String>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendContactRequest {
    pub fn new(
        chat_id: impl Into<ChatId>,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            last_name: None,
            vcard: None,
            options: SendOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        if let Some(vcard) = &self.vcard {
            check_range("vcard length in bytes", vcard.len(), 0, 2048)?;
        }
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendPollRequest {
    pub chat_id: ChatId,
    /// 1-300 characters
    pub question: String,
    /// 2-10 answer options, 1-100 characters each
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub poll_type: Option<PollType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_multiple_answers: Option<bool>,
    /// Required for quizzes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<u8>,
    /// Shown after a wrong quiz answer; 0-200 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation_parse_mode: Option<ParseMode>,
    /// Seconds the poll stays open, 5-600; exclusive with `close_date`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(flatten)]
    pub send_options: SendOptions,
}

impl SendPollRequest {
    pub fn new(chat_id: impl Into<ChatId>, question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            question: question.into(),
            options,
            is_anonymous: None,
            poll_type: None,
            allows_multiple_answers: None,
            correct_option_id: None,
            explanation: None,
            explanation_parse_mode: None,
            open_period: None,
            close_date: None,
            is_closed: None,
            send_options: SendOptions::default(),
        }
    }

    /// Turn the poll into a quiz with the given correct option.
    pub fn quiz(mut self, correct_option_id: u8) -> Self {
        self.poll_type = Some(PollType::Quiz);
        self.correct_option_id = Some(correct_option_id);
        self
    }

    pub fn non_anonymous(mut self) -> Self {
        self.is_anonymous = Some(false);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_len("question", &self.question, 1, 300)?;
        check_count("options", self.options.len(), 2, 10)?;
        for option in &self.options {
            check_len("poll option", option, 1, 100)?;
        }
        check_opt_formatted_len(
            "explanation",
            self.explanation.as_deref(),
            0,
            200,
            self.explanation_parse_mode,
        )?;
        check_opt_range("open_period", self.open_period, 5, 600)?;
        if self.open_period.is_some() && self.close_date.is_some() {
            return Err(TelegramError::validation(
                "open_period and close_date are mutually exclusive",
            ));
        }
        if self.poll_type == Some(PollType::Quiz) {
            match self.correct_option_id {
                Some(id) if (id as usize) < self.options.len() => {}
                Some(id) => {
                    return Err(TelegramError::validation(format!(
                        "correct_option_id {id} is out of range"
                    )))
                }
                None => {
                    return Err(TelegramError::validation(
                        "quiz polls require correct_option_id",
                    ))
                }
            }
        }
        self.send_options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendDiceRequest {
    pub chat_id: ChatId,
    /// 🎲 by default; also 🎯 🏀 ⚽ 🎳 🎰
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendDiceRequest {
    pub fn new(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: chat_id.into(),
            emoji: None,
            options: SendOptions::default(),
        }
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendChatActionRequest {
    pub chat_id: ChatId,
    pub action: ChatAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
}

impl SendChatActionRequest {
    pub fn new(chat_id: impl Into<ChatId>, action: ChatAction) -> Self {
        Self {
            chat_id: chat_id.into(),
            action,
            message_thread_id: None,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SetMessageReactionRequest {
    pub chat_id: ChatId,
    pub message_id: i32,
    /// Omit or pass an empty list to remove the bot's reactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<Vec<ReactionType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_big: Option<bool>,
}

impl SetMessageReactionRequest {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_id,
            reaction: None,
            is_big: None,
        }
    }

    pub fn reaction(mut self, reaction: ReactionType) -> Self {
        self.reaction.get_or_insert_with(Vec::new).push(reaction);
        self
    }
}

/// Messaging API: text, forwards, copies, locations, contacts, polls
pub struct MessagesApi {
    context: Arc<BotContext>,
}

impl MessagesApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST sendMessage
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context.client.post("sendMessage", request).await
    }

    /// POST forwardMessage
    pub async fn forward_message(
        &self,
        request: &ForwardMessageRequest,
    ) -> Result<Message, TelegramError> {
        self.context.client.post("forwardMessage", request).await
    }

    /// Forward several messages; albums are kept together.
    ///
    /// POST forwardMessages
    pub async fn forward_messages(
        &self,
        request: &ForwardMessagesRequest,
    ) -> Result<Vec<MessageId>, TelegramError> {
        request.validate()?;
        if request.remove_caption.is_some() {
            return Err(TelegramError::validation(
                "remove_caption is only accepted by copyMessages",
            ));
        }
        self.context.client.post("forwardMessages", request).await
    }

    /// Copy a message without a link to the original.
    ///
    /// POST copyMessage
    pub async fn copy_message(
        &self,
        request: &CopyMessageRequest,
    ) -> Result<MessageId, TelegramError> {
        request.validate()?;
        self.context.client.post("copyMessage", request).await
    }

    /// POST copyMessages
    pub async fn copy_messages(
        &self,
        request: &ForwardMessagesRequest,
    ) -> Result<Vec<MessageId>, TelegramError> {
        request.validate()?;
        self.context.client.post("copyMessages", request).await
    }

    /// POST sendLocation
    pub async fn send_location(
        &self,
        request: &SendLocationRequest,
    ) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context.client.post("sendLocation", request).await
    }

    /// POST sendVenue
    pub async fn send_venue(&self, request: &SendVenueRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context.client.post("sendVenue", request).await
    }

    /// POST sendContact
    pub async fn send_contact(
        &self,
        request: &SendContactRequest,
    ) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context.client.post("sendContact", request).await
    }

    /// POST sendPoll
    pub async fn send_poll(&self, request: &SendPollRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context.client.post("sendPoll", request).await
    }

    /// POST sendDice
    pub async fn send_dice(&self, request: &SendDiceRequest) -> Result<Message, TelegramError> {
        request.options.validate()?;
        self.context.client.post("sendDice", request).await
    }

    /// Show a status such as "typing..." for up to 5 seconds.
    ///
    /// POST sendChatAction
    pub async fn send_chat_action(
        &self,
        request: &SendChatActionRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("sendChatAction", request).await
    }

    /// POST setMessageReaction
    pub async fn set_message_reaction(
        &self,
        request: &SetMessageReactionRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("setMessageReaction", request).await
    }
}

impl BotApi for MessagesApi {
    fn api_name(&self) -> &'static str {
        "messages"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
