//! Unified Telegram Bot API client

use std::sync::Arc;

use crate::api::account::AccountApi;
use crate::api::chats::{ChatsApi, PinChatMessageRequest};
use crate::api::editing::{
    DeleteMessageRequest, DeleteMessagesRequest, EditMessageCaptionRequest,
    EditMessageLiveLocationRequest, EditMessageMediaRequest, EditMessageReplyMarkupRequest,
    EditMessageTextRequest, EditingApi, StopMessageLiveLocationRequest, StopPollRequest,
};
use crate::api::forum::{CreateForumTopicRequest, EditForumTopicRequest, ForumApi};
use crate::api::games::{GamesApi, SendGameRequest, SetGameScoreRequest};
use crate::api::invite_links::{InviteLinkOptions, InviteLinksApi};
use crate::api::media::{
    GetUserProfilePhotosRequest, MediaApi, SendAnimationRequest, SendAudioRequest,
    SendDocumentRequest, SendMediaGroupRequest, SendPhotoRequest, SendVideoNoteRequest,
    SendVideoRequest, SendVoiceRequest,
};
use crate::api::members::{
    BanChatMemberRequest, MembersApi, PromoteChatMemberRequest, RestrictChatMemberRequest,
    SetChatPermissionsRequest, UnbanChatMemberRequest,
};
use crate::api::messages::{
    CopyMessageRequest, ForwardMessageRequest, ForwardMessagesRequest, MessagesApi,
    SendChatActionRequest, SendContactRequest, SendDiceRequest, SendLocationRequest,
    SendMessageRequest, SendPollRequest, SendVenueRequest, SetMessageReactionRequest,
};
use crate::api::payments::{
    InvoiceDetails, PaymentsApi, PreCheckoutAnswer, SendInvoiceRequest, ShippingAnswer,
};
use crate::api::queries::{AnswerCallbackQueryRequest, AnswerInlineQueryRequest, QueriesApi};
use crate::api::settings::{
    CommandScopeRequest, GetChatMenuButtonRequest, GetMyDefaultAdministratorRightsRequest,
    LanguageRequest, SetChatMenuButtonRequest, SetMyCommandsRequest,
    SetMyDefaultAdministratorRightsRequest, SetMyTextRequest, SettingsApi,
};
use crate::api::stickers::{CreateNewStickerSetRequest, SendStickerRequest, StickersApi};
use crate::api::updates::{DeleteWebhookRequest, GetUpdatesRequest, SetWebhookRequest, UpdatesApi};
use crate::api::BotContext;
use crate::error::TelegramError;
use crate::types::{
    BotCommand, BotDescription, BotName, BotShortDescription, BotToken, ChatAdministratorRights,
    ChatFullInfo, ChatId, ChatInviteLink, ChatMember, EditResult, File, ForumTopic, GameHighScore,
    InlineQueryResult, InputFile, InputSticker, MenuButton, Message, MessageId, MessageTarget,
    Poll, SentWebAppMessage, Sticker, StickerFormat, StickerSet, Update, User, UserProfilePhotos,
    WebhookInfo,
};

use super::builder::BotBuilder;
use super::TelegramClient;

/// Environment variable holding the bot token, read by [`Bot::from_env`]
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Optional environment variable overriding the API base URL
pub const API_URL_ENV: &str = "TELEGRAM_API_URL";

/// Unified Telegram Bot API client
///
/// This is the main entry point for the SDK. Every remote method is exposed
/// as one async function that delegates to the API struct of its category.
/// Cloning is cheap and clones share one connection pool, so a `Bot` can be
/// handed to as many tasks as needed.
///
/// # Example
///
/// ```rust,no_run
/// use telegram_bot_sdk::api::messages::SendMessageRequest;
/// use telegram_bot_sdk::Bot;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let bot = Bot::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")?;
///
///     let me = bot.get_me().await?;
///     println!("Logged in as @{}", me.username.unwrap_or_default());
///
///     bot.send_message(&SendMessageRequest::new(42, "Hello from Rust"))
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Bot {
    context: Arc<BotContext>,
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("client", self.context.client())
            .finish()
    }
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    /// Client for the public Bot API server with default settings.
    ///
    /// # Errors
    /// Returns `TelegramError::Config` if the token is malformed
    pub fn new(token: impl Into<String>) -> Result<Self, TelegramError> {
        let token = BotToken::new(token).map_err(TelegramError::Config)?;
        Self::builder().token(token).build()
    }

    /// Build a client from `TELEGRAM_BOT_TOKEN` and the optional
    /// `TELEGRAM_API_URL`.
    ///
    /// # Errors
    /// Returns `TelegramError::Config` if the token variable is missing or invalid
    pub fn from_env() -> Result<Self, TelegramError> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| TelegramError::Config(format!("{TOKEN_ENV} is not set")))?;
        let token = BotToken::new(token).map_err(TelegramError::Config)?;

        let mut builder = Self::builder().token(token);
        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// The underlying transport, for remote methods without a typed wrapper.
    pub fn client(&self) -> &TelegramClient {
        self.context.client()
    }

    /// Numeric bot id taken from the token
    pub fn id(&self) -> Option<i64> {
        self.context.client().bot_id()
    }

    /// Download URL for a `file_path` returned by getFile.
    pub fn file_url(&self, file_path: &str) -> String {
        self.context.client().file_url(file_path)
    }

    /// Download the content of a file returned by [`get_file`](Self::get_file).
    pub async fn download_file(&self, file: &File) -> Result<Vec<u8>, TelegramError> {
        MediaApi::new(self.context.clone()).download_file(file).await
    }

    // Updates

    pub async fn get_updates(
        &self,
        request: &GetUpdatesRequest,
    ) -> Result<Vec<Update>, TelegramError> {
        UpdatesApi::new(self.context.clone()).get_updates(request).await
    }

    pub async fn set_webhook(&self, request: &SetWebhookRequest) -> Result<bool, TelegramError> {
        UpdatesApi::new(self.context.clone()).set_webhook(request).await
    }

    pub async fn delete_webhook(
        &self,
        request: &DeleteWebhookRequest,
    ) -> Result<bool, TelegramError> {
        UpdatesApi::new(self.context.clone()).delete_webhook(request).await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo, TelegramError> {
        UpdatesApi::new(self.context.clone()).get_webhook_info().await
    }

    // Account

    pub async fn get_me(&self) -> Result<User, TelegramError> {
        AccountApi::new(self.context.clone()).get_me().await
    }

    pub async fn log_out(&self) -> Result<bool, TelegramError> {
        AccountApi::new(self.context.clone()).log_out().await
    }

    pub async fn close(&self) -> Result<bool, TelegramError> {
        AccountApi::new(self.context.clone()).close().await
    }

    // Settings

    pub async fn set_my_commands(
        &self,
        request: &SetMyCommandsRequest,
    ) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).set_my_commands(request).await
    }

    pub async fn delete_my_commands(
        &self,
        request: &CommandScopeRequest,
    ) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).delete_my_commands(request).await
    }

    pub async fn get_my_commands(
        &self,
        request: &CommandScopeRequest,
    ) -> Result<Vec<BotCommand>, TelegramError> {
        SettingsApi::new(self.context.clone()).get_my_commands(request).await
    }

    pub async fn set_my_name(&self, request: &SetMyTextRequest) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).set_my_name(request).await
    }

    pub async fn get_my_name(&self, request: &LanguageRequest) -> Result<BotName, TelegramError> {
        SettingsApi::new(self.context.clone()).get_my_name(request).await
    }

    pub async fn set_my_description(
        &self,
        request: &SetMyTextRequest,
    ) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).set_my_description(request).await
    }

    pub async fn get_my_description(
        &self,
        request: &LanguageRequest,
    ) -> Result<BotDescription, TelegramError> {
        SettingsApi::new(self.context.clone()).get_my_description(request).await
    }

    pub async fn set_my_short_description(
        &self,
        request: &SetMyTextRequest,
    ) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).set_my_short_description(request).await
    }

    pub async fn get_my_short_description(
        &self,
        request: &LanguageRequest,
    ) -> Result<BotShortDescription, TelegramError> {
        SettingsApi::new(self.context.clone()).get_my_short_description(request).await
    }

    pub async fn set_chat_menu_button(
        &self,
        request: &SetChatMenuButtonRequest,
    ) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).set_chat_menu_button(request).await
    }

    pub async fn get_chat_menu_button(
        &self,
        request: &GetChatMenuButtonRequest,
    ) -> Result<MenuButton, TelegramError> {
        SettingsApi::new(self.context.clone()).get_chat_menu_button(request).await
    }

    pub async fn set_my_default_administrator_rights(
        &self,
        request: &SetMyDefaultAdministratorRightsRequest,
    ) -> Result<bool, TelegramError> {
        SettingsApi::new(self.context.clone()).set_my_default_administrator_rights(request).await
    }

    pub async fn get_my_default_administrator_rights(
        &self,
        request: &GetMyDefaultAdministratorRightsRequest,
    ) -> Result<ChatAdministratorRights, TelegramError> {
        SettingsApi::new(self.context.clone()).get_my_default_administrator_rights(request).await
    }

    // Messages

    pub async fn send_message(
        &self,
        request: &SendMessageRequest,
    ) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).send_message(request).await
    }

    pub async fn forward_message(
        &self,
        request: &ForwardMessageRequest,
    ) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).forward_message(request).await
    }

    pub async fn forward_messages(
        &self,
        request: &ForwardMessagesRequest,
    ) -> Result<Vec<MessageId>, TelegramError> {
        MessagesApi::new(self.context.clone()).forward_messages(request).await
    }

    pub async fn copy_message(
        &self,
        request: &CopyMessageRequest,
    ) -> Result<MessageId, TelegramError> {
        MessagesApi::new(self.context.clone()).copy_message(request).await
    }

    pub async fn copy_messages(
        &self,
        request: &ForwardMessagesRequest,
    ) -> Result<Vec<MessageId>, TelegramError> {
        MessagesApi::new(self.context.clone()).copy_messages(request).await
    }

    pub async fn send_location(
        &self,
        request: &SendLocationRequest,
    ) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).send_location(request).await
    }

    pub async fn send_venue(&self, request: &SendVenueRequest) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).send_venue(request).await
    }

    pub async fn send_contact(
        &self,
        request: &SendContactRequest,
    ) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).send_contact(request).await
    }

    pub async fn send_poll(&self, request: &SendPollRequest) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).send_poll(request).await
    }

    pub async fn send_dice(&self, request: &SendDiceRequest) -> Result<Message, TelegramError> {
        MessagesApi::new(self.context.clone()).send_dice(request).await
    }

    pub async fn send_chat_action(
        &self,
        request: &SendChatActionRequest,
    ) -> Result<bool, TelegramError> {
        MessagesApi::new(self.context.clone()).send_chat_action(request).await
    }

    pub async fn set_message_reaction(
        &self,
        request: &SetMessageReactionRequest,
    ) -> Result<bool, TelegramError> {
        MessagesApi::new(self.context.clone()).set_message_reaction(request).await
    }

    // Media and files

    pub async fn send_photo(&self, request: &SendPhotoRequest) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_photo(request).await
    }

    pub async fn send_audio(&self, request: &SendAudioRequest) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_audio(request).await
    }

    pub async fn send_document(
        &self,
        request: &SendDocumentRequest,
    ) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_document(request).await
    }

    pub async fn send_video(&self, request: &SendVideoRequest) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_video(request).await
    }

    pub async fn send_animation(
        &self,
        request: &SendAnimationRequest,
    ) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_animation(request).await
    }

    pub async fn send_voice(&self, request: &SendVoiceRequest) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_voice(request).await
    }

    pub async fn send_video_note(
        &self,
        request: &SendVideoNoteRequest,
    ) -> Result<Message, TelegramError> {
        MediaApi::new(self.context.clone()).send_video_note(request).await
    }

    pub async fn send_media_group(
        &self,
        request: &SendMediaGroupRequest,
    ) -> Result<Vec<Message>, TelegramError> {
        MediaApi::new(self.context.clone()).send_media_group(request).await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<File, TelegramError> {
        MediaApi::new(self.context.clone()).get_file(file_id).await
    }

    pub async fn get_user_profile_photos(
        &self,
        request: &GetUserProfilePhotosRequest,
    ) -> Result<UserProfilePhotos, TelegramError> {
        MediaApi::new(self.context.clone()).get_user_profile_photos(request).await
    }

    // Editing

    pub async fn edit_message_text(
        &self,
        request: &EditMessageTextRequest,
    ) -> Result<EditResult, TelegramError> {
        EditingApi::new(self.context.clone()).edit_message_text(request).await
    }

    pub async fn edit_message_caption(
        &self,
        request: &EditMessageCaptionRequest,
    ) -> Result<EditResult, TelegramError> {
        EditingApi::new(self.context.clone()).edit_message_caption(request).await
    }

    pub async fn edit_message_media(
        &self,
        request: &EditMessageMediaRequest,
    ) -> Result<EditResult, TelegramError> {
        EditingApi::new(self.context.clone()).edit_message_media(request).await
    }

    pub async fn edit_message_live_location(
        &self,
        request: &EditMessageLiveLocationRequest,
    ) -> Result<EditResult, TelegramError> {
        EditingApi::new(self.context.clone()).edit_message_live_location(request).await
    }

    pub async fn stop_message_live_location(
        &self,
        request: &StopMessageLiveLocationRequest,
    ) -> Result<EditResult, TelegramError> {
        EditingApi::new(self.context.clone()).stop_message_live_location(request).await
    }

    pub async fn edit_message_reply_markup(
        &self,
        request: &EditMessageReplyMarkupRequest,
    ) -> Result<EditResult, TelegramError> {
        EditingApi::new(self.context.clone()).edit_message_reply_markup(request).await
    }

    pub async fn stop_poll(&self, request: &StopPollRequest) -> Result<Poll, TelegramError> {
        EditingApi::new(self.context.clone()).stop_poll(request).await
    }

    pub async fn delete_message(
        &self,
        request: &DeleteMessageRequest,
    ) -> Result<bool, TelegramError> {
        EditingApi::new(self.context.clone()).delete_message(request).await
    }

    pub async fn delete_messages(
        &self,
        request: &DeleteMessagesRequest,
    ) -> Result<bool, TelegramError> {
        EditingApi::new(self.context.clone()).delete_messages(request).await
    }

    // Chats

    pub async fn get_chat(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<ChatFullInfo, TelegramError> {
        ChatsApi::new(self.context.clone()).get_chat(chat_id).await
    }

    pub async fn get_chat_administrators(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<Vec<ChatMember>, TelegramError> {
        ChatsApi::new(self.context.clone()).get_chat_administrators(chat_id).await
    }

    pub async fn get_chat_member_count(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<i32, TelegramError> {
        ChatsApi::new(self.context.clone()).get_chat_member_count(chat_id).await
    }

    pub async fn get_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<ChatMember, TelegramError> {
        ChatsApi::new(self.context.clone()).get_chat_member(chat_id, user_id).await
    }

    pub async fn leave_chat(&self, chat_id: impl Into<ChatId>) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).leave_chat(chat_id).await
    }

    pub async fn set_chat_title(
        &self,
        chat_id: impl Into<ChatId>,
        title: &str,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).set_chat_title(chat_id, title).await
    }

    pub async fn set_chat_description(
        &self,
        chat_id: impl Into<ChatId>,
        description: Option<&str>,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).set_chat_description(chat_id, description).await
    }

    pub async fn set_chat_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: InputFile,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).set_chat_photo(chat_id, photo).await
    }

    pub async fn delete_chat_photo(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).delete_chat_photo(chat_id).await
    }

    pub async fn pin_chat_message(
        &self,
        request: &PinChatMessageRequest,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).pin_chat_message(request).await
    }

    pub async fn unpin_chat_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: Option<i32>,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).unpin_chat_message(chat_id, message_id).await
    }

    pub async fn unpin_all_chat_messages(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).unpin_all_chat_messages(chat_id).await
    }

    pub async fn set_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
        sticker_set_name: &str,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).set_chat_sticker_set(chat_id, sticker_set_name).await
    }

    pub async fn delete_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ChatsApi::new(self.context.clone()).delete_chat_sticker_set(chat_id).await
    }

    // Members

    pub async fn ban_chat_member(
        &self,
        request: &BanChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).ban_chat_member(request).await
    }

    pub async fn unban_chat_member(
        &self,
        request: &UnbanChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).unban_chat_member(request).await
    }

    pub async fn restrict_chat_member(
        &self,
        request: &RestrictChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).restrict_chat_member(request).await
    }

    pub async fn promote_chat_member(
        &self,
        request: &PromoteChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).promote_chat_member(request).await
    }

    pub async fn set_chat_administrator_custom_title(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        custom_title: &str,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone())
            .set_chat_administrator_custom_title(chat_id, user_id, custom_title)
            .await
    }

    pub async fn ban_chat_sender_chat(
        &self,
        chat_id: impl Into<ChatId>,
        sender_chat_id: i64,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).ban_chat_sender_chat(chat_id, sender_chat_id).await
    }

    pub async fn unban_chat_sender_chat(
        &self,
        chat_id: impl Into<ChatId>,
        sender_chat_id: i64,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).unban_chat_sender_chat(chat_id, sender_chat_id).await
    }

    pub async fn set_chat_permissions(
        &self,
        request: &SetChatPermissionsRequest,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).set_chat_permissions(request).await
    }

    pub async fn approve_chat_join_request(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).approve_chat_join_request(chat_id, user_id).await
    }

    pub async fn decline_chat_join_request(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<bool, TelegramError> {
        MembersApi::new(self.context.clone()).decline_chat_join_request(chat_id, user_id).await
    }

    // Invite links

    pub async fn export_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<String, TelegramError> {
        InviteLinksApi::new(self.context.clone()).export_chat_invite_link(chat_id).await
    }

    pub async fn create_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        options: InviteLinkOptions,
    ) -> Result<ChatInviteLink, TelegramError> {
        InviteLinksApi::new(self.context.clone()).create_chat_invite_link(chat_id, options).await
    }

    pub async fn edit_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        invite_link: &str,
        options: InviteLinkOptions,
    ) -> Result<ChatInviteLink, TelegramError> {
        InviteLinksApi::new(self.context.clone())
            .edit_chat_invite_link(chat_id, invite_link, options)
            .await
    }

    pub async fn revoke_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        invite_link: &str,
    ) -> Result<ChatInviteLink, TelegramError> {
        InviteLinksApi::new(self.context.clone())
            .revoke_chat_invite_link(chat_id, invite_link)
            .await
    }

    // Forum topics

    pub async fn get_forum_topic_icon_stickers(&self) -> Result<Vec<Sticker>, TelegramError> {
        ForumApi::new(self.context.clone()).get_forum_topic_icon_stickers().await
    }

    pub async fn create_forum_topic(
        &self,
        request: &CreateForumTopicRequest,
    ) -> Result<ForumTopic, TelegramError> {
        ForumApi::new(self.context.clone()).create_forum_topic(request).await
    }

    pub async fn edit_forum_topic(
        &self,
        request: &EditForumTopicRequest,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).edit_forum_topic(request).await
    }

    pub async fn close_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).close_forum_topic(chat_id, message_thread_id).await
    }

    pub async fn reopen_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).reopen_forum_topic(chat_id, message_thread_id).await
    }

    pub async fn delete_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).delete_forum_topic(chat_id, message_thread_id).await
    }

    pub async fn unpin_all_forum_topic_messages(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone())
            .unpin_all_forum_topic_messages(chat_id, message_thread_id)
            .await
    }

    pub async fn edit_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        name: &str,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).edit_general_forum_topic(chat_id, name).await
    }

    pub async fn close_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).close_general_forum_topic(chat_id).await
    }

    pub async fn reopen_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).reopen_general_forum_topic(chat_id).await
    }

    pub async fn hide_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).hide_general_forum_topic(chat_id).await
    }

    pub async fn unhide_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).unhide_general_forum_topic(chat_id).await
    }

    pub async fn unpin_all_general_forum_topic_messages(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        ForumApi::new(self.context.clone()).unpin_all_general_forum_topic_messages(chat_id).await
    }

    // Queries

    pub async fn answer_callback_query(
        &self,
        request: &AnswerCallbackQueryRequest,
    ) -> Result<bool, TelegramError> {
        QueriesApi::new(self.context.clone()).answer_callback_query(request).await
    }

    pub async fn answer_inline_query(
        &self,
        request: &AnswerInlineQueryRequest,
    ) -> Result<bool, TelegramError> {
        QueriesApi::new(self.context.clone()).answer_inline_query(request).await
    }

    pub async fn answer_web_app_query(
        &self,
        web_app_query_id: &str,
        result: InlineQueryResult,
    ) -> Result<SentWebAppMessage, TelegramError> {
        QueriesApi::new(self.context.clone()).answer_web_app_query(web_app_query_id, result).await
    }

    // Stickers

    pub async fn send_sticker(
        &self,
        request: &SendStickerRequest,
    ) -> Result<Message, TelegramError> {
        StickersApi::new(self.context.clone()).send_sticker(request).await
    }

    pub async fn get_sticker_set(&self, name: &str) -> Result<StickerSet, TelegramError> {
        StickersApi::new(self.context.clone()).get_sticker_set(name).await
    }

    pub async fn get_custom_emoji_stickers(
        &self,
        custom_emoji_ids: Vec<String>,
    ) -> Result<Vec<Sticker>, TelegramError> {
        StickersApi::new(self.context.clone()).get_custom_emoji_stickers(custom_emoji_ids).await
    }

    pub async fn upload_sticker_file(
        &self,
        user_id: i64,
        sticker: InputFile,
        sticker_format: StickerFormat,
    ) -> Result<File, TelegramError> {
        StickersApi::new(self.context.clone())
            .upload_sticker_file(user_id, sticker, sticker_format)
            .await
    }

    pub async fn create_new_sticker_set(
        &self,
        request: &CreateNewStickerSetRequest,
    ) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).create_new_sticker_set(request).await
    }

    pub async fn add_sticker_to_set(
        &self,
        user_id: i64,
        name: &str,
        sticker: InputSticker,
    ) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).add_sticker_to_set(user_id, name, sticker).await
    }

    pub async fn set_sticker_position_in_set(
        &self,
        sticker: &str,
        position: u32,
    ) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).set_sticker_position_in_set(sticker, position).await
    }

    pub async fn delete_sticker_from_set(&self, sticker: &str) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).delete_sticker_from_set(sticker).await
    }

    pub async fn set_sticker_emoji_list(
        &self,
        sticker: &str,
        emoji_list: Vec<String>,
    ) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).set_sticker_emoji_list(sticker, emoji_list).await
    }

    pub async fn set_sticker_keywords(
        &self,
        sticker: &str,
        keywords: Option<Vec<String>>,
    ) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).set_sticker_keywords(sticker, keywords).await
    }

    pub async fn set_sticker_set_title(
        &self,
        name: &str,
        title: &str,
    ) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).set_sticker_set_title(name, title).await
    }

    pub async fn delete_sticker_set(&self, name: &str) -> Result<bool, TelegramError> {
        StickersApi::new(self.context.clone()).delete_sticker_set(name).await
    }

    // Payments

    pub async fn send_invoice(
        &self,
        request: &SendInvoiceRequest,
    ) -> Result<Message, TelegramError> {
        PaymentsApi::new(self.context.clone()).send_invoice(request).await
    }

    pub async fn create_invoice_link(
        &self,
        invoice: &InvoiceDetails,
    ) -> Result<String, TelegramError> {
        PaymentsApi::new(self.context.clone()).create_invoice_link(invoice).await
    }

    pub async fn answer_shipping_query(
        &self,
        shipping_query_id: &str,
        answer: &ShippingAnswer,
    ) -> Result<bool, TelegramError> {
        PaymentsApi::new(self.context.clone())
            .answer_shipping_query(shipping_query_id, answer)
            .await
    }

    pub async fn answer_pre_checkout_query(
        &self,
        pre_checkout_query_id: &str,
        answer: &PreCheckoutAnswer,
    ) -> Result<bool, TelegramError> {
        PaymentsApi::new(self.context.clone())
            .answer_pre_checkout_query(pre_checkout_query_id, answer)
            .await
    }

    // Games

    pub async fn send_game(&self, request: &SendGameRequest) -> Result<Message, TelegramError> {
        GamesApi::new(self.context.clone()).send_game(request).await
    }

    pub async fn set_game_score(
        &self,
        request: &SetGameScoreRequest,
    ) -> Result<EditResult, TelegramError> {
        GamesApi::new(self.context.clone()).set_game_score(request).await
    }

    pub async fn get_game_high_scores(
        &self,
        target: MessageTarget,
        user_id: i64,
    ) -> Result<Vec<GameHighScore>, TelegramError> {
        GamesApi::new(self.context.clone()).get_game_high_scores(target, user_id).await
    }
}

impl From<Arc<BotContext>> for Bot {
    fn from(context: Arc<BotContext>) -> Self {
        Self { context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatId, ParseMode};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

    fn bot(base_url: &str) -> Bot {
        Bot::builder()
            .token(BotToken::new(TOKEN).unwrap())
            .base_url(base_url)
            .build()
            .unwrap()
    }

    #[test]
    fn test_bot_is_shareable() {
        fn assert_send_sync_clone<T: Send + Sync + Clone + 'static>() {}
        assert_send_sync_clone::<Bot>();
    }

    #[test]
    fn test_new_rejects_malformed_token() {
        let error = Bot::new("not-a-token").unwrap_err();
        assert!(matches!(error, TelegramError::Config(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let bot = Bot::new(TOKEN).unwrap();
        let debug = format!("{:?}", bot);
        assert!(!debug.contains("ABC-DEF1234ghIkl"));
        assert_eq!(bot.id(), Some(123456));
    }

    #[test]
    fn test_file_url() {
        let bot = bot("https://api.example.org");
        assert_eq!(
            bot.file_url("photos/file 1.jpg"),
            format!("https://api.example.org/file/bot{TOKEN}/photos/file%201.jpg")
        );
    }

    #[tokio::test]
    async fn test_get_me_uses_get() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getMe")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"id": 123456, "is_bot": true, "first_name": "Echo"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let me = bot(&mock_server.uri()).get_me().await.unwrap();
        assert_eq!(me.id, 123456);
    }

    #[tokio::test]
    async fn test_send_message_through_facade() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendMessage")))
            .and(body_json(serde_json::json!({
                "chat_id": "@channel",
                "text": "<b>hi</b>",
                "parse_mode": "HTML"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {
                    "message_id": 3,
                    "date": 1700000000,
                    "chat": {"id": -100, "type": "channel", "title": "News"},
                    "text": "hi"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = SendMessageRequest::new(ChatId::from("@channel"), "<b>hi</b>")
            .parse_mode(ParseMode::Html);
        let message = bot(&mock_server.uri()).send_message(&request).await.unwrap();
        assert_eq!(message.message_id, 3);
    }

    #[tokio::test]
    async fn test_clones_share_one_client() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/getChatMemberCount")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": 5
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let first = bot(&mock_server.uri());
        let second = first.clone();
        let (a, b) = tokio::join!(
            first.get_chat_member_count(-100),
            second.get_chat_member_count(-100)
        );
        assert_eq!(a.unwrap() + b.unwrap(), 10);
        assert!(std::ptr::eq(first.client(), second.client()));
    }
}
