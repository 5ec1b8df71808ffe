use std::sync::Arc;

use serde::Serialize;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{ChatFullInfo, ChatId, ChatMember, InputFile};
use crate::utils::{check_len, check_opt_len};

/// Body of the operations that only name a chat
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub chat_id: ChatId,
}

impl ChatRequest {
    pub fn new(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: chat_id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetChatMemberRequest {
    pub chat_id: ChatId,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetChatTitleRequest {
    pub chat_id: ChatId,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetChatDescriptionRequest {
    pub chat_id: ChatId,
    /// Unset clears the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetChatPhotoRequest {
    pub chat_id: ChatId,
    pub photo: InputFile,
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct PinChatMessageRequest {
    pub chat_id: ChatId,
    pub message_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
}

impl PinChatMessageRequest {
    pub fn new(chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_id,
            disable_notification: None,
        }
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnpinChatMessageRequest {
    pub chat_id: ChatId,
    /// Unset unpins the most recent pinned message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetChatStickerSetRequest {
    pub chat_id: ChatId,
    pub sticker_set_name: String,
}

/// Chat information and settings API
pub struct ChatsApi {
    context: Arc<BotContext>,
}

impl ChatsApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST getChat
    pub async fn get_chat(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<ChatFullInfo, TelegramError> {
        self.context
            .client
            .post("getChat", &ChatRequest::new(chat_id))
            .await
    }

    /// Administrators other than bots.
    ///
    /// POST getChatAdministrators
    pub async fn get_chat_administrators(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<Vec<ChatMember>, TelegramError> {
        self.context
            .client
            .post("getChatAdministrators", &ChatRequest::new(chat_id))
            .await
    }

    /// POST getChatMemberCount
    pub async fn get_chat_member_count(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<i32, TelegramError> {
        self.context
            .client
            .post("getChatMemberCount", &ChatRequest::new(chat_id))
            .await
    }

    /// POST getChatMember
    pub async fn get_chat_member(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<ChatMember, TelegramError> {
        let request = GetChatMemberRequest {
            chat_id: chat_id.into(),
            user_id,
        };
        self.context.client.post("getChatMember", &request).await
    }

    /// POST leaveChat
    pub async fn leave_chat(&self, chat_id: impl Into<ChatId>) -> Result<bool, TelegramError> {
        self.context
            .client
            .post("leaveChat", &ChatRequest::new(chat_id))
            .await
    }

    /// POST setChatTitle
    pub async fn set_chat_title(
        &self,
        chat_id: impl Into<ChatId>,
        title: &str,
    ) -> Result<bool, TelegramError> {
        check_len("title", title, 1, 128)?;
        let request = SetChatTitleRequest {
            chat_id: chat_id.into(),
            title: title.to_string(),
        };
        self.context.client.post("setChatTitle", &request).await
    }

    /// POST setChatDescription
    pub async fn set_chat_description(
        &self,
        chat_id: impl Into<ChatId>,
        description: Option<&str>,
    ) -> Result<bool, TelegramError> {
        check_opt_len("description", description, 0, 255)?;
        let request = SetChatDescriptionRequest {
            chat_id: chat_id.into(),
            description: description.map(str::to_string),
        };
        self.context
            .client
            .post("setChatDescription", &request)
            .await
    }

    /// The photo must be a new upload.
    ///
    /// POST setChatPhoto
    pub async fn set_chat_photo(
        &self,
        chat_id: impl Into<ChatId>,
        photo: InputFile,
    ) -> Result<bool, TelegramError> {
        if !photo.is_upload() {
            return Err(TelegramError::validation(
                "chat photos must be uploaded, not referenced by file_id or URL",
            ));
        }
        let request = SetChatPhotoRequest {
            chat_id: chat_id.into(),
            photo,
        };
        self.context
            .client
            .post_with_files("setChatPhoto", &request, &[&request.photo])
            .await
    }

    /// POST deleteChatPhoto
    pub async fn delete_chat_photo(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.context
            .client
            .post("deleteChatPhoto", &ChatRequest::new(chat_id))
            .await
    }

    /// POST pinChatMessage
    pub async fn pin_chat_message(
        &self,
        request: &PinChatMessageRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("pinChatMessage", request).await
    }

    /// POST unpinChatMessage
    pub async fn unpin_chat_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: Option<i32>,
    ) -> Result<bool, TelegramError> {
        let request = UnpinChatMessageRequest {
            chat_id: chat_id.into(),
            message_id,
        };
        self.context.client.post("unpinChatMessage", &request).await
    }

    /// POST unpinAllChatMessages
    pub async fn unpin_all_chat_messages(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.context
            .client
            .post("unpinAllChatMessages", &ChatRequest::new(chat_id))
            .await
    }

    /// Supergroups only; check `can_set_sticker_set` from getChat first.
    ///
    /// POST setChatStickerSet
    pub async fn set_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
        sticker_set_name: &str,
    ) -> Result<bool, TelegramError> {
        let request = SetChatStickerSetRequest {
            chat_id: chat_id.into(),
            sticker_set_name: sticker_set_name.to_string(),
        };
        self.context.client.post("setChatStickerSet", &request).await
    }

    /// POST deleteChatStickerSet
    pub async fn delete_chat_sticker_set(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.context
            .client
            .post("deleteChatStickerSet", &ChatRequest::new(chat_id))
            .await
    }
}

impl BotApi for ChatsApi {
    fn api_name(&self) -> &'static str {
        "chats"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
