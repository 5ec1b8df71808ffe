use std::sync::Arc;

use serde::Serialize;

use crate::api::chats::ChatRequest;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{ChatId, ForumTopic, Sticker};
use crate::utils::{check_len, check_opt_len};

/// Icon colors accepted by createForumTopic
pub const TOPIC_ICON_COLORS: [u32; 6] = [
    0x6FB9F0, 0xFFD67E, 0xCB86DB, 0x8EEE98, 0xFF93B2, 0xFB6F5F,
];

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct CreateForumTopicRequest {
    pub chat_id: ChatId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

impl CreateForumTopicRequest {
    pub fn new(chat_id: impl Into<ChatId>, name: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            name: name.into(),
            icon_color: None,
            icon_custom_emoji_id: None,
        }
    }

    pub fn icon_color(mut self, icon_color: u32) -> Self {
        self.icon_color = Some(icon_color);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_len("name", &self.name, 1, 128)?;
        match self.icon_color {
            Some(color) if !TOPIC_ICON_COLORS.contains(&color) => Err(TelegramError::validation(
                format!("icon_color {color:#08X} is not one of the supported colors"),
            )),
            _ => Ok(()),
        }
    }
}

/// Unset fields keep their current value; an empty `icon_custom_emoji_id`
/// removes the icon.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct EditForumTopicRequest {
    pub chat_id: ChatId,
    pub message_thread_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

impl EditForumTopicRequest {
    pub fn new(chat_id: impl Into<ChatId>, message_thread_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_thread_id,
            name: None,
            icon_custom_emoji_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn icon_custom_emoji_id(mut self, icon_custom_emoji_id: impl Into<String>) -> Self {
        self.icon_custom_emoji_id = Some(icon_custom_emoji_id.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_len("name", self.name.as_deref(), 0, 128)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForumTopicRequest {
    pub chat_id: ChatId,
    pub message_thread_id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditGeneralForumTopicRequest {
    pub chat_id: ChatId,
    pub name: String,
}

/// Forum topic management API
pub struct ForumApi {
    context: Arc<BotContext>,
}

impl ForumApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    async fn topic_call(
        &self,
        method: &str,
        chat_id: ChatId,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        let request = ForumTopicRequest {
            chat_id,
            message_thread_id,
        };
        self.context.client.post(method, &request).await
    }

    async fn general_call(&self, method: &str, chat_id: ChatId) -> Result<bool, TelegramError> {
        self.context
            .client
            .post(method, &ChatRequest { chat_id })
            .await
    }

    /// Custom emoji stickers usable as forum topic icons.
    ///
    /// GET getForumTopicIconStickers
    pub async fn get_forum_topic_icon_stickers(&self) -> Result<Vec<Sticker>, TelegramError> {
        self.context.client.get("getForumTopicIconStickers").await
    }

    /// POST createForumTopic
    pub async fn create_forum_topic(
        &self,
        request: &CreateForumTopicRequest,
    ) -> Result<ForumTopic, TelegramError> {
        request.validate()?;
        self.context.client.post("createForumTopic", request).await
    }

    /// POST editForumTopic
    pub async fn edit_forum_topic(
        &self,
        request: &EditForumTopicRequest,
    ) -> Result<bool, TelegramError> {
        request.validate()?;
        self.context.client.post("editForumTopic", request).await
    }

    /// POST closeForumTopic
    pub async fn close_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        self.topic_call("closeForumTopic", chat_id.into(), message_thread_id)
            .await
    }

    /// POST reopenForumTopic
    pub async fn reopen_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        self.topic_call("reopenForumTopic", chat_id.into(), message_thread_id)
            .await
    }

    /// Delete a topic along with all its messages.
    ///
    /// POST deleteForumTopic
    pub async fn delete_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        self.topic_call("deleteForumTopic", chat_id.into(), message_thread_id)
            .await
    }

    /// POST unpinAllForumTopicMessages
    pub async fn unpin_all_forum_topic_messages(
        &self,
        chat_id: impl Into<ChatId>,
        message_thread_id: i32,
    ) -> Result<bool, TelegramError> {
        self.topic_call(
            "unpinAllForumTopicMessages",
            chat_id.into(),
            message_thread_id,
        )
        .await
    }

    /// POST editGeneralForumTopic
    pub async fn edit_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
        name: &str,
    ) -> Result<bool, TelegramError> {
        check_len("name", name, 1, 128)?;
        let request = EditGeneralForumTopicRequest {
            chat_id: chat_id.into(),
            name: name.to_string(),
        };
        self.context
            .client
            .post("editGeneralForumTopic", &request)
            .await
    }

    /// POST closeGeneralForumTopic
    pub async fn close_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.general_call("closeGeneralForumTopic", chat_id.into())
            .await
    }

    /// POST reopenGeneralForumTopic
    pub async fn reopen_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.general_call("reopenGeneralForumTopic", chat_id.into())
            .await
    }

    /// The topic is closed automatically if it was open.
    ///
    /// POST hideGeneralForumTopic
    pub async fn hide_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.general_call("hideGeneralForumTopic", chat_id.into())
            .await
    }

    /// POST unhideGeneralForumTopic
    pub async fn unhide_general_forum_topic(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.general_call("unhideGeneralForumTopic", chat_id.into())
            .await
    }

    /// POST unpinAllGeneralForumTopicMessages
    pub async fn unpin_all_general_forum_topic_messages(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<bool, TelegramError> {
        self.general_call("unpinAllGeneralForumTopicMessages", chat_id.into())
            .await
    }
}

impl BotApi for ForumApi {
    fn api_name(&self) -> &'static str {
        "forum"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
