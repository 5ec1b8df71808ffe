use serde::{Deserialize, Serialize};

use super::message::Message;
use super::user::{ChatMember, ChatPermissions, User};

/// Kind of chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    /// Chat kinds added to the API after this crate was written
    #[serde(other)]
    Unknown,
}

/// A chat as embedded in messages and updates
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Chat {
    /// Unique identifier (up to 52 significant bits, may be negative)
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_forum: Option<bool>,
}

impl Chat {
    pub fn new(id: i64, chat_type: ChatType) -> Self {
        Self {
            id,
            chat_type,
            title: None,
            username: None,
            first_name: None,
            last_name: None,
            is_forum: None,
        }
    }

    pub fn is_private(&self) -> bool {
        self.chat_type == ChatType::Private
    }
}

/// Chat profile photo
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatPhoto {
    pub small_file_id: String,
    pub small_file_unique_id: String,
    pub big_file_id: String,
    pub big_file_unique_id: String,
}

/// Full chat information returned by getChat
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatFullInfo {
    #[serde(flatten)]
    pub chat: Chat,
    /// Accent color identifier for the chat name
    #[serde(default)]
    pub accent_color_id: i32,
    #[serde(default)]
    pub max_reaction_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ChatPhoto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_usernames: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<ChatPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_mode_delay: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_auto_delete_time: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_protected_content: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker_set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_set_sticker_set: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_chat_id: Option<i64>,
}

/// An invite link for a chat
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatInviteLink {
    pub invite_link: String,
    pub creator: User,
    #[serde(default)]
    pub creates_join_request: bool,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub is_revoked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_join_request_count: Option<i32>,
}

/// Change in the status of a chat member
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: i64,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<ChatInviteLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_chat_folder_invite_link: Option<bool>,
}

/// A join request sent to a chat
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatJoinRequest {
    pub chat: Chat,
    pub from: User,
    /// Identifier of a private chat with the requesting user, valid for 5 minutes
    pub user_chat_id: i64,
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<ChatInviteLink>,
}

/// A topic in a forum supergroup
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ForumTopic {
    pub message_thread_id: i32,
    pub name: String,
    /// RGB color of the topic icon
    pub icon_color: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_type_unknown_falls_back() {
        let chat: Chat = serde_json::from_str(r#"{"id":1,"type":"secret_room"}"#).unwrap();
        assert_eq!(chat.chat_type, ChatType::Unknown);
    }

    #[test]
    fn test_private_chat() {
        let chat: Chat =
            serde_json::from_str(r#"{"id":42,"type":"private","first_name":"Ada"}"#).unwrap();
        assert!(chat.is_private());
        assert_eq!(chat.first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_chat_full_info_flattens_chat() {
        let json = r#"{
            "id": -1001234567890,
            "type": "supergroup",
            "title": "Rustaceans",
            "accent_color_id": 3,
            "max_reaction_count": 11,
            "description": "All things Rust",
            "permissions": {"can_send_messages": true},
            "linked_chat_id": -1009876543210
        }"#;
        let info: ChatFullInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.chat.id, -1001234567890);
        assert_eq!(info.chat.title.as_deref(), Some("Rustaceans"));
        assert_eq!(info.accent_color_id, 3);
        assert_eq!(
            info.permissions.unwrap().can_send_messages,
            Some(true)
        );
        assert_eq!(info.linked_chat_id, Some(-1009876543210));
    }

    #[test]
    fn test_invite_link_deserialize() {
        let json = r#"{
            "invite_link": "https://t.me/+abc",
            "creator": {"id": 1, "is_bot": true, "first_name": "Bot"},
            "creates_join_request": false,
            "is_primary": false,
            "is_revoked": false,
            "member_limit": 10
        }"#;
        let link: ChatInviteLink = serde_json::from_str(json).unwrap();
        assert_eq!(link.invite_link, "https://t.me/+abc");
        assert_eq!(link.member_limit, Some(10));
    }
}
