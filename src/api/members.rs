use std::sync::Arc;

use serde::Serialize;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{ChatAdministratorRights, ChatId, ChatPermissions};
use crate::utils::check_len;

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct BanChatMemberRequest {
    pub chat_id: ChatId,
    pub user_id: i64,
    /// Unix time; bans shorter than 30 seconds or longer than 366 days are
    /// permanent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoke_messages: Option<bool>,
}

impl BanChatMemberRequest {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            until_date: None,
            revoke_messages: None,
        }
    }

    pub fn until(mut self, until_date: i64) -> Self {
        self.until_date = Some(until_date);
        self
    }

    pub fn revoke_messages(mut self) -> Self {
        self.revoke_messages = Some(true);
        self
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct UnbanChatMemberRequest {
    pub chat_id: ChatId,
    pub user_id: i64,
    /// Do nothing if the user is not banned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_if_banned: Option<bool>,
}

impl UnbanChatMemberRequest {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            only_if_banned: None,
        }
    }

    pub fn only_if_banned(mut self) -> Self {
        self.only_if_banned = Some(true);
        self
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct RestrictChatMemberRequest {
    pub chat_id: ChatId,
    pub user_id: i64,
    pub permissions: ChatPermissions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_independent_chat_permissions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until_date: Option<i64>,
}

impl RestrictChatMemberRequest {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64, permissions: ChatPermissions) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            permissions,
            use_independent_chat_permissions: None,
            until_date: None,
        }
    }

    pub fn until(mut self, until_date: i64) -> Self {
        self.until_date = Some(until_date);
        self
    }
}

/// Rights set to `false` are revoked; pass all-false rights to demote.
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct PromoteChatMemberRequest {
    pub chat_id: ChatId,
    pub user_id: i64,
    #[serde(flatten)]
    pub rights: ChatAdministratorRights,
}

impl PromoteChatMemberRequest {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64, rights: ChatAdministratorRights) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            rights,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SetChatAdministratorCustomTitleRequest {
    pub chat_id: ChatId,
    pub user_id: i64,
    pub custom_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SenderChatRequest {
    pub chat_id: ChatId,
    pub sender_chat_id: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SetChatPermissionsRequest {
    pub chat_id: ChatId,
    pub permissions: ChatPermissions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_independent_chat_permissions: Option<bool>,
}

impl SetChatPermissionsRequest {
    pub fn new(chat_id: impl Into<ChatId>, permissions: ChatPermissions) -> Self {
        Self {
            chat_id: chat_id.into(),
            permissions,
            use_independent_chat_permissions: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatJoinRequestDecision {
    pub chat_id: ChatId,
    pub user_id: i64,
}

/// Member moderation API
pub struct MembersApi {
    context: Arc<BotContext>,
}

impl MembersApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST banChatMember
    pub async fn ban_chat_member(
        &self,
        request: &BanChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("banChatMember", request).await
    }

    /// POST unbanChatMember
    pub async fn unban_chat_member(
        &self,
        request: &UnbanChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("unbanChatMember", request).await
    }

    /// POST restrictChatMember
    pub async fn restrict_chat_member(
        &self,
        request: &RestrictChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("restrictChatMember", request).await
    }

    /// POST promoteChatMember
    pub async fn promote_chat_member(
        &self,
        request: &PromoteChatMemberRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("promoteChatMember", request).await
    }

    /// POST setChatAdministratorCustomTitle
    pub async fn set_chat_administrator_custom_title(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
        custom_title: &str,
    ) -> Result<bool, TelegramError> {
        check_len("custom_title", custom_title, 0, 16)?;
        if custom_title.chars().any(is_emoji) {
            return Err(TelegramError::validation(
                "custom_title must not contain emoji",
            ));
        }
        let request = SetChatAdministratorCustomTitleRequest {
            chat_id: chat_id.into(),
            user_id,
            custom_title: custom_title.to_string(),
        };
        self.context
            .client
            .post("setChatAdministratorCustomTitle", &request)
            .await
    }

    /// POST banChatSenderChat
    pub async fn ban_chat_sender_chat(
        &self,
        chat_id: impl Into<ChatId>,
        sender_chat_id: i64,
    ) -> Result<bool, TelegramError> {
        let request = SenderChatRequest {
            chat_id: chat_id.into(),
            sender_chat_id,
        };
        self.context.client.post("banChatSenderChat", &request).await
    }

    /// POST unbanChatSenderChat
    pub async fn unban_chat_sender_chat(
        &self,
        chat_id: impl Into<ChatId>,
        sender_chat_id: i64,
    ) -> Result<bool, TelegramError> {
        let request = SenderChatRequest {
            chat_id: chat_id.into(),
            sender_chat_id,
        };
        self.context
            .client
            .post("unbanChatSenderChat", &request)
            .await
    }

    /// POST setChatPermissions
    pub async fn set_chat_permissions(
        &self,
        request: &SetChatPermissionsRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("setChatPermissions", request).await
    }

    /// POST approveChatJoinRequest
    pub async fn approve_chat_join_request(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<bool, TelegramError> {
        let request = ChatJoinRequestDecision {
            chat_id: chat_id.into(),
            user_id,
        };
        self.context
            .client
            .post("approveChatJoinRequest", &request)
            .await
    }

    /// POST declineChatJoinRequest
    pub async fn decline_chat_join_request(
        &self,
        chat_id: impl Into<ChatId>,
        user_id: i64,
    ) -> Result<bool, TelegramError> {
        let request = ChatJoinRequestDecision {
            chat_id: chat_id.into(),
            user_id,
        };
        self.context
            .client
            .post("declineChatJoinRequest", &request)
            .await
    }
}

impl BotApi for MembersApi {
    fn api_name(&self) -> &'static str {
        "members"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}

// Pictographic ranges Telegram refuses in administrator titles.
fn is_emoji(c: char) -> bool {
    matches!(c as u32, 0x1F000..=0x1FAFF | 0x2600..=0x27BF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{method_path, ok, test_context};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer};

    #[test]
    fn test_promote_flattens_rights() {
        let rights = ChatAdministratorRights {
            can_delete_messages: true,
            can_pin_messages: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(PromoteChatMemberRequest::new(-100, 7, rights)).unwrap();

        assert_eq!(json["chat_id"], -100);
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["can_delete_messages"], true);
        assert_eq!(json["can_pin_messages"], true);
        assert_eq!(json["can_promote_members"], false);
        assert!(json.get("rights").is_none());
    }

    #[tokio::test]
    async fn test_ban_chat_member() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("banChatMember")))
            .and(body_json(serde_json::json!({
                "chat_id": -100,
                "user_id": 7,
                "until_date": 1700000000,
                "revoke_messages": true
            })))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = MembersApi::new(test_context(&mock_server.uri()));
        let request = BanChatMemberRequest::new(-100, 7)
            .until(1700000000)
            .revoke_messages();
        assert!(api.ban_chat_member(&request).await.unwrap());
    }

    #[tokio::test]
    async fn test_restrict_sends_only_set_permissions() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("restrictChatMember")))
            .and(body_json(serde_json::json!({
                "chat_id": -100,
                "user_id": 7,
                "permissions": {"can_send_messages": false}
            })))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = MembersApi::new(test_context(&mock_server.uri()));
        let permissions = ChatPermissions {
            can_send_messages: Some(false),
            ..Default::default()
        };
        let request = RestrictChatMemberRequest::new(-100, 7, permissions);
        assert!(api.restrict_chat_member(&request).await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_title_rules() {
        let api = MembersApi::new(test_context("http://127.0.0.1:9"));
        assert!(api
            .set_chat_administrator_custom_title(-100, 7, "seventeen chars!!")
            .await
            .is_err());
        assert!(api
            .set_chat_administrator_custom_title(-100, 7, "boss \u{1F451}")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_join_request_decisions() {
        let mock_server = MockServer::start().await;
        for name in ["approveChatJoinRequest", "declineChatJoinRequest"] {
            Mock::given(method("POST"))
                .and(path(method_path(name)))
                .and(body_json(serde_json::json!({"chat_id": -100, "user_id": 7})))
                .respond_with(ok(serde_json::json!(true)))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let api = MembersApi::new(test_context(&mock_server.uri()));
        assert!(api.approve_chat_join_request(-100, 7).await.unwrap());
        assert!(api.decline_chat_join_request(-100, 7).await.unwrap());
    }
}
