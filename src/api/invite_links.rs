use std::sync::Arc;

use serde::Serialize;

use crate::api::chats::ChatRequest;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{ChatId, ChatInviteLink};
use crate::utils::{check_opt_len, check_opt_range};

/// Options shared by createChatInviteLink and editChatInviteLink
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct InviteLinkOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<i64>,
    /// 1-99999 simultaneous members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_limit: Option<u32>,
    /// Cannot be combined with `member_limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creates_join_request: Option<bool>,
}

impl InviteLinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expire_date(mut self, expire_date: i64) -> Self {
        self.expire_date = Some(expire_date);
        self
    }

    pub fn member_limit(mut self, member_limit: u32) -> Self {
        self.member_limit = Some(member_limit);
        self
    }

    pub fn creates_join_request(mut self) -> Self {
        self.creates_join_request = Some(true);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_len("name", self.name.as_deref(), 0, 32)?;
        check_opt_range("member_limit", self.member_limit, 1, 99_999)?;
        if self.member_limit.is_some() && self.creates_join_request == Some(true) {
            return Err(TelegramError::validation(
                "member_limit cannot be combined with creates_join_request",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateChatInviteLinkRequest {
    pub chat_id: ChatId,
    #[serde(flatten)]
    pub options: InviteLinkOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditChatInviteLinkRequest {
    pub chat_id: ChatId,
    pub invite_link: String,
    #[serde(flatten)]
    pub options: InviteLinkOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeChatInviteLinkRequest {
    pub chat_id: ChatId,
    pub invite_link: String,
}

/// Invite link management API
pub struct InviteLinksApi {
    context: Arc<BotContext>,
}

impl InviteLinksApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// Generate a new primary invite link, revoking the previous one.
    ///
    /// POST exportChatInviteLink
    pub async fn export_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
    ) -> Result<String, TelegramError> {
        self.context
            .client
            .post("exportChatInviteLink", &ChatRequest::new(chat_id))
            .await
    }

    /// POST createChatInviteLink
    pub async fn create_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        options: InviteLinkOptions,
    ) -> Result<ChatInviteLink, TelegramError> {
        options.validate()?;
        let request = CreateChatInviteLinkRequest {
            chat_id: chat_id.into(),
            options,
        };
        self.context
            .client
            .post("createChatInviteLink", &request)
            .await
    }

    /// POST editChatInviteLink
    pub async fn edit_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        invite_link: &str,
        options: InviteLinkOptions,
    ) -> Result<ChatInviteLink, TelegramError> {
        options.validate()?;
        let request = EditChatInviteLinkRequest {
            chat_id: chat_id.into(),
            invite_link: invite_link.to_string(),
            options,
        };
        self.context.client.post("editChatInviteLink", &request).await
    }

    /// POST revokeChatInviteLink
    pub async fn revoke_chat_invite_link(
        &self,
        chat_id: impl Into<ChatId>,
        invite_link: &str,
    ) -> Result<ChatInviteLink, TelegramError> {
        let request = RevokeChatInviteLinkRequest {
            chat_id: chat_id.into(),
            invite_link: invite_link.to_string(),
        };
        self.context
            .client
            .post("revokeChatInviteLink", &request)
            .await
    }
}

impl BotApi for InviteLinksApi {
    fn api_name(&self) -> &'static str {
        "invite_links"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{method_path, ok, test_context};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer};

    fn link_json(revoked: bool) -> serde_json::Value {
        serde_json::json!({
            "invite_link": "https://t.me/+AbCdEf",
            "creator": {"id": 123456, "is_bot": true, "first_name": "Echo"},
            "creates_join_request": false,
            "is_primary": false,
            "is_revoked": revoked,
            "name": "launch",
            "member_limit": 10
        })
    }

    #[test]
    fn test_member_limit_bounds() {
        assert!(InviteLinkOptions::new().member_limit(0).validate().is_err());
        assert!(InviteLinkOptions::new().member_limit(100_000).validate().is_err());
        assert!(InviteLinkOptions::new().member_limit(99_999).validate().is_ok());
    }

    #[test]
    fn test_member_limit_excludes_join_requests() {
        let options = InviteLinkOptions::new()
            .member_limit(5)
            .creates_join_request();
        assert!(options.validate().is_err());
    }

    #[tokio::test]
    async fn test_export_returns_plain_string() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("exportChatInviteLink")))
            .respond_with(ok(serde_json::json!("https://t.me/+XyZ")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = InviteLinksApi::new(test_context(&mock_server.uri()));
        let link = api.export_chat_invite_link(-100).await.unwrap();
        assert_eq!(link, "https://t.me/+XyZ");
    }

    #[tokio::test]
    async fn test_create_and_revoke() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("createChatInviteLink")))
            .and(body_json(serde_json::json!({
                "chat_id": -100,
                "name": "launch",
                "member_limit": 10
            })))
            .respond_with(ok(link_json(false)))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path(method_path("revokeChatInviteLink")))
            .and(body_json(serde_json::json!({
                "chat_id": -100,
                "invite_link": "https://t.me/+AbCdEf"
            })))
            .respond_with(ok(link_json(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = InviteLinksApi::new(test_context(&mock_server.uri()));
        let link = api
            .create_chat_invite_link(-100, InviteLinkOptions::new().name("launch").member_limit(10))
            .await
            .unwrap();
        assert_eq!(link.member_limit, Some(10));

        let revoked = api
            .revoke_chat_invite_link(-100, &link.invite_link)
            .await
            .unwrap();
        assert!(revoked.is_revoked);
    }
}
