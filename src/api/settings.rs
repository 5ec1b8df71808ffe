use std::sync::Arc;

use serde::Serialize;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{
    BotCommand, BotCommandScope, BotDescription, BotName, BotShortDescription,
    ChatAdministratorRights, Field, MenuButton,
};
use crate::utils::{check_count, check_len};

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SetMyCommandsRequest {
    /// At most 100 commands
    pub commands: Vec<BotCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<BotCommandScope>,
    /// Two-letter ISO 639-1 code; empty applies to users without a dedicated list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl SetMyCommandsRequest {
    pub fn new(commands: Vec<BotCommand>) -> Self {
        Self {
            commands,
            scope: None,
            language_code: None,
        }
    }

    pub fn scope(mut self, scope: BotCommandScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_count("commands", self.commands.len(), 0, 100)?;
        self.commands.iter().try_for_each(BotCommand::validate)
    }
}

/// Scope and language selector for deleteMyCommands and getMyCommands
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandScopeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<BotCommandScope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl CommandScopeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: BotCommandScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// Language selector for the getMyName family
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct LanguageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl LanguageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }
}

/// Text setting shared by setMyName, setMyDescription and setMyShortDescription.
///
/// An explicit empty value removes the text for the given language; an absent
/// value leaves the request without the field.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetMyTextRequest {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub value: Field<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl SetMyTextRequest {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Field::Value(value.into()),
            language_code: None,
        }
    }

    /// Remove the dedicated text.
    pub fn clear() -> Self {
        Self::new("")
    }

    pub fn language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    fn validate(&self, field: &str, max: usize) -> Result<(), TelegramError> {
        match self.value.as_value() {
            Some(value) => check_len(field, value, 0, max),
            None => Ok(()),
        }
    }
}

/// Wire shape of [`SetMyTextRequest`] with the method's field name.
#[derive(Serialize)]
struct NamedText<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_description: Option<&'a Field<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a String>,
}

impl<'a> NamedText<'a> {
    fn new(request: &'a SetMyTextRequest) -> Self {
        Self {
            name: None,
            description: None,
            short_description: None,
            language_code: request.language_code.as_ref(),
        }
    }

    fn value(request: &'a SetMyTextRequest) -> Option<&'a Field<String>> {
        (!request.value.is_absent()).then_some(&request.value)
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetChatMenuButtonRequest {
    /// Private chat to change; the default menu button when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub menu_button: Field<MenuButton>,
}

impl SetChatMenuButtonRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat_id(mut self, chat_id: i64) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    pub fn menu_button(mut self, menu_button: MenuButton) -> Self {
        self.menu_button = Field::Value(menu_button);
        self
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetChatMenuButtonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
}

impl GetChatMenuButtonRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chat_id(mut self, chat_id: i64) -> Self {
        self.chat_id = Some(chat_id);
        self
    }
}

/// Rights suggested to users adding the bot as an administrator.
///
/// Leaving `rights` absent clears the defaults.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SetMyDefaultAdministratorRightsRequest {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub rights: Field<ChatAdministratorRights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_channels: Option<bool>,
}

impl SetMyDefaultAdministratorRightsRequest {
    pub fn new(rights: ChatAdministratorRights) -> Self {
        Self {
            rights: Field::Value(rights),
            for_channels: None,
        }
    }

    pub fn for_channels(mut self) -> Self {
        self.for_channels = Some(true);
        self
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetMyDefaultAdministratorRightsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub for_channels: Option<bool>,
}

/// Bot settings API: commands, profile texts, menu button, default rights
pub struct SettingsApi {
    context: Arc<BotContext>,
}

impl SettingsApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST setMyCommands
    pub async fn set_my_commands(
        &self,
        request: &SetMyCommandsRequest,
    ) -> Result<bool, TelegramError> {
        request.validate()?;
        self.context.client.post("setMyCommands", request).await
    }

    /// POST deleteMyCommands
    pub async fn delete_my_commands(
        &self,
        request: &CommandScopeRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("deleteMyCommands", request).await
    }

    /// POST getMyCommands
    pub async fn get_my_commands(
        &self,
        request: &CommandScopeRequest,
    ) -> Result<Vec<BotCommand>, TelegramError> {
        self.context.client.post("getMyCommands", request).await
    }

    /// Change the bot's name (0-64 characters).
    ///
    /// POST setMyName
    pub async fn set_my_name(&self, request: &SetMyTextRequest) -> Result<bool, TelegramError> {
        request.validate("name", 64)?;
        let body = NamedText {
            name: NamedText::value(request),
            ..NamedText::new(request)
        };
        self.context.client.post("setMyName", &body).await
    }

    /// POST getMyName
    pub async fn get_my_name(&self, request: &LanguageRequest) -> Result<BotName, TelegramError> {
        self.context.client.post("getMyName", request).await
    }

    /// Change the text shown in an empty chat with the bot (0-512 characters).
    ///
    /// POST setMyDescription
    pub async fn set_my_description(
        &self,
        request: &SetMyTextRequest,
    ) -> Result<bool, TelegramError> {
        request.validate("description", 512)?;
        let body = NamedText {
            description: NamedText::value(request),
            ..NamedText::new(request)
        };
        self.context.client.post("setMyDescription", &body).await
    }

    /// POST getMyDescription
    pub async fn get_my_description(
        &self,
        request: &LanguageRequest,
    ) -> Result<BotDescription, TelegramError> {
        self.context.client.post("getMyDescription", request).await
    }

    /// Change the profile page text (0-120 characters).
    ///
    /// POST setMyShortDescription
    pub async fn set_my_short_description(
        &self,
        request: &SetMyTextRequest,
    ) -> Result<bool, TelegramError> {
        request.validate("short_description", 120)?;
        let body = NamedText {
            short_description: NamedText::value(request),
            ..NamedText::new(request)
        };
        self.context
            .client
            .post("setMyShortDescription", &body)
            .await
    }

    /// POST getMyShortDescription
    pub async fn get_my_short_description(
        &self,
        request: &LanguageRequest,
    ) -> Result<BotShortDescription, TelegramError> {
        self.context
            .client
            .post("getMyShortDescription", request)
            .await
    }

    /// POST setChatMenuButton
    pub async fn set_chat_menu_button(
        &self,
        request: &SetChatMenuButtonRequest,
    ) -> Result<bool, TelegramError> {
        self.context.client.post("setChatMenuButton", request).await
    }

    /// POST getChatMenuButton
    pub async fn get_chat_menu_button(
        &self,
        request: &GetChatMenuButtonRequest,
    ) -> Result<MenuButton, TelegramError> {
        self.context.client.post("getChatMenuButton", request).await
    }

    /// POST setMyDefaultAdministratorRights
    pub async fn set_my_default_administrator_rights(
        &self,
        request: &SetMyDefaultAdministratorRightsRequest,
    ) -> Result<bool, TelegramError> {
        self.context
            .client
            .post("setMyDefaultAdministratorRights", request)
            .await
    }

    /// POST getMyDefaultAdministratorRights
    pub async fn get_my_default_administrator_rights(
        &self,
        request: &GetMyDefaultAdministratorRightsRequest,
    ) -> Result<ChatAdministratorRights, TelegramError> {
        self.context
            .client
            .post("getMyDefaultAdministratorRights", request)
            .await
    }
}

impl BotApi for SettingsApi {
    fn api_name(&self) -> &'static str {
        "settings"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
