use serde::{Deserialize, Serialize};

use super::ids::ChatId;

/// A bot command shown in the client's command menu
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotCommand {
    /// 1-32 characters: lowercase English letters, digits and underscores
    pub command: String,
    /// 1-256 characters
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), crate::error::TelegramError> {
        crate::utils::check_len("command", &self.command, 1, 32)?;
        if !self
            .command
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(crate::error::TelegramError::validation(format!(
                "command {:?} may only contain a-z, 0-9 and _",
                self.command
            )));
        }
        crate::utils::check_len("command description", &self.description, 1, 256)
    }
}

/// Set of users a command list applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotCommandScope {
    #[default]
    Default,
    AllPrivateChats,
    AllGroupChats,
    AllChatAdministrators,
    Chat {
        chat_id: ChatId,
    },
    ChatAdministrators {
        chat_id: ChatId,
    },
    ChatMember {
        chat_id: ChatId,
        user_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotDescription {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BotShortDescription {
    pub short_description: String,
}
