use std::sync::Arc;

use serde::Serialize;

use crate::api::messages::SendOptions;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{EditResult, GameHighScore, Message, MessageTarget};

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendGameRequest {
    /// Games can only be sent to private chats and groups, by numeric id
    pub chat_id: i64,
    /// Short name set up via @BotFather
    pub game_short_name: String,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendGameRequest {
    pub fn new(chat_id: i64, game_short_name: impl Into<String>) -> Self {
        Self {
            chat_id,
            game_short_name: game_short_name.into(),
            options: SendOptions::default(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SetGameScoreRequest {
    pub user_id: i64,
    /// Non-negative
    pub score: i64,
    #[serde(flatten)]
    pub target: MessageTarget,
    /// Allow decreasing the score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_edit_message: Option<bool>,
}

impl SetGameScoreRequest {
    pub fn new(target: MessageTarget, user_id: i64, score: i64) -> Self {
        Self {
            user_id,
            score,
            target,
            force: None,
            disable_edit_message: None,
        }
    }

    pub fn force(mut self) -> Self {
        self.force = Some(true);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        self.target.validate()?;
        if self.score < 0 {
            return Err(TelegramError::validation(format!(
                "score must be non-negative, got {}",
                self.score
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetGameHighScoresRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub target: MessageTarget,
}

/// HTML5 games API
pub struct GamesApi {
    context: Arc<BotContext>,
}

impl GamesApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST sendGame
    pub async fn send_game(&self, request: &SendGameRequest) -> Result<Message, TelegramError> {
        request.options.validate()?;
        self.context.client.post("sendGame", request).await
    }

    /// Returns the edited game message, or `true` for inline messages.
    ///
    /// POST setGameScore
    pub async fn set_game_score(
        &self,
        request: &SetGameScoreRequest,
    ) -> Result<EditResult, TelegramError> {
        request.validate()?;
        self.context.client.post("setGameScore", request).await
    }

    /// Scores of the target user and several neighbors.
    ///
    /// POST getGameHighScores
    pub async fn get_game_high_scores(
        &self,
        target: MessageTarget,
        user_id: i64,
    ) -> Result<Vec<GameHighScore>, TelegramError> {
        target.validate()?;
        let request = GetGameHighScoresRequest { user_id, target };
        self.context
            .client
            .post("getGameHighScores", &request)
            .await
    }
}

impl BotApi for GamesApi {
    fn api_name(&self) -> &'static str {
        "games"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
