use std::sync::Arc;

use serde::Serialize;

use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{InlineQueryResult, InlineQueryResultsButton, SentWebAppMessage};
use crate::utils::{check_count, check_opt_len};

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQueryRequest {
    pub callback_query_id: String,
    /// Notification text, 0-200 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Seconds the client may cache the answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
}

impl AnswerCallbackQueryRequest {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: None,
            url: None,
            cache_time: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn alert(mut self) -> Self {
        self.show_alert = Some(true);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_len("text", self.text.as_deref(), 0, 200)
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct AnswerInlineQueryRequest {
    pub inline_query_id: String,
    pub results: Vec<InlineQueryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_personal: Option<bool>,
    /// Passed back in the next query for pagination; empty ends it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<InlineQueryResultsButton>,
}

impl AnswerInlineQueryRequest {
    pub fn new(inline_query_id: impl Into<String>, results: Vec<InlineQueryResult>) -> Self {
        Self {
            inline_query_id: inline_query_id.into(),
            results,
            cache_time: None,
            is_personal: None,
            next_offset: None,
            button: None,
        }
    }

    pub fn cache_time(mut self, cache_time: u32) -> Self {
        self.cache_time = Some(cache_time);
        self
    }

    pub fn personal(mut self) -> Self {
        self.is_personal = Some(true);
        self
    }

    pub fn next_offset(mut self, next_offset: impl Into<String>) -> Self {
        self.next_offset = Some(next_offset.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_count("results", self.results.len(), 0, 50)?;
        if let Some(offset) = &self.next_offset {
            if offset.len() > 64 {
                return Err(TelegramError::validation(format!(
                    "next_offset must be at most 64 bytes, got {}",
                    offset.len()
                )));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for result in &self.results {
            result.validate()?;
            if !seen.insert(result.id()) {
                return Err(TelegramError::validation(format!(
                    "duplicate inline result id {:?}",
                    result.id()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerWebAppQueryRequest {
    pub web_app_query_id: String,
    pub result: InlineQueryResult,
}

/// Answers to callback, inline and Web App queries
pub struct QueriesApi {
    context: Arc<BotContext>,
}

impl QueriesApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// Every callback query must be answered, even with no text, or the
    /// client keeps showing a progress bar.
    ///
    /// POST answerCallbackQuery
    pub async fn answer_callback_query(
        &self,
        request: &AnswerCallbackQueryRequest,
    ) -> Result<bool, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post("answerCallbackQuery", request)
            .await
    }

    /// POST answerInlineQuery
    pub async fn answer_inline_query(
        &self,
        request: &AnswerInlineQueryRequest,
    ) -> Result<bool, TelegramError> {
        request.validate()?;
        self.context.client.post("answerInlineQuery", request).await
    }

    /// POST answerWebAppQuery
    pub async fn answer_web_app_query(
        &self,
        web_app_query_id: &str,
        result: InlineQueryResult,
    ) -> Result<SentWebAppMessage, TelegramError> {
        result.validate()?;
        let request = AnswerWebAppQueryRequest {
            web_app_query_id: web_app_query_id.to_string(),
            result,
        };
        self.context.client.post("answerWebAppQuery", &request).await
    }
}

impl BotApi for QueriesApi {
    fn api_name(&self) -> &'static str {
        "queries"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
