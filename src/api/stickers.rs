use std::sync::Arc;

use serde::Serialize;

use crate::api::messages::SendOptions;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{
    ChatId, File, InputFile, InputSticker, Message, Sticker, StickerFormat, StickerSet,
    StickerType,
};
use crate::utils::{check_count, check_len};

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendStickerRequest {
    pub chat_id: ChatId,
    pub sticker: InputFile,
    /// Emoji associated with a freshly uploaded sticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendStickerRequest {
    pub fn new(chat_id: impl Into<ChatId>, sticker: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            sticker,
            emoji: None,
            options: SendOptions::default(),
        }
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StickerSetNameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetCustomEmojiStickersRequest {
    pub custom_emoji_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadStickerFileRequest {
    pub user_id: i64,
    pub sticker: InputFile,
    pub sticker_format: StickerFormat,
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct CreateNewStickerSetRequest {
    /// Owner of the created set
    pub user_id: i64,
    /// Must end in `_by_<bot_username>`
    pub name: String,
    pub title: String,
    pub stickers: Vec<InputSticker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker_type: Option<StickerType>,
    /// Custom emoji sets only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_repainting: Option<bool>,
}

impl CreateNewStickerSetRequest {
    pub fn new(
        user_id: i64,
        name: impl Into<String>,
        title: impl Into<String>,
        stickers: Vec<InputSticker>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            title: title.into(),
            stickers,
            sticker_type: None,
            needs_repainting: None,
        }
    }

    pub fn sticker_type(mut self, sticker_type: StickerType) -> Self {
        self.sticker_type = Some(sticker_type);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        validate_set_name(&self.name)?;
        check_len("title", &self.title, 1, 64)?;
        check_count("stickers", self.stickers.len(), 1, 50)?;
        if self.needs_repainting.is_some() && self.sticker_type != Some(StickerType::CustomEmoji) {
            return Err(TelegramError::validation(
                "needs_repainting is only valid for custom emoji sets",
            ));
        }
        self.stickers.iter().try_for_each(InputSticker::validate)
    }

    fn files(&self) -> Vec<&InputFile> {
        self.stickers.iter().map(|sticker| &sticker.sticker).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddStickerToSetRequest {
    pub user_id: i64,
    pub name: String,
    pub sticker: InputSticker,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetStickerPositionInSetRequest {
    pub sticker: String,
    pub position: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StickerRequest {
    pub sticker: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetStickerEmojiListRequest {
    pub sticker: String,
    pub emoji_list: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetStickerKeywordsRequest {
    pub sticker: String,
    /// Unset clears the keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetStickerSetTitleRequest {
    pub name: String,
    pub title: String,
}

// 1-64 characters of letters, digits and single underscores, starting with a
// letter.
fn validate_set_name(name: &str) -> Result<(), TelegramError> {
    check_len("sticker set name", name, 1, 64)?;
    let starts_with_letter = name.starts_with(|c: char| c.is_ascii_alphabetic());
    let allowed = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !starts_with_letter || !allowed || name.contains("__") || name.ends_with('_') {
        return Err(TelegramError::validation(format!(
            "invalid sticker set name {name:?}"
        )));
    }
    Ok(())
}

/// Sticker and sticker set API
pub struct StickersApi {
    context: Arc<BotContext>,
}

impl StickersApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST sendSticker
    pub async fn send_sticker(
        &self,
        request: &SendStickerRequest,
    ) -> Result<Message, TelegramError> {
        request.options.validate()?;
        self.context
            .client
            .post_with_files("sendSticker", request, &[&request.sticker])
            .await
    }

    /// POST getStickerSet
    pub async fn get_sticker_set(&self, name: &str) -> Result<StickerSet, TelegramError> {
        let request = StickerSetNameRequest {
            name: name.to_string(),
        };
        self.context.client.post("getStickerSet", &request).await
    }

    /// POST getCustomEmojiStickers
    pub async fn get_custom_emoji_stickers(
        &self,
        custom_emoji_ids: Vec<String>,
    ) -> Result<Vec<Sticker>, TelegramError> {
        check_count("custom_emoji_ids", custom_emoji_ids.len(), 1, 200)?;
        let request = GetCustomEmojiStickersRequest { custom_emoji_ids };
        self.context
            .client
            .post("getCustomEmojiStickers", &request)
            .await
    }

    /// Upload a sticker file for later use in createNewStickerSet or
    /// addStickerToSet.
    ///
    /// POST uploadStickerFile
    pub async fn upload_sticker_file(
        &self,
        user_id: i64,
        sticker: InputFile,
        sticker_format: StickerFormat,
    ) -> Result<File, TelegramError> {
        if !sticker.is_upload() {
            return Err(TelegramError::validation(
                "uploadStickerFile needs file content",
            ));
        }
        let request = UploadStickerFileRequest {
            user_id,
            sticker,
            sticker_format,
        };
        self.context
            .client
            .post_with_files("uploadStickerFile", &request, &[&request.sticker])
            .await
    }

    /// POST createNewStickerSet
    pub async fn create_new_sticker_set(
        &self,
        request: &CreateNewStickerSetRequest,
    ) -> Result<bool, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post_with_files("createNewStickerSet", request, &request.files())
            .await
    }

    /// POST addStickerToSet
    pub async fn add_sticker_to_set(
        &self,
        user_id: i64,
        name: &str,
        sticker: InputSticker,
    ) -> Result<bool, TelegramError> {
        sticker.validate()?;
        let request = AddStickerToSetRequest {
            user_id,
            name: name.to_string(),
            sticker,
        };
        self.context
            .client
            .post_with_files("addStickerToSet", &request, &[&request.sticker.sticker])
            .await
    }

    /// POST setStickerPositionInSet
    pub async fn set_sticker_position_in_set(
        &self,
        sticker: &str,
        position: u32,
    ) -> Result<bool, TelegramError> {
        let request = SetStickerPositionInSetRequest {
            sticker: sticker.to_string(),
            position,
        };
        self.context
            .client
            .post("setStickerPositionInSet", &request)
            .await
    }

    /// POST deleteStickerFromSet
    pub async fn delete_sticker_from_set(&self, sticker: &str) -> Result<bool, TelegramError> {
        let request = StickerRequest {
            sticker: sticker.to_string(),
        };
        self.context
            .client
            .post("deleteStickerFromSet", &request)
            .await
    }

    /// POST setStickerEmojiList
    pub async fn set_sticker_emoji_list(
        &self,
        sticker: &str,
        emoji_list: Vec<String>,
    ) -> Result<bool, TelegramError> {
        check_count("emoji_list", emoji_list.len(), 1, 20)?;
        let request = SetStickerEmojiListRequest {
            sticker: sticker.to_string(),
            emoji_list,
        };
        self.context
            .client
            .post("setStickerEmojiList", &request)
            .await
    }

    /// POST setStickerKeywords
    pub async fn set_sticker_keywords(
        &self,
        sticker: &str,
        keywords: Option<Vec<String>>,
    ) -> Result<bool, TelegramError> {
        if let Some(keywords) = &keywords {
            check_count("keywords", keywords.len(), 0, 20)?;
        }
        let request = SetStickerKeywordsRequest {
            sticker: sticker.to_string(),
            keywords,
        };
        self.context
            .client
            .post("setStickerKeywords", &request)
            .await
    }

    /// POST setStickerSetTitle
    pub async fn set_sticker_set_title(
        &self,
        name: &str,
        title: &str,
    ) -> Result<bool, TelegramError> {
        check_len("title", title, 1, 64)?;
        let request = SetStickerSetTitleRequest {
            name: name.to_string(),
            title: title.to_string(),
        };
        self.context.client.post("setStickerSetTitle", &request).await
    }

    /// POST deleteStickerSet
    pub async fn delete_sticker_set(&self, name: &str) -> Result<bool, TelegramError> {
        let request = StickerSetNameRequest {
            name: name.to_string(),
        };
        self.context.client.post("deleteStickerSet", &request).await
    }
}

impl BotApi for StickersApi {
    fn api_name(&self) -> &'static str {
        "stickers"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{method_path, ok, test_context};
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer};

    fn crab() -> InputSticker {
        InputSticker::new(
            InputFile::file_id("CAACAgIAAx"),
            StickerFormat::Static,
            vec!["🦀".to_string()],
        )
    }

    #[test]
    fn test_set_name_rules() {
        assert!(validate_set_name("ferris_by_echo_bot").is_ok());
        assert!(validate_set_name("1ferris_by_echo_bot").is_err());
        assert!(validate_set_name("ferris__by_echo_bot").is_err());
        assert!(validate_set_name("ferris-by-echo-bot").is_err());
        assert!(validate_set_name("").is_err());
    }

    #[test]
    fn test_create_set_validation() {
        let empty = CreateNewStickerSetRequest::new(1, "ferris_by_echo_bot", "Ferris", vec![]);
        assert!(empty.validate().is_err());

        let repaint = CreateNewStickerSetRequest {
            needs_repainting: Some(true),
            ..CreateNewStickerSetRequest::new(1, "ferris_by_echo_bot", "Ferris", vec![crab()])
        };
        assert!(repaint.validate().is_err());
        assert!(repaint
            .clone()
            .sticker_type(StickerType::CustomEmoji)
            .validate()
            .is_ok());
    }

    #[tokio::test]
    async fn test_get_sticker_set() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("getStickerSet")))
            .and(body_json(serde_json::json!({"name": "ferris_by_echo_bot"})))
            .respond_with(ok(serde_json::json!({
                "name": "ferris_by_echo_bot",
                "title": "Ferris",
                "sticker_type": "regular",
                "stickers": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = StickersApi::new(test_context(&mock_server.uri()));
        let set = api.get_sticker_set("ferris_by_echo_bot").await.unwrap();
        assert_eq!(set.sticker_type, StickerType::Regular);
    }

    #[tokio::test]
    async fn test_create_set_with_upload_uses_multipart() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("createNewStickerSet")))
            .and(body_string_contains("name=\"stickers\""))
            .and(body_string_contains("filename=\"crab.webp\""))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = StickersApi::new(test_context(&mock_server.uri()));
        let sticker = InputSticker::new(
            InputFile::memory("crab.webp", b"RIFF".to_vec()),
            StickerFormat::Static,
            vec!["🦀".to_string()],
        );
        let request =
            CreateNewStickerSetRequest::new(1, "ferris_by_echo_bot", "Ferris", vec![sticker]);
        assert!(api.create_new_sticker_set(&request).await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_sticker_file_requires_content() {
        let api = StickersApi::new(test_context("http://127.0.0.1:9"));
        let error = api
            .upload_sticker_file(1, InputFile::url("https://example.com/a.webp"), StickerFormat::Static)
            .await
            .unwrap_err();
        assert!(matches!(error, TelegramError::Validation(_)));
    }

    #[tokio::test]
    async fn test_set_keywords_clear() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(method_path("setStickerKeywords")))
            .and(body_json(serde_json::json!({"sticker": "CAAC"})))
            .respond_with(ok(serde_json::json!(true)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = StickersApi::new(test_context(&mock_server.uri()));
        assert!(api.set_sticker_keywords("CAAC", None).await.unwrap());
    }
}
