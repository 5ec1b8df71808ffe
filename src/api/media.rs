use std::sync::Arc;

use serde::Serialize;

use crate::api::messages::SendOptions;
use crate::api::r#trait::{BotApi, BotContext};
use crate::error::TelegramError;
use crate::types::{
    ChatId, File, InputFile, InputMedia, Message, MessageEntity, ParseMode, ReplyParameters,
    UserProfilePhotos,
};
use crate::utils::{check_count, check_opt_formatted_len, check_opt_range};

const MAX_CAPTION: usize = 1024;

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendPhotoRequest {
    pub chat_id: ChatId,
    pub photo: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendPhotoRequest {
    pub fn new(chat_id: impl Into<ChatId>, photo: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            photo,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            has_spoiler: None,
            options: SendOptions::default(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    pub fn options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len(
            "caption",
            self.caption.as_deref(),
            0,
            MAX_CAPTION,
            self.parse_mode,
        )?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendAudioRequest {
    pub chat_id: ChatId,
    pub audio: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendAudioRequest {
    pub fn new(chat_id: impl Into<ChatId>, audio: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            audio,
            caption: None,
            parse_mode: None,
            duration: None,
            performer: None,
            title: None,
            thumbnail: None,
            options: SendOptions::default(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len(
            "caption",
            self.caption.as_deref(),
            0,
            MAX_CAPTION,
            self.parse_mode,
        )?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendDocumentRequest {
    pub chat_id: ChatId,
    pub document: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    /// Uploads only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_content_type_detection: Option<bool>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendDocumentRequest {
    pub fn new(chat_id: impl Into<ChatId>, document: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            document,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            disable_content_type_detection: None,
            options: SendOptions::default(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn thumbnail(mut self, thumbnail: InputFile) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len(
            "caption",
            self.caption.as_deref(),
            0,
            MAX_CAPTION,
            self.parse_mode,
        )?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendVideoRequest {
    pub chat_id: ChatId,
    pub video: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_streaming: Option<bool>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendVideoRequest {
    pub fn new(chat_id: impl Into<ChatId>, video: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            video,
            duration: None,
            width: None,
            height: None,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            has_spoiler: None,
            supports_streaming: None,
            options: SendOptions::default(),
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len(
            "caption",
            self.caption.as_deref(),
            0,
            MAX_CAPTION,
            self.parse_mode,
        )?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendAnimationRequest {
    pub chat_id: ChatId,
    pub animation: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendAnimationRequest {
    pub fn new(chat_id: impl Into<ChatId>, animation: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            animation,
            duration: None,
            width: None,
            height: None,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            has_spoiler: None,
            options: SendOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len(
            "caption",
            self.caption.as_deref(),
            0,
            MAX_CAPTION,
            self.parse_mode,
        )?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendVoiceRequest {
    pub chat_id: ChatId,
    /// OGG/OPUS, MP3 or M4A
    pub voice: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendVoiceRequest {
    pub fn new(chat_id: impl Into<ChatId>, voice: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            voice,
            caption: None,
            parse_mode: None,
            duration: None,
            options: SendOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_formatted_len(
            "caption",
            self.caption.as_deref(),
            0,
            MAX_CAPTION,
            self.parse_mode,
        )?;
        self.options.validate()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendVideoNoteRequest {
    pub chat_id: ChatId,
    /// Sending video notes by URL is not supported
    pub video_note: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Video width and height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendVideoNoteRequest {
    pub fn new(chat_id: impl Into<ChatId>, video_note: InputFile) -> Self {
        Self {
            chat_id: chat_id.into(),
            video_note,
            duration: None,
            length: None,
            thumbnail: None,
            options: SendOptions::default(),
        }
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        if matches!(self.video_note, InputFile::Url(_)) {
            return Err(TelegramError::validation(
                "video notes cannot be sent by URL",
            ));
        }
        self.options.validate()
    }
}

/// Album of 2-10 photos, videos, documents or audio files
#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct SendMediaGroupRequest {
    pub chat_id: ChatId,
    pub media: Vec<InputMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

impl SendMediaGroupRequest {
    pub fn new(chat_id: impl Into<ChatId>, media: Vec<InputMedia>) -> Self {
        Self {
            chat_id: chat_id.into(),
            media,
            message_thread_id: None,
            disable_notification: None,
            protect_content: None,
            reply_parameters: None,
        }
    }

    /// Documents and audio files can only be grouped with their own kind;
    /// photos and videos can be mixed.
    pub fn validate(&self) -> Result<(), TelegramError> {
        check_count("media", self.media.len(), 2, 10)?;
        for item in &self.media {
            check_opt_formatted_len("caption", item.caption(), 0, MAX_CAPTION, item.parse_mode())?;
            if item.kind() == "animation" {
                return Err(TelegramError::validation(
                    "animations cannot be sent in a media group",
                ));
            }
        }
        for exclusive in ["audio", "document"] {
            let count = self
                .media
                .iter()
                .filter(|item| item.kind() == exclusive)
                .count();
            if count > 0 && count != self.media.len() {
                return Err(TelegramError::validation(format!(
                    "{exclusive} items can only be grouped with other {exclusive} items"
                )));
            }
        }
        Ok(())
    }

    fn files(&self) -> Vec<&InputFile> {
        self.media.iter().flat_map(InputMedia::files).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetFileRequest {
    pub file_id: String,
}

#[non_exhaustive]
#[derive(Debug, Clone, Serialize)]
pub struct GetUserProfilePhotosRequest {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// 1-100, defaults to 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl GetUserProfilePhotosRequest {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            offset: None,
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<(), TelegramError> {
        check_opt_range("limit", self.limit, 1, 100)
    }
}

/// Media messages and file access API
pub struct MediaApi {
    context: Arc<BotContext>,
}

impl MediaApi {
    pub fn new(context: Arc<BotContext>) -> Self {
        Self { context }
    }

    /// POST sendPhoto
    pub async fn send_photo(&self, request: &SendPhotoRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post_with_files("sendPhoto", request, &[&request.photo])
            .await
    }

    /// POST sendAudio
    pub async fn send_audio(&self, request: &SendAudioRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = std::iter::once(&request.audio)
            .chain(request.thumbnail.as_ref())
            .collect();
        self.context
            .client
            .post_with_files("sendAudio", request, &files)
            .await
    }

    /// POST sendDocument
    pub async fn send_document(
        &self,
        request: &SendDocumentRequest,
    ) -> Result<Message, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = std::iter::once(&request.document)
            .chain(request.thumbnail.as_ref())
            .collect();
        self.context
            .client
            .post_with_files("sendDocument", request, &files)
            .await
    }

    /// POST sendVideo
    pub async fn send_video(&self, request: &SendVideoRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = std::iter::once(&request.video)
            .chain(request.thumbnail.as_ref())
            .collect();
        self.context
            .client
            .post_with_files("sendVideo", request, &files)
            .await
    }

    /// POST sendAnimation
    pub async fn send_animation(
        &self,
        request: &SendAnimationRequest,
    ) -> Result<Message, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = std::iter::once(&request.animation)
            .chain(request.thumbnail.as_ref())
            .collect();
        self.context
            .client
            .post_with_files("sendAnimation", request, &files)
            .await
    }

    /// POST sendVoice
    pub async fn send_voice(&self, request: &SendVoiceRequest) -> Result<Message, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post_with_files("sendVoice", request, &[&request.voice])
            .await
    }

    /// POST sendVideoNote
    pub async fn send_video_note(
        &self,
        request: &SendVideoNoteRequest,
    ) -> Result<Message, TelegramError> {
        request.validate()?;
        let files: Vec<&InputFile> = std::iter::once(&request.video_note)
            .chain(request.thumbnail.as_ref())
            .collect();
        self.context
            .client
            .post_with_files("sendVideoNote", request, &files)
            .await
    }

    /// POST sendMediaGroup
    pub async fn send_media_group(
        &self,
        request: &SendMediaGroupRequest,
    ) -> Result<Vec<Message>, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post_with_files("sendMediaGroup", request, &request.files())
            .await
    }

    /// Prepare a file for download. The returned `file_path` is valid for at
    /// least one hour.
    ///
    /// POST getFile
    pub async fn get_file(&self, file_id: &str) -> Result<File, TelegramError> {
        let request = GetFileRequest {
            file_id: file_id.to_string(),
        };
        self.context.client.post("getFile", &request).await
    }

    /// POST getUserProfilePhotos
    pub async fn get_user_profile_photos(
        &self,
        request: &GetUserProfilePhotosRequest,
    ) -> Result<UserProfilePhotos, TelegramError> {
        request.validate()?;
        self.context
            .client
            .post("getUserProfilePhotos", request)
            .await
    }

    /// Download the content of a file returned by [`get_file`](Self::get_file).
    ///
    /// GET file/bot<token>/<file_path>
    pub async fn download_file(&self, file: &File) -> Result<Vec<u8>, TelegramError> {
        let file_path = file.file_path.as_deref().ok_or_else(|| {
            TelegramError::validation(format!("file {} has no file_path", file.file_id))
        })?;
        self.context.client.download_file(file_path).await
    }
}

impl BotApi for MediaApi {
    fn api_name(&self) -> &'static str {
        "media"
    }

    fn context(&self) -> &BotContext {
        &self.context
    }
}
