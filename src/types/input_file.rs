//! Files sent to Telegram
//!
//! A file is referenced by `file_id` (already on Telegram's servers), by
//! HTTP URL (Telegram downloads it), or uploaded from memory. Uploaded files
//! are encoded as `attach://<name>` in the request and sent as parts of a
//! `multipart/form-data` body.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, Serializer};

use super::message::{MessageEntity, ParseMode};

static NEXT_ATTACHMENT: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, PartialEq, Eq)]
pub enum InputFile {
    FileId(String),
    Url(String),
    Memory {
        file_name: String,
        data: Vec<u8>,
        attach_name: String,
    },
}

impl InputFile {
    pub fn file_id(file_id: impl Into<String>) -> Self {
        InputFile::FileId(file_id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        InputFile::Url(url.into())
    }

    /// Upload `data` under `file_name`.
    ///
    /// Each upload gets a process-unique attachment name so several files can
    /// travel in the same request.
    pub fn memory(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let id = NEXT_ATTACHMENT.fetch_add(1, Ordering::Relaxed);
        InputFile::Memory {
            file_name: file_name.into(),
            data: data.into(),
            attach_name: format!("file{id}"),
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, InputFile::Memory { .. })
    }

    pub(crate) fn attach_name(&self) -> Option<&str> {
        match self {
            InputFile::Memory { attach_name, .. } => Some(attach_name),
            _ => None,
        }
    }
}

impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFile::FileId(id) => f.debug_tuple("FileId").field(id).finish(),
            InputFile::Url(url) => f.debug_tuple("Url").field(url).finish(),
            InputFile::Memory {
                file_name,
                data,
                attach_name,
            } => f
                .debug_struct("Memory")
                .field("file_name", file_name)
                .field("len", &data.len())
                .field("attach_name", attach_name)
                .finish(),
        }
    }
}

impl Serialize for InputFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputFile::FileId(value) | InputFile::Url(value) => serializer.serialize_str(value),
            InputFile::Memory { attach_name, .. } => {
                serializer.serialize_str(&format!("attach://{attach_name}"))
            }
        }
    }
}

/// Photo inside a media group or for editMessageMedia
#[derive(Debug, Clone, Serialize)]
pub struct InputMediaPhoto {
    pub media: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
}

impl InputMediaPhoto {
    pub fn new(media: InputFile) -> Self {
        Self {
            media,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            has_spoiler: None,
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
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMediaVideo {
    pub media: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_streaming: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
}

impl InputMediaVideo {
    pub fn new(media: InputFile) -> Self {
        Self {
            media,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            caption_entities: None,
            width: None,
            height: None,
            duration: None,
            supports_streaming: None,
            has_spoiler: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMediaAnimation {
    pub media: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
}

impl InputMediaAnimation {
    pub fn new(media: InputFile) -> Self {
        Self {
            media,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            width: None,
            height: None,
            duration: None,
            has_spoiler: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMediaAudio {
    pub media: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
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
}

impl InputMediaAudio {
    pub fn new(media: InputFile) -> Self {
        Self {
            media,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            duration: None,
            performer: None,
            title: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMediaDocument {
    pub media: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_content_type_detection: Option<bool>,
}

impl InputMediaDocument {
    pub fn new(media: InputFile) -> Self {
        Self {
            media,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            disable_content_type_detection: None,
        }
    }
}

/// Content of a media message to be sent
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputMedia {
    Photo(InputMediaPhoto),
    Video(InputMediaVideo),
    Animation(InputMediaAnimation),
    Audio(InputMediaAudio),
    Document(InputMediaDocument),
}

impl InputMedia {
    /// Every file referenced by this item, thumbnail included.
    pub fn files(&self) -> Vec<&InputFile> {
        let (media, thumbnail) = match self {
            InputMedia::Photo(item) => (&item.media, None),
            InputMedia::Video(item) => (&item.media, item.thumbnail.as_ref()),
            InputMedia::Animation(item) => (&item.media, item.thumbnail.as_ref()),
            InputMedia::Audio(item) => (&item.media, item.thumbnail.as_ref()),
            InputMedia::Document(item) => (&item.media, item.thumbnail.as_ref()),
        };
        std::iter::once(media).chain(thumbnail).collect()
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            InputMedia::Photo(item) => item.caption.as_deref(),
            InputMedia::Video(item) => item.caption.as_deref(),
            InputMedia::Animation(item) => item.caption.as_deref(),
            InputMedia::Audio(item) => item.caption.as_deref(),
            InputMedia::Document(item) => item.caption.as_deref(),
        }
    }

    pub fn parse_mode(&self) -> Option<ParseMode> {
        match self {
            InputMedia::Photo(item) => item.parse_mode,
            InputMedia::Video(item) => item.parse_mode,
            InputMedia::Animation(item) => item.parse_mode,
            InputMedia::Audio(item) => item.parse_mode,
            InputMedia::Document(item) => item.parse_mode,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            InputMedia::Photo(_) => "photo",
            InputMedia::Video(_) => "video",
            InputMedia::Animation(_) => "animation",
            InputMedia::Audio(_) => "audio",
            InputMedia::Document(_) => "document",
        }
    }
}

impl From<InputMediaPhoto> for InputMedia {
    fn from(item: InputMediaPhoto) -> Self {
        InputMedia::Photo(item)
    }
}

impl From<InputMediaVideo> for InputMedia {
    fn from(item: InputMediaVideo) -> Self {
        InputMedia::Video(item)
    }
}

impl From<InputMediaAudio> for InputMedia {
    fn from(item: InputMediaAudio) -> Self {
        InputMedia::Audio(item)
    }
}

impl From<InputMediaDocument> for InputMedia {
    fn from(item: InputMediaDocument) -> Self {
        InputMedia::Document(item)
    }
}
