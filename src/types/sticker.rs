use serde::{Deserialize, Serialize};

use super::input_file::InputFile;
use super::media::{File, PhotoSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerType {
    Regular,
    Mask,
    CustomEmoji,
    #[serde(other)]
    Unknown,
}

/// Encoding of a sticker file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StickerFormat {
    /// .WEBP or .PNG
    Static,
    /// .TGS
    Animated,
    /// .WEBM
    Video,
    #[serde(other)]
    Unknown,
}

/// Face part a mask is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPoint {
    Forehead,
    Eyes,
    Mouth,
    Chin,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaskPosition {
    pub point: MaskPoint,
    pub x_shift: f64,
    pub y_shift: f64,
    pub scale: f64,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sticker {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(rename = "type")]
    pub sticker_type: StickerType,
    pub width: u32,
    pub height: u32,
    pub is_animated: bool,
    pub is_video: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_animation: Option<File>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_position: Option<MaskPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StickerSet {
    pub name: String,
    pub title: String,
    pub sticker_type: StickerType,
    pub stickers: Vec<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<PhotoSize>,
}

/// Sticker to add to a set
#[derive(Debug, Clone, Serialize)]
pub struct InputSticker {
    pub sticker: InputFile,
    pub format: StickerFormat,
    /// 1-20 emoji associated with the sticker
    pub emoji_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_position: Option<MaskPosition>,
    /// 0-20 search keywords, 64 characters max in total
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl InputSticker {
    pub fn new(sticker: InputFile, format: StickerFormat, emoji_list: Vec<String>) -> Self {
        Self {
            sticker,
            format,
            emoji_list,
            mask_position: None,
            keywords: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), crate::error::TelegramError> {
        crate::utils::check_count("emoji_list", self.emoji_list.len(), 1, 20)?;
        if let Some(keywords) = &self.keywords {
            crate::utils::check_count("keywords", keywords.len(), 0, 20)?;
        }
        Ok(())
    }
}
