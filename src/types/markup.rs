use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Web App launched from a button
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebAppInfo {
    pub url: String,
}

/// Telegram Login Widget parameters for a login button
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_write_access: Option<bool>,
}

/// Placeholder object; launches the game configured for the bot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CallbackGame {}

/// What an inline keyboard button does when pressed. Exactly one per button.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKeyboardButtonKind {
    Url(String),
    /// 1-64 bytes sent back in a callback query
    CallbackData(String),
    WebApp(WebAppInfo),
    LoginUrl(LoginUrl),
    SwitchInlineQuery(String),
    SwitchInlineQueryCurrentChat(String),
    CallbackGame(CallbackGame),
    /// Must be the first button of the first row; invoices only
    Pay(bool),
    /// Action this crate does not model yet, kept as received
    #[serde(skip)]
    Unknown(Map<String, Value>),
}

/// Inline keyboard button: `text` plus the fields of its [`InlineKeyboardButtonKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub kind: InlineKeyboardButtonKind,
}

impl Serialize for InlineKeyboardButton {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = match &self.kind {
            InlineKeyboardButtonKind::Unknown(fields) => fields.clone(),
            kind => match serde_json::to_value(kind).map_err(<S::Error as ser::Error>::custom)? {
                Value::Object(fields) => fields,
                other => {
                    return Err(ser::Error::custom(format!(
                        "unexpected button kind: {other}"
                    )))
                }
            },
        };
        fields.insert("text".to_string(), Value::String(self.text.clone()));
        fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InlineKeyboardButton {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields: Map<String, Value> = Map::deserialize(deserializer)?;
        let text = match fields.remove("text") {
            Some(Value::String(text)) => text,
            Some(_) => return Err(de::Error::custom("button `text` must be a string")),
            None => return Err(de::Error::missing_field("text")),
        };

        // First field naming a known action wins; unknown actions are kept whole.
        let known = fields.iter().find_map(|(name, value)| {
            let mut single: Map<String, Value> = Map::new();
            single.insert(name.clone(), value.clone());
            serde_json::from_value::<InlineKeyboardButtonKind>(Value::Object(single)).ok()
        });
        let kind = match known {
            Some(kind) => kind,
            None => InlineKeyboardButtonKind::Unknown(fields),
        };

        Ok(Self { text, kind })
    }
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, kind: InlineKeyboardButtonKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(text, InlineKeyboardButtonKind::CallbackData(data.into()))
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(text, InlineKeyboardButtonKind::Url(url.into()))
    }

    pub fn pay(text: impl Into<String>) -> Self {
        Self::new(text, InlineKeyboardButtonKind::Pay(true))
    }
}

/// Keyboard attached to a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    pub fn row(mut self, row: Vec<InlineKeyboardButton>) -> Self {
        self.inline_keyboard.push(row);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), crate::error::TelegramError> {
        for button in self.inline_keyboard.iter().flatten() {
            if let InlineKeyboardButtonKind::CallbackData(data) = &button.kind {
                crate::utils::check_len("callback_data", data, 1, 64)?;
            }
        }
        Ok(())
    }
}

/// Button of a custom reply keyboard
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_contact: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: None,
            request_location: None,
            web_app: None,
        }
    }

    pub fn request_contact(mut self) -> Self {
        self.request_contact = Some(true);
        self
    }

    pub fn request_location(mut self) -> Self {
        self.request_location = Some(true);
        self
    }
}

/// Custom keyboard with reply options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_persistent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_keyboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_keyboard: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

impl ReplyKeyboardMarkup {
    pub fn new(keyboard: Vec<Vec<KeyboardButton>>) -> Self {
        Self {
            keyboard,
            is_persistent: None,
            resize_keyboard: None,
            one_time_keyboard: None,
            input_field_placeholder: None,
            selective: None,
        }
    }

    pub fn resize(mut self) -> Self {
        self.resize_keyboard = Some(true);
        self
    }

    pub fn one_time(mut self) -> Self {
        self.one_time_keyboard = Some(true);
        self
    }
}

/// Removes the current custom keyboard
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplyKeyboardRemove {
    /// Always `true`
    pub remove_keyboard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self {
            remove_keyboard: true,
            selective: None,
        }
    }
}

/// Shows a reply interface to the user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ForceReply {
    /// Always `true`
    pub force_reply: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_field_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
}

impl Default for ForceReply {
    fn default() -> Self {
        Self {
            force_reply: true,
            input_field_placeholder: None,
            selective: None,
        }
    }
}

/// Any of the reply markups accepted by send operations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboard(InlineKeyboardMarkup),
    ReplyKeyboard(ReplyKeyboardMarkup),
    Remove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl ReplyMarkup {
    pub(crate) fn validate(&self) -> Result<(), crate::error::TelegramError> {
        match self {
            ReplyMarkup::InlineKeyboard(markup) => markup.validate(),
            _ => Ok(()),
        }
    }
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(markup: InlineKeyboardMarkup) -> Self {
        ReplyMarkup::InlineKeyboard(markup)
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(markup: ReplyKeyboardMarkup) -> Self {
        ReplyMarkup::ReplyKeyboard(markup)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(markup: ReplyKeyboardRemove) -> Self {
        ReplyMarkup::Remove(markup)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(markup: ForceReply) -> Self {
        ReplyMarkup::ForceReply(markup)
    }
}

/// Button shown in place of the bot's menu in a private chat
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuButton {
    Commands,
    WebApp { text: String, web_app: WebAppInfo },
    Default,
    #[serde(other)]
    Unknown,
}
