//! Tri-state request fields
//!
//! Most optional request fields are plain `Option<T>`: `None` is omitted from
//! the encoded body. A few Telegram parameters behave differently when they
//! are absent (keep the previous setting) than when they are sent as `null`
//! or as an empty value (reset it). Those fields use [`Field`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A request field that is either absent, explicitly null, or set.
///
/// Pair with `#[serde(default, skip_serializing_if = "Field::is_absent")]`.
///
/// ```rust
/// use serde::Serialize;
/// use telegram_bot_sdk::types::Field;
///
/// #[derive(Serialize)]
/// struct Body {
///     #[serde(default, skip_serializing_if = "Field::is_absent")]
///     allowed_updates: Field<Vec<String>>,
/// }
///
/// let absent = Body { allowed_updates: Field::Absent };
/// assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
///
/// let null = Body { allowed_updates: Field::Null };
/// assert_eq!(serde_json::to_string(&null).unwrap(), r#"{"allowed_updates":null}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    /// `None` becomes an explicit null, `Some` a value.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Value(value),
            None => Field::Null,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(value) => Field::Value(f(value)),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Value(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(value) => value.serialize(serializer),
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Body {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        value: Field<Vec<String>>,
    }

    #[test]
    fn test_absent_is_omitted() {
        let json = serde_json::to_value(Body {
            value: Field::Absent,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_null_is_encoded() {
        let json = serde_json::to_value(Body { value: Field::Null }).unwrap();
        assert_eq!(json, serde_json::json!({ "value": null }));
    }

    #[test]
    fn test_empty_value_is_distinct_from_absent() {
        let json = serde_json::to_value(Body {
            value: Field::Value(Vec::new()),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "value": [] }));
    }

    #[test]
    fn test_deserialize_tri_state() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert!(absent.value.is_absent());

        let null: Body = serde_json::from_str(r#"{"value":null}"#).unwrap();
        assert!(null.value.is_null());

        let set: Body = serde_json::from_str(r#"{"value":["message"]}"#).unwrap();
        assert_eq!(set.value.as_value().unwrap(), &vec!["message".to_string()]);
    }

    #[test]
    fn test_from_option_and_map() {
        assert!(Field::<i32>::from_option(None).is_null());
        assert_eq!(Field::from_option(Some(2)).map(|v| v * 2), Field::Value(4));
        assert_eq!(Field::from(1), Field::Value(1));
    }
}
