//! Precondition checks shared by request `validate()` implementations

use std::fmt::Display;

use crate::error::TelegramError;
use crate::types::ParseMode;

/// Text length in characters must lie in `min..=max`.
pub(crate) fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), TelegramError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(TelegramError::validation(format!(
            "{field} must be {min}-{max} characters, got {len}"
        )));
    }
    Ok(())
}

pub(crate) fn check_opt_len(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Result<(), TelegramError> {
    match value {
        Some(value) => check_len(field, value, min, max),
        None => Ok(()),
    }
}

/// Length check for text that may carry markup.
///
/// Telegram applies the upper limit after entity parsing, so with a parse
/// mode set only the lower bound is checked here.
pub(crate) fn check_formatted_len(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    parse_mode: Option<ParseMode>,
) -> Result<(), TelegramError> {
    if parse_mode.is_none() {
        return check_len(field, value, min, max);
    }
    let len = value.chars().count();
    if len < min {
        return Err(TelegramError::validation(format!(
            "{field} must be at least {min} characters, got {len}"
        )));
    }
    Ok(())
}

pub(crate) fn check_opt_formatted_len(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
    parse_mode: Option<ParseMode>,
) -> Result<(), TelegramError> {
    match value {
        Some(value) => check_formatted_len(field, value, min, max, parse_mode),
        None => Ok(()),
    }
}

/// Number of items must lie in `min..=max`.
pub(crate) fn check_count(field: &str, count: usize, min: usize, max: usize) -> Result<(), TelegramError> {
    if count < min || count > max {
        return Err(TelegramError::validation(format!(
            "{field} must contain {min}-{max} items, got {count}"
        )));
    }
    Ok(())
}

pub(crate) fn check_non_empty(field: &str, len: usize) -> Result<(), TelegramError> {
    if len == 0 {
        return Err(TelegramError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn check_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), TelegramError>
where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        return Err(TelegramError::validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_opt_range<T>(
    field: &str,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<(), TelegramError>
where
    T: PartialOrd + Display + Copy,
{
    match value {
        Some(value) => check_range(field, value, min, max),
        None => Ok(()),
    }
}

/// Replaces the token in `/bot<token>/` and `/file/bot<token>/` path segments.
pub(crate) fn redact_token(url: &str) -> String {
    let Some(start) = url.find("/bot") else {
        return url.to_string();
    };
    let token_start = start + "/bot".len();
    let token_end = url[token_start..]
        .find('/')
        .map(|offset| token_start + offset)
        .unwrap_or(url.len());
    format!("{}[REDACTED]{}", &url[..token_start], &url[token_end..])
}
