//! Request body encoding
//!
//! Requests are plain `Serialize` values. Without uploads they travel as a
//! JSON body; with at least one in-memory [`InputFile`] they are flattened
//! into `multipart/form-data`: each top-level field becomes a text part
//! (strings verbatim, everything else as JSON text) and each upload becomes
//! a file part named after its `attach://` reference.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::TelegramError;
use crate::types::InputFile;

/// Keeps only in-memory files, once per attachment name.
pub(crate) fn uploads<'a>(files: impl IntoIterator<Item = &'a InputFile>) -> Vec<&'a InputFile> {
    let mut uploads: Vec<&InputFile> = Vec::new();
    for file in files {
        let Some(name) = file.attach_name() else {
            continue;
        };
        if !uploads.iter().any(|seen| seen.attach_name() == Some(name)) {
            uploads.push(file);
        }
    }
    uploads
}

/// Top-level fields of `body` as multipart text values.
pub(crate) fn form_fields<B: Serialize>(body: &B) -> Result<Vec<(String, String)>, TelegramError> {
    let Value::Object(fields) = serde_json::to_value(body)? else {
        return Err(TelegramError::validation(
            "multipart request body must serialize to an object",
        ));
    };

    Ok(fields
        .into_iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (name, text)
        })
        .collect())
}

pub(crate) fn multipart_form<B: Serialize>(
    body: &B,
    files: &[&InputFile],
) -> Result<Form, TelegramError> {
    let mut form = Form::new();
    for (name, text) in form_fields(body)? {
        form = form.text(name, text);
    }

    for file in files {
        if let InputFile::Memory {
            file_name,
            data,
            attach_name,
        } = file
        {
            let part = Part::bytes(data.clone()).file_name(file_name.clone());
            form = form.part(attach_name.clone(), part);
        }
    }

    Ok(form)
}
