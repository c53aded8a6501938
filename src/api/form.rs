//! Request bodies for the catalog write endpoints.
//!
//! The admin UI posts `multipart/form-data` whenever a file is attached and
//! JSON otherwise. [`EntityForm`] accepts both and normalizes them into one
//! JSON object plus the file parts, so handlers deserialize a single way.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use super::validation::Validate;
use super::{ApiError, AppState};
use crate::services::UploadedFile;

#[derive(Debug, Default)]
pub struct EntityForm {
    fields: Map<String, Value>,
    files: Vec<(String, UploadedFile)>,
}

impl<S> FromRequest<S> for EntityForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"));

        let mut form = if is_multipart {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                debug!(error = %e, "Rejected multipart body");
                ApiError::validation("Invalid form data")
            })?;
            Self::from_multipart(multipart).await?
        } else {
            let Json(value) = Json::<Value>::from_request(req, state).await.map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    return ApiError::PayloadTooLarge;
                }
                debug!(error = %e, "Rejected JSON body");
                ApiError::validation("Invalid request body")
            })?;
            match value {
                Value::Object(fields) => Self {
                    fields,
                    files: Vec::new(),
                },
                _ => return Err(ApiError::validation("Invalid request body")),
            }
        };

        // An empty input means "not supplied" for every field.
        form.fields
            .retain(|_, v| !matches!(v, Value::String(s) if s.is_empty()));

        Ok(form)
    }
}

impl EntityForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if let Some(file_name) = field.file_name().map(str::to_string) {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part for an untouched file input.
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                form.files.push((
                    name,
                    UploadedFile {
                        file_name: Some(file_name),
                        content_type,
                        data: data.to_vec(),
                    },
                ));
            } else {
                let text = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, Value::String(text));
            }
        }

        Ok(form)
    }

    /// Form fields arrive as text; turn the listed ones into JSON numbers so
    /// they deserialize into integer fields. Unparseable values are left as
    /// strings and fail deserialization later.
    pub fn coerce_integers(&mut self, keys: &[&str]) {
        for key in keys {
            if let Some(value) = self.fields.get_mut(*key)
                && let Value::String(text) = &*value
                && let Ok(number) = text.trim().parse::<i64>()
            {
                *value = Value::from(number);
            }
        }
    }

    /// Drops a field the client is not allowed to set.
    pub fn discard(&mut self, key: &str) {
        self.fields.remove(key);
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(field, _)| field == name)?;
        Some(self.files.swap_remove(index).1)
    }

    /// Deserializes and validates the payload. Any failure maps to a 400
    /// carrying only `message`; the details go to the debug log.
    pub fn parse<T>(self, message: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        let payload: T = serde_json::from_value(Value::Object(self.fields)).map_err(|e| {
            debug!(error = %e, "Request body did not match the expected shape");
            ApiError::validation(message)
        })?;

        payload.validate().map_err(|e| {
            debug!(reason = %e, "Request body failed validation");
            ApiError::validation(message)
        })?;

        Ok(payload)
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge;
    }
    debug!(error = %err, "Failed to read multipart field");
    ApiError::validation("Invalid form data")
}

/// Saves an optional upload and returns its public URL.
pub async fn store_upload(
    state: &AppState,
    file: Option<UploadedFile>,
) -> Result<Option<String>, ApiError> {
    match file {
        Some(file) => Ok(Some(state.uploads.save(file).await?)),
        None => Ok(None),
    }
}

/// Best-effort removal of an upload whose record never got written.
pub async fn discard_upload(state: &AppState, url: Option<String>) {
    if let Some(url) = url
        && let Err(e) = state.uploads.remove(&url).await
    {
        tracing::warn!(url = %url, error = %e, "Failed to remove orphaned upload");
    }
}
