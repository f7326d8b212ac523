//! Extractors that validate request input before a handler runs.
//!
//! Payloads are deserialized through `serde_path_to_error`, so a missing or
//! unparseable field is reported under its own dotted path. The type's
//! `Validate` rules run next. Any failure becomes `AppError::Validation`
//! (422), so handlers only ever see well-formed values.

use std::fmt::Display;

use async_trait::async_trait;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        path::ErrorKind,
        rejection::{BytesRejection, JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{header, request::Parts, HeaderMap},
    Json,
};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::errors::{AppError, FieldErrors};

pub struct ValidatedJson<T>(pub T);
pub struct ValidatedQuery<T>(pub T);
pub struct ValidatedPath<T>(pub T);
pub struct ValidatedForm<T>(pub T);

/// Failures that happen before any field is read (bad content type, invalid
/// JSON syntax, unreadable body) are reported against the request location.
fn rejected(location: &str, message: String) -> AppError {
    let constraint = if message.contains("missing field") {
        "required"
    } else {
        "parse"
    };
    AppError::Validation(FieldErrors::single(location, constraint, message))
}

/// Names the offending field of a deserialization error. serde reports a
/// missing field at its parent, so the field name is appended to the path.
fn field_rejected<E: Display>(location: &str, error: serde_path_to_error::Error<E>) -> AppError {
    let parent = error.path().to_string();
    let message = error.inner().to_string();
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());

    let mut segments: Vec<&str> = Vec::new();
    if parent != "." {
        segments.push(&parent);
    }
    if let Some(name) = missing {
        segments.push(name);
    }
    let field = if segments.is_empty() {
        location.to_string()
    } else {
        segments.join(".")
    };
    let constraint = if missing.is_some() { "required" } else { "parse" };
    AppError::Validation(FieldErrors::single(field, constraint, message))
}

fn from_json_value<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_path_to_error::deserialize(value).map_err(|e| field_rejected("body", e))
}

fn from_urlencoded<T: DeserializeOwned>(location: &str, input: &[u8]) -> Result<T, AppError> {
    let deserializer = serde_urlencoded::Deserializer::new(form_urlencoded::parse(input));
    serde_path_to_error::deserialize(deserializer).map_err(|e| field_rejected(location, e))
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        rejected("body", rejection.body_text())
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        rejected("form", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        let key = match &rejection {
            PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
                ErrorKind::ParseErrorAtKey { key, .. }
                | ErrorKind::InvalidUtf8InPathParam { key } => Some(key.clone()),
                _ => None,
            },
            _ => None,
        };
        rejected(key.as_deref().unwrap_or("path"), rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        rejected("form", rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(error: MultipartError) -> Self {
        rejected("form", error.body_text())
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state).await?;
        let value: T = from_json_value(raw)?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
        if !is_form {
            return Err(rejected(
                "form",
                "Expected request with `Content-Type: application/x-www-form-urlencoded`"
                    .to_string(),
            ));
        }
        let body = Bytes::from_request(req, state).await?;
        let value: T = from_urlencoded("form", &body)?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value: T = from_urlencoded("query", query.as_bytes())?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Optional header parameter; absent or non-UTF-8 values read as `None`.
pub fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Optional cookie parameter, looked up across every `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}
