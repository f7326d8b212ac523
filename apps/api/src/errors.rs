use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::store::StoreError;

/// A single rejected field: dotted path plus the constraint it violated.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub constraint: String,
    pub message: String,
}

/// Every field-level violation found in one payload.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn single(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self(vec![FieldError {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
        }])
    }

    #[cfg(test)]
    pub fn contains(&self, field: &str, constraint: &str) -> bool {
        self.0
            .iter()
            .any(|e| e.field == field && e.constraint == constraint)
    }

    fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
        for (name, kind) in errors.errors() {
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };
            match kind {
                ValidationErrorsKind::Field(field_errors) => {
                    for e in field_errors {
                        out.push(FieldError {
                            field: path.clone(),
                            constraint: e.code.to_string(),
                            message: e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| describe_constraint(&e.code, &e.params)),
                        });
                    }
                }
                ValidationErrorsKind::Struct(inner) => Self::collect(&path, inner, out),
                ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        Self::collect(&format!("{path}[{index}]"), inner, out);
                    }
                }
            }
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Vec::new();
        Self::collect("", &errors, &mut out);
        out.sort_by(|a, b| a.field.cmp(&b.field));
        Self(out)
    }
}

fn describe_constraint<K, V>(code: &str, params: &std::collections::HashMap<K, V>) -> String
where
    K: AsRef<str>,
    V: std::fmt::Display,
{
    let mut bounds: Vec<String> = params
        .iter()
        .filter(|(k, _)| k.as_ref() != "value")
        .map(|(k, v)| format!("{}={}", k.as_ref(), v))
        .collect();
    bounds.sort();
    if bounds.is_empty() {
        format!("failed '{code}' check")
    } else {
        format!("failed '{code}' check ({})", bounds.join(", "))
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0:?}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Response does not match its declared schema: {0}")]
    ResponseShape(String),

    #[error("Not implemented")]
    NotImplemented,
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                "Request validation failed".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::ResponseShape(msg) => {
                tracing::error!("Response validation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RESPONSE_VALIDATION_ERROR",
                    "The response did not match its declared schema".to_string(),
                )
            }
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                "This endpoint is not yet implemented".to_string(),
            ),
        };

        let body = match self {
            AppError::Validation(fields) => json!({
                "error": {
                    "code": code,
                    "message": message,
                    "fields": fields.0
                }
            }),
            _ => json!({
                "error": {
                    "code": code,
                    "message": message
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}
