use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Field-keyed validation messages, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::Config(_) | AppError::Internal(_) | AppError::Io(_) | AppError::Json(_) => {
                500
            }
        }
    }

    /// Error body shown to the user. Internal failures are logged and masked.
    pub fn render(&self) -> Value {
        let status = self.status();
        match self {
            AppError::Validation(errors) => json!({
                "error": "Validation failed",
                "fields": errors,
                "status": status
            }),
            AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::BadRequest(message) => json!({
                "error": message,
                "status": status
            }),
            AppError::Config(message) | AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                json!({ "error": "Internal error", "status": status })
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                json!({ "error": "Internal error", "status": status })
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {:?}", e);
                json!({ "error": "Internal error", "status": status })
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Validation helper
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in errors.field_errors() {
            for error in errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                fields.insert(field.to_string(), message);
            }
        }

        AppError::Validation(fields)
    }
}
