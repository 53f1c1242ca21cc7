//! The `{error, message, data}` wrapper every catalog endpoint answers with.

use super::error::ApiError;
use serde::{Deserialize, Serialize};

/// The backend signals failure with `false`/`null` for success, or `true`
/// / a reason string for failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorFlag {
    #[default]
    Unset,
    Flag(bool),
    Reason(String),
}

impl ErrorFlag {
    /// Returns true when the flag reports a failure. Empty reasons are falsy.
    pub fn is_set(&self) -> bool {
        match self {
            ErrorFlag::Unset => false,
            ErrorFlag::Flag(flag) => *flag,
            ErrorFlag::Reason(reason) => !reason.is_empty(),
        }
    }

    fn reason(&self) -> Option<&str> {
        match self {
            ErrorFlag::Reason(reason) if !reason.is_empty() => Some(reason),
            _ => None,
        }
    }
}

/// Uniform response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub error: ErrorFlag,
    #[serde(default, deserialize_with = "super::models::de::text")]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { error: ErrorFlag::Unset, message: String::new(), data: Some(data) }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { error: ErrorFlag::Flag(true), message: message.into(), data: None }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_set()
    }

    /// Human-readable failure reason, preferring `message` over the error text.
    pub fn failure_reason(&self) -> String {
        if !self.message.is_empty() {
            return self.message.clone();
        }
        self.error.reason().unwrap_or("request failed").to_string()
    }

    /// Unwraps the payload, turning a truthy `error` or a missing payload into an [`ApiError`].
    pub fn into_data(self, endpoint: &str) -> Result<T, ApiError> {
        if self.is_error() {
            return Err(ApiError::Application {
                endpoint: endpoint.to_string(),
                message: self.failure_reason(),
            });
        }
        self.data.ok_or_else(|| ApiError::MissingData(endpoint.to_string()))
    }

    /// Like [`Envelope::into_data`], but a missing payload is the empty value.
    pub fn into_data_or_default(self, endpoint: &str) -> Result<T, ApiError>
    where
        T: Default,
    {
        if self.is_error() {
            return Err(ApiError::Application {
                endpoint: endpoint.to_string(),
                message: self.failure_reason(),
            });
        }
        Ok(self.data.unwrap_or_default())
    }
}
