//! Failure taxonomy for backend calls.

use thiserror::Error;
use tracing::warn;

/// Everything that can go wrong talking to the catalog backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: wreq::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{endpoint} returned status {status}: {message}")]
    Status { endpoint: String, status: u16, message: String },

    /// The backend answered 2xx but flagged the call as failed.
    #[error("{endpoint}: {message}")]
    Application { endpoint: String, message: String },

    /// The body was not the JSON shape we expected.
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A successful envelope without a payload.
    #[error("response from {0} carried no data")]
    MissingData(String),

    /// The request body could not be built.
    #[error("failed to encode request for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns true for failures reported by the backend itself, as opposed to
    /// the network or a malformed body.
    pub fn is_application(&self) -> bool {
        matches!(self, ApiError::Application { .. } | ApiError::MissingData(_))
    }

    /// Returns the HTTP status when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Degrades a failed call to an empty value, logging the reason.
///
/// Listing views that can live with a partial page use this instead of
/// surfacing the error.
pub trait OrWarn<T> {
    fn or_warn(self, what: &str) -> T;
}

impl<T: Default> OrWarn<T> for Result<T, ApiError> {
    fn or_warn(self, what: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("Error fetching {}: {}", what, err);
                T::default()
            }
        }
    }
}
