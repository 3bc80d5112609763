//! The result envelope returned by every asynchronous store operation.
//!
//! A [`WooError`] pairs a WooCommerce-level classification
//! ([`WooErrorType`]) with the transport-level cause ([`GenericErrorType`])
//! and an optional human-readable message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Success payload or classified error. Never both.
pub type WooResult<T> = Result<T, WooError>;

/// WooCommerce-level classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WooErrorType {
    GenericError,
    InvalidResponse,
    AuthorizationRequired,
    InvalidId,
    InvalidParam,
    ApiNotFound,
    Timeout,
}

/// Transport-level cause underneath a [`WooErrorType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericErrorType {
    Timeout,
    NoConnection,
    NetworkError,
    NotFound,
    ServerError,
    HttpAuthError,
    InvalidResponse,
    NotAuthenticated,
    ParseError,
    Unknown,
}

impl std::fmt::Display for WooErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WooErrorType::GenericError => "generic_error",
            WooErrorType::InvalidResponse => "invalid_response",
            WooErrorType::AuthorizationRequired => "authorization_required",
            WooErrorType::InvalidId => "invalid_id",
            WooErrorType::InvalidParam => "invalid_param",
            WooErrorType::ApiNotFound => "api_not_found",
            WooErrorType::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for GenericErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GenericErrorType::Timeout => "timeout",
            GenericErrorType::NoConnection => "no_connection",
            GenericErrorType::NetworkError => "network_error",
            GenericErrorType::NotFound => "not_found",
            GenericErrorType::ServerError => "server_error",
            GenericErrorType::HttpAuthError => "http_auth_error",
            GenericErrorType::InvalidResponse => "invalid_response",
            GenericErrorType::NotAuthenticated => "not_authenticated",
            GenericErrorType::ParseError => "parse_error",
            GenericErrorType::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Classified error carried by a failed [`WooResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error_type} ({original}): {}", .message.as_deref().unwrap_or("no message"))]
pub struct WooError {
    pub error_type: WooErrorType,
    pub original: GenericErrorType,
    pub message: Option<String>,
}

impl WooError {
    #[must_use]
    pub fn new(
        error_type: WooErrorType,
        original: GenericErrorType,
        message: Option<String>,
    ) -> Self {
        Self {
            error_type,
            original,
            message,
        }
    }

    /// The fallback returned when a response has neither an error nor a
    /// usable payload.
    #[must_use]
    pub fn generic_unknown() -> Self {
        Self::new(WooErrorType::GenericError, GenericErrorType::Unknown, None)
    }

    /// Same as [`WooError::generic_unknown`] with a message attached.
    #[must_use]
    pub fn generic_with_message(message: impl Into<String>) -> Self {
        Self::new(
            WooErrorType::GenericError,
            GenericErrorType::Unknown,
            Some(message.into()),
        )
    }

    /// Returns `true` for the generic-unknown fallback, regardless of message.
    #[must_use]
    pub fn is_generic_unknown(&self) -> bool {
        self.error_type == WooErrorType::GenericError && self.original == GenericErrorType::Unknown
    }

    /// Replaces an absent message with the empty string.
    #[must_use]
    pub fn with_empty_message_if_absent(mut self) -> Self {
        if self.message.is_none() {
            self.message = Some(String::new());
        }
        self
    }
}
