//! Core error types.

use thiserror::Error;

/// Coarse classification of an [`LlmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or missing provider configuration, detected before any request.
    Validation,
    /// Content outside the set the Messages protocol accepts.
    Conversion,
    /// Failures raised by the client collaborator (HTTP, API, SSE framing).
    Transport,
}

/// Error type for every fallible operation in this crate.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Invalid provider configuration (base URL, API key, headers, model).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A content part that cannot appear in a message of the given role.
    #[error("Unsupported content part '{part_type}' in {role} message")]
    UnsupportedContentPart { part_type: String, role: String },

    /// A media type outside the image allow-list.
    #[error("Unsupported media type for {field}: {media_type}")]
    UnsupportedMediaType { field: String, media_type: String },

    /// Network or connection level failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The Messages API answered with a non-success status or an error event.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// A payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The event stream failed mid-flight.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The request was aborted through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,
}

impl LlmError {
    pub fn unsupported_content_part(part_type: impl Into<String>, role: impl Into<String>) -> Self {
        Self::UnsupportedContentPart {
            part_type: part_type.into(),
            role: role.into(),
        }
    }

    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            field: "mediaType".to_string(),
            media_type: media_type.into(),
        }
    }

    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Category this error belongs to.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError(_) => ErrorCategory::Validation,
            Self::UnsupportedContentPart { .. } | Self::UnsupportedMediaType { .. } => {
                ErrorCategory::Conversion
            }
            Self::HttpError(_)
            | Self::ApiError { .. }
            | Self::JsonError(_)
            | Self::StreamError(_)
            | Self::Cancelled => ErrorCategory::Transport,
        }
    }

    /// Name of the offending input field, when the error carries one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnsupportedMediaType { field, .. } => Some(field.as_str()),
            _ => None,
        }
    }

    /// HTTP status code, for API errors.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}
