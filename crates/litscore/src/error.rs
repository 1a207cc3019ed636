//! Error types for assessment requests and configuration loading.
//!
//! [`AssessmentError`] is the four-way taxonomy every failed provider call is
//! folded into. Its `Display` carries the underlying detail for logs; the
//! text shown to a user comes from [`AssessmentError::user_message`], which
//! is a fixed string per category.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Shown instead of calling the provider when the answer is blank.
pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter an answer before analyzing.";

pub const TIMEOUT_MESSAGE: &str = "The assessment request timed out. Please try again.";
pub const API_ERROR_MESSAGE: &str = "The language-model service returned an error.";
pub const INVALID_REQUEST_MESSAGE: &str = "The assessment request was rejected as invalid.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred while assessing your text.";

/// A failed assessment request.
#[derive(Error, Debug)]
pub enum AssessmentError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The provider reported a failure on its side (or refused service).
    #[error("provider API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider rejected the request as malformed.
    #[error("invalid request (HTTP {status}): {message}")]
    InvalidRequest { status: u16, message: String },

    /// Anything else: transport failures, undecodable bodies, empty replies.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AssessmentError {
    /// Fixed, user-facing text for this error category.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout => TIMEOUT_MESSAGE,
            Self::Api { .. } => API_ERROR_MESSAGE,
            Self::InvalidRequest { .. } => INVALID_REQUEST_MESSAGE,
            Self::Unexpected(_) => UNEXPECTED_MESSAGE,
        }
    }

    /// Classify a non-success HTTP response.
    pub fn from_status(status: StatusCode, body: impl Into<String>) -> Self {
        let message = body.into();
        match status.as_u16() {
            400 | 404 | 409 | 413 | 422 => Self::InvalidRequest {
                status: status.as_u16(),
                message,
            },
            code => Self::Api {
                status: code,
                message,
            },
        }
    }
}

impl From<reqwest::Error> for AssessmentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::from_status(status, err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// Failure to assemble an [`AppConfig`](crate::config::AppConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("prompt list is empty")]
    EmptyPromptList,

    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("failed to create API client: {0}")]
    Client(#[source] AssessmentError),
}
