//! Error types for the API client.

use std::fmt;
use std::string::FromUtf8Error;

use crate::validate::ValidationError;

/// Errors that can occur when making API requests.
///
/// The variants are mutually exclusive for a single call, so callers can pick
/// a retry policy per category: decode and validation failures point at a
/// schema mismatch, while some [`ErrorKind`]s are worth retrying later.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a status code (connection refused, timeout,
    /// broken body stream).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("{0}")]
    Api(ApiError),
    /// The API answered with a success status but the body is not valid JSON
    /// for the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    /// The API answered with a success status but a text body is not UTF-8.
    #[error("failed to decode response text: {0}")]
    DecodeText(#[source] FromUtf8Error),
    /// The body decoded but a required field is missing.
    #[error("invalid response: {0}")]
    Validation(#[from] ValidationError),
    /// The request URL could not be built from the base address.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The credential contains characters that cannot go in a header.
    #[error("api key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}

impl Error {
    /// The domain error kind, if the API returned a non-success status.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Whether resending the same request later may succeed.
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api(e) => e.kind.is_retryable(),
            Error::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

/// Domain failure derived from an HTTP status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400
    BadRequest,
    /// 401
    AuthorizationFailed,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 413
    RequestTooLarge,
    /// 415
    UnsupportedAccept,
    /// 429 and 529
    TooManyRequests,
    /// 456
    QuotaExceeded,
    /// 500
    InternalError,
    /// 503
    ResourceUnavailable,
    /// Any other status code.
    Unknown(u16),
}

impl ErrorKind {
    /// Maps a status code to its kind. Depends on the code alone.
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            401 => ErrorKind::AuthorizationFailed,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            413 => ErrorKind::RequestTooLarge,
            415 => ErrorKind::UnsupportedAccept,
            429 | 529 => ErrorKind::TooManyRequests,
            456 => ErrorKind::QuotaExceeded,
            500 => ErrorKind::InternalError,
            503 => ErrorKind::ResourceUnavailable,
            other => ErrorKind::Unknown(other),
        }
    }

    /// True for rate limiting and temporary unavailability, the kinds worth
    /// resending later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::TooManyRequests | ErrorKind::ResourceUnavailable)
    }

    fn base_text(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::AuthorizationFailed => {
                "authorization failed. please supply a valid `DeepL-Auth-Key` via the `Authorization` header"
            }
            ErrorKind::Forbidden => {
                "forbidden. the access to the requested resource is denied, because of insufficient access rights"
            }
            ErrorKind::NotFound => "the requested resource could not be found",
            ErrorKind::RequestTooLarge => "the request size exceeds the limit",
            ErrorKind::UnsupportedAccept => {
                "the requested entries format specified in the `Accept` header is not supported"
            }
            ErrorKind::TooManyRequests => "too many requests. please wait and resend your request",
            ErrorKind::QuotaExceeded => "quota exceeded. the character limit has been reached",
            ErrorKind::InternalError => "internal error",
            ErrorKind::ResourceUnavailable => "resource currently unavailable. try again later",
            ErrorKind::Unknown(_) => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unknown(status) => write!(f, "unknown error, status code: {}", status),
            kind => f.write_str(kind.base_text()),
        }
    }
}

/// A non-success response, optionally enriched by the error body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: Option<String>,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            detail: None,
        }
    }

    /// Builds the error for `status`, reading `message`/`detail` from `body`
    /// when it is a JSON object. Unknown statuses keep the bare text.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let kind = ErrorKind::from_status(status);
        if matches!(kind, ErrorKind::Unknown(_)) {
            return Self::new(kind);
        }
        let Ok(serde_json::Value::Object(fields)) = serde_json::from_slice(body) else {
            return Self::new(kind);
        };
        let text = |name: &str| fields.get(name).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            kind,
            message: text("message"),
            detail: text("detail"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ", message : {}", message)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ", detail : {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
