use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;
use super::oauth::OauthError;
use crate::anilist::transport::TransportError;

/// Coarse classification of a failed AniList operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Auth,
    Http,
    Timeout,
    Unreachable,
}

/// Failure of one logical AniList operation (a query, or a whole paginated fetch).
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Credential exchange/refresh failed, or the API answered 401/403.
    #[error("AniList authentication error: {0}")]
    Auth(#[source] OauthError),

    #[error("AniList returned status {status}: {body:.200}")]
    HttpStatus { status: StatusCode, body: String },

    /// 200 response whose payload does not match the expected schema.
    #[error("AniList returned a malformed payload: {0}")]
    Malformed(String),

    #[error("AniList query gave up after {attempts} attempts")]
    Timeout { attempts: u32 },

    #[error("AniList unreachable: {0}")]
    Unreachable(#[source] TransportError),
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Auth(_) => ApiErrorKind::Auth,
            ApiError::HttpStatus { .. } | ApiError::Malformed(_) => ApiErrorKind::Http,
            ApiError::Timeout { .. } => ApiErrorKind::Timeout,
            ApiError::Unreachable(_) => ApiErrorKind::Unreachable,
        }
    }
}

impl IsRetryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout { .. } | ApiError::Unreachable(_) => true,
            ApiError::HttpStatus { status, .. } => status.is_server_error(),
            ApiError::Auth(_) | ApiError::Malformed(_) => false,
        }
    }
}

impl From<OauthError> for ApiError {
    fn from(e: OauthError) -> Self {
        match e {
            // A network failure while exchanging tokens is still a network failure.
            OauthError::Transport(err) => ApiError::Unreachable(err),
            other => ApiError::Auth(other),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Unreachable(e)
    }
}
