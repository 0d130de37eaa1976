use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::store::StoreError;
use crate::anilist::transport::TransportError;

#[derive(Debug, ThisError)]
pub enum OauthError {
    #[error("OAuth {grant_type} exchange failed with status: {status}")]
    Exchange {
        grant_type: &'static str,
        status: StatusCode,
    },

    #[error("OAuth token endpoint parse error: {message}. Body: {body}")]
    Parse { message: String, body: String },

    #[error("no credential available and no authorization code configured")]
    MissingAuthorizationCode,

    #[error("access token rejected by upstream with status: {0}")]
    Rejected(StatusCode),

    #[error("failed to persist credential: {0}")]
    Persist(#[from] StoreError),

    #[error("OAuth token endpoint unreachable: {0}")]
    Transport(#[from] TransportError),

    #[error("OAuth configuration error: {0}")]
    Config(#[from] url::ParseError),
}

impl OauthError {
    /// Build a parse error keeping at most 100 characters of the offending body.
    pub(crate) fn parse(message: impl ToString, body: &[u8]) -> Self {
        let body_str = String::from_utf8_lossy(body);
        let body = body_str
            .char_indices()
            .nth(100)
            .map(|(idx, _)| format!("{}...<truncated>", &body_str[..idx]))
            .unwrap_or_else(|| body_str.into_owned());
        OauthError::Parse {
            message: message.to_string(),
            body,
        }
    }
}
