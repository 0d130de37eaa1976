use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error as ThisError;

use super::api::{ApiError, ApiErrorKind};
use alpe_exposition::ExpositionError;

#[derive(Debug, ThisError)]
pub enum AlpeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("metrics document error: {0}")]
    Exposition(#[from] ExpositionError),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<figment::Error> for AlpeError {
    fn from(e: figment::Error) -> Self {
        AlpeError::Config(Box::new(e))
    }
}

impl IntoResponse for AlpeError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match &self {
            AlpeError::Api(err) => {
                let (status, code, message) = match err.kind() {
                    ApiErrorKind::Auth => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "AUTH_REQUIRED",
                        "AniList credential is missing or was rejected.",
                    ),
                    ApiErrorKind::Timeout => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "UPSTREAM_TIMEOUT",
                        "AniList did not answer within the retry budget.",
                    ),
                    ApiErrorKind::Unreachable => (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_UNREACHABLE",
                        "AniList could not be reached.",
                    ),
                    ApiErrorKind::Http => (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "An upstream error occurred.",
                    ),
                };
                let details = match err {
                    ApiError::HttpStatus { status, .. } => {
                        Some(serde_json::json!({ "upstream_status": status.as_u16() }))
                    }
                    _ => None,
                };
                (
                    status,
                    ApiErrorObject {
                        code: code.to_string(),
                        message: message.to_string(),
                        details,
                    },
                )
            }

            AlpeError::Exposition(_)
            | AlpeError::Config(_)
            | AlpeError::InvalidConfig(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorObject {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                    details: None,
                },
            ),
        };
        (status, Json(ApiErrorBody { inner: error_body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OauthError;

    #[test]
    fn api_error_kinds_map_to_gateway_statuses() {
        let cases = [
            (
                AlpeError::from(ApiError::Auth(OauthError::MissingAuthorizationCode)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AlpeError::from(ApiError::Timeout { attempts: 5 }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AlpeError::from(ApiError::HttpStatus {
                    status: StatusCode::BAD_REQUEST,
                    body: "{}".to_string(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AlpeError::InvalidConfig("missing".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
