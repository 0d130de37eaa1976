use alpe_schema::{GraphqlRequest, GraphqlResponse};
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::auth::AuthSession;
use super::clock::Clock;
use super::quota::{QuotaTracker, RATE_LIMIT_REMAINING_HEADER};
use super::transport::{Transport, TransportResponse};
use crate::error::{ApiError, OauthError};

pub const ANILIST_GRAPHQL_URL: &str = "https://graphql.anilist.co";
pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per query, 429 retries included.
    pub max_attempts: u32,
    /// A 500 is retried only while fewer than this many attempts have been made.
    pub server_error_attempts: u32,
    /// Fallback when a 429 carries no usable `Retry-After`.
    pub default_retry_after: Duration,
    /// Added to every `Retry-After` wait.
    pub retry_after_margin: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            server_error_attempts: 3,
            default_retry_after: Duration::from_secs(60),
            retry_after_margin: Duration::from_millis(100),
        }
    }
}

/// Issues AniList GraphQL queries one at a time under auth, quota and retry rules.
pub struct Requester {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    auth: AuthSession,
    quota: QuotaTracker,
    endpoint: Url,
    policy: RetryPolicy,
}

impl Requester {
    pub fn new(
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        auth: AuthSession,
        endpoint: Url,
    ) -> Self {
        let quota = QuotaTracker::new(clock.clone());
        Self {
            transport,
            clock,
            auth,
            quota,
            endpoint,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Run one query and return its `data` object.
    pub async fn query(
        &mut self,
        query: &str,
        variables: &Map<String, Value>,
    ) -> Result<Value, ApiError> {
        let access_token = self.auth.ensure_valid().await?.access_token.clone();
        self.quota.before_call().await;

        let body = serde_json::to_vec(&GraphqlRequest { query, variables })
            .map_err(|e| ApiError::Malformed(format!("failed to encode query: {e}")))?;

        for attempt in 1..=self.policy.max_attempts {
            self.quota.record_call();
            let resp = self
                .transport
                .post_json(&self.endpoint, Some(access_token.as_str()), body.clone())
                .await
                .inspect_err(|e| warn!(attempt, error = %e, "AniList unreachable"))?;

            match resp.status {
                StatusCode::OK => {
                    self.quota
                        .after_call(resp.header_str(RATE_LIMIT_REMAINING_HEADER));
                    debug!(
                        attempt,
                        remaining = self.quota.remaining(),
                        "AniList query succeeded"
                    );
                    return decode_data(&resp.body);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    if attempt == self.policy.max_attempts {
                        break;
                    }
                    let wait = self.retry_after(&resp) + self.policy.retry_after_margin;
                    info!(
                        attempt,
                        wait_ms = wait.as_millis() as u64,
                        "AniList rate limited, waiting"
                    );
                    self.clock.sleep(wait).await;
                }
                StatusCode::INTERNAL_SERVER_ERROR
                    if attempt < self.policy.server_error_attempts =>
                {
                    warn!(attempt, "AniList server error, retrying");
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    warn!(status = %resp.status, "AniList rejected the access token");
                    return Err(ApiError::Auth(OauthError::Rejected(resp.status)));
                }
                status => {
                    let body = body_preview(&resp.body);
                    warn!(%status, body = %body, "AniList query failed");
                    return Err(ApiError::HttpStatus { status, body });
                }
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "AniList query exhausted its retry budget"
        );
        Err(ApiError::Timeout {
            attempts: self.policy.max_attempts,
        })
    }

    /// Run one query and decode `data` into `T`.
    pub async fn query_as<T: DeserializeOwned>(
        &mut self,
        query: &str,
        variables: &Map<String, Value>,
    ) -> Result<T, ApiError> {
        let data = self.query(query, variables).await?;
        serde_json::from_value(data)
            .map_err(|e| ApiError::Malformed(format!("unexpected response shape: {e}")))
    }

    fn retry_after(&self, resp: &TransportResponse) -> Duration {
        resp.header_str(RETRY_AFTER.as_str())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(self.policy.default_retry_after)
    }
}

fn decode_data(body: &[u8]) -> Result<Value, ApiError> {
    let parsed: GraphqlResponse<Value> = serde_json::from_slice(body).map_err(|e| {
        ApiError::Malformed(format!("{e}; body: {}", body_preview(body)))
    })?;

    match parsed.data {
        Some(data) if !data.is_null() => {
            if !parsed.errors.is_empty() {
                debug!(errors = ?parsed.errors, "AniList returned partial errors");
            }
            Ok(data)
        }
        _ => {
            let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
            Err(ApiError::Malformed(format!(
                "response has no data; errors: {messages:?}"
            )))
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    let raw = String::from_utf8_lossy(body);
    format!("{:.len$}", raw, len = UPSTREAM_BODY_PREVIEW_CHARS)
}
