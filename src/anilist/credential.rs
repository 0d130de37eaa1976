use alpe_schema::TokenResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::OauthError;

/// Bearer credential for the AniList API, as persisted on disk.
///
/// `valid_until` is the server-declared expiry in epoch seconds, with no
/// safety margin applied.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token_type: String,
    #[serde(rename = "access")]
    pub access_token: String,
    #[serde(rename = "refresh")]
    pub refresh_token: String,
    pub valid_until: i64,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("valid_until", &self.valid_until)
            .finish()
    }
}

impl Credential {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until <= now.timestamp()
    }

    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.valid_until, 0)
    }

    /// Build a credential from a token endpoint reply received at `now`.
    ///
    /// A reply without `refresh_token` keeps `previous_refresh`.
    pub(crate) fn from_token_response(
        token_response: TokenResponse,
        previous_refresh: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, OauthError> {
        let access_token = token_response.access_token.trim().to_string();
        if access_token.is_empty() {
            return Err(OauthError::parse(
                "missing access_token in token response",
                b"",
            ));
        }

        let refresh_token = token_response
            .refresh_token
            .map(|t| t.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| previous_refresh.map(str::to_string))
            .ok_or_else(|| OauthError::parse("missing refresh_token in token response", b""))?;

        Ok(Credential {
            token_type: token_response.token_type,
            access_token,
            refresh_token,
            valid_until: now.timestamp().saturating_add(token_response.expires_in),
        })
    }
}
