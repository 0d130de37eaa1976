use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::anilist::oauth::{ANILIST_AUTHORIZE_URL, ANILIST_PIN_REDIRECT_URI, ANILIST_TOKEN_URL};
use crate::anilist::requester::ANILIST_GRAPHQL_URL;
use crate::anilist::transport::TransportSettings;

/// AniList API client settings (`anilist` table).
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnilistConfig {
    /// Numeric client id from the AniList developer page.
    #[serde(deserialize_with = "deserialize_id_lax")]
    pub client_id: String,
    pub client_secret: String,

    /// One-time code from the authorize page. Only needed until a token file exists.
    pub auth_code: Option<String>,
    pub redirect_uri: String,

    /// Relative paths are resolved against `basic.data_dir`.
    pub tokens_file: PathBuf,

    pub oauth_authorize_url: String,
    pub oauth_token_url: String,
    pub graphql_url: String,

    /// Optional upstream proxy (e.g., http://127.0.0.1:1080).
    pub proxy: Option<Url>,

    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,

    /// How long a fetched library is served before AniList is queried again.
    /// `0` disables the cache.
    pub cache_timeout_secs: u64,
}

impl Default for AnilistConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            auth_code: None,
            redirect_uri: ANILIST_PIN_REDIRECT_URI.to_string(),
            tokens_file: PathBuf::from("./tokens.json"),
            oauth_authorize_url: ANILIST_AUTHORIZE_URL.to_string(),
            oauth_token_url: ANILIST_TOKEN_URL.to_string(),
            graphql_url: ANILIST_GRAPHQL_URL.to_string(),
            proxy: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            cache_timeout_secs: 55 * 60,
        }
    }
}

impl std::fmt::Debug for AnilistConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnilistConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("auth_code", &self.auth_code.as_ref().map(|_| "<redacted>"))
            .field("redirect_uri", &self.redirect_uri)
            .field("tokens_file", &self.tokens_file)
            .field("graphql_url", &self.graphql_url)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .field("cache_timeout_secs", &self.cache_timeout_secs)
            .finish_non_exhaustive()
    }
}

impl AnilistConfig {
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            proxy: self.proxy.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn graphql_endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.graphql_url)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_timeout_secs > 0).then(|| Duration::from_secs(self.cache_timeout_secs))
    }
}

fn deserialize_id_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for anilist.client_id",
        )),
    }
}
