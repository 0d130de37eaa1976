use crate::error::{ApiErrorBody, ApiErrorObject};
use crate::server::router::AlpeState;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, header::WWW_AUTHENTICATE, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::headers::{
    Authorization, HeaderMapExt,
    authorization::{Basic, Bearer},
};
use subtle::ConstantTimeEq;
use tracing::debug;

const SCRAPE_REALM: &str = "Basic realm=\"alpe\"";

/// Where a scraper put its access key. Each maps to one Prometheus
/// `scrape_config` option: `authorization`, `basic_auth` or `params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeCredential {
    Bearer(String),
    /// Basic auth carries the key as the password; the username is free-form.
    Basic(String),
    Query(String),
}

impl ScrapeCredential {
    pub fn from_request(headers: &HeaderMap, query: Option<&str>) -> Option<Self> {
        if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
            return Some(Self::Bearer(bearer.token().to_string()));
        }
        if let Some(Authorization(basic)) = headers.typed_get::<Authorization<Basic>>() {
            return Some(Self::Basic(basic.password().to_string()));
        }
        query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == "key")
                .map(|(_, v)| Self::Query(v.into_owned()))
        })
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Bearer(key) | Self::Basic(key) | Self::Query(key) => key,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::Basic(_) => "basic",
            Self::Query(_) => "query",
        }
    }

    fn matches(&self, expected: &str) -> bool {
        self.key().as_bytes().ct_eq(expected.as_bytes()).into()
    }
}

/// Admits a scrape of `/metrics` when it presents the configured access key.
#[derive(Debug, Clone)]
pub struct ScrapeKey(pub &'static str);

impl FromRequestParts<AlpeState> for ScrapeKey {
    type Rejection = ScrapeRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AlpeState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credential) = ScrapeCredential::from_request(&parts.headers, parts.uri.query())
        else {
            return Err(ScrapeRejection::MissingKey);
        };

        if credential.matches(&state.access_key) {
            Ok(ScrapeKey(credential.scheme()))
        } else {
            debug!(scheme = credential.scheme(), "scrape rejected: wrong access key");
            Err(ScrapeRejection::WrongKey)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeRejection {
    MissingKey,
    WrongKey,
}

impl IntoResponse for ScrapeRejection {
    fn into_response(self) -> Response {
        let message = match self {
            ScrapeRejection::MissingKey => {
                "Scrape requests need the access key (bearer token, basic auth password or ?key=)."
            }
            ScrapeRejection::WrongKey => "The access key does not match.",
        };
        let body = ApiErrorBody {
            inner: ApiErrorObject {
                code: "UNAUTHORIZED".to_string(),
                message: message.to_string(),
                details: None,
            },
        };
        let mut resp = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        resp.headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static(SCRAPE_REALM));
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
        headers
    }

    #[test]
    fn reads_each_prometheus_key_form() {
        assert_eq!(
            ScrapeCredential::from_request(&headers("Bearer k-1"), None),
            Some(ScrapeCredential::Bearer("k-1".to_string()))
        );
        // prometheus:scrape-key
        assert_eq!(
            ScrapeCredential::from_request(&headers("Basic cHJvbWV0aGV1czpzY3JhcGUta2V5"), None),
            Some(ScrapeCredential::Basic("scrape-key".to_string()))
        );
        assert_eq!(
            ScrapeCredential::from_request(&HeaderMap::new(), Some("target=x&key=a%20b")),
            Some(ScrapeCredential::Query("a b".to_string()))
        );
        assert_eq!(ScrapeCredential::from_request(&HeaderMap::new(), Some("target=x")), None);
    }

    #[test]
    fn header_wins_over_query() {
        let credential =
            ScrapeCredential::from_request(&headers("Bearer from-header"), Some("key=from-query"))
                .unwrap();
        assert_eq!(credential.scheme(), "bearer");
        assert_eq!(credential.key(), "from-header");
    }

    #[test]
    fn key_comparison_is_exact() {
        let credential = ScrapeCredential::Basic("scrape-key".to_string());
        assert!(credential.matches("scrape-key"));
        assert!(!credential.matches("scrape-key2"));
        assert!(!credential.matches(""));
    }

    #[test]
    fn rejection_challenges_for_basic_auth() {
        let resp = ScrapeRejection::MissingKey.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get(WWW_AUTHENTICATE).unwrap(), SCRAPE_REALM);
    }
}
