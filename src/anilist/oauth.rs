use oauth2::basic::BasicClient;
use oauth2::{AuthUrl, ClientId, ClientSecret, CsrfToken, RedirectUrl};
use url::Url;

use crate::error::OauthError;

pub const ANILIST_AUTHORIZE_URL: &str = "https://anilist.co/api/v2/oauth/authorize";
pub const ANILIST_TOKEN_URL: &str = "https://anilist.co/api/v2/oauth/token";
pub const ANILIST_PIN_REDIRECT_URI: &str = "https://anilist.co/api/v2/oauth/pin";

/// Registered AniList API client. Secrets stay wrapped so `Debug` never prints them.
#[derive(Debug, Clone)]
pub struct OauthClientConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub redirect_uri: RedirectUrl,
    pub authorize_url: AuthUrl,
    pub token_url: Url,
}

impl OauthClientConfig {
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        authorize_url: &str,
        token_url: &str,
    ) -> Result<Self, OauthError> {
        Ok(Self {
            client_id: ClientId::new(client_id.to_string()),
            client_secret: ClientSecret::new(client_secret.to_string()),
            redirect_uri: RedirectUrl::new(redirect_uri.to_string())?,
            authorize_url: AuthUrl::new(authorize_url.to_string())?,
            token_url: Url::parse(token_url)?,
        })
    }

    /// URL the user opens in a browser to obtain a one-time authorization code.
    pub fn authorize_url(&self) -> Url {
        let (url, _csrf) = BasicClient::new(self.client_id.clone())
            .set_auth_uri(self.authorize_url.clone())
            .set_redirect_uri(self.redirect_uri.clone())
            .authorize_url(CsrfToken::new_random)
            .url();
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_requests_a_code_for_the_pin_page() {
        let cfg = OauthClientConfig::new(
            "4242",
            "s3cr3t",
            ANILIST_PIN_REDIRECT_URI,
            ANILIST_AUTHORIZE_URL,
            ANILIST_TOKEN_URL,
        )
        .unwrap();

        let url = cfg.authorize_url();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(url.as_str().starts_with(ANILIST_AUTHORIZE_URL));
        assert!(pairs.contains(&("client_id".to_string(), "4242".to_string())));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            ANILIST_PIN_REDIRECT_URI.to_string()
        )));
        assert!(!format!("{cfg:?}").contains("s3cr3t"));
    }
}
