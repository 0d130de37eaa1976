use alpe_schema::{TokenRequest, TokenResponse};
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::credential::Credential;
use super::oauth::OauthClientConfig;
use super::token_store::TokenStore;
use super::transport::Transport;
use crate::error::OauthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    NoCredential,
    Valid,
    Expired,
}

/// Owns the AniList credential and the exchanges that create or renew it.
pub struct AuthSession {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    store: TokenStore,
    client: OauthClientConfig,
    auth_code: Option<String>,
    credential: Option<Credential>,
}

impl AuthSession {
    pub fn new(
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        store: TokenStore,
        client: OauthClientConfig,
        auth_code: Option<String>,
        credential: Option<Credential>,
    ) -> Self {
        Self {
            transport,
            clock,
            store,
            client,
            auth_code: auth_code.filter(|c| !c.trim().is_empty()),
            credential,
        }
    }

    /// Build a session from whatever credential the store currently holds.
    pub async fn load(
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        store: TokenStore,
        client: OauthClientConfig,
        auth_code: Option<String>,
    ) -> Result<Self, OauthError> {
        let credential = store.load().await?;
        let session = Self::new(transport, clock, store, client, auth_code, credential);
        info!(
            path = %session.store.path().display(),
            state = ?session.state(),
            "AniList auth session loaded"
        );
        Ok(session)
    }

    pub fn state(&self) -> AuthState {
        match &self.credential {
            None => AuthState::NoCredential,
            Some(c) if c.is_expired_at(self.clock.now()) => AuthState::Expired,
            Some(_) => AuthState::Valid,
        }
    }

    pub fn has_authorization_code(&self) -> bool {
        self.auth_code.is_some()
    }

    pub fn authorize_url(&self) -> url::Url {
        self.client.authorize_url()
    }

    /// Return a credential that is not expired, exchanging or refreshing first if needed.
    pub async fn ensure_valid(&mut self) -> Result<&Credential, OauthError> {
        match self.state() {
            AuthState::Valid => {}
            AuthState::Expired => self.refresh().await?,
            AuthState::NoCredential => self.exchange_code().await?,
        }
        self.credential
            .as_ref()
            .ok_or(OauthError::MissingAuthorizationCode)
    }

    async fn exchange_code(&mut self) -> Result<(), OauthError> {
        let Some(code) = self.auth_code.as_deref() else {
            warn!(
                authorize_url = %self.client.authorize_url(),
                "no AniList credential and no authorization code configured"
            );
            return Err(OauthError::MissingAuthorizationCode);
        };

        let request = TokenRequest::AuthorizationCode {
            client_id: self.client.client_id.as_str(),
            client_secret: self.client.client_secret.secret(),
            redirect_uri: self.client.redirect_uri.as_str(),
            code,
        };
        let credential = self.request_token(&request, None).await?;
        self.store.save(&credential).await?;
        self.credential = Some(credential);
        // Codes are single use.
        self.auth_code = None;
        info!("AniList authorization code exchanged");
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), OauthError> {
        let Some(previous) = self.credential.as_ref() else {
            return self.exchange_code().await;
        };
        let previous_refresh = previous.refresh_token.clone();

        let request = TokenRequest::RefreshToken {
            client_id: self.client.client_id.as_str(),
            client_secret: self.client.client_secret.secret(),
            refresh_token: &previous_refresh,
        };
        let credential = match self.request_token(&request, Some(&previous_refresh)).await {
            Ok(credential) => credential,
            Err(err @ OauthError::Transport(_)) => return Err(err),
            Err(err) => {
                warn!(error = %err, "AniList refresh rejected, dropping credential");
                self.credential = None;
                return Err(err);
            }
        };
        self.store.save(&credential).await?;
        self.credential = Some(credential);
        info!("AniList credential refreshed");
        Ok(())
    }

    async fn request_token(
        &self,
        request: &TokenRequest<'_>,
        previous_refresh: Option<&str>,
    ) -> Result<Credential, OauthError> {
        let grant_type = request.grant_type();
        let body = serde_json::to_vec(request).map_err(|e| OauthError::parse(e, b""))?;
        debug!(grant_type, url = %self.client.token_url, "posting OAuth token request");

        let resp = self
            .transport
            .post_json(&self.client.token_url, None, body)
            .await?;
        if resp.status != StatusCode::OK {
            warn!(grant_type, status = %resp.status, "OAuth token exchange failed");
            return Err(OauthError::Exchange {
                grant_type,
                status: resp.status,
            });
        }

        let token: TokenResponse =
            serde_json::from_slice(&resp.body).map_err(|e| OauthError::parse(e, &resp.body))?;
        Credential::from_token_response(token, previous_refresh, self.clock.now())
    }
}
