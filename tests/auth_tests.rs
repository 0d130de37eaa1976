mod support;

use alpe::anilist::{
    AuthSession, AuthState, Clock, ReqwestTransport, SystemClock, TokenStore, Transport,
    TransportSettings,
};
use alpe::error::OauthError;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use support::*;

#[derive(Clone, Default)]
struct CaptureState {
    reqs: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

async fn token_handler(
    State(state): State<CaptureState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.reqs.lock().unwrap().push(body.clone());
    state.content_types.lock().unwrap().push(
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string(),
    );

    match body["grant_type"].as_str().unwrap_or("") {
        "authorization_code" if body["code"] == "good-code" => (
            StatusCode::OK,
            Json(json!({
                "token_type": "Bearer",
                "access_token": "access-from-code",
                "refresh_token": "refresh-from-code",
                "expires_in": 31_536_000
            })),
        ),
        "refresh_token" if body["refresh_token"] == "rt-1" => (
            StatusCode::OK,
            Json(json!({
                "token_type": "Bearer",
                "access_token": "access-from-refresh",
                "expires_in": 3600
            })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        ),
    }
}

struct TokenServer {
    state: CaptureState,
    token_url: String,
}

async fn spawn_token_server() -> TokenServer {
    let state = CaptureState::default();
    let app = Router::new()
        .route("/api/v2/oauth/token", post(token_handler))
        .with_state(state.clone());
    let base = spawn_test_server(app).await;
    TokenServer {
        state,
        token_url: base.join("/api/v2/oauth/token").unwrap().to_string(),
    }
}

async fn session(
    server: &TokenServer,
    store: TokenStore,
    auth_code: Option<&str>,
) -> AuthSession {
    let transport: Arc<dyn Transport> =
        Arc::new(ReqwestTransport::new(&TransportSettings::default()).unwrap());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    AuthSession::load(
        transport,
        clock,
        store,
        oauth_client(&server.token_url),
        auth_code.map(str::to_string),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn authorization_code_is_exchanged_and_persisted() {
    let server = spawn_token_server().await;
    let path = temp_path("auth-code");
    let store = TokenStore::new(&path);

    let mut auth = session(&server, store.clone(), Some("good-code")).await;
    assert_eq!(auth.state(), AuthState::NoCredential);

    let cred = auth.ensure_valid().await.unwrap().clone();
    assert_eq!(cred.access_token, "access-from-code");
    assert_eq!(auth.state(), AuthState::Valid);

    let reqs = server.state.reqs.lock().unwrap().clone();
    assert_eq!(reqs.len(), 1);
    assert_eq!(
        reqs[0],
        json!({
            "grant_type": "authorization_code",
            "client_id": "4242",
            "client_secret": "s3cr3t",
            "redirect_uri": "https://anilist.co/api/v2/oauth/pin",
            "code": "good-code"
        })
    );
    assert!(server.state.content_types.lock().unwrap()[0].starts_with("application/json"));

    // A new session over the same file starts from the stored credential.
    let reloaded = session(&server, store.clone(), None).await;
    assert_eq!(reloaded.state(), AuthState::Valid);
    assert_eq!(store.load().await.unwrap(), Some(cred));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn refresh_keeps_refresh_token_when_not_rotated() {
    let server = spawn_token_server().await;
    let path = temp_path("auth-refresh");
    let store = TokenStore::new(&path);
    store.save(&credential(1)).await.unwrap();

    let mut auth = session(&server, store.clone(), None).await;
    assert_eq!(auth.state(), AuthState::Expired);

    let cred = auth.ensure_valid().await.unwrap().clone();
    assert_eq!(cred.access_token, "access-from-refresh");
    assert_eq!(cred.refresh_token, "rt-1");
    assert_eq!(store.load().await.unwrap(), Some(cred));

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn rejected_exchange_is_fatal_and_nothing_is_saved() {
    let server = spawn_token_server().await;
    let path = temp_path("auth-reject");
    let store = TokenStore::new(&path);

    let mut auth = session(&server, store.clone(), Some("bad-code")).await;
    let err = auth.ensure_valid().await.unwrap_err();

    assert!(matches!(
        err,
        OauthError::Exchange { grant_type: "authorization_code", status } if status == StatusCode::BAD_REQUEST
    ));
    assert_eq!(auth.state(), AuthState::NoCredential);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn missing_code_fails_without_calling_the_endpoint() {
    let server = spawn_token_server().await;
    let path = temp_path("auth-missing");

    let mut auth = session(&server, TokenStore::new(&path), None).await;
    let err = auth.ensure_valid().await.unwrap_err();

    assert!(matches!(err, OauthError::MissingAuthorizationCode));
    assert!(server.state.reqs.lock().unwrap().is_empty());
    assert!(auth.authorize_url().as_str().contains("client_id=4242"));
}

#[tokio::test]
async fn unreachable_token_endpoint_keeps_the_expired_credential() {
    let path = temp_path("auth-down");
    let store = TokenStore::new(&path);
    store.save(&credential(1)).await.unwrap();

    let server = TokenServer {
        state: CaptureState::default(),
        token_url: "http://127.0.0.1:9/api/v2/oauth/token".to_string(),
    };
    let mut auth = session(&server, store, None).await;
    let err = auth.ensure_valid().await.unwrap_err();

    assert!(matches!(err, OauthError::Transport(_)));
    assert_eq!(auth.state(), AuthState::Expired);

    let _ = std::fs::remove_file(&path);
}
