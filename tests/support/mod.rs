#![allow(dead_code)]

use alpe::anilist::{
    AuthSession, Clock, Credential, ManualClock, OauthClientConfig, Requester, TokenStore,
    Transport, TransportError, TransportResponse,
};
use async_trait::async_trait;
use axum::Router;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;
use url::Url;

pub const GRAPHQL_URL: &str = "http://anilist.test/graphql";
pub const TOKEN_URL: &str = "http://anilist.test/oauth/token";
pub const START: i64 = 1_700_000_000;

#[derive(Debug, Clone)]
pub struct Captured {
    pub url: String,
    pub bearer: Option<String>,
    pub body: Value,
}

/// Replays canned replies in order and records every request.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<TransportResponse, TransportError>>>>,
    calls: Arc<Mutex<Vec<Captured>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: TransportResponse) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn push_err(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError::new(message)));
        self
    }

    pub fn calls(&self) -> Vec<Captured> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<Captured> {
        self.calls().into_iter().filter(|c| c.url == url).collect()
    }

    pub fn pending(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &Url,
        bearer: Option<&str>,
        body: Vec<u8>,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(Captured {
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("script exhausted")))
    }
}

pub fn reply(status: StatusCode, body: Value) -> TransportResponse {
    TransportResponse {
        status,
        headers: HeaderMap::new(),
        body: body.to_string().into_bytes(),
    }
}

pub fn with_header(mut resp: TransportResponse, name: &'static str, value: &str) -> TransportResponse {
    resp.headers.insert(
        HeaderName::from_static(name),
        HeaderValue::from_str(value).unwrap(),
    );
    resp
}

pub fn data(value: Value) -> TransportResponse {
    reply(StatusCode::OK, json!({ "data": value }))
}

pub fn status(code: u16) -> TransportResponse {
    reply(StatusCode::from_u16(code).unwrap(), json!({ "errors": [{ "message": "scripted" }] }))
}

pub fn token_reply(access: &str, refresh: Option<&str>, expires_in: i64) -> TransportResponse {
    let mut body = json!({
        "token_type": "Bearer",
        "access_token": access,
        "expires_in": expires_in,
    });
    if let Some(refresh) = refresh {
        body["refresh_token"] = json!(refresh);
    }
    reply(StatusCode::OK, body)
}

pub fn start_time() -> DateTime<Utc> {
    DateTime::from_timestamp(START, 0).unwrap()
}

pub fn credential(valid_until: i64) -> Credential {
    Credential {
        token_type: "Bearer".to_string(),
        access_token: "at-1".to_string(),
        refresh_token: "rt-1".to_string(),
        valid_until,
    }
}

pub fn temp_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!("alpe-{prefix}-{}-{}.json", std::process::id(), nanos));
    temp_path
}

pub fn oauth_client(token_url: &str) -> OauthClientConfig {
    OauthClientConfig::new(
        "4242",
        "s3cr3t",
        "https://anilist.co/api/v2/oauth/pin",
        "https://anilist.co/api/v2/oauth/authorize",
        token_url,
    )
    .unwrap()
}

pub struct Harness {
    pub transport: ScriptedTransport,
    pub clock: ManualClock,
    pub tokens_path: PathBuf,
}

impl Harness {
    pub fn new(prefix: &str) -> Self {
        Self {
            transport: ScriptedTransport::new(),
            clock: ManualClock::new(start_time()),
            tokens_path: temp_path(prefix),
        }
    }

    pub fn session(&self, credential: Option<Credential>, auth_code: Option<&str>) -> AuthSession {
        AuthSession::new(
            Arc::new(self.transport.clone()),
            Arc::new(self.clock.clone()) as Arc<dyn Clock>,
            TokenStore::new(&self.tokens_path),
            oauth_client(TOKEN_URL),
            auth_code.map(str::to_string),
            credential,
        )
    }

    /// Requester holding a credential that stays valid for an hour.
    pub fn requester(&self) -> Requester {
        self.requester_with(Some(credential(START + 3600)), None)
    }

    pub fn requester_with(&self, credential: Option<Credential>, auth_code: Option<&str>) -> Requester {
        Requester::new(
            Arc::new(self.transport.clone()),
            Arc::new(self.clock.clone()),
            self.session(credential, auth_code),
            Url::parse(GRAPHQL_URL).unwrap(),
        )
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.tokens_path);
    }
}

pub async fn spawn_test_server(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let base = Url::parse(&format!("http://{}", addr)).expect("valid base url");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    base
}

pub fn media_entry(entry_id: i64, media_id: i64, title: &str, average_score: Value) -> Value {
    json!({
        "id": entry_id,
        "status": "CURRENT",
        "score": 8,
        "progress": 1,
        "repeat": 0,
        "private": false,
        "customLists": { "Favourites": false },
        "media": {
            "id": media_id,
            "title": { "romaji": title, "userPreferred": title },
            "format": "TV",
            "status": "FINISHED",
            "episodes": 12,
            "duration": 24,
            "genres": ["Drama"],
            "averageScore": average_score,
            "meanScore": 70,
            "favourites": 10,
            "tags": [],
            "stats": { "scoreDistribution": [], "statusDistribution": [] }
        }
    })
}

pub fn list_page(lists: Value, has_next: bool) -> TransportResponse {
    data(json!({
        "MediaListCollection": { "lists": lists, "hasNextChunk": has_next }
    }))
}
