use crate::exporter::{Exporter, ScrapeSummary};
use crate::server::guards::auth::ScrapeKey;
use crate::server::routes::metrics::{healthz, metrics};

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn incoming_request_id(req: &Request) -> String {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let mut bytes = [0u8; 12];
            rand::rng().fill_bytes(&mut bytes);
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
        })
}

#[derive(Clone)]
pub struct AlpeState {
    pub exporter: Arc<Exporter>,
    pub access_key: Arc<str>,
    pub require_authentication: bool,
}

impl AlpeState {
    pub fn new(exporter: Arc<Exporter>, access_key: Arc<str>, require_authentication: bool) -> Self {
        Self {
            exporter,
            access_key,
            require_authentication,
        }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// One log line per request. Successful scrapes also report the size of the
/// document and whether the snapshot came from the cache.
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = incoming_request_id(&req);
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    match resp.extensions().get::<ScrapeSummary>() {
        Some(scrape) => info!(
            status,
            %request_id,
            latency_ms,
            groups = scrape.groups,
            points = scrape.points,
            cached = scrape.cached,
            %user_agent,
            "scrape served"
        ),
        None if resp.status().is_client_error() || resp.status().is_server_error() => warn!(
            status,
            %request_id,
            %method,
            %path,
            latency_ms,
            %user_agent,
            "request failed"
        ),
        None => info!(status, %request_id, %method, %path, latency_ms, "request served"),
    }

    resp
}

pub fn alpe_router(state: AlpeState) -> Router {
    let mut scrape = Router::new().route("/metrics", get(metrics));
    if state.require_authentication {
        scrape = scrape.layer(middleware::from_extractor_with_state::<ScrapeKey, _>(
            state.clone(),
        ));
    }

    Router::new()
        .merge(scrape)
        .route("/healthz", get(healthz))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
