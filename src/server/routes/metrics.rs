use alpe_exposition::CONTENT_TYPE as EXPOSITION_CONTENT_TYPE;
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use crate::error::AlpeError;
use crate::server::router::AlpeState;

pub async fn metrics(State(state): State<AlpeState>) -> Result<Response, AlpeError> {
    let scrape = state.exporter.render().await?;
    let mut resp = ([(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], scrape.body).into_response();
    resp.extensions_mut().insert(scrape.summary);
    Ok(resp)
}

pub async fn healthz() -> &'static str {
    "ok"
}
