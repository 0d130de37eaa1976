use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a POST to the GraphQL endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Map<String, Value>,
}

/// Envelope of every GraphQL response.
///
/// `data` is absent or null when the server rejected the query; the caller
/// treats that as a structural failure.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub status: Option<u16>,
}
