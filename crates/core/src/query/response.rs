use serde::Serialize;

use crate::storage::Item;

pub const MISSING_KEY_MESSAGE: &str = "No query string";

/// Payload returned by the query handler.
///
/// Serializes either as the bare list of items or as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Items(Vec<Item>),
    Error { error: String },
}

impl QueryResponse {
    /// The response for a request without a usable key.
    pub fn missing_key() -> Self {
        QueryResponse::Error {
            error: MISSING_KEY_MESSAGE.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryResponse::Error { .. })
    }
}
