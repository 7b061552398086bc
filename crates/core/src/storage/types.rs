/// A stored item as returned by a query, keyed by attribute name.
///
/// Rendered as a JSON object so the query handler can return it verbatim.
pub type Item = serde_json::Map<String, serde_json::Value>;

/// Upper bound on put requests in a single batch write.
pub const MAX_BATCH_SIZE: usize = 25;
