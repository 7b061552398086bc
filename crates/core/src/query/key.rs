use serde_json::Value;

/// JSON pointer to the key inside an API gateway mapping-template event.
const EVENT_KEY_POINTER: &str = "/params/path/val";

/// A non-empty `date` key to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryKey(String);

impl QueryKey {
    /// Accepts a raw key, rejecting missing and blank values.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Self(key.to_string()))
    }

    /// Extracts the key from `params.path.val` of an inbound event.
    ///
    /// Missing levels and non-string values count as a missing key.
    pub fn from_event(event: &Value) -> Option<Self> {
        Self::parse(event.pointer(EVENT_KEY_POINTER).and_then(Value::as_str))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_accepts_key() {
        let key = QueryKey::parse(Some("2020-01-02")).unwrap();
        assert_eq!(key.as_str(), "2020-01-02");
    }

    #[test]
    fn test_parse_rejects_missing_and_blank() {
        assert_eq!(QueryKey::parse(None), None);
        assert_eq!(QueryKey::parse(Some("")), None);
        assert_eq!(QueryKey::parse(Some("   ")), None);
    }

    #[test]
    fn test_from_event_reads_path_param() {
        let event = json!({"params": {"path": {"val": "2020-01-02"}, "querystring": {}}});
        assert_eq!(
            QueryKey::from_event(&event).map(|k| k.as_str().to_string()),
            Some("2020-01-02".to_string())
        );
    }

    #[test]
    fn test_from_event_missing_levels() {
        assert_eq!(QueryKey::from_event(&json!({})), None);
        assert_eq!(QueryKey::from_event(&json!({"params": {}})), None);
        assert_eq!(QueryKey::from_event(&json!({"params": {"path": {}}})), None);
        assert_eq!(
            QueryKey::from_event(&json!({"params": {"path": {"val": ""}}})),
            None
        );
    }

    #[test]
    fn test_from_event_non_string_value() {
        let event = json!({"params": {"path": {"val": 20200102}}});
        assert_eq!(QueryKey::from_event(&event), None);
    }
}
