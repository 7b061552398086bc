//! Output formatting functions.

/// Format a value as JSON, indented when `pretty` is set.
pub fn format_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compact_output() {
        let value = json!([{"date": "2020-01-02"}]);
        assert_eq!(format_json(&value, false).unwrap(), r#"[{"date":"2020-01-02"}]"#);
    }

    #[test]
    fn test_pretty_output() {
        let value = json!({"error": "No query string"});
        assert_eq!(
            format_json(&value, true).unwrap(),
            "{\n  \"error\": \"No query string\"\n}"
        );
    }
}
