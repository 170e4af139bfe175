//! Content classification for object previews.
//!
//! Object bodies are decoded as UTF-8 and sorted into one of three shapes:
//! a JSON array, any other JSON value, or plain text.

use serde_json::Value;

use crate::types::{StoreError, StoreResult};

/// What an object's body turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A JSON array; `sample` is its first element.
    JsonArray { count: usize, sample: Option<Value> },
    /// A JSON document that is not an array.
    JsonValue(Value),
    /// Anything that does not parse as one JSON document, kept verbatim.
    Text(String),
}

impl Content {
    pub fn structure(&self) -> &'static str {
        match self {
            Content::JsonArray { .. } => "JSON Array",
            Content::JsonValue(Value::Object(_)) => "JSON Object",
            Content::JsonValue(_) => "JSON Value",
            Content::Text(_) => "Text",
        }
    }

    /// Number of records for the JSON shapes. A single non-array document counts as one.
    pub fn record_count(&self) -> Option<usize> {
        match self {
            Content::JsonArray { count, .. } => Some(*count),
            Content::JsonValue(_) => Some(1),
            Content::Text(_) => None,
        }
    }

    pub fn is_json(&self) -> bool {
        !matches!(self, Content::Text(_))
    }
}

/// Decode `body` and classify it. Only invalid UTF-8 is an error.
pub fn classify(key: &str, body: &[u8]) -> StoreResult<Content> {
    let text = std::str::from_utf8(body).map_err(|source| StoreError::Decode {
        key: key.to_string(),
        source,
    })?;

    Ok(classify_text(text))
}

pub fn classify_text(text: &str) -> Content {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Content::JsonArray {
            count: items.len(),
            sample: items.into_iter().next(),
        },
        Ok(value) => Content::JsonValue(value),
        Err(_) => Content::Text(text.to_string()),
    }
}

/// Two-space indented JSON, keys in document order.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_reports_count_and_first_element() {
        let content = classify("a.json", br#"[{"id":1},{"id":2},{"id":3}]"#).unwrap();

        assert_eq!(
            content,
            Content::JsonArray {
                count: 3,
                sample: Some(json!({"id": 1})),
            }
        );
        assert_eq!(content.structure(), "JSON Array");
        assert_eq!(content.record_count(), Some(3));
    }

    #[test]
    fn test_empty_array_has_no_sample() {
        let content = classify_text("[]");
        assert_eq!(content, Content::JsonArray { count: 0, sample: None });
    }

    #[test]
    fn test_object_passthrough() {
        let content = classify_text(r#"{"id":1}"#);
        assert_eq!(content, Content::JsonValue(json!({"id": 1})));
        assert_eq!(content.structure(), "JSON Object");
        assert_eq!(content.record_count(), Some(1));
    }

    #[test]
    fn test_scalar_is_json_value() {
        assert_eq!(classify_text("42").structure(), "JSON Value");
        assert_eq!(classify_text("\"quoted\"").structure(), "JSON Value");
    }

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        let content = classify_text("hello world");
        assert_eq!(content, Content::Text("hello world".to_string()));
        assert!(!content.is_json());
        assert_eq!(content.record_count(), None);
    }

    #[test]
    fn test_newline_delimited_documents_are_text() {
        let text = "{\"user_id\":\"u1\"}\n{\"user_id\":\"u2\"}\n";
        assert_eq!(classify_text(text), Content::Text(text.to_string()));

        let content = classify_text("1\n2\n");
        assert_eq!(content, Content::Text("1\n2\n".to_string()));
        assert!(!content.is_json());
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let err = classify("blob.bin", &[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref key, .. } if key == "blob.bin"));
        assert_eq!(err.kind(), "decode");
    }

    #[test]
    fn test_pretty_keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"zeta":1,"alpha":{"b":2,"a":3}}"#).unwrap();
        assert_eq!(
            pretty(&value),
            "{\n  \"zeta\": 1,\n  \"alpha\": {\n    \"b\": 2,\n    \"a\": 3\n  }\n}"
        );
    }
}
