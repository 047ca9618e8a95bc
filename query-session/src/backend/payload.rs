//! Wire payloads of the `/search` endpoint and fail-open normalization.
//!
//! Request:  `{"query": <string>, "top_k": 5}`
//! Response: `{"results": [{"source", "text", "enriched_text"?}, ...]}`
//!
//! Anything that does not match the response shape becomes an empty result
//! list instead of an error.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::{ResultPassage, UNKNOWN_SOURCE};

/// Request body for `POST /search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub top_k: u32,
}

/// Normalizes a raw response body into passages.
pub fn passages_from_body(body: &[u8]) -> Vec<ResultPassage> {
    match serde_json::from_slice::<Value>(body) {
        Ok(json) => passages_from_json(&json),
        Err(e) => {
            warn!(error = %e, "search response is not valid JSON; treating as no results");
            Vec::new()
        }
    }
}

/// Normalizes a parsed response into passages, keeping backend order.
pub fn passages_from_json(json: &Value) -> Vec<ResultPassage> {
    let Some(items) = json.get("results").and_then(Value::as_array) else {
        warn!("search response has no `results` array; treating as no results");
        return Vec::new();
    };

    let passages: Vec<ResultPassage> = items
        .iter()
        .filter_map(|item| item.as_object().map(passage_from_object))
        .collect();

    if passages.len() != items.len() {
        warn!(
            skipped = items.len() - passages.len(),
            "skipped non-object entries in search results"
        );
    }
    passages
}

fn passage_from_object(obj: &Map<String, Value>) -> ResultPassage {
    let field = |key: &str| obj.get(key).and_then(Value::as_str);

    let source = field("source")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(UNKNOWN_SOURCE);
    let text = field("text").unwrap_or_default();
    let enriched_text = field("enriched_text")
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    ResultPassage {
        source: source.to_string(),
        text: text.to_string(),
        enriched_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(SearchRequest {
            query: "HACCP 인증 절차",
            top_k: 5,
        })
        .unwrap();
        assert_eq!(body, json!({"query": "HACCP 인증 절차", "top_k": 5}));
    }

    #[test]
    fn single_passage_without_enriched_text() {
        let out = passages_from_body(
            r#"{"results":[{"source":"Law §12","text":"abc"}]}"#.as_bytes(),
        );
        assert_eq!(out, vec![ResultPassage::new("Law §12", "abc")]);
        assert!(out[0].enriched_text.is_none());
    }

    #[test]
    fn enriched_text_is_carried() {
        let out = passages_from_json(&json!({
            "results": [{"source": "A", "text": "t", "enriched_text": "rich"}]
        }));
        assert_eq!(out[0].enriched_text.as_deref(), Some("rich"));
    }

    #[test]
    fn missing_source_gets_placeholder() {
        let out = passages_from_json(&json!({
            "results": [{"text": "t"}, {"source": "  ", "text": "u"}, {"source": 7, "text": "v"}]
        }));
        assert!(out.iter().all(|p| p.source == UNKNOWN_SOURCE));
    }

    #[test]
    fn missing_text_becomes_empty() {
        let out = passages_from_json(&json!({"results": [{"source": "A"}]}));
        assert_eq!(out[0].text, "");
    }

    #[test]
    fn malformed_shapes_fail_open() {
        assert!(passages_from_body(b"<html>oops</html>").is_empty());
        assert!(passages_from_body(b"").is_empty());
        assert!(passages_from_json(&json!({})).is_empty());
        assert!(passages_from_json(&json!({"results": "nope"})).is_empty());
        assert!(passages_from_json(&json!({"results": null})).is_empty());
        assert!(passages_from_json(&json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn non_object_entries_are_skipped_in_order() {
        let out = passages_from_json(&json!({
            "results": [{"source": "first", "text": "1"}, 42, "x", {"source": "second", "text": "2"}]
        }));
        let sources: Vec<_> = out.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, ["first", "second"]);
    }
}
