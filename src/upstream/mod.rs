//! Upstream abstraction layer for the gateway.
//!
//! Defines the [`UpstreamClient`] trait and [`ForwardResult`] type the
//! request handlers depend on, plus the local fallback synthesis used when
//! the backend cannot answer. The shipped provider is
//! [`http::HttpUpstreamClient`]; tests substitute fakes at the same seam.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata note attached to a synthesized fallback result.
pub const FALLBACK_NOTE: &str = "Backend not reachable; returned mock response.";

/// Result of forwarding a city to the normalization backend — either the
/// backend's real answer or a locally synthesized stand-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardResult {
    pub normalized_city: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

/// Provider-agnostic forwarding interface.
///
/// Implementations are expected to absorb upstream faults and answer with a
/// synthesized [`ForwardResult`] instead; the `Err` arm exists only as a
/// defensive seam, which the handler maps to a 502.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Forward a validated (trimmed, non-empty) city to the backend.
    async fn forward(&self, city: &str, source: Option<&str>) -> anyhow::Result<ForwardResult>;
}

/// Title-case a city name: first letter of each whitespace-delimited word
/// uppercased, the rest lowercased. Whitespace between words is preserved.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Synthesize the stand-in result served when the backend is unreachable or
/// returns something unusable.
pub fn fallback_result(city: &str) -> ForwardResult {
    let mut metadata = serde_json::Map::new();
    metadata.insert("note".to_string(), Value::String(FALLBACK_NOTE.to_string()));

    ForwardResult {
        normalized_city: title_case(city.trim()),
        status: "ok".to_string(),
        metadata: Some(metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_basic() {
        assert_eq!(title_case("tokyo"), "Tokyo");
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("SAN FRANCISCO"), "San Francisco");
    }

    #[test]
    fn title_case_preserves_inner_whitespace() {
        assert_eq!(title_case("rio  de janeiro"), "Rio  De Janeiro");
    }

    #[test]
    fn title_case_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn fallback_trims_and_titles() {
        let result = fallback_result("  tokyo ");
        assert_eq!(result.normalized_city, "Tokyo");
        assert_eq!(result.status, "ok");
        let note = result.metadata.unwrap()["note"].clone();
        assert_eq!(note, serde_json::json!(FALLBACK_NOTE));
    }

    #[test]
    fn forward_result_omits_absent_metadata() {
        let result = ForwardResult {
            normalized_city: "Paris".to_string(),
            status: "ok".to_string(),
            metadata: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("metadata").is_none());
    }
}
