//! HTTP upstream provider — forwards submissions to the backend REST API.
//!
//! Carries the gateway's degrade-to-mock policy: a connect error, timeout,
//! non-2xx status, or malformed body all yield a locally synthesized
//! [`ForwardResult`] rather than an error, so the gateway stays usable
//! without the backend running.

use super::{fallback_result, title_case, ForwardResult, UpstreamClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Processing endpoint joined onto the configured backend base URL.
pub const UPSTREAM_PROCESS_PATH: &str = "/api/city/process";

/// Forwards city submissions to the normalization backend over HTTP.
pub struct HttpUpstreamClient {
    base_url: String,
    timeout: Duration,
}

/// Wire shape of a backend reply. Every field is optional; absent values are
/// filled in from the submitted city.
#[derive(Debug, Deserialize)]
struct UpstreamReply {
    normalized_city: Option<String>,
    status: Option<String>,
    metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl HttpUpstreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// One outbound attempt, no retries. The HTTP client lives only for the
    /// duration of the call and is dropped on both paths.
    async fn try_forward(&self, city: &str, source: Option<&str>) -> anyhow::Result<UpstreamReply> {
        let url = format!("{}{UPSTREAM_PROCESS_PATH}", self.base_url);

        let mut body = json!({ "city": city });
        if let Some(source) = source {
            body["source"] = json!(source);
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Backend request failed: {e}"))?;

        let status = resp.status();
        anyhow::ensure!(status.is_success(), "Backend returned {status}");

        let reply: UpstreamReply = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse backend response: {e}"))?;
        Ok(reply)
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn forward(&self, city: &str, source: Option<&str>) -> anyhow::Result<ForwardResult> {
        match self.try_forward(city, source).await {
            Ok(reply) => Ok(ForwardResult {
                // An empty normalized_city is as unusable as an absent one.
                normalized_city: reply
                    .normalized_city
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| title_case(city.trim())),
                status: reply.status.unwrap_or_else(|| "ok".to_string()),
                metadata: reply.metadata,
            }),
            Err(e) => {
                tracing::warn!("Backend unavailable, serving mock result: {e}");
                Ok(fallback_result(city))
            }
        }
    }
}
