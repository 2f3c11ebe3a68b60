//! Pinecone vector index backend over the HTTP data plane.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::VectorIndex;
use crate::error::VectorStoreError;
use crate::models::{VectorRecord, VectorStoreConfig};

/// Longest response-body fragment carried in an upsert error.
const ERROR_BODY_LIMIT: usize = 500;

/// Request body for the upsert endpoint.
#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
    namespace: &'a str,
}

/// Response from the upsert endpoint. Parsed leniently: an empty or
/// unexpected body counts as zero acknowledged vectors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: u64,
}

/// Pinecone index backend.
pub struct PineconeBackend {
    client: Client,
    base_url: String,
    api_key: String,
    namespace: String,
}

impl PineconeBackend {
    /// Create a new backend for the given index host.
    ///
    /// The host comes from the Pinecone console; a bare hostname gets
    /// `https://` prepended and any trailing slash is stripped.
    pub fn new(
        config: &VectorStoreConfig,
        host: &str,
        api_key: String,
    ) -> Result<Self, VectorStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_host(host),
            api_key,
            namespace: config.namespace.clone(),
        })
    }

    /// Get the normalized base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl VectorIndex for PineconeBackend {
    async fn upsert(&self, vectors: Vec<VectorRecord>) -> Result<u64, VectorStoreError> {
        if vectors.is_empty() {
            return Ok(0);
        }

        let url = format!("{}/vectors/upsert", self.base_url);
        let request = UpsertRequest {
            vectors: &vectors,
            namespace: &self.namespace,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::UpsertError {
                status,
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let upsert_response: UpsertResponse = response.json().await.unwrap_or_default();
        Ok(upsert_response.upserted_count)
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Prepend `https://` when the host has no scheme and strip any trailing
/// slash.
fn normalize_host(host: &str) -> String {
    let trimmed = host.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

fn truncate(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_host_bare() {
        assert_eq!(
            normalize_host("my-index.svc.pinecone.io"),
            "https://my-index.svc.pinecone.io"
        );
    }

    #[test]
    fn test_normalize_host_keeps_scheme() {
        assert_eq!(
            normalize_host("http://localhost:8080"),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_host("https://my-index.svc.pinecone.io"),
            "https://my-index.svc.pinecone.io"
        );
    }

    #[test]
    fn test_normalize_host_strips_trailing_slash() {
        assert_eq!(
            normalize_host(" my-index.svc.pinecone.io/ "),
            "https://my-index.svc.pinecone.io"
        );
    }

    #[test]
    fn test_truncate_limits_chars() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("ab", 4), "ab");
    }

    #[test]
    fn test_upsert_wire_shape() {
        let vectors = vec![VectorRecord {
            id: "a".to_string(),
            values: vec![0.5],
            metadata: serde_json::Map::new(),
        }];
        let request = UpsertRequest {
            vectors: &vectors,
            namespace: "class10-science",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "vectors": [{"id": "a", "values": [0.5], "metadata": {}}],
                "namespace": "class10-science"
            })
        );
    }

    #[test]
    fn test_upsert_response_lenient_parse() {
        let response: UpsertResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.upserted_count, 0);

        let response: UpsertResponse =
            serde_json::from_value(json!({"upsertedCount": 3})).unwrap();
        assert_eq!(response.upserted_count, 3);
    }

    #[test]
    fn test_backend_creation() {
        let config = VectorStoreConfig::default();
        let backend =
            PineconeBackend::new(&config, "my-index.svc.pinecone.io", "pc-key".to_string())
                .unwrap();
        assert_eq!(backend.base_url(), "https://my-index.svc.pinecone.io");
        assert_eq!(backend.namespace(), "class10-science");
    }
}
