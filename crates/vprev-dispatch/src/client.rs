//! Transcode service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use vprev_models::AssetId;

use crate::error::{DispatchError, DispatchResult};

/// Configuration for the transcode client.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Base URL used for endpoint discovery
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl DispatchConfig {
    /// Create config from environment variables, defaulting the discovery
    /// base to the region-specific service URL.
    pub fn from_env(region: &str) -> Self {
        Self {
            base_url: std::env::var("TRANSCODE_SERVICE_URL")
                .unwrap_or_else(|_| format!("https://mediaconvert.{}.amazonaws.com", region)),
            timeout: Duration::from_secs(
                std::env::var("TRANSCODE_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Config pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Handle to a submitted transcode job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobHandle {
    pub id: String,
}

/// Submits asynchronous transcode jobs tagged with a correlation token.
///
/// The downstream service echoes the token back on its own completion
/// events, letting external systems join the two pipelines by asset ID.
#[async_trait]
pub trait TranscodeDispatcher: Send + Sync {
    async fn submit(
        &self,
        role: &str,
        asset_id: &AssetId,
        settings: Value,
    ) -> DispatchResult<JobHandle>;
}

#[derive(Debug, Deserialize)]
struct EndpointsResponse {
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
struct Endpoint {
    url: String,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    role: &'a str,
    #[serde(rename = "userMetadata")]
    user_metadata: UserMetadata<'a>,
    settings: Value,
}

#[derive(Debug, Serialize)]
struct UserMetadata<'a> {
    #[serde(rename = "assetID")]
    asset_id: &'a AssetId,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    job: JobHandle,
}

/// HTTP client for the external transcode service.
pub struct TranscodeClient {
    http: Client,
    config: DispatchConfig,
}

impl TranscodeClient {
    /// Create a new client.
    pub fn new(config: DispatchConfig) -> DispatchResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DispatchError::Network)?;

        Ok(Self { http, config })
    }

    /// Resolve the region-specific submission endpoint. One extra network
    /// round-trip per submission; the first advertised endpoint wins.
    async fn resolve_endpoint(&self) -> DispatchResult<String> {
        let url = format!("{}/endpoints", self.config.base_url);
        debug!("Resolving transcode endpoint via {}", url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::EndpointResolution(format!(
                "service returned {}: {}",
                status, body
            )));
        }

        let endpoints: EndpointsResponse = response.json().await?;
        endpoints
            .endpoints
            .into_iter()
            .next()
            .map(|e| e.url)
            .ok_or(DispatchError::NoEndpoints)
    }
}

#[async_trait]
impl TranscodeDispatcher for TranscodeClient {
    async fn submit(
        &self,
        role: &str,
        asset_id: &AssetId,
        settings: Value,
    ) -> DispatchResult<JobHandle> {
        let endpoint = self.resolve_endpoint().await?;
        let url = format!("{}/jobs", endpoint);

        debug!(asset_id = %asset_id, "Submitting transcode job to {}", url);

        let request = SubmitRequest {
            role,
            user_metadata: UserMetadata { asset_id },
            settings,
        };

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::SubmitFailed { status, body });
        }

        let body: SubmitResponse = response.json().await?;
        info!(asset_id = %asset_id, job_id = %body.job.id, "Transcode job submitted");
        Ok(body.job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_endpoints(server: &MockServer, submit_base: &str) {
        Mock::given(method("GET"))
            .and(path("/endpoints"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "endpoints": [{ "url": submit_base }] })),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_submit_resolves_endpoint_then_posts_job() {
        let server = MockServer::start().await;
        mock_endpoints(&server, &server.uri()).await;

        Mock::given(method("POST"))
            .and(path("/jobs"))
            .and(body_partial_json(json!({
                "role": "arn:aws:iam::123:role/transcode",
                "userMetadata": { "assetID": "asset-1" },
                "settings": { "Inputs": [{ "FileInput": "s3://incoming/clip01.mp4" }] }
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "job": { "id": "job-42" } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TranscodeClient::new(DispatchConfig::new(server.uri())).unwrap();
        let handle = client
            .submit(
                "arn:aws:iam::123:role/transcode",
                &AssetId::from_string("asset-1"),
                json!({ "Inputs": [{ "FileInput": "s3://incoming/clip01.mp4" }] }),
            )
            .await
            .unwrap();

        assert_eq!(handle.id, "job-42");
    }

    #[tokio::test]
    async fn test_empty_endpoint_list_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/endpoints"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "endpoints": [] })))
            .mount(&server)
            .await;

        let client = TranscodeClient::new(DispatchConfig::new(server.uri())).unwrap();
        let err = client
            .submit("role", &AssetId::from_string("asset-2"), json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::NoEndpoints));
    }

    #[tokio::test]
    async fn test_resolution_failure_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/endpoints"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = TranscodeClient::new(DispatchConfig::new(server.uri())).unwrap();
        let err = client
            .submit("role", &AssetId::from_string("asset-3"), json!({}))
            .await
            .unwrap_err();

        match err {
            DispatchError::EndpointResolution(msg) => assert!(msg.contains("503")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_failure_carries_status_and_body() {
        let server = MockServer::start().await;
        mock_endpoints(&server, &server.uri()).await;

        Mock::given(method("POST"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(403).set_body_string("role not assumable"))
            .mount(&server)
            .await;

        let client = TranscodeClient::new(DispatchConfig::new(server.uri())).unwrap();
        let err = client
            .submit("role", &AssetId::from_string("asset-4"), json!({}))
            .await
            .unwrap_err();

        match err {
            DispatchError::SubmitFailed { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "role not assumable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
