use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::ApiConfig,
    error::{ReelcheckError, Result},
    types::{AnalysisResult, HealthStatus, UploadRequest},
};

/// Anything that can turn an upload into an analysis.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &UploadRequest) -> Result<AnalysisResult>;
}

/// HTTP client for the remote analysis service.
#[derive(Clone, Debug)]
pub struct AnalysisClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl AnalysisClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST the video and platform as multipart to `/api/analyze`.
    pub async fn analyze(&self, request: &UploadRequest) -> Result<AnalysisResult> {
        let video = &request.video;
        let bytes = tokio::fs::read(video.path()).await?;

        let part = Part::bytes(bytes)
            .file_name(video.file_name().to_string())
            .mime_str(video.media_type())?;
        let form = Form::new()
            .part("video", part)
            .text("platform", request.platform.as_str());

        let url = self.config.analyze_url();
        info!(
            %url,
            file_name = video.file_name(),
            size = video.size(),
            platform = request.platform.as_str(),
            "uploading video for analysis"
        );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.request_failed(e))?;

        if !status.is_success() {
            let detail = extract_detail(&body);
            warn!(status = status.as_u16(), ?detail, "analysis request rejected");
            return Err(ReelcheckError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let result: AnalysisResult = serde_json::from_slice(&body)?;
        debug!(overall_score = result.overall_score, "analysis received");
        Ok(result)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .http
            .get(self.config.health_url())
            .send()
            .await
            .map_err(|e| self.request_failed(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.request_failed(e))?;
        if !status.is_success() {
            return Err(ReelcheckError::Api {
                status: status.as_u16(),
                detail: extract_detail(&body),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// GET raw bytes, used for thumbnails served by URL.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_failed(e))?
            .error_for_status()?;
        let bytes = response.bytes().await.map_err(|e| self.request_failed(e))?;
        Ok(bytes.to_vec())
    }

    fn request_failed(&self, err: reqwest::Error) -> ReelcheckError {
        if err.is_timeout() {
            warn!(timeout_secs = self.config.timeout.as_secs(), "request timed out");
            ReelcheckError::Timeout(self.config.timeout)
        } else {
            warn!(error = %err, "request failed");
            ReelcheckError::ApiError(err)
        }
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, request: &UploadRequest) -> Result<AnalysisResult> {
        AnalysisClient::analyze(self, request).await
    }
}

/// Pull the human-readable `detail` out of an error body. Validation errors
/// carry a list of `{ "msg": ... }` objects instead of a string.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
