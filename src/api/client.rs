use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::IngestApi;
use super::models::{
    Episode, ImageUploadSignatureRequest, IngestSubtitleLinesResponse, SubtitleLineBulkRequest,
    ThumbnailUrlUpdate, Title, UploadSignature, VideoUploadSignatureRequest, VideoUrlUpdate,
};
use crate::app_config::ApiConfig;
use crate::errors::ApiError;

/// HTTP client for the NetPlus ingest API
#[derive(Debug, Clone)]
pub struct NetPlusClient {
    /// HTTP client for API requests
    client: Client,
    /// Backend base URL
    endpoint: String,
    /// Admin bearer token
    auth_token: String,
}

impl NetPlusClient {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, auth_token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Create a client from the `api` section of the configuration
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            config.endpoint.trim(),
            config.auth_token.trim(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Build an endpoint URL from path segments; ids are percent-encoded
    fn url_for(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ApiError::RequestFailed(format!("Invalid API endpoint '{}': {}", self.endpoint, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::RequestFailed(format!("API endpoint cannot be a base: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.url_for(segments)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url).bearer_auth(&self.auth_token))
    }

    async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method, segments)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = extract_backend_message(status, &error_text);
            error!("NetPlus API error ({}): {}", status, message);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthenticationError(message),
                _ => ApiError::ApiError {
                    status_code: status.as_u16(),
                    message,
                },
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

/// Pull a readable message out of a backend error body.
///
/// The backend wraps errors as `{"detail": {"code", "message"}}`; framework
/// errors may carry a plain string `detail` instead. Falls back to the raw
/// text, then to the status code.
pub fn extract_backend_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let detail = &json["detail"];
        if let Some(message) = detail["message"].as_str().map(str::trim).filter(|m| !m.is_empty()) {
            return match detail["code"].as_str() {
                Some(code) => format!("{}: {}", code, message),
                None => message.to_string(),
            };
        }
        if let Some(message) = detail.as_str().map(str::trim).filter(|m| !m.is_empty()) {
            return message.to_string();
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    format!("status {}", status.as_u16())
}

#[async_trait]
impl IngestApi for NetPlusClient {
    async fn ingest_subtitle_lines(
        &self,
        request: &SubtitleLineBulkRequest,
    ) -> Result<IngestSubtitleLinesResponse, ApiError> {
        self.send_json(Method::POST, &["api", "ingest", "subtitle-lines:bulk"], Some(request))
            .await
    }

    async fn issue_video_upload_signature(
        &self,
        request: &VideoUploadSignatureRequest,
    ) -> Result<UploadSignature, ApiError> {
        self.send_json(Method::POST, &["api", "ingest", "video-upload-signature"], Some(request))
            .await
    }

    async fn issue_image_upload_signature(
        &self,
        request: &ImageUploadSignatureRequest,
    ) -> Result<UploadSignature, ApiError> {
        self.send_json(Method::POST, &["api", "ingest", "image-upload-signature"], Some(request))
            .await
    }

    async fn update_episode_video_url(&self, episode_id: &str, video_url: &str) -> Result<Episode, ApiError> {
        let body = VideoUrlUpdate { video_url };
        self.send_json(Method::PATCH, &["api", "ingest", "episodes", episode_id, "video-url"], Some(&body))
            .await
    }

    async fn delete_episode_video_url(&self, episode_id: &str) -> Result<Episode, ApiError> {
        self.send_json::<(), _>(Method::DELETE, &["api", "ingest", "episodes", episode_id, "video-url"], None)
            .await
    }

    async fn update_title_thumbnail_url(&self, title_id: &str, thumbnail_url: &str) -> Result<Title, ApiError> {
        let body = ThumbnailUrlUpdate { thumbnail_url };
        self.send_json(Method::PATCH, &["api", "ingest", "titles", title_id, "thumbnail-url"], Some(&body))
            .await
    }

    async fn delete_title_thumbnail_url(&self, title_id: &str) -> Result<Title, ApiError> {
        self.send_json::<(), _>(Method::DELETE, &["api", "ingest", "titles", title_id, "thumbnail-url"], None)
            .await
    }
}
