/*!
 * Mock NetPlus API for controller tests
 *
 * Implements `IngestApi` without any network access and records every call
 * so tests can assert on what the controller sent.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use netplus_ingest::api::{
    Episode, ImageUploadSignatureRequest, IngestApi, IngestSubtitleLinesResponse, SubtitleLineBulkRequest,
    Title, UploadSignature, VideoUploadSignatureRequest,
};
use netplus_ingest::errors::ApiError;

use super::sample_signature;

/// Tracks calls made against the mock
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Names of the operations called, in order
    pub calls: Vec<String>,
    /// Bulk subtitle requests received
    pub bulk_requests: Vec<SubtitleLineBulkRequest>,
    /// `(episode_id, video_url)` links received
    pub video_links: Vec<(String, String)>,
    /// `(title_id, thumbnail_url)` links received
    pub thumbnail_links: Vec<(String, String)>,
    /// Should the next call fail
    pub should_fail: bool,
}

/// Mock implementation of the ingest API
#[derive(Debug)]
pub struct MockIngestApi {
    tracker: Arc<Mutex<ApiCallTracker>>,
    upload_url: String,
}

impl MockIngestApi {
    /// Create a mock whose signatures point at `upload_url`
    pub fn new(upload_url: &str) -> Self {
        MockIngestApi {
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            upload_url: upload_url.to_string(),
        }
    }

    /// Get the API call tracker
    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }

    /// Configure the mock to fail on the next call
    pub fn fail_next_call(&self) {
        self.tracker.lock().unwrap().should_fail = true;
    }

    fn record(&self, call: &str) -> Result<(), ApiError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.calls.push(call.to_string());
        if tracker.should_fail {
            tracker.should_fail = false;
            return Err(ApiError::ApiError {
                status_code: 500,
                message: "INTERNAL_ERROR: Unexpected error.".to_string(),
            });
        }
        Ok(())
    }

    fn episode(episode_id: &str, video_url: Option<String>) -> Episode {
        Episode {
            id: episode_id.to_string(),
            title_id: "title-demo-1".to_string(),
            season: 1,
            episode_number: 1,
            name: Some("The Missing Statement".to_string()),
            duration_ms: Some(3_600_000),
            video_url,
        }
    }

    fn title(title_id: &str, thumbnail_url: Option<String>) -> Title {
        Title {
            id: title_id.to_string(),
            name: "Night Detective".to_string(),
            description: None,
            thumbnail_url,
            created_at: None,
        }
    }
}

#[async_trait]
impl IngestApi for MockIngestApi {
    async fn ingest_subtitle_lines(
        &self,
        request: &SubtitleLineBulkRequest,
    ) -> Result<IngestSubtitleLinesResponse, ApiError> {
        self.record("ingest_subtitle_lines")?;
        self.tracker.lock().unwrap().bulk_requests.push(request.clone());
        Ok(IngestSubtitleLinesResponse {
            inserted_count: request.lines.len() as u64,
            queued_embedding_jobs: 1,
        })
    }

    async fn issue_video_upload_signature(
        &self,
        _request: &VideoUploadSignatureRequest,
    ) -> Result<UploadSignature, ApiError> {
        self.record("issue_video_upload_signature")?;
        Ok(sample_signature(&self.upload_url))
    }

    async fn issue_image_upload_signature(
        &self,
        _request: &ImageUploadSignatureRequest,
    ) -> Result<UploadSignature, ApiError> {
        self.record("issue_image_upload_signature")?;
        Ok(sample_signature(&self.upload_url))
    }

    async fn update_episode_video_url(&self, episode_id: &str, video_url: &str) -> Result<Episode, ApiError> {
        self.record("update_episode_video_url")?;
        self.tracker
            .lock()
            .unwrap()
            .video_links
            .push((episode_id.to_string(), video_url.to_string()));
        Ok(Self::episode(episode_id, Some(video_url.to_string())))
    }

    async fn delete_episode_video_url(&self, episode_id: &str) -> Result<Episode, ApiError> {
        self.record("delete_episode_video_url")?;
        Ok(Self::episode(episode_id, None))
    }

    async fn update_title_thumbnail_url(&self, title_id: &str, thumbnail_url: &str) -> Result<Title, ApiError> {
        self.record("update_title_thumbnail_url")?;
        self.tracker
            .lock()
            .unwrap()
            .thumbnail_links
            .push((title_id.to_string(), thumbnail_url.to_string()));
        Ok(Self::title(title_id, Some(thumbnail_url.to_string())))
    }

    async fn delete_title_thumbnail_url(&self, title_id: &str) -> Result<Title, ApiError> {
        self.record("delete_title_thumbnail_url")?;
        Ok(Self::title(title_id, None))
    }
}
