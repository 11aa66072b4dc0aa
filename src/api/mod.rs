/*!
 * Client side of the NetPlus ingest API.
 *
 * The admin actions only need a handful of backend endpoints: bulk subtitle
 * ingest, upload signature issuance and the link-back calls that attach or
 * remove media URLs. They are expressed as the `IngestApi` trait so the
 * controller can be driven by the real HTTP client or by a test double.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ApiError;

pub mod client;
pub mod models;

pub use client::NetPlusClient;
pub use models::{
    Episode, ImageUploadSignatureRequest, IngestSubtitleLinesResponse, SubtitleLineBulkRequest,
    SubtitleLineCreate, Title, UploadSignature, VideoUploadSignatureRequest,
};

/// Backend operations used by the ingest controller
#[async_trait]
pub trait IngestApi: Send + Sync + Debug {
    /// Insert a batch of subtitle lines for one or more episodes
    async fn ingest_subtitle_lines(
        &self,
        request: &SubtitleLineBulkRequest,
    ) -> Result<IngestSubtitleLinesResponse, ApiError>;

    /// Get a signed credential for uploading an episode video
    async fn issue_video_upload_signature(
        &self,
        request: &VideoUploadSignatureRequest,
    ) -> Result<UploadSignature, ApiError>;

    /// Get a signed credential for uploading a title thumbnail
    async fn issue_image_upload_signature(
        &self,
        request: &ImageUploadSignatureRequest,
    ) -> Result<UploadSignature, ApiError>;

    /// Attach an uploaded video URL to an episode
    async fn update_episode_video_url(&self, episode_id: &str, video_url: &str) -> Result<Episode, ApiError>;

    /// Remove the video URL from an episode
    async fn delete_episode_video_url(&self, episode_id: &str) -> Result<Episode, ApiError>;

    /// Attach an uploaded thumbnail URL to a title
    async fn update_title_thumbnail_url(&self, title_id: &str, thumbnail_url: &str) -> Result<Title, ApiError>;

    /// Remove the thumbnail URL from a title
    async fn delete_title_thumbnail_url(&self, title_id: &str) -> Result<Title, ApiError>;
}
