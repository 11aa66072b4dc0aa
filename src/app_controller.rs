use log::{info, warn};
use std::path::Path;
use std::time::Duration;

use crate::api::{
    Episode, ImageUploadSignatureRequest, IngestApi, IngestSubtitleLinesResponse, NetPlusClient,
    SubtitleLineBulkRequest, Title, VideoUploadSignatureRequest,
};
use crate::app_config::Config;
use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;
use crate::subtitles::{parse_subtitle_lines, ParseOutcome};
use crate::upload::{ChunkedUploader, ProgressReporter, StorageClient};

// @module: Admin ingest actions

const VIDEO_LABEL: &str = "Video";
const THUMBNAIL_LABEL: &str = "Thumbnail";

/// Runs the admin ingest actions against an injected API and configuration
pub struct Controller<A: IngestApi> {
    // @field: App configuration
    config: Config,
    // @field: Backend API
    api: A,
    // @field: Storage client for single-shot uploads
    storage: StorageClient,
    // @field: Chunked uploader for videos
    uploader: ChunkedUploader,
}

impl Controller<NetPlusClient> {
    // @method: Create a controller talking to the configured NetPlus backend
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let api = NetPlusClient::from_config(&config.api);
        Ok(Self::with_api(config, api))
    }
}

impl<A: IngestApi> Controller<A> {
    /// Create a controller with an explicit API implementation
    pub fn with_api(config: Config, api: A) -> Self {
        let storage = StorageClient::new(Duration::from_secs(config.api.timeout_secs));
        let uploader = ChunkedUploader::new(storage.clone(), config.upload.chunk_size_bytes);
        Self {
            config,
            api,
            storage,
            uploader,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Parse pasted subtitles without sending anything
    pub fn preview_subtitles(&self, input: &str) -> ParseOutcome {
        parse_subtitle_lines(input)
    }

    /// Parse pasted subtitles and bulk-ingest them for one episode.
    ///
    /// Any rejected line stops the whole batch before the API is called;
    /// partial ingests never happen.
    pub async fn ingest_subtitles(
        &self,
        episode_id: &str,
        input: &str,
    ) -> Result<IngestSubtitleLinesResponse, AppError> {
        require_id(episode_id, "Select an episode first.")?;

        let outcome = parse_subtitle_lines(input);
        if !outcome.is_clean() {
            warn!("Rejected subtitle paste: {} line(s) failed to parse", outcome.errors.len());
            let summary = outcome.error_summary(self.config.ingest.max_reported_errors);
            return Err(SubtitleError::InvalidLines(summary).into());
        }
        if outcome.lines.is_empty() {
            return Err(SubtitleError::NothingToUpload.into());
        }

        let request = SubtitleLineBulkRequest::for_episode(episode_id, &outcome.lines);
        let response = self.api.ingest_subtitle_lines(&request).await?;
        info!(
            "Subtitles uploaded: {} lines ({} embedding jobs queued)",
            response.inserted_count, response.queued_embedding_jobs
        );
        Ok(response)
    }

    /// Upload a video in chunks and link it to the episode; returns the linked URL
    pub async fn upload_video(
        &self,
        episode_id: &str,
        path: &Path,
        progress: &dyn ProgressReporter,
    ) -> Result<String, AppError> {
        require_id(episode_id, "Select an episode first.")?;
        require_file(path, "Select a video file first.")?;

        let signature = self
            .api
            .issue_video_upload_signature(&VideoUploadSignatureRequest {
                episode_id: episode_id.to_string(),
                filename: FileManager::file_name(path),
            })
            .await?;

        let secure_url = self.uploader.upload(path, &signature, VIDEO_LABEL, progress).await?;
        self.api.update_episode_video_url(episode_id, &secure_url).await?;

        info!("Video uploaded and linked: {}", secure_url);
        Ok(secure_url)
    }

    /// Upload a thumbnail in one request and link it to the title; returns the linked URL
    pub async fn upload_thumbnail(&self, title_id: &str, path: &Path) -> Result<String, AppError> {
        require_id(title_id, "Select a title first.")?;
        require_file(path, "Select an image file first.")?;

        let signature = self
            .api
            .issue_image_upload_signature(&ImageUploadSignatureRequest {
                title_id: title_id.to_string(),
                filename: FileManager::file_name(path),
            })
            .await?;

        let secure_url = self
            .storage
            .upload_whole_file(path, &signature, THUMBNAIL_LABEL)
            .await?;
        self.api.update_title_thumbnail_url(title_id, &secure_url).await?;

        info!("Thumbnail uploaded and linked: {}", secure_url);
        Ok(secure_url)
    }

    /// Remove the video link from an episode
    pub async fn unlink_video(&self, episode_id: &str) -> Result<Episode, AppError> {
        require_id(episode_id, "Select an episode first.")?;
        let episode = self.api.delete_episode_video_url(episode_id).await?;
        info!("Video link removed from episode {}", episode.id);
        Ok(episode)
    }

    /// Remove the thumbnail link from a title
    pub async fn unlink_thumbnail(&self, title_id: &str) -> Result<Title, AppError> {
        require_id(title_id, "Select a title first.")?;
        let title = self.api.delete_title_thumbnail_url(title_id).await?;
        info!("Thumbnail removed from title {}", title.name);
        Ok(title)
    }
}

fn require_id(id: &str, message: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::InvalidInput(message.to_string()));
    }
    Ok(())
}

fn require_file(path: &Path, message: &str) -> Result<(), AppError> {
    if !FileManager::file_exists(path) {
        return Err(AppError::InvalidInput(format!("{} ({} not found)", message, path.display())));
    }
    Ok(())
}
