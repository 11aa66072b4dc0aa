use serde::{Deserialize, Serialize};

use crate::subtitles::ParsedSubtitleLine;

// @module: Wire models for the NetPlus ingest API

/// One subtitle line in a bulk ingest request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleLineCreate {
    pub episode_id: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_text: Option<String>,
}

impl SubtitleLineCreate {
    /// Attach a parsed cue to an episode
    pub fn from_parsed(episode_id: &str, line: &ParsedSubtitleLine) -> Self {
        Self {
            episode_id: episode_id.to_string(),
            start_ms: line.start_ms,
            end_ms: line.end_ms,
            text: line.text.clone(),
            speaker_text: line.speaker_text.clone(),
        }
    }
}

/// Body of `POST /api/ingest/subtitle-lines:bulk`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleLineBulkRequest {
    pub lines: Vec<SubtitleLineCreate>,
}

impl SubtitleLineBulkRequest {
    pub fn for_episode(episode_id: &str, lines: &[ParsedSubtitleLine]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|line| SubtitleLineCreate::from_parsed(episode_id, line))
                .collect(),
        }
    }
}

/// Result of a bulk subtitle ingest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSubtitleLinesResponse {
    pub inserted_count: u64,
    pub queued_embedding_jobs: u64,
}

/// Body of `POST /api/ingest/video-upload-signature`
#[derive(Debug, Clone, Serialize)]
pub struct VideoUploadSignatureRequest {
    pub episode_id: String,
    pub filename: String,
}

/// Body of `POST /api/ingest/image-upload-signature`
#[derive(Debug, Clone, Serialize)]
pub struct ImageUploadSignatureRequest {
    pub title_id: String,
    pub filename: String,
}

/// A signed, time-boxed credential for uploading straight to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSignature {
    /// Storage endpoint that receives the multipart POST
    pub upload_url: String,
    pub api_key: String,
    pub timestamp: String,
    pub folder: String,
    pub public_id: String,
    pub signature: String,
}

impl UploadSignature {
    /// Form fields that must accompany every upload request
    pub fn form_fields(&self) -> [(&'static str, String); 5] {
        [
            ("api_key", self.api_key.clone()),
            ("timestamp", self.timestamp.clone()),
            ("folder", self.folder.clone()),
            ("public_id", self.public_id.clone()),
            ("signature", self.signature.clone()),
        ]
    }
}

/// Episode record as returned by the link-back endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title_id: String,
    pub season: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Title record as returned by the link-back endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VideoUrlUpdate<'a> {
    pub video_url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThumbnailUrlUpdate<'a> {
    pub thumbnail_url: &'a str,
}
