use chrono::Utc;
use log::{debug, info};
use rand::Rng;
use std::path::Path;

use super::progress::ProgressReporter;
use super::storage::StorageClient;
use crate::api::UploadSignature;
use crate::errors::UploadError;
use crate::file_utils::FileManager;

// @module: Sequential chunked upload to signed storage

/// A half-open byte range `[start, end)` of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// `Content-Range` header value; the header's end offset is inclusive
    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end - 1, total)
    }
}

/// Split `total` bytes into consecutive ranges of at most `chunk_size` bytes
pub fn plan_chunks(total: u64, chunk_size: u64) -> Vec<ByteRange> {
    let chunk_size = chunk_size.max(1);
    let mut ranges = Vec::with_capacity(total.div_ceil(chunk_size) as usize);
    let mut start = 0;
    while start < total {
        let end = (start + chunk_size).min(total);
        ranges.push(ByteRange { start, end });
        start = end;
    }
    ranges
}

/// `sent / total * 100`, rounded half up
pub fn progress_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (sent as u128 * 200 + total as u128) / (total as u128 * 2);
    percent.min(100) as u8
}

/// Identifier that lets storage reassemble the ranges of one upload:
/// unix millis, a dash, then 8 random lowercase alphanumerics
pub fn new_upload_id() -> String {
    const CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..8)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Uploads large files to signed storage one range at a time.
///
/// Ranges are sent strictly in order with one request in flight. The first
/// rejected range aborts the whole upload; nothing is retried or resumed.
#[derive(Debug, Clone)]
pub struct ChunkedUploader {
    storage: StorageClient,
    chunk_size: u64,
}

impl ChunkedUploader {
    pub fn new(storage: StorageClient, chunk_size: u64) -> Self {
        Self {
            storage,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Upload `path` and return the last non-empty `secure_url` the provider sent.
    ///
    /// Progress is reported after every accepted range. If every range is
    /// accepted but no URL ever came back the upload fails with
    /// `UploadError::MissingSecureUrl`.
    pub async fn upload(
        &self,
        path: &Path,
        signature: &UploadSignature,
        label: &str,
        progress: &dyn ProgressReporter,
    ) -> Result<String, UploadError> {
        let file_name = FileManager::file_name(path);
        let mut file = tokio::fs::File::open(path).await?;
        let total = file.metadata().await?.len();

        let ranges = plan_chunks(total, self.chunk_size);
        let upload_id = new_upload_id();
        info!(
            "Uploading {} ({} bytes) in {} chunk(s), upload id {}",
            file_name,
            total,
            ranges.len(),
            upload_id
        );

        progress.on_start(total);
        let mut secure_url: Option<String> = None;

        for (index, range) in ranges.iter().enumerate() {
            let data = FileManager::read_range(&mut file, range.start, range.len()).await?;
            let headers = [
                ("X-Unique-Upload-Id", upload_id.clone()),
                ("Content-Range", range.content_range(total)),
            ];

            let response = self
                .storage
                .post(signature, data, &file_name, &headers, label)
                .await?;
            if let Some(url) = response.secure_url() {
                secure_url = Some(url);
            }

            let percent = progress_percent(range.end, total);
            debug!("Chunk {}/{} accepted ({}%)", index + 1, ranges.len(), percent);
            progress.on_progress(percent, range.end);
        }

        progress.on_finish();
        secure_url.ok_or_else(|| UploadError::MissingSecureUrl(label.to_string()))
    }
}
