/*!
 * Common test utilities for the netplus-ingest test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use anyhow::Result;
use tempfile::TempDir;

use netplus_ingest::api::UploadSignature;
use netplus_ingest::upload::ProgressReporter;

// Re-export the mock API module
pub mod mock_api;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a file of `size` ASCII bytes, so multipart bodies stay valid UTF-8
pub fn create_sized_file(dir: &Path, filename: &str, size: usize) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, vec![b'x'; size])?;
    Ok(file_path)
}

/// A subtitle paste mixing every accepted shape
pub fn sample_subtitle_paste() -> &'static str {
    "0|2500|Hello\n\
     2500|4000|A|World\n\
     <p class=\"caption\">\n\
     (0:05) Han: Where were you\n\
     last night?\n\
     (0:09) Nowhere."
}

/// A signature pointing at the given storage URL
pub fn sample_signature(upload_url: &str) -> UploadSignature {
    UploadSignature {
        upload_url: upload_url.to_string(),
        api_key: "key-123".to_string(),
        timestamp: "1700000000".to_string(),
        folder: "netplus".to_string(),
        public_id: "episode-ep-1-pilot".to_string(),
        signature: "sig-abc".to_string(),
    }
}

/// Records every progress value it is given
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub started_with: Mutex<Option<u64>>,
    pub percents: Mutex<Vec<u8>>,
    pub finished: Mutex<bool>,
}

impl RecordingProgress {
    pub fn percents(&self) -> Vec<u8> {
        self.percents.lock().unwrap().clone()
    }

    pub fn is_finished(&self) -> bool {
        *self.finished.lock().unwrap()
    }
}

impl ProgressReporter for RecordingProgress {
    fn on_start(&self, total_bytes: u64) {
        *self.started_with.lock().unwrap() = Some(total_bytes);
    }

    fn on_progress(&self, percent: u8, _bytes_sent: u64) {
        self.percents.lock().unwrap().push(percent);
    }

    fn on_finish(&self) {
        *self.finished.lock().unwrap() = true;
    }
}
