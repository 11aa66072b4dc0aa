/*!
 * # NetPlus Ingest
 *
 * Content-ingestion tooling for the NetPlus streaming service.
 *
 * ## Features
 *
 * - Parse subtitles pasted in mixed formats:
 *   - delimited `start|end|[speaker|]text` cues with explicit times
 *   - parenthetical `(time) [speaker:] text` cues whose end times are inferred
 *   - continuation lines and stray markup
 * - Bulk-ingest parsed subtitle lines for an episode
 * - Upload episode videos to signed storage in 20 MiB chunks with progress
 * - Upload title thumbnails in a single request
 * - Link and unlink uploaded media on episodes and titles
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitles`: Timestamp normalization and subtitle line parsing
 * - `api`: NetPlus ingest API models and HTTP client
 * - `upload`: Signed storage uploads (chunked and single-shot)
 * - `app_controller`: The admin ingest actions
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitles;
pub mod api;
pub mod upload;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use subtitles::{parse_subtitle_lines, parse_timestamp_ms, ParseOutcome, ParsedSubtitleLine};
pub use api::{IngestApi, NetPlusClient};
pub use upload::{ChunkedUploader, ProgressReporter};
pub use errors::{ApiError, AppError, SubtitleError, UploadError};
