/*!
 * Media upload to signed third-party storage.
 *
 * - `chunked`: splits large videos into 20 MiB ranges and sends them in order
 * - `storage`: the single signed multipart POST both upload paths share
 * - `progress`: progress reporting after each accepted chunk
 */

pub mod chunked;
pub mod progress;
pub mod storage;

pub use chunked::{plan_chunks, progress_percent, ByteRange, ChunkedUploader};
pub use progress::{ConsoleProgress, NoProgress, ProgressReporter};
pub use storage::{extract_storage_message, StorageClient, StorageUploadResponse};
