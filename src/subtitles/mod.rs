/*!
 * Subtitle paste parsing.
 *
 * - `timestamp`: normalizes heterogeneous time tokens to milliseconds
 * - `parser`: classifies pasted lines and infers missing end times
 * - `models`: cue records, per-line errors and the parse outcome
 */

pub mod models;
pub mod parser;
pub mod timestamp;

pub use models::{LineErrorKind, ParseOutcome, ParsedSubtitleLine, SubtitleLineError};
pub use parser::parse_subtitle_lines;
pub use timestamp::{format_timestamp_ms, parse_timestamp_ms};
