use serde::Serialize;
use std::fmt;

// @module: Subtitle cue records produced by the line parser

/// One fully timed subtitle cue, ready for bulk ingest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSubtitleLine {
    /// Start time in ms
    pub start_ms: u64,

    /// End time in ms, never before `start_ms`
    pub end_ms: u64,

    /// Speaker label, when the cue named one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_text: Option<String>,

    /// Cue text, never empty
    pub text: String,
}

impl ParsedSubtitleLine {
    /// Duration of the cue in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// A cue that only carries a start time; its end is inferred from its successor
#[derive(Debug, Clone)]
pub(crate) struct RawSubtitlePoint {
    pub start_ms: u64,
    pub speaker_text: Option<String>,
    pub text: String,
}

/// Why a pasted line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineErrorKind {
    /// Delimited line with an unparsable start/end or end before start
    InvalidTimeRange,
    /// Parenthetical line with an unparsable time
    InvalidTimestamp,
    /// Line parsed but carried no text
    MissingText,
    /// Line matched none of the accepted shapes
    UnsupportedFormat,
}

impl LineErrorKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::InvalidTimeRange => "invalid time range",
            Self::InvalidTimestamp => "invalid timestamp",
            Self::MissingText => "missing subtitle text",
            Self::UnsupportedFormat => "unsupported format",
        }
    }
}

/// A rejected line with its 1-based position among the non-empty pasted rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleLineError {
    pub line: usize,
    pub kind: LineErrorKind,
}

impl fmt::Display for SubtitleLineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.kind.describe())
    }
}

/// Everything one parse pass produced
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Cues in emission order: delimited cues first, then inferred cues by start time
    pub lines: Vec<ParsedSubtitleLine>,

    /// Per-line errors in input order
    pub errors: Vec<SubtitleLineError>,
}

impl ParseOutcome {
    /// True when no line was rejected
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first `limit` error messages joined for display to an operator
    pub fn error_summary(&self, limit: usize) -> String {
        self.errors
            .iter()
            .take(limit)
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
