use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::models::{LineErrorKind, ParseOutcome, ParsedSubtitleLine, RawSubtitlePoint, SubtitleLineError};
use super::timestamp::parse_timestamp_ms;

// @module: Line classifier and end-time inference for pasted subtitles

// @const: `(time) speaker: text`
static TIMED_WITH_SPEAKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(([0-9:.,]+)\)\s*([^:]+?)\s*:\s*(.+)$").unwrap()
});

// @const: `(time) text`
static TIMED_TEXT_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(([0-9:.,]+)\)\s*(.+)$").unwrap()
});

/// Longest duration given to a cue whose end is inferred
pub const INFERRED_MAX_DURATION_MS: u64 = 2500;

/// Shortest duration given to a cue whose end is inferred
pub const INFERRED_MIN_DURATION_MS: u64 = 300;

/// What a single line turned into
enum LineOutcome {
    Timed(ParsedSubtitleLine),
    Point(RawSubtitlePoint),
    Skip,
    Continuation,
    Rejected(LineErrorKind),
}

/// Parse free-form pasted subtitle text.
///
/// Every non-empty line is classified independently; a bad line is recorded
/// with its 1-based position among the non-empty lines and parsing carries on
/// with the next one.
/// Parenthetical cues have no end time and get one inferred once the whole
/// input has been read.
pub fn parse_subtitle_lines(input: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut points: Vec<RawSubtitlePoint> = Vec::new();

    let rows = input.lines().map(str::trim).filter(|row| !row.is_empty());
    for (idx, row) in rows.enumerate() {

        match classify_line(row, !points.is_empty()) {
            LineOutcome::Timed(line) => outcome.lines.push(line),
            LineOutcome::Point(point) => points.push(point),
            LineOutcome::Skip => debug!("Skipping markup line {}", idx + 1),
            LineOutcome::Continuation => {
                if let Some(last) = points.last_mut() {
                    last.text = format!("{} {}", last.text, row).trim().to_string();
                }
            }
            LineOutcome::Rejected(kind) => outcome.errors.push(SubtitleLineError { line: idx + 1, kind }),
        }
    }

    outcome.lines.extend(infer_end_times(points));
    outcome
}

fn classify_line(row: &str, has_pending_point: bool) -> LineOutcome {
    let normalized = row.replace('\u{FF1A}', ":");

    let parts: Vec<&str> = normalized.split('|').map(str::trim).collect();
    if parts.len() >= 3 {
        return classify_delimited(&parts);
    }

    if let Some(caps) = TIMED_WITH_SPEAKER.captures(&normalized) {
        let speaker = caps[2].trim();
        return timed_point(&caps[1], Some(speaker), &caps[3]);
    }

    if let Some(caps) = TIMED_TEXT_ONLY.captures(&normalized) {
        return timed_point(&caps[1], None, &caps[2]);
    }

    if row.starts_with('<') {
        return LineOutcome::Skip;
    }

    if has_pending_point {
        return LineOutcome::Continuation;
    }

    LineOutcome::Rejected(LineErrorKind::UnsupportedFormat)
}

/// `start|end|text` or `start|end|speaker|text...`
fn classify_delimited(parts: &[&str]) -> LineOutcome {
    let (Some(start_ms), Some(end_ms)) = (parse_timestamp_ms(parts[0]), parse_timestamp_ms(parts[1])) else {
        return LineOutcome::Rejected(LineErrorKind::InvalidTimeRange);
    };
    if end_ms < start_ms {
        return LineOutcome::Rejected(LineErrorKind::InvalidTimeRange);
    }

    let (speaker_text, text) = if parts.len() >= 4 {
        (non_empty(parts[2]), parts[3..].join("|").trim().to_string())
    } else {
        (None, parts[2..].join("|").trim().to_string())
    };

    if text.is_empty() {
        return LineOutcome::Rejected(LineErrorKind::MissingText);
    }

    LineOutcome::Timed(ParsedSubtitleLine {
        start_ms,
        end_ms,
        speaker_text,
        text,
    })
}

fn timed_point(time: &str, speaker: Option<&str>, text: &str) -> LineOutcome {
    let Some(start_ms) = parse_timestamp_ms(time) else {
        return LineOutcome::Rejected(LineErrorKind::InvalidTimestamp);
    };

    let text = text.trim();
    if text.is_empty() {
        return LineOutcome::Rejected(LineErrorKind::MissingText);
    }

    LineOutcome::Point(RawSubtitlePoint {
        start_ms,
        speaker_text: speaker.and_then(non_empty),
        text: text.to_string(),
    })
}

/// Sort pending points by start and close each one against its successor.
///
/// A cue ends one millisecond before the next one starts, clamped to
/// `[start + 300, start + 2500]`. The last cue always gets the full 2500ms.
fn infer_end_times(mut points: Vec<RawSubtitlePoint>) -> Vec<ParsedSubtitleLine> {
    points.sort_by_key(|p| p.start_ms);

    let next_starts: Vec<Option<u64>> = points
        .iter()
        .skip(1)
        .map(|p| Some(p.start_ms))
        .chain(std::iter::once(None))
        .collect();

    points
        .into_iter()
        .zip(next_starts)
        .map(|(point, next_start)| {
            let longest = point.start_ms.saturating_add(INFERRED_MAX_DURATION_MS);
            let end_ms = match next_start {
                Some(next) => {
                    let shortest = point.start_ms.saturating_add(INFERRED_MIN_DURATION_MS);
                    longest.min(shortest.max(next.saturating_sub(1)))
                }
                None => longest,
            };
            ParsedSubtitleLine {
                start_ms: point.start_ms,
                end_ms,
                speaker_text: point.speaker_text,
                text: point.text,
            }
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}
