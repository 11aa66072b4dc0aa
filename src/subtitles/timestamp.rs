/*!
 * Timestamp normalization for pasted subtitle cues.
 *
 * Operators paste timestamps in whatever shape their source tool produced,
 * so this accepts:
 * - raw integer milliseconds (`12345`)
 * - `ss`, `mm:ss` and `hh:mm:ss`
 * - any of the above followed by `,ms` or `.ms`
 *
 * The fractional part is always read as milliseconds: it is right-padded to
 * three digits and truncated to three digits, so `.4` is 400ms and `.4567` is 456ms.
 */

/// Parse a timestamp token into milliseconds.
///
/// Returns `None` when the token does not match an accepted shape or one of
/// its components is not a plain decimal number.
pub fn parse_timestamp_ms(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_digits(trimmed) {
        return trimmed.parse().ok();
    }

    // Only the first comma is a decimal separator
    let normalized = trimmed.replacen(',', ".", 1);
    let (main, fraction) = match normalized.split_once('.') {
        Some((main, fraction)) => (main, fraction),
        None => (normalized.as_str(), "0"),
    };

    let mut components = Vec::with_capacity(3);
    for part in main.split(':') {
        if !is_digits(part) {
            return None;
        }
        components.push(part.parse::<u64>().ok()?);
    }

    let seconds = match components.as_slice() {
        [h, m, s] => h.checked_mul(3600)?.checked_add(m.checked_mul(60)?)?.checked_add(*s)?,
        [m, s] => m.checked_mul(60)?.checked_add(*s)?,
        [s] => *s,
        _ => return None,
    };

    let millis = fraction_to_millis(fraction)?;
    seconds.checked_mul(1000)?.checked_add(millis)
}

/// Format milliseconds as `HH:MM:SS.mmm`
pub fn format_timestamp_ms(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

fn fraction_to_millis(fraction: &str) -> Option<u64> {
    if !fraction.is_empty() && !is_digits(fraction) {
        return None;
    }
    let padded: String = fraction.chars().chain(std::iter::repeat('0')).take(3).collect();
    padded.parse().ok()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
