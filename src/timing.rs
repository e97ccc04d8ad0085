//! Race times as printed on results pages (`H:MM:SS.hh`, `M:SS.hh`, `SS.hh`)
//! and their numeric form in seconds.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid race time {input:?}: {reason}")]
pub struct TimeParseError {
    pub input: String,
    pub reason: &'static str,
}

impl TimeParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

pub fn parse_time(text: &str) -> Result<f64, TimeParseError> {
    let trimmed = text.trim();
    let parts = trimmed.split(':').collect::<Vec<_>>();

    let (minutes, sec_hund) = match parts.as_slice() {
        [sec_hund] => (0, *sec_hund),
        [minutes, sec_hund] => (parse_component(text, minutes)?, *sec_hund),
        [hours, minutes, sec_hund] => {
            let hours = parse_component(text, hours)?;
            let minutes = parse_component(text, minutes)?;
            let minutes = hours
                .checked_mul(60)
                .and_then(|m| m.checked_add(minutes))
                .ok_or_else(|| TimeParseError::new(text, "number out of range"))?;
            (minutes, *sec_hund)
        }
        _ => return Err(TimeParseError::new(text, "too many ':' separators")),
    };

    let Some((seconds, hundredths)) = sec_hund.split_once('.') else {
        return Err(TimeParseError::new(text, "missing '.' before hundredths"));
    };
    let seconds = parse_component(text, seconds)?;
    if hundredths.len() != 2 {
        return Err(TimeParseError::new(text, "hundredths must be two digits"));
    }
    let hundredths = parse_component(text, hundredths)?;

    // Summing whole hundredths keeps 94.12 exactly equal to the literal.
    let total = minutes
        .checked_mul(60)
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(100))
        .and_then(|h| h.checked_add(hundredths))
        .ok_or_else(|| TimeParseError::new(text, "number out of range"))?;
    Ok(total as f64 / 100.0)
}

fn parse_component(input: &str, part: &str) -> Result<u64, TimeParseError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeParseError::new(input, "expected digits"));
    }
    part.parse::<u64>()
        .map_err(|_| TimeParseError::new(input, "number out of range"))
}

/// Formats seconds as `M:SS.hh`, or `SS.hh` when `include_minutes` is false.
///
/// The value is rounded once to whole hundredths, half away from zero, and
/// the carry flows into seconds and minutes.
pub fn format_time(seconds: f64, include_minutes: bool) -> String {
    let total_hundredths = (seconds.max(0.0) * 100.0).round() as u64;
    let minutes = total_hundredths / 6000;
    let whole_seconds = (total_hundredths / 100) % 60;
    let hundredths = total_hundredths % 100;

    if include_minutes {
        format!("{minutes}:{whole_seconds:02}.{hundredths:02}")
    } else {
        format!("{whole_seconds:02}.{hundredths:02}")
    }
}
