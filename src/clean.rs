use crate::model::{CleanedRaceResult, RaceResult, Stroke};
use crate::timing::{TimeParseError, parse_time};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// What to do with a row whose final time does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFailurePolicy {
    /// Stop and hand the error to the caller.
    #[default]
    Abort,
    DropRow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    BadTime,
    MissingContext,
    MissingField,
    NonNumericAge,
    ImplausibleAge,
    NumericName,
    UnknownStroke,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub kept_rows: usize,
    pub rejected: BTreeMap<RejectReason, usize>,
}

impl CleanReport {
    pub fn rejected(&self, reason: RejectReason) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }

    fn reject(&mut self, reason: RejectReason) {
        *self.rejected.entry(reason).or_default() += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleanedBatch {
    pub rows: Vec<CleanedRaceResult>,
    pub report: CleanReport,
}

/// Runs the cleaning stages in order: final time to seconds, missing fields,
/// age coercion, implausible ages and numeric names, stroke vocabulary.
pub fn clean_results(
    rows: Vec<RaceResult>,
    policy: TimeFailurePolicy,
) -> Result<CleanedBatch, TimeParseError> {
    let mut report = CleanReport {
        input_rows: rows.len(),
        ..CleanReport::default()
    };

    let mut timed = Vec::with_capacity(rows.len());
    for row in rows {
        let seconds = match row.final_time.as_deref().map(parse_time).transpose() {
            Ok(seconds) => seconds,
            Err(err) => {
                error!(final_time = %err.input, reason = err.reason, "unparseable final time");
                match policy {
                    TimeFailurePolicy::Abort => return Err(err),
                    TimeFailurePolicy::DropRow => {
                        report.reject(RejectReason::BadTime);
                        continue;
                    }
                }
            }
        };
        timed.push((row, seconds));
    }

    let mut kept = Vec::with_capacity(timed.len());
    for (row, seconds) in timed {
        match clean_row(row, seconds) {
            Ok(cleaned) => kept.push(cleaned),
            Err(reason) => report.reject(reason),
        }
    }

    report.kept_rows = kept.len();
    if report.kept_rows < report.input_rows {
        warn!(
            input = report.input_rows,
            kept = report.kept_rows,
            rejected = ?report.rejected,
            "dropped rows during cleaning"
        );
    }

    Ok(CleanedBatch { rows: kept, report })
}

fn clean_row(
    row: RaceResult,
    final_time_s: Option<f64>,
) -> Result<CleanedRaceResult, RejectReason> {
    let RaceResult {
        name,
        age,
        event_name,
        club,
        seed_time,
        final_time,
        gender,
        stroke_type,
        distance,
        unit,
        meet_list_uuid,
    } = row;

    let (Some(event_name), Some(gender), Some(stroke_type), Some(distance), Some(unit)) =
        (event_name, gender, stroke_type, distance, unit)
    else {
        return Err(RejectReason::MissingContext);
    };
    let (
        Some(name),
        Some(age),
        Some(club),
        Some(seed_time),
        Some(final_time),
        Some(meet_list_uuid),
        Some(final_time_s),
    ) = (
        non_blank(name),
        non_blank(age),
        non_blank(club),
        non_blank(seed_time),
        final_time,
        non_blank(meet_list_uuid),
        final_time_s,
    )
    else {
        return Err(RejectReason::MissingField);
    };

    let Some(age) = coerce_age(&age) else {
        debug!(name = %name, age = %age, "non-numeric age");
        return Err(RejectReason::NonNumericAge);
    };
    if age == 0 || age >= 100 {
        return Err(RejectReason::ImplausibleAge);
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(RejectReason::NumericName);
    }

    let Some(stroke) = Stroke::from_name(&stroke_type) else {
        return Err(RejectReason::UnknownStroke);
    };

    Ok(CleanedRaceResult {
        name,
        age,
        event_name,
        club,
        seed_time,
        final_time,
        gender,
        stroke_type: stroke,
        distance,
        unit,
        meet_list_uuid,
        final_time_s,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Integer ages, also accepting the `34.0` spelling float columns get on disk.
fn coerce_age(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(age) = raw.parse::<u32>() {
        return Some(age);
    }
    let age = raw.parse::<f64>().ok()?;
    (age.is_finite() && age >= 0.0 && age.fract() == 0.0).then_some(age as u32)
}
