use crate::model::{CleanedRaceResult, Gender, Stroke, SwimmerEventSummary, Unit};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SummaryKey {
    name: String,
    age: u32,
    gender: Gender,
    distance: String,
    unit: Unit,
    stroke_type: Stroke,
}

impl SummaryKey {
    fn of(row: &CleanedRaceResult) -> Self {
        Self {
            name: row.name.clone(),
            age: row.age,
            gender: row.gender,
            distance: row.distance.clone(),
            unit: row.unit,
            stroke_type: row.stroke_type,
        }
    }
}

/// Mean, sample standard deviation and count of final times per swimmer,
/// age, gender and event, ordered by that key.
pub fn aggregate(rows: &[CleanedRaceResult]) -> Vec<SwimmerEventSummary> {
    let mut groups: BTreeMap<SummaryKey, Vec<f64>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(SummaryKey::of(row))
            .or_default()
            .push(row.final_time_s);
    }

    groups
        .into_iter()
        .map(|(key, times)| SwimmerEventSummary {
            name: key.name,
            age: key.age,
            gender: key.gender,
            distance: key.distance,
            unit: key.unit,
            stroke_type: key.stroke_type,
            mean_final_time_s: mean(&times),
            std_final_time_s: sample_std_dev(&times),
            number_of_swims: times.len(),
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// N-1 denominator; undefined for fewer than two values.
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values);
    let squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some((squares / (values.len() - 1) as f64).sqrt())
}
