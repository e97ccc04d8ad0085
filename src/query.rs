use crate::model::{Gender, Stroke, SwimmerEventSummary, Unit};
use crate::timing::format_time;
use serde::Serialize;

/// Bins whose non-empty mean count falls below this get widened to a second.
const MIN_MEAN_BIN_COUNT: f64 = 6.0;
/// Spans wider than this many bins get coarser whole-second bins instead.
const MAX_BUCKETS: usize = 1_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedQuery {
    pub gender: Gender,
    pub stroke: Stroke,
    pub distance: String,
    pub unit: Unit,
    pub age: u32,
    /// Zero means exact age; otherwise `age - range <= a < age + range`.
    pub age_range: u32,
}

impl SeedQuery {
    pub fn matches(&self, summary: &SwimmerEventSummary) -> bool {
        summary.gender == self.gender
            && summary.stroke_type == self.stroke
            && summary.distance == self.distance
            && summary.unit == self.unit
            && self.matches_age(summary.age)
    }

    fn matches_age(&self, age: u32) -> bool {
        if self.age_range == 0 {
            age == self.age
        } else {
            age >= self.age.saturating_sub(self.age_range)
                && age < self.age.saturating_add(self.age_range)
        }
    }

    pub fn mean_times(&self, summaries: &[SwimmerEventSummary]) -> Vec<f64> {
        summaries
            .iter()
            .filter(|summary| self.matches(summary))
            .map(|summary| summary.mean_final_time_s)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub lower_s: f64,
    pub upper_s: f64,
    pub count: usize,
    pub label: String,
}

/// Half-second buckets over `[floor(min), floor(max) + 1)`, widened to whole
/// seconds when they come out too sparse. Very wide spans are split into at
/// most `MAX_BUCKETS` whole-second-multiple buckets.
pub fn histogram(times: &[f64]) -> Vec<Bucket> {
    let finite = times
        .iter()
        .copied()
        .filter(|t| t.is_finite())
        .collect::<Vec<_>>();
    let Some(min) = finite.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = finite.iter().copied().fold(min, f64::max);

    let lo = min.floor();
    let span = max.floor() + 1.0 - lo;

    let (counts, width) = if span * 2.0 <= MAX_BUCKETS as f64 {
        let half_second = bucket_counts(&finite, lo, 0.5, (span * 2.0) as usize);
        if mean_non_empty(&half_second) < MIN_MEAN_BIN_COUNT {
            (bucket_counts(&finite, lo, 1.0, span as usize), 1.0)
        } else {
            (half_second, 0.5)
        }
    } else {
        let width = (span / MAX_BUCKETS as f64).ceil();
        let bins = (span / width).ceil() as usize;
        (bucket_counts(&finite, lo, width, bins), width)
    };

    let last_lower = lo + width * (counts.len() - 1) as f64;
    let include_minutes = last_lower > 60.0;

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower_s = lo + width * i as f64;
            Bucket {
                lower_s,
                upper_s: lower_s + width,
                count,
                label: format_time(lower_s, include_minutes),
            }
        })
        .collect()
}

fn bucket_counts(values: &[f64], lo: f64, width: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins.max(1)];
    let last = counts.len() - 1;
    for value in values {
        let index = ((value - lo) / width).floor() as usize;
        counts[index.min(last)] += 1;
    }
    counts
}

fn mean_non_empty(counts: &[usize]) -> f64 {
    let non_empty = counts.iter().filter(|c| **c > 0).collect::<Vec<_>>();
    if non_empty.is_empty() {
        return 0.0;
    }
    non_empty.iter().map(|c| **c as f64).sum::<f64>() / non_empty.len() as f64
}

/// Plain-text rendering used by the CLI.
pub fn render_histogram(buckets: &[Bucket]) -> String {
    let widest = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    buckets
        .iter()
        .map(|bucket| {
            let bar = "#".repeat(bucket.count * 40 / widest);
            format!("{:>9} {:>4} {bar}", bucket.label, bucket.count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
