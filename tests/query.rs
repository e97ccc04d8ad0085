use swimseed::model::{Gender, Stroke, SwimmerEventSummary, Unit};
use swimseed::query::{SeedQuery, histogram, render_histogram};

fn summary(name: &str, age: u32, gender: Gender, mean: f64) -> SwimmerEventSummary {
    SwimmerEventSummary {
        name: name.to_string(),
        age,
        gender,
        distance: "50".to_string(),
        unit: Unit::Meters,
        stroke_type: Stroke::Freestyle,
        mean_final_time_s: mean,
        std_final_time_s: None,
        number_of_swims: 1,
    }
}

fn query(age: u32, age_range: u32) -> SeedQuery {
    SeedQuery {
        gender: Gender::Women,
        stroke: Stroke::Freestyle,
        distance: "50".to_string(),
        unit: Unit::Meters,
        age,
        age_range,
    }
}

#[test]
fn exact_age_and_half_open_age_range() {
    let summaries = vec![
        summary("A", 32, Gender::Women, 30.0),
        summary("B", 34, Gender::Women, 31.0),
        summary("C", 35, Gender::Women, 32.0),
        summary("D", 36, Gender::Women, 33.0),
        summary("E", 34, Gender::Men, 27.0),
    ];

    assert_eq!(query(34, 0).mean_times(&summaries), vec![31.0]);
    assert_eq!(query(34, 2).mean_times(&summaries), vec![30.0, 31.0, 32.0]);
    assert_eq!(query(1, 5).mean_times(&summaries), Vec::<f64>::new());
}

#[test]
fn sparse_times_use_one_second_buckets() {
    let buckets = histogram(&[31.55, 32.45]);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].count, 1);
    assert_eq!(buckets[1].count, 1);
    assert_eq!(buckets[0].label, "31.00");
    assert_eq!(buckets[1].label, "32.00");
}

#[test]
fn dense_times_keep_half_second_buckets() {
    let mut times = vec![30.1; 6];
    times.extend(vec![30.7; 6]);

    let buckets = histogram(&times);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].label, "30.00");
    assert_eq!(buckets[1].label, "30.50");
    assert_eq!(buckets[0].count, 6);
    assert_eq!(buckets[1].count, 6);
}

#[test]
fn labels_include_minutes_past_sixty_seconds() {
    let buckets = histogram(&[61.2, 62.7, 63.1]);

    let labels = buckets.iter().map(|b| b.label.as_str()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["1:01.00", "1:02.00", "1:03.00"]);
}

#[test]
fn no_times_no_buckets() {
    assert!(histogram(&[]).is_empty());
    assert_eq!(render_histogram(&[]), "");
}

#[test]
fn huge_age_range_saturates_instead_of_overflowing() {
    let summaries = vec![
        summary("A", 18, Gender::Women, 30.0),
        summary("B", 95, Gender::Women, 31.0),
    ];

    assert_eq!(query(30, u32::MAX).mean_times(&summaries), vec![30.0, 31.0]);
    assert_eq!(query(u32::MAX, 1).mean_times(&summaries), Vec::<f64>::new());
}

#[test]
fn absurd_time_span_is_capped_in_bucket_count() {
    let buckets = histogram(&[30.0, 360_000_000.0]);

    assert!(buckets.len() <= 1_000);
    assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 2);
    assert_eq!(buckets[0].count, 1);
    assert_eq!(buckets[buckets.len() - 1].count, 1);
    assert_eq!(buckets[0].label, "0:30.00");
}
