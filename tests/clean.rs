use anyhow::Result;
use swimseed::clean::{RejectReason, TimeFailurePolicy, clean_results};
use swimseed::model::{Gender, RaceResult, Stroke, Unit};
use swimseed::parser::scan_results_text;

fn row(name: &str, age: &str, stroke: &str, final_time: &str) -> RaceResult {
    RaceResult {
        name: Some(name.to_string()),
        age: Some(age.to_string()),
        event_name: Some(format!("Event 1  Women 50 Meter {stroke}")),
        club: Some("SDSM".to_string()),
        seed_time: Some("NT".to_string()),
        final_time: Some(final_time.to_string()),
        gender: Some(Gender::Women),
        stroke_type: Some(stroke.to_string()),
        distance: Some("50".to_string()),
        unit: Some(Unit::Meters),
        meet_list_uuid: Some("6d1f6f0e-2a8b-4d51-9a57-7c1b1c1f3a10".to_string()),
    }
}

#[test]
fn drops_implausible_ages_numeric_names_and_relays() -> Result<()> {
    let rows = vec![
        row("Zero, Age", "0", "Freestyle", "30.00"),
        row("2ndPlacer", "30", "Freestyle", "31.00"),
        row("Relay, Team", "30", "Medley Relay", "2:01.00"),
        row("Smith, Jane", "34", "Freestyle", "31.55"),
    ];

    let batch = clean_results(rows, TimeFailurePolicy::Abort)?;

    assert_eq!(batch.rows.len(), 1);
    let kept = &batch.rows[0];
    assert_eq!(kept.name, "Smith, Jane");
    assert_eq!(kept.age, 34);
    assert_eq!(kept.stroke_type, Stroke::Freestyle);
    assert_eq!(kept.final_time_s, 31.55);

    assert_eq!(batch.report.input_rows, 4);
    assert_eq!(batch.report.kept_rows, 1);
    assert_eq!(batch.report.rejected(RejectReason::ImplausibleAge), 1);
    assert_eq!(batch.report.rejected(RejectReason::NumericName), 1);
    assert_eq!(batch.report.rejected(RejectReason::UnknownStroke), 1);
    Ok(())
}

#[test]
fn ages_of_one_hundred_or_more_are_dropped() -> Result<()> {
    let rows = vec![
        row("Old, Very", "100", "Butterfly", "40.00"),
        row("Old, Quite", "99", "Butterfly", "41.00"),
    ];

    let batch = clean_results(rows, TimeFailurePolicy::Abort)?;

    assert_eq!(batch.rows.len(), 1);
    assert_eq!(batch.rows[0].age, 99);
    Ok(())
}

#[test]
fn missing_and_blank_fields_are_dropped() -> Result<()> {
    let mut no_club = row("Doe, Jane", "30", "Backstroke", "40.00");
    no_club.club = None;
    let mut blank_uuid = row("Doe, Jim", "31", "Backstroke", "41.00");
    blank_uuid.meet_list_uuid = Some("  ".to_string());
    let mut no_time = row("Doe, Joe", "32", "Backstroke", "42.00");
    no_time.final_time = None;

    let batch = clean_results(vec![no_club, blank_uuid, no_time], TimeFailurePolicy::Abort)?;

    assert!(batch.rows.is_empty());
    assert_eq!(batch.report.rejected(RejectReason::MissingField), 3);
    Ok(())
}

#[test]
fn ages_are_coerced_to_integers() -> Result<()> {
    let rows = vec![
        row("Float, Age", "34.0", "Breaststroke", "45.00"),
        row("Text, Age", "thirty", "Breaststroke", "46.00"),
    ];

    let batch = clean_results(rows, TimeFailurePolicy::Abort)?;

    assert_eq!(batch.rows.len(), 1);
    assert_eq!(batch.rows[0].age, 34);
    assert_eq!(batch.report.rejected(RejectReason::NonNumericAge), 1);
    Ok(())
}

#[test]
fn rows_scanned_before_any_header_are_dropped_for_missing_context() -> Result<()> {
    let mut rows =
        scan_results_text("  1 Doe, John                45 NEM          28.10      27.95\n");
    for row in &mut rows {
        row.meet_list_uuid = Some("meet-1".to_string());
    }

    let batch = clean_results(rows, TimeFailurePolicy::Abort)?;

    assert!(batch.rows.is_empty());
    assert_eq!(batch.report.rejected(RejectReason::MissingContext), 1);
    Ok(())
}

#[test]
fn malformed_final_time_aborts_by_default() {
    let rows = vec![
        row("Smith, Jane", "34", "Freestyle", "31.55"),
        row("Doe, Jane", "35", "Freestyle", "1.2.3"),
    ];

    let err = clean_results(rows, TimeFailurePolicy::Abort).unwrap_err();

    assert_eq!(err.input, "1.2.3");
}

#[test]
fn malformed_final_time_can_be_dropped_instead() -> Result<()> {
    let rows = vec![
        row("Smith, Jane", "34", "Freestyle", "31.55"),
        row("Doe, Jane", "35", "Freestyle", "1.2.3"),
    ];

    let batch = clean_results(rows, TimeFailurePolicy::DropRow)?;

    assert_eq!(batch.rows.len(), 1);
    assert_eq!(batch.report.rejected(RejectReason::BadTime), 1);
    Ok(())
}
