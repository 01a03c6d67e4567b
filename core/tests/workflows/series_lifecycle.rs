// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Series lifecycle workflow tests.
//!
//! These tests follow a recurring series from its first edit through
//! detaching occurrences, redefining the series and deleting it.

use jiff::civil::date;
use recal_core::{
    Boundary, BoundaryInput, EventDraft, Frequency, ReconcileError, RecurrenceDescription,
    ValidationError, Weekday, commit_edit, create_from_drag, delete_event, detach_occurrence,
    move_event, toggle_day_of_week,
};

use crate::common::{
    ALL_DAY_SERIES_ID, TIMED_SERIES_ID, WEEKLY_RULE, assert_detached, sample_events, timed_event,
    ts,
};

#[test]
fn drag_timed_occurrence_detaches_override() {
    // Arrange
    let events = sample_events();
    let parent = events.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap();
    let occurrence = Boundary::Instant(ts("2024-09-18T05:00:00Z"));

    // the engine reports the dragged instance with the series id and rule
    let mut dragged = timed_event(
        TIMED_SERIES_ID,
        "Event Recurring",
        "2024-09-18T09:00:00Z",
        "2024-09-18T11:00:00Z",
    );
    dragged.recurrence_rule = parent.recurrence_rule.clone();
    dragged.resource_id = parent.resource_id.clone();

    // Act
    let next =
        detach_occurrence(&events, Some(parent), &occurrence.into(), dragged).unwrap();

    // Assert
    let detached = assert_detached(&events, &next, TIMED_SERIES_ID, &occurrence);
    assert_eq!(detached.start, Boundary::Instant(ts("2024-09-18T09:00:00Z")));
    assert_eq!(detached.end, Boundary::Instant(ts("2024-09-18T11:00:00Z")));
    assert_eq!(detached.resource_id.as_deref(), Some("resource_1"));

    let parent = next.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap();
    assert_eq!(parent.recurrence_rule.as_deref(), Some(WEEKLY_RULE));
    assert_eq!(parent.start, Boundary::Instant(ts("2024-09-16T05:00:00Z")));
}

#[test]
fn detach_from_engine_shaped_occurrence() {
    // Arrange - the engine hands over `{ "date": ... }` for all-day instances
    let events = sample_events();
    let parent = events.iter().find(|a| a.id == ALL_DAY_SERIES_ID).unwrap();
    let occurrence: BoundaryInput = serde_json::from_str(r#"{ "date": "2024-09-19" }"#).unwrap();
    let mut dragged = parent.clone();
    dragged.start = Boundary::AllDay(date(2024, 9, 20));
    dragged.end = Boundary::AllDay(date(2024, 9, 21));

    // Act
    let next = detach_occurrence(&events, Some(parent), &occurrence, dragged).unwrap();

    // Assert
    let detached = assert_detached(
        &events,
        &next,
        ALL_DAY_SERIES_ID,
        &Boundary::AllDay(date(2024, 9, 19)),
    );
    assert!(detached.is_all_day());
    assert_eq!(detached.color.as_deref(), Some("#3D7EBA"));

    // existing exclusions are kept in order
    let parent = next.iter().find(|a| a.id == ALL_DAY_SERIES_ID).unwrap();
    assert_eq!(
        parent.excluded_dates,
        vec![
            Boundary::AllDay(date(2024, 9, 16)),
            Boundary::AllDay(date(2024, 9, 22)),
            Boundary::AllDay(date(2024, 9, 19)),
        ]
    );
}

#[test]
fn failed_detach_leaves_collection_untouched() {
    // Arrange
    let events = sample_events();
    let snapshot = events.clone();
    let parent = events.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap();
    let dragged = parent.clone();

    // Act
    let result = detach_occurrence(&events, Some(parent), &BoundaryInput::default(), dragged);

    // Assert
    assert_eq!(
        result,
        Err(ReconcileError::UnresolvedOccurrence {
            series_id: TIMED_SERIES_ID.to_string()
        })
    );
    assert_eq!(events, snapshot);
}

#[test]
fn edit_series_rule_then_detach() {
    // Arrange
    let events = sample_events();
    let parent = events.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap().clone();

    // Act - drop Friday from the series, then detach a Wednesday
    let desc = toggle_day_of_week(parent.recurrence(), Weekday::Friday);
    let edited = commit_edit(&events, parent, &desc).unwrap();
    let parent = edited.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap();
    let occurrence = Boundary::Instant(ts("2024-09-25T05:00:00Z"));
    let dragged = timed_event(
        TIMED_SERIES_ID,
        "Moved",
        "2024-09-25T06:00:00Z",
        "2024-09-25T08:00:00Z",
    );
    let next = detach_occurrence(&edited, Some(parent), &occurrence.into(), dragged).unwrap();

    // Assert
    assert_eq!(edited.len(), events.len());
    let parent = next.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap();
    assert_eq!(
        parent.recurrence_rule.as_deref(),
        Some("FREQ=WEEKLY;BYDAY=MO,WE,TH")
    );
    assert_detached(&edited, &next, TIMED_SERIES_ID, &occurrence);
}

#[test]
fn commit_turns_plain_event_into_series_and_back() {
    // Arrange
    let events = sample_events();
    let plain = events[0].clone();

    // Act
    let desc = RecurrenceDescription::new(Frequency::Monthly).with_interval(3);
    let series = commit_edit(&events, plain, &desc).unwrap();
    let back = commit_edit(&series, series[0].clone(), &RecurrenceDescription::default()).unwrap();

    // Assert
    assert_eq!(series[0].recurrence_rule.as_deref(), Some("FREQ=MONTHLY;INTERVAL=3"));
    assert_eq!(series[0].recurrence().to_string(), "Every 3 months");
    assert_eq!(back, events);
}

#[test]
fn commit_reports_first_validation_problem() {
    // Arrange
    let events = sample_events();
    let mut edited = events[0].clone();
    edited.title = String::new();
    edited.end = edited.start;

    // Act
    let result = commit_edit(&events, edited, &RecurrenceDescription::default());

    // Assert
    assert_eq!(
        result.unwrap_err().to_string(),
        ValidationError::EmptyTitle.to_string()
    );
}

#[test]
fn drag_create_then_move() {
    // Arrange
    let events = sample_events();
    let palette = vec!["#111111".to_string(), "#222222".to_string()];
    let draft = EventDraft::new(ts("2024-09-20T09:00:00Z"), ts("2024-09-20T10:00:00Z"));

    // Act
    let created = create_from_drag(&events, draft, &palette);
    let moved = move_event(
        &created,
        "event_4",
        Boundary::Instant(ts("2024-09-21T09:00:00Z")),
        Boundary::Instant(ts("2024-09-21T10:00:00Z")),
    )
    .unwrap();

    // Assert
    assert_eq!(created.len(), 4);
    let event = moved.iter().find(|a| a.id == "event_4").unwrap();
    assert_eq!(event.title, "Event 4");
    assert_eq!(event.color.as_deref(), Some("#222222"));
    assert_eq!(event.start, Boundary::Instant(ts("2024-09-21T09:00:00Z")));
    assert_eq!(moved.len(), 4);
}

#[test]
fn delete_series_cascades_to_overrides() {
    // Arrange
    let events = sample_events();
    let parent = events.iter().find(|a| a.id == ALL_DAY_SERIES_ID).unwrap();
    let dragged = parent.clone();
    let occurrence = Boundary::AllDay(date(2024, 9, 18));
    let next = detach_occurrence(&events, Some(parent), &occurrence.into(), dragged).unwrap();

    // Act
    let next = delete_event(&next, ALL_DAY_SERIES_ID).unwrap();

    // Assert
    assert_eq!(next.len(), 2);
    assert!(
        next.iter()
            .all(|a| a.originating_series_id.as_deref() != Some(ALL_DAY_SERIES_ID))
    );
}
