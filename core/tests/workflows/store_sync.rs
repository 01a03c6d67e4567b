// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Store synchronization workflow tests.
//!
//! These tests run full load, reconcile, save cycles against the JSON event
//! store on disk.

use jiff::civil::date;
use recal_core::{Boundary, EventStore, StoreError, detach_occurrence};

use crate::common::{
    ALL_DAY_SERIES_ID, SAMPLE_EVENTS_JSON, TIMED_SERIES_ID, assert_detached, assert_file_exists,
    sample_events, setup_temp_dirs, timed_event, ts,
};

#[tokio::test]
async fn store_loads_engine_shaped_file() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.write_events(SAMPLE_EVENTS_JSON).await.unwrap();

    // Act
    let events = EventStore::new(path).load().await.unwrap();

    // Assert
    assert_eq!(events, sample_events());
    let series = events.iter().find(|a| a.id == ALL_DAY_SERIES_ID).unwrap();
    assert!(series.is_excluded(&Boundary::AllDay(date(2024, 9, 22))));
}

#[tokio::test]
async fn store_writes_canonical_field_names() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let store = EventStore::new(&temp_dirs.events_path);

    // Act
    store.save(&sample_events()).await.unwrap();

    // Assert
    assert_file_exists(&temp_dirs.events_path);
    let content = tokio::fs::read_to_string(&temp_dirs.events_path).await.unwrap();
    assert!(content.contains("\"recurrenceRule\""));
    assert!(content.contains("\"excludedDates\""));
    assert!(!content.contains("\"excludeDates\""));
    assert!(content.contains("\"2024-09-16\""));
}

#[tokio::test]
async fn store_detach_cycle_persists_both_events() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let store = EventStore::new(&temp_dirs.events_path);
    store.save(&sample_events()).await.unwrap();

    // Act
    let events = store.load().await.unwrap();
    let parent = events.iter().find(|a| a.id == TIMED_SERIES_ID).unwrap();
    let occurrence = Boundary::Instant(ts("2024-09-19T05:00:00Z"));
    let dragged = timed_event(
        TIMED_SERIES_ID,
        "Event Recurring",
        "2024-09-19T12:00:00Z",
        "2024-09-19T14:00:00Z",
    );
    let next = detach_occurrence(&events, Some(parent), &occurrence.into(), dragged).unwrap();
    store.save(&next).await.unwrap();

    // Assert
    let reloaded = store.load().await.unwrap();
    assert_eq!(reloaded, next);
    assert_detached(&events, &reloaded, TIMED_SERIES_ID, &occurrence);
}

#[tokio::test]
async fn store_rejects_bad_exclusion() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs
        .write_events(
            r#"[{
                "id": "e1",
                "start": { "date": "2024-09-16" },
                "end": { "date": "2024-09-17" },
                "excludedDates": ["someday"]
            }]"#,
        )
        .await
        .unwrap();

    // Act
    let result = EventStore::new(path).load().await;

    // Assert
    assert!(matches!(result, Err(StoreError::Json { .. })));
}
