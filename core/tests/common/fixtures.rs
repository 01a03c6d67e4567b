// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! This module provides helper functions to create test data including
//! configurations, events, and a sample collection in the shape produced by
//! the rendering engine.

use std::path::Path;

use jiff::Timestamp;
use recal_core::{Config, Event};

/// Weekly rule shared by both sample series.
pub const WEEKLY_RULE: &str = "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE,TH,FR";

/// Id of the timed weekly series in [`SAMPLE_EVENTS_JSON`].
pub const TIMED_SERIES_ID: &str = "event_26";

/// Id of the all-day weekly series in [`SAMPLE_EVENTS_JSON`].
pub const ALL_DAY_SERIES_ID: &str = "event_2xx3";

/// A small collection using the engine's field names (`recurrence`,
/// `excludeDates`).
pub const SAMPLE_EVENTS_JSON: &str = r##"[
  {
    "id": "event_1",
    "title": "Event 1",
    "start": { "dateTime": "2024-09-10T09:00:00.000Z" },
    "end": { "dateTime": "2024-09-10T10:00:00.000Z" },
    "color": "#BA3D9D"
  },
  {
    "id": "event_2xx3",
    "title": "Event All Day Recurring",
    "start": { "date": "2024-09-13" },
    "end": { "date": "2024-09-14" },
    "recurrence": "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE,TH,FR",
    "excludeDates": ["2024-09-16", "2024-09-22"],
    "color": "#3D7EBA"
  },
  {
    "id": "event_26",
    "title": "Event Recurring",
    "start": { "dateTime": "2024-09-16T05:00:00.000Z" },
    "end": { "dateTime": "2024-09-16T07:00:00.000Z" },
    "recurrence": "FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE,TH,FR",
    "resourceId": "resource_1"
  }
]"##;

/// Parses [`SAMPLE_EVENTS_JSON`].
///
/// # Panics
///
/// Panics if the sample is not a valid event list.
#[must_use]
pub fn sample_events() -> Vec<Event> {
    serde_json::from_str(SAMPLE_EVENTS_JSON).expect("sample events should parse")
}

/// Parses an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if the input is not a valid timestamp.
#[must_use]
pub fn ts(s: &str) -> Timestamp {
    s.parse().expect("timestamp should parse")
}

/// Creates a plain timed event.
///
/// # Example
///
/// ```ignore
/// let event = timed_event("e1", "Standup", "2024-09-10T09:00:00Z", "2024-09-10T09:15:00Z");
/// ```
#[must_use]
pub fn timed_event(id: &str, title: &str, start: &str, end: &str) -> Event {
    Event::new(id, title, ts(start), ts(end))
}

/// Creates a test configuration storing events at `events_path`.
#[must_use]
pub fn test_config(events_path: &Path) -> Config {
    Config::new(events_path)
}
