// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation of user edits against the flat event collection.
//!
//! Every operation takes the current collection by reference and returns the
//! complete replacement collection. On error nothing is returned, so the
//! caller's collection stays as it was.

use uuid::Uuid;

use crate::error::{ReconcileError, ValidationError};
use crate::event::{Boundary, BoundaryInput, Event, EventDraft};
use crate::recurrence::{RecurrenceDescription, encode};

/// Commits the editing form: validates the event, regenerates its recurrence
/// rule from `recurrence` and upserts it by id.
///
/// Replacing an existing id keeps its position, so editing a series parent
/// redefines the whole series.
#[tracing::instrument(skip(events, edited), fields(id = %edited.id))]
pub fn commit_edit(
    events: &[Event],
    mut edited: Event,
    recurrence: &RecurrenceDescription,
) -> Result<Vec<Event>, ReconcileError> {
    edited.validate()?;

    edited.title = edited.title.trim().to_string();
    edited.description = edited
        .description
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(ToString::to_string);
    edited.recurrence_rule = encode(recurrence);
    drop_mismatched_exclusions(&mut edited);

    tracing::debug!(rule = ?edited.recurrence_rule, "committing edited event");
    Ok(upsert(events, edited))
}

/// Detaches one occurrence of a recurring series: the occurrence is excluded
/// from `series_parent` and `overrides` is appended as a standalone event
/// linked back to the series.
///
/// `occurrence` is the start the instance had under the series pattern, before
/// the user's change. A no-op drag still produces an exclusion and an override.
///
/// Without a series parent the touched event was standalone, and `overrides`
/// simply replaces it by id.
#[tracing::instrument(skip(events, series_parent, overrides), fields(id = %overrides.id))]
pub fn detach_occurrence(
    events: &[Event],
    series_parent: Option<&Event>,
    occurrence: &BoundaryInput,
    mut overrides: Event,
) -> Result<Vec<Event>, ReconcileError> {
    let Some(parent) = series_parent else {
        tracing::debug!("no series parent, replacing event in place");
        return Ok(upsert(events, overrides));
    };

    let series_id = parent.id.clone();
    let boundary = resolve_occurrence(events, parent, occurrence).inspect_err(|err| {
        tracing::error!(series_id, %err, "refusing to detach occurrence");
    })?;

    let mut parent = parent.clone();
    if !parent.is_excluded(&boundary) {
        parent.excluded_dates.push(boundary);
    }

    overrides.id = fresh_id(events);
    overrides.recurrence_rule = None;
    overrides.excluded_dates.clear();
    overrides.originating_series_id = Some(series_id.clone());
    tracing::debug!(series_id, %boundary, override_id = overrides.id, "detached occurrence");

    let mut events = upsert(events, parent);
    events.push(overrides);
    Ok(events)
}

/// Moves a standalone event, or a whole series when `id` is a series parent,
/// to new bounds. The recurrence rule is kept as it is.
#[tracing::instrument(skip(events))]
pub fn move_event(
    events: &[Event],
    id: &str,
    start: Boundary,
    end: Boundary,
) -> Result<Vec<Event>, ReconcileError> {
    let mut event = find(events, id)?.clone();
    if !start.same_kind(&end) {
        return Err(ValidationError::MixedBoundaries.into());
    }

    event.start = start;
    event.end = end;
    drop_mismatched_exclusions(&mut event);
    detach_occurrence(events, None, &BoundaryInput::default(), event)
}

/// Appends a new event built from a drag-to-create gesture.
///
/// The id is `event_<n>` where `n` is one past the collection length, bumped
/// while taken. Without a color on the draft one is picked from `palette` by
/// the collection length.
#[tracing::instrument(skip(events, palette))]
pub fn create_from_drag(events: &[Event], draft: EventDraft, palette: &[String]) -> Vec<Event> {
    let mut ordinal = events.len() + 1;
    while events.iter().any(|a| a.id == format!("event_{ordinal}")) {
        ordinal += 1;
    }

    let color = draft.color.or_else(|| match palette.len() {
        0 => None,
        n => Some(palette[events.len() % n].clone()),
    });

    let event = Event {
        id: format!("event_{ordinal}"),
        title: draft.title.unwrap_or_else(|| format!("Event {ordinal}")),
        description: draft.description,
        start: draft.start,
        end: draft.end,
        recurrence_rule: None,
        excluded_dates: Vec::new(),
        originating_series_id: None,
        color,
        resource_id: draft.resource_id,
    };
    tracing::debug!(id = event.id, "created event from drag");

    let mut events = events.to_vec();
    events.push(event);
    events
}

/// Deletes an event. Deleting a series parent also deletes the overrides that
/// were detached from it.
#[tracing::instrument(skip(events))]
pub fn delete_event(events: &[Event], id: &str) -> Result<Vec<Event>, ReconcileError> {
    find(events, id)?;

    let events: Vec<_> = events
        .iter()
        .filter(|a| a.id != id && a.originating_series_id.as_deref() != Some(id))
        .cloned()
        .collect();
    Ok(events)
}

fn resolve_occurrence(
    events: &[Event],
    parent: &Event,
    occurrence: &BoundaryInput,
) -> Result<Boundary, ReconcileError> {
    let series_id = || parent.id.clone();

    let boundary = occurrence
        .resolve()
        .ok_or_else(|| ReconcileError::UnresolvedOccurrence {
            series_id: series_id(),
        })?;

    if !boundary.same_kind(&parent.start) {
        return Err(ReconcileError::OccurrenceKindMismatch {
            series_id: series_id(),
        });
    }

    if !events.iter().any(|a| a.id == parent.id) {
        return Err(ReconcileError::SeriesNotFound {
            series_id: series_id(),
        });
    }

    if !parent.is_series() {
        return Err(ReconcileError::NotRecurring {
            series_id: series_id(),
        });
    }

    Ok(boundary)
}

fn find<'a>(events: &'a [Event], id: &str) -> Result<&'a Event, ReconcileError> {
    events
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| ReconcileError::EventNotFound { id: id.to_string() })
}

/// Replaces the event with the same id in place, or appends it.
fn upsert(events: &[Event], event: Event) -> Vec<Event> {
    let mut events = events.to_vec();
    match events.iter_mut().find(|a| a.id == event.id) {
        Some(slot) => *slot = event,
        None => events.push(event),
    }
    events
}

fn drop_mismatched_exclusions(event: &mut Event) {
    let dropped = event.retain_matching_exclusions();
    if dropped > 0 {
        tracing::warn!(
            id = event.id,
            dropped,
            "dropping exclusions that no longer match the kind of the series start"
        );
    }
}

fn fresh_id(events: &[Event]) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !events.iter().any(|a| a.id == id) {
            return id;
        }
    }
}
