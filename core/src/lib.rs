// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurring event model: a codec for compact recurrence rules and the
//! reconciliation of user edits against a flat event collection.

mod config;
mod error;
mod event;
mod reconcile;
mod recurrence;
mod store;

pub use crate::config::{APP_NAME, Config, ConfigDuration, parse_duration};
pub use crate::error::{ReconcileError, StoreError, ValidationError};
pub use crate::event::{Boundary, BoundaryInput, Event, EventDraft};
pub use crate::reconcile::{
    commit_edit, create_from_drag, delete_event, detach_occurrence, move_event,
};
pub use crate::recurrence::{
    Frequency, RecurrenceDescription, Weekday, decode, encode, toggle_day_of_week,
};
pub use crate::store::EventStore;
