// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// A user-facing problem with an edited event. The collection is left untouched.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("Please enter a title for the event")]
    EmptyTitle,

    /// A timed event does not end after it starts.
    #[error("End date must be after start date")]
    EndNotAfterStart,

    /// Start and end mix all-day dates with instants.
    #[error("Start and end must both be all-day dates or both be date-times")]
    MixedBoundaries,
}

/// Error returned by the reconciliation operations.
///
/// Everything except [`ReconcileError::Validation`] means the caller broke the
/// contract of the operation, e.g. by passing an occurrence without a date.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// The edited event is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The occurrence to detach has neither a date nor a date-time.
    #[error("Occurrence of series '{series_id}' has no date or date-time")]
    UnresolvedOccurrence {
        /// The id of the series parent
        series_id: String,
    },

    /// The occurrence boundary is all-day while the series is timed, or the other way around.
    #[error("Occurrence kind does not match the start of series '{series_id}'")]
    OccurrenceKindMismatch {
        /// The id of the series parent
        series_id: String,
    },

    /// The series parent is not part of the collection.
    #[error("Series '{series_id}' not found")]
    SeriesNotFound {
        /// The id of the missing series parent
        series_id: String,
    },

    /// The series parent carries no recurrence rule.
    #[error("Event '{series_id}' is not a recurring series")]
    NotRecurring {
        /// The id of the non-recurring event
        series_id: String,
    },

    /// No event with the given id exists.
    #[error("Event '{id}' not found")]
    EventNotFound {
        /// The id that was looked up
        id: String,
    },
}

/// Error reading or writing the event store.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem error.
    #[error("Failed to access event store at {}: {source}", path.display())]
    Io {
        /// The store file
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// The store file is not a valid event list.
    #[error("Failed to parse event store at {}: {source}", path.display())]
    Json {
        /// The store file
        path: PathBuf,
        /// The underlying error
        source: serde_json::Error,
    },
}
