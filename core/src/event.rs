// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Span, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::recurrence::{RecurrenceDescription, Weekday};

/// NOTE: Used for persisting exclusions, so it should be stable across different runs.
const STABLE_LEN_DATEONLY: usize = "2006-01-02".len();

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// One end of an event: either a whole calendar day or an absolute instant.
///
/// Serialized as `{"date": "2024-09-16"}` or `{"dateTime": "2024-09-16T05:00:00Z"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    /// All-day calendar date without time or zone.
    #[serde(rename = "date")]
    AllDay(Date),

    /// Zoned absolute instant.
    #[serde(rename = "dateTime")]
    Instant(Timestamp),
}

impl Boundary {
    /// Whether this is an all-day boundary.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Boundary::AllDay(_))
    }

    /// Whether both boundaries use the same variant.
    pub fn same_kind(&self, other: &Boundary) -> bool {
        self.is_all_day() == other.is_all_day()
    }

    /// The calendar date, instants are read in the system time zone.
    pub fn date(&self) -> Date {
        match self {
            Boundary::AllDay(d) => *d,
            Boundary::Instant(ts) => ts.to_zoned(TimeZone::system()).date(),
        }
    }

    /// The weekday of [`Boundary::date`].
    pub fn weekday(&self) -> Weekday {
        self.date().weekday().into()
    }

    /// Adds a duration. All-day boundaries move by whole days, at least one.
    pub fn checked_add(&self, duration: SignedDuration) -> Result<Boundary, jiff::Error> {
        match self {
            Boundary::AllDay(d) => {
                let days = (duration.as_secs() / SECONDS_PER_DAY).max(1);
                d.checked_add(Span::new().try_days(days)?)
                    .map(Boundary::AllDay)
            }
            Boundary::Instant(ts) => ts.checked_add(duration).map(Boundary::Instant),
        }
    }
}

impl Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::AllDay(d) => write!(f, "{d}"),
            Boundary::Instant(ts) => write!(f, "{ts}"),
        }
    }
}

impl FromStr for Boundary {
    type Err = jiff::Error;

    /// Parses `YYYY-MM-DD` as an all-day boundary and anything longer as an
    /// RFC 3339 timestamp with offset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == STABLE_LEN_DATEONLY {
            s.parse().map(Boundary::AllDay)
        } else {
            s.parse().map(Boundary::Instant)
        }
    }
}

impl From<Date> for Boundary {
    fn from(d: Date) -> Self {
        Boundary::AllDay(d)
    }
}

impl From<Timestamp> for Boundary {
    fn from(ts: Timestamp) -> Self {
        Boundary::Instant(ts)
    }
}

/// A boundary as reported by the rendering engine, where either field may be
/// missing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryInput {
    /// All-day date, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,

    /// Instant, if any. Takes precedence over `date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<Timestamp>,
}

impl BoundaryInput {
    /// Resolves to a boundary, `None` when both fields are missing.
    pub fn resolve(&self) -> Option<Boundary> {
        match (self.date_time, self.date) {
            (Some(ts), _) => Some(Boundary::Instant(ts)),
            (None, Some(d)) => Some(Boundary::AllDay(d)),
            (None, None) => None,
        }
    }
}

impl From<Boundary> for BoundaryInput {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::AllDay(d) => Self {
                date: Some(d),
                date_time: None,
            },
            Boundary::Instant(ts) => Self {
                date: None,
                date_time: Some(ts),
            },
        }
    }
}

/// A calendar event, either standalone, a series parent carrying a recurrence
/// rule, or a detached override of one occurrence of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier.
    pub id: String,

    /// Title shown on the calendar.
    #[serde(default)]
    pub title: String,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start boundary, same variant as `end`.
    pub start: Boundary,

    /// End boundary, same variant as `start`.
    pub end: Boundary,

    /// Compact recurrence rule, only on series parents.
    #[serde(default, alias = "recurrence", skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,

    /// Occurrences of the series that must not be expanded.
    #[serde(
        default,
        alias = "excludeDates",
        with = "boundary_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub excluded_dates: Vec<Boundary>,

    /// Parent series of a detached override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originating_series_id: Option<String>,

    /// Display color, e.g. `#BA3D9D`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Resource lane the event belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl Event {
    /// Creates a plain, non-recurring event.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: impl Into<Boundary>,
        end: impl Into<Boundary>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start: start.into(),
            end: end.into(),
            recurrence_rule: None,
            excluded_dates: Vec::new(),
            originating_series_id: None,
            color: None,
            resource_id: None,
        }
    }

    /// Whether the event spans whole days.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Whether the event defines a recurring series.
    pub fn is_series(&self) -> bool {
        self.recurrence_rule.is_some()
    }

    /// The decoded recurrence rule, or the non-repeating default.
    pub fn recurrence(&self) -> RecurrenceDescription {
        RecurrenceDescription::from_rule(self.recurrence_rule.as_deref())
    }

    /// Whether the occurrence starting at `boundary` is excluded from the series.
    pub fn is_excluded(&self, boundary: &Boundary) -> bool {
        self.excluded_dates.contains(boundary)
    }

    /// Drops exclusions that are not the same kind of boundary as `start`,
    /// returning how many were dropped. Such exclusions can never match an
    /// occurrence once a series switches between all-day and timed.
    pub(crate) fn retain_matching_exclusions(&mut self) -> usize {
        let before = self.excluded_dates.len();
        let start = self.start;
        self.excluded_dates.retain(|a| a.same_kind(&start));
        before - self.excluded_dates.len()
    }

    /// Checks the fields a user can get wrong in the editing surface.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        match (&self.start, &self.end) {
            (Boundary::Instant(start), Boundary::Instant(end)) if start >= end => {
                Err(ValidationError::EndNotAfterStart)
            }
            (start, end) if !start.same_kind(end) => Err(ValidationError::MixedBoundaries),
            _ => Ok(()),
        }
    }
}

/// Draft for an event created by a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Title, defaults to `Event <n>`.
    pub title: Option<String>,

    /// Description of the event, if available.
    pub description: Option<String>,

    /// Start boundary of the dragged range.
    pub start: Boundary,

    /// End boundary of the dragged range.
    pub end: Boundary,

    /// Display color, picked from the palette when missing.
    pub color: Option<String>,

    /// Resource lane the gesture happened in.
    pub resource_id: Option<String>,
}

impl EventDraft {
    /// Creates a draft for the given range.
    pub fn new(start: impl Into<Boundary>, end: impl Into<Boundary>) -> Self {
        Self {
            title: None,
            description: None,
            start: start.into(),
            end: end.into(),
            color: None,
            resource_id: None,
        }
    }

    /// Creates a draft from a start only, ending `duration` later.
    pub fn with_default_duration(
        start: impl Into<Boundary>,
        duration: SignedDuration,
    ) -> Result<Self, jiff::Error> {
        let start = start.into();
        let end = start.checked_add(duration)?;
        Ok(Self::new(start, end))
    }
}

/// Exclusions are persisted as plain boundary strings.
mod boundary_list {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Boundary;

    pub fn serialize<S: Serializer>(value: &[Boundary], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(value.iter().map(ToString::to_string))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Boundary>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| {
                s.parse()
                    .map_err(|e| D::Error::custom(format!("invalid excluded date {s:?}: {e}")))
            })
            .collect()
    }
}
